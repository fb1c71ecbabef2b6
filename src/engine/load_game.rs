//! Turns a game payload into a fresh session.

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::engine::api_client::{server_error, TriviaApi};
use crate::engine::error::{TriviaError, TriviaResult};
use crate::model::game_kind::{GameConfig, GameKind, MAX_CAST_ROUNDS};
use crate::model::payload::*;
use crate::model::reveal::{AnswerCard, PosterReveal, RevealData, YearQuestion, YEAR_CAST_LIMIT};
use crate::model::session::GameSession;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadedGame {
    Ready {
        session: GameSession,
        /// Only the timeline game has one.
        director: Option<String>,
    },
    /// The server started long-running work that has to be polled.
    Processing { session_id: String },
}

impl LoadedGame {
    fn ready(session: GameSession) -> Self {
        LoadedGame::Ready {
            session,
            director: None,
        }
    }
}

pub fn load_game<A: TriviaApi + ?Sized>(api: &A, kind: GameKind) -> TriviaResult<LoadedGame> {
    let value = api.get_json(kind.config().endpoint)?;
    decode_game(kind, value)
}

pub fn decode_game(kind: GameKind, value: Value) -> TriviaResult<LoadedGame> {
    if let Some(err) = server_error(&value) {
        return Err(err);
    }

    let config = kind.config();
    let loaded = match kind {
        GameKind::Cast => {
            let p: CastPayload = decode(value)?;
            let title = require_answer(p.title)?;
            require_units(&p.cast, "cast")?;
            let rounds = p.cast.len().min(MAX_CAST_ROUNDS);
            LoadedGame::ready(GameSession::new(kind, &config, title, rounds, RevealData::Cast(p.cast)))
        }

        GameKind::Poster => {
            let p: PosterPayload = decode(value)?;
            let title = require_answer(p.title)?;
            let summary = p.summary.unwrap_or_default();
            if p.poster.is_none() && summary.trim().is_empty() {
                return Err(TriviaError::NoData("poster"));
            }
            let reveal = PosterReveal::new(p.poster, &summary, p.tagline);
            let rounds = reveal.step_count();
            LoadedGame::ready(GameSession::new(kind, &config, title, rounds, RevealData::Poster(reveal)))
        }

        GameKind::Quote => {
            let p: QuotePayload = decode(value)?;
            let title = require_answer(p.title)?;
            require_units(&p.quotes, "quotes")?;
            let rounds = p.total_rounds.unwrap_or(p.quotes.len());
            let card = AnswerCard {
                year: p.year,
                poster: p.tmdb.and_then(|t| t.poster_path),
                summary: None,
            };
            LoadedGame::ready(
                GameSession::new(kind, &config, title, rounds, RevealData::Quotes(p.quotes))
                    .with_answer_card(card),
            )
        }

        GameKind::Framed => {
            let p: FramedPayload = decode(value)?;
            let title = require_answer(p.title)?;
            require_units(&p.frames, "frames")?;
            let rounds = p.total_rounds.unwrap_or(p.frames.len());
            let card = AnswerCard {
                year: p.year,
                ..AnswerCard::default()
            };
            LoadedGame::ready(
                GameSession::new(kind, &config, title, rounds, RevealData::Frames(p.frames))
                    .with_answer_card(card),
            )
        }

        GameKind::CastMatch => {
            let p: CastMatchPayload = decode(value)?;
            let answer = require_answer(p.answer)?;
            require_units(&p.movies, "movies")?;
            let rounds = p.total_rounds.unwrap_or(config.default_rounds);
            LoadedGame::ready(GameSession::new(kind, &config, answer, rounds, RevealData::Movies(p.movies)))
        }

        GameKind::Timeline => {
            let p: TimelinePayload = decode(value)?;
            let title = require_answer(p.title)?;
            require_units(&p.cast, "cast")?;
            LoadedGame::Ready {
                session: GameSession::new(
                    kind,
                    &config,
                    title,
                    config.default_rounds,
                    RevealData::Cast(p.cast),
                )
                .with_answer_card(AnswerCard {
                    year: p.year,
                    poster: None,
                    summary: p.summary,
                }),
                director: p.director,
            }
        }

        GameKind::Year => {
            let p: YearPayload = decode(value)?;
            let title = require_answer(p.title)?;
            let year = p.year.ok_or(TriviaError::NoData("release year"))?;
            let mut cast = p.cast;
            cast.truncate(YEAR_CAST_LIMIT);
            let question = YearQuestion {
                year,
                summary: p.summary,
                cast,
                poster: p.poster,
                tagline: p.tagline,
            };
            LoadedGame::ready(GameSession::new(kind, &config, title, 1, RevealData::Year(question)))
        }

        GameKind::FrameColor => {
            let start: FrameStart = decode(value)?;
            match (start.session_id, start.result) {
                (Some(session_id), _) => LoadedGame::Processing { session_id },
                (None, Some(result)) => {
                    debug!(
                        "using cached frame colours for {}",
                        start.movie_title.as_deref().unwrap_or(&result.title)
                    );
                    LoadedGame::ready(frame_color_session(&config, result)?)
                }
                (None, None) => return Err(TriviaError::NoData("session ID")),
            }
        }
    };

    Ok(loaded)
}

/// Session for a finished frame-colour analysis.
pub fn frame_color_session(config: &GameConfig, result: FrameColorResult) -> TriviaResult<GameSession> {
    let answer = result
        .options
        .get(result.correct_answer)
        .cloned()
        .ok_or(TriviaError::NoData("answer options"))?;
    if result.frame_colors.is_empty() {
        return Err(TriviaError::NoData("colour samples"));
    }

    Ok(GameSession::new(
        GameKind::FrameColor,
        config,
        answer,
        1,
        RevealData::FrameColor(result),
    ))
}

fn decode<T: DeserializeOwned>(value: Value) -> TriviaResult<T> {
    Ok(serde_json::from_value(value)?)
}

fn require_answer(answer: Option<String>) -> TriviaResult<String> {
    answer
        .filter(|a| !a.trim().is_empty())
        .ok_or(TriviaError::MissingAnswer)
}

fn require_units<T>(units: &[T], what: &'static str) -> TriviaResult<()> {
    if units.is_empty() {
        Err(TriviaError::NoData(what))
    } else {
        Ok(())
    }
}

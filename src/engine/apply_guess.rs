use log::info;

use crate::engine::error::{TriviaError, TriviaResult};
use crate::engine::normalize::titles_match;
use crate::model::game_kind::EmptyGuessPolicy;
use crate::model::outcome::RoundOutcome;
use crate::model::reveal::RevealData;
use crate::model::session::{GameSession, SessionStatus};

/// Apply a free-text title guess to the session, returning the outcome.
pub fn submit_guess(session: &mut GameSession, raw: &str) -> RoundOutcome {
    if !session.accepts_input() {
        return RoundOutcome::Ignored;
    }

    let guess = raw.trim();
    if guess.is_empty() {
        return match session.empty_guess {
            EmptyGuessPolicy::Skip => skip(session),
            EmptyGuessPolicy::Ignore => RoundOutcome::EmptyGuess,
        };
    }

    if titles_match(guess, &session.answer) {
        win(session)
    } else {
        advance(session, false)
    }
}

/// Give up on the current round without guessing.
pub fn skip(session: &mut GameSession) -> RoundOutcome {
    if !session.accepts_input() {
        return RoundOutcome::Ignored;
    }
    advance(session, true)
}

/// Release-year guess. Non-numeric input is rejected and changes nothing.
pub fn guess_year(session: &mut GameSession, raw: &str) -> TriviaResult<RoundOutcome> {
    if !session.accepts_input() {
        return Ok(RoundOutcome::Ignored);
    }

    let year = match &session.reveal {
        RevealData::Year(q) => q.year,
        _ => {
            return Err(TriviaError::Validation(
                "This game does not take a year".to_string(),
            ))
        }
    };

    let guess: i32 = raw
        .trim()
        .parse()
        .map_err(|_| TriviaError::Validation("Please enter a valid year".to_string()))?;

    if guess == year {
        Ok(win(session))
    } else {
        Ok(advance(session, false))
    }
}

/// Multiple-choice pick by option index.
pub fn pick_choice(session: &mut GameSession, index: usize) -> TriviaResult<RoundOutcome> {
    if !session.accepts_input() {
        return Ok(RoundOutcome::Ignored);
    }

    let correct = match &session.reveal {
        RevealData::FrameColor(result) => {
            if index >= result.options.len() {
                return Err(TriviaError::Validation(format!(
                    "There is no option {}",
                    index + 1
                )));
            }
            result.correct_answer
        }
        _ => {
            return Err(TriviaError::Validation(
                "This game has no choices".to_string(),
            ))
        }
    };

    if index == correct {
        Ok(win(session))
    } else {
        Ok(advance(session, false))
    }
}

fn win(session: &mut GameSession) -> RoundOutcome {
    let round = session.current_round;
    let score = session.score_for_round(round);
    session.status = SessionStatus::Won;
    session.score = score;
    info!(
        "{:?} won in round {} for {} points",
        session.kind,
        round + 1,
        score
    );
    RoundOutcome::Correct { score, round }
}

fn advance(session: &mut GameSession, skipped: bool) -> RoundOutcome {
    session.current_round = (session.current_round + 1).min(session.round_count);

    if session.current_round >= session.round_count {
        session.status = SessionStatus::Lost;
        session.score = 0;
        info!("{:?} lost, the answer was {}", session.kind, session.answer);
        return RoundOutcome::OutOfRounds { skipped };
    }

    let remaining = session.remaining();
    if skipped {
        RoundOutcome::Skipped { remaining }
    } else {
        RoundOutcome::Incorrect { remaining }
    }
}

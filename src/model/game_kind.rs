use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Points for a movie guessed in round N of the twelve-hint cast games.
pub const CAST_SCORES: &[u32] = &[500, 400, 300, 200, 150, 100, 75, 50, 40, 30, 20, 10];
pub const QUOTE_SCORES: &[u32] = &[500, 300, 100];
pub const CAST_MATCH_SCORES: &[u32] = &[400, 300, 200, 100];
pub const SINGLE_SHOT_SCORES: &[u32] = &[100];

pub const MAX_CAST_ROUNDS: usize = 12;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    #[default]
    Cast,
    Poster,
    Quote,
    Framed,
    CastMatch,
    Timeline,
    Year,
    FrameColor,
}

/// What an empty submission does. The games disagree here, so it is per game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmptyGuessPolicy {
    Skip,
    Ignore,
}

/// Where autocomplete suggestions come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateSource {
    /// Movies and shows from `/api/library`.
    Library,
    /// Only the `movies` half of `/api/library`.
    LibraryMovies,
    Actors,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub endpoint: &'static str,
    /// Round budget when the payload does not carry one.
    pub default_rounds: usize,
    pub score_table: &'static [u32],
    pub empty_guess: EmptyGuessPolicy,
    pub candidates: CandidateSource,
    /// Noun used in feedback ("The movie was ...").
    pub answer_label: &'static str,
}

impl GameKind {
    pub const ALL: [GameKind; 8] = [
        GameKind::Cast,
        GameKind::Poster,
        GameKind::Quote,
        GameKind::Framed,
        GameKind::CastMatch,
        GameKind::Timeline,
        GameKind::Year,
        GameKind::FrameColor,
    ];

    pub fn random() -> GameKind {
        let mut rng = rand::thread_rng();
        *Self::ALL.choose(&mut rng).unwrap_or(&GameKind::Cast)
    }

    pub fn title(self) -> &'static str {
        match self {
            GameKind::Cast => "Cast Reveal",
            GameKind::Poster => "Poster Reveal",
            GameKind::Quote => "Quote Guess",
            GameKind::Framed => "Framed",
            GameKind::CastMatch => "Cast Match",
            GameKind::Timeline => "Timeline",
            GameKind::Year => "Guess the Year",
            GameKind::FrameColor => "Frame Colors",
        }
    }

    /// Games that take a free-text title guess through the suggestion panel.
    pub fn takes_text_guess(self) -> bool {
        !matches!(self, GameKind::Year | GameKind::FrameColor)
    }

    pub fn config(self) -> GameConfig {
        match self {
            GameKind::Cast => GameConfig {
                endpoint: "/api/trivia/cast",
                default_rounds: MAX_CAST_ROUNDS,
                score_table: CAST_SCORES,
                empty_guess: EmptyGuessPolicy::Skip,
                candidates: CandidateSource::Library,
                answer_label: "movie",
            },
            GameKind::Poster => GameConfig {
                endpoint: "/api/trivia/poster",
                default_rounds: 1,
                score_table: QUOTE_SCORES,
                empty_guess: EmptyGuessPolicy::Ignore,
                candidates: CandidateSource::Library,
                answer_label: "movie",
            },
            GameKind::Quote => GameConfig {
                endpoint: "/api/trivia/quote",
                default_rounds: 3,
                score_table: QUOTE_SCORES,
                empty_guess: EmptyGuessPolicy::Ignore,
                candidates: CandidateSource::LibraryMovies,
                answer_label: "movie",
            },
            GameKind::Framed => GameConfig {
                endpoint: "/api/trivia/framed",
                default_rounds: 6,
                score_table: &[],
                empty_guess: EmptyGuessPolicy::Ignore,
                candidates: CandidateSource::Library,
                answer_label: "movie",
            },
            GameKind::CastMatch => GameConfig {
                endpoint: "/api/trivia/cast-match",
                default_rounds: 4,
                score_table: CAST_MATCH_SCORES,
                empty_guess: EmptyGuessPolicy::Ignore,
                candidates: CandidateSource::Actors,
                answer_label: "actor",
            },
            GameKind::Timeline => GameConfig {
                endpoint: "/api/trivia/timeline",
                default_rounds: MAX_CAST_ROUNDS,
                score_table: CAST_SCORES,
                empty_guess: EmptyGuessPolicy::Skip,
                candidates: CandidateSource::LibraryMovies,
                answer_label: "movie",
            },
            GameKind::Year => GameConfig {
                endpoint: "/api/trivia/year",
                default_rounds: 1,
                score_table: SINGLE_SHOT_SCORES,
                empty_guess: EmptyGuessPolicy::Ignore,
                candidates: CandidateSource::None,
                answer_label: "year",
            },
            GameKind::FrameColor => GameConfig {
                endpoint: "/api/trivia/frame",
                default_rounds: 1,
                score_table: SINGLE_SHOT_SCORES,
                empty_guess: EmptyGuessPolicy::Ignore,
                candidates: CandidateSource::None,
                answer_label: "movie",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_tables_decrease() {
        for kind in GameKind::ALL {
            let table = kind.config().score_table;
            assert!(
                table.windows(2).all(|w| w[0] > w[1]),
                "{:?} score table is not strictly decreasing",
                kind
            );
        }
    }

    #[test]
    fn endpoints_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for kind in GameKind::ALL {
            assert!(seen.insert(kind.config().endpoint));
        }
    }

    #[test]
    fn random_kind_is_listed() {
        for _ in 0..32 {
            assert!(GameKind::ALL.contains(&GameKind::random()));
        }
    }
}

use crate::model::game_kind::GameKind;
use crate::model::outcome::{BonusOutcome, RoundOutcome};
use crate::model::reveal::RevealData;
use crate::model::session::GameSession;

pub const EMPTY_GUESS: &str = "Please enter a guess";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
    Neutral,
}

/// One line of player-facing feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub tone: Tone,
    pub text: String,
}

impl Message {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Error,
            text: text.into(),
        }
    }

    pub fn neutral(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Neutral,
            text: text.into(),
        }
    }

    /// Feedback for a round outcome. `Ignored` has none.
    pub fn for_outcome(outcome: &RoundOutcome, session: &GameSession) -> Option<Message> {
        let answer = session.answer();
        let label = session.kind().config().answer_label;

        let msg = match (session.kind(), outcome) {
            (_, RoundOutcome::Ignored) => return None,
            (_, RoundOutcome::EmptyGuess) => Message::error(EMPTY_GUESS),

            (GameKind::Year, RoundOutcome::Correct { .. }) => {
                Message::success(format!("Correct! It was released in {}", year_of(session)))
            }
            (GameKind::Year, RoundOutcome::OutOfRounds { .. }) => {
                Message::error(format!("Not quite! It was released in {}", year_of(session)))
            }
            (GameKind::FrameColor, RoundOutcome::OutOfRounds { .. }) => {
                Message::error(format!("Wrong! The correct answer was \"{answer}\""))
            }

            (_, RoundOutcome::Correct { score, round }) => Message::success(format!(
                "Correct! It was \"{answer}\". Guessed in round {} for {score} points",
                round + 1
            )),
            (_, RoundOutcome::Incorrect { remaining }) => {
                Message::error(format!("Incorrect. Try again! ({remaining} attempts left)"))
            }
            (_, RoundOutcome::Skipped { remaining }) => {
                Message::neutral(format!("Skipped! ({remaining} attempts left)"))
            }
            (_, RoundOutcome::OutOfRounds { .. }) => {
                Message::error(format!("Game over! The {label} was \"{answer}\""))
            }
        };

        Some(msg)
    }

    pub fn for_bonus(outcome: &BonusOutcome, director: Option<&str>) -> Option<Message> {
        let director = director.unwrap_or("unknown");
        let msg = match outcome {
            BonusOutcome::Ignored => return None,
            BonusOutcome::Correct { score } => {
                Message::success(format!("Perfect! Correct director! (+{score} points)"))
            }
            BonusOutcome::Missed => {
                Message::error(format!("Not quite. The director was {director}"))
            }
            BonusOutcome::Skipped => {
                Message::neutral(format!("Skipped! The director was {director}"))
            }
            BonusOutcome::Unavailable => {
                Message::neutral("No director information available for this movie")
            }
        };
        Some(msg)
    }
}

fn year_of(session: &GameSession) -> String {
    match session.reveal() {
        RevealData::Year(q) => q.year.to_string(),
        _ => "an unknown year".to_string(),
    }
}

/// What a guess, skip or pick did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    Correct { score: u32, round: usize },
    Incorrect { remaining: usize },
    Skipped { remaining: usize },
    /// The last round was used up without a correct answer.
    OutOfRounds { skipped: bool },
    /// An empty guess in a game that wants a real answer. Nothing changed.
    EmptyGuess,
    /// Input arrived while the session was not accepting it.
    Ignored,
}

impl RoundOutcome {
    pub fn ends_session(&self) -> bool {
        matches!(self, RoundOutcome::Correct { .. } | RoundOutcome::OutOfRounds { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BonusOutcome {
    Correct { score: u32 },
    Missed,
    Skipped,
    Unavailable,
    Ignored,
}

use crate::model::game_kind::{EmptyGuessPolicy, GameConfig, GameKind};
use crate::model::reveal::{AnswerCard, RevealData};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Loading,
    InProgress,
    Won,
    Lost,
}

impl SessionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionStatus::Won | SessionStatus::Lost)
    }
}

/// One game from payload load until it is replaced by a new game.
///
/// Round state only moves forward: `current_round` grows by one per miss or
/// skip and the status goes `InProgress -> Won | Lost`. The transitions live
/// in `engine::apply_guess`.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub(crate) kind: GameKind,
    pub(crate) answer: String,
    pub(crate) round_count: usize,
    pub(crate) current_round: usize,
    pub(crate) reveal: RevealData,
    pub(crate) status: SessionStatus,
    pub(crate) score: u32,
    pub(crate) score_table: Vec<u32>,
    pub(crate) empty_guess: EmptyGuessPolicy,
    pub(crate) answer_card: AnswerCard,
}

impl GameSession {
    /// A session ready for its first guess. A zero round budget is bumped to
    /// one so that the first guess is always possible.
    pub fn new(
        kind: GameKind,
        config: &GameConfig,
        answer: impl Into<String>,
        round_count: usize,
        reveal: RevealData,
    ) -> Self {
        Self {
            kind,
            answer: answer.into(),
            round_count: round_count.max(1),
            current_round: 0,
            reveal,
            status: SessionStatus::InProgress,
            score: 0,
            score_table: config.score_table.to_vec(),
            empty_guess: config.empty_guess,
            answer_card: AnswerCard::default(),
        }
    }

    pub fn with_score_table(mut self, table: &[u32]) -> Self {
        self.score_table = table.to_vec();
        self
    }

    pub fn with_empty_guess(mut self, policy: EmptyGuessPolicy) -> Self {
        self.empty_guess = policy;
        self
    }

    pub fn with_answer_card(mut self, card: AnswerCard) -> Self {
        self.answer_card = card;
        self
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn round_count(&self) -> usize {
        self.round_count
    }

    pub fn current_round(&self) -> usize {
        self.current_round
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn reveal(&self) -> &RevealData {
        &self.reveal
    }

    /// Answer details, only once the game is over.
    pub fn answer_card(&self) -> Option<&AnswerCard> {
        Some(&self.answer_card).filter(|c| self.is_terminal() && !c.is_empty())
    }

    pub fn empty_guess(&self) -> EmptyGuessPolicy {
        self.empty_guess
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn accepts_input(&self) -> bool {
        self.status == SessionStatus::InProgress
    }

    /// Guesses left including the current one.
    pub fn remaining(&self) -> usize {
        self.round_count.saturating_sub(self.current_round)
    }

    /// Units disclosed so far. After the game ends everything is shown.
    pub fn revealed_count(&self) -> usize {
        if self.is_terminal() {
            self.reveal.unit_count()
        } else {
            self.reveal.revealed_at(self.current_round)
        }
    }

    /// Round used for threshold-gated reveals. Terminal sessions show all.
    pub fn visibility_round(&self) -> usize {
        if self.is_terminal() {
            usize::MAX
        } else {
            self.current_round
        }
    }

    pub fn score_for_round(&self, round: usize) -> u32 {
        self.score_table.get(round).copied().unwrap_or(0)
    }
}

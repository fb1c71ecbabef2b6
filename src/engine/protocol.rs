use crate::model::bonus_round::DirectorBonus;
use crate::model::candidate_index::CandidateIndex;
use crate::model::game_kind::GameKind;
use crate::model::message::Message;
use crate::model::session::{GameSession, SessionStatus};

pub enum EngineCommand {
    LoadCandidates,
    NewGame(GameKind),

    SubmitGuess(String),
    Skip,
    GuessYear(String),
    PickChoice(usize),

    GuessDirector(String),
    SkipDirector,

    CheckConnection,
    Shutdown,
}

pub enum EngineResponse {
    Candidates {
        titles: CandidateIndex,
        directors: CandidateIndex,
    },

    SessionUpdated(SessionView),

    Progress {
        percent: u8,
        message: String,
    },

    FullMessageHistory(Vec<Message>),

    ConnectionChecked {
        ok: bool,
        message: String,
    },

    Failed(String),
}

/// What the UI needs to draw the current game.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub kind: GameKind,
    pub session: Option<GameSession>,
    pub bonus: Option<DirectorBonus>,
    pub status: SessionStatus,
    pub total_score: u32,
    pub polling: bool,
    pub load_error: Option<String>,
}

impl Default for SessionView {
    fn default() -> Self {
        Self {
            kind: GameKind::default(),
            session: None,
            bonus: None,
            status: SessionStatus::Loading,
            total_score: 0,
            polling: false,
            load_error: None,
        }
    }
}

impl SessionView {
    /// True while the director phase is waiting for its guess.
    pub fn awaiting_director(&self) -> bool {
        self.bonus.as_ref().is_some_and(DirectorBonus::is_open)
    }
}

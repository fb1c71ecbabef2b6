pub mod bonus_round;
pub mod candidate_index;
pub mod game_kind;
pub mod message;
pub mod outcome;
pub mod payload;
pub mod reveal;
pub mod session;
pub mod suggestion_panel;

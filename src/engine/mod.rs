pub mod engine;
pub mod protocol;
pub mod controller;

pub mod api_client;
pub mod apply_guess;
pub mod error;
pub mod frame_poller;
pub mod load_game;
pub mod normalize;

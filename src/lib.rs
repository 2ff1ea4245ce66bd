// Public API for integration tests and potential library usage

pub mod api;
pub mod broadcast;
pub mod game;
pub mod protocol;
pub mod scoring;
pub mod screen;
pub mod selection;
pub mod state;
pub mod trivia;
pub mod types;
pub mod ws;

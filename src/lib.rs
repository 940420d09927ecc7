//! Scoreboard - A two-team scoreboard server
//!
//! This library tracks two teams' scores across up to nine quarters, keeps
//! a per-quarter history, drives a countdown timer with audio and haptic
//! cues, and serves it all over a small JSON API.

pub mod api;
pub mod color;
pub mod config;
pub mod feedback;
pub mod gesture;
pub mod records;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, Game, GameStore};
pub use api::create_router;
pub use utils::signals::shutdown_signal;

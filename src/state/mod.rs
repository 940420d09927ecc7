//! State management module
//!
//! The game model and its transitions, the quarter history, the store that
//! owns the active game and the application state shared with the server.

pub mod app_state;
pub mod clock;
pub mod game;
pub mod history;
pub mod store;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, PickerError, PickerSession};
pub use game::{Game, Quarter, Team, DEFAULT_TIMER_SECONDS};
pub use history::QuarterRecord;
pub use store::GameStore;
pub use timer_state::{TickOutcome, TimerPhase, TimerState};

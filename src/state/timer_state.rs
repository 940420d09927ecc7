//! Timer phases, tick outcomes and the timer view served to clients

use serde::{Deserialize, Serialize};

use super::{clock, game::Game};

/// Run state of the countdown timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Stopped,
    Running,
}

/// What a single tick did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer was not running, nothing changed
    Idle,
    /// Decremented, no cue
    Continue { remaining: u32 },
    /// Decremented into the final seconds, countdown cue due
    Countdown { remaining: u32 },
    /// Reached zero and stopped, final alarm due
    Finished,
    /// Was already at zero; stopped without a cue
    Expired,
}

impl TickOutcome {
    /// Whether the tick modified the game
    pub fn changed(&self) -> bool {
        !matches!(self, TickOutcome::Idle)
    }

    /// Whether the timer is stopped after this tick
    pub fn stops(&self) -> bool {
        matches!(self, TickOutcome::Idle | TickOutcome::Finished | TickOutcome::Expired)
    }
}

/// Timer state as shown on the timer screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: TimerPhase,
    pub remaining_seconds: u32,
    /// `MM:SS`
    pub display: String,
}

impl TimerState {
    pub fn from_game(game: &Game) -> Self {
        Self {
            phase: if game.is_timer_running {
                TimerPhase::Running
            } else {
                TimerPhase::Stopped
            },
            remaining_seconds: game.timer_seconds,
            display: clock::format(game.timer_seconds),
        }
    }

    /// Check if the timer is running
    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }
}

//! Haptic and audio feedback port
//!
//! The store and the timer driver only talk to the [`Feedback`] trait. Every
//! call is fire-and-forget: an `Err` is logged by the caller and never
//! interrupts the state change that triggered it.

pub mod command;
pub mod log;
pub mod recording;

use serde::{Deserialize, Serialize};

pub use command::CommandFeedback;
pub use log::LogFeedback;
pub use recording::{FeedbackEvent, RecordingFeedback};

/// Haptic pulse intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HapticStyle {
    Light,
    Medium,
    Heavy,
}

/// Audio cue played by the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoundCue {
    /// Short beep for each of the last five seconds
    CountdownBeep,
    /// Longer alarm when the timer reaches zero
    FinalAlarm,
}

/// Platform feedback collaborator
pub trait Feedback: Send + Sync {
    fn haptic(&self, style: HapticStyle) -> Result<(), String>;

    fn play(&self, cue: SoundCue) -> Result<(), String>;
}

/// Feedback that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFeedback;

impl Feedback for NoopFeedback {
    fn haptic(&self, _style: HapticStyle) -> Result<(), String> {
        Ok(())
    }

    fn play(&self, _cue: SoundCue) -> Result<(), String> {
        Ok(())
    }
}

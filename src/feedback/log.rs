//! Feedback that only writes to the log

use tracing::info;

use super::{Feedback, HapticStyle, SoundCue};

/// Logs every cue instead of driving hardware
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFeedback;

impl Feedback for LogFeedback {
    fn haptic(&self, style: HapticStyle) -> Result<(), String> {
        info!(?style, "Haptic pulse");
        Ok(())
    }

    fn play(&self, cue: SoundCue) -> Result<(), String> {
        info!(?cue, "Sound cue");
        Ok(())
    }
}

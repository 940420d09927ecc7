//! In-memory feedback used by tests and diagnostics

use std::sync::Mutex;

use super::{Feedback, HapticStyle, SoundCue};

/// A single recorded feedback call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackEvent {
    Haptic(HapticStyle),
    Sound(SoundCue),
}

/// Records every call; optionally fails them all after recording
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    events: Mutex<Vec<FeedbackEvent>>,
    fail: bool,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder whose calls all return an error
    pub fn failing() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Everything recorded so far
    pub fn events(&self) -> Vec<FeedbackEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Number of times `cue` was played
    pub fn sound_count(&self, cue: SoundCue) -> usize {
        self.events()
            .iter()
            .filter(|e| **e == FeedbackEvent::Sound(cue))
            .count()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    fn record(&self, event: FeedbackEvent) -> Result<(), String> {
        self.events
            .lock()
            .map_err(|e| format!("Failed to lock feedback log: {}", e))?
            .push(event);

        if self.fail {
            return Err(format!("{:?} is unavailable", event));
        }
        Ok(())
    }
}

impl Feedback for RecordingFeedback {
    fn haptic(&self, style: HapticStyle) -> Result<(), String> {
        self.record(FeedbackEvent::Haptic(style))
    }

    fn play(&self, cue: SoundCue) -> Result<(), String> {
        self.record(FeedbackEvent::Sound(cue))
    }
}

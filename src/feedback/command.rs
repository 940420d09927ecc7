//! Feedback that plays sound cues through user-supplied shell commands

use tokio::{process::Command, runtime::Handle};
use tracing::{debug, info, warn};

use super::{Feedback, HapticStyle, SoundCue};

/// Runs a configured shell command for each sound cue.
///
/// Commands are spawned on the current tokio runtime and never awaited by
/// the caller. Haptics have no host equivalent and are only logged.
#[derive(Debug, Clone, Default)]
pub struct CommandFeedback {
    pub beep_command: Option<String>,
    pub alarm_command: Option<String>,
}

impl CommandFeedback {
    pub fn new(beep_command: Option<String>, alarm_command: Option<String>) -> Self {
        Self {
            beep_command,
            alarm_command,
        }
    }

    fn command_for(&self, cue: SoundCue) -> Option<&str> {
        match cue {
            SoundCue::CountdownBeep => self.beep_command.as_deref(),
            SoundCue::FinalAlarm => self.alarm_command.as_deref(),
        }
    }
}

impl Feedback for CommandFeedback {
    fn haptic(&self, style: HapticStyle) -> Result<(), String> {
        debug!(?style, "Haptic pulse (no device)");
        Ok(())
    }

    fn play(&self, cue: SoundCue) -> Result<(), String> {
        let Some(command) = self.command_for(cue) else {
            debug!(?cue, "No command configured for sound cue");
            return Ok(());
        };

        let handle = Handle::try_current()
            .map_err(|e| format!("No runtime to play {:?}: {}", cue, e))?;

        let command = command.to_string();
        handle.spawn(async move {
            if let Err(e) = run_sound_command(&command).await {
                warn!("Sound command failed: {}", e);
            }
        });
        Ok(())
    }
}

/// Run `command` through `sh -c` and wait for it to finish
pub async fn run_sound_command(command: &str) -> Result<(), String> {
    debug!("Running sound command: {}", command);

    let output = Command::new("sh")
        .args(["-c", command])
        .output()
        .await
        .map_err(|e| format!("Failed to execute '{}': {}", command, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("'{}' exited with {}: {}", command, output.status, stderr.trim()));
    }

    info!("Sound command completed: {}", command);
    Ok(())
}

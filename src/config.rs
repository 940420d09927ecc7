//! Configuration and CLI argument handling

use std::sync::Arc;
use clap::Parser;

use crate::feedback::{CommandFeedback, Feedback, LogFeedback, NoopFeedback};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "scoreboard")]
#[command(about = "A two-team scoreboard server with a quarter history and a countdown timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Shell command run for each countdown beep
    #[arg(long)]
    pub beep_command: Option<String>,

    /// Shell command run when the timer reaches zero
    #[arg(long)]
    pub alarm_command: Option<String>,

    /// Disable haptic and sound feedback entirely
    #[arg(short, long, conflicts_with_all = ["beep_command", "alarm_command"])]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Feedback backend selected by the flags
    pub fn feedback(&self) -> Arc<dyn Feedback> {
        if self.quiet {
            Arc::new(NoopFeedback)
        } else if self.beep_command.is_some() || self.alarm_command.is_some() {
            Arc::new(CommandFeedback::new(
                self.beep_command.clone(),
                self.alarm_command.clone(),
            ))
        } else {
            Arc::new(LogFeedback)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["scoreboard"]).unwrap();

        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.log_level(), "info");
        assert!(config.beep_command.is_none());
    }

    #[test]
    fn verbose_and_commands() {
        let config = Config::try_parse_from([
            "scoreboard",
            "-v",
            "--port",
            "8080",
            "--beep-command",
            "aplay beep.wav",
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.beep_command.as_deref(), Some("aplay beep.wav"));
    }

    #[test]
    fn quiet_conflicts_with_commands() {
        assert!(Config::try_parse_from(["scoreboard", "-q", "--alarm-command", "true"]).is_err());
    }
}

//! Main application state management

use std::{
    fmt,
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};

use super::GameStore;
use crate::{color::ColorPicker, feedback::Feedback};

/// The open color picker and the team it edits
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerSession {
    pub team_id: String,
    pub picker: ColorPicker,
    pub selected_color: String,
}

impl PickerSession {
    fn new(team_id: String, picker: ColorPicker) -> Self {
        let selected_color = picker.selected_color();
        Self {
            team_id,
            picker,
            selected_color,
        }
    }
}

/// Why a picker operation was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    NoGame,
    UnknownTeam(String),
    AlreadyOpen(String),
    NotOpen,
    Lock(String),
}

impl fmt::Display for PickerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use PickerError::*;
        match self {
            NoGame => write!(f, "No game has been created"),
            UnknownTeam(id) => write!(f, "Unknown team '{}'", id),
            AlreadyOpen(id) => write!(f, "Color picker is already open for team '{}'", id),
            NotOpen => write!(f, "Color picker is not open"),
            Lock(e) => write!(f, "Failed to lock picker state: {}", e),
        }
    }
}

impl std::error::Error for PickerError {}

/// Application state shared by the HTTP handlers and the timer driver
pub struct AppState {
    /// The game and its mutations
    pub store: GameStore,
    /// Open color picker, if any; while open the timer does not tick
    picker: Mutex<Option<PickerSession>>,
    overlay_tx: watch::Sender<bool>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Mutex<Option<(String, DateTime<Utc>)>>,
}

impl AppState {
    /// Create an AppState with no game and no overlay
    pub fn new(port: u16, host: String, feedback: Arc<dyn Feedback>) -> Self {
        let (overlay_tx, _) = watch::channel(false);

        Self {
            store: GameStore::new(feedback),
            picker: Mutex::new(None),
            overlay_tx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
        }
    }

    /// Remember the latest client action for the status endpoint
    pub fn record_action(&self, action: &str) {
        match self.last_action.lock() {
            Ok(mut last) => *last = Some((action.to_string(), Utc::now())),
            Err(e) => warn!("Failed to record last action: {}", e),
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        self.last_action
            .lock()
            .ok()
            .and_then(|last| last.clone())
            .map_or((None, None), |(action, at)| (Some(action), Some(at)))
    }

    /// Whether a modal overlay is currently open
    pub fn overlay_open(&self) -> bool {
        *self.overlay_tx.borrow()
    }

    /// Subscribe to overlay open/close changes
    pub fn subscribe_overlay(&self) -> watch::Receiver<bool> {
        self.overlay_tx.subscribe()
    }

    fn set_overlay(&self, open: bool) {
        self.overlay_tx.send_if_modified(|current| {
            let changed = *current != open;
            *current = open;
            changed
        });
    }

    fn lock_picker(&self) -> Result<std::sync::MutexGuard<'_, Option<PickerSession>>, PickerError> {
        self.picker.lock().map_err(|e| PickerError::Lock(e.to_string()))
    }

    /// Current picker session, if one is open
    pub fn get_picker(&self) -> Result<Option<PickerSession>, PickerError> {
        Ok(self.lock_picker()?.clone())
    }

    /// Open the color picker for a team, seeded from its current color
    pub fn open_picker(&self, team_id: &str) -> Result<PickerSession, PickerError> {
        let game = self.store.snapshot().ok_or(PickerError::NoGame)?;
        let team = game
            .team(team_id)
            .ok_or_else(|| PickerError::UnknownTeam(team_id.to_string()))?;

        let mut picker = self.lock_picker()?;
        if let Some(open) = picker.as_ref() {
            return Err(PickerError::AlreadyOpen(open.team_id.clone()));
        }

        let session = PickerSession::new(team.id.clone(), ColorPicker::from_hex(&team.color));
        *picker = Some(session.clone());
        drop(picker);

        self.set_overlay(true);
        info!("Color picker opened for team {}", team_id);
        Ok(session)
    }

    fn edit_picker<F>(&self, edit: F) -> Result<PickerSession, PickerError>
    where
        F: FnOnce(&mut ColorPicker),
    {
        let mut picker = self.lock_picker()?;
        let session = picker.as_mut().ok_or(PickerError::NotOpen)?;

        edit(&mut session.picker);
        session.selected_color = session.picker.selected_color();
        Ok(session.clone())
    }

    /// Pointer moved on the hue bar
    pub fn drag_picker_hue(&self, y: f64) -> Result<PickerSession, PickerError> {
        self.edit_picker(|picker| picker.drag_hue(y))
    }

    /// Pointer moved inside the palette
    pub fn drag_picker_palette(&self, x: f64, y: f64) -> Result<PickerSession, PickerError> {
        self.edit_picker(|picker| picker.drag_palette(x, y))
    }

    /// Apply the selected color to the team and close the picker
    pub fn confirm_picker(&self) -> Result<PickerSession, PickerError> {
        let session = self.lock_picker()?.take().ok_or(PickerError::NotOpen)?;

        self.store.update_team_color(&session.team_id, &session.selected_color);
        self.set_overlay(false);
        info!(
            "Team {} color set to {}",
            session.team_id, session.selected_color
        );
        Ok(session)
    }

    /// Close the picker without changing any color
    pub fn close_picker(&self) -> Result<Option<PickerSession>, PickerError> {
        let session = self.lock_picker()?.take();
        self.set_overlay(false);

        if session.is_some() {
            info!("Color picker closed");
        }
        Ok(session)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .field("overlay_open", &self.overlay_open())
            .field("port", &self.port)
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::NoopFeedback;

    fn app() -> AppState {
        let state = AppState::new(0, "127.0.0.1".to_string(), Arc::new(NoopFeedback));
        state.store.create_game();
        state
    }

    #[test]
    fn picker_requires_a_game_and_team() {
        let state = AppState::new(0, "127.0.0.1".to_string(), Arc::new(NoopFeedback));
        assert_eq!(state.open_picker("1"), Err(PickerError::NoGame));

        state.store.create_game();
        assert_eq!(
            state.open_picker("7"),
            Err(PickerError::UnknownTeam("7".to_string()))
        );
        assert!(!state.overlay_open());
    }

    #[test]
    fn confirm_applies_color_and_closes_overlay() {
        let state = app();

        let session = state.open_picker("2").unwrap();
        assert_eq!(session.selected_color, "#ef4444");
        assert!(state.overlay_open());
        assert_eq!(
            state.open_picker("1"),
            Err(PickerError::AlreadyOpen("2".to_string()))
        );

        state.drag_picker_hue(50.0).unwrap();
        state.drag_picker_palette(150.0, 0.0).unwrap();
        let confirmed = state.confirm_picker().unwrap();

        assert_eq!(confirmed.selected_color, "#00ff00");
        assert!(!state.overlay_open());
        assert_eq!(state.store.snapshot().unwrap().teams[1].color, "#00ff00");
        assert_eq!(state.confirm_picker(), Err(PickerError::NotOpen));
    }

    #[test]
    fn close_leaves_color_untouched() {
        let state = app();

        state.open_picker("1").unwrap();
        state.drag_picker_palette(0.0, 150.0).unwrap();
        assert!(state.close_picker().unwrap().is_some());

        assert!(!state.overlay_open());
        assert_eq!(state.store.snapshot().unwrap().teams[0].color, "#3B82F6");
        assert_eq!(state.drag_picker_hue(1.0), Err(PickerError::NotOpen));
    }

    #[test]
    fn last_action_is_tracked() {
        let state = app();
        assert_eq!(state.get_last_action(), (None, None));

        state.record_action("next_quarter");
        let (action, at) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("next_quarter"));
        assert!(at.is_some());
    }
}

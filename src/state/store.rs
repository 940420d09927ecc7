//! Game state store: the single owner of the active game

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{
    game::Game,
    timer_state::TickOutcome,
};
use crate::feedback::{Feedback, HapticStyle, SoundCue};

/// Holds the active game and applies every mutation to it.
///
/// The game lives inside a `watch` channel, so subscribers see each change
/// and no-op operations never notify them. Feedback is dispatched after the
/// mutation has been applied and its failures are only logged.
pub struct GameStore {
    game_tx: watch::Sender<Option<Game>>,
    feedback: Arc<dyn Feedback>,
}

impl GameStore {
    /// Create an empty store; no game exists until [`GameStore::create_game`]
    pub fn new(feedback: Arc<dyn Feedback>) -> Self {
        let (game_tx, _) = watch::channel(None);
        Self { game_tx, feedback }
    }

    /// Subscribe to game changes
    pub fn subscribe(&self) -> watch::Receiver<Option<Game>> {
        self.game_tx.subscribe()
    }

    /// Clone of the current game, if one has been created
    pub fn snapshot(&self) -> Option<Game> {
        self.game_tx.borrow().clone()
    }

    /// Run `op` against the game. `None` when no game exists, otherwise
    /// whether `op` changed anything.
    fn apply<F>(&self, action: &str, op: F) -> Option<bool>
    where
        F: FnOnce(&mut Game) -> bool,
    {
        let mut outcome = None;
        self.game_tx.send_if_modified(|slot| {
            let changed = slot.as_mut().map(op);
            outcome = changed;
            changed.unwrap_or(false)
        });

        match outcome {
            Some(true) => debug!("{}: game updated", action),
            Some(false) => debug!("{}: nothing to change", action),
            None => debug!("{}: no active game", action),
        }
        outcome
    }

    /// Like [`GameStore::apply`], pulsing `style` whenever a game exists.
    /// Returns whether the game changed.
    fn apply_with_haptic<F>(&self, action: &str, op: F, style: HapticStyle) -> bool
    where
        F: FnOnce(&mut Game) -> bool,
    {
        let outcome = self.apply(action, op);
        if outcome.is_some() {
            self.haptic(style);
        }
        outcome == Some(true)
    }

    fn haptic(&self, style: HapticStyle) {
        if let Err(e) = self.feedback.haptic(style) {
            warn!("Haptic feedback failed: {}", e);
        }
    }

    fn play(&self, cue: SoundCue) {
        if let Err(e) = self.feedback.play(cue) {
            warn!("Sound feedback failed: {}", e);
        }
    }

    /// Replace the current game with a fresh one
    pub fn create_game(&self) -> Game {
        let game = Game::new();
        info!("Creating game {}", game.id);
        self.game_tx.send_replace(Some(game.clone()));
        self.haptic(HapticStyle::Medium);
        game
    }

    /// Add `delta` to a team's score, never going below zero
    pub fn update_score(&self, team_id: &str, delta: i32) -> bool {
        let changed = self.apply("update_score", |game| game.update_score(team_id, delta)) == Some(true);
        if changed {
            self.haptic(HapticStyle::Light);
        }
        changed
    }

    pub fn update_team_name(&self, team_id: &str, name: &str) -> bool {
        self.apply("update_team_name", |game| game.update_team_name(team_id, name)) == Some(true)
    }

    pub fn update_team_color(&self, team_id: &str, color: &str) -> bool {
        self.apply("update_team_color", |game| game.update_team_color(team_id, color)) == Some(true)
    }

    /// Zero both scores, return to quarter 1 and clear the quarter history
    pub fn reset_scores(&self) -> bool {
        let outcome = self.apply("reset_scores", Game::reset_scores);
        if outcome.is_some() {
            info!("Scores and quarter history reset");
            self.haptic(HapticStyle::Heavy);
        }
        outcome == Some(true)
    }

    /// Zero both scores of the current quarter
    pub fn reset_current_quarter(&self) -> bool {
        self.apply_with_haptic("reset_current_quarter", Game::reset_current_quarter, HapticStyle::Heavy)
    }

    pub fn save_current_quarter(&self) -> bool {
        self.apply("save_current_quarter", Game::save_current_quarter) == Some(true)
    }

    /// Move to the next quarter; false at quarter 9
    pub fn next_quarter(&self) -> bool {
        self.change_quarter("next_quarter", Game::next_quarter)
    }

    /// Move to the previous quarter; false at quarter 1
    pub fn previous_quarter(&self) -> bool {
        self.change_quarter("previous_quarter", Game::previous_quarter)
    }

    fn change_quarter(&self, action: &str, op: fn(&mut Game) -> bool) -> bool {
        let moved = self.apply(action, op) == Some(true);
        if moved {
            if let Some(game) = self.game_tx.borrow().as_ref() {
                info!("Now in {}", game.current_quarter);
            }
            self.haptic(HapticStyle::Medium);
        }
        moved
    }

    pub fn start_timer(&self) -> bool {
        self.apply_with_haptic("start_timer", Game::start_timer, HapticStyle::Light)
    }

    pub fn stop_timer(&self) -> bool {
        self.apply_with_haptic("stop_timer", Game::stop_timer, HapticStyle::Light)
    }

    /// Set the remaining time and stop the timer
    pub fn set_timer(&self, seconds: u32) -> bool {
        self.apply_with_haptic("set_timer", |game| game.set_timer(seconds), HapticStyle::Light)
    }

    /// Set the remaining time without touching the run state
    pub fn update_timer(&self, seconds: u32) -> bool {
        self.apply("update_timer", |game| game.update_timer(seconds)) == Some(true)
    }

    /// Back to 10 minutes, stopped
    pub fn reset_timer(&self) -> bool {
        self.apply_with_haptic("reset_timer", Game::reset_timer, HapticStyle::Medium)
    }

    /// One timer tick, with its countdown or alarm cue
    pub fn tick(&self) -> TickOutcome {
        let mut outcome = TickOutcome::Idle;
        self.game_tx.send_if_modified(|slot| {
            if let Some(game) = slot.as_mut() {
                outcome = game.tick();
            }
            outcome.changed()
        });

        match outcome {
            TickOutcome::Countdown { remaining } => {
                debug!("Countdown: {}s left", remaining);
                self.haptic(HapticStyle::Medium);
                self.play(SoundCue::CountdownBeep);
            }
            TickOutcome::Finished => {
                info!("Timer finished");
                self.haptic(HapticStyle::Heavy);
                self.play(SoundCue::FinalAlarm);
            }
            TickOutcome::Expired => debug!("Timer started at zero, stopping"),
            TickOutcome::Continue { remaining } => debug!("Tick: {}s left", remaining),
            TickOutcome::Idle => {}
        }
        outcome
    }
}

impl std::fmt::Debug for GameStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameStore")
            .field("game", &*self.game_tx.borrow())
            .finish_non_exhaustive()
    }
}

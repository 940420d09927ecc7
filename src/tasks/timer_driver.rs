//! Timer driver background task

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::watch,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::state::{AppState, Game};

/// Period between two ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

fn is_running(game: &Option<Game>) -> bool {
    game.as_ref().is_some_and(|g| g.is_timer_running)
}

/// Background task that ticks the game timer once a second.
///
/// Ticking only happens while the timer is running and no overlay is open.
/// Any change to either arms or disarms the interval; an overlay suspends
/// ticking and closing it resumes from the remaining seconds. The task ends
/// when `shutdown` changes or its sender is dropped.
pub async fn timer_driver_task(state: Arc<AppState>, mut shutdown: watch::Receiver<bool>) {
    info!("Starting timer driver task");

    let mut game_rx = state.store.subscribe();
    let mut overlay_rx = state.subscribe_overlay();

    loop {
        let running = is_running(&game_rx.borrow_and_update());
        let suspended = *overlay_rx.borrow_and_update();

        if running && !suspended {
            debug!("Timer running, arming tick interval");
            let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if state.store.tick().stops() {
                            break;
                        }
                    }

                    changed = game_rx.changed() => {
                        if changed.is_err() {
                            return;
                        }
                        if !is_running(&game_rx.borrow_and_update()) {
                            debug!("Timer stopped, disarming tick interval");
                            break;
                        }
                    }

                    changed = overlay_rx.changed() => {
                        if changed.is_err() {
                            return;
                        }
                        if *overlay_rx.borrow_and_update() {
                            debug!("Overlay opened, suspending timer");
                            break;
                        }
                    }

                    _ = shutdown.changed() => {
                        info!("Timer driver shutting down");
                        return;
                    }
                }
            }
        } else {
            tokio::select! {
                changed = game_rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
                changed = overlay_rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
                _ = shutdown.changed() => {
                    info!("Timer driver shutting down");
                    return;
                }
            }
        }
    }
}

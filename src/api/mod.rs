//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/game", get(get_game_handler).post(create_game_handler))
        // Teams
        .route("/teams/:team_id/score", post(score_handler))
        .route("/teams/:team_id/swipe", post(swipe_handler))
        .route("/teams/:team_id/name", put(name_handler))
        .route("/teams/:team_id/color", put(color_handler))
        // Scores and quarters
        .route("/scores/reset", post(reset_scores_handler))
        .route("/quarter/reset", post(reset_quarter_handler))
        .route("/quarter/save", post(save_quarter_handler))
        .route("/quarter/next", post(next_quarter_handler))
        .route("/quarter/previous", post(previous_quarter_handler))
        .route("/records", get(records_handler))
        // Timer
        .route("/timer", put(set_timer_handler))
        .route("/timer/start", post(start_timer_handler))
        .route("/timer/stop", post(stop_timer_handler))
        .route("/timer/reset", post(reset_timer_handler))
        .route("/timer/minutes", put(set_minutes_handler))
        .route("/timer/seconds", put(set_seconds_handler))
        // Color picker overlay
        .route("/picker", get(get_picker_handler))
        .route("/picker/:team_id/open", post(open_picker_handler))
        .route("/picker/hue", post(picker_hue_handler))
        .route("/picker/palette", post(picker_palette_handler))
        .route("/picker/confirm", post(confirm_picker_handler))
        .route("/picker/close", post(close_picker_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

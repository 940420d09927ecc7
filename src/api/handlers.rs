//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{debug, error, info, warn};

use crate::{
    gesture::{normalize_team_name, score_delta_for_drag},
    records::QuarterRecordsView,
    state::{clock, AppState, Game, GameStore, PickerError, PickerSession, TimerState},
};
use super::responses::{
    ApiResponse, ColorRequest, HealthResponse, HueRequest, MinutesRequest, NameRequest,
    PaletteRequest, PickerResponse, ScoreRequest, SecondsRequest, StatusResponse, SwipeRequest,
    TimerRequest,
};

type ApiResult = Result<Json<ApiResponse>, StatusCode>;

/// Run a store operation, reporting the change flag it returns
fn apply<F>(state: &AppState, action: &str, message: &str, op: F) -> Json<ApiResponse>
where
    F: FnOnce(&GameStore) -> bool,
{
    let changed = op(&state.store);
    let after = state.store.snapshot();
    state.record_action(action);

    if changed {
        info!("{}", message);
        Json(ApiResponse::updated(message.to_string(), after))
    } else {
        debug!("{}: nothing changed", action);
        Json(ApiResponse::unchanged(format!("{}: nothing to change", action), after))
    }
}

fn require_game(state: &AppState) -> Result<Game, StatusCode> {
    state.store.snapshot().ok_or_else(|| {
        warn!("Request rejected: no game has been created");
        StatusCode::CONFLICT
    })
}

fn require_team(state: &AppState, team_id: &str) -> Result<Game, StatusCode> {
    let game = require_game(state)?;
    if game.team(team_id).is_none() {
        warn!("Request rejected: unknown team '{}'", team_id);
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(game)
}

fn picker_status(e: &PickerError) -> StatusCode {
    match e {
        PickerError::NoGame | PickerError::AlreadyOpen(_) | PickerError::NotOpen => {
            warn!("Picker request rejected: {}", e);
            StatusCode::CONFLICT
        }
        PickerError::UnknownTeam(_) => {
            warn!("Picker request rejected: {}", e);
            StatusCode::NOT_FOUND
        }
        PickerError::Lock(_) => {
            error!("{}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn picker_response(
    state: &AppState,
    action: &str,
    message: String,
    picker: Option<PickerSession>,
) -> Json<PickerResponse> {
    state.record_action(action);
    info!("{}", message);
    Json(PickerResponse {
        status: if picker.is_some() { "open" } else { "closed" }.to_string(),
        message,
        picker,
        game: state.store.snapshot(),
    })
}

/// Handle GET /game - Return the current game (null before creation)
pub async fn get_game_handler(State(state): State<Arc<AppState>>) -> Json<Option<Game>> {
    Json(state.store.snapshot())
}

/// Handle POST /game - Replace the current game with a fresh one
pub async fn create_game_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let game = state.store.create_game();
    state.record_action("create_game");
    Json(ApiResponse::updated(format!("Game {} created", game.id), Some(game)))
}

/// Handle POST /teams/:team_id/score - Add a delta to a team's score
pub async fn score_handler(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<String>,
    Json(request): Json<ScoreRequest>,
) -> ApiResult {
    require_team(&state, &team_id)?;
    Ok(apply(&state, "update_score", &format!("Team {} score changed by {}", team_id, request.delta), |store| {
        store.update_score(&team_id, request.delta)
    }))
}

/// Handle POST /teams/:team_id/swipe - Translate a vertical drag into a score change
pub async fn swipe_handler(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<String>,
    Json(request): Json<SwipeRequest>,
) -> ApiResult {
    require_team(&state, &team_id)?;

    let Some(delta) = score_delta_for_drag(request.dy) else {
        debug!("Drag of {} ignored", request.dy);
        return Ok(Json(ApiResponse::unchanged(
            "Drag too short to change the score".to_string(),
            state.store.snapshot(),
        )));
    };

    Ok(apply(&state, "update_score", &format!("Team {} score changed by {}", team_id, delta), |store| {
        store.update_score(&team_id, delta)
    }))
}

/// Handle PUT /teams/:team_id/name - Rename a team
pub async fn name_handler(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<String>,
    Json(request): Json<NameRequest>,
) -> ApiResult {
    require_team(&state, &team_id)?;
    let name = normalize_team_name(&request.name).ok_or_else(|| {
        warn!("Rejected empty name for team {}", team_id);
        StatusCode::BAD_REQUEST
    })?;

    Ok(apply(&state, "update_team_name", &format!("Team {} renamed to {}", team_id, name), |store| {
        store.update_team_name(&team_id, &name)
    }))
}

/// Handle PUT /teams/:team_id/color - Set a team's color directly
pub async fn color_handler(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<String>,
    Json(request): Json<ColorRequest>,
) -> ApiResult {
    require_team(&state, &team_id)?;
    Ok(apply(&state, "update_team_color", &format!("Team {} color set to {}", team_id, request.color), |store| {
        store.update_team_color(&team_id, &request.color)
    }))
}

/// Handle POST /scores/reset - Zero scores and clear the quarter history
pub async fn reset_scores_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    apply(&state, "reset_scores", "Scores and quarter history reset", GameStore::reset_scores)
}

/// Handle POST /quarter/reset - Zero the current quarter's scores
pub async fn reset_quarter_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    apply(&state, "reset_current_quarter", "Current quarter scores reset", GameStore::reset_current_quarter)
}

/// Handle POST /quarter/save - Save the current quarter's record
pub async fn save_quarter_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    apply(&state, "save_current_quarter", "Current quarter saved", GameStore::save_current_quarter)
}

/// Handle POST /quarter/next - Move to the next quarter
pub async fn next_quarter_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    apply(&state, "next_quarter", "Moved to the next quarter", GameStore::next_quarter)
}

/// Handle POST /quarter/previous - Move to the previous quarter
pub async fn previous_quarter_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    apply(&state, "previous_quarter", "Moved to the previous quarter", GameStore::previous_quarter)
}

/// Handle POST /timer/start - Start the countdown
pub async fn start_timer_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    apply(&state, "start_timer", "Timer started", GameStore::start_timer)
}

/// Handle POST /timer/stop - Pause the countdown
pub async fn stop_timer_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    apply(&state, "stop_timer", "Timer stopped", GameStore::stop_timer)
}

/// Handle POST /timer/reset - Back to 10 minutes, stopped
pub async fn reset_timer_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    apply(&state, "reset_timer", "Timer reset", GameStore::reset_timer)
}

/// Handle PUT /timer - Set the remaining seconds and stop the timer
pub async fn set_timer_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TimerRequest>,
) -> Json<ApiResponse> {
    apply(&state, "set_timer", &format!("Timer set to {}", clock::format(request.seconds)), |store| {
        store.set_timer(request.seconds)
    })
}

/// Clock edits are refused while the timer runs
fn stopped_timer_seconds(state: &AppState) -> Result<u32, StatusCode> {
    let game = require_game(state)?;
    if game.is_timer_running {
        warn!("Clock edit rejected: stop the timer before adjusting time");
        return Err(StatusCode::CONFLICT);
    }
    Ok(game.timer_seconds)
}

/// Handle PUT /timer/minutes - Replace the minutes part of the timer
pub async fn set_minutes_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MinutesRequest>,
) -> ApiResult {
    let seconds = clock::with_minutes(stopped_timer_seconds(&state)?, request.minutes);
    Ok(apply(&state, "set_timer", &format!("Timer set to {}", clock::format(seconds)), |store| {
        store.set_timer(seconds)
    }))
}

/// Handle PUT /timer/seconds - Replace the seconds part of the timer
pub async fn set_seconds_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SecondsRequest>,
) -> ApiResult {
    let seconds = clock::with_seconds(stopped_timer_seconds(&state)?, request.seconds);
    Ok(apply(&state, "set_timer", &format!("Timer set to {}", clock::format(seconds)), |store| {
        store.set_timer(seconds)
    }))
}

/// Handle GET /records - Quarter records table, totals and wins
pub async fn records_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<QuarterRecordsView>, StatusCode> {
    let game = require_game(&state)?;
    Ok(Json(QuarterRecordsView::from_game(&game)))
}

/// Handle GET /picker - Current picker session, if open
pub async fn get_picker_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Option<PickerSession>>, StatusCode> {
    state
        .get_picker()
        .map(Json)
        .map_err(|e| picker_status(&e))
}

/// Handle POST /picker/:team_id/open - Open the color picker, suspending the timer
pub async fn open_picker_handler(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<String>,
) -> Result<Json<PickerResponse>, StatusCode> {
    let session = state.open_picker(&team_id).map_err(|e| picker_status(&e))?;
    Ok(picker_response(
        &state,
        "open_picker",
        format!("Color picker opened for team {}", team_id),
        Some(session),
    ))
}

/// Handle POST /picker/hue - Pointer moved on the hue bar
pub async fn picker_hue_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<HueRequest>,
) -> Result<Json<PickerResponse>, StatusCode> {
    let session = state.drag_picker_hue(request.y).map_err(|e| picker_status(&e))?;
    Ok(picker_response(
        &state,
        "picker_hue",
        format!("Picker color is {}", session.selected_color),
        Some(session),
    ))
}

/// Handle POST /picker/palette - Pointer moved in the saturation/value palette
pub async fn picker_palette_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PaletteRequest>,
) -> Result<Json<PickerResponse>, StatusCode> {
    let session = state
        .drag_picker_palette(request.x, request.y)
        .map_err(|e| picker_status(&e))?;
    Ok(picker_response(
        &state,
        "picker_palette",
        format!("Picker color is {}", session.selected_color),
        Some(session),
    ))
}

/// Handle POST /picker/confirm - Apply the selected color and close the picker
pub async fn confirm_picker_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PickerResponse>, StatusCode> {
    let session = state.confirm_picker().map_err(|e| picker_status(&e))?;
    Ok(picker_response(
        &state,
        "confirm_picker",
        format!("Team {} color set to {}", session.team_id, session.selected_color),
        None,
    ))
}

/// Handle POST /picker/close - Close the picker without changing colors
pub async fn close_picker_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PickerResponse>, StatusCode> {
    state.close_picker().map_err(|e| picker_status(&e))?;
    Ok(picker_response(&state, "close_picker", "Color picker closed".to_string(), None))
}

/// Handle GET /status - Return current game, timer and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let game = state.store.snapshot();
    let timer = game.as_ref().map(TimerState::from_game);
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        game,
        timer,
        overlay_open: state.overlay_open(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

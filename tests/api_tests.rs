use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use scoreboard::{create_router, feedback::NoopFeedback, state::AppState};
use tower::ServiceExt;

fn app_state(with_game: bool) -> Arc<AppState> {
    let state = Arc::new(AppState::new(0, "127.0.0.1".to_string(), Arc::new(NoopFeedback)));
    if with_game {
        state.store.create_game();
    }
    state
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(match body {
            Some(body) => Body::from(body.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let app = create_router(app_state(false));
    let (status, body) = call(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_game_is_null_before_creation() {
    let app = create_router(app_state(false));

    let (status, body) = call(&app, Method::GET, "/game", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());

    let (status, _) = call(&app, Method::POST, "/teams/1/score", Some(json!({"delta": 1}))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call(&app, Method::POST, "/game", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["game"]["timerSeconds"], 600);
    assert_eq!(body["game"]["currentQuarter"], 1);
    assert_eq!(body["game"]["teams"][1]["name"], "Player2");
}

#[tokio::test]
async fn test_score_and_quarter_flow() {
    let app = create_router(app_state(true));

    for _ in 0..3 {
        call(&app, Method::POST, "/teams/1/score", Some(json!({"delta": 1}))).await;
    }
    let (_, body) = call(&app, Method::POST, "/quarter/next", None).await;
    assert_eq!(body["status"], "updated");
    assert_eq!(body["game"]["currentQuarter"], 2);
    assert_eq!(body["game"]["teams"][0]["score"], 0);
    assert_eq!(body["game"]["quarterRecords"][0]["teamScores"]["1"], 3);

    let (_, body) = call(&app, Method::POST, "/quarter/previous", None).await;
    assert_eq!(body["game"]["teams"][0]["score"], 3);

    let (_, body) = call(&app, Method::POST, "/quarter/previous", None).await;
    assert_eq!(body["status"], "unchanged");
}

#[tokio::test]
async fn test_status_follows_store_outcome() {
    let app = create_router(app_state(true));
    call(&app, Method::POST, "/timer/start", None).await;

    let (_, body) = call(&app, Method::POST, "/quarter/previous", None).await;
    assert_eq!(body["status"], "unchanged");

    call(&app, Method::POST, "/teams/2/score", Some(json!({"delta": 1}))).await;
    let (_, body) = call(&app, Method::POST, "/quarter/save", None).await;
    assert_eq!(body["status"], "updated");
    let (_, body) = call(&app, Method::POST, "/quarter/save", None).await;
    assert_eq!(body["status"], "unchanged");

    let (_, body) = call(&app, Method::PUT, "/teams/1/name", Some(json!({"name": "Player1"}))).await;
    assert_eq!(body["status"], "unchanged");
}

#[tokio::test]
async fn test_records_current_row_is_live_after_save() {
    let app = create_router(app_state(true));

    call(&app, Method::POST, "/teams/1/score", Some(json!({"delta": 2}))).await;
    call(&app, Method::POST, "/quarter/save", None).await;
    call(&app, Method::POST, "/teams/1/score", Some(json!({"delta": 5}))).await;

    let (_, body) = call(&app, Method::GET, "/records", None).await;
    assert_eq!(body["quarters"][0]["cells"][0]["score"], 7);
    assert_eq!(body["teams"][0]["total"], 2);
}

#[tokio::test]
async fn test_unknown_team_is_not_found() {
    let app = create_router(app_state(true));

    let (status, _) = call(&app, Method::POST, "/teams/3/score", Some(json!({"delta": 1}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, Method::POST, "/picker/3/open", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_swipe_gestures() {
    let app = create_router(app_state(true));

    call(&app, Method::POST, "/teams/2/swipe", Some(json!({"dy": -40.0}))).await;
    call(&app, Method::POST, "/teams/2/swipe", Some(json!({"dy": 2.0}))).await;
    let (_, body) = call(&app, Method::POST, "/teams/2/swipe", Some(json!({"dy": 20.0}))).await;
    assert_eq!(body["status"], "unchanged");
    assert_eq!(body["game"]["teams"][1]["score"], 2);

    let (_, body) = call(&app, Method::POST, "/teams/2/swipe", Some(json!({"dy": 60.0}))).await;
    assert_eq!(body["game"]["teams"][1]["score"], 1);
}

#[tokio::test]
async fn test_rename_trims_and_rejects_empty() {
    let app = create_router(app_state(true));

    let (status, body) = call(&app, Method::PUT, "/teams/1/name", Some(json!({"name": "  Hawks "}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["game"]["teams"][0]["name"], "Hawks");

    let (status, _) = call(&app, Method::PUT, "/teams/1/name", Some(json!({"name": "   "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_clock_edits_refused_while_running() {
    let app = create_router(app_state(true));

    let (_, body) = call(&app, Method::PUT, "/timer/minutes", Some(json!({"minutes": 3}))).await;
    assert_eq!(body["game"]["timerSeconds"], 180);
    let (_, body) = call(&app, Method::PUT, "/timer/seconds", Some(json!({"seconds": 75}))).await;
    assert_eq!(body["game"]["timerSeconds"], 239);

    call(&app, Method::POST, "/timer/start", None).await;
    let (status, _) = call(&app, Method::PUT, "/timer/minutes", Some(json!({"minutes": 1}))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = call(&app, Method::PUT, "/timer", Some(json!({"seconds": 90}))).await;
    assert_eq!(body["game"]["timerSeconds"], 90);
    assert_eq!(body["game"]["isTimerRunning"], false);

    let (_, body) = call(&app, Method::GET, "/status", None).await;
    assert_eq!(body["timer"]["display"], "01:30");
    assert_eq!(body["timer"]["phase"], "stopped");
    assert_eq!(body["last_action"], "set_timer");
}

#[tokio::test]
async fn test_records_view() {
    let app = create_router(app_state(true));

    call(&app, Method::POST, "/teams/1/score", Some(json!({"delta": 2}))).await;
    call(&app, Method::POST, "/quarter/next", None).await;
    call(&app, Method::POST, "/teams/2/score", Some(json!({"delta": 5}))).await;

    let (status, body) = call(&app, Method::GET, "/records", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentQuarter"], 2);
    assert_eq!(body["teams"][0]["total"], 2);
    assert_eq!(body["teams"][1]["total"], 5);
    assert_eq!(body["teams"][0]["quarterWins"], 1);
    assert_eq!(body["teams"][1]["quarterWins"], 1);
    assert_eq!(body["quarters"].as_array().unwrap().len(), 9);
    assert_eq!(body["quarters"][1]["isCurrent"], true);
}

#[tokio::test]
async fn test_picker_flow() {
    let state = app_state(true);
    let app = create_router(Arc::clone(&state));

    let (status, body) = call(&app, Method::POST, "/picker/1/open", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["picker"]["selectedColor"], "#3b82f6");
    assert!(state.overlay_open());

    let (status, _) = call(&app, Method::POST, "/picker/2/open", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    call(&app, Method::POST, "/picker/hue", Some(json!({"y": 0.0}))).await;
    let (_, body) = call(&app, Method::POST, "/picker/palette", Some(json!({"x": 500.0, "y": -10.0}))).await;
    assert_eq!(body["picker"]["selectedColor"], "#ff0000");

    let (_, body) = call(&app, Method::POST, "/picker/confirm", None).await;
    assert_eq!(body["status"], "closed");
    assert_eq!(body["game"]["teams"][0]["color"], "#ff0000");
    assert!(!state.overlay_open());

    let (status, _) = call(&app, Method::POST, "/picker/confirm", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = call(&app, Method::GET, "/picker", None).await;
    assert!(body.is_null());
}

#[tokio::test]
async fn test_reset_scores_clears_history() {
    let app = create_router(app_state(true));

    call(&app, Method::POST, "/teams/1/score", Some(json!({"delta": 1}))).await;
    call(&app, Method::POST, "/quarter/next", None).await;
    let (_, body) = call(&app, Method::POST, "/scores/reset", None).await;

    assert_eq!(body["game"]["currentQuarter"], 1);
    assert_eq!(body["game"]["quarterRecords"], json!([]));
}

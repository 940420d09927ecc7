//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{Game, PickerSession, TimerState};

/// API response structure for state change endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub game: Option<Game>,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, game: Option<Game>) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            game,
        }
    }

    /// The operation changed the game
    pub fn updated(message: String, game: Option<Game>) -> Self {
        Self::new("updated".to_string(), message, game)
    }

    /// The operation was valid but had nothing to change
    pub fn unchanged(message: String, game: Option<Game>) -> Self {
        Self::new("unchanged".to_string(), message, game)
    }
}

/// Response for color picker endpoints
#[derive(Debug, Clone, Serialize)]
pub struct PickerResponse {
    pub status: String,
    pub message: String,
    pub picker: Option<PickerSession>,
    pub game: Option<Game>,
}

/// Status response with timer and overlay information
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub game: Option<Game>,
    pub timer: Option<TimerState>,
    pub overlay_open: bool,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreRequest {
    pub delta: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwipeRequest {
    pub dy: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NameRequest {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColorRequest {
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimerRequest {
    pub seconds: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MinutesRequest {
    pub minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecondsRequest {
    pub seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HueRequest {
    pub y: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaletteRequest {
    pub x: f64,
    pub y: f64,
}

//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{services::Notification, state::TimerState};

/// Body of POST /countdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartCountdownRequest {
    /// Epoch milliseconds the countdown is measured from; defaults to now
    pub reference_started_time_ms: Option<i64>,
    /// Signed so that negative values can be rejected explicitly
    pub duration_seconds: i64,
}

/// Body of PUT /time-sync: either an offset or a server timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeSyncRequest {
    Offset { offset_ms: i64 },
    ServerTime { server_time_ms: i64 },
}

/// API response structure for countdown control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerState,
    pub remaining_label: Option<String>,
}

impl CountdownResponse {
    /// Create a new countdown response
    pub fn new(status: String, message: String, timer: TimerState) -> Self {
        let remaining_label = timer.remaining_seconds().map(crate::utils::remaining_time_label);
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
            remaining_label,
        }
    }

    /// Create a running response
    pub fn running(message: String, timer: TimerState) -> Self {
        Self::new("running".to_string(), message, timer)
    }

    /// Create an ended response
    pub fn ended(message: String, timer: TimerState) -> Self {
        Self::new("ended".to_string(), message, timer)
    }

    /// Create an idle response
    pub fn idle(message: String, timer: TimerState) -> Self {
        Self::new("idle".to_string(), message, timer)
    }
}

/// Clock offset response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSyncResponse {
    pub offset_ms: i64,
    pub timestamp: DateTime<Utc>,
}

impl TimeSyncResponse {
    pub fn new(offset_ms: i64) -> Self {
        Self {
            offset_ms,
            timestamp: Utc::now(),
        }
    }
}

/// Status response with timer information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerState,
    pub remaining_label: Option<String>,
    pub clock_offset_ms: i64,
    pub alert_thresholds_minutes: Vec<u32>,
    pub notifications: Vec<Notification>,
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

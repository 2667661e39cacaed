//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{info, warn};

use crate::{
    state::{AppState, Phase},
    utils::remaining_time_label,
};
use super::responses::{
    CountdownResponse, HealthResponse, StartCountdownRequest, StatusResponse, TimeSyncRequest,
    TimeSyncResponse,
};

/// Handle POST /countdown - Start or restart the countdown
pub async fn start_countdown_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartCountdownRequest>,
) -> Result<Json<CountdownResponse>, StatusCode> {
    let duration_seconds = match u64::try_from(request.duration_seconds) {
        Ok(d) => d,
        Err(_) => {
            warn!("Rejecting countdown with negative duration: {}s", request.duration_seconds);
            return Err(StatusCode::BAD_REQUEST);
        }
    };
    let reference_started_time_ms = request
        .reference_started_time_ms
        .unwrap_or_else(|| state.now_ms());

    let timer = state.start_countdown(reference_started_time_ms, duration_seconds);
    info!("Countdown endpoint called - countdown is {:?}", timer.phase);

    let response = match timer.phase {
        Phase::Running => CountdownResponse::running("Countdown started".to_string(), timer),
        Phase::Ended => CountdownResponse::ended("Countdown has no time left".to_string(), timer),
        Phase::Idle => CountdownResponse::idle("Countdown not started".to_string(), timer),
    };
    Ok(Json(response))
}

/// Handle POST /countdown/stop - Stop the countdown
pub async fn stop_countdown_handler(State(state): State<Arc<AppState>>) -> Json<CountdownResponse> {
    let timer = state.stop_countdown();
    info!("Stop endpoint called - countdown stopped");
    Json(CountdownResponse::idle("Countdown stopped".to_string(), timer))
}

/// Handle PUT /time-sync - Update the clock offset
pub async fn set_time_sync_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TimeSyncRequest>,
) -> Json<TimeSyncResponse> {
    let offset_ms = match request {
        TimeSyncRequest::Offset { offset_ms } => state.set_clock_offset(offset_ms),
        TimeSyncRequest::ServerTime { server_time_ms } => state.sync_with_server_time(server_time_ms),
    };
    Json(TimeSyncResponse::new(offset_ms))
}

/// Handle GET /time-sync - Return the clock offset
pub async fn get_time_sync_handler(State(state): State<Arc<AppState>>) -> Json<TimeSyncResponse> {
    Json(TimeSyncResponse::new(state.time_sync.offset()))
}

/// Handle GET /status - Return current countdown status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let timer = state.get_timer_state();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        remaining_label: timer.remaining_seconds().map(remaining_time_label),
        timer,
        clock_offset_ms: state.time_sync.offset(),
        alert_thresholds_minutes: state.alert_thresholds_minutes.iter().copied().collect(),
        notifications: state.notifications.recent(),
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

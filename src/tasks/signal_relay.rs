//! Countdown signal relay background task

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{
    countdown::CountdownSignal,
    services::{alert_message, ending_message, NotificationKind},
    state::AppState,
    utils::remaining_time_label,
};

/// Background task that routes countdown signals to the display log and the
/// notification channel. Returns once the engine is gone.
pub async fn signal_relay_task(
    state: Arc<AppState>,
    mut signals: mpsc::UnboundedReceiver<CountdownSignal>,
) {
    info!("Starting countdown signal relay task");

    while let Some(signal) = signals.recv().await {
        match signal {
            CountdownSignal::Tick { remaining_seconds } => {
                debug!("{}", remaining_time_label(remaining_seconds));
            }
            CountdownSignal::Alert { threshold_minutes } => {
                if let Err(e) = state.notify(NotificationKind::Alert, alert_message(threshold_minutes)) {
                    error!("Failed to deliver alert notification: {}", e);
                }
            }
            CountdownSignal::Ended => {
                if let Err(e) = state.notify(NotificationKind::Ended, ending_message()) {
                    error!("Failed to deliver ending notification: {}", e);
                }
            }
        }
    }

    info!("Countdown signal channel closed, relay task exiting");
}

//! Main application state management

use std::{
    collections::BTreeSet,
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::info;

use super::TimerState;
use crate::{
    clock::{Clock, SystemClock},
    countdown::{CountdownEngine, CountdownSignal, TimerConfig},
    services::{Notification, NotificationKind, NotificationLog, TimeSync},
};

/// Main application state that owns the countdown engine and its inputs
pub struct AppState {
    /// The countdown being hosted
    pub engine: CountdownEngine,
    /// Clock offset source fed to the engine
    pub time_sync: TimeSync,
    /// Alert thresholds applied to every countdown started here
    pub alert_thresholds_minutes: BTreeSet<u32>,
    /// Where alerts and the end of time are delivered
    pub notifications: NotificationLog,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create a new AppState on the system clock, along with the receiver of
    /// the engine's signals
    pub fn new(
        port: u16,
        host: String,
        alert_thresholds_minutes: BTreeSet<u32>,
    ) -> (Self, mpsc::UnboundedReceiver<CountdownSignal>) {
        Self::with_clock(port, host, alert_thresholds_minutes, Arc::new(SystemClock))
    }

    /// Create a new AppState reading time from `clock`
    pub fn with_clock(
        port: u16,
        host: String,
        alert_thresholds_minutes: BTreeSet<u32>,
        clock: Arc<dyn Clock>,
    ) -> (Self, mpsc::UnboundedReceiver<CountdownSignal>) {
        let (engine, signals) = CountdownEngine::new(Arc::clone(&clock));

        let state = Self {
            engine,
            time_sync: TimeSync::new(Arc::clone(&clock)),
            alert_thresholds_minutes,
            notifications: NotificationLog::new(),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            clock,
        };
        (state, signals)
    }

    /// Current local wall-clock time in epoch milliseconds
    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Start (or restart) the countdown with the configured alert thresholds
    pub fn start_countdown(&self, reference_started_time_ms: i64, duration_seconds: u64) -> TimerState {
        info!("Starting countdown of {}s", duration_seconds);
        let config = TimerConfig::new(reference_started_time_ms, duration_seconds)
            .with_alert_thresholds(self.alert_thresholds_minutes.iter().copied());

        let timer_state = self.engine.activate(config, self.time_sync.handle());
        self.record_action("countdown-start");
        timer_state
    }

    /// Stop the countdown
    pub fn stop_countdown(&self) -> TimerState {
        info!("Stopping countdown");
        let timer_state = self.engine.deactivate();
        self.record_action("countdown-stop");
        timer_state
    }

    /// Publish a new clock offset; a running countdown resyncs on it
    pub fn set_clock_offset(&self, offset_ms: i64) -> i64 {
        let offset_ms = self.time_sync.set_offset(offset_ms);
        self.record_action("time-sync");
        offset_ms
    }

    /// Derive the clock offset from a server timestamp
    pub fn sync_with_server_time(&self, server_time_ms: i64) -> i64 {
        let offset_ms = self.time_sync.record_server_time(server_time_ms);
        self.record_action("time-sync");
        offset_ms
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> TimerState {
        self.engine.state()
    }

    /// Deliver a user-facing notification
    pub fn notify(&self, kind: NotificationKind, message: String) -> Result<Notification, String> {
        self.notifications.notify(kind, message)
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

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }
}

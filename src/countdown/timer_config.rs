//! Countdown configuration supplied by the host

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::schedule::end_time_ms;

/// Inputs of one countdown activation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Epoch milliseconds the countdown is measured from
    pub reference_started_time_ms: i64,
    pub duration_seconds: u64,
    /// Remaining-time values, in minutes, that trigger a one-time alert
    pub alert_thresholds_minutes: BTreeSet<u32>,
}

impl TimerConfig {
    pub fn new(reference_started_time_ms: i64, duration_seconds: u64) -> Self {
        Self {
            reference_started_time_ms,
            duration_seconds,
            alert_thresholds_minutes: BTreeSet::new(),
        }
    }

    /// Set alert thresholds; zero entries are dropped
    pub fn with_alert_thresholds<I>(mut self, minutes: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        self.alert_thresholds_minutes = minutes.into_iter().filter(|m| *m > 0).collect();
        self
    }

    pub fn end_time_ms(&self) -> i64 {
        end_time_ms(self.reference_started_time_ms, self.duration_seconds)
    }

    /// Whether `other` describes the same countdown schedule
    pub fn same_schedule(&self, other: &TimerConfig) -> bool {
        self.reference_started_time_ms == other.reference_started_time_ms
            && self.duration_seconds == other.duration_seconds
    }
}

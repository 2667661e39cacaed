//! Countdown state snapshot published by the engine

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Ended,
}

/// Timer state for tracking the countdown
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: Phase,
    /// `None` until the countdown has been computed at least once
    pub remaining_seconds: Option<i64>,
    pub reference_started_time_ms: Option<i64>,
    pub duration_seconds: Option<u64>,
}

impl TimerState {
    /// Create a new idle timer state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the countdown is ticking
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Check if the countdown ran out
    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// Get remaining seconds if the countdown is running
    pub fn remaining_seconds(&self) -> Option<i64> {
        if self.is_running() {
            self.remaining_seconds
        } else {
            None
        }
    }
}

//! Signals emitted by the countdown engine to its host

use serde::{Deserialize, Serialize};

/// One observable countdown event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CountdownSignal {
    /// Remaining time changed; always greater than zero
    Tick { remaining_seconds: i64 },
    /// Remaining time reached a configured threshold
    Alert { threshold_minutes: u32 },
    /// The countdown ran out
    Ended,
}

impl CountdownSignal {
    pub fn is_ended(&self) -> bool {
        matches!(self, CountdownSignal::Ended)
    }
}

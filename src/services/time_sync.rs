//! Clock offset estimation against a reference (server) clock

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::clock::{Clock, ClockOffset, SystemClock};

/// Holds the current estimate of `server_time - local_time` in milliseconds
/// and hands out live [`ClockOffset`] handles to it
pub struct TimeSync {
    clock: Arc<dyn Clock>,
    offset_tx: watch::Sender<i64>,
}

impl TimeSync {
    /// Create a time sync service with no correction
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let (offset_tx, _) = watch::channel(0);
        Self { clock, offset_tx }
    }

    /// Create a time sync service on the system clock
    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    /// Current offset estimate
    pub fn offset(&self) -> i64 {
        *self.offset_tx.borrow()
    }

    /// Live handle for the countdown engine
    pub fn handle(&self) -> ClockOffset {
        ClockOffset::from(self.offset_tx.subscribe())
    }

    /// Publish a new offset. Unchanged values do not wake subscribers.
    pub fn set_offset(&self, offset_ms: i64) -> i64 {
        let changed = self.offset_tx.send_if_modified(|current| {
            if *current == offset_ms {
                false
            } else {
                *current = offset_ms;
                true
            }
        });

        if changed {
            info!("Clock offset set to {}ms", offset_ms);
        } else {
            debug!("Clock offset unchanged at {}ms", offset_ms);
        }
        offset_ms
    }

    /// Derive the offset from a server timestamp received just now
    pub fn record_server_time(&self, server_time_ms: i64) -> i64 {
        let offset_ms = server_time_ms.saturating_sub(self.clock.now_ms());
        self.set_offset(offset_ms)
    }

    /// Derive the offset from a request/response round trip, assuming the
    /// server stamped its time halfway through
    pub fn record_round_trip(&self, server_time_ms: i64, sent_ms: i64, received_ms: i64) -> i64 {
        let midpoint_ms = sent_ms
            .saturating_add(received_ms.saturating_sub(sent_ms) / 2);
        debug!(
            "Round trip of {}ms, local midpoint {}ms",
            received_ms.saturating_sub(sent_ms),
            midpoint_ms
        );
        self.set_offset(server_time_ms.saturating_sub(midpoint_ms))
    }
}

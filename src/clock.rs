//! Wall clock and clock-offset capabilities used by the countdown engine

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use tokio::sync::watch;

/// Source of the local wall-clock time in epoch milliseconds
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// The system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicI64,
}

impl ManualClock {
    pub fn new(now_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(now_ms),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

/// Live correction (in milliseconds) added to the local clock to approximate
/// server time.
///
/// Without a source the offset is 0. If the source goes away, the last value
/// it published keeps being used.
#[derive(Debug, Clone, Default)]
pub struct ClockOffset {
    source: Option<watch::Receiver<i64>>,
    last_ms: i64,
}

impl ClockOffset {
    /// No correction
    pub fn none() -> Self {
        Self::default()
    }

    /// A constant correction that never changes
    pub fn fixed(offset_ms: i64) -> Self {
        Self {
            source: None,
            last_ms: offset_ms,
        }
    }

    /// Current offset, marking it as seen
    pub fn current(&mut self) -> i64 {
        if let Some(rx) = self.source.as_mut() {
            self.last_ms = *rx.borrow_and_update();
        }
        self.last_ms
    }

    /// Wait for the next offset update.
    ///
    /// Returns `None` once when the source is dropped; after that (or when
    /// there never was a source) the future never resolves.
    pub async fn changed(&mut self) -> Option<i64> {
        let Some(rx) = self.source.as_mut() else {
            return std::future::pending().await;
        };

        if rx.changed().await.is_err() {
            self.last_ms = *rx.borrow();
            self.source = None;
            return None;
        }

        self.last_ms = *rx.borrow_and_update();
        Some(self.last_ms)
    }
}

impl From<watch::Receiver<i64>> for ClockOffset {
    fn from(rx: watch::Receiver<i64>) -> Self {
        let last_ms = *rx.borrow();
        Self {
            source: Some(rx),
            last_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_moves_only_when_told() {
        let clock = ManualClock::new(1_000);
        assert_eq!(clock.now_ms(), 1_000);

        clock.advance(250);
        assert_eq!(clock.now_ms(), 1_250);

        clock.set(-5);
        assert_eq!(clock.now_ms(), -5);
    }

    #[test]
    fn missing_offset_defaults_to_zero() {
        let mut offset = ClockOffset::none();
        assert_eq!(offset.current(), 0);
    }

    #[tokio::test]
    async fn offset_follows_its_source() {
        let (tx, rx) = watch::channel(0i64);
        let mut offset = ClockOffset::from(rx);
        assert_eq!(offset.current(), 0);

        tx.send(1_500).unwrap();
        assert_eq!(offset.changed().await, Some(1_500));
        assert_eq!(offset.current(), 1_500);
    }

    #[tokio::test]
    async fn dropped_source_keeps_last_value() {
        let (tx, rx) = watch::channel(-300i64);
        let mut offset = ClockOffset::from(rx);
        drop(tx);

        assert_eq!(offset.changed().await, None);
        assert_eq!(offset.current(), -300);

        let still_waiting = tokio::time::timeout(
            std::time::Duration::from_millis(10),
            offset.changed(),
        )
        .await;
        assert!(still_waiting.is_err());
    }

    #[tokio::test]
    async fn fixed_offset_never_changes() {
        let mut offset = ClockOffset::fixed(42);
        assert_eq!(offset.current(), 42);

        let changed = tokio::time::timeout(
            std::time::Duration::from_millis(10),
            offset.changed(),
        )
        .await;
        assert!(changed.is_err());
        assert_eq!(offset.current(), 42);
    }
}

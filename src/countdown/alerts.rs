//! One-shot alert threshold tracking

use std::collections::BTreeSet;

/// Remembers the last remaining-second value that fired an alert, so a
/// recomputation landing on the same second does not fire again
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertMemory {
    last_fired_second: Option<i64>,
}

impl AlertMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_fired_second(&self) -> Option<i64> {
        self.last_fired_second
    }

    /// Check `remaining_seconds` against the thresholds and return the
    /// threshold (in minutes) that should be announced, if any
    pub fn check(
        &mut self,
        remaining_seconds: i64,
        thresholds_minutes: &BTreeSet<u32>,
    ) -> Option<u32> {
        if remaining_seconds <= 0 || self.last_fired_second == Some(remaining_seconds) {
            return None;
        }

        let threshold = thresholds_minutes
            .iter()
            .copied()
            .find(|minutes| i64::from(*minutes) * 60 == remaining_seconds)?;

        self.last_fired_second = Some(remaining_seconds);
        Some(threshold)
    }

    pub fn reset(&mut self) {
        self.last_fired_second = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> BTreeSet<u32> {
        [1, 5].into_iter().collect()
    }

    #[test]
    fn fires_on_threshold_second() {
        let mut memory = AlertMemory::new();
        assert_eq!(memory.check(301, &thresholds()), None);
        assert_eq!(memory.check(300, &thresholds()), Some(5));
        assert_eq!(memory.last_fired_second(), Some(300));
        assert_eq!(memory.check(60, &thresholds()), Some(1));
    }

    #[test]
    fn same_second_fires_once() {
        let mut memory = AlertMemory::new();
        assert_eq!(memory.check(300, &thresholds()), Some(5));
        assert_eq!(memory.check(300, &thresholds()), None);
    }

    #[test]
    fn reset_rearms() {
        let mut memory = AlertMemory::new();
        assert_eq!(memory.check(60, &thresholds()), Some(1));
        memory.reset();
        assert_eq!(memory.check(60, &thresholds()), Some(1));
    }

    #[test]
    fn non_positive_remaining_never_alerts() {
        let mut memory = AlertMemory::new();
        let zero: BTreeSet<u32> = [0].into_iter().collect();
        assert_eq!(memory.check(0, &zero), None);
    }
}

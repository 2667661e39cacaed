//! Remaining-time arithmetic for a countdown anchored to a reference start

use std::time::Duration;

const MS_PER_SECOND: i64 = 1000;

/// Epoch milliseconds at which a countdown of `duration_seconds` started at
/// `reference_started_time_ms` runs out
pub fn end_time_ms(reference_started_time_ms: i64, duration_seconds: u64) -> i64 {
    let duration_ms = i64::try_from(duration_seconds)
        .unwrap_or(i64::MAX)
        .saturating_mul(MS_PER_SECOND);
    reference_started_time_ms.saturating_add(duration_ms)
}

/// Whole seconds left until `end_ms`, seen from `adjusted_now_ms`.
///
/// Rounds towards negative infinity, so a countdown that is half a second
/// past its end reports -1.
pub fn remaining_seconds(end_ms: i64, adjusted_now_ms: i64) -> i64 {
    end_ms
        .saturating_sub(adjusted_now_ms)
        .div_euclid(MS_PER_SECOND)
}

/// Delay before the first tick so that later ticks land on whole-second
/// boundaries of the end time. Never zero.
pub fn first_tick_delay(end_ms: i64, adjusted_now_ms: i64) -> Duration {
    let phase_ms = end_ms
        .saturating_sub(adjusted_now_ms)
        .rem_euclid(MS_PER_SECOND);

    if phase_ms == 0 {
        Duration::from_millis(MS_PER_SECOND as u64)
    } else {
        Duration::from_millis(phase_ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_is_floored() {
        let end = end_time_ms(0, 5);
        assert_eq!(end, 5_000);
        assert_eq!(remaining_seconds(end, 500), 4);
        assert_eq!(remaining_seconds(end, 0), 5);
        assert_eq!(remaining_seconds(end, 4_999), 0);
    }

    #[test]
    fn remaining_goes_negative_past_the_end() {
        let end = end_time_ms(10_000, 1);
        assert_eq!(remaining_seconds(end, 11_000), 0);
        assert_eq!(remaining_seconds(end, 11_500), -1);
        assert_eq!(remaining_seconds(end, 13_000), -2);
    }

    #[test]
    fn first_delay_aligns_to_end_boundary() {
        let end = end_time_ms(0, 5);
        assert_eq!(first_tick_delay(end, 500), Duration::from_millis(500));
        assert_eq!(first_tick_delay(end, 1_250), Duration::from_millis(750));
    }

    #[test]
    fn first_delay_is_never_zero() {
        let end = end_time_ms(0, 5);
        assert_eq!(first_tick_delay(end, 2_000), Duration::from_secs(1));
    }

    #[test]
    fn first_delay_handles_clock_ahead_of_end() {
        // 300ms past the end: next whole-second boundary is 700ms away
        let end = end_time_ms(0, 1);
        assert_eq!(first_tick_delay(end, 1_300), Duration::from_millis(700));
    }

    #[test]
    fn huge_durations_saturate() {
        assert_eq!(end_time_ms(1, u64::MAX), i64::MAX);
    }
}

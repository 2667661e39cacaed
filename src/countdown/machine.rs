//! Countdown state machine.
//!
//! The machine never reads a clock. Every operation that needs the current
//! time takes the skew-adjusted "now" as an argument and returns the signals
//! it produced, leaving scheduling to the caller.
//!
//! ```text
//!            activate (time left)          tick (remaining > 0)
//!   Idle ───────────────────────► Running ◄──────────┐
//!    │                              │  └──────────────┘
//!    │ activate (no time left)      │ tick (remaining <= 0)
//!    ▼                              ▼
//!  Ended ◄───────────────────────────
//! ```
//!
//! `deactivate` returns any phase to Idle; `activate` leaves any phase.

use std::time::Duration;

use super::{
    alerts::AlertMemory,
    schedule::{first_tick_delay, remaining_seconds},
    signal::CountdownSignal,
    timer_config::TimerConfig,
};
use crate::state::{Phase, TimerState};

/// Signals produced by (re)computing the countdown, plus when the next tick
/// is due. `next_tick_in` is `None` once the countdown no longer ticks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recompute {
    pub signals: Vec<CountdownSignal>,
    pub next_tick_in: Option<Duration>,
}

#[derive(Debug, Clone, Default)]
pub struct Countdown {
    config: Option<TimerConfig>,
    phase: Phase,
    remaining_seconds: Option<i64>,
    alerts: AlertMemory,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn remaining_seconds(&self) -> Option<i64> {
        self.remaining_seconds
    }

    pub fn config(&self) -> Option<&TimerConfig> {
        self.config.as_ref()
    }

    pub fn alerts(&self) -> &AlertMemory {
        &self.alerts
    }

    pub fn snapshot(&self) -> TimerState {
        TimerState {
            phase: self.phase,
            remaining_seconds: self.remaining_seconds,
            reference_started_time_ms: self.config.as_ref().map(|c| c.reference_started_time_ms),
            duration_seconds: self.config.as_ref().map(|c| c.duration_seconds),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start (or restart) the countdown from `config`.
    ///
    /// Alert memory survives re-activation with the same schedule and is
    /// cleared when the reference time or duration changes.
    pub fn activate(&mut self, config: TimerConfig, adjusted_now_ms: i64) -> Recompute {
        let same_schedule = self
            .config
            .as_ref()
            .is_some_and(|current| current.same_schedule(&config));
        if !same_schedule {
            self.alerts.reset();
        }

        self.config = Some(config);
        self.phase = Phase::Idle;
        self.recompute(adjusted_now_ms)
    }

    /// Recompute remaining time after the clock offset moved. Only a running
    /// countdown is affected.
    pub fn resync(&mut self, adjusted_now_ms: i64) -> Recompute {
        if !self.is_running() {
            return Recompute::default();
        }
        self.recompute(adjusted_now_ms)
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> Vec<CountdownSignal> {
        if !self.is_running() {
            return Vec::new();
        }

        let remaining = self.remaining_seconds.unwrap_or(0).saturating_sub(1);
        self.remaining_seconds = Some(remaining);

        let mut signals = self.check_alert(remaining);
        if remaining <= 0 {
            self.finish(&mut signals);
        } else {
            signals.push(CountdownSignal::Tick {
                remaining_seconds: remaining,
            });
        }
        signals
    }

    /// Stop ticking and forget the computed remaining time
    pub fn deactivate(&mut self) {
        self.phase = Phase::Idle;
        self.remaining_seconds = None;
    }

    // ── Internals ────────────────────────────────────────────────────

    fn recompute(&mut self, adjusted_now_ms: i64) -> Recompute {
        let Some(config) = self.config.as_ref() else {
            return Recompute::default();
        };

        let end_ms = config.end_time_ms();
        let remaining = if config.duration_seconds == 0 {
            0
        } else {
            remaining_seconds(end_ms, adjusted_now_ms)
        };

        let mut signals = Vec::new();
        if remaining <= 0 {
            self.remaining_seconds = Some(0);
            self.finish(&mut signals);
            return Recompute {
                signals,
                next_tick_in: None,
            };
        }

        self.phase = Phase::Running;
        self.remaining_seconds = Some(remaining);
        signals.extend(self.check_alert(remaining));
        signals.push(CountdownSignal::Tick {
            remaining_seconds: remaining,
        });

        Recompute {
            signals,
            next_tick_in: Some(first_tick_delay(end_ms, adjusted_now_ms)),
        }
    }

    fn check_alert(&mut self, remaining: i64) -> Vec<CountdownSignal> {
        let Some(config) = self.config.as_ref() else {
            return Vec::new();
        };

        self.alerts
            .check(remaining, &config.alert_thresholds_minutes)
            .map(|threshold_minutes| CountdownSignal::Alert { threshold_minutes })
            .into_iter()
            .collect()
    }

    fn finish(&mut self, signals: &mut Vec<CountdownSignal>) {
        if self.phase != Phase::Ended {
            self.phase = Phase::Ended;
            signals.push(CountdownSignal::Ended);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(remaining_seconds: i64) -> CountdownSignal {
        CountdownSignal::Tick { remaining_seconds }
    }

    fn run_to_end(countdown: &mut Countdown) -> Vec<CountdownSignal> {
        let mut seen = Vec::new();
        while countdown.is_running() {
            seen.extend(countdown.tick());
        }
        seen
    }

    #[test]
    fn activation_computes_skewed_remaining() {
        let mut countdown = Countdown::new();
        let out = countdown.activate(TimerConfig::new(0, 5), 500);

        assert_eq!(countdown.remaining_seconds(), Some(4));
        assert_eq!(countdown.phase(), Phase::Running);
        assert_eq!(out.signals, vec![tick(4)]);
        assert_eq!(out.next_tick_in, Some(Duration::from_millis(500)));
    }

    #[test]
    fn exactly_duration_ticks_then_ended() {
        let mut countdown = Countdown::new();
        let mut seen = countdown.activate(TimerConfig::new(10_000, 3), 10_000).signals;
        seen.extend(run_to_end(&mut countdown));

        assert_eq!(seen, vec![tick(3), tick(2), tick(1), CountdownSignal::Ended]);
        assert_eq!(countdown.phase(), Phase::Ended);
        assert_eq!(countdown.remaining_seconds(), Some(0));
    }

    #[test]
    fn zero_duration_ends_without_ticks() {
        let mut countdown = Countdown::new();
        let out = countdown.activate(TimerConfig::new(0, 0), -60_000);

        assert_eq!(out.signals, vec![CountdownSignal::Ended]);
        assert_eq!(out.next_tick_in, None);
        assert_eq!(countdown.phase(), Phase::Ended);
    }

    #[test]
    fn elapsed_countdown_ends_on_activation() {
        let mut countdown = Countdown::new();
        let out = countdown.activate(TimerConfig::new(0, 5), 9_000);

        assert_eq!(out.signals, vec![CountdownSignal::Ended]);
        assert_eq!(countdown.remaining_seconds(), Some(0));
    }

    #[test]
    fn ended_is_terminal_until_reactivated() {
        let mut countdown = Countdown::new();
        countdown.activate(TimerConfig::new(0, 1), 0);
        assert_eq!(countdown.tick(), vec![CountdownSignal::Ended]);
        assert!(countdown.tick().is_empty());
        assert!(countdown.resync(0).signals.is_empty());

        let out = countdown.activate(TimerConfig::new(0, 2), 0);
        assert_eq!(out.signals, vec![tick(2)]);
    }

    #[test]
    fn reactivating_ended_countdown_signals_end_again() {
        let mut countdown = Countdown::new();
        countdown.activate(TimerConfig::new(0, 0), 0);

        let out = countdown.activate(TimerConfig::new(0, 0), 0);
        assert_eq!(out.signals, vec![CountdownSignal::Ended]);
    }

    #[test]
    fn threshold_alert_fires_once() {
        let config = TimerConfig::new(0, 301).with_alert_thresholds([1, 5]);
        let mut countdown = Countdown::new();
        countdown.activate(config, 0);

        let signals = countdown.tick();
        assert_eq!(
            signals,
            vec![CountdownSignal::Alert { threshold_minutes: 5 }, tick(300)]
        );

        // A recompute that lands on 300 again stays quiet
        let out = countdown.resync(1_000);
        assert_eq!(out.signals, vec![tick(300)]);
    }

    #[test]
    fn reactivating_same_schedule_keeps_alert_memory() {
        let config = TimerConfig::new(0, 60).with_alert_thresholds([1]);
        let mut countdown = Countdown::new();

        let first = countdown.activate(config.clone(), 0);
        assert_eq!(
            first.signals,
            vec![CountdownSignal::Alert { threshold_minutes: 1 }, tick(60)]
        );

        let again = countdown.activate(config, 0);
        assert_eq!(again.signals, vec![tick(60)]);
    }

    #[test]
    fn new_schedule_rearms_alerts() {
        let mut countdown = Countdown::new();
        countdown.activate(TimerConfig::new(0, 60).with_alert_thresholds([1]), 0);

        let out = countdown.activate(TimerConfig::new(1_000, 60).with_alert_thresholds([1]), 1_000);
        assert_eq!(
            out.signals,
            vec![CountdownSignal::Alert { threshold_minutes: 1 }, tick(60)]
        );
    }

    #[test]
    fn resync_applies_new_offset() {
        let mut countdown = Countdown::new();
        countdown.activate(TimerConfig::new(0, 100), 0);

        let out = countdown.resync(30_250);
        assert_eq!(out.signals, vec![tick(69)]);
        assert_eq!(out.next_tick_in, Some(Duration::from_millis(750)));

        let out = countdown.resync(200_000);
        assert_eq!(out.signals, vec![CountdownSignal::Ended]);
        assert_eq!(out.next_tick_in, None);
    }

    #[test]
    fn deactivate_is_idempotent() {
        let mut countdown = Countdown::new();
        countdown.activate(TimerConfig::new(0, 10), 0);

        countdown.deactivate();
        countdown.deactivate();

        assert_eq!(countdown.phase(), Phase::Idle);
        assert_eq!(countdown.remaining_seconds(), None);
        assert!(countdown.tick().is_empty());
    }

    #[test]
    fn snapshot_reflects_config() {
        let mut countdown = Countdown::new();
        countdown.activate(TimerConfig::new(2_000, 30), 2_000);

        let snapshot = countdown.snapshot();
        assert_eq!(snapshot.phase, Phase::Running);
        assert_eq!(snapshot.remaining_seconds, Some(30));
        assert_eq!(snapshot.reference_started_time_ms, Some(2_000));
        assert_eq!(snapshot.duration_seconds, Some(30));
    }
}

//! Tokio driver for the countdown state machine
//!
//! Owns the clock, the clock-offset capability, and the single tick task of
//! one countdown. Signals go out over an unbounded channel; state snapshots
//! over a watch channel.

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::{debug, error, info};

use super::{machine::Countdown, signal::CountdownSignal, timer_config::TimerConfig};
use crate::{
    clock::{Clock, ClockOffset, SystemClock},
    state::TimerState,
};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Everything guarded by the engine lock. Signals are only published while
/// holding it, after checking that the tick task's generation is current.
struct Inner {
    countdown: Countdown,
    generation: u64,
    task: Option<JoinHandle<()>>,
    signal_tx: mpsc::UnboundedSender<CountdownSignal>,
    state_tx: watch::Sender<TimerState>,
}

impl Inner {
    fn publish(&self, signals: Vec<CountdownSignal>) {
        for signal in signals {
            if self.signal_tx.send(signal).is_err() {
                debug!("No listener for countdown signal {:?}", signal);
            }
        }
        self.state_tx.send_replace(self.countdown.snapshot());
    }

    /// Invalidate the running tick task, if any
    fn cancel_task(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// What the tick task should do after handling an event
enum Next {
    Continue,
    Rearm(Duration),
    Stop,
}

/// Countdown engine with at most one live tick task
pub struct CountdownEngine {
    clock: Arc<dyn Clock>,
    inner: Arc<Mutex<Inner>>,
    state_rx: watch::Receiver<TimerState>,
}

impl CountdownEngine {
    /// Create an idle engine and the receiver for its signals
    pub fn new(clock: Arc<dyn Clock>) -> (Self, mpsc::UnboundedReceiver<CountdownSignal>) {
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(TimerState::new());

        let inner = Inner {
            countdown: Countdown::new(),
            generation: 0,
            task: None,
            signal_tx,
            state_tx,
        };

        let engine = Self {
            clock,
            inner: Arc::new(Mutex::new(inner)),
            state_rx,
        };
        (engine, signal_rx)
    }

    /// Create an engine reading the system wall clock
    pub fn with_system_clock() -> (Self, mpsc::UnboundedReceiver<CountdownSignal>) {
        Self::new(Arc::new(SystemClock))
    }

    /// Start (or restart) the countdown.
    ///
    /// Cancels any tick task of a previous activation before scheduling a new
    /// one. Must be called from within a tokio runtime.
    pub fn activate(&self, config: TimerConfig, mut offset: ClockOffset) -> TimerState {
        let Some(mut inner) = self.lock() else {
            return self.state();
        };
        inner.cancel_task();

        let offset_ms = offset.current();
        let adjusted_now_ms = self.clock.now_ms().saturating_add(offset_ms);
        info!(
            "Activating countdown: reference={}ms duration={}s offset={}ms",
            config.reference_started_time_ms, config.duration_seconds, offset_ms
        );

        let outcome = inner.countdown.activate(config, adjusted_now_ms);
        inner.publish(outcome.signals);

        match outcome.next_tick_in {
            Some(first_delay) => {
                debug!("First tick in {:?}", first_delay);
                let task = tokio::spawn(run_ticks(
                    Arc::clone(&self.inner),
                    Arc::clone(&self.clock),
                    offset,
                    inner.generation,
                    first_delay,
                ));
                inner.task = Some(task);
            }
            None => info!("Countdown has no time left"),
        }

        inner.countdown.snapshot()
    }

    /// Stop the countdown. Safe to call repeatedly; no signal is published
    /// after this returns.
    pub fn deactivate(&self) -> TimerState {
        let Some(mut inner) = self.lock() else {
            return self.state();
        };

        if inner.countdown.is_running() {
            info!("Deactivating running countdown");
        }
        inner.cancel_task();
        inner.countdown.deactivate();

        let snapshot = inner.countdown.snapshot();
        inner.state_tx.send_replace(snapshot.clone());
        snapshot
    }

    /// Latest published state
    pub fn state(&self) -> TimerState {
        self.state_rx.borrow().clone()
    }

    /// Watch state snapshots as they are published
    pub fn subscribe_state(&self) -> watch::Receiver<TimerState> {
        self.state_rx.clone()
    }

    fn lock(&self) -> Option<MutexGuard<'_, Inner>> {
        match self.inner.lock() {
            Ok(guard) => Some(guard),
            Err(e) => {
                error!("Failed to lock countdown state: {}", e);
                None
            }
        }
    }
}

impl Drop for CountdownEngine {
    fn drop(&mut self) {
        let mut inner = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        inner.cancel_task();
    }
}

/// Tick task: one per activation, stopped by generation change or abort
async fn run_ticks(
    inner: Arc<Mutex<Inner>>,
    clock: Arc<dyn Clock>,
    mut offset: ClockOffset,
    generation: u64,
    first_delay: Duration,
) {
    let mut ticks = interval_at(Instant::now() + first_delay, TICK_PERIOD);

    loop {
        let next = tokio::select! {
            _ = ticks.tick() => on_tick(&inner, generation),
            Some(offset_ms) = offset.changed() => {
                on_offset_change(&inner, generation, clock.now_ms().saturating_add(offset_ms))
            }
        };

        match next {
            Next::Continue => {}
            Next::Rearm(delay) => {
                debug!("Re-arming countdown ticks, next in {:?}", delay);
                ticks = interval_at(Instant::now() + delay, TICK_PERIOD);
            }
            Next::Stop => break,
        }
    }

    debug!("Countdown tick task {} finished", generation);
}

fn on_tick(inner: &Mutex<Inner>, generation: u64) -> Next {
    let Ok(mut guard) = inner.lock() else {
        error!("Countdown state lock poisoned, stopping ticks");
        return Next::Stop;
    };
    if guard.generation != generation {
        return Next::Stop;
    }

    let signals = guard.countdown.tick();
    guard.publish(signals);

    if guard.countdown.is_running() {
        Next::Continue
    } else {
        info!("Countdown ended");
        guard.task = None;
        Next::Stop
    }
}

fn on_offset_change(inner: &Mutex<Inner>, generation: u64, adjusted_now_ms: i64) -> Next {
    let Ok(mut guard) = inner.lock() else {
        error!("Countdown state lock poisoned, stopping ticks");
        return Next::Stop;
    };
    if guard.generation != generation {
        return Next::Stop;
    }

    info!("Clock offset changed, recomputing remaining time");
    let outcome = guard.countdown.resync(adjusted_now_ms);
    guard.publish(outcome.signals);

    match outcome.next_tick_in {
        Some(delay) => Next::Rearm(delay),
        None => {
            guard.task = None;
            Next::Stop
        }
    }
}

//! Countdown engine module
//!
//! A skew-corrected countdown: the pure state machine, the arithmetic it is
//! built on, and the tokio driver that schedules its ticks.

pub mod alerts;
pub mod engine;
pub mod machine;
pub mod schedule;
pub mod signal;
pub mod timer_config;

// Re-export main types
pub use alerts::AlertMemory;
pub use engine::CountdownEngine;
pub use machine::{Countdown, Recompute};
pub use signal::CountdownSignal;
pub use timer_config::TimerConfig;

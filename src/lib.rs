//! Remaining Time - a clock-skew corrected countdown engine
//! 
//! This library provides a countdown that measures remaining time against a
//! reference start, corrected by a live clock offset, ticks once per second
//! and raises one-time alerts at configured thresholds. A small HTTP host
//! drives the engine and routes its signals to notifications.

pub mod api;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use clock::{Clock, ClockOffset, ManualClock, SystemClock};
pub use config::Config;
pub use countdown::{CountdownEngine, CountdownSignal, TimerConfig};
pub use state::{AppState, Phase, TimerState};
pub use api::create_router;
pub use utils::signals::shutdown_signal;

//! Host-side services module
//! 
//! This module contains the clock-offset (time sync) service and the
//! notification channel that countdown alerts are routed to.

pub mod notification;
pub mod time_sync;

// Re-export main types
pub use notification::*;
pub use time_sync::*;

//! Utility functions module
//! 
//! This module contains utility functions used throughout the application.

pub mod format;
pub mod signals;

// Re-export main functions
pub use format::{humanize_seconds, remaining_time_label};
pub use signals::shutdown_signal;

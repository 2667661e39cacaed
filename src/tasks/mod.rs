//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod signal_relay;

// Re-export main functions
pub use signal_relay::signal_relay_task;

//! Configuration and CLI argument handling

use std::collections::BTreeSet;
use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "remaining-time")]
#[command(about = "A clock-skew corrected countdown with alert thresholds")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Remaining minutes at which to raise an alert, comma separated
    #[arg(short, long, value_delimiter = ',', default_value = "1,5")]
    pub alert_thresholds: Vec<u32>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Alert thresholds without duplicates or zero entries
    pub fn alert_thresholds_minutes(&self) -> BTreeSet<u32> {
        self.alert_thresholds.iter().copied().filter(|m| *m > 0).collect()
    }
}

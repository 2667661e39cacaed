//! User-facing notifications for countdown alerts and the end of time

use std::{
    collections::VecDeque,
    sync::Mutex,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// How many notifications are kept for status reporting
pub const NOTIFICATION_HISTORY: usize = 50;

/// Message for an alert threshold, with the singular/plural wording
pub fn alert_message(threshold_minutes: u32) -> String {
    if threshold_minutes == 1 {
        format!("{} minute remaining", threshold_minutes)
    } else {
        format!("{} minutes remaining", threshold_minutes)
    }
}

/// Message shown once the countdown ran out
pub fn ending_message() -> String {
    "Time is up".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Alert,
    Ended,
}

/// A notification as delivered to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Bounded history of delivered notifications, newest last
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: Mutex<VecDeque<Notification>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a notification: log it and keep it in the history
    pub fn notify(&self, kind: NotificationKind, message: String) -> Result<Notification, String> {
        info!("Notification ({:?}): {}", kind, message);

        let notification = Notification {
            kind,
            message,
            timestamp: Utc::now(),
        };

        let mut entries = self.entries.lock()
            .map_err(|e| format!("Failed to lock notification log: {}", e))?;
        if entries.len() == NOTIFICATION_HISTORY {
            entries.pop_front();
        }
        entries.push_back(notification.clone());

        Ok(notification)
    }

    /// Snapshot of the retained notifications
    pub fn recent(&self) -> Vec<Notification> {
        match self.entries.lock() {
            Ok(entries) => entries.iter().cloned().collect(),
            Err(e) => {
                warn!("Failed to lock notification log: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_message_pluralizes() {
        assert_eq!(alert_message(1), "1 minute remaining");
        assert_eq!(alert_message(5), "5 minutes remaining");
    }

    #[test]
    fn log_keeps_most_recent() {
        let log = NotificationLog::new();
        for i in 0..(NOTIFICATION_HISTORY + 3) {
            log.notify(NotificationKind::Alert, format!("alert {}", i)).unwrap();
        }

        let recent = log.recent();
        assert_eq!(recent.len(), NOTIFICATION_HISTORY);
        assert_eq!(recent[0].message, "alert 3");
        assert_eq!(
            recent.last().map(|n| n.message.as_str()),
            Some(format!("alert {}", NOTIFICATION_HISTORY + 2).as_str())
        );
    }

    #[test]
    fn notify_returns_delivered_notification() {
        let log = NotificationLog::new();
        let delivered = log.notify(NotificationKind::Ended, ending_message()).unwrap();
        assert_eq!(delivered.kind, NotificationKind::Ended);
        assert_eq!(delivered.message, "Time is up");
    }
}

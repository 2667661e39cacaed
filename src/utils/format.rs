//! Human-readable time formatting

/// Format seconds as `MM:SS`, or `H:MM:SS` from one hour up. Negative input
/// renders as `00:00`.
pub fn humanize_seconds(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Label shown next to a running countdown
pub fn remaining_time_label(seconds: i64) -> String {
    format!("Time remaining: {}", humanize_seconds(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(humanize_seconds(0), "00:00");
        assert_eq!(humanize_seconds(59), "00:59");
        assert_eq!(humanize_seconds(61), "01:01");
        assert_eq!(humanize_seconds(3_599), "59:59");
    }

    #[test]
    fn formats_hours() {
        assert_eq!(humanize_seconds(3_600), "1:00:00");
        assert_eq!(humanize_seconds(7_325), "2:02:05");
    }

    #[test]
    fn clamps_negative() {
        assert_eq!(humanize_seconds(-4), "00:00");
    }

    #[test]
    fn label_wraps_humanized_time() {
        assert_eq!(remaining_time_label(300), "Time remaining: 05:00");
    }
}

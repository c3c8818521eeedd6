//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Worker;
use ratatui::prelude::Color;

/// Get a ratatui color for a worker based on its type
pub fn get_worker_color(worker: &Worker) -> Color {
    match worker {
        Worker::StatusPoller => Color::Cyan,
        Worker::StatsPoller => Color::Magenta,
        Worker::ListFetcher => Color::Yellow,
        Worker::Control => Color::Green,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS"; the backend also emits the ISO
    // form with a 'T' separator
    let mut parts = timestamp.splitn(2, [' ', 'T']);
    if let Some(date_part) = parts.next() {
        if let Some(time_part) = parts.next() {
            // Extract MM-DD from date and HH:MM from time
            if let Some(month_day) = date_part.get(5..10) {
                if let Some(hour_min) = time_part.get(0..5) {
                    return format!("{} {}", month_day, hour_min);
                }
            }
        }
    }
    // Fallback to original timestamp if parsing fails
    timestamp.to_string()
}

/// Clean HTTP error messages
pub fn clean_http_error_message(msg: &str) -> String {
    // Replace verbose HTTP error text with short feed lines
    if msg.contains("Reqwest error") && msg.contains("timed out") {
        return "Request timed out - retrying...".to_string();
    }
    if msg.contains("Reqwest error") {
        return "Backend unreachable - retrying...".to_string();
    }
    if msg.contains("Decoding error") {
        return "Malformed response from backend".to_string();
    }
    // Return original message if no HTTP error pattern detected
    msg.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_timestamp_handles_both_separators() {
        assert_eq!(
            format_compact_timestamp("2025-06-01 10:23:45"),
            "06-01 10:23"
        );
        assert_eq!(
            format_compact_timestamp("2025-06-01T10:23:45+00:00"),
            "06-01 10:23"
        );
    }

    #[test]
    // Anything unparseable passes through unchanged.
    fn test_compact_timestamp_fallback() {
        assert_eq!(format_compact_timestamp("yesterday"), "yesterday");
        assert_eq!(format_compact_timestamp(""), "");
    }
}

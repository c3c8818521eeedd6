//! Agent API Data Model
//!
//! Wire types for the agent's control API. Field names mirror the backend's
//! JSON exactly. Everything here is a transient snapshot: each successful
//! fetch replaces the previous one wholesale, nothing is persisted.

use serde::Deserialize;
use std::fmt::Display;

/// Running state reported by `GET /control/status`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AgentStatus {
    /// Whether the agent's processing loop is active.
    pub is_running: bool,

    /// Seconds since the agent last started. Zero while stopped.
    #[serde(default)]
    pub uptime: f64,
}

/// Aggregate counters from `GET /stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct StatsSnapshot {
    pub total_emails: u64,
    pub total_actions: u64,
    pub pending_retries: u64,
}

/// One processed email row from `GET /emails`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmailSummary {
    /// Database row ID
    pub id: i64,

    /// Provider-side message ID
    #[serde(default)]
    pub email_id: String,

    pub sender: String,
    pub subject: String,

    /// Receive time as reported by the provider
    #[serde(default)]
    pub timestamp: String,

    /// Triage score in [0, 100]
    pub priority_score: i64,

    /// Human label assigned at triage time. May be absent on old rows.
    #[serde(default)]
    pub priority_label: Option<String>,

    #[serde(default)]
    pub next_action: String,

    #[serde(default)]
    pub task_status: String,
}

impl EmailSummary {
    /// Label for display. The backend may omit or blank the field on rows
    /// written before labeling existed.
    pub fn priority_label_or_unknown(&self) -> &str {
        match self.priority_label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => "Unknown",
        }
    }

    /// Display bucket derived from the triage score.
    pub fn priority_class(&self) -> PriorityClass {
        PriorityClass::from_score(self.priority_score)
    }

    /// Subject clipped for fixed-width rendering.
    pub fn short_subject(&self, max_chars: usize) -> String {
        clip(&self.subject, max_chars)
    }

    /// Sender clipped for fixed-width rendering.
    pub fn short_sender(&self, max_chars: usize) -> String {
        clip(&self.sender, max_chars)
    }
}

/// One behavior-log row from `GET /logs`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogEntry {
    /// Database row ID
    pub id: i64,

    /// Provider-side message ID of the email this action concerns
    #[serde(default)]
    pub email_id: String,

    /// Classified intent of the email
    #[serde(default)]
    pub intent: String,

    /// Action the agent proposed before policy checks
    #[serde(default)]
    pub proposed_action: String,

    /// Action the agent actually took
    #[serde(default)]
    pub agent_action: String,

    #[serde(default)]
    pub created_at: String,
}

/// Reply body of the `POST /control/start` and `POST /control/stop` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ControlResponse {
    /// Human-readable outcome, e.g. "Agent started".
    pub message: String,
}

/// Display bucket for an email's triage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum PriorityClass {
    High,
    Medium,
    Low,
}

impl PriorityClass {
    /// Score thresholds: 80 and above is high, 50 and above is medium,
    /// everything below is low.
    pub fn from_score(score: i64) -> Self {
        if score >= 80 {
            PriorityClass::High
        } else if score >= 50 {
            PriorityClass::Medium
        } else {
            PriorityClass::Low
        }
    }
}

// Display
impl Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_running {
            write!(f, "Running (uptime {})", format_uptime(self.uptime))
        } else {
            write!(f, "Stopped")
        }
    }
}

/// Format agent uptime for display.
///
/// Zero and anything unusable render as "0s". Everything else renders as
/// hours, minutes and whole seconds, with fractions floored.
pub fn format_uptime(uptime_secs: f64) -> String {
    if !uptime_secs.is_finite() || uptime_secs <= 0.0 {
        return "0s".to_string();
    }
    let total = uptime_secs as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{}h {}m {}s", hours, minutes, seconds)
}

/// Clip a string to at most `max_chars` characters, marking the cut with an
/// ellipsis. Splits on character boundaries, not bytes.
fn clip(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Zero uptime has a dedicated short form.
    fn test_format_uptime_zero() {
        assert_eq!(format_uptime(0.0), "0s");
    }

    #[test]
    // Sub-hour uptimes still carry the hour field.
    fn test_format_uptime_under_a_minute() {
        assert_eq!(format_uptime(59.0), "0h 0m 59s");
    }

    #[test]
    fn test_format_uptime_spanning_units() {
        assert_eq!(format_uptime(3661.0), "1h 1m 1s");
        assert_eq!(format_uptime(7322.0), "2h 2m 2s");
    }

    #[test]
    // The backend reports uptime as a float; fractions floor.
    fn test_format_uptime_floors_fractions() {
        assert_eq!(format_uptime(59.9), "0h 0m 59s");
    }

    #[test]
    fn test_format_uptime_rejects_garbage() {
        assert_eq!(format_uptime(f64::NAN), "0s");
        assert_eq!(format_uptime(f64::INFINITY), "0s");
        assert_eq!(format_uptime(-12.0), "0s");
    }

    #[test]
    // Threshold boundaries: 80 is high, 79 and 50 are medium, 49 is low.
    fn test_priority_class_boundaries() {
        assert_eq!(PriorityClass::from_score(80), PriorityClass::High);
        assert_eq!(PriorityClass::from_score(79), PriorityClass::Medium);
        assert_eq!(PriorityClass::from_score(50), PriorityClass::Medium);
        assert_eq!(PriorityClass::from_score(49), PriorityClass::Low);
        assert_eq!(PriorityClass::from_score(100), PriorityClass::High);
        assert_eq!(PriorityClass::from_score(0), PriorityClass::Low);
    }

    #[test]
    // Missing and empty labels both fall back to "Unknown".
    fn test_priority_label_fallback() {
        let mut email: EmailSummary = serde_json::from_value(serde_json::json!({
            "id": 1,
            "email_id": "msg-100",
            "sender": "alice@example.com",
            "subject": "Quarterly report",
            "timestamp": "2025-06-01T09:30:00",
            "priority_score": 85,
            "next_action": "reply",
            "task_status": "done"
        }))
        .unwrap();
        assert_eq!(email.priority_label_or_unknown(), "Unknown");

        email.priority_label = Some(String::new());
        assert_eq!(email.priority_label_or_unknown(), "Unknown");

        email.priority_label = Some("Urgent".to_string());
        assert_eq!(email.priority_label_or_unknown(), "Urgent");
    }

    #[test]
    // Status payloads decode from the backend's exact field names.
    fn test_agent_status_decodes() {
        let running: AgentStatus =
            serde_json::from_str(r#"{"is_running": true, "uptime": 12.5}"#).unwrap();
        assert!(running.is_running);
        assert_eq!(format_uptime(running.uptime), "0h 0m 12s");

        let stopped: AgentStatus =
            serde_json::from_str(r#"{"is_running": false, "uptime": 0}"#).unwrap();
        assert!(!stopped.is_running);
        assert_eq!(stopped.to_string(), "Stopped");
    }

    #[test]
    fn test_stats_decode() {
        let stats: StatsSnapshot = serde_json::from_str(
            r#"{"total_emails": 42, "total_actions": 17, "pending_retries": 3}"#,
        )
        .unwrap();
        assert_eq!(stats.total_emails, 42);
        assert_eq!(stats.total_actions, 17);
        assert_eq!(stats.pending_retries, 3);
    }

    #[test]
    fn test_control_response_decodes() {
        let reply: ControlResponse =
            serde_json::from_str(r#"{"message": "Agent started"}"#).unwrap();
        assert_eq!(reply.message, "Agent started");
    }

    #[test]
    // Clipping respects character boundaries and marks the cut.
    fn test_clip_subject() {
        let email: EmailSummary = serde_json::from_value(serde_json::json!({
            "id": 2,
            "sender": "bob@example.com",
            "subject": "A very long subject line about nothing much at all",
            "priority_score": 10
        }))
        .unwrap();
        assert_eq!(email.short_subject(10), "A very lo…");
        assert_eq!(email.short_sender(50), "bob@example.com");
    }
}

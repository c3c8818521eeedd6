//! Event System
//!
//! Types and implementations for worker events, the activity feed, and the
//! typed state updates that feed the dashboard view model.

use crate::error_classifier::LogLevel;
use crate::logging::should_log_with_env;
use crate::model::{AgentStatus, EmailSummary, LogEntry, StatsSnapshot};
use chrono::Local;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Worker {
    /// Worker that polls the agent's run state on a fixed cadence.
    StatusPoller,
    /// Worker that polls aggregate stats on a fixed cadence.
    StatsPoller,
    /// Worker that serves on-demand email and log listing fetches.
    ListFetcher,
    /// Worker that issues start/stop requests.
    Control,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    StateChange,
}

/// Run state observed by the status poller
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum AgentRunState {
    /// Processing loop is active
    Running,
    /// Processing loop is idle or the backend is unreachable
    Stopped,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Event {
    pub worker: Worker,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    /// Optional state information for state change events
    pub run_state: Option<AgentRunState>,
}

impl Event {
    fn new(worker: Worker, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            worker,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            run_state: None,
        }
    }

    pub fn state_change(run_state: AgentRunState, msg: String) -> Self {
        Self {
            worker: Worker::StatusPoller,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type: EventType::StateChange,
            log_level: LogLevel::Info,
            run_state: Some(run_state),
        }
    }

    pub fn status_poller_with_level(
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
    ) -> Self {
        Self::new(Worker::StatusPoller, msg, event_type, log_level)
    }

    pub fn stats_poller_with_level(
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
    ) -> Self {
        Self::new(Worker::StatsPoller, msg, event_type, log_level)
    }

    pub fn list_fetcher_with_level(
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
    ) -> Self {
        Self::new(Worker::ListFetcher, msg, event_type, log_level)
    }

    pub fn control_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Control, msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        // StateChange entries are appended by the reducer when it detects a
        // transition, never through the normal feed path
        if self.event_type == EventType::StateChange {
            return false;
        }
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}

/// Typed results flowing from workers into the dashboard view model.
///
/// The activity feed gets [`Event`]s; table and indicator data arrives here so
/// the UI never parses strings back apart.
#[derive(Debug, Clone, PartialEq)]
pub enum StateUpdate {
    /// A status fetch landed. `seq` orders competing fetches; the reducer
    /// drops results older than the newest one it has applied.
    Status { seq: u64, status: AgentStatus },
    /// A status fetch failed. The displayed state fails open to stopped.
    StatusFailed { seq: u64 },
    /// Aggregate counters refreshed. Failures send nothing; the view keeps
    /// its last-known values.
    Stats(StatsSnapshot),
    /// A fresh email listing, replacing the previous one wholesale.
    Emails(Vec<EmailSummary>),
    /// A fresh behavior-log listing, replacing the previous one wholesale.
    Logs(Vec<LogEntry>),
}

/// On-demand listing fetches requested by the UI.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FetchCommand {
    Emails { limit: u32 },
    Logs { limit: u32 },
}

/// Control requests from the UI.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ControlCommand {
    /// Start or stop depending on the state the UI last displayed. The flag
    /// is the cached one; a reconcile fetch corrects the view if it was
    /// stale.
    Toggle { currently_running: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Success events always reach the activity feed.
    fn test_success_events_display() {
        let event = Event::control_with_level(
            "Agent started".to_string(),
            EventType::Success,
            LogLevel::Debug,
        );
        assert!(event.should_display());
    }

    #[test]
    // StateChange events skip the display filter; the reducer that creates
    // them inserts them into the feed directly.
    fn test_state_change_events_are_separate() {
        let event = Event::state_change(AgentRunState::Running, "Agent is running".to_string());
        assert!(!event.should_display());
        assert_eq!(event.run_state, Some(AgentRunState::Running));
    }

    #[test]
    fn test_event_display_format() {
        let event = Event::status_poller_with_level(
            "Status fetch failed".to_string(),
            EventType::Error,
            LogLevel::Warn,
        );
        let rendered = event.to_string();
        assert!(rendered.starts_with("Error ["));
        assert!(rendered.ends_with("] Status fetch failed"));
    }
}

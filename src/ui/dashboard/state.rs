//! Dashboard state management
//!
//! Contains the main dashboard state struct and related enums

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::environment::Environment;
use crate::events::{Event as WorkerEvent, StateUpdate};
use crate::model::{EmailSummary, LogEntry, StatsSnapshot, format_uptime};
use crate::ui::app::UIConfig;
use crate::ui::metrics::SystemMetrics;

use std::collections::VecDeque;
use std::time::Instant;
use sysinfo::System;

/// Pages reachable from the dashboard tab bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Status, stats and the activity feed.
    Overview,
    /// Table of triaged emails.
    Emails,
    /// Table of agent decisions.
    Logs,
}

impl Page {
    /// Tab order, left to right.
    pub const ALL: [Page; 3] = [Page::Overview, Page::Emails, Page::Logs];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::Emails => "Emails",
            Page::Logs => "Action Log",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Page::Overview => 0,
            Page::Emails => 1,
            Page::Logs => 2,
        }
    }

    pub fn next(&self) -> Page {
        Page::ALL[(self.index() + 1) % Page::ALL.len()]
    }
}

/// What the dashboard currently believes about the agent.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentView {
    /// Whether the agent reported its processing loop as active.
    pub is_running: bool,
    /// Agent uptime in seconds. Zero while stopped.
    pub uptime_secs: f64,
    /// False after a failed status poll, until a later one succeeds.
    pub reachable: bool,
}

impl Default for AgentView {
    fn default() -> Self {
        Self {
            is_running: false,
            uptime_secs: 0.0,
            reachable: true,
        }
    }
}

impl AgentView {
    /// Label for the toggle key hint. Always names the action a press would
    /// send, based on the displayed state.
    pub fn toggle_label(&self) -> &'static str {
        if self.is_running {
            "Stop Agent"
        } else {
            "Start Agent"
        }
    }

    pub fn formatted_uptime(&self) -> String {
        format_uptime(self.uptime_secs)
    }
}

/// Dashboard state with the last-known view of the agent and its listings.
#[derive(Debug)]
pub struct DashboardState {
    /// The environment in which the application is running.
    pub environment: Environment,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Page currently shown in the body area.
    pub active_page: Page,
    /// Last known agent run state.
    pub agent: AgentView,
    /// Last known aggregate counters.
    pub stats: StatsSnapshot,
    /// Rows for the email page. Replaced wholesale on every successful fetch.
    pub emails: Vec<EmailSummary>,
    /// Rows for the action log page. Replaced wholesale on every successful fetch.
    pub logs: Vec<LogEntry>,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<WorkerEvent>,
    /// Queue of state updates waiting to be applied
    pub pending_updates: VecDeque<StateUpdate>,
    /// Activity log entries for display
    pub activity_logs: VecDeque<WorkerEvent>,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Row limit used when requesting listings.
    pub page_size: u32,
    /// System metrics (CPU, RAM) of the dashboard process
    pub system_metrics: SystemMetrics,
    /// Animation tick counter
    pub tick: usize,

    /// Issue token of the newest applied status result.
    last_status_seq: u64,
    /// When the last status result (success or failure) was applied.
    last_status_at: Option<Instant>,
    /// Persistent system info instance for accurate CPU measurements
    sysinfo: System,
}

impl DashboardState {
    /// Creates a new instance of the dashboard state.
    pub fn new(environment: Environment, start_time: Instant, ui_config: UIConfig) -> Self {
        Self {
            environment,
            start_time,
            active_page: Page::Overview,
            agent: AgentView::default(),
            stats: StatsSnapshot::default(),
            emails: Vec::new(),
            logs: Vec::new(),
            pending_events: VecDeque::new(),
            pending_updates: VecDeque::new(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            page_size: ui_config.page_size,
            system_metrics: SystemMetrics::default(),
            tick: 0,
            last_status_seq: 0,
            last_status_at: None,
            sysinfo: System::new_all(), // Initialize with all data for first refresh
        }
    }

    // Getter methods for private fields
    pub fn last_status_seq(&self) -> u64 {
        self.last_status_seq
    }

    pub fn last_status_at(&self) -> Option<Instant> {
        self.last_status_at
    }

    // Setter methods for private fields (for updaters)
    pub fn set_last_status_seq(&mut self, seq: u64) {
        self.last_status_seq = seq;
    }

    pub fn set_last_status_at(&mut self, at: Instant) {
        self.last_status_at = Some(at);
    }

    pub fn get_sysinfo_mut(&mut self) -> &mut System {
        &mut self.sysinfo
    }

    /// Add an entry to the activity log with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }

    /// Add a state update to the processing queue
    pub fn add_update(&mut self, update: StateUpdate) {
        self.pending_updates.push_back(update);
    }
}

//! Dashboard state update logic
//!
//! Contains all methods for applying queued worker events and state updates

use super::state::{DashboardState, Page};

use crate::events::{AgentRunState, ControlCommand, Event as WorkerEvent, FetchCommand, StateUpdate};
use crate::model::AgentStatus;
use crate::ui::metrics::SystemMetrics;

use std::time::Instant;

impl DashboardState {
    /// Update the dashboard state with new tick and metrics.
    pub fn update(&mut self) {
        self.tick += 1;

        // Update system metrics using persistent sysinfo instance for accurate CPU measurements
        let previous_metrics = self.system_metrics.clone();
        self.system_metrics =
            SystemMetrics::update(self.get_sysinfo_mut(), Some(&previous_metrics));

        // Move displayable events into the activity log. Run state transition
        // entries never come through here; apply_status appends them itself.
        while let Some(event) = self.pending_events.pop_front() {
            if event.should_display() {
                self.add_to_activity_log(event);
            }
        }

        // Apply all queued state updates one by one
        while let Some(update) = self.pending_updates.pop_front() {
            self.apply_update(update);
        }
    }

    /// Apply a single state update.
    fn apply_update(&mut self, update: StateUpdate) {
        match update {
            StateUpdate::Status { seq, status } => self.apply_status(seq, Some(status)),
            StateUpdate::StatusFailed { seq } => self.apply_status(seq, None),
            StateUpdate::Stats(stats) => self.stats = stats,
            StateUpdate::Emails(emails) => self.emails = emails,
            StateUpdate::Logs(logs) => self.logs = logs,
        }
    }

    /// Apply one status result. `None` means the poll failed.
    ///
    /// Results are ordered by issue token. Anything older than the newest
    /// applied result is dropped, so a slow periodic poll that was already in
    /// flight cannot overwrite the reconcile fetch following a toggle.
    fn apply_status(&mut self, seq: u64, status: Option<AgentStatus>) {
        if seq < self.last_status_seq() {
            return;
        }
        self.set_last_status_seq(seq);
        self.set_last_status_at(Instant::now());

        let was_running = self.agent.is_running;
        match status {
            Some(status) => {
                self.agent.is_running = status.is_running;
                self.agent.uptime_secs = status.uptime;
                self.agent.reachable = true;
            }
            None => {
                // Fail open: an unreachable backend is shown as stopped, so
                // the toggle hint still offers Start Agent.
                self.agent.is_running = false;
                self.agent.uptime_secs = 0.0;
                self.agent.reachable = false;
            }
        }

        if was_running != self.agent.is_running {
            let (run_state, msg) = if self.agent.is_running {
                (AgentRunState::Running, "Agent is now running".to_string())
            } else if self.agent.reachable {
                (AgentRunState::Stopped, "Agent stopped".to_string())
            } else {
                (
                    AgentRunState::Stopped,
                    "Backend unreachable, showing agent as stopped".to_string(),
                )
            };
            self.add_to_activity_log(WorkerEvent::state_change(run_state, msg));
        }
    }

    /// Switch the body to `page` and return the fetch that page needs.
    pub fn activate_page(&mut self, page: Page) -> Option<FetchCommand> {
        self.active_page = page;
        self.refresh_command()
    }

    /// Fetch command for reloading whatever page is active. The overview has
    /// no listing of its own, its data comes from the pollers.
    pub fn refresh_command(&self) -> Option<FetchCommand> {
        match self.active_page {
            Page::Overview => None,
            Page::Emails => Some(FetchCommand::Emails {
                limit: self.page_size,
            }),
            Page::Logs => Some(FetchCommand::Logs {
                limit: self.page_size,
            }),
        }
    }

    /// Toggle command built from the cached running flag, so a press always
    /// does what the hint next to it says.
    pub fn toggle_command(&self) -> ControlCommand {
        ControlCommand::Toggle {
            currently_running: self.agent.is_running,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
    use crate::environment::Environment;
    use crate::events::EventType;
    use crate::model::{EmailSummary, StatsSnapshot};
    use crate::ui::app::UIConfig;

    fn test_state() -> DashboardState {
        DashboardState::new(
            Environment::Local,
            Instant::now(),
            UIConfig::new(false, 25),
        )
    }

    fn running_status(uptime: f64) -> AgentStatus {
        AgentStatus {
            is_running: true,
            uptime,
        }
    }

    fn email(id: i64) -> EmailSummary {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "email_id": format!("msg-{id}"),
            "sender": "a@example.com",
            "subject": "hello",
            "timestamp": "2025-06-01 10:00:00",
            "priority_score": 10,
            "priority_label": "Low",
            "next_action": "archive",
            "task_status": "done"
        }))
        .unwrap()
    }

    #[test]
    fn test_status_result_applies() {
        let mut state = test_state();
        state.apply_update(StateUpdate::Status {
            seq: 1,
            status: running_status(42.0),
        });

        assert!(state.agent.is_running);
        assert_eq!(state.agent.uptime_secs, 42.0);
        assert!(state.agent.reachable);
        assert!(state.last_status_at().is_some());
    }

    #[test]
    // A result issued before the newest applied one must not win.
    fn test_stale_status_result_is_dropped() {
        let mut state = test_state();
        state.apply_update(StateUpdate::Status {
            seq: 2,
            status: running_status(1.0),
        });
        state.apply_update(StateUpdate::Status {
            seq: 1,
            status: AgentStatus {
                is_running: false,
                uptime: 0.0,
            },
        });

        assert!(state.agent.is_running);
        assert_eq!(state.last_status_seq(), 2);
    }

    #[test]
    // A failed poll shows the agent as stopped rather than keeping a
    // possibly wrong Running view.
    fn test_failed_status_fails_open_to_stopped() {
        let mut state = test_state();
        state.apply_update(StateUpdate::Status {
            seq: 1,
            status: running_status(10.0),
        });
        state.apply_update(StateUpdate::StatusFailed { seq: 2 });

        assert!(!state.agent.is_running);
        assert_eq!(state.agent.uptime_secs, 0.0);
        assert!(!state.agent.reachable);
        assert_eq!(state.agent.toggle_label(), "Start Agent");
    }

    #[test]
    fn test_recovered_status_clears_unreachable() {
        let mut state = test_state();
        state.apply_update(StateUpdate::StatusFailed { seq: 1 });
        state.apply_update(StateUpdate::Status {
            seq: 2,
            status: running_status(5.0),
        });

        assert!(state.agent.reachable);
        assert!(state.agent.is_running);
    }

    #[test]
    fn test_run_state_transition_adds_activity_entry() {
        let mut state = test_state();
        state.apply_update(StateUpdate::Status {
            seq: 1,
            status: running_status(1.0),
        });

        let entry = state.activity_logs.back().unwrap();
        assert_eq!(entry.event_type, EventType::StateChange);
        assert_eq!(entry.run_state, Some(AgentRunState::Running));

        // Same state again adds nothing
        state.apply_update(StateUpdate::Status {
            seq: 2,
            status: running_status(3.0),
        });
        assert_eq!(state.activity_logs.len(), 1);
    }

    #[test]
    fn test_stats_update_replaces_counters() {
        let mut state = test_state();
        state.apply_update(StateUpdate::Stats(StatsSnapshot {
            total_emails: 12,
            total_actions: 7,
            pending_retries: 1,
        }));

        assert_eq!(state.stats.total_emails, 12);
        assert_eq!(state.stats.pending_retries, 1);
    }

    #[test]
    // An empty listing is a valid result and clears the table.
    fn test_email_listing_replaces_wholesale() {
        let mut state = test_state();
        state.apply_update(StateUpdate::Emails(vec![email(1), email(2)]));
        assert_eq!(state.emails.len(), 2);

        state.apply_update(StateUpdate::Emails(Vec::new()));
        assert!(state.emails.is_empty());
    }

    #[test]
    fn test_activate_page_requests_listing() {
        let mut state = test_state();
        assert_eq!(
            state.activate_page(Page::Emails),
            Some(FetchCommand::Emails { limit: 25 })
        );
        assert_eq!(state.active_page, Page::Emails);

        assert_eq!(
            state.activate_page(Page::Logs),
            Some(FetchCommand::Logs { limit: 25 })
        );
        assert_eq!(state.activate_page(Page::Overview), None);
    }

    #[test]
    fn test_page_cycle_order() {
        assert_eq!(Page::Overview.next(), Page::Emails);
        assert_eq!(Page::Emails.next(), Page::Logs);
        assert_eq!(Page::Logs.next(), Page::Overview);
    }

    #[test]
    // The toggle decision comes from the displayed state, not a fresh fetch.
    fn test_toggle_command_uses_cached_flag() {
        let mut state = test_state();
        assert_eq!(
            state.toggle_command(),
            ControlCommand::Toggle {
                currently_running: false
            }
        );

        state.apply_update(StateUpdate::Status {
            seq: 1,
            status: running_status(1.0),
        });
        assert_eq!(
            state.toggle_command(),
            ControlCommand::Toggle {
                currently_running: true
            }
        );
    }

    #[test]
    fn test_activity_log_is_bounded() {
        let mut state = test_state();
        for i in 0..(MAX_ACTIVITY_LOGS + 10) {
            state.add_to_activity_log(WorkerEvent::state_change(
                AgentRunState::Running,
                format!("entry {i}"),
            ));
        }
        assert_eq!(state.activity_logs.len(), MAX_ACTIVITY_LOGS);
    }
}

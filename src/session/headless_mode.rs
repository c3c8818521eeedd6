//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::events::StateUpdate;
use crate::model::StatsSnapshot;
use std::error::Error;

/// Condensed console view of the agent, tracked across updates so only
/// changes get printed.
#[derive(Debug, Default)]
struct ConsoleView {
    last_running: Option<bool>,
    last_stats: Option<StatsSnapshot>,
}

impl ConsoleView {
    /// Console line for a state update, if it changed anything worth a line.
    /// Steady-state polls print nothing.
    fn describe(&mut self, update: &StateUpdate) -> Option<String> {
        match update {
            StateUpdate::Status { status, .. } => {
                let transition = self.last_running != Some(status.is_running);
                self.last_running = Some(status.is_running);
                if !transition {
                    return None;
                }
                if status.is_running {
                    Some(format!("Agent is running (uptime {:.0}s)", status.uptime))
                } else {
                    Some("Agent is stopped".to_string())
                }
            }
            StateUpdate::StatusFailed { .. } => {
                let was_running = self.last_running.unwrap_or(false);
                self.last_running = Some(false);
                was_running.then(|| "Backend unreachable, treating agent as stopped".to_string())
            }
            StateUpdate::Stats(stats) => {
                if self.last_stats.as_ref() == Some(stats) {
                    return None;
                }
                self.last_stats = Some(*stats);
                Some(format!(
                    "Stats: {} emails, {} actions, {} pending retries",
                    stats.total_emails, stats.total_actions, stats.pending_retries
                ))
            }
            StateUpdate::Emails(emails) => Some(format!("Fetched {} emails", emails.len())),
            StateUpdate::Logs(logs) => Some(format!("Fetched {} log entries", logs.len())),
        }
    }
}

/// Runs the application in headless mode
///
/// This function handles:
/// 1. Console event logging
/// 2. Ctrl+C shutdown handling
/// 3. Event loop management
///
/// # Arguments
/// * `session` - Session data from setup
///
/// # Returns
/// * `Ok(())` - Headless mode completed successfully
/// * `Err` - Headless mode failed
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    // Print session start message
    print_session_starting("headless", &session.environment);

    // Trigger shutdown on Ctrl+C
    let shutdown_sender_clone = session.shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender_clone.send(());
        }
    });

    let mut shutdown_receiver = session.shutdown_sender.subscribe();
    let mut view = ConsoleView::default();

    // Event loop: log events and state changes to console until shutdown
    loop {
        tokio::select! {
            Some(event) = session.event_receiver.recv() => {
                if event.should_display() {
                    println!("{}", event);
                }
            }
            Some(update) = session.update_receiver.recv() => {
                if let Some(line) = view.describe(&update) {
                    println!("{}", line);
                }
            }
            _ = shutdown_receiver.recv() => {
                break;
            }
        }
    }

    // Wait for workers to finish
    print_session_shutdown();
    for handle in session.join_handles {
        let _ = handle.await;
    }
    print_session_exit_success();

    Ok(())
}

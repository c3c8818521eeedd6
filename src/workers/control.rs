//! Agent start/stop control
//!
//! Issues the control request decided by the UI's cached running flag, then
//! reconciles the displayed state with a single delayed status fetch. There
//! is no optimistic flip: the view only changes when a status result lands.

use super::core::EventSender;
use super::pollers::{StatusSequencer, poll_status_once};
use crate::backend::AgentBackend;
use crate::consts::cli_consts::polling;
use crate::error_classifier::{ErrorClassifier, LogLevel};
use crate::events::{ControlCommand, EventType};
use log::warn;
use tokio::sync::{broadcast, mpsc};

/// Control worker serving toggle commands until shutdown.
pub struct ControlWorker {
    backend: Box<dyn AgentBackend>,
    sequencer: StatusSequencer,
    event_sender: EventSender,
    classifier: ErrorClassifier,
}

impl ControlWorker {
    pub fn new(
        backend: Box<dyn AgentBackend>,
        sequencer: StatusSequencer,
        event_sender: EventSender,
    ) -> Self {
        Self {
            backend,
            sequencer,
            event_sender,
            classifier: ErrorClassifier::new(),
        }
    }

    pub async fn run(
        self,
        mut commands: mpsc::Receiver<ControlCommand>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                maybe_command = commands.recv() => {
                    match maybe_command {
                        Some(ControlCommand::Toggle { currently_running }) => {
                            self.handle_toggle(currently_running).await;
                        }
                        None => break,
                    }
                }
            }
        }
    }

    /// One toggle: request the opposite of the cached state, report the
    /// backend's reply, then fetch status once after a short delay so the
    /// display reflects what actually happened.
    pub(crate) async fn handle_toggle(&self, currently_running: bool) {
        let result = if currently_running {
            self.backend.stop_agent().await
        } else {
            self.backend.start_agent().await
        };

        match result {
            Ok(reply) => {
                // The backend phrases no-op toggles itself, e.g. "Agent is
                // already running".
                self.event_sender
                    .send_control_event(reply.message, EventType::Success, LogLevel::Info)
                    .await;
            }
            Err(e) => {
                let action = if currently_running { "Stop" } else { "Start" };
                warn!("{} request failed: {}", action, e);
                let log_level = self.classifier.classify_fetch_error(&e);
                self.event_sender
                    .send_control_event(
                        format!("{} request failed: {}", action, e),
                        EventType::Error,
                        log_level,
                    )
                    .await;
            }
        }

        // Reconcile regardless of the control outcome. On failure this is
        // what flips a dead backend's view to stopped.
        tokio::time::sleep(polling::reconcile_delay()).await;
        poll_status_once(
            self.backend.as_ref(),
            &self.sequencer,
            &self.event_sender,
            &self.classifier,
        )
        .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockAgentBackend;
    use crate::backend::error::BackendError;
    use crate::events::{Event, StateUpdate};
    use crate::model::{AgentStatus, ControlResponse};
    use tokio::sync::mpsc;

    fn test_worker(
        backend: MockAgentBackend,
    ) -> (
        ControlWorker,
        mpsc::Receiver<Event>,
        mpsc::Receiver<StateUpdate>,
    ) {
        let (event_tx, event_rx) = mpsc::channel(16);
        let (update_tx, update_rx) = mpsc::channel(16);
        let sender = EventSender::new(event_tx, update_tx);
        (
            ControlWorker::new(Box::new(backend), StatusSequencer::new(), sender),
            event_rx,
            update_rx,
        )
    }

    #[tokio::test(start_paused = true)]
    // A toggle while the view shows stopped must hit the start endpoint,
    // then reconcile with a status fetch.
    async fn test_toggle_from_stopped_starts() {
        let mut backend = MockAgentBackend::new();
        backend.expect_start_agent().times(1).returning(|| {
            Ok(ControlResponse {
                message: "Agent started".to_string(),
            })
        });
        backend.expect_stop_agent().times(0);
        backend.expect_get_status().times(1).returning(|| {
            Ok(AgentStatus {
                is_running: true,
                uptime: 0.4,
            })
        });

        let (worker, mut event_rx, mut update_rx) = test_worker(backend);
        worker.handle_toggle(false).await;

        let event = event_rx.try_recv().unwrap();
        assert_eq!(event.event_type, EventType::Success);
        assert_eq!(event.msg, "Agent started");

        match update_rx.try_recv().unwrap() {
            StateUpdate::Status { status, .. } => assert!(status.is_running),
            other => panic!("unexpected update: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    // A toggle while the view shows running must hit the stop endpoint. The
    // cached flag decides; the server is not consulted first.
    async fn test_toggle_from_running_stops() {
        let mut backend = MockAgentBackend::new();
        backend.expect_stop_agent().times(1).returning(|| {
            Ok(ControlResponse {
                message: "Agent stop signal sent".to_string(),
            })
        });
        backend.expect_start_agent().times(0);
        backend.expect_get_status().times(1).returning(|| {
            Ok(AgentStatus {
                is_running: false,
                uptime: 0.0,
            })
        });

        let (worker, mut event_rx, _update_rx) = test_worker(backend);
        worker.handle_toggle(true).await;

        let event = event_rx.try_recv().unwrap();
        assert_eq!(event.msg, "Agent stop signal sent");
    }

    #[tokio::test(start_paused = true)]
    // A failed control request still reconciles, and the failed reconcile
    // fails the view open to stopped.
    async fn test_failed_toggle_still_reconciles() {
        let mut backend = MockAgentBackend::new();
        backend
            .expect_start_agent()
            .times(1)
            .returning(|| Err(BackendError::Http {
                status: 500,
                message: "boom".to_string(),
            }));
        backend.expect_get_status().times(1).returning(|| {
            Err(BackendError::Http {
                status: 500,
                message: "still down".to_string(),
            })
        });

        let (worker, mut event_rx, mut update_rx) = test_worker(backend);
        worker.handle_toggle(false).await;

        let control_event = event_rx.try_recv().unwrap();
        assert_eq!(control_event.event_type, EventType::Error);
        assert!(control_event.msg.contains("Start request failed"));

        assert!(matches!(
            update_rx.try_recv().unwrap(),
            StateUpdate::StatusFailed { .. }
        ));
    }
}

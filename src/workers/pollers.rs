//! Periodic Pollers
//!
//! Two fixed-cadence loops against the agent's control API: run state every
//! two seconds, aggregate stats every five. Both run until shutdown and both
//! keep the last-known view on failure, except status, which fails open to
//! stopped.

use super::core::EventSender;
use crate::backend::AgentBackend;
use crate::consts::cli_consts::polling;
use crate::error_classifier::ErrorClassifier;
use crate::events::{EventType, StateUpdate};
use log::warn;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;

/// Hands out ordering tokens for status fetches.
///
/// The periodic poller and the post-toggle reconcile fetch draw from the same
/// sequence, so the reducer can drop a result that was issued before one it
/// has already applied. Last issued wins, regardless of arrival order.
#[derive(Debug, Clone, Default)]
pub struct StatusSequencer {
    next: Arc<AtomicU64>,
}

impl StatusSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token for a fetch that is about to be issued. Tokens start at 1 so an
    /// untouched reducer (seq 0) accepts the first result.
    pub fn next_token(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Polls `GET /control/status` on a fixed cadence until shutdown.
pub async fn run_status_poller(
    backend: Box<dyn AgentBackend>,
    sequencer: StatusSequencer,
    event_sender: EventSender,
    mut shutdown: broadcast::Receiver<()>,
) {
    let classifier = ErrorClassifier::new();
    let mut ticker = tokio::time::interval(polling::status_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.recv() => break,
            _ = ticker.tick() => {
                poll_status_once(backend.as_ref(), &sequencer, &event_sender, &classifier).await;
            }
        }
    }
}

/// One status fetch, shared with the control worker's reconcile step.
///
/// The token is drawn before the request goes out, so a slow earlier fetch
/// can never overwrite a newer one.
pub(crate) async fn poll_status_once(
    backend: &dyn AgentBackend,
    sequencer: &StatusSequencer,
    event_sender: &EventSender,
    classifier: &ErrorClassifier,
) {
    let seq = sequencer.next_token();
    match backend.get_status().await {
        Ok(status) => {
            event_sender
                .send_update(StateUpdate::Status { seq, status })
                .await;
        }
        Err(e) => {
            warn!("Status fetch failed: {}", e);
            let log_level = classifier.classify_fetch_error(&e);
            event_sender
                .send_status_event(
                    format!("Status fetch failed: {}", e),
                    EventType::Error,
                    log_level,
                )
                .await;
            event_sender
                .send_update(StateUpdate::StatusFailed { seq })
                .await;
        }
    }
}

/// Polls `GET /stats` on a fixed cadence until shutdown.
pub async fn run_stats_poller(
    backend: Box<dyn AgentBackend>,
    event_sender: EventSender,
    mut shutdown: broadcast::Receiver<()>,
) {
    let classifier = ErrorClassifier::new();
    let mut ticker = tokio::time::interval(polling::stats_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.recv() => break,
            _ = ticker.tick() => {
                poll_stats_once(backend.as_ref(), &event_sender, &classifier).await;
            }
        }
    }
}

/// One stats fetch. Failures log and send nothing, so the dashboard keeps
/// its last-known counters.
pub(crate) async fn poll_stats_once(
    backend: &dyn AgentBackend,
    event_sender: &EventSender,
    classifier: &ErrorClassifier,
) {
    match backend.get_stats().await {
        Ok(stats) => {
            event_sender.send_update(StateUpdate::Stats(stats)).await;
        }
        Err(e) => {
            warn!("Stats fetch failed: {}", e);
            let log_level = classifier.classify_fetch_error(&e);
            event_sender
                .send_stats_event(
                    format!("Stats fetch failed: {}", e),
                    EventType::Error,
                    log_level,
                )
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockAgentBackend;
    use crate::backend::error::BackendError;
    use crate::events::Event;
    use crate::model::AgentStatus;
    use tokio::sync::mpsc;

    fn test_sender() -> (
        EventSender,
        mpsc::Receiver<Event>,
        mpsc::Receiver<StateUpdate>,
    ) {
        let (event_tx, event_rx) = mpsc::channel(16);
        let (update_tx, update_rx) = mpsc::channel(16);
        (EventSender::new(event_tx, update_tx), event_rx, update_rx)
    }

    #[test]
    // Tokens are unique and increase, including across clones.
    fn test_sequencer_tokens_increase() {
        let sequencer = StatusSequencer::new();
        let clone = sequencer.clone();
        assert_eq!(sequencer.next_token(), 1);
        assert_eq!(clone.next_token(), 2);
        assert_eq!(sequencer.next_token(), 3);
    }

    #[tokio::test]
    // A successful fetch produces a tokenized Status update and no events.
    async fn test_poll_status_success() {
        let mut backend = MockAgentBackend::new();
        backend.expect_get_status().times(1).returning(|| {
            Ok(AgentStatus {
                is_running: true,
                uptime: 42.0,
            })
        });

        let (sender, mut event_rx, mut update_rx) = test_sender();
        let sequencer = StatusSequencer::new();
        poll_status_once(&backend, &sequencer, &sender, &ErrorClassifier::new()).await;

        match update_rx.try_recv().unwrap() {
            StateUpdate::Status { seq, status } => {
                assert_eq!(seq, 1);
                assert!(status.is_running);
            }
            other => panic!("unexpected update: {:?}", other),
        }
        assert!(event_rx.try_recv().is_err());
    }

    #[tokio::test]
    // A failed fetch logs an error event and sends a tokenized failure.
    async fn test_poll_status_failure() {
        let mut backend = MockAgentBackend::new();
        backend.expect_get_status().times(1).returning(|| {
            Err(BackendError::Http {
                status: 503,
                message: "unavailable".to_string(),
            })
        });

        let (sender, mut event_rx, mut update_rx) = test_sender();
        let sequencer = StatusSequencer::new();
        poll_status_once(&backend, &sequencer, &sender, &ErrorClassifier::new()).await;

        assert!(matches!(
            update_rx.try_recv().unwrap(),
            StateUpdate::StatusFailed { seq: 1 }
        ));
        let event = event_rx.try_recv().unwrap();
        assert_eq!(event.event_type, EventType::Error);
        assert!(event.msg.contains("Status fetch failed"));
    }

    #[tokio::test]
    // A failed stats fetch reports an error but never overwrites counters.
    async fn test_poll_stats_failure_sends_no_update() {
        let mut backend = MockAgentBackend::new();
        backend.expect_get_stats().times(1).returning(|| {
            Err(BackendError::Http {
                status: 500,
                message: "boom".to_string(),
            })
        });

        let (sender, mut event_rx, mut update_rx) = test_sender();
        poll_stats_once(&backend, &sender, &ErrorClassifier::new()).await;

        assert!(update_rx.try_recv().is_err());
        let event = event_rx.try_recv().unwrap();
        assert_eq!(event.event_type, EventType::Error);
        assert!(event.msg.contains("Stats fetch failed"));
    }
}

//! On-demand listing fetches
//!
//! Serves page switches and manual refreshes. Each command fetches one page
//! from the newest row down; a successful result replaces the corresponding
//! table wholesale, a failed one leaves the previous rows in place.

use super::core::EventSender;
use crate::backend::AgentBackend;
use crate::error_classifier::{ErrorClassifier, LogLevel};
use crate::events::{EventType, FetchCommand, StateUpdate};
use log::warn;
use tokio::sync::{broadcast, mpsc};

/// Listing fetcher serving UI commands until shutdown.
pub struct ListFetcher {
    backend: Box<dyn AgentBackend>,
    event_sender: EventSender,
    classifier: ErrorClassifier,
}

impl ListFetcher {
    pub fn new(backend: Box<dyn AgentBackend>, event_sender: EventSender) -> Self {
        Self {
            backend,
            event_sender,
            classifier: ErrorClassifier::new(),
        }
    }

    /// Drain commands until shutdown or the command channel closes.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<FetchCommand>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                maybe_command = commands.recv() => {
                    match maybe_command {
                        Some(command) => self.handle_command(command).await,
                        None => break,
                    }
                }
            }
        }
    }

    pub(crate) async fn handle_command(&mut self, command: FetchCommand) {
        match command {
            FetchCommand::Emails { limit } => match self.backend.get_emails(limit, 0).await {
                Ok(emails) => {
                    self.event_sender
                        .send_fetch_event(
                            format!("Loaded {} emails", emails.len()),
                            EventType::Refresh,
                            LogLevel::Info,
                        )
                        .await;
                    self.event_sender
                        .send_update(StateUpdate::Emails(emails))
                        .await;
                }
                Err(e) => {
                    warn!("Email fetch failed: {}", e);
                    let log_level = self.classifier.classify_fetch_error(&e);
                    self.event_sender
                        .send_fetch_event(
                            format!("Email fetch failed: {}", e),
                            EventType::Error,
                            log_level,
                        )
                        .await;
                }
            },
            FetchCommand::Logs { limit } => match self.backend.get_logs(limit, 0).await {
                Ok(logs) => {
                    self.event_sender
                        .send_fetch_event(
                            format!("Loaded {} log entries", logs.len()),
                            EventType::Refresh,
                            LogLevel::Info,
                        )
                        .await;
                    self.event_sender
                        .send_update(StateUpdate::Logs(logs))
                        .await;
                }
                Err(e) => {
                    warn!("Log fetch failed: {}", e);
                    let log_level = self.classifier.classify_fetch_error(&e);
                    self.event_sender
                        .send_fetch_event(
                            format!("Log fetch failed: {}", e),
                            EventType::Error,
                            log_level,
                        )
                        .await;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockAgentBackend;
    use crate::backend::error::BackendError;
    use crate::events::Event;
    use tokio::sync::mpsc;

    fn test_fetcher(
        backend: MockAgentBackend,
    ) -> (
        ListFetcher,
        mpsc::Receiver<Event>,
        mpsc::Receiver<StateUpdate>,
    ) {
        let (event_tx, event_rx) = mpsc::channel(16);
        let (update_tx, update_rx) = mpsc::channel(16);
        let sender = EventSender::new(event_tx, update_tx);
        (ListFetcher::new(Box::new(backend), sender), event_rx, update_rx)
    }

    #[tokio::test]
    // An empty listing still replaces the table, leaving it empty.
    async fn test_empty_email_listing_is_delivered() {
        let mut backend = MockAgentBackend::new();
        backend
            .expect_get_emails()
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let (mut fetcher, _event_rx, mut update_rx) = test_fetcher(backend);
        fetcher
            .handle_command(FetchCommand::Emails { limit: 50 })
            .await;

        match update_rx.try_recv().unwrap() {
            StateUpdate::Emails(emails) => assert!(emails.is_empty()),
            other => panic!("unexpected update: {:?}", other),
        }
    }

    #[tokio::test]
    // A failed fetch sends no update, so the previous rows stay visible.
    async fn test_failed_log_fetch_sends_no_update() {
        let mut backend = MockAgentBackend::new();
        backend.expect_get_logs().times(1).returning(|_, _| {
            Err(BackendError::Http {
                status: 500,
                message: "boom".to_string(),
            })
        });

        let (mut fetcher, mut event_rx, mut update_rx) = test_fetcher(backend);
        fetcher.handle_command(FetchCommand::Logs { limit: 50 }).await;

        assert!(update_rx.try_recv().is_err());
        let event = event_rx.try_recv().unwrap();
        assert_eq!(event.event_type, EventType::Error);
        assert!(event.msg.contains("Log fetch failed"));
    }
}

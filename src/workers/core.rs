//! Core worker utilities

use crate::error_classifier::LogLevel;
use crate::events::{Event, EventType, StateUpdate};
use tokio::sync::mpsc;

/// Common event and update sending utilities for workers
#[derive(Clone)]
pub struct EventSender {
    events: mpsc::Sender<Event>,
    updates: mpsc::Sender<StateUpdate>,
}

impl EventSender {
    pub fn new(events: mpsc::Sender<Event>, updates: mpsc::Sender<StateUpdate>) -> Self {
        Self { events, updates }
    }

    /// Send a typed state update for the dashboard view model
    pub async fn send_update(&self, update: StateUpdate) {
        let _ = self.updates.send(update).await;
    }

    pub async fn send_status_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        let _ = self
            .events
            .send(Event::status_poller_with_level(
                message, event_type, log_level,
            ))
            .await;
    }

    pub async fn send_stats_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        let _ = self
            .events
            .send(Event::stats_poller_with_level(
                message, event_type, log_level,
            ))
            .await;
    }

    pub async fn send_fetch_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        let _ = self
            .events
            .send(Event::list_fetcher_with_level(
                message, event_type, log_level,
            ))
            .await;
    }

    pub async fn send_control_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        let _ = self
            .events
            .send(Event::control_with_level(message, event_type, log_level))
            .await;
    }
}

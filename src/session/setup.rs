//! Session setup and initialization

use crate::backend::BackendClient;
use crate::environment::Environment;
use crate::events::{ControlCommand, Event, FetchCommand, StateUpdate};
use crate::runtime::start_workers;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Session data for both TUI and headless modes
#[derive(Debug)]
pub struct SessionData {
    /// Event receiver for worker events
    pub event_receiver: mpsc::Receiver<Event>,
    /// Receiver for typed state updates
    pub update_receiver: mpsc::Receiver<StateUpdate>,
    /// Sender for on-demand listing fetches
    pub fetch_sender: mpsc::Sender<FetchCommand>,
    /// Sender for start/stop requests
    pub control_sender: mpsc::Sender<ControlCommand>,
    /// Join handles for worker tasks
    pub join_handles: Vec<JoinHandle<()>>,
    /// Shutdown sender to stop all workers
    pub shutdown_sender: broadcast::Sender<()>,
    /// Environment the session talks to
    pub environment: Environment,
    /// Row limit used when requesting listings
    pub page_size: u32,
}

/// Sets up a dashboard session.
///
/// Common setup for both TUI and headless modes: creates the backend client,
/// the shutdown channel, and the worker set.
pub fn setup_session(environment: Environment, page_size: u32) -> SessionData {
    let backend = BackendClient::new(environment.clone());

    // Create shutdown channel - only one shutdown signal needed
    let (shutdown_sender, _) = broadcast::channel(1);

    let handles = start_workers(backend, &shutdown_sender);

    SessionData {
        event_receiver: handles.event_receiver,
        update_receiver: handles.update_receiver,
        fetch_sender: handles.fetch_sender,
        control_sender: handles.control_sender,
        join_handles: handles.join_handles,
        shutdown_sender,
        environment,
        page_size,
    }
}

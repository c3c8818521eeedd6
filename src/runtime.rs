//! Runtime wiring for the dashboard's worker set

use crate::backend::BackendClient;
use crate::consts::cli_consts::{COMMAND_QUEUE_SIZE, EVENT_QUEUE_SIZE, UPDATE_QUEUE_SIZE};
use crate::events::{ControlCommand, Event, FetchCommand, StateUpdate};
use crate::workers::control::ControlWorker;
use crate::workers::core::EventSender;
use crate::workers::fetcher::ListFetcher;
use crate::workers::pollers::{StatusSequencer, run_status_poller, run_stats_poller};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Channel ends and join handles for one running worker set.
pub struct WorkerHandles {
    pub event_receiver: mpsc::Receiver<Event>,
    pub update_receiver: mpsc::Receiver<StateUpdate>,
    pub fetch_sender: mpsc::Sender<FetchCommand>,
    pub control_sender: mpsc::Sender<ControlCommand>,
    pub join_handles: Vec<JoinHandle<()>>,
}

/// Start the two pollers plus the fetch and control workers. All four stop
/// on the shutdown broadcast. The status poller and the control worker share
/// one sequencer so reconcile fetches order correctly against periodic ones.
pub fn start_workers(backend: BackendClient, shutdown: &broadcast::Sender<()>) -> WorkerHandles {
    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let (update_sender, update_receiver) = mpsc::channel::<StateUpdate>(UPDATE_QUEUE_SIZE);
    let (fetch_sender, fetch_receiver) = mpsc::channel::<FetchCommand>(COMMAND_QUEUE_SIZE);
    let (control_sender, control_receiver) = mpsc::channel::<ControlCommand>(COMMAND_QUEUE_SIZE);

    let sender = EventSender::new(event_sender, update_sender);
    let sequencer = StatusSequencer::new();

    let mut join_handles = Vec::new();

    join_handles.push(tokio::spawn(run_status_poller(
        Box::new(backend.clone()),
        sequencer.clone(),
        sender.clone(),
        shutdown.subscribe(),
    )));

    join_handles.push(tokio::spawn(run_stats_poller(
        Box::new(backend.clone()),
        sender.clone(),
        shutdown.subscribe(),
    )));

    let fetcher = ListFetcher::new(Box::new(backend.clone()), sender.clone());
    join_handles.push(tokio::spawn(
        fetcher.run(fetch_receiver, shutdown.subscribe()),
    ));

    let control = ControlWorker::new(Box::new(backend), sequencer, sender);
    join_handles.push(tokio::spawn(
        control.run(control_receiver, shutdown.subscribe()),
    ));

    WorkerHandles {
        event_receiver,
        update_receiver,
        fetch_sender,
        control_sender,
        join_handles,
    }
}

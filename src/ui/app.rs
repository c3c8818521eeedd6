//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::environment::Environment;
use crate::events::{ControlCommand, Event as WorkerEvent, FetchCommand, StateUpdate};
use crate::ui::dashboard::{DashboardState, Page, render_dashboard};
use crate::ui::splash::render_splash;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub page_size: u32,
}

impl UIConfig {
    pub fn new(with_background_color: bool, page_size: u32) -> Self {
        Self {
            with_background_color,
            page_size,
        }
    }
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Dashboard screen displaying agent status and listings.
    Dashboard(Box<DashboardState>),
}

/// Application state
#[derive(Debug)]
pub struct App {
    /// The start time of the application, used for computing uptime.
    start_time: Instant,

    /// The environment in which the application is running.
    environment: Environment,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Receives events from worker tasks.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    /// Receives typed state updates from worker tasks.
    update_receiver: mpsc::Receiver<StateUpdate>,

    /// Sends listing fetch requests to the fetch worker.
    fetch_sender: mpsc::Sender<FetchCommand>,

    /// Sends start/stop requests to the control worker.
    control_sender: mpsc::Sender<ControlCommand>,

    /// Broadcasts shutdown signal to worker tasks.
    shutdown_sender: broadcast::Sender<()>,

    /// Whether to enable background colors
    with_background_color: bool,

    /// Row limit used when requesting listings.
    page_size: u32,
}

impl App {
    /// Creates a new instance of the application.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        environment: Environment,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        update_receiver: mpsc::Receiver<StateUpdate>,
        fetch_sender: mpsc::Sender<FetchCommand>,
        control_sender: mpsc::Sender<ControlCommand>,
        shutdown_sender: broadcast::Sender<()>,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            start_time: Instant::now(),
            environment,
            current_screen: Screen::Splash,
            event_receiver,
            update_receiver,
            fetch_sender,
            control_sender,
            shutdown_sender,
            with_background_color: ui_config.with_background_color,
            page_size: ui_config.page_size,
        }
    }

    fn dashboard_state(&self) -> DashboardState {
        DashboardState::new(
            self.environment.clone(),
            self.start_time,
            UIConfig::new(self.with_background_color, self.page_size),
        )
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_secs(2);

    // UI event loop
    loop {
        // Queue all incoming events and updates for processing
        while let Ok(event) = app.event_receiver.try_recv() {
            if let Screen::Dashboard(state) = &mut app.current_screen {
                state.add_event(event);
            }
        }
        while let Ok(update) = app.update_receiver.try_recv() {
            if let Screen::Dashboard(state) = &mut app.current_screen {
                state.add_update(update);
            }
        }

        // Update the state based on the current screen
        match &mut app.current_screen {
            Screen::Splash => {}
            Screen::Dashboard(state) => {
                // Update the dashboard with new tick and metrics
                state.update();
            }
        }
        terminal.draw(|f| render(f, &app.current_screen))?;

        // Handle splash-to-dashboard transition
        if let Screen::Splash = app.current_screen {
            if splash_start.elapsed() >= splash_duration {
                app.current_screen = Screen::Dashboard(Box::new(app.dashboard_state()));
                continue;
            }
        }

        // Poll for key events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                // Handle exit events
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    // Send shutdown signal to workers
                    let _ = app.shutdown_sender.send(());
                    return Ok(());
                }

                match &mut app.current_screen {
                    Screen::Splash => {
                        // Any key press will skip the splash screen
                        app.current_screen = Screen::Dashboard(Box::new(app.dashboard_state()));
                    }
                    Screen::Dashboard(state) => {
                        handle_dashboard_key(
                            key.code,
                            state,
                            &app.fetch_sender,
                            &app.control_sender,
                        );
                    }
                }
            }
        }
    }
}

/// Handle a key press on the dashboard screen.
fn handle_dashboard_key(
    code: KeyCode,
    state: &mut DashboardState,
    fetch_sender: &mpsc::Sender<FetchCommand>,
    control_sender: &mpsc::Sender<ControlCommand>,
) {
    match code {
        KeyCode::Tab => {
            let next = state.active_page.next();
            activate_page(state, fetch_sender, next);
        }
        KeyCode::Char(c @ '1'..='3') => {
            let index = (c as usize) - ('1' as usize);
            activate_page(state, fetch_sender, Page::ALL[index]);
        }
        KeyCode::Char('s') => {
            // Full queue means a toggle is already in flight; drop the press
            let _ = control_sender.try_send(state.toggle_command());
        }
        KeyCode::Char('r') => {
            if let Some(command) = state.refresh_command() {
                let _ = fetch_sender.try_send(command);
            }
        }
        _ => {}
    }
}

/// Switch to `page` and request whatever listing it displays.
fn activate_page(
    state: &mut DashboardState,
    fetch_sender: &mpsc::Sender<FetchCommand>,
    page: Page,
) {
    if let Some(command) = state.activate_page(page) {
        let _ = fetch_sender.try_send(command);
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}

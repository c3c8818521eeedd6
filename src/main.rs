mod backend;
mod cli_messages;
mod config;
mod consts;
mod environment;
mod error_classifier;
mod events;
mod logging;
mod model;
mod pretty;
mod runtime;
mod session;
mod ui;
mod workers;

use crate::backend::error::BackendError;
use crate::backend::{AgentBackend, BackendClient};
use crate::config::{Config, get_config_path, resolve_environment};
use crate::consts::cli_consts::DEFAULT_PAGE_SIZE;
use crate::environment::Environment;
use crate::model::AgentStatus;
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use clap::{Parser, Subcommand};
use std::error::Error;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Base URL of the agent's control API. Overrides the environment
    /// variable and the saved configuration.
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the interactive dashboard
    Dashboard {
        /// Log to the console instead of drawing the terminal UI.
        #[arg(long)]
        headless: bool,

        /// Enable a background color in the terminal UI.
        #[arg(long)]
        with_background: bool,

        /// Rows to request per listing fetch.
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,
    },
    /// Print the agent's run state
    Status,
    /// Start the agent's processing loop
    Start,
    /// Stop the agent's processing loop
    Stop,
    /// Print the agent's aggregate counters
    Stats,
    /// List triaged emails, newest first
    Emails {
        /// Maximum rows to fetch.
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: u32,

        /// Rows to skip from the newest end.
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// List the agent's decision log, newest first
    Logs {
        /// Maximum rows to fetch.
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: u32,

        /// Rows to skip from the newest end.
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Manage the saved backend URL
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Save a backend URL as the default for future runs
    SetUrl {
        /// Base URL of the agent's control API, e.g. http://localhost:8000
        #[arg(value_name = "URL")]
        url: String,
    },
    /// Print the saved configuration
    Show,
    /// Delete the saved configuration
    Clear,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let environment = resolve_environment(args.base_url.as_deref());

    match args.command {
        Command::Dashboard {
            headless,
            with_background,
            page_size,
        } => {
            let session = setup_session(environment, page_size);
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session, with_background).await
            }
        }
        Command::Status => show_status(environment).await,
        Command::Start => start_agent(environment).await,
        Command::Stop => stop_agent(environment).await,
        Command::Stats => show_stats(environment).await,
        Command::Emails { limit, offset } => list_emails(environment, limit, offset).await,
        Command::Logs { limit, offset } => list_logs(environment, limit, offset).await,
        Command::Config { action } => handle_config(action),
    }
}

/// Print the agent's run state.
///
/// A backend that cannot be reached is reported as stopped rather than as a
/// failure, matching what the dashboard shows in the same situation.
async fn show_status(environment: Environment) -> Result<(), Box<dyn Error>> {
    let client = BackendClient::new(environment);
    match client.get_status().await {
        Ok(status) => pretty::print_status(&status),
        Err(e) => {
            crate::print_cmd_warn!("Status fetch failed", "{}", e);
            pretty::print_status(&AgentStatus {
                is_running: false,
                uptime: 0.0,
            });
        }
    }
    Ok(())
}

/// Ask the agent to start and print the backend's reply.
async fn start_agent(environment: Environment) -> Result<(), Box<dyn Error>> {
    let client = BackendClient::new(environment);
    match client.start_agent().await {
        Ok(reply) => {
            crate::print_cmd_success!("Start requested", "{}", reply.message);
            Ok(())
        }
        Err(e) => {
            report_backend_error(client.environment(), "Start request failed", &e);
            Err(e.into())
        }
    }
}

/// Ask the agent to stop and print the backend's reply.
async fn stop_agent(environment: Environment) -> Result<(), Box<dyn Error>> {
    let client = BackendClient::new(environment);
    match client.stop_agent().await {
        Ok(reply) => {
            crate::print_cmd_success!("Stop requested", "{}", reply.message);
            Ok(())
        }
        Err(e) => {
            report_backend_error(client.environment(), "Stop request failed", &e);
            Err(e.into())
        }
    }
}

/// Print the agent's aggregate counters.
async fn show_stats(environment: Environment) -> Result<(), Box<dyn Error>> {
    let client = BackendClient::new(environment);
    match client.get_stats().await {
        Ok(stats) => {
            pretty::print_stats(&stats);
            Ok(())
        }
        Err(e) => {
            report_backend_error(client.environment(), "Stats fetch failed", &e);
            Err(e.into())
        }
    }
}

/// Print a page of triaged emails.
async fn list_emails(
    environment: Environment,
    limit: u32,
    offset: u32,
) -> Result<(), Box<dyn Error>> {
    let client = BackendClient::new(environment);
    match client.get_emails(limit, offset).await {
        Ok(emails) => {
            pretty::print_email_table(&emails);
            Ok(())
        }
        Err(e) => {
            report_backend_error(client.environment(), "Email fetch failed", &e);
            Err(e.into())
        }
    }
}

/// Print a page of the agent's decision log.
async fn list_logs(environment: Environment, limit: u32, offset: u32) -> Result<(), Box<dyn Error>> {
    let client = BackendClient::new(environment);
    match client.get_logs(limit, offset).await {
        Ok(logs) => {
            pretty::print_log_table(&logs);
            Ok(())
        }
        Err(e) => {
            report_backend_error(client.environment(), "Log fetch failed", &e);
            Err(e.into())
        }
    }
}

/// Print a command failure, with the full banner when nothing answered.
fn report_backend_error(environment: &Environment, context: &str, error: &BackendError) {
    if matches!(error, BackendError::Reqwest(_)) {
        pretty::print_backend_unreachable(&environment.base_url());
    }
    let details = error.to_string();
    crate::print_cmd_error!(context, details.as_str());
}

/// Handle the config subcommands against `~/.maildeck/config.json`.
fn handle_config(action: ConfigAction) -> Result<(), Box<dyn Error>> {
    let config_path = get_config_path()?;
    match action {
        ConfigAction::SetUrl { url } => {
            let environment = match url.parse::<Environment>() {
                Ok(environment) => environment,
                Err(()) => {
                    let err_msg = format!(
                        "Invalid backend URL: {}. Expected an http:// or https:// URL.",
                        url
                    );
                    crate::print_cmd_error!("Invalid backend URL", url.as_str());
                    return Err(Box::from(err_msg));
                }
            };
            let config = Config::new(environment.base_url());
            config
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            crate::print_cmd_success!(
                "Config saved",
                "Backend URL set to {}",
                environment.base_url()
            );
            Ok(())
        }
        ConfigAction::Show => {
            match Config::load_from_file(&config_path) {
                Ok(config) => match config.base_url {
                    Some(url) => println!("base_url: {}", url),
                    None => println!("base_url: (not set)"),
                },
                Err(_) => println!("No saved configuration."),
            }
            Ok(())
        }
        ConfigAction::Clear => {
            Config::clear(&config_path).map_err(|e| format!("Failed to clear config: {}", e))?;
            crate::print_cmd_info!("Config cleared", "{}", config_path.display());
            Ok(())
        }
    }
}

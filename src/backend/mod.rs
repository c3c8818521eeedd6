use crate::backend::error::BackendError;
use crate::environment::Environment;
use crate::model::{AgentStatus, ControlResponse, EmailSummary, LogEntry, StatsSnapshot};

pub(crate) mod client;
pub use client::BackendClient;
pub mod error;

#[cfg(test)]
use mockall::{automock, predicate::*};

/// The agent control API consumed by the dashboard and one-shot commands.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait AgentBackend: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Current running state and uptime of the agent.
    async fn get_status(&self) -> Result<AgentStatus, BackendError>;

    /// Ask the agent to start processing.
    async fn start_agent(&self) -> Result<ControlResponse, BackendError>;

    /// Ask the agent to stop after its current cycle.
    async fn stop_agent(&self) -> Result<ControlResponse, BackendError>;

    /// Aggregate processing counters.
    async fn get_stats(&self) -> Result<StatsSnapshot, BackendError>;

    /// Recently processed emails, newest first.
    async fn get_emails(&self, limit: u32, offset: u32)
    -> Result<Vec<EmailSummary>, BackendError>;

    /// Recent behavior-log entries, newest first.
    async fn get_logs(&self, limit: u32, offset: u32) -> Result<Vec<LogEntry>, BackendError>;
}

//! Agent Backend Client
//!
//! A client for the email agent's control API: run-state control plus the
//! stats, emails and logs read endpoints.

use crate::backend::AgentBackend;
use crate::backend::error::BackendError;
use crate::consts::cli_consts::http;
use crate::environment::Environment;
use crate::model::{AgentStatus, ControlResponse, EmailSummary, LogEntry, StatsSnapshot};
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;

// User-Agent string with client version
const USER_AGENT: &str = concat!("maildeck/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    environment: Environment,
}

impl BackendClient {
    pub fn new(environment: Environment) -> Self {
        Self {
            client: ClientBuilder::new()
                .connect_timeout(http::connect_timeout())
                .timeout(http::request_timeout())
                .build()
                .expect("Failed to create HTTP client"),
            environment,
        }
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.base_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn decode_response<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, BackendError> {
        serde_json::from_slice(bytes).map_err(BackendError::Decode)
    }

    async fn handle_response_status(response: Response) -> Result<Response, BackendError> {
        if !response.status().is_success() {
            return Err(BackendError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, u32)],
    ) -> Result<T, BackendError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .get(&url)
            .query(query)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }

    async fn post_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, BackendError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }
}

#[async_trait::async_trait]
impl AgentBackend for BackendClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn get_status(&self) -> Result<AgentStatus, BackendError> {
        self.get_request("control/status", &[]).await
    }

    async fn start_agent(&self) -> Result<ControlResponse, BackendError> {
        self.post_request("control/start").await
    }

    async fn stop_agent(&self) -> Result<ControlResponse, BackendError> {
        self.post_request("control/stop").await
    }

    async fn get_stats(&self) -> Result<StatsSnapshot, BackendError> {
        self.get_request("stats", &[]).await
    }

    async fn get_emails(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<EmailSummary>, BackendError> {
        self.get_request("emails", &[("limit", limit), ("offset", offset)])
            .await
    }

    async fn get_logs(&self, limit: u32, offset: u32) -> Result<Vec<LogEntry>, BackendError> {
        self.get_request("logs", &[("limit", limit), ("offset", offset)])
            .await
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// URL building should tolerate stray slashes on either side.
    fn test_build_url_joins_cleanly() {
        let client = BackendClient::new(Environment::Custom {
            base_url: "http://10.0.0.5:8000/".to_string(),
        });
        assert_eq!(
            client.build_url("/control/status"),
            "http://10.0.0.5:8000/control/status"
        );
        assert_eq!(client.build_url("stats"), "http://10.0.0.5:8000/stats");
    }

    #[tokio::test]
    /// Requests against an unbound port should surface as Reqwest errors,
    /// not panics or hangs.
    async fn test_unreachable_backend_is_an_error() {
        let client = BackendClient::new(Environment::Custom {
            base_url: "http://127.0.0.1:9".to_string(),
        });
        let result = client.get_status().await;
        assert!(matches!(result, Err(BackendError::Reqwest(_))));
    }
}

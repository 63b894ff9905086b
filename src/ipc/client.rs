//! HTTP client for the observability ingestion endpoint.

use crate::common::debug::debug_log;
use crate::common::json::to_ascii_vec;
use crate::common::types::Event;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Path of the ingestion route, appended to the base URL
pub const INGEST_PATH: &str = "/api/observability/ingest";

/// User agent identifying the hook family
pub const USER_AGENT: &str = "Claude-Code-Hook/1.0";

/// Upper bound on a single delivery attempt
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Why an event did not reach the ingestion endpoint
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("failed to encode event")]
    Encode(#[from] serde_json::Error),

    #[error("failed to reach {endpoint}")]
    Unreachable {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {endpoint} timed out after {timeout:?}")]
    Timeout { endpoint: String, timeout: Duration },

    #[error("unexpected response: {0}")]
    Status(StatusCode),
}

impl NotifyError {
    /// Whether the endpoint could not be contacted at all
    pub fn is_unreachable(&self) -> bool {
        matches!(self, NotifyError::Unreachable { .. } | NotifyError::Timeout { .. })
    }
}

/// Build the ingestion URL for a deployment base URL
pub fn ingest_endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), INGEST_PATH)
}

/// Client posting events to one ingestion endpoint
pub struct IngestClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl IngestClient {
    /// Create a client for the given base URL with the default timeout
    pub fn new(base_url: &str) -> Result<Self, NotifyError> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(NotifyError::Client)?;
        Ok(Self {
            client,
            endpoint: ingest_endpoint(base_url),
            timeout,
        })
    }

    /// Full URL events are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post one event. Succeeds only on a 2xx response.
    pub async fn send(&self, event: &Event) -> Result<(), NotifyError> {
        let body = to_ascii_vec(event)?;
        debug_log(&format!(
            "POST {} {}",
            self.endpoint,
            String::from_utf8_lossy(&body)
        ));

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|source| self.transport_error(source))?;

        let status = response.status();
        debug_log(&format!("response status {}", status));
        if status.is_success() {
            Ok(())
        } else {
            Err(NotifyError::Status(status))
        }
    }

    fn transport_error(&self, source: reqwest::Error) -> NotifyError {
        if source.is_timeout() {
            NotifyError::Timeout {
                endpoint: self.endpoint.clone(),
                timeout: self.timeout,
            }
        } else {
            NotifyError::Unreachable {
                endpoint: self.endpoint.clone(),
                source,
            }
        }
    }
}

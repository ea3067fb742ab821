// Telemetry Sink Module
// Replaces the record at a device-scoped store path with the latest reading

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::vitals::reading::Reading;

pub use reqwest::StatusCode;

/// Errors surfaced by a telemetry sink
#[derive(Debug, Error)]
pub enum SinkError {
    /// The request never completed (connect, DNS, timeout, body)
    #[error("telemetry request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-success status
    #[error("telemetry store rejected the write: HTTP {status}")]
    Rejected { status: StatusCode },
}

/// A keyed store holding the latest reading per device
///
/// `publish` replaces the entire record at `path`; it is idempotent and
/// carries no retry policy of its own.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    async fn publish(&self, path: &str, reading: &Reading) -> Result<(), SinkError>;
}

/// Firebase-style realtime database sink over the REST surface
pub struct FirebaseSink {
    client: reqwest::Client,
    database_url: String,
    auth_token: Option<String>,
}

impl FirebaseSink {
    /// Create a sink for the given database root
    pub fn new(
        database_url: impl Into<String>,
        auth_token: Option<String>,
        request_timeout: Duration,
    ) -> Result<Self, SinkError> {
        let client = reqwest::Client::builder().timeout(request_timeout).build()?;
        let database_url = database_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            database_url,
            auth_token,
        })
    }

    /// REST endpoint for a database path
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}.json", self.database_url, path.trim_matches('/'))
    }
}

#[async_trait]
impl TelemetrySink for FirebaseSink {
    async fn publish(&self, path: &str, reading: &Reading) -> Result<(), SinkError> {
        let mut request = self.client.put(self.endpoint(path)).json(reading);

        if let Some(token) = &self.auth_token {
            request = request.query(&[("auth", token.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(SinkError::Rejected { status });
        }

        debug!(path = %path, status = %status, "Reading stored");
        Ok(())
    }
}

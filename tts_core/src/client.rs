use std::time::Duration;

use reqwest::{header, Client};
use tracing::debug;

use crate::error::SynthesisError;
use crate::request::{SynthesisRequest, T2aRequest};
use crate::response::{interpret_response, SynthesizedAudio, T2aResponse};

pub const DEFAULT_ENDPOINT: &str = "https://api.minimaxi.chat/v1/t2a_v2";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the MiniMax text-to-audio endpoint.
///
/// Holds no per-request state; one instance is shared by every handler.
#[derive(Debug, Clone)]
pub struct MinimaxClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
    timeout: Duration,
}

impl MinimaxClient {
    /// Create a client with the default endpoint and a 30 second timeout.
    /// A missing key is accepted here and reported on every `synthesize` call.
    pub fn new(api_key: Option<String>) -> Result<Self, SynthesisError> {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT)
    }

    pub fn with_endpoint(
        api_key: Option<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SynthesisError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            endpoint: endpoint.into(),
            timeout,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// One upstream call, no retry.
    pub async fn synthesize(
        &self,
        req: &SynthesisRequest,
    ) -> Result<SynthesizedAudio, SynthesisError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SynthesisError::MissingCredential)?;

        let body = serde_json::to_vec(&T2aRequest::from_request(req))
            .map_err(SynthesisError::Encode)?;

        debug!(
            endpoint = %self.endpoint,
            voice_id = %req.voice_id,
            speed = req.speed,
            "Calling MiniMax t2a"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, "application/json; charset=utf-8")
            .bearer_auth(api_key)
            .body(body)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SynthesisError::UpstreamStatus(status));
        }

        let bytes = response.bytes().await.map_err(|e| self.map_transport(e))?;
        let parsed: T2aResponse =
            serde_json::from_slice(&bytes).map_err(SynthesisError::MalformedResponse)?;

        interpret_response(parsed)
    }

    fn map_transport(&self, e: reqwest::Error) -> SynthesisError {
        if e.is_timeout() {
            SynthesisError::Timeout(self.timeout)
        } else {
            SynthesisError::Transport(e)
        }
    }
}

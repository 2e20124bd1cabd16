//! HTTP client for the analysis service.
//!
//! Two endpoints are consumed:
//! - `POST /api/auth/analyze` with `{ "textToAnalyze": .., "email": .. }`,
//!   answering `{ "token": .., ... }`
//! - `GET /api/auth/history?email=..`, answering a JSON array of strings

use std::io::Read;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Endpoint};
use crate::model::Identity;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// The remote analysis service, as seen by the screen's flows.
pub trait AnalysisApi: Send + Sync {
    /// Submit `text` for analysis and return the textual result (`token`).
    fn analyze(&self, text: &str, identity: &Identity) -> Result<String, AnalysisError>;

    /// Fetch the texts previously submitted by `identity`.
    fn history(&self, identity: &Identity) -> Result<Vec<String>, AnalysisError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest<'a> {
    text_to_analyze: &'a str,
    email: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    token: String,
}

/// [`AnalysisApi`] over HTTP using a blocking `ureq` agent.
#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .build();
        Self { base_url, agent }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

impl Default for HttpApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }
}

impl AnalysisApi for HttpApi {
    fn analyze(&self, text: &str, identity: &Identity) -> Result<String, AnalysisError> {
        let body = AnalyzeRequest {
            text_to_analyze: text,
            email: identity.email(),
        };
        let response = self
            .agent
            .post(&self.url(Endpoint::Analyze))
            .set("Content-Type", "application/json")
            .send_json(&body);

        let parsed: AnalyzeResponse = read_json(Endpoint::Analyze, response)?;
        Ok(parsed.token)
    }

    /// An anonymous user is queried as `email=` (empty), never the literal `null`.
    fn history(&self, identity: &Identity) -> Result<Vec<String>, AnalysisError> {
        let response = self
            .agent
            .get(&self.url(Endpoint::History))
            .set("Content-Type", "application/json")
            .query("email", identity.email().unwrap_or_default())
            .call();

        read_json(Endpoint::History, response)
    }
}

/// Map a `ureq` outcome to the response body decoded as `T`.
fn read_json<T: DeserializeOwned>(
    endpoint: Endpoint,
    response: Result<ureq::Response, ureq::Error>,
) -> Result<T, AnalysisError> {
    let response = match response {
        Ok(response) => response,
        Err(ureq::Error::Status(status, _)) => {
            return Err(AnalysisError::HttpStatus { endpoint, status });
        }
        Err(ureq::Error::Transport(err)) => {
            return Err(AnalysisError::Network(err.to_string()));
        }
    };

    let bytes = read_body_limited(response)?;
    serde_json::from_slice(&bytes).map_err(|e| AnalysisError::Parse(e.to_string()))
}

fn read_body_limited(response: ureq::Response) -> Result<Vec<u8>, AnalysisError> {
    let mut limited = response
        .into_reader()
        .take(MAX_RESPONSE_BYTES as u64 + 1);
    let mut bytes = Vec::new();
    limited
        .read_to_end(&mut bytes)
        .map_err(|e| AnalysisError::Network(e.to_string()))?;
    if bytes.len() > MAX_RESPONSE_BYTES {
        return Err(AnalysisError::Parse(format!(
            "response exceeded {MAX_RESPONSE_BYTES} bytes"
        )));
    }
    Ok(bytes)
}

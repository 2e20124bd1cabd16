use std::fmt;

/// The two remote endpoints the screen talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Analyze,
    History,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Analyze => "/api/auth/analyze",
            Endpoint::History => "/api/auth/history",
        }
    }

    fn failure(&self) -> &'static str {
        match self {
            Endpoint::Analyze => "Failed to analyze text.",
            Endpoint::History => "Failed to retrieve history.",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Every way a submission or history load can fail.
///
/// All variants surface to the user the same way: as a single line of text
/// replacing the previous error message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Text cannot be empty.")]
    EmptyInput,
    #[error("Network error: {0}")]
    Network(String),
    #[error("{} (HTTP {status})", endpoint.failure())]
    HttpStatus { endpoint: Endpoint, status: u16 },
    #[error("Invalid response: {0}")]
    Parse(String),
}

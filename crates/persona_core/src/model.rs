//! Data types shared by the analysis screen, the HTTP client and the front end.

use serde::{Deserialize, Serialize};

/// Label shown for history entries that came back from the server without a result.
pub const NO_RESULT: &str = "No result";

/// One row of the history list.
///
/// Entries loaded from the server only carry the submitted text, so `result`
/// is empty for them. Entries created by a successful submission carry the
/// token returned by the analyze endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    #[serde(default)]
    pub result: String,
}

impl HistoryEntry {
    pub fn new(text: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            result: result.into(),
        }
    }

    /// Entry as returned by the history endpoint (text only).
    pub fn from_server(text: impl Into<String>) -> Self {
        Self::new(text, String::new())
    }

    pub fn has_result(&self) -> bool {
        !self.result.is_empty()
    }

    /// The result as rendered in the history list.
    pub fn display_result(&self) -> &str {
        if self.has_result() {
            &self.result
        } else {
            NO_RESULT
        }
    }
}

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub text: String,
    pub result: String,
}

impl From<AnalysisOutcome> for HistoryEntry {
    fn from(outcome: AnalysisOutcome) -> Self {
        HistoryEntry {
            text: outcome.text,
            result: outcome.result,
        }
    }
}

/// The two sub-views of the analysis screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Analyze,
    History,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Analyze, Page::History];

    pub fn name(&self) -> &'static str {
        match self {
            Page::Analyze => "Find Personality",
            Page::History => "History",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Page::Analyze => 0,
            Page::History => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Page::Analyze),
            1 => Some(Page::History),
            _ => None,
        }
    }

    /// The page after this one, wrapping around.
    pub fn next(&self) -> Self {
        Self::from_index((self.index() + 1) % Self::ALL.len()).unwrap_or_default()
    }
}

/// The signed-in user, passed explicitly into every network flow.
///
/// An anonymous identity is valid: the analyze request then carries a `null`
/// email and the history request an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Identity {
    email: Option<String>,
}

impl Identity {
    pub fn new(email: impl Into<String>) -> Self {
        let email = email.into();
        if email.trim().is_empty() {
            Self::anonymous()
        } else {
            Self { email: Some(email) }
        }
    }

    pub fn anonymous() -> Self {
        Self { email: None }
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.email.is_none()
    }
}

impl From<Option<String>> for Identity {
    fn from(email: Option<String>) -> Self {
        email.map(Identity::new).unwrap_or_default()
    }
}

//! Behaviour tests for the analysis screen
//!
//! Tests are organized by topic:
//! - `submission` - Validation, analyze success and failure side effects
//! - `history` - One-shot history load, normalization and merge policies
//! - `navigation` - Modal state machine, page switching, logout and unmount

mod history;

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::api::AnalysisApi;
use crate::error::{AnalysisError, Endpoint};
use crate::model::Identity;
use crate::screen::{AnalysisScreen, ScreenOptions};

/// Scripted [`AnalysisApi`] returning queued answers and counting calls.
#[derive(Default)]
pub(crate) struct FakeApi {
    analyze: Mutex<VecDeque<Result<String, AnalysisError>>>,
    history: Mutex<VecDeque<Result<Vec<String>, AnalysisError>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(self, token: &str) -> Self {
        self.analyze.lock().unwrap().push_back(Ok(token.to_string()));
        self
    }

    pub fn with_analyze_error(self, err: AnalysisError) -> Self {
        self.analyze.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn with_history(self, texts: &[&str]) -> Self {
        self.history
            .lock()
            .unwrap()
            .push_back(Ok(texts.iter().map(|s| s.to_string()).collect()));
        self
    }

    pub fn with_history_error(self, err: AnalysisError) -> Self {
        self.history.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl AnalysisApi for FakeApi {
    fn analyze(&self, text: &str, _identity: &Identity) -> Result<String, AnalysisError> {
        self.calls.lock().unwrap().push(format!("analyze:{text}"));
        self.analyze
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(AnalysisError::Network("no scripted answer".into())))
    }

    fn history(&self, _identity: &Identity) -> Result<Vec<String>, AnalysisError> {
        self.calls.lock().unwrap().push("history".to_string());
        self.history
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(AnalysisError::Network("no scripted answer".into())))
    }
}

pub(crate) fn identity() -> Identity {
    Identity::new("user@example.com")
}

pub(crate) fn server_error(endpoint: Endpoint) -> AnalysisError {
    AnalysisError::HttpStatus {
        endpoint,
        status: 500,
    }
}

/// Run a full submission of `text` against `api`. Returns whether a request
/// was dispatched.
pub(crate) fn submit(screen: &mut AnalysisScreen, api: &FakeApi, text: &str) -> bool {
    screen.set_input(text);
    match screen.begin_submit(&identity()) {
        Ok(ticket) => {
            assert!(screen.is_busy());
            let result = api.analyze(&ticket.text, &ticket.identity);
            screen.finish_submit(ticket.id, result);
            true
        }
        Err(_) => false,
    }
}

/// Mount the screen and complete the history load against `api`.
pub(crate) fn mount(screen: &mut AnalysisScreen, api: &FakeApi) {
    let ticket = screen.mount(&identity()).expect("first mount loads history");
    let result = api.history(&ticket.identity);
    screen.finish_history(ticket.id, result);
}

pub(crate) fn screen() -> AnalysisScreen {
    AnalysisScreen::new(ScreenOptions::default())
}

//! State store for the analysis screen.
//!
//! [`AnalysisScreen`] owns everything the screen shows: the pending input, the
//! history list, the open modal, the last error and the status of the two
//! network flows. It never performs I/O itself. Callers start a flow with
//! `begin_*`, run the returned ticket against an [`AnalysisApi`], and feed the
//! result back through `finish_*`.
//!
//! [`AnalysisApi`]: crate::api::AnalysisApi

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::flow::{Flow, FlowStatus, RequestId, RequestIds, Resolution};
use crate::model::{AnalysisOutcome, HistoryEntry, Identity, Page};

/// How a completed history load combines with the local list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryMerge {
    /// The server list replaces the local list wholesale, including entries
    /// submitted while the load was in flight.
    #[default]
    Replace,
    /// The server list replaces the local list, then entries submitted while
    /// the load was in flight are appended again.
    KeepSubmitted,
}

/// What logging out does to the in-memory screen state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoutPolicy {
    /// Cancel pending flows and clear input, history, modals and errors.
    #[default]
    Reset,
    /// Leave the state untouched; logout is only a navigation signal.
    Keep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScreenOptions {
    #[serde(default)]
    pub history_merge: HistoryMerge,
    #[serde(default)]
    pub logout_policy: LogoutPolicy,
}

/// A submission that passed validation and must be sent to the analyze endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeTicket {
    pub id: RequestId,
    pub text: String,
    pub identity: Identity,
}

/// A history load that must be sent to the history endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryTicket {
    pub id: RequestId,
    pub identity: Identity,
}

/// The overlay currently shown on top of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalView<'a> {
    Idle,
    SelectedHistory(&'a HistoryEntry),
    FreshResult(&'a AnalysisOutcome),
}

impl<'a> ModalView<'a> {
    pub fn is_open(&self) -> bool {
        !matches!(self, ModalView::Idle)
    }

    /// `(result, text)` of the entry being shown.
    pub fn content(self) -> Option<(&'a str, &'a str)> {
        match self {
            ModalView::Idle => None,
            ModalView::SelectedHistory(entry) => Some((&entry.result, &entry.text)),
            ModalView::FreshResult(outcome) => Some((&outcome.result, &outcome.text)),
        }
    }
}

/// Returned by [`AnalysisScreen::logout`] for the caller to navigate away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutSignal {
    pub policy: LogoutPolicy,
    /// Requests whose results will now be discarded.
    pub cancelled: Vec<RequestId>,
}

#[derive(Debug, Default)]
pub struct AnalysisScreen {
    options: ScreenOptions,
    ids: RequestIds,

    input: String,
    history: Vec<HistoryEntry>,
    selected: Option<HistoryEntry>,
    fresh_result: Option<AnalysisOutcome>,
    error: Option<String>,
    page: Page,

    submit: Flow,
    /// Text of the submission in flight; becomes the outcome's `text`.
    submitted_text: String,
    history_load: Flow,
    /// Entries added by submissions while a history load is in flight.
    submitted_during_load: Vec<HistoryEntry>,

    mounted: bool,
    history_requested: bool,
}

impl AnalysisScreen {
    pub fn new(options: ScreenOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn options(&self) -> ScreenOptions {
        self.options
    }

    // ========== Lifetime ==========

    /// Make the screen visible. The first mount after construction (or after
    /// [`AnalysisScreen::unmount`]) starts the one-shot history load.
    pub fn mount(&mut self, identity: &Identity) -> Option<HistoryTicket> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        self.history_requested = false;
        self.begin_history_load(identity)
    }

    /// Hide the screen. Pending flows are cancelled and their late results
    /// will be discarded.
    pub fn unmount(&mut self) -> Vec<RequestId> {
        self.mounted = false;
        let cancelled: Vec<RequestId> = [self.submit.cancel(), self.history_load.cancel()]
            .into_iter()
            .flatten()
            .collect();
        if !cancelled.is_empty() {
            tracing::info!(?cancelled, "Cancelled pending requests on unmount");
        }
        self.submitted_during_load.clear();
        cancelled
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // ========== Input ==========

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    // ========== Submission flow ==========

    /// Validate the current input and mark the submit flow pending.
    ///
    /// Blank input fails with [`AnalysisError::EmptyInput`], records the error
    /// message and dispatches nothing.
    pub fn begin_submit(&mut self, identity: &Identity) -> Result<AnalyzeTicket, AnalysisError> {
        if self.input.trim().is_empty() {
            let err = AnalysisError::EmptyInput;
            self.error = Some(err.to_string());
            return Err(err);
        }

        let id = self.ids.next_id();
        self.error = None;
        self.submit.dispatch(id);
        self.submitted_text = self.input.clone();
        tracing::info!(
            request = %id,
            chars = self.input.chars().count(),
            "Submitting text for analysis"
        );

        Ok(AnalyzeTicket {
            id,
            text: self.input.clone(),
            identity: identity.clone(),
        })
    }

    /// Apply the analyze endpoint's answer (the `token` field) for request `id`.
    pub fn finish_submit(
        &mut self,
        id: RequestId,
        result: Result<String, AnalysisError>,
    ) -> Resolution {
        let resolution = self.submit.resolve(id, result.is_ok());
        if !resolution.is_applied() {
            tracing::debug!(request = %id, "Discarding stale analyze response");
            return resolution;
        }

        let text = std::mem::take(&mut self.submitted_text);
        match result {
            Ok(token) => {
                tracing::info!(request = %id, result = %token, "Analysis completed");
                let outcome = AnalysisOutcome {
                    text,
                    result: token,
                };
                let entry = HistoryEntry::from(outcome.clone());
                if self.history_load.is_pending() {
                    self.submitted_during_load.push(entry.clone());
                }
                self.history.push(entry);
                self.fresh_result = Some(outcome);
                self.input.clear();
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(request = %id, error = %err, "Analysis failed");
                self.error = Some(err.to_string());
            }
        }
        resolution
    }

    // ========== History flow ==========

    /// Start the history load unless it already ran for this mount.
    pub fn begin_history_load(&mut self, identity: &Identity) -> Option<HistoryTicket> {
        if self.history_requested {
            return None;
        }
        self.history_requested = true;

        let id = self.ids.next_id();
        self.history_load.dispatch(id);
        self.submitted_during_load.clear();
        tracing::info!(request = %id, "Loading history");

        Some(HistoryTicket {
            id,
            identity: identity.clone(),
        })
    }

    /// Apply the history endpoint's answer for request `id`.
    pub fn finish_history(
        &mut self,
        id: RequestId,
        result: Result<Vec<String>, AnalysisError>,
    ) -> Resolution {
        let resolution = self.history_load.resolve(id, result.is_ok());
        if !resolution.is_applied() {
            tracing::debug!(request = %id, "Discarding stale history response");
            return resolution;
        }

        let submitted = std::mem::take(&mut self.submitted_during_load);
        match result {
            Ok(texts) => {
                let mut history: Vec<HistoryEntry> =
                    texts.into_iter().map(HistoryEntry::from_server).collect();
                tracing::info!(request = %id, entries = history.len(), "History loaded");
                if self.options.history_merge == HistoryMerge::KeepSubmitted {
                    history.extend(submitted);
                } else if !submitted.is_empty() {
                    tracing::debug!(
                        dropped = submitted.len(),
                        "History load replaced entries submitted while it was pending"
                    );
                }
                self.history = history;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(request = %id, error = %err, "History load failed");
                self.error = Some(err.to_string());
            }
        }
        resolution
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    // ========== Selection / modal ==========

    /// Show the history row at `index`. Replaces any entry already shown.
    pub fn select_history(&mut self, index: usize) -> bool {
        match self.history.get(index) {
            Some(entry) => {
                self.selected = Some(entry.clone());
                true
            }
            None => false,
        }
    }

    /// Close the overlay. Clears both the selected entry and the fresh result.
    pub fn close_modal(&mut self) {
        self.selected = None;
        self.fresh_result = None;
    }

    pub fn modal(&self) -> ModalView<'_> {
        match (&self.fresh_result, &self.selected) {
            (Some(outcome), _) => ModalView::FreshResult(outcome),
            (None, Some(entry)) => ModalView::SelectedHistory(entry),
            (None, None) => ModalView::Idle,
        }
    }

    pub fn selected(&self) -> Option<&HistoryEntry> {
        self.selected.as_ref()
    }

    pub fn fresh_result(&self) -> Option<&AnalysisOutcome> {
        self.fresh_result.as_ref()
    }

    // ========== Navigation ==========

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn switch_page(&mut self, page: Page) {
        self.page = page;
    }

    /// Apply the configured [`LogoutPolicy`] and return the navigation signal.
    pub fn logout(&mut self) -> LogoutSignal {
        let policy = self.options.logout_policy;
        let cancelled = match policy {
            LogoutPolicy::Keep => Vec::new(),
            LogoutPolicy::Reset => {
                let cancelled = self.unmount();
                *self = Self {
                    options: self.options,
                    ids: std::mem::take(&mut self.ids),
                    ..Default::default()
                };
                cancelled
            }
        };
        tracing::info!(?policy, "Logged out");
        LogoutSignal { policy, cancelled }
    }

    // ========== Status ==========

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn submit_status(&self) -> FlowStatus {
        self.submit.status()
    }

    pub fn history_status(&self) -> FlowStatus {
        self.history_load.status()
    }

    /// True while at least one flow is waiting on the network.
    pub fn is_busy(&self) -> bool {
        self.submit.is_pending() || self.history_load.is_pending()
    }
}

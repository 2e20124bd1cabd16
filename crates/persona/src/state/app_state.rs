use persona_core::{AnalysisScreen, Identity, LogoutSignal, Page, ScreenOptions};

use crate::worker::{ApiRequest, ApiResponse};

/// Why the event loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Quit,
    Logout,
}

/// Everything the terminal front end renders and mutates.
///
/// Key handlers never talk to the network: they queue [`ApiRequest`]s which
/// the app hands to the worker after the event is processed.
#[derive(Debug)]
pub struct AppState {
    pub screen: AnalysisScreen,
    pub identity: Identity,
    /// Highlighted row on the history page
    pub history_cursor: usize,
    pub exit: Option<ExitReason>,
    pending_requests: Vec<ApiRequest>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ScreenOptions::default(), Identity::anonymous())
    }
}

impl AppState {
    pub fn new(options: ScreenOptions, identity: Identity) -> Self {
        Self {
            screen: AnalysisScreen::new(options),
            identity,
            history_cursor: 0,
            exit: None,
            pending_requests: Vec::new(),
        }
    }

    /// Show the screen, queueing the one-shot history load.
    pub fn mount(&mut self) {
        if let Some(ticket) = self.screen.mount(&self.identity) {
            self.pending_requests.push(ApiRequest::History(ticket));
        }
    }

    /// Submit the current input. Ignored while a submission is in flight,
    /// like a disabled submit button.
    pub fn submit(&mut self) {
        if self.screen.submit_status().is_pending() {
            return;
        }
        if let Ok(ticket) = self.screen.begin_submit(&self.identity) {
            self.pending_requests.push(ApiRequest::Analyze(ticket));
        }
    }

    pub fn take_pending_requests(&mut self) -> Vec<ApiRequest> {
        std::mem::take(&mut self.pending_requests)
    }

    pub fn apply_response(&mut self, response: ApiResponse) {
        match response {
            ApiResponse::Analyzed { id, result } => {
                self.screen.finish_submit(id, result);
            }
            ApiResponse::HistoryLoaded { id, result } => {
                self.screen.finish_history(id, result);
            }
        }
        self.clamp_cursor();
    }

    pub fn switch_page(&mut self, page: Page) {
        self.screen.switch_page(page);
    }

    pub fn next_page(&mut self) {
        self.screen.switch_page(self.screen.page().next());
    }

    pub fn cursor_up(&mut self) {
        self.history_cursor = self.history_cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.history_cursor + 1 < self.screen.history().len() {
            self.history_cursor += 1;
        }
    }

    pub fn open_selected(&mut self) {
        self.screen.select_history(self.history_cursor);
    }

    pub fn logout(&mut self) -> LogoutSignal {
        let signal = self.screen.logout();
        self.pending_requests.clear();
        self.clamp_cursor();
        self.exit = Some(ExitReason::Logout);
        signal
    }

    pub fn quit(&mut self) {
        self.exit = Some(ExitReason::Quit);
    }

    /// Busy indicator text, one per pending flow.
    pub fn busy_label(&self) -> Option<&'static str> {
        match (
            self.screen.submit_status().is_pending(),
            self.screen.history_status().is_pending(),
        ) {
            (true, true) => Some("Analyzing... (loading history)"),
            (true, false) => Some("Analyzing..."),
            (false, true) => Some("Loading history..."),
            (false, false) => None,
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.screen.history().len();
        if self.history_cursor >= len {
            self.history_cursor = len.saturating_sub(1);
        }
    }
}

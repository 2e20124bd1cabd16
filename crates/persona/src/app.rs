use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use persona_core::{AnalysisApi, HttpApi, Identity, Page};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::components::{Component, EventResult, status_bar::StatusBar, tab_bar::TabBar};
use crate::config::AppConfig;
use crate::modals::{ModalResult, handle_modal_key, render_modal};
use crate::screens::{analyze::AnalyzeScreen, history::HistoryScreen};
use crate::state::{AppState, ExitReason};
use crate::worker::ApiWorker;

/// How long to wait for a key before checking the worker again
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct App {
    state: AppState,
    worker: ApiWorker,
    tab_bar: TabBar,
    status_bar: StatusBar,
    analyze_screen: AnalyzeScreen,
    history_screen: HistoryScreen,
}

impl App {
    pub fn new(config: &AppConfig, identity: Identity) -> Self {
        let api = HttpApi::new(config.base_url.clone(), config.timeout());
        tracing::info!(
            base_url = api.base_url(),
            anonymous = identity.is_anonymous(),
            "Creating app"
        );
        Self::with_api(config, identity, Arc::new(api))
    }

    /// Create the app against any [`AnalysisApi`] implementation.
    pub fn with_api(config: &AppConfig, identity: Identity, api: Arc<dyn AnalysisApi>) -> Self {
        Self {
            state: AppState::new(config.screen_options(), identity),
            worker: ApiWorker::new(api),
            tab_bar: TabBar,
            status_bar: StatusBar,
            analyze_screen: AnalyzeScreen,
            history_screen: HistoryScreen,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

impl App {
    /// runs the application's main loop until the user quits or logs out
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<ExitReason> {
        self.mount();

        let reason = loop {
            terminal.draw(|frame| self.draw(frame))?;
            self.process_worker_responses();
            self.handle_events()?;
            self.dispatch_pending_requests();

            if let Some(reason) = self.state.exit {
                break reason;
            }
        };

        if reason == ExitReason::Quit {
            self.state.screen.unmount();
        }
        Ok(reason)
    }

    /// Show the screen and start the history load.
    pub fn mount(&mut self) {
        self.state.mount();
        self.dispatch_pending_requests();
    }

    pub(crate) fn draw(&mut self, frame: &mut Frame) {
        // Create main layout: tab bar, content, status bar
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tab bar
                Constraint::Min(0),    // Content
                Constraint::Length(2), // Status bar
            ])
            .split(frame.area());

        self.tab_bar.render(frame, chunks[0], &self.state);
        self.render_active_screen(frame, chunks[1]);
        self.status_bar.render(frame, chunks[2], &self.state);

        // Render modal overlay (if active)
        render_modal(frame, &self.state);
    }

    fn render_active_screen(&mut self, frame: &mut Frame, area: Rect) {
        match self.state.screen.page() {
            Page::Analyze => self.analyze_screen.render(frame, area, &self.state),
            Page::History => self.history_screen.render(frame, area, &self.state),
        }
    }

    fn handle_events(&mut self) -> io::Result<()> {
        if !event::poll(POLL_INTERVAL)? {
            return Ok(());
        }
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event)
            }
            _ => {}
        };
        Ok(())
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        // Handle modal first if active
        if self.state.screen.modal().is_open() {
            match handle_modal_key(key_event, &mut self.state) {
                ModalResult::Closed => {
                    tracing::debug!(page = self.state.screen.page().name(), "Modal closed");
                }
                ModalResult::Continue => {}
            }
            return;
        }

        // Global key bindings
        match key_event.code {
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.quit();
                return;
            }
            KeyCode::Esc => {
                self.state.screen.clear_error();
                return;
            }
            _ => {}
        }

        // Try tab bar first
        let result = self.tab_bar.handle_key(key_event, &mut self.state);
        if result != EventResult::NotHandled {
            return;
        }

        // Then try active screen
        let result = match self.state.screen.page() {
            Page::Analyze => self.analyze_screen.handle_key(key_event, &mut self.state),
            Page::History => self.history_screen.handle_key(key_event, &mut self.state),
        };

        if result == EventResult::Exit {
            self.state.quit();
        }
    }

    /// Apply every response the worker has ready.
    pub fn process_worker_responses(&mut self) {
        while let Some(response) = self.worker.try_recv() {
            self.state.apply_response(response);
        }
    }

    /// Hand requests queued by key handlers to the worker.
    pub fn dispatch_pending_requests(&mut self) {
        for request in self.state.take_pending_requests() {
            if !self.worker.send(request) {
                tracing::error!("API worker is not running, dropping request");
            }
        }
    }

    /// Block until a worker response arrives (or `timeout` passes) and apply it.
    pub fn wait_for_response(&mut self, timeout: Duration) -> bool {
        match self.worker.recv_timeout(timeout) {
            Some(response) => {
                self.state.apply_response(response);
                true
            }
            None => false,
        }
    }
}

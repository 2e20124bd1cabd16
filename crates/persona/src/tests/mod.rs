//! End-to-end tests for the terminal front end
//!
//! Drive [`App`] with key events against a scripted API, wait for the worker
//! and inspect what is rendered to a [`TestBackend`].

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use persona_core::{AnalysisApi, AnalysisError, Endpoint, Identity, LogoutPolicy, Page};
use ratatui::{Frame, Terminal, backend::TestBackend};

use crate::app::App;
use crate::config::AppConfig;
use crate::modals::render_result_modal;
use crate::state::ExitReason;

const WAIT: Duration = Duration::from_secs(5);

struct ScriptedApi {
    token: Result<String, AnalysisError>,
    history: Result<Vec<String>, AnalysisError>,
    seen: Mutex<Vec<(String, Option<String>)>>,
}

impl ScriptedApi {
    fn new(token: &str, history: &[&str]) -> Self {
        Self {
            token: Ok(token.to_string()),
            history: Ok(history.iter().map(|s| s.to_string()).collect()),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl AnalysisApi for ScriptedApi {
    fn analyze(&self, text: &str, identity: &Identity) -> Result<String, AnalysisError> {
        self.seen
            .lock()
            .unwrap()
            .push((text.to_string(), identity.email().map(str::to_string)));
        self.token.clone()
    }

    fn history(&self, _identity: &Identity) -> Result<Vec<String>, AnalysisError> {
        self.history.clone()
    }
}

fn app_with(api: Arc<ScriptedApi>, config: &AppConfig) -> App {
    let mut app = App::with_api(config, Identity::new("me@example.com"), api);
    app.mount();
    assert!(app.wait_for_response(WAIT), "history load should answer");
    app
}

fn press(app: &mut App, code: KeyCode) {
    press_with(app, code, KeyModifiers::NONE);
}

fn press_with(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    app.handle_key_event(KeyEvent::new(code, modifiers));
    app.dispatch_pending_requests();
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn render(app: &mut App) -> String {
    render_frame(|frame| app.draw(frame))
}

fn render_frame(draw: impl FnOnce(&mut Frame)) -> String {
    let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
    terminal.draw(draw).unwrap();

    let buffer = terminal.backend().buffer();
    let area = buffer.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn submitting_text_shows_result_modal_and_clears_input() {
    let api = Arc::new(ScriptedApi::new("INTJ", &[]));
    let mut app = app_with(api.clone(), &AppConfig::default());

    type_text(&mut app, "I love systems design");
    assert_eq!(app.state().screen.input(), "I love systems design");

    press(&mut app, KeyCode::Enter);
    assert!(app.wait_for_response(WAIT));

    assert_eq!(app.state().screen.input(), "");
    let screen = render(&mut app);
    assert!(screen.contains("Result: INTJ"), "{screen}");
    assert!(screen.contains("I love systems design"), "{screen}");
    assert_eq!(
        api.seen.lock().unwrap().as_slice(),
        &[(
            "I love systems design".to_string(),
            Some("me@example.com".to_string())
        )]
    );

    press(&mut app, KeyCode::Esc);
    assert!(!app.state().screen.modal().is_open());
    assert!(!render(&mut app).contains("Result: INTJ"));
}

#[test]
fn history_page_lists_server_entries_without_result() {
    let api = Arc::new(ScriptedApi::new("INTJ", &["hello", "world"]));
    let mut app = app_with(api, &AppConfig::default());

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.state().screen.page(), Page::History);

    let screen = render(&mut app);
    assert!(screen.contains("hello"), "{screen}");
    assert!(screen.contains("world"), "{screen}");
    assert_eq!(screen.matches("No result").count(), 2, "{screen}");

    // Opening a row shows it in the modal
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Enter);
    let screen = render(&mut app);
    assert!(screen.contains("Result: "), "{screen}");
    assert_eq!(app.state().screen.modal().content(), Some(("", "world")));
}

#[test]
fn blank_submission_shows_inline_error_without_request() {
    let api = Arc::new(ScriptedApi::new("INTJ", &[]));
    let mut app = app_with(api.clone(), &AppConfig::default());

    type_text(&mut app, "   ");
    press(&mut app, KeyCode::Enter);

    assert!(!app.wait_for_response(Duration::from_millis(100)));
    assert!(api.seen.lock().unwrap().is_empty());
    let screen = render(&mut app);
    assert!(screen.contains("Error: Text cannot be empty."), "{screen}");
}

#[test]
fn failed_history_load_shows_error() {
    let api = Arc::new(ScriptedApi {
        token: Ok("INTJ".into()),
        history: Err(AnalysisError::HttpStatus {
            endpoint: Endpoint::History,
            status: 502,
        }),
        seen: Mutex::new(Vec::new()),
    });
    let mut app = app_with(api, &AppConfig::default());

    press(&mut app, KeyCode::Char('2'));
    // Digits are input on the analyze page
    assert_eq!(app.state().screen.page(), Page::Analyze);
    press_with(&mut app, KeyCode::Char('2'), KeyModifiers::ALT);
    assert_eq!(app.state().screen.page(), Page::History);

    let screen = render(&mut app);
    assert!(screen.contains("Failed to retrieve history. (HTTP 502)"), "{screen}");
    assert!(screen.contains("No submissions yet."), "{screen}");
}

#[test]
fn logout_resets_state_and_exits() {
    let api = Arc::new(ScriptedApi::new("INTJ", &["hello"]));
    let mut app = app_with(api, &AppConfig::default());
    type_text(&mut app, "draft");

    press_with(&mut app, KeyCode::Char('l'), KeyModifiers::CONTROL);

    assert_eq!(app.state().exit, Some(ExitReason::Logout));
    assert!(app.state().screen.history().is_empty());
    assert_eq!(app.state().screen.input(), "");
}

#[test]
fn logout_keep_policy_leaves_state() {
    let api = Arc::new(ScriptedApi::new("INTJ", &["hello"]));
    let config = AppConfig {
        logout_policy: LogoutPolicy::Keep,
        ..Default::default()
    };
    let mut app = app_with(api, &config);
    type_text(&mut app, "draft");

    press_with(&mut app, KeyCode::Char('l'), KeyModifiers::CONTROL);

    assert_eq!(app.state().exit, Some(ExitReason::Logout));
    assert_eq!(app.state().screen.history().len(), 1);
    assert_eq!(app.state().screen.input(), "draft");
}

#[test]
fn q_quits_from_history_but_types_on_analyze() {
    let api = Arc::new(ScriptedApi::new("INTJ", &[]));
    let mut app = app_with(api, &AppConfig::default());

    press(&mut app, KeyCode::Char('q'));
    assert_eq!(app.state().screen.input(), "q");
    assert_eq!(app.state().exit, None);

    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Char('q'));
    assert_eq!(app.state().exit, Some(ExitReason::Quit));
}

#[test]
fn result_modal_shows_every_line_of_multiline_text() {
    let text: String = (1..=8)
        .map(|i| format!("line{i}"))
        .collect::<Vec<_>>()
        .join("\n");
    let screen = render_frame(|frame| render_result_modal(frame, "INTJ", &text));

    assert!(screen.contains("Result: INTJ"), "{screen}");
    for i in 1..=8 {
        assert!(screen.contains(&format!("line{i}")), "line{i} missing:\n{screen}");
    }
}

#[test]
fn result_modal_with_huge_text_fits_the_screen() {
    let text = "word\n".repeat(70_000);
    let screen = render_frame(|frame| render_result_modal(frame, "INTJ", &text));

    assert!(screen.contains("Result: INTJ"), "{screen}");
    assert!(screen.contains("word"), "{screen}");
}

#[test]
fn keys_other_than_close_do_not_reach_the_input_under_a_modal() {
    let api = Arc::new(ScriptedApi::new("INTJ", &[]));
    let mut app = app_with(api, &AppConfig::default());

    type_text(&mut app, "hello");
    press(&mut app, KeyCode::Enter);
    assert!(app.wait_for_response(WAIT));
    assert!(app.state().screen.modal().is_open());

    type_text(&mut app, "ab");
    assert_eq!(app.state().screen.input(), "");
    assert!(app.state().screen.modal().is_open());

    press(&mut app, KeyCode::Char('x'));
    assert!(!app.state().screen.modal().is_open());
}

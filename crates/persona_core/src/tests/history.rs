//! History flow tests
//!
//! The load runs once per mount, normalizes server strings into entries and
//! either replaces or merges with entries submitted while it was in flight.

use super::*;
use crate::flow::{FlowStatus, Resolution};
use crate::model::HistoryEntry;
use crate::screen::HistoryMerge;

#[test]
fn server_strings_become_entries_without_result() {
    let api = FakeApi::new().with_history(&["hello", "world"]);
    let mut screen = screen();
    mount(&mut screen, &api);

    assert_eq!(
        screen.history(),
        &[
            HistoryEntry::from_server("hello"),
            HistoryEntry::from_server("world")
        ]
    );
    let rows: Vec<(&str, &str)> = screen
        .history()
        .iter()
        .map(|e| (e.text.as_str(), e.display_result()))
        .collect();
    assert_eq!(rows, vec![("hello", "No result"), ("world", "No result")]);
    assert_eq!(screen.history_status(), FlowStatus::Succeeded);
    assert!(!screen.is_busy());
}

#[test]
fn preserves_order_and_count_of_server_list() {
    let texts: Vec<String> = (0..25).map(|i| format!("entry {i}")).collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    let api = FakeApi::new().with_history(&refs);
    let mut screen = screen();
    mount(&mut screen, &api);

    assert_eq!(screen.history().len(), 25);
    for (entry, text) in screen.history().iter().zip(&texts) {
        assert_eq!(&entry.text, text);
        assert_eq!(entry.result, "");
    }
}

#[test]
fn loads_only_once_per_mount() {
    let api = FakeApi::new().with_history(&["a"]);
    let mut screen = screen();
    mount(&mut screen, &api);

    assert!(screen.mount(&identity()).is_none());
    assert!(screen.begin_history_load(&identity()).is_none());
    screen.switch_page(crate::model::Page::History);
    assert!(screen.begin_history_load(&identity()).is_none());
    assert_eq!(api.call_count(), 1);
}

#[test]
fn failure_keeps_existing_list_and_sets_error() {
    let api = FakeApi::new().with_history_error(server_error(Endpoint::History));
    let mut screen = screen();
    mount(&mut screen, &api);

    assert!(screen.history().is_empty());
    assert_eq!(
        screen.error(),
        Some("Failed to retrieve history. (HTTP 500)")
    );
    assert_eq!(screen.history_status(), FlowStatus::Failed);
    assert!(!screen.is_busy());
}

#[test]
fn success_clears_previous_error() {
    let mut screen = screen();
    screen.set_input("");
    assert!(screen.begin_submit(&identity()).is_err());
    assert!(screen.error().is_some());

    let ticket = screen.mount(&identity()).unwrap();
    screen.finish_history(ticket.id, Ok(vec!["x".into()]));
    assert_eq!(screen.error(), None);
}

#[test]
fn busy_while_either_flow_is_pending() {
    let mut screen = screen();
    let history = screen.mount(&identity()).unwrap();
    assert!(screen.is_busy());

    screen.set_input("text");
    let submit = screen.begin_submit(&identity()).unwrap();
    assert!(screen.submit_status().is_pending());
    assert!(screen.history_status().is_pending());

    screen.finish_history(history.id, Ok(vec![]));
    assert!(screen.is_busy());
    assert!(!screen.history_status().is_pending());

    screen.finish_submit(submit.id, Ok("T".into()));
    assert!(!screen.is_busy());
}

#[test]
fn replace_policy_drops_entries_submitted_during_load() {
    let mut screen = screen();
    let history = screen.mount(&identity()).unwrap();

    screen.set_input("mine");
    let submit = screen.begin_submit(&identity()).unwrap();
    screen.finish_submit(submit.id, Ok("INTJ".into()));
    assert_eq!(screen.history().len(), 1);

    let resolution = screen.finish_history(history.id, Ok(vec!["hello".into(), "world".into()]));
    assert_eq!(resolution, Resolution::Applied);
    assert_eq!(
        screen.history(),
        &[
            HistoryEntry::from_server("hello"),
            HistoryEntry::from_server("world")
        ]
    );
}

#[test]
fn keep_submitted_policy_appends_entries_submitted_during_load() {
    let mut screen = AnalysisScreen::new(ScreenOptions {
        history_merge: HistoryMerge::KeepSubmitted,
        ..Default::default()
    });
    let history = screen.mount(&identity()).unwrap();

    screen.set_input("mine");
    let submit = screen.begin_submit(&identity()).unwrap();
    screen.finish_submit(submit.id, Ok("INTJ".into()));

    screen.finish_history(history.id, Ok(vec!["hello".into()]));
    assert_eq!(
        screen.history(),
        &[
            HistoryEntry::from_server("hello"),
            HistoryEntry::new("mine", "INTJ")
        ]
    );
}

#[test]
fn keep_submitted_policy_ignores_entries_from_before_the_load() {
    let mut screen = AnalysisScreen::new(ScreenOptions {
        history_merge: HistoryMerge::KeepSubmitted,
        ..Default::default()
    });
    screen.set_input("early");
    let submit = screen.begin_submit(&identity()).unwrap();
    screen.finish_submit(submit.id, Ok("ISFP".into()));

    let history = screen.mount(&identity()).unwrap();
    screen.finish_history(history.id, Ok(vec!["server".into()]));
    assert_eq!(screen.history(), &[HistoryEntry::from_server("server")]);
}

#[test]
fn stale_history_response_is_discarded() {
    let mut screen = screen();
    let history = screen.mount(&identity()).unwrap();
    screen.unmount();

    let resolution = screen.finish_history(history.id, Ok(vec!["late".into()]));
    assert_eq!(resolution, Resolution::Stale);
    assert!(screen.history().is_empty());
    assert_eq!(screen.history_status(), FlowStatus::Idle);
}

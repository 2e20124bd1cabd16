use super::{Component, EventResult};
use crate::state::AppState;
use crossterm::event::KeyEvent;
use persona_core::Page;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct StatusBar;

impl StatusBar {
    fn help_text(state: &AppState) -> &'static str {
        if state.screen.modal().is_open() {
            return "Enter/Esc: close";
        }
        match state.screen.page() {
            Page::Analyze => "type to edit | Enter: submit | Tab: history | Ctrl+L: log out | Ctrl+C: quit",
            Page::History => "j/k: navigate | Enter: open | Tab/1-2: switch | Ctrl+L: log out | q: quit",
        }
    }
}

impl Component for StatusBar {
    fn handle_key(&mut self, _key: KeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let mut spans = Vec::new();
        if let Some(label) = state.busy_label() {
            spans.push(Span::styled(
                format!("{label} "),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        spans.push(Span::styled(
            Self::help_text(state),
            Style::default().fg(Color::DarkGray),
        ));

        let paragraph =
            Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::TOP));

        frame.render_widget(paragraph, area);
    }
}

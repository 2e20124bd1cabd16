use crate::components::{Component, EventResult};
use crate::state::AppState;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::Screen;

pub struct HistoryScreen;

impl Screen for HistoryScreen {
    fn title(&self) -> &str {
        "HISTORY"
    }
}

impl Component for HistoryScreen {
    fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                state.cursor_down();
                EventResult::Handled
            }
            KeyCode::Char('k') | KeyCode::Up => {
                state.cursor_up();
                EventResult::Handled
            }
            KeyCode::Enter => {
                state.open_selected();
                EventResult::Handled
            }
            KeyCode::Char('q') => EventResult::Exit,
            _ => EventResult::NotHandled,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(2)])
            .split(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.title()));

        let history = state.screen.history();
        if history.is_empty() {
            let message = if state.screen.history_status().is_pending() {
                "Loading history..."
            } else {
                "No submissions yet."
            };
            frame.render_widget(Paragraph::new(message).block(block), chunks[0]);
        } else {
            let items: Vec<ListItem> = history
                .iter()
                .map(|entry| {
                    let result_style = if entry.has_result() {
                        Style::default().fg(Color::Green)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    };
                    ListItem::new(vec![
                        Line::from(entry.text.as_str()),
                        Line::from(Span::styled(entry.display_result(), result_style)),
                    ])
                })
                .collect();

            let list = List::new(items).block(block).highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );
            let mut list_state = ListState::default().with_selected(Some(state.history_cursor));
            frame.render_stateful_widget(list, chunks[0], &mut list_state);
        }

        if let Some(error) = state.screen.error() {
            let line = Line::from(vec![
                Span::styled("Error: ", Style::default().fg(Color::Red)),
                Span::raw(error.to_string()),
            ]);
            frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), chunks[1]);
        }
    }
}

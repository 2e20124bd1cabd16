use crate::components::{Component, EventResult};
use crate::state::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::Screen;

const PLACEHOLDER: &str = "Enter text here...";

pub struct AnalyzeScreen;

impl AnalyzeScreen {
    fn render_input(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.title()));

        let input = state.screen.input();
        let text = if input.is_empty() {
            Line::from(vec![
                Span::styled(" ", Style::default().bg(Color::White)),
                Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)),
            ])
        } else {
            Line::from(vec![
                Span::raw(input.to_string()),
                Span::styled(" ", Style::default().bg(Color::White)),
            ])
        };

        let paragraph = Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn render_submit(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let pending = state.screen.submit_status().is_pending();
        let (label, style) = if pending {
            ("[ Analyzing... ]", Style::default().fg(Color::DarkGray))
        } else {
            (
                "[ Submit ]",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        };
        frame.render_widget(Paragraph::new(Span::styled(label, style)), area);
    }

    fn render_error(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        if let Some(error) = state.screen.error() {
            let line = Line::from(vec![
                Span::styled("Error: ", Style::default().fg(Color::Red)),
                Span::raw(error.to_string()),
            ]);
            frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), area);
        }
    }
}

impl Screen for AnalyzeScreen {
    fn title(&self) -> &str {
        "FIND PERSONALITY"
    }
}

impl Component for AnalyzeScreen {
    fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult {
        match key.code {
            KeyCode::Enter => {
                state.submit();
                EventResult::Handled
            }
            KeyCode::Backspace => {
                state.screen.pop_char();
                EventResult::Handled
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                state.screen.push_char(c);
                EventResult::Handled
            }
            _ => EventResult::NotHandled,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Input
                Constraint::Length(1), // Submit
                Constraint::Length(2), // Error
            ])
            .split(area);

        self.render_input(frame, chunks[0], state);
        self.render_submit(frame, chunks[1], state);
        self.render_error(frame, chunks[2], state);
    }
}

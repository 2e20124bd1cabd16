use super::{Component, EventResult};
use crate::state::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use persona_core::Page;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
};

const LOGOUT_LABEL: &str = "[^L] Log out";

pub struct TabBar;

impl Component for TabBar {
    fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult {
        // Digits are text on the analyze page; only modified keys switch there
        let typing = state.screen.page() == Page::Analyze;

        match key.code {
            KeyCode::Tab => {
                state.next_page();
                EventResult::Handled
            }
            KeyCode::Char(c @ ('1' | '2'))
                if !typing || key.modifiers.contains(KeyModifiers::ALT) =>
            {
                let index = c.to_digit(10).unwrap_or(1) as usize - 1;
                if let Some(page) = Page::from_index(index) {
                    state.switch_page(page);
                }
                EventResult::Handled
            }
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                state.logout();
                EventResult::Exit
            }
            _ => EventResult::NotHandled,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let mut titles: Vec<Line> = Page::ALL
            .iter()
            .map(|page| {
                let content = format!("[{}] {}", page.index() + 1, page.name());
                if *page == state.screen.page() {
                    Line::from(Span::styled(
                        content,
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(content, Style::default().fg(Color::Gray)))
                }
            })
            .collect();
        titles.push(Line::from(Span::styled(
            LOGOUT_LABEL,
            Style::default().fg(Color::Red),
        )));

        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::BOTTOM))
            .select(state.screen.page().index())
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );

        frame.render_widget(tabs, area);
    }
}

//! Rendering helpers shared by modal widgets.

use std::rc::Rc;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::centered_rect;

/// Layout of a rendered modal frame.
pub struct ModalFrame {
    pub chunks: Rc<[Rect]>,
}

/// Center a bordered, titled box over the screen, clear what is underneath
/// and split its inside by `constraints`.
pub fn render_modal_frame(
    frame: &mut Frame,
    title: &str,
    width: u16,
    height: u16,
    border_color: Color,
    constraints: &[Constraint],
) -> ModalFrame {
    let modal_area = centered_rect(width, height, frame.area());

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", title));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    ModalFrame { chunks }
}

/// Builder for a line of `[key] description` hints.
pub struct HelpText {
    items: Vec<(String, Color, String)>,
}

impl HelpText {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn key(mut self, key: &str, color: Color, desc: &str) -> Self {
        self.items.push((key.to_string(), color, desc.to_string()));
        self
    }

    pub fn build(self) -> Paragraph<'static> {
        let mut spans: Vec<Span> = Vec::new();

        for (i, (key, color, desc)) in self.items.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(key, Style::default().fg(color)));
            spans.push(Span::raw(format!(" {}", desc)));
        }

        Paragraph::new(Line::from(spans))
    }
}

impl Default for HelpText {
    fn default() -> Self {
        Self::new()
    }
}

use ratatui::{
    Frame,
    layout::Constraint,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::helpers::{HelpText, render_modal_frame};

const MODAL_WIDTH: u16 = 60;
/// Borders, spacing, result line and help line around the text.
const MODAL_CHROME_HEIGHT: usize = 6;

/// Rows `text` occupies when wrapped to `width` columns.
fn wrapped_rows(text: &str, width: usize) -> usize {
    let width = width.max(1);
    text.lines()
        .map(|line| line.chars().count().div_ceil(width).max(1))
        .fold(0usize, usize::saturating_add)
        .max(1)
}

/// Modal height for `text`, never taller than the screen allows.
fn modal_height(text: &str, width: u16, screen_height: u16) -> u16 {
    let inner_width = usize::from(width.saturating_sub(2));
    let wanted = MODAL_CHROME_HEIGHT.saturating_add(wrapped_rows(text, inner_width));
    let max = usize::from(screen_height.saturating_sub(2));
    u16::try_from(wanted.min(max)).unwrap_or(u16::MAX)
}

/// Render an analysis result (`Result: <result>` above the analyzed text).
pub fn render_result_modal(frame: &mut Frame, result: &str, text: &str) {
    let area = frame.area();
    let height = modal_height(text, MODAL_WIDTH.min(area.width), area.height);

    let mf = render_modal_frame(
        frame,
        "Analysis",
        MODAL_WIDTH,
        height,
        Color::Green,
        &[
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Result
            Constraint::Length(1), // Spacing
            Constraint::Min(1),    // Text
            Constraint::Length(1), // Help text
        ],
    );

    let result_line = Line::from(vec![
        Span::raw("Result: "),
        Span::styled(
            result.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(result_line), mf.chunks[1]);

    let body = Paragraph::new(text.to_string()).wrap(Wrap { trim: true });
    frame.render_widget(body, mf.chunks[3]);

    let help = HelpText::new()
        .key("[Enter]", Color::Green, "or")
        .key("[Esc]", Color::Yellow, "to close")
        .build();
    frame.render_widget(help, mf.chunks[4]);
}

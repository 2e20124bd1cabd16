mod helpers;
mod result;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{Frame, layout::Rect};

use crate::state::AppState;

pub use result::render_result_modal;

/// Result of handling a modal key event
#[derive(Debug, PartialEq, Eq)]
pub enum ModalResult {
    /// Modal was closed
    Closed,
    /// Key was swallowed, modal still active
    Continue,
}

/// Render the active modal as an overlay
pub fn render_modal(frame: &mut Frame, state: &AppState) {
    if let Some((result, text)) = state.screen.modal().content() {
        render_result_modal(frame, result, text);
    }
}

/// Handle key events while a modal is open. Keys never reach the screen
/// underneath.
pub fn handle_modal_key(key: KeyEvent, state: &mut AppState) -> ModalResult {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('x') => {
            state.screen.close_modal();
            ModalResult::Closed
        }
        _ => ModalResult::Continue,
    }
}

/// Create a centered rectangle within the given area
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

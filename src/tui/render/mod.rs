pub mod matrix_view;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::model::Novel;

use super::panel::MatrixPanel;

/// Main render function: the matrix fills the screen above a one-row
/// status line.
pub fn render(frame: &mut Frame, panel: &mut MatrixPanel, novel: &Novel) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    matrix_view::render_matrix(frame, panel, chunks[0]);
    status_row::render_status_row(frame, panel, novel, chunks[1]);
}

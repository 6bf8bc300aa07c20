use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::tui::panel::MatrixPanel;

/// Draw the four panes: fixed corner, column titles (scrolled with the
/// horizontal axis), row titles (scrolled with the vertical axis), and the
/// cell body (scrolled with both).
///
/// Inside the scrollable body, content row indices run: cell rows
/// `0..rows`, then the repeated column headers, then the repeated kind
/// headings. The row-title pane mirrors that with a spacer row and a
/// repeated "Sections" label.
pub fn render_matrix(frame: &mut Frame, panel: &mut MatrixPanel, area: Rect) {
    panel.layout_frame(area);
    if panel.frame.needs_layout() {
        return;
    }

    let theme = panel.theme.clone();
    let panes = *panel.frame.panes();
    let h_off = panel.frame.horizontal_offset();
    let v_off = panel.frame.vertical_offset();
    let rows = panel.layout.rows.len();
    let text = Style::default().fg(theme.text);
    let buf = frame.buffer_mut();

    // --- Fixed corner: the "Sections" label over a blank line.
    buf.set_string(panes.corner.x, panes.corner.y, "Sections", Style::default());

    // --- Column-title pane: kind headings, then column headers.
    let ct = panes.column_titles;
    for block in &panel.layout.blocks {
        let (Some(first), Some(last)) = (block.columns.first(), block.columns.last()) else {
            continue;
        };
        let start = panel.layout.column_span(first.index).unwrap().0;
        let end = panel.layout.column_span(last.index).unwrap().1;
        let heading = Style::default().fg(theme.text).bg(theme.kind_heading(block.kind));
        fill_span(buf, ct, ct.y, start, end - start, h_off, theme.kind_heading(block.kind));
        put_str(buf, ct, ct.y, start + 1, h_off, block.kind.heading(), heading);
    }
    for col in panel.layout.columns() {
        let (start, _) = panel.layout.column_span(col.index).unwrap();
        let bg = theme.background[1][col.index % 2];
        fill_span(buf, ct, ct.y + 1, start, col.width, h_off, bg);
        put_str(buf, ct, ct.y + 1, start, h_off, &col.header, text);
    }

    // --- Row-title pane: section titles, spacer, repeated label.
    let rt = panes.row_titles;
    for r in v_off..v_off + rt.height {
        let y = rt.y + (r - v_off);
        let r = r as usize;
        if r < rows {
            let row_rect = Rect::new(rt.x, y, rt.width, 1);
            buf.set_style(row_rect, Style::default().bg(theme.row_title_background(r)));
            put_str(buf, rt, y, 0, 0, &panel.layout.rows[r].title, text);
        } else if r == rows {
            let row_rect = Rect::new(rt.x, y, rt.width, 1);
            buf.set_style(row_rect, Style::default().bg(theme.row_title_background(rows)));
        } else if r == rows + 1 {
            buf.set_string(rt.x, y, "Sections", Style::default());
        }
    }

    // --- Body pane.
    let body = panes.body;
    for r in v_off..v_off + body.height {
        let y = body.y + (r - v_off);
        let r = r as usize;
        if r < rows {
            render_cell_row(buf, panel, body, y, r, h_off, &theme);
        } else if r == rows {
            // Repeated column headers, continuing the row parity.
            for col in panel.layout.columns() {
                let (start, _) = panel.layout.column_span(col.index).unwrap();
                let bg = theme.background[rows % 2][col.index % 2];
                fill_span(buf, body, y, start, col.width, h_off, bg);
                put_str(buf, body, y, start, h_off, &col.header, text);
            }
        } else if r == rows + 1 {
            // Repeated kind headings.
            for block in &panel.layout.blocks {
                let (Some(first), Some(last)) = (block.columns.first(), block.columns.last())
                else {
                    continue;
                };
                let start = panel.layout.column_span(first.index).unwrap().0;
                let end = panel.layout.column_span(last.index).unwrap().1;
                let heading = Style::default().fg(theme.text).bg(theme.kind_heading(block.kind));
                fill_span(buf, body, y, start, end - start, h_off, theme.kind_heading(block.kind));
                put_str(buf, body, y, start + 1, h_off, block.kind.heading(), heading);
            }
        }
    }
}

fn render_cell_row(
    buf: &mut Buffer,
    panel: &MatrixPanel,
    body: Rect,
    y: u16,
    r: usize,
    h_off: u16,
    theme: &crate::tui::theme::Theme,
) {
    // Separator cells take the row-title shade of this row.
    let row_rect = Rect::new(body.x, y, body.width, 1);
    buf.set_style(row_rect, Style::default().bg(theme.background[r % 2][1]));

    let sc_id = &panel.layout.rows[r].id;
    for (i, col) in panel.layout.columns().enumerate() {
        let (start, _) = panel.layout.column_span(col.index).unwrap();
        let bg = theme.cell_background(r, col.index);
        fill_span(buf, body, y, start, col.width, h_off, bg);

        if let Some(cell) = panel.grid.cell(sc_id, &col.target)
            && cell.state()
        {
            // Center the 2-cell-wide marker in the column.
            let marker_x = start + col.width.saturating_sub(2) / 2;
            let node = Style::default().fg(theme.kind_node(col.target.kind()));
            put_str(buf, body, y, marker_x, h_off, cell.marker(), node);
        }

        if (r, i) == panel.cursor
            && let Some(rect) = span_rect(body, y, start, col.width, h_off)
        {
            buf.set_style(rect, Style::default().add_modifier(Modifier::REVERSED));
        }
    }
}

/// The on-screen rectangle of content span `[x, x+w)` on screen row `y`,
/// clipped against the pane's horizontal window, if any of it is visible.
fn span_rect(pane: Rect, y: u16, x: u16, w: u16, h_off: u16) -> Option<Rect> {
    let win_start = h_off;
    let win_end = h_off + pane.width;
    let start = x.max(win_start);
    let end = (x + w).min(win_end);
    if start >= end {
        return None;
    }
    Some(Rect::new(pane.x + (start - win_start), y, end - start, 1))
}

fn fill_span(buf: &mut Buffer, pane: Rect, y: u16, x: u16, w: u16, h_off: u16, bg: Color) {
    if let Some(rect) = span_rect(pane, y, x, w, h_off) {
        buf.set_style(rect, Style::default().bg(bg));
    }
}

/// Write `text` at content column `x`, clipping graphemes against the
/// pane's horizontal window. Partially visible wide graphemes are dropped
/// rather than torn.
fn put_str(buf: &mut Buffer, pane: Rect, y: u16, x: u16, h_off: u16, text: &str, style: Style) {
    let win_start = h_off;
    let win_end = h_off + pane.width;
    let mut pos = x;
    for g in text.graphemes(true) {
        let gw = g.width() as u16;
        if gw == 0 {
            continue;
        }
        if pos + gw > win_end {
            break;
        }
        if pos >= win_start {
            buf.set_string(pane.x + (pos - win_start), y, g, style);
        }
        pos += gw;
    }
}

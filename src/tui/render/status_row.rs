use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use unicode_width::UnicodeWidthStr;

use crate::matrix::ColumnTarget;
use crate::model::Novel;
use crate::tui::panel::MatrixPanel;
use crate::tui::wrap::{NOTE_WIDTH, wrap_text};

/// One-line status row: hover text for the selected cell on the left
/// (standing in for the pointer tooltip), display options and lock state
/// on the right.
pub fn render_status_row(frame: &mut Frame, panel: &MatrixPanel, novel: &Novel, area: Rect) {
    if area.width == 0 {
        return;
    }
    let dim = Style::default().add_modifier(Modifier::DIM);
    let buf = frame.buffer_mut();

    let left = hover_line(panel, novel).unwrap_or_default();
    buf.set_stringn(area.x, area.y, &left, area.width as usize, Style::default());

    let mut right = String::new();
    for (on, label) in [
        (panel.prefs.show_plot_lines, 'P'),
        (panel.prefs.show_characters, 'C'),
        (panel.prefs.show_locations, 'L'),
        (panel.prefs.show_items, 'I'),
        (panel.prefs.major_characters_only, 'M'),
    ] {
        right.push(if on { label } else { label.to_ascii_lowercase() });
    }
    if panel.lock.is_locked() {
        right.push_str("  LOCKED");
    }
    let w = right.width() as u16;
    if w < area.width {
        buf.set_string(area.x + area.width - w, area.y, &right, dim);
    }
}

/// Tooltip text for the selected cell: section and column titles, plus the
/// column's hover text — for plot-line cells the section-specific note
/// when one exists.
fn hover_line(panel: &MatrixPanel, novel: &Novel) -> Option<String> {
    let (sc_id, target) = panel.cursor_target()?;
    let section = novel.sections.get(sc_id)?;
    let column = panel.layout.column(panel.cursor.1)?;

    let detail = match target {
        ColumnTarget::PlotLine(pl_id) => match section.plotline_notes.get(pl_id) {
            Some(note) => Some(wrap_text(note, NOTE_WIDTH).join(" | ")),
            None => column.hover.clone(),
        },
        _ => column.hover.clone().map(|h| h.replace('\n', " ")),
    };

    let header = column.header.trim();
    Some(match detail {
        Some(detail) if !detail.is_empty() => {
            format!("{} · {} — {}", section.title, header, detail)
        }
        _ => format!("{} · {}", section.title, header),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::sample_novel;
    use crate::model::{ChangeBus, MatrixPrefs};
    use pretty_assertions::assert_eq;

    fn panel_for(novel: &Novel) -> (MatrixPanel, ChangeBus) {
        let mut bus = ChangeBus::new();
        let mut panel = MatrixPanel::open(novel, MatrixPrefs::default(), false, &mut bus);
        panel.layout_frame(Rect::new(0, 0, 100, 30));
        (panel, bus)
    }

    #[test]
    fn plotline_cell_shows_the_section_note() {
        let novel = sample_novel();
        let (mut panel, _bus) = panel_for(&novel);
        panel.cursor = (0, 0); // (s1, pl1)
        let line = hover_line(&panel, &novel).unwrap();
        // The note is wrapped to NOTE_WIDTH; wrapped lines join with " | ".
        assert_eq!(
            line,
            "The hook · A — Beth wins her first tournament | game"
        );
    }

    #[test]
    fn plotline_cell_without_note_falls_back_to_the_title() {
        let novel = sample_novel();
        let (mut panel, _bus) = panel_for(&novel);
        panel.cursor = (1, 0); // (s2, pl1): no note
        let line = hover_line(&panel, &novel).unwrap();
        assert_eq!(line, "The middle · A — Rising action");
    }

    #[test]
    fn character_cell_shows_full_name_and_aliases() {
        let novel = sample_novel();
        let (mut panel, _bus) = panel_for(&novel);
        panel.cursor = (0, 2); // (s1, c1)
        let line = hover_line(&panel, &novel).unwrap();
        assert_eq!(line, "The hook · Beth — Elizabeth Harmon (the prodigy)");
    }
}

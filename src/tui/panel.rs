use std::sync::mpsc::Receiver;

use ratatui::layout::Rect;

use crate::matrix::{ColumnTarget, EditLock, GridLayout, RelationsGrid};
use crate::model::{ChangeBus, DocumentChange, MatrixPrefs, Novel, ObserverId};

use super::scroll::TableFrame;
use super::theme::Theme;

/// Height of the column-title pane: kind heading row + column header row.
pub const COLUMN_TITLE_HEIGHT: u16 = 2;

/// Rows appended below the cells inside the scrollable body: the repeated
/// column headers and the repeated kind headings (the row-title pane gets a
/// spacer and a repeated "Sections" label of the same height).
pub const FOOTER_ROWS: u16 = 2;

/// A display option the user can flip at runtime. Any change triggers a
/// full rebuild of the grid, frame, and layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayOption {
    PlotLines,
    Characters,
    Locations,
    Items,
    MajorCharactersOnly,
}

/// The editable matrix surface: owns the grid, the scroll frame, the display
/// preferences, and the edit lock, and orchestrates rebuilds.
///
/// The panel exists only while open; the service creates it on the host's
/// "start viewer" request and drops it on close.
pub struct MatrixPanel {
    pub prefs: MatrixPrefs,
    pub theme: Theme,
    pub grid: RelationsGrid,
    pub layout: GridLayout,
    pub frame: TableFrame,
    pub lock: EditLock,
    /// Selected cell, (row, column) in grid coordinates.
    pub cursor: (usize, usize),
    /// Re-entrancy guard: a programmatic push must not be answered by a
    /// refresh, and vice versa. Single-threaded, so a boolean suffices.
    skip_update: bool,
    /// Scroll geometry restored from the preferences on the first layout
    /// pass, once the content extent is known.
    restore_scroll: Option<(u16, u16)>,
    subscription: Option<(ObserverId, Receiver<DocumentChange>)>,
}

impl MatrixPanel {
    /// Build the panel for an open document. `locked` is the host's lock
    /// state queried at open time.
    pub fn open(novel: &Novel, prefs: MatrixPrefs, locked: bool, bus: &mut ChangeBus) -> Self {
        let theme = Theme::from_prefs(&prefs);
        let mut grid = RelationsGrid::build(novel, &prefs);
        grid.pull_from_model(novel);
        let layout = GridLayout::compute(novel, &prefs);
        let restore_scroll = Some(prefs.scroll_position());
        let subscription = Some(bus.subscribe());

        MatrixPanel {
            prefs,
            theme,
            grid,
            layout,
            frame: TableFrame::new(),
            lock: EditLock::new(locked),
            cursor: (0, 0),
            skip_update: false,
            restore_scroll,
            subscription,
        }
    }

    /// Tear everything down and rebuild from the current document: fresh
    /// cells, fresh layout, fresh scroll frame, then an immediate pull.
    pub fn rebuild(&mut self, novel: &Novel) {
        self.grid = RelationsGrid::build(novel, &self.prefs);
        self.grid.pull_from_model(novel);
        self.layout = GridLayout::compute(novel, &self.prefs);
        self.frame = TableFrame::new();
        self.clamp_cursor();
    }

    /// Drain pending change notifications; rebuild when the document was
    /// edited elsewhere. The panel's own pushes never come back through
    /// here because they are made under the re-entrancy guard.
    pub fn poll_changes(&mut self, novel: &Novel) {
        let changed = match &self.subscription {
            Some((_, rx)) => drain(rx),
            None => false,
        };
        if changed && !self.skip_update {
            self.rebuild(novel);
        }
    }

    /// Persist geometry and unsubscribe. The panel is unusable afterwards
    /// and should be dropped.
    pub fn close(&mut self, bus: &mut ChangeBus) {
        self.prefs
            .set_scroll_position(self.frame.horizontal_offset(), self.frame.vertical_offset());
        if let Some((id, _)) = self.subscription.take() {
            bus.unsubscribe(id);
        }
    }

    /// Host lock signal: all toggle gestures become no-ops.
    pub fn lock(&mut self) {
        self.lock.lock();
    }

    pub fn unlock(&mut self) {
        self.lock.unlock();
    }

    /// Lay out the scroll frame for this pass and apply any pending
    /// geometry restore now that the content extent is known.
    pub fn layout_frame(&mut self, area: Rect) {
        let content_w = self.layout.content_width();
        let content_h = self.layout.rows.len() as u16 + FOOTER_ROWS;
        self.frame.layout(
            area,
            self.layout.row_title_width(),
            COLUMN_TITLE_HEIGHT,
            content_w,
            content_h,
        );
        if !self.frame.needs_layout()
            && let Some((x, y)) = self.restore_scroll.take()
        {
            self.frame.set_horizontal_position(x);
            self.frame.set_vertical_position(y);
        }
    }

    /// Flip a display option and rebuild. The major-only filter only
    /// affects the view when characters are shown at all.
    pub fn toggle_option(&mut self, option: DisplayOption, novel: &Novel) {
        let rebuild = match option {
            DisplayOption::PlotLines => {
                self.prefs.show_plot_lines = !self.prefs.show_plot_lines;
                true
            }
            DisplayOption::Characters => {
                self.prefs.show_characters = !self.prefs.show_characters;
                true
            }
            DisplayOption::Locations => {
                self.prefs.show_locations = !self.prefs.show_locations;
                true
            }
            DisplayOption::Items => {
                self.prefs.show_items = !self.prefs.show_items;
                true
            }
            DisplayOption::MajorCharactersOnly => {
                self.prefs.major_characters_only = !self.prefs.major_characters_only;
                self.prefs.show_characters
            }
        };
        if rebuild {
            self.rebuild(novel);
        }
    }

    /// The activation gesture on the selected cell: flip it and write the
    /// change through to the document. Returns whether the document changed
    /// (false while locked).
    pub fn toggle_cursor_cell(&mut self, novel: &mut Novel) -> bool {
        let (row, col) = self.cursor;
        self.toggle_cell(novel, row, col)
    }

    /// The pointer chord on a body position: toggle the cell under it.
    pub fn toggle_cell_at_screen(&mut self, novel: &mut Novel, x: u16, y: u16) -> bool {
        match self.cell_at_screen(x, y) {
            Some((row, col)) => {
                self.cursor = (row, col);
                self.toggle_cell(novel, row, col)
            }
            None => false,
        }
    }

    fn toggle_cell(&mut self, novel: &mut Novel, row: usize, col: usize) -> bool {
        let Some(sc_id) = self.layout.row(row).map(|r| r.id.clone()) else {
            return false;
        };
        let Some(target) = self.layout.column(col).map(|c| c.target.clone()) else {
            return false;
        };
        let Some(cell) = self.grid.cell_mut(&sc_id, &target) else {
            return false;
        };
        if cell.toggle(&self.lock) {
            // Update the model, but not the view.
            self.skip_update = true;
            self.grid.push_to_model(novel);
            self.skip_update = false;
            return true;
        }
        false
    }

    /// Map a screen position inside the body pane to grid coordinates.
    pub fn cell_at_screen(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        let body = self.frame.panes().body;
        if !body.contains(ratatui::layout::Position::new(x, y)) {
            return None;
        }
        let row = (y - body.y + self.frame.vertical_offset()) as usize;
        if row >= self.layout.rows.len() {
            return None;
        }
        let content_x = x - body.x + self.frame.horizontal_offset();
        let col = self.layout.column_at(content_x)?;
        Some((row, col))
    }

    /// Move the selection, scrolling the frame to keep it visible.
    pub fn move_cursor(&mut self, d_row: i32, d_col: i32) {
        let rows = self.layout.rows.len();
        let cols = self.layout.column_count();
        if rows == 0 || cols == 0 {
            return;
        }
        let row = clamp_add(self.cursor.0, d_row, rows - 1);
        let col = clamp_add(self.cursor.1, d_col, cols - 1);
        self.cursor = (row, col);
        if let Some((start, end)) = self.layout.column_span(col) {
            self.frame.scroll_into_view(row as u16, start, end);
        }
    }

    /// The target of the selected column, if any cell is selectable.
    pub fn cursor_target(&self) -> Option<(&crate::model::SectionId, &ColumnTarget)> {
        let row = self.layout.row(self.cursor.0)?;
        let col = self.layout.column(self.cursor.1)?;
        Some((&row.id, &col.target))
    }

    fn clamp_cursor(&mut self) {
        let rows = self.layout.rows.len();
        let cols = self.layout.column_count();
        self.cursor.0 = self.cursor.0.min(rows.saturating_sub(1));
        self.cursor.1 = self.cursor.1.min(cols.saturating_sub(1));
    }
}

fn clamp_add(value: usize, delta: i32, max: usize) -> usize {
    let target = value as i64 + i64::from(delta);
    target.clamp(0, max as i64) as usize
}

fn drain(rx: &Receiver<DocumentChange>) -> bool {
    let mut changed = false;
    while rx.try_recv().is_ok() {
        changed = true;
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::sample_novel;
    use crate::model::{CharacterId, SectionId};
    use pretty_assertions::assert_eq;

    fn open_panel(novel: &Novel, bus: &mut ChangeBus) -> MatrixPanel {
        let mut panel = MatrixPanel::open(novel, MatrixPrefs::default(), false, bus);
        panel.layout_frame(Rect::new(0, 0, 100, 30));
        panel
    }

    #[test]
    fn toggle_writes_through_to_the_document() {
        let mut novel = sample_novel();
        let mut bus = ChangeBus::new();
        let mut panel = open_panel(&novel, &mut bus);

        // Column order: pl1 pl2 c1 c2 l1 i1 — cursor to (s2, c1).
        panel.cursor = (1, 2);
        panel.toggle_cursor_cell(&mut novel);
        assert!(
            novel.sections[&SectionId::from("s2")]
                .characters
                .contains(&CharacterId::from("c1"))
        );
    }

    #[test]
    fn locked_panel_rejects_gestures() {
        let mut novel = sample_novel();
        let mut bus = ChangeBus::new();
        let mut panel = open_panel(&novel, &mut bus);
        panel.lock();

        panel.cursor = (1, 2);
        panel.toggle_cursor_cell(&mut novel);
        assert!(novel.sections[&SectionId::from("s2")].characters.is_empty());

        panel.unlock();
        panel.toggle_cursor_cell(&mut novel);
        assert!(!novel.sections[&SectionId::from("s2")].characters.is_empty());
    }

    #[test]
    fn external_change_triggers_rebuild() {
        let mut novel = sample_novel();
        let mut bus = ChangeBus::new();
        let mut panel = open_panel(&novel, &mut bus);
        assert!(!panel.grid.cell(&"s2".into(), &ColumnTarget::Character("c1".into())).unwrap().state());

        // Another view edits the document.
        novel
            .sections
            .get_mut(&SectionId::from("s2"))
            .unwrap()
            .characters
            .push("c1".into());
        bus.publish(DocumentChange::External);
        panel.poll_changes(&novel);

        assert!(panel.grid.cell(&"s2".into(), &ColumnTarget::Character("c1".into())).unwrap().state());
    }

    #[test]
    fn close_unsubscribes_and_persists_geometry() {
        let novel = sample_novel();
        let mut bus = ChangeBus::new();
        let mut panel = open_panel(&novel, &mut bus);
        assert_eq!(bus.subscriber_count(), 1);

        panel.close(&mut bus);
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(panel.prefs.scroll_position(), (0, 0));
    }

    #[test]
    fn option_toggle_rebuilds_the_layout() {
        let novel = sample_novel();
        let mut bus = ChangeBus::new();
        let mut panel = open_panel(&novel, &mut bus);
        let all_columns = panel.layout.column_count();

        panel.toggle_option(DisplayOption::PlotLines, &novel);
        assert_eq!(panel.layout.column_count(), all_columns - 2);
        panel.toggle_option(DisplayOption::PlotLines, &novel);
        assert_eq!(panel.layout.column_count(), all_columns);
    }

    #[test]
    fn major_only_does_not_rebuild_while_characters_are_hidden() {
        let novel = sample_novel();
        let mut bus = ChangeBus::new();
        let mut panel = open_panel(&novel, &mut bus);
        panel.toggle_option(DisplayOption::Characters, &novel);
        let columns = panel.layout.column_count();

        // Preference flips, view is unaffected until characters come back.
        panel.toggle_option(DisplayOption::MajorCharactersOnly, &novel);
        assert!(panel.prefs.major_characters_only);
        assert_eq!(panel.layout.column_count(), columns);

        panel.toggle_option(DisplayOption::Characters, &novel);
        // Only the major character is shown now.
        assert_eq!(panel.layout.column_count(), columns + 1);
    }

    #[test]
    fn cursor_movement_is_clamped_and_scrolls() {
        let novel = sample_novel();
        let mut bus = ChangeBus::new();
        let mut panel = open_panel(&novel, &mut bus);

        panel.move_cursor(-5, -5);
        assert_eq!(panel.cursor, (0, 0));
        panel.move_cursor(100, 100);
        assert_eq!(panel.cursor, (2, 5));
    }

    #[test]
    fn scroll_geometry_restores_after_first_layout() {
        let novel = sample_novel();
        let mut bus = ChangeBus::new();
        let mut prefs = MatrixPrefs::default();
        prefs.set_scroll_position(2, 1);
        let mut panel = MatrixPanel::open(&novel, prefs, false, &mut bus);
        // Narrow area so the content genuinely overflows and the restored
        // offsets survive clamping.
        panel.layout_frame(Rect::new(0, 0, 30, 6));
        assert_eq!(panel.frame.horizontal_offset(), 2);
        assert_eq!(panel.frame.vertical_offset(), 1);
    }
}

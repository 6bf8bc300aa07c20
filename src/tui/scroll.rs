use crossterm::event::{MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

/// One scroll axis: an offset into content, viewed through a viewport.
///
/// The viewport never exceeds the content (it shrinks to fit small grids)
/// and the offset never exceeds `content - viewport`, so scrolling is
/// bounded: content that is already fully visible cannot be moved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollAxis {
    offset: u16,
    content: u16,
    viewport: u16,
}

impl ScrollAxis {
    pub fn offset(&self) -> u16 {
        self.offset
    }

    fn max_offset(&self) -> u16 {
        self.content.saturating_sub(self.viewport)
    }

    fn set_position(&mut self, position: u16) {
        self.offset = position.min(self.max_offset());
    }

    fn scroll(&mut self, steps: i32) {
        if self.content <= self.viewport {
            // Fully visible content does not move.
            return;
        }
        let target = i64::from(self.offset) + i64::from(steps);
        self.offset = target.clamp(0, i64::from(self.max_offset())) as u16;
    }

    /// Recompute extents after content or container changed, keeping the
    /// offset valid. The viewport grows to the content but never past the
    /// available space.
    fn resize(&mut self, content: u16, available: u16) {
        self.content = content;
        self.viewport = content.min(available);
        self.offset = self.offset.min(self.max_offset());
    }
}

/// The four pane rectangles of the frame.
///
/// ```text
/// +-----------+---------------+
/// |  corner   | column titles |
/// +-----------+---------------+
/// | row titles|     body      |
/// +-----------+---------------+
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PaneRects {
    pub corner: Rect,
    pub column_titles: Rect,
    pub row_titles: Rect,
    pub body: Rect,
}

/// A four-quadrant scrolling container.
///
/// The row-title pane and the body share the vertical axis; the column-title
/// pane and the body share the horizontal axis; the corner scrolls with
/// neither. Each axis is a single piece of state read by both panes of its
/// pair, so the pair can never drift apart.
#[derive(Debug, Default)]
pub struct TableFrame {
    vertical: ScrollAxis,
    horizontal: ScrollAxis,
    area: Rect,
    panes: PaneRects,
    /// Wheel gestures are honored only while the pointer is inside the
    /// frame, mirroring bind-on-enter / unbind-on-leave event handling.
    pointer_inside: bool,
    /// Set when a layout pass ran without usable space; extents are
    /// recomputed on the next pass instead of failing.
    needs_layout: bool,
}

/// Wheel steps per scroll event.
const WHEEL_STEP: i32 = 1;

impl TableFrame {
    pub fn new() -> Self {
        TableFrame::default()
    }

    // --- Scroll operations. Each applies to both panes of its axis pair
    // atomically, because both panes render from the same axis state.

    pub fn set_vertical_position(&mut self, position: u16) {
        self.vertical.set_position(position);
    }

    pub fn scroll_vertical(&mut self, steps: i32) {
        self.vertical.scroll(steps);
    }

    pub fn set_horizontal_position(&mut self, position: u16) {
        self.horizontal.set_position(position);
    }

    pub fn scroll_horizontal_steps(&mut self, steps: i32) {
        self.horizontal.scroll(steps);
    }

    /// Vertical offset shared by the row-title pane and the body.
    pub fn vertical_offset(&self) -> u16 {
        self.vertical.offset()
    }

    /// Horizontal offset shared by the column-title pane and the body.
    pub fn horizontal_offset(&self) -> u16 {
        self.horizontal.offset()
    }

    /// Lay the frame out: split `area` into the four panes around a fixed
    /// row-title width and column-title height, then fit both axes to the
    /// body content (`content_width` columns cells, `content_height` rows).
    pub fn layout(
        &mut self,
        area: Rect,
        row_title_width: u16,
        column_title_height: u16,
        content_width: u16,
        content_height: u16,
    ) {
        if area.width <= row_title_width || area.height <= column_title_height {
            // Not enough space to measure; try again next pass.
            self.needs_layout = true;
            return;
        }
        self.needs_layout = false;
        self.area = area;

        let body_x = area.x + row_title_width;
        let body_y = area.y + column_title_height;
        let avail_w = area.width - row_title_width;
        let avail_h = area.height - column_title_height;

        self.horizontal.resize(content_width, avail_w);
        self.vertical.resize(content_height, avail_h);

        // Viewports stretch to the content but never past the container.
        let body_w = self.horizontal.viewport.max(1).min(avail_w);
        let body_h = self.vertical.viewport.max(1).min(avail_h);

        self.panes = PaneRects {
            corner: Rect::new(area.x, area.y, row_title_width, column_title_height),
            column_titles: Rect::new(body_x, area.y, body_w, column_title_height),
            row_titles: Rect::new(area.x, body_y, row_title_width, body_h),
            body: Rect::new(body_x, body_y, body_w, body_h),
        };
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    pub fn panes(&self) -> &PaneRects {
        &self.panes
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.area.contains(Position::new(x, y))
    }

    /// Scroll so that body cell (`row`, `col_start..col_end`) is visible.
    pub fn scroll_into_view(&mut self, row: u16, col_start: u16, col_end: u16) {
        if row < self.vertical.offset {
            self.vertical.set_position(row);
        } else if row >= self.vertical.offset + self.vertical.viewport.max(1) {
            self.vertical
                .set_position(row + 1 - self.vertical.viewport.max(1));
        }
        if col_start < self.horizontal.offset {
            self.horizontal.set_position(col_start);
        } else if col_end > self.horizontal.offset + self.horizontal.viewport {
            self.horizontal
                .set_position(col_end.saturating_sub(self.horizontal.viewport));
        }
    }

    /// Track pointer position; wheel gestures outside the frame are ignored,
    /// and stale state cannot leak once the frame is rebuilt (a fresh frame
    /// starts with the pointer considered outside).
    pub fn pointer_moved(&mut self, x: u16, y: u16) {
        self.pointer_inside = self.contains(x, y);
    }

    /// Apply a mouse event to the scroll state. Returns true if consumed.
    /// Wheel scrolls vertically; with Shift held it scrolls horizontally.
    pub fn handle_mouse(&mut self, event: &MouseEvent) -> bool {
        use crossterm::event::KeyModifiers;

        if let MouseEventKind::Moved | MouseEventKind::Drag(_) = event.kind {
            self.pointer_moved(event.column, event.row);
            return false;
        }
        if !self.pointer_inside && !self.contains(event.column, event.row) {
            return false;
        }
        self.pointer_inside = true;

        let horizontal = event.modifiers.contains(KeyModifiers::SHIFT);
        match event.kind {
            MouseEventKind::ScrollUp => {
                if horizontal {
                    self.scroll_horizontal_steps(-WHEEL_STEP);
                } else {
                    self.scroll_vertical(-WHEEL_STEP);
                }
                true
            }
            MouseEventKind::ScrollDown => {
                if horizontal {
                    self.scroll_horizontal_steps(WHEEL_STEP);
                } else {
                    self.scroll_vertical(WHEEL_STEP);
                }
                true
            }
            MouseEventKind::ScrollLeft => {
                self.scroll_horizontal_steps(-WHEEL_STEP);
                true
            }
            MouseEventKind::ScrollRight => {
                self.scroll_horizontal_steps(WHEEL_STEP);
                true
            }
            _ => false,
        }
    }
}

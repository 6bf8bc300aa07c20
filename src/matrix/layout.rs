use unicode_width::UnicodeWidthStr;

use crate::model::{
    CharacterId, ItemId, Kind, LocationId, MatrixPrefs, Novel, PlotLineId, SectionId,
};

/// Minimum display width of a column title. Narrower titles are padded so
/// their column does not collapse.
pub const MIN_COLUMN_WIDTH: usize = 7;

/// Addresses the entity behind one matrix column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnTarget {
    PlotLine(PlotLineId),
    Character(CharacterId),
    Location(LocationId),
    Item(ItemId),
}

impl ColumnTarget {
    pub fn kind(&self) -> Kind {
        match self {
            ColumnTarget::PlotLine(_) => Kind::PlotLine,
            ColumnTarget::Character(_) => Kind::Character,
            ColumnTarget::Location(_) => Kind::Location,
            ColumnTarget::Item(_) => Kind::Item,
        }
    }
}

/// One matrix column: header text (shown at top and bottom), hover text,
/// and the entity it toggles.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub target: ColumnTarget,
    /// Padded title, at least [`MIN_COLUMN_WIDTH`] cells wide.
    pub header: String,
    pub width: u16,
    /// Tooltip for the header (full title; for characters name + aliases).
    pub hover: Option<String>,
    /// Flat column index across all blocks; drives background parity.
    pub index: usize,
}

/// The columns of one entity kind, bracketed by heading labels.
#[derive(Debug, Clone)]
pub struct KindBlock {
    pub kind: Kind,
    pub columns: Vec<ColumnSpec>,
}

/// One matrix row.
#[derive(Debug, Clone)]
pub struct RowSpec {
    pub id: SectionId,
    pub title: String,
}

/// The logical shape of the matrix for one build: rows in manuscript order,
/// columns grouped into kind blocks. Recomputed on every rebuild.
#[derive(Debug, Clone, Default)]
pub struct GridLayout {
    pub rows: Vec<RowSpec>,
    pub blocks: Vec<KindBlock>,
}

/// Pad a column title with spaces on both sides until it reaches the
/// minimum width, so narrow titles do not collapse the column.
pub fn fill_title(text: &str) -> String {
    let mut text = text.to_string();
    while text.width() < MIN_COLUMN_WIDTH {
        text = format!(" {text} ");
    }
    text
}

/// Checkerboard background selector: `palette[row % 2][col % 2]`.
/// Row and column parity alternate independently.
pub fn background_parity(row: usize, col: usize) -> (usize, usize) {
    (row % 2, col % 2)
}

impl GridLayout {
    /// Compute the layout for the current document and display preferences.
    ///
    /// A kind block appears only when its collection is non-empty and its
    /// display preference is enabled; minor characters are dropped when the
    /// major-only filter is on.
    pub fn compute(novel: &Novel, prefs: &MatrixPrefs) -> Self {
        let rows = novel
            .normal_sections()
            .into_iter()
            .map(|id| {
                let title = novel.sections[&id].title.clone();
                RowSpec { id, title }
            })
            .collect();

        let mut blocks = Vec::new();
        let mut index = 0usize;

        if !novel.plot_lines.is_empty() && prefs.show_plot_lines {
            let mut columns = Vec::new();
            for (pl_id, pl) in &novel.plot_lines {
                columns.push(column(
                    ColumnTarget::PlotLine(pl_id.clone()),
                    &pl.short_name,
                    Some(pl.title.clone()),
                    &mut index,
                ));
            }
            blocks.push(KindBlock { kind: Kind::PlotLine, columns });
        }

        if !novel.characters.is_empty() && prefs.show_characters {
            let mut columns = Vec::new();
            for (cr_id, cr) in &novel.characters {
                if prefs.major_characters_only && !cr.is_major {
                    continue;
                }
                columns.push(column(
                    ColumnTarget::Character(cr_id.clone()),
                    &cr.title,
                    Some(cr.hover_text()),
                    &mut index,
                ));
            }
            blocks.push(KindBlock { kind: Kind::Character, columns });
        }

        if !novel.locations.is_empty() && prefs.show_locations {
            let mut columns = Vec::new();
            for (lc_id, lc) in &novel.locations {
                columns.push(column(
                    ColumnTarget::Location(lc_id.clone()),
                    &lc.title,
                    None,
                    &mut index,
                ));
            }
            blocks.push(KindBlock { kind: Kind::Location, columns });
        }

        if !novel.items.is_empty() && prefs.show_items {
            let mut columns = Vec::new();
            for (it_id, it) in &novel.items {
                columns.push(column(
                    ColumnTarget::Item(it_id.clone()),
                    &it.title,
                    None,
                    &mut index,
                ));
            }
            blocks.push(KindBlock { kind: Kind::Item, columns });
        }

        GridLayout { rows, blocks }
    }

    /// All columns across blocks, in display order.
    pub fn columns(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.blocks.iter().flat_map(|b| b.columns.iter())
    }

    pub fn column_count(&self) -> usize {
        self.blocks.iter().map(|b| b.columns.len()).sum()
    }

    pub fn column(&self, index: usize) -> Option<&ColumnSpec> {
        self.columns().nth(index)
    }

    pub fn row(&self, index: usize) -> Option<&RowSpec> {
        self.rows.get(index)
    }

    /// Total display width of the cell body: column widths plus one
    /// separator cell between columns.
    pub fn content_width(&self) -> u16 {
        let mut w = 0u16;
        for col in self.columns() {
            w = w.saturating_add(col.width).saturating_add(1);
        }
        w.saturating_sub(u16::from(w > 0))
    }

    /// Horizontal span `(start, end)` of a column in body content
    /// coordinates, separators included between columns.
    pub fn column_span(&self, index: usize) -> Option<(u16, u16)> {
        let mut x = 0u16;
        for (i, col) in self.columns().enumerate() {
            if i == index {
                return Some((x, x + col.width));
            }
            x += col.width + 1;
        }
        None
    }

    /// The column whose span contains content coordinate `x`.
    pub fn column_at(&self, x: u16) -> Option<usize> {
        let mut start = 0u16;
        for (i, col) in self.columns().enumerate() {
            if x < start {
                // A separator cell belongs to no column.
                return None;
            }
            if x < start + col.width {
                return Some(i);
            }
            start += col.width + 1;
        }
        None
    }

    /// Width of the row-title pane: widest section title (or the repeated
    /// "Sections" label), capped so long titles cannot squeeze out the body.
    pub fn row_title_width(&self) -> u16 {
        let widest = self
            .rows
            .iter()
            .map(|r| r.title.width())
            .chain(std::iter::once("Sections".width()))
            .max()
            .unwrap_or(0);
        (widest.min(30) as u16) + 1
    }
}

fn column(
    target: ColumnTarget,
    title: &str,
    hover: Option<String>,
    index: &mut usize,
) -> ColumnSpec {
    let header = fill_title(title);
    let width = header.width() as u16;
    let spec = ColumnSpec {
        target,
        header,
        width,
        hover,
        index: *index,
    };
    *index += 1;
    spec
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::ids::{CharacterId, ItemId, LocationId, PlotLineId, PlotPointId};

/// Whether a chapter or section takes part in the manuscript proper.
/// Only `Normal` ones are represented as matrix rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    #[default]
    Normal,
    /// Notes, trash, unused drafts — excluded from the matrix.
    Unused,
}

/// A unit of manuscript content: one matrix row.
///
/// The four relationship lists are the source of truth for the matrix;
/// toggle cells are projections of them. List order is host order and is
/// preserved across edits (append keeps append order, remove does not
/// reorder the rest).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub kind: SectionKind,
    #[serde(default)]
    pub characters: Vec<CharacterId>,
    #[serde(default)]
    pub locations: Vec<LocationId>,
    #[serde(default)]
    pub items: Vec<ItemId>,
    #[serde(default)]
    pub plot_lines: Vec<PlotLineId>,
    /// Free-text note per associated plot line, shown as the cell tooltip.
    #[serde(default)]
    pub plotline_notes: IndexMap<PlotLineId, String>,
    /// Plot points tied to this section, each recording which plot line
    /// it belongs to. Detached in cascade when that plot line is toggled off.
    #[serde(default)]
    pub plot_points: IndexMap<PlotPointId, PlotLineId>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Section {
            title: title.into(),
            kind: SectionKind::Normal,
            characters: Vec::new(),
            locations: Vec::new(),
            items: Vec::new(),
            plot_lines: Vec::new(),
            plotline_notes: IndexMap::new(),
            plot_points: IndexMap::new(),
        }
    }
}

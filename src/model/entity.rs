use serde::{Deserialize, Serialize};

use super::ids::SectionId;

/// The four kinds of narrative entity that form the matrix columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    PlotLine,
    Character,
    Location,
    Item,
}

impl Kind {
    pub const ALL: [Kind; 4] = [Kind::PlotLine, Kind::Character, Kind::Location, Kind::Item];

    /// Heading text for the kind block (also used top and bottom).
    pub fn heading(self) -> &'static str {
        match self {
            Kind::PlotLine => "Plot lines",
            Kind::Character => "Characters",
            Kind::Location => "Locations",
            Kind::Item => "Items",
        }
    }
}

/// A plot line. Besides its titles it carries the inverse of the
/// section→plot-line association; the two sides are kept consistent
/// by every matrix write-back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotLine {
    pub title: String,
    /// Short name used as the column header.
    pub short_name: String,
    /// Sections associated with this plot line, in association order.
    #[serde(default)]
    pub sections: Vec<SectionId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub title: String,
    #[serde(default)]
    pub full_name: String,
    /// "Also known as" — aliases shown in the header tooltip.
    #[serde(default)]
    pub aka: Option<String>,
    #[serde(default)]
    pub is_major: bool,
}

impl Character {
    /// Tooltip text for the column header: full name, aliases on a
    /// second line when present.
    pub fn hover_text(&self) -> String {
        let name = if self.full_name.is_empty() {
            &self.title
        } else {
            &self.full_name
        };
        match &self.aka {
            Some(aka) => format!("{name}\n({aka})"),
            None => name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
}

/// A plot point. Owned by a plot line; may be tied to one section via the
/// section's plot-point association map. The matrix never creates or
/// destroys plot points, it only detaches them when a plot-line toggle
/// is switched off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotPoint {
    pub title: String,
    /// The section this plot point is tied to, if any.
    #[serde(default)]
    pub section: Option<SectionId>,
}

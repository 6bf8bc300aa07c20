use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::entity::{Character, Item, Location, PlotLine, PlotPoint};
use super::ids::{ChapterId, CharacterId, ItemId, LocationId, PlotLineId, PlotPointId, SectionId};
use super::section::{Section, SectionKind};

/// A chapter groups sections in the containment tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    #[serde(default)]
    pub kind: SectionKind,
    /// Child sections, in manuscript order.
    #[serde(default)]
    pub sections: Vec<SectionId>,
}

/// The manuscript document model.
///
/// All `IndexMap`s preserve the host's containment-tree order, which is the
/// display order of rows and columns. The matrix reads and mutates the
/// relationship lists inside [`Section`] and [`PlotLine`] but never creates
/// or destroys the elements themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Novel {
    pub title: String,
    #[serde(default)]
    pub chapters: IndexMap<ChapterId, Chapter>,
    #[serde(default)]
    pub sections: IndexMap<SectionId, Section>,
    #[serde(default)]
    pub plot_lines: IndexMap<PlotLineId, PlotLine>,
    #[serde(default)]
    pub characters: IndexMap<CharacterId, Character>,
    #[serde(default)]
    pub locations: IndexMap<LocationId, Location>,
    #[serde(default)]
    pub items: IndexMap<ItemId, Item>,
    #[serde(default)]
    pub plot_points: IndexMap<PlotPointId, PlotPoint>,
}

impl Novel {
    pub fn new(title: impl Into<String>) -> Self {
        Novel {
            title: title.into(),
            chapters: IndexMap::new(),
            sections: IndexMap::new(),
            plot_lines: IndexMap::new(),
            characters: IndexMap::new(),
            locations: IndexMap::new(),
            items: IndexMap::new(),
            plot_points: IndexMap::new(),
        }
    }

    /// Section IDs eligible as matrix rows: sections of normal chapters
    /// whose own kind is normal, in containment-tree order.
    pub fn normal_sections(&self) -> Vec<SectionId> {
        let mut out = Vec::new();
        for chapter in self.chapters.values() {
            if chapter.kind != SectionKind::Normal {
                continue;
            }
            for sc_id in &chapter.sections {
                if let Some(section) = self.sections.get(sc_id)
                    && section.kind == SectionKind::Normal
                {
                    out.push(sc_id.clone());
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::model::fixtures::sample_novel;
    use pretty_assertions::assert_eq;

    #[test]
    fn normal_sections_skips_unused_chapters_and_sections() {
        let novel = sample_novel();
        // The fixture has s1..s3 in a normal chapter, s4 in an unused
        // chapter, and s5 flagged unused inside the normal chapter.
        let rows: Vec<String> = novel
            .normal_sections()
            .iter()
            .map(|id| id.to_string())
            .collect();
        assert_eq!(rows, vec!["s1", "s2", "s3"]);
    }
}

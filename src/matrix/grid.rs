use indexmap::IndexMap;

use crate::model::{
    CharacterId, ItemId, LocationId, MatrixPrefs, Novel, PlotLineId, PlotPointId, SectionId,
};

use super::cell::ToggleCell;
use super::layout::ColumnTarget;

/// The keyed collection of toggle cells for one document build.
///
/// One cell exists per (eligible section, visible entity) pair; entities
/// hidden by a display preference get no cell at all, which is what keeps
/// their membership untouched by a pull/push cycle. The relationship lists
/// in the document are the source of truth; cells are a projection that is
/// only current immediately after [`RelationsGrid::pull_from_model`].
///
/// The grid is rebuilt from scratch whenever the document or the display
/// preferences change; no cell outlives its build.
#[derive(Debug, Default)]
pub struct RelationsGrid {
    sections: Vec<SectionId>,
    plotline_cells: IndexMap<SectionId, IndexMap<PlotLineId, ToggleCell>>,
    character_cells: IndexMap<SectionId, IndexMap<CharacterId, ToggleCell>>,
    location_cells: IndexMap<SectionId, IndexMap<LocationId, ToggleCell>>,
    item_cells: IndexMap<SectionId, IndexMap<ItemId, ToggleCell>>,
}

impl RelationsGrid {
    /// Build blank cells for the current document and preferences.
    /// Call [`RelationsGrid::pull_from_model`] afterwards to load states.
    pub fn build(novel: &Novel, prefs: &MatrixPrefs) -> Self {
        let mut grid = RelationsGrid {
            sections: novel.normal_sections(),
            ..RelationsGrid::default()
        };

        for sc_id in &grid.sections {
            let mut pl_row = IndexMap::new();
            let mut cr_row = IndexMap::new();
            let mut lc_row = IndexMap::new();
            let mut it_row = IndexMap::new();

            if prefs.show_plot_lines {
                for pl_id in novel.plot_lines.keys() {
                    pl_row.insert(pl_id.clone(), ToggleCell::default());
                }
            }
            if prefs.show_characters {
                for (cr_id, cr) in &novel.characters {
                    if prefs.major_characters_only && !cr.is_major {
                        continue;
                    }
                    cr_row.insert(cr_id.clone(), ToggleCell::default());
                }
            }
            if prefs.show_locations {
                for lc_id in novel.locations.keys() {
                    lc_row.insert(lc_id.clone(), ToggleCell::default());
                }
            }
            if prefs.show_items {
                for it_id in novel.items.keys() {
                    it_row.insert(it_id.clone(), ToggleCell::default());
                }
            }

            grid.plotline_cells.insert(sc_id.clone(), pl_row);
            grid.character_cells.insert(sc_id.clone(), cr_row);
            grid.location_cells.insert(sc_id.clone(), lc_row);
            grid.item_cells.insert(sc_id.clone(), it_row);
        }

        grid
    }

    /// Model → cells: set every cell to the membership of its entity in the
    /// section's relationship list for that kind.
    pub fn pull_from_model(&mut self, novel: &Novel) {
        for sc_id in &self.sections {
            let Some(section) = novel.sections.get(sc_id) else {
                continue;
            };
            if let Some(row) = self.plotline_cells.get_mut(sc_id) {
                for (pl_id, cell) in row {
                    cell.set_state(section.plot_lines.contains(pl_id));
                }
            }
            if let Some(row) = self.character_cells.get_mut(sc_id) {
                for (cr_id, cell) in row {
                    cell.set_state(section.characters.contains(cr_id));
                }
            }
            if let Some(row) = self.location_cells.get_mut(sc_id) {
                for (lc_id, cell) in row {
                    cell.set_state(section.locations.contains(lc_id));
                }
            }
            if let Some(row) = self.item_cells.get_mut(sc_id) {
                for (it_id, cell) in row {
                    cell.set_state(section.items.contains(it_id));
                }
            }
        }
    }

    /// Cells → model: rewrite the relationship lists from cell states.
    ///
    /// Membership edits append when absent and remove when present, so
    /// existing list order survives. Entities without a cell (hidden kind,
    /// filtered minor character) are neither read nor written.
    ///
    /// Plot lines keep both sides of the association consistent, and
    /// toggling one off cascades: every plot point of that plot line tied
    /// to the section is detached (map entry removed, the plot point's own
    /// section association cleared). The cascade removes associations only,
    /// never the plot point itself.
    pub fn push_to_model(&self, novel: &mut Novel) {
        for sc_id in &self.sections {
            self.push_plot_lines(novel, sc_id);
            self.push_memberships(novel, sc_id);
        }
    }

    fn push_plot_lines(&self, novel: &mut Novel, sc_id: &SectionId) {
        let Some(row) = self.plotline_cells.get(sc_id) else {
            return;
        };
        for (pl_id, cell) in row {
            if cell.state() {
                if let Some(section) = novel.sections.get_mut(sc_id)
                    && !section.plot_lines.contains(pl_id)
                {
                    section.plot_lines.push(pl_id.clone());
                }
                if let Some(pl) = novel.plot_lines.get_mut(pl_id)
                    && !pl.sections.contains(sc_id)
                {
                    pl.sections.push(sc_id.clone());
                }
            } else {
                let mut detached: Vec<PlotPointId> = Vec::new();
                if let Some(section) = novel.sections.get_mut(sc_id) {
                    section.plot_lines.retain(|id| id != pl_id);
                    detached = section
                        .plot_points
                        .iter()
                        .filter(|(_, owner)| *owner == pl_id)
                        .map(|(pp_id, _)| pp_id.clone())
                        .collect();
                    for pp_id in &detached {
                        section.plot_points.shift_remove(pp_id);
                    }
                }
                if let Some(pl) = novel.plot_lines.get_mut(pl_id) {
                    pl.sections.retain(|id| id != sc_id);
                }
                for pp_id in &detached {
                    // A stale reference to a vanished plot point is skipped.
                    if let Some(pp) = novel.plot_points.get_mut(pp_id) {
                        pp.section = None;
                    }
                }
            }
        }
    }

    fn push_memberships(&self, novel: &mut Novel, sc_id: &SectionId) {
        let Some(section) = novel.sections.get_mut(sc_id) else {
            return;
        };
        if let Some(row) = self.character_cells.get(sc_id) {
            for (cr_id, cell) in row {
                if cell.state() {
                    if !section.characters.contains(cr_id) {
                        section.characters.push(cr_id.clone());
                    }
                } else {
                    section.characters.retain(|id| id != cr_id);
                }
            }
        }
        if let Some(row) = self.location_cells.get(sc_id) {
            for (lc_id, cell) in row {
                if cell.state() {
                    if !section.locations.contains(lc_id) {
                        section.locations.push(lc_id.clone());
                    }
                } else {
                    section.locations.retain(|id| id != lc_id);
                }
            }
        }
        if let Some(row) = self.item_cells.get(sc_id) {
            for (it_id, cell) in row {
                if cell.state() {
                    if !section.items.contains(it_id) {
                        section.items.push(it_id.clone());
                    }
                } else {
                    section.items.retain(|id| id != it_id);
                }
            }
        }
    }

    /// Row order of the build (eligible sections).
    pub fn sections(&self) -> &[SectionId] {
        &self.sections
    }

    pub fn cell(&self, sc_id: &SectionId, target: &ColumnTarget) -> Option<&ToggleCell> {
        match target {
            ColumnTarget::PlotLine(id) => self.plotline_cells.get(sc_id)?.get(id),
            ColumnTarget::Character(id) => self.character_cells.get(sc_id)?.get(id),
            ColumnTarget::Location(id) => self.location_cells.get(sc_id)?.get(id),
            ColumnTarget::Item(id) => self.item_cells.get(sc_id)?.get(id),
        }
    }

    pub fn cell_mut(&mut self, sc_id: &SectionId, target: &ColumnTarget) -> Option<&mut ToggleCell> {
        match target {
            ColumnTarget::PlotLine(id) => self.plotline_cells.get_mut(sc_id)?.get_mut(id),
            ColumnTarget::Character(id) => self.character_cells.get_mut(sc_id)?.get_mut(id),
            ColumnTarget::Location(id) => self.location_cells.get_mut(sc_id)?.get_mut(id),
            ColumnTarget::Item(id) => self.item_cells.get_mut(sc_id)?.get_mut(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::sample_novel;
    use pretty_assertions::assert_eq;

    fn built(novel: &Novel, prefs: &MatrixPrefs) -> RelationsGrid {
        let mut grid = RelationsGrid::build(novel, prefs);
        grid.pull_from_model(novel);
        grid
    }

    fn pl(id: &str) -> ColumnTarget {
        ColumnTarget::PlotLine(id.into())
    }

    fn cr(id: &str) -> ColumnTarget {
        ColumnTarget::Character(id.into())
    }

    fn it(id: &str) -> ColumnTarget {
        ColumnTarget::Item(id.into())
    }

    #[test]
    fn pull_reflects_membership() {
        let novel = sample_novel();
        let grid = built(&novel, &MatrixPrefs::default());
        assert!(grid.cell(&"s1".into(), &pl("pl1")).unwrap().state());
        assert!(!grid.cell(&"s1".into(), &pl("pl2")).unwrap().state());
        assert!(grid.cell(&"s1".into(), &cr("c1")).unwrap().state());
        assert!(!grid.cell(&"s2".into(), &cr("c1")).unwrap().state());
    }

    #[test]
    fn push_without_edits_round_trips() {
        let mut novel = sample_novel();
        let before = novel.clone();
        let grid = built(&novel, &MatrixPrefs::default());
        grid.push_to_model(&mut novel);

        for (sc_id, section) in &novel.sections {
            let orig = &before.sections[sc_id];
            assert_eq!(section.characters, orig.characters);
            assert_eq!(section.locations, orig.locations);
            assert_eq!(section.items, orig.items);
            assert_eq!(section.plot_lines, orig.plot_lines);
            assert_eq!(section.plot_points, orig.plot_points);
        }
        for (pl_id, line) in &novel.plot_lines {
            assert_eq!(line.sections, before.plot_lines[pl_id].sections);
        }
    }

    #[test]
    fn setting_on_twice_keeps_a_single_occurrence() {
        let mut novel = sample_novel();
        let mut grid = built(&novel, &MatrixPrefs::default());
        grid.cell_mut(&"s2".into(), &it("i1")).unwrap().set_state(true);
        grid.push_to_model(&mut novel);
        grid.cell_mut(&"s2".into(), &it("i1")).unwrap().set_state(true);
        grid.push_to_model(&mut novel);

        let items = &novel.sections[&SectionId::from("s2")].items;
        assert_eq!(items, &vec![ItemId::from("i1")]);
    }

    #[test]
    fn membership_order_is_preserved_across_edits() {
        let mut novel = sample_novel();
        let mut grid = built(&novel, &MatrixPrefs::default());

        // c2 joins s1 after c1; order is append order.
        grid.cell_mut(&"s1".into(), &cr("c2")).unwrap().set_state(true);
        grid.push_to_model(&mut novel);
        let characters = &novel.sections[&SectionId::from("s1")].characters;
        assert_eq!(
            characters,
            &vec![CharacterId::from("c1"), CharacterId::from("c2")]
        );

        // Removing c1 does not reorder the rest.
        grid.pull_from_model(&novel);
        grid.cell_mut(&"s1".into(), &cr("c1")).unwrap().set_state(false);
        grid.push_to_model(&mut novel);
        let characters = &novel.sections[&SectionId::from("s1")].characters;
        assert_eq!(characters, &vec![CharacterId::from("c2")]);
    }

    #[test]
    fn toggling_plot_line_off_cascades_plot_point_detachment() {
        let mut novel = sample_novel();
        let mut grid = built(&novel, &MatrixPrefs::default());
        grid.cell_mut(&"s1".into(), &pl("pl1")).unwrap().set_state(false);
        grid.push_to_model(&mut novel);

        let section = &novel.sections[&SectionId::from("s1")];
        assert!(!section.plot_lines.contains(&"pl1".into()));
        assert!(section.plot_points.is_empty());
        let line = &novel.plot_lines[&PlotLineId::from("pl1")];
        assert!(!line.sections.contains(&"s1".into()));
        // The plot point survives, only its section association is cleared.
        let pp = &novel.plot_points[&PlotPointId::from("pp1")];
        assert_eq!(pp.section, None);
    }

    #[test]
    fn toggling_plot_line_on_keeps_both_sides_consistent() {
        let mut novel = sample_novel();
        let mut grid = built(&novel, &MatrixPrefs::default());
        grid.cell_mut(&"s2".into(), &pl("pl2")).unwrap().set_state(true);
        grid.push_to_model(&mut novel);

        assert!(
            novel.sections[&SectionId::from("s2")]
                .plot_lines
                .contains(&"pl2".into())
        );
        assert_eq!(
            novel.plot_lines[&PlotLineId::from("pl2")].sections,
            vec![SectionId::from("s2")]
        );
    }

    #[test]
    fn stale_plot_point_reference_is_skipped() {
        let mut novel = sample_novel();
        // Point s1's association map at a plot point that no longer exists.
        novel
            .sections
            .get_mut(&SectionId::from("s1"))
            .unwrap()
            .plot_points
            .insert("pp_gone".into(), "pl1".into());

        let mut grid = built(&novel, &MatrixPrefs::default());
        grid.cell_mut(&"s1".into(), &pl("pl1")).unwrap().set_state(false);
        grid.push_to_model(&mut novel);

        let section = &novel.sections[&SectionId::from("s1")];
        assert!(section.plot_points.is_empty());
        // pp1 was live and got cleared; pp_gone just vanished from the map.
        assert_eq!(novel.plot_points[&PlotPointId::from("pp1")].section, None);
    }

    #[test]
    fn filtered_minor_characters_are_never_touched() {
        let mut novel = sample_novel();
        novel
            .sections
            .get_mut(&SectionId::from("s2"))
            .unwrap()
            .characters
            .push("c2".into());
        let prefs = MatrixPrefs {
            major_characters_only: true,
            ..MatrixPrefs::default()
        };

        let mut grid = built(&novel, &prefs);
        assert!(grid.cell(&"s2".into(), &cr("c2")).is_none());

        // A full pull/push cycle with unrelated edits leaves c2 alone.
        grid.cell_mut(&"s2".into(), &cr("c1")).unwrap().set_state(true);
        grid.push_to_model(&mut novel);
        let characters = &novel.sections[&SectionId::from("s2")].characters;
        assert!(characters.contains(&"c2".into()));
        assert!(characters.contains(&"c1".into()));

        // Disabling the filter reveals the unmodified membership.
        let grid = built(&novel, &MatrixPrefs::default());
        assert!(grid.cell(&"s2".into(), &cr("c2")).unwrap().state());
    }

    #[test]
    fn hidden_kind_is_never_touched() {
        let mut novel = sample_novel();
        let prefs = MatrixPrefs {
            show_plot_lines: false,
            ..MatrixPrefs::default()
        };
        let mut grid = built(&novel, &prefs);
        assert!(grid.cell(&"s1".into(), &pl("pl1")).is_none());

        grid.cell_mut(&"s1".into(), &cr("c2")).unwrap().set_state(true);
        grid.push_to_model(&mut novel);

        // s1 still carries pl1 and its plot point untouched.
        let section = &novel.sections[&SectionId::from("s1")];
        assert!(section.plot_lines.contains(&"pl1".into()));
        assert_eq!(section.plot_points.len(), 1);
    }

    #[test]
    fn concrete_two_section_scenario() {
        // Sections [s1, s2], major character c1 a member of s1 only.
        let mut novel = sample_novel();
        let mut grid = built(&novel, &MatrixPrefs::default());
        assert!(grid.cell(&"s1".into(), &cr("c1")).unwrap().state());
        assert!(!grid.cell(&"s2".into(), &cr("c1")).unwrap().state());

        // Toggle (s2, c1) on and push.
        grid.cell_mut(&"s2".into(), &cr("c1")).unwrap().set_state(true);
        grid.push_to_model(&mut novel);
        assert!(
            novel.sections[&SectionId::from("s2")]
                .characters
                .contains(&"c1".into())
        );
        assert_eq!(
            novel.sections[&SectionId::from("s1")].characters,
            vec![CharacterId::from("c1")]
        );

        // Rebuild and pull: both cells are on.
        let grid = built(&novel, &MatrixPrefs::default());
        assert!(grid.cell(&"s1".into(), &cr("c1")).unwrap().state());
        assert!(grid.cell(&"s2".into(), &cr("c1")).unwrap().state());
    }
}

//! Shared document fixtures for unit tests.

use super::entity::{Character, Item, Location, PlotLine, PlotPoint};
use super::novel::{Chapter, Novel};
use super::section::{Section, SectionKind};

/// A small but fully wired document:
///
/// - chapter `ch1` (normal) with sections `s1`, `s2`, `s3` (normal) and
///   `s5` (unused); chapter `ch2` (unused) with section `s4`
/// - plot lines `pl1` ("Rising action", short name "A") and `pl2` ("B")
/// - characters `c1` (major), `c2` (minor); location `l1`; item `i1`
/// - `s1` is associated with `pl1` (with a note), `c1`, `l1`
/// - plot point `pp1` belongs to `pl1` and is tied to `s1`
pub fn sample_novel() -> Novel {
    let mut novel = Novel::new("Sample");

    let mut s1 = Section::new("The hook");
    s1.characters.push("c1".into());
    s1.locations.push("l1".into());
    s1.plot_lines.push("pl1".into());
    s1.plotline_notes
        .insert("pl1".into(), "Beth wins her first tournament game".into());
    s1.plot_points.insert("pp1".into(), "pl1".into());
    novel.sections.insert("s1".into(), s1);
    novel.sections.insert("s2".into(), Section::new("The middle"));
    novel.sections.insert("s3".into(), Section::new("The turn"));
    novel.sections.insert("s4".into(), Section::new("Cut scene"));
    let mut s5 = Section::new("Notes");
    s5.kind = SectionKind::Unused;
    novel.sections.insert("s5".into(), s5);

    novel.chapters.insert(
        "ch1".into(),
        Chapter {
            title: "Chapter One".into(),
            kind: SectionKind::Normal,
            sections: vec!["s1".into(), "s2".into(), "s3".into(), "s5".into()],
        },
    );
    novel.chapters.insert(
        "ch2".into(),
        Chapter {
            title: "Outtakes".into(),
            kind: SectionKind::Unused,
            sections: vec!["s4".into()],
        },
    );

    novel.plot_lines.insert(
        "pl1".into(),
        PlotLine {
            title: "Rising action".into(),
            short_name: "A".into(),
            sections: vec!["s1".into()],
        },
    );
    novel.plot_lines.insert(
        "pl2".into(),
        PlotLine {
            title: "Backstory".into(),
            short_name: "B".into(),
            sections: Vec::new(),
        },
    );

    novel.characters.insert(
        "c1".into(),
        Character {
            title: "Beth".into(),
            full_name: "Elizabeth Harmon".into(),
            aka: Some("the prodigy".into()),
            is_major: true,
        },
    );
    novel.characters.insert(
        "c2".into(),
        Character {
            title: "Janitor".into(),
            full_name: String::new(),
            aka: None,
            is_major: false,
        },
    );

    novel
        .locations
        .insert("l1".into(), Location { title: "Basement".into() });
    novel.items.insert("i1".into(), Item { title: "Chessboard".into() });

    novel.plot_points.insert(
        "pp1".into(),
        PlotPoint {
            title: "First win".into(),
            section: Some("s1".into()),
        },
    );

    novel
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// User preferences for the matrix panel, persisted between sessions.
///
/// Every recognized option is an explicit field with a typed default;
/// unknown keys in the preferences file are rejected at load time rather
/// than silently carried along.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatrixPrefs {
    #[serde(default = "default_true")]
    pub show_plot_lines: bool,
    #[serde(default = "default_true")]
    pub show_characters: bool,
    #[serde(default = "default_true")]
    pub show_locations: bool,
    #[serde(default = "default_true")]
    pub show_items: bool,
    #[serde(default)]
    pub major_characters_only: bool,
    /// Panel geometry persisted at close: "<horizontal>,<vertical>" scroll
    /// position. Restored on the next open.
    #[serde(default = "default_scroll")]
    pub scroll: String,
    /// Named hex color overrides, e.g. `plotline_heading = "#00BFFF"`.
    /// Unknown names are ignored by the theme, like unknown tags would be.
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for MatrixPrefs {
    fn default() -> Self {
        MatrixPrefs {
            show_plot_lines: true,
            show_characters: true,
            show_locations: true,
            show_items: true,
            major_characters_only: false,
            scroll: default_scroll(),
            colors: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_scroll() -> String {
    "0,0".to_string()
}

impl MatrixPrefs {
    /// Parse the persisted scroll geometry. Malformed strings fall back
    /// to the origin rather than failing the whole preferences load.
    pub fn scroll_position(&self) -> (u16, u16) {
        let mut parts = self.scroll.splitn(2, ',');
        let x = parts.next().and_then(|s| s.trim().parse().ok());
        let y = parts.next().and_then(|s| s.trim().parse().ok());
        match (x, y) {
            (Some(x), Some(y)) => (x, y),
            _ => (0, 0),
        }
    }

    pub fn set_scroll_position(&mut self, x: u16, y: u16) {
        self.scroll = format!("{x},{y}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_show_everything_but_major_only() {
        let prefs = MatrixPrefs::default();
        assert!(prefs.show_plot_lines);
        assert!(prefs.show_characters);
        assert!(prefs.show_locations);
        assert!(prefs.show_items);
        assert!(!prefs.major_characters_only);
        assert_eq!(prefs.scroll_position(), (0, 0));
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let prefs: MatrixPrefs = toml::from_str("").unwrap();
        assert_eq!(prefs, MatrixPrefs::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = toml::from_str::<MatrixPrefs>("show_plotlines = true");
        assert!(err.is_err());
    }

    #[test]
    fn scroll_geometry_round_trip() {
        let mut prefs = MatrixPrefs::default();
        prefs.set_scroll_position(12, 34);
        assert_eq!(prefs.scroll, "12,34");
        assert_eq!(prefs.scroll_position(), (12, 34));
    }

    #[test]
    fn malformed_scroll_geometry_falls_back_to_origin() {
        let mut prefs = MatrixPrefs::default();
        prefs.scroll = "garbage".into();
        assert_eq!(prefs.scroll_position(), (0, 0));
        prefs.scroll = "5".into();
        assert_eq!(prefs.scroll_position(), (0, 0));
    }
}

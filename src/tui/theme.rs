use ratatui::style::Color;

use crate::matrix::background_parity;
use crate::model::{Kind, MatrixPrefs};

/// Parsed color theme for the matrix panel.
///
/// `background` is the 2×2 checkerboard palette indexed by
/// `[row parity][column parity]`; each kind has a heading color and a
/// node color (the "on" marker).
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: [[Color; 2]; 2],
    pub plotline_heading: Color,
    pub plotline_node: Color,
    pub character_heading: Color,
    pub character_node: Color,
    pub location_heading: Color,
    pub location_node: Color,
    pub item_heading: Color,
    pub item_node: Color,
    pub text: Color,
    pub dim: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: [
                [Color::Rgb(0xCC, 0xCC, 0xCC), Color::Rgb(0xD9, 0xD9, 0xD9)],
                [Color::Rgb(0xF2, 0xF2, 0xF2), Color::Rgb(0xFF, 0xFF, 0xFF)],
            ],
            plotline_heading: Color::Rgb(0x00, 0xBF, 0xFF),
            plotline_node: Color::Rgb(0x00, 0x9A, 0xCD),
            character_heading: Color::Rgb(0xFF, 0xC1, 0x25),
            character_node: Color::Rgb(0xCD, 0x9B, 0x1D),
            location_heading: Color::Rgb(0xFF, 0x72, 0x56),
            location_node: Color::Rgb(0xCD, 0x5B, 0x45),
            item_heading: Color::Rgb(0x7F, 0xFF, 0xD4),
            item_node: Color::Rgb(0x66, 0xCD, 0xAA),
            text: Color::Black,
            dim: Color::Rgb(0x55, 0x55, 0x55),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Build the theme from preference overrides, falling back to defaults.
    /// Unrecognized color names are ignored.
    pub fn from_prefs(prefs: &MatrixPrefs) -> Self {
        let mut theme = Theme::default();
        for (key, value) in &prefs.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "bg_00" => theme.background[0][0] = color,
                    "bg_01" => theme.background[0][1] = color,
                    "bg_10" => theme.background[1][0] = color,
                    "bg_11" => theme.background[1][1] = color,
                    "plotline_heading" => theme.plotline_heading = color,
                    "plotline_node" => theme.plotline_node = color,
                    "character_heading" => theme.character_heading = color,
                    "character_node" => theme.character_node = color,
                    "location_heading" => theme.location_heading = color,
                    "location_node" => theme.location_node = color,
                    "item_heading" => theme.item_heading = color,
                    "item_node" => theme.item_node = color,
                    "text" => theme.text = color,
                    "dim" => theme.dim = color,
                    _ => {}
                }
            }
        }
        theme
    }

    pub fn kind_heading(&self, kind: Kind) -> Color {
        match kind {
            Kind::PlotLine => self.plotline_heading,
            Kind::Character => self.character_heading,
            Kind::Location => self.location_heading,
            Kind::Item => self.item_heading,
        }
    }

    /// Color of the filled marker in an "on" cell.
    pub fn kind_node(&self, kind: Kind) -> Color {
        match kind {
            Kind::PlotLine => self.plotline_node,
            Kind::Character => self.character_node,
            Kind::Location => self.location_node,
            Kind::Item => self.item_node,
        }
    }

    /// Checkerboard cell background: `palette[row % 2][col % 2]`.
    pub fn cell_background(&self, row: usize, col: usize) -> Color {
        let (r, c) = background_parity(row, col);
        self.background[r][c]
    }

    /// Background for a row-title label: the column-parity-1 shade,
    /// alternating by row only.
    pub fn row_title_background(&self, row: usize) -> Color {
        self.background[row % 2][1]
    }
}

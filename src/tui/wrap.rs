use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Wrap width for plot-line notes shown in the hover row.
pub const NOTE_WIDTH: usize = 30;

/// Greedy word wrap. Words longer than the width are split by grapheme so
/// nothing is lost. Empty input yields no lines.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        for piece in split_long_word(word, width) {
            let needed = if current.is_empty() {
                piece.width()
            } else {
                current.width() + 1 + piece.width()
            };
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&piece);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn split_long_word(word: &str, width: usize) -> Vec<String> {
    if word.width() <= width {
        return vec![word.to_string()];
    }
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for g in word.graphemes(true) {
        if piece.width() + g.width() > width && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
        }
        piece.push_str(g);
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

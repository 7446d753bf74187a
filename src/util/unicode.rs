use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Break `s` into lines of at most `max_cells` terminal cells, splitting
/// between graphemes. Always yields at least one line.
pub fn wrap_to_width(s: &str, max_cells: usize) -> Vec<String> {
    let max_cells = max_cells.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut width = 0;
    for grapheme in s.graphemes(true) {
        let gw = display_width(grapheme);
        if width + gw > max_cells && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            width = 0;
        }
        current.push_str(grapheme);
        width += gw;
    }
    lines.push(current);
    lines
}

/// Next grapheme boundary after `byte_offset`. Returns None if at end.
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset >= s.len() {
        return None;
    }
    if let Some((i, _)) = s[byte_offset..].grapheme_indices(true).nth(1) {
        return Some(byte_offset + i);
    }
    Some(s.len())
}

/// Previous grapheme boundary before `byte_offset`. Returns None if at start.
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset == 0 {
        return None;
    }
    s[..byte_offset]
        .grapheme_indices(true)
        .last()
        .map(|(i, _)| i)
}

/// Start of the whitespace-delimited word before `byte_offset`.
pub fn word_boundary_left(s: &str, byte_offset: usize) -> usize {
    let graphemes: Vec<(usize, &str)> = s[..byte_offset].grapheme_indices(true).collect();
    let is_space = |g: &str| g.chars().all(char::is_whitespace);

    let mut idx = graphemes.len();
    while idx > 0 && is_space(graphemes[idx - 1].1) {
        idx -= 1;
    }
    while idx > 0 && !is_space(graphemes[idx - 1].1) {
        idx -= 1;
    }
    graphemes.get(idx).map_or(byte_offset, |(i, _)| *i)
}

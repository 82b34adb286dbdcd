use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…`
/// if anything was cut.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 1 {
        return "\u{2026}".to_string();
    }
    let budget = max_cells - 1;
    let mut width = 0;
    let mut out = String::new();
    for grapheme in s.graphemes(true) {
        let gw = display_width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        out.push_str(grapheme);
    }
    out.push('\u{2026}');
    out
}

/// Next grapheme boundary after `byte_offset`. None at end of string.
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset >= s.len() {
        return None;
    }
    match s[byte_offset..].grapheme_indices(true).nth(1) {
        Some((i, _)) => Some(byte_offset + i),
        None => Some(s.len()),
    }
}

/// Previous grapheme boundary before `byte_offset`. None at start.
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset == 0 {
        return None;
    }
    let mut last = 0;
    for (i, _) in s[..byte_offset].grapheme_indices(true) {
        last = i;
    }
    Some(last)
}

/// Greedy word-wrap into rows no wider than `width` cells. Words longer than
/// a full row are split mid-word. Blank input lines survive as blank rows.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let mut row = String::new();
        let mut row_w = 0usize;
        for word in line.split_whitespace() {
            let ww = display_width(word);
            if row_w > 0 && row_w + 1 + ww <= width {
                row.push(' ');
                row.push_str(word);
                row_w += 1 + ww;
            } else if ww <= width {
                if row_w > 0 {
                    rows.push(std::mem::take(&mut row));
                }
                row.push_str(word);
                row_w = ww;
            } else {
                if row_w > 0 {
                    rows.push(std::mem::take(&mut row));
                    row_w = 0;
                }
                split_long_word(word, width, &mut rows, &mut row, &mut row_w);
            }
        }
        rows.push(std::mem::take(&mut row));
    }
    rows
}

fn split_long_word(
    word: &str,
    width: usize,
    rows: &mut Vec<String>,
    row: &mut String,
    row_w: &mut usize,
) {
    for grapheme in word.graphemes(true) {
        let gw = display_width(grapheme);
        if *row_w + gw > width && *row_w > 0 {
            rows.push(std::mem::take(row));
            *row_w = 0;
        }
        row.push_str(grapheme);
        *row_w += gw;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── display_width / truncate ───────────────────────────────────

    #[test]
    fn width_ascii_and_cjk() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width("你好"), 4);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn truncate_fits() {
        assert_eq!(truncate_to_width("hi", 10), "hi");
        assert_eq!(truncate_to_width("hello", 5), "hello");
    }

    #[test]
    fn truncate_cuts_with_ellipsis() {
        assert_eq!(truncate_to_width("hello world", 8), "hello w\u{2026}");
        assert_eq!(truncate_to_width("hello", 1), "\u{2026}");
        assert_eq!(truncate_to_width("hello", 0), "");
    }

    #[test]
    fn truncate_respects_wide_graphemes() {
        // "你好世界" is 8 cells; 5 cells leaves room for 你好 + …
        assert_eq!(truncate_to_width("你好世界", 5), "你好\u{2026}");
    }

    // ── grapheme boundaries ────────────────────────────────────────

    #[test]
    fn boundaries_ascii() {
        assert_eq!(next_grapheme_boundary("abc", 0), Some(1));
        assert_eq!(next_grapheme_boundary("abc", 2), Some(3));
        assert_eq!(next_grapheme_boundary("abc", 3), None);
        assert_eq!(prev_grapheme_boundary("abc", 3), Some(2));
        assert_eq!(prev_grapheme_boundary("abc", 0), None);
    }

    #[test]
    fn boundaries_combining() {
        let s = "cafe\u{0301}!"; // café!
        assert_eq!(next_grapheme_boundary(s, 3), Some(6)); // é → !
        assert_eq!(prev_grapheme_boundary(s, 6), Some(3)); // ! → é start
    }

    // ── wrap_words ─────────────────────────────────────────────────

    #[test]
    fn wrap_simple() {
        assert_eq!(wrap_words("one two three", 7), vec!["one two", "three"]);
    }

    #[test]
    fn wrap_exact_fit() {
        assert_eq!(wrap_words("one two", 7), vec!["one two"]);
    }

    #[test]
    fn wrap_long_word_splits() {
        assert_eq!(wrap_words("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn wrap_preserves_blank_lines() {
        assert_eq!(wrap_words("a\n\nb", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn wrap_zero_width() {
        assert!(wrap_words("anything", 0).is_empty());
    }
}

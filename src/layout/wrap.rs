//! # Word Wrap
//!
//! Greedy wrapping with no hyphenation. Each fragment takes the longest
//! prefix that fits the width, backing up to the last whitespace inside
//! the window; a single word longer than the width is broken at exactly
//! the width. Whitespace at a break point is consumed, never carried onto
//! the next fragment.
//!
//! Widths are measured in characters, matching the fixed-pitch grid of
//! the target printers.

/// Wrap `text` to fragments of at most `width` characters.
///
/// A width below 1 is meaningless and returns the text as one fragment.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width < 1 {
        return vec![text.to_string()];
    }

    let chars: Vec<char> = text.chars().collect();
    let eol = chars.len();
    let mut pos = 0;
    let mut result = Vec::new();

    loop {
        let mut len = eol - pos;
        if len > width {
            len = break_line(&chars, pos, width);
        }
        result.push(chars[pos..pos + len].iter().collect());
        pos += len;

        // consume the whitespace run at the break point
        while pos < eol && chars[pos].is_whitespace() {
            pos += 1;
        }
        if pos >= eol {
            break;
        }
    }
    result
}

/// Length of the next fragment starting at `pos`, at most `max`.
///
/// Scans backward from the window edge for a whitespace boundary; when the
/// window is a single unbroken word, cuts at exactly `max`.
fn break_line(chars: &[char], pos: usize, max: usize) -> usize {
    let mut i = max as isize - 1;
    while i >= 0 && !chars[pos + i as usize].is_whitespace() {
        i -= 1;
    }
    if i < 0 {
        return max;
    }
    while i >= 0 && chars[pos + i as usize].is_whitespace() {
        i -= 1;
    }
    (i + 1) as usize
}

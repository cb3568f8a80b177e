//! # Field Alignment
//!
//! Space-based alignment of a value inside its slot width. This is pure
//! string arithmetic on the fixed-pitch character grid; control-code
//! alignment of whole lines is the dialect's business, not ours.

use crate::dialect::Alignment;

/// Align `text` within `width` columns.
///
/// Returns a string of exactly `width` characters when the text fits.
/// A zero width, or text at or beyond the width, comes back unchanged:
/// truncation and wrapping happen before alignment, never inside it.
pub fn align(text: &str, width: usize, alignment: Alignment) -> String {
    if width == 0 {
        return text.to_string();
    }
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }

    match alignment {
        Alignment::Left => pad_left_aligned(text, width, len),
        Alignment::Right => {
            let mut out = " ".repeat(width - len);
            out.push_str(text);
            out
        }
        Alignment::Center => {
            // odd slack lands on the right
            let left = (width - len) / 2;
            let mut out = " ".repeat(left);
            out.push_str(text);
            out.push_str(&" ".repeat(width - len - left));
            out
        }
        Alignment::Justify => justify(text, width, len),
    }
}

fn pad_left_aligned(text: &str, width: usize, len: usize) -> String {
    let mut out = String::with_capacity(width);
    out.push_str(text);
    out.push_str(&" ".repeat(width - len));
    out
}

/// Distribute slack into the gaps between words, widening gaps closest to
/// the midpoint first and cycling until the line is exactly `width` wide.
/// A single word has no gaps to widen and falls back to left alignment.
fn justify(text: &str, width: usize, len: usize) -> String {
    let parts: Vec<&str> = text.split(' ').collect();
    if parts.len() < 2 {
        return pad_left_aligned(text, width, len);
    }

    let middle = (len / 2) as isize;
    let mut order: Vec<(usize, usize)> = Vec::with_capacity(parts.len() - 1);
    let mut offset = 0usize;
    for (gap, part) in parts[..parts.len() - 1].iter().enumerate() {
        offset += part.chars().count();
        order.push((gap, offset));
        offset += 1;
    }
    order.sort_by_key(|&(_, off)| ((middle - off as isize).abs(), off));

    let mut extra = vec![0usize; parts.len() - 1];
    let mut slack = width - len;
    'distribute: loop {
        for &(gap, _) in &order {
            if slack == 0 {
                break 'distribute;
            }
            extra[gap] += 1;
            slack -= 1;
        }
    }

    let mut out = String::with_capacity(width);
    for (i, part) in parts.iter().enumerate() {
        out.push_str(part);
        if let Some(widen) = extra.get(i) {
            out.push_str(&" ".repeat(1 + widen));
        }
    }
    out
}

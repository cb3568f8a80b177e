//! # Line Templates
//!
//! A template is a string where every run of `_` marks a value field and
//! everything else passes through as literal text:
//!
//! ```text
//! "Item: __________ Qty: ___"
//!         └ value 0 ┘      └ value 1
//! ```
//!
//! Parsing splits the string into [`Slot`]s: literal text slots and value
//! slots with dense indices `0..N` assigned left to right. A value slot's
//! width is the length of its underscore run; a text slot's width is its
//! visible character count after control characters are stripped.
//!
//! There is no escape for a literal `_` — any underscore starts a value
//! field. Embedded newlines survive in literal text and split the composed
//! output into multiple physical lines.

/// One parsed unit of a line template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// Literal text, emitted verbatim on the first physical line.
    Text { content: String, width: usize },
    /// A data field of fixed width, filled per row from a [`FieldResult`].
    ///
    /// [`FieldResult`]: super::FieldResult
    Value { index: usize, width: usize },
}

impl Slot {
    pub fn width(&self) -> usize {
        match self {
            Slot::Text { width, .. } => *width,
            Slot::Value { width, .. } => *width,
        }
    }
}

/// Parsed content of a line template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    slots: Vec<Slot>,
    value_count: usize,
}

impl Template {
    /// Parse a template string. Never fails: an empty string yields an
    /// empty slot list.
    pub fn parse(template: &str) -> Template {
        let chars: Vec<char> = template.chars().collect();
        let mut slots = Vec::new();
        let mut pending = String::new();
        let mut value_count = 0;

        let mut i = 0;
        while i < chars.len() {
            if chars[i] == '_' {
                flush_text(&mut slots, &mut pending);

                let start = i;
                while i < chars.len() && chars[i] == '_' {
                    i += 1;
                }
                slots.push(Slot::Value { index: value_count, width: i - start });
                value_count += 1;
            } else {
                pending.push(chars[i]);
                i += 1;
            }
        }
        flush_text(&mut slots, &mut pending);

        Template { slots, value_count }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Number of value slots, which is also the length of the field-result
    /// array a row must supply.
    pub fn value_count(&self) -> usize {
        self.value_count
    }

    /// Sum of all slot widths.
    pub fn total_width(&self) -> usize {
        self.slots.iter().map(Slot::width).sum()
    }
}

fn flush_text(slots: &mut Vec<Slot>, pending: &mut String) {
    if pending.is_empty() {
        return;
    }
    let content = strip_control(pending);
    pending.clear();

    let width = content.chars().count();
    if width == 0 {
        return;
    }
    slots.push(Slot::Text { content, width });
}

/// Remove control characters except LF, which separates physical lines.
pub(crate) fn strip_control(text: &str) -> String {
    text.chars()
        .filter(|&c| !(('\x00'..='\x09').contains(&c) || ('\x0B'..='\x1F').contains(&c)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_and_values_alternate() {
        let t = Template::parse("Item: _____ Qty: ___");
        assert_eq!(
            t.slots(),
            &[
                Slot::Text { content: "Item: ".into(), width: 6 },
                Slot::Value { index: 0, width: 5 },
                Slot::Text { content: " Qty: ".into(), width: 6 },
                Slot::Value { index: 1, width: 3 },
            ]
        );
        assert_eq!(t.value_count(), 2);
    }

    #[test]
    fn all_placeholders_is_one_value() {
        let t = Template::parse("________");
        assert_eq!(t.slots(), &[Slot::Value { index: 0, width: 8 }]);
    }

    #[test]
    fn adjacent_runs_merge() {
        // no separator means one maximal run, not two slots
        let t = Template::parse("___" );
        assert_eq!(t.value_count(), 1);

        let t = Template::parse("___ ___");
        assert_eq!(t.value_count(), 2);
        assert_eq!(t.slots()[1], Slot::Text { content: " ".into(), width: 1 });
    }

    #[test]
    fn empty_template_has_no_slots() {
        assert!(Template::parse("").slots().is_empty());
    }

    #[test]
    fn control_characters_are_stripped_from_text() {
        let t = Template::parse("a\tb: __");
        assert_eq!(t.slots()[0], Slot::Text { content: "ab: ".into(), width: 4 });
    }

    #[test]
    fn all_control_text_is_dropped_entirely() {
        let t = Template::parse("\t\x01__");
        assert_eq!(t.slots(), &[Slot::Value { index: 0, width: 2 }]);
    }

    #[test]
    fn newline_survives_in_text() {
        let t = Template::parse("Total: ___\n\n");
        assert_eq!(t.slots()[2], Slot::Text { content: "\n\n".into(), width: 2 });
    }

    #[test]
    fn widths_sum_to_stripped_length() {
        for template in ["___ ___", "a: __ b: ____", "x\ty__", "___"] {
            let t = Template::parse(template);
            assert_eq!(t.total_width(), strip_control(template).chars().count());
        }
    }

    #[test]
    fn indices_are_dense_left_to_right() {
        let t = Template::parse("_ __ ___ ____");
        let indices: Vec<usize> = t
            .slots()
            .iter()
            .filter_map(|s| match s {
                Slot::Value { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }
}

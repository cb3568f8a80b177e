//! # Line Composition
//!
//! Binds one row of field results against a parsed template, producing the
//! physical output lines: one first line laid out exactly on the template
//! grid, plus continuation lines when a value wraps or contains embedded
//! newlines.
//!
//! Missing values render as a `%` filler run of the slot width — a visible
//! "no data" marker, not an error. The one hard error is a field-result
//! array whose length does not match the template's value-slot count; that
//! is a structural mismatch between template and binding code which cannot
//! be guessed around.

use crate::dialect::{Alignment, Dialect, FontStyle};
use crate::error::RenglonError;
use crate::output::{Run, StyledLine};

use super::align::align;
use super::template::{Slot, Template, strip_control};
use super::wrap::wrap;

/// Filler character for a value slot with no data.
const MISSING: char = '%';

/// One resolved value for one value slot on one row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldResult {
    pub value: Option<String>,
    pub word_wrap: bool,
    pub alignment: Alignment,
    pub style: FontStyle,
}

impl FieldResult {
    pub fn new(value: impl Into<String>) -> Self {
        FieldResult { value: Some(value.into()), ..Default::default() }
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn wrapped(mut self) -> Self {
        self.word_wrap = true;
        self
    }

    pub fn styled(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }
}

/// Compose the physical lines for one row of field results.
///
/// Whole-line decorations (alignment code, print style, font) are not
/// applied here; the owning report item attaches them to the element it
/// builds from these lines.
pub fn compose(
    template: &Template,
    results: &[FieldResult],
    dialect: &dyn Dialect,
    repeat_static_items: bool,
) -> Result<Vec<StyledLine>, RenglonError> {
    if results.len() != template.value_count() {
        return Err(RenglonError::FieldCount {
            expected: template.value_count(),
            supplied: results.len(),
        });
    }

    let mut fragments: Vec<Option<Vec<String>>> = vec![None; template.value_count()];
    let mut accum = LineAccum::default();

    // first line: literal text verbatim, each value aligned into its slot
    for slot in template.slots() {
        match slot {
            Slot::Text { content, .. } => accum.text(content),
            Slot::Value { index, width } => {
                let field = &results[*index];
                let content = first_line_value(field, *width, *index, &mut fragments);
                accum.run(Run::styled(content, dialect.font_style(field.style)));
            }
        }
    }

    // continuation lines: one per remaining wrapped fragment, the longest
    // field decides how many
    let max_fragments = fragments.iter().flatten().map(Vec::len).max().unwrap_or(0);
    for k in 1..max_fragments {
        accum.newline();
        for slot in template.slots() {
            match slot {
                Slot::Text { content, width } => {
                    if repeat_static_items {
                        accum.text(content);
                    } else {
                        accum.run(Run::plain(" ".repeat(*width)));
                    }
                }
                Slot::Value { index, width } => {
                    let field = &results[*index];
                    let content = match &fragments[*index] {
                        Some(list) if list.len() > k => align(&list[k], *width, field.alignment),
                        _ => " ".repeat(*width),
                    };
                    accum.run(Run::styled(content, dialect.font_style(field.style)));
                }
            }
        }
    }

    Ok(accum.finish())
}

/// First-line content for one value slot; stores the slot's wrapped
/// fragments for the continuation pass.
fn first_line_value(
    field: &FieldResult,
    width: usize,
    index: usize,
    fragments: &mut [Option<Vec<String>>],
) -> String {
    let Some(raw) = &field.value else {
        return MISSING.to_string().repeat(width);
    };

    let cleaned = strip_control(raw);
    let mut segments = cleaned.split('\n');
    // split always yields at least one segment
    let first = segments.next().unwrap_or_default();

    let content = if first.chars().count() > width {
        let wrapped = wrap(first, width);
        if field.word_wrap {
            let aligned = align(&wrapped[0], width, field.alignment);
            add_fragments(fragments, index, wrapped);
            aligned
        } else {
            // visually truncated, but the full segment still reappears
            // wrapped on continuation lines
            add_fragments(fragments, index, wrapped);
            first.chars().take(width).collect()
        }
    } else {
        add_fragments(fragments, index, vec![first.to_string()]);
        align(first, width, field.alignment)
    };

    // segments past an embedded newline always wrap
    for segment in segments {
        add_fragments(fragments, index, wrap(segment, width));
    }
    content
}

fn add_fragments(fragments: &mut [Option<Vec<String>>], index: usize, items: Vec<String>) {
    match &mut fragments[index] {
        Some(list) => list.extend(items),
        slot => *slot = Some(items),
    }
}

/// Accumulates runs into physical lines, splitting on embedded newlines in
/// literal text.
#[derive(Default)]
struct LineAccum {
    done: Vec<StyledLine>,
    current: StyledLine,
}

impl LineAccum {
    fn text(&mut self, content: &str) {
        for (i, part) in content.split('\n').enumerate() {
            if i > 0 {
                self.newline();
            }
            if !part.is_empty() {
                self.current.push(Run::plain(part));
            }
        }
    }

    fn run(&mut self, run: Run) {
        self.current.push(run);
    }

    fn newline(&mut self) {
        self.done.push(std::mem::take(&mut self.current));
    }

    fn finish(mut self) -> Vec<StyledLine> {
        self.done.push(self.current);
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{CodePair, EscPos};

    fn plain_lines(lines: &[StyledLine]) -> Vec<String> {
        lines.iter().map(StyledLine::plain_text).collect()
    }

    #[test]
    fn two_slots_align_into_the_grid() {
        let template = Template::parse("___ ___");
        let results = [
            FieldResult::new("5"),
            FieldResult::new("300").aligned(Alignment::Right),
        ];
        let lines = compose(&template, &results, &EscPos, false).unwrap();
        assert_eq!(plain_lines(&lines), vec!["5   300"]);
    }

    #[test]
    fn first_line_width_equals_template_width() {
        let template = Template::parse("Item: ________ x__");
        let results = [
            FieldResult::new("Coffee").aligned(Alignment::Left),
            FieldResult::new("2").aligned(Alignment::Right),
        ];
        let lines = compose(&template, &results, &EscPos, false).unwrap();
        assert_eq!(lines[0].plain_text().chars().count(), template.total_width());
    }

    #[test]
    fn missing_value_renders_filler() {
        let template = Template::parse("x ____");
        let lines = compose(&template, &[FieldResult::default()], &EscPos, false).unwrap();
        assert_eq!(plain_lines(&lines), vec!["x %%%%"]);
    }

    #[test]
    fn result_count_mismatch_is_a_hard_error() {
        let template = Template::parse("___ ___");
        let err = compose(&template, &[FieldResult::new("x")], &EscPos, false).unwrap_err();
        assert!(matches!(err, RenglonError::FieldCount { expected: 2, supplied: 1 }));
    }

    #[test]
    fn wrapped_value_produces_continuation_lines() {
        let template = Template::parse("| _________ |");
        let results = [FieldResult::new("the quick brown fox").wrapped()];
        let lines = compose(&template, &results, &EscPos, false).unwrap();
        assert_eq!(plain_lines(&lines), vec!["| the quick |", "  brown fox  "]);
    }

    #[test]
    fn repeat_static_items_keeps_literals_on_continuations() {
        let template = Template::parse("| _________ |");
        let results = [FieldResult::new("the quick brown fox").wrapped()];
        let lines = compose(&template, &results, &EscPos, true).unwrap();
        assert_eq!(plain_lines(&lines), vec!["| the quick |", "| brown fox |"]);
    }

    #[test]
    fn truncated_value_reappears_wrapped() {
        let template = Template::parse("_____");
        let results = [FieldResult::new("alpha beta")];
        let lines = compose(&template, &results, &EscPos, false).unwrap();
        // first line shows the hard cut, the rest wraps below it
        assert_eq!(plain_lines(&lines), vec!["alpha", "beta "]);
    }

    #[test]
    fn embedded_newline_always_wraps_later_segments() {
        let template = Template::parse("______");
        let results = [FieldResult::new("head\ntail one two")];
        let lines = compose(&template, &results, &EscPos, false).unwrap();
        assert_eq!(plain_lines(&lines), vec!["head  ", "tail  ", "one   ", "two   "]);
    }

    #[test]
    fn exhausted_fields_pad_with_spaces() {
        let template = Template::parse("___ ___");
        let results = [
            FieldResult::new("one two thr").wrapped(),
            FieldResult::new("x"),
        ];
        let lines = compose(&template, &results, &EscPos, false).unwrap();
        assert_eq!(plain_lines(&lines), vec!["one x  ", "two    ", "thr    "]);
    }

    #[test]
    fn style_pair_wraps_value_runs_only() {
        let template = Template::parse("n: __");
        let results = [FieldResult::new("42").styled(FontStyle::Emphasized)];
        let lines = compose(&template, &results, &EscPos, false).unwrap();
        let runs = &lines[0].runs;
        assert_eq!(runs[0].style, None);
        assert_eq!(
            runs[1].style,
            Some(CodePair::new([0x1B, 0x45, 0x01], [0x1B, 0x45, 0x00]))
        );
    }

    #[test]
    fn newline_in_template_splits_physical_lines() {
        let template = Template::parse("Total: ____\n\n");
        let results = [FieldResult::new("9.50").aligned(Alignment::Right)];
        let lines = compose(&template, &results, &EscPos, false).unwrap();
        assert_eq!(plain_lines(&lines), vec!["Total: 9.50", "", ""]);
    }

    #[test]
    fn empty_template_is_one_blank_line() {
        let lines = compose(&Template::parse(""), &[], &EscPos, false).unwrap();
        assert_eq!(plain_lines(&lines), vec![""]);
    }

    #[test]
    fn control_characters_are_stripped_from_values() {
        let template = Template::parse("____");
        let results = [FieldResult::new("a\tb")];
        let lines = compose(&template, &results, &EscPos, false).unwrap();
        assert_eq!(plain_lines(&lines), vec!["ab  "]);
    }
}

//! # Output Elements
//!
//! The render pass produces a flat arena of [`OutputElement`]s, one per
//! rendered report item, in document order. Each element is either a list
//! of styled text lines or an opaque byte blob (barcodes, cuts, logos).
//! The paginator walks this arena, counts physical lines, and serializes
//! elements into the output buffer, possibly splitting a multi-line
//! element across a page boundary.
//!
//! Styling is carried as [`CodePair`]s at two levels: per-run pairs wrap
//! individual field values inside a line, whole-line decorations wrap each
//! physical line. Both serialize by plain concatenation — start codes in
//! application order, content, end codes in the same order.

use crate::dialect::{CodePair, Dialect};
use crate::encoding::TextEncoding;

// ============================================================================
// STYLED TEXT
// ============================================================================

/// A run of text with an optional style pair around it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub style: Option<CodePair>,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Run { text: text.into(), style: None }
    }

    pub fn styled(text: impl Into<String>, style: Option<CodePair>) -> Self {
        Run { text: text.into(), style }
    }
}

/// One physical output line composed of styled runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledLine {
    pub runs: Vec<Run>,
}

impl StyledLine {
    pub fn push(&mut self, run: Run) {
        self.runs.push(run);
    }

    /// Concatenated text content without any style codes.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

// ============================================================================
// ELEMENTS
// ============================================================================

/// Element content: styled lines or an opaque control-code blob.
#[derive(Debug, Clone)]
pub enum Payload {
    Lines { lines: Vec<StyledLine>, decorations: Vec<CodePair> },
    Bytes(Vec<u8>),
}

/// One rendered report item in the output arena.
///
/// `parent` points at the element this one was rendered under, mirroring
/// the report-item tree; the paginator uses it when re-emitting flagged
/// elements after a page break.
#[derive(Debug, Clone)]
pub struct OutputElement {
    pub parent: Option<usize>,
    pub payload: Payload,
    /// Write a line feed after the last physical line.
    pub append_newline: bool,
    /// Allow a page break between this element's lines.
    pub break_inside: bool,
    /// Re-emit this element at the top of every following page.
    pub repeat_on_new_page: bool,
}

impl OutputElement {
    pub fn lines(parent: Option<usize>, lines: Vec<StyledLine>, decorations: Vec<CodePair>) -> Self {
        OutputElement {
            parent,
            payload: Payload::Lines { lines, decorations },
            append_newline: true,
            break_inside: true,
            repeat_on_new_page: false,
        }
    }

    pub fn bytes(parent: Option<usize>, data: Vec<u8>) -> Self {
        OutputElement {
            parent,
            payload: Payload::Bytes(data),
            append_newline: false,
            break_inside: true,
            repeat_on_new_page: false,
        }
    }

    /// Physical lines this element occupies on the page. Byte blobs do not
    /// advance the line counter.
    pub fn line_count(&self) -> usize {
        match &self.payload {
            Payload::Lines { lines, .. } => lines.len(),
            Payload::Bytes(_) => 0,
        }
    }

    /// Serialize one physical line, including its trailing line feed.
    ///
    /// The line feed is suppressed on the element's last line when
    /// `append_newline` is off (barcode captions, inline prompts).
    pub fn write_line(
        &self,
        index: usize,
        buf: &mut Vec<u8>,
        encoding: &TextEncoding,
        dialect: &dyn Dialect,
    ) {
        let Payload::Lines { lines, decorations } = &self.payload else {
            return;
        };
        let Some(line) = lines.get(index) else {
            return;
        };

        for pair in decorations {
            buf.extend_from_slice(&pair.start);
        }
        for run in &line.runs {
            if let Some(style) = &run.style {
                buf.extend_from_slice(&style.start);
                encoding.encode_into(&run.text, buf);
                buf.extend_from_slice(&style.end);
            } else {
                encoding.encode_into(&run.text, buf);
            }
        }
        for pair in decorations {
            buf.extend_from_slice(&pair.end);
        }

        let last = index + 1 == lines.len();
        if !last || self.append_newline {
            buf.extend_from_slice(&dialect.line_feed());
        }
    }

    /// Serialize the whole element.
    pub fn write_all(&self, buf: &mut Vec<u8>, encoding: &TextEncoding, dialect: &dyn Dialect) {
        match &self.payload {
            Payload::Lines { lines, .. } => {
                for index in 0..lines.len() {
                    self.write_line(index, buf, encoding, dialect);
                }
            }
            Payload::Bytes(data) => {
                buf.extend_from_slice(data);
                if self.append_newline {
                    buf.extend_from_slice(&dialect.line_feed());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::EscPos;

    fn line(text: &str) -> StyledLine {
        StyledLine { runs: vec![Run::plain(text)] }
    }

    #[test]
    fn plain_lines_serialize_with_line_feeds() {
        let elem = OutputElement::lines(None, vec![line("one"), line("two")], Vec::new());
        let mut buf = Vec::new();
        elem.write_all(&mut buf, &TextEncoding::Ascii, &EscPos);
        assert_eq!(buf, b"one\ntwo\n");
    }

    #[test]
    fn append_newline_off_skips_only_last_feed() {
        let mut elem = OutputElement::lines(None, vec![line("a"), line("b")], Vec::new());
        elem.append_newline = false;
        let mut buf = Vec::new();
        elem.write_all(&mut buf, &TextEncoding::Ascii, &EscPos);
        assert_eq!(buf, b"a\nb");
    }

    #[test]
    fn run_style_wraps_value_only() {
        let styled = StyledLine {
            runs: vec![
                Run::plain("Qty: "),
                Run::styled("7", Some(CodePair::new([0x1B, 0x45, 0x01], [0x1B, 0x45, 0x00]))),
            ],
        };
        let elem = OutputElement::lines(None, vec![styled], Vec::new());
        let mut buf = Vec::new();
        elem.write_all(&mut buf, &TextEncoding::Ascii, &EscPos);
        assert_eq!(buf, b"Qty: \x1B\x45\x017\x1B\x45\x00\n");
    }

    #[test]
    fn decorations_bracket_every_line() {
        let deco = vec![CodePair::new([0x1B, b'E'], [0x1B, b'F'])];
        let elem = OutputElement::lines(None, vec![line("x"), line("y")], deco);
        let mut buf = Vec::new();
        elem.write_all(&mut buf, &TextEncoding::Ascii, &EscPos);
        assert_eq!(buf, b"\x1BEx\x1BF\n\x1BEy\x1BF\n");
    }

    #[test]
    fn byte_payload_has_no_line_count() {
        let elem = OutputElement::bytes(None, vec![0x1D, 0x56, 0x00]);
        assert_eq!(elem.line_count(), 0);
        let mut buf = Vec::new();
        elem.write_all(&mut buf, &TextEncoding::Ascii, &EscPos);
        assert_eq!(buf, vec![0x1D, 0x56, 0x00]);
    }

    #[test]
    fn plain_text_drops_codes() {
        let styled = StyledLine {
            runs: vec![Run::plain("a"), Run::styled("b", Some(CodePair::start_only([0x1B])))],
        };
        assert_eq!(styled.plain_text(), "ab");
    }
}

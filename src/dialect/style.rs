//! # Abstract Text Styling
//!
//! Printer-independent styling vocabulary. Report items and field results
//! carry these values; each [`Dialect`](super::Dialect) translates them to
//! the control codes of its family, returning `None` for combinations the
//! family cannot express.
//!
//! ## Coverage by family
//!
//! | Style | ESC/P | ESC/POS | Star line |
//! |-------|-------|---------|-----------|
//! | Emphasized | ESC E / ESC F | ESC E 1 / ESC E 0 | ESC E / ESC F |
//! | Underline | ESC - n | ESC - n | ESC - n |
//! | Double underline | — | ESC - 2 | — |
//! | Upperline | — | — | ESC _ n |
//! | Italic | ESC 4 / ESC 5 | — | — |
//! | Inverse | — | GS B n | ESC 4 / ESC 5 |
//!
//! The italic/inverse rows share bytes on purpose: `ESC 4` means *italic
//! on* to an ESC/P printer and *inverse on* to a Star printer.

/// Horizontal placement of content within a width.
///
/// Used both for a field's value inside its slot (spacing-based, computed
/// by the engine) and for a whole line on the page (control-code based,
/// delegated to the printer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Right,
    Center,
    /// Distribute slack into the gaps between words
    Justify,
}

/// Character styles applicable to a field or a whole line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Emphasized,
    Underline,
    UnderlineDouble,
    Upperline,
    Italic,
    Inverse,
}

/// Character pitch / density selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pitch {
    /// 10 characters per inch
    Pica,
    /// 12 characters per inch
    Elite,
    /// ~17 characters per inch (SI mode)
    Condensed,
    Pitch12,
    Pitch15,
    Pitch16,
}

/// Combined print style for a whole line: optional pitch plus magnification.
///
/// The default carries no selection at all, leaving whatever the previous
/// lines established ("as before").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrintStyle {
    pub pitch: Option<Pitch>,
    pub double_width: bool,
    pub double_height: bool,
}

impl PrintStyle {
    /// True when no selection is carried and no codes should be emitted.
    pub fn is_as_before(&self) -> bool {
        self.pitch.is_none() && !self.double_width && !self.double_height
    }

    pub fn pitch(pitch: Pitch) -> Self {
        PrintStyle { pitch: Some(pitch), ..Default::default() }
    }

    pub fn double_width() -> Self {
        PrintStyle { double_width: true, ..Default::default() }
    }

    pub fn double_height() -> Self {
        PrintStyle { double_height: true, ..Default::default() }
    }

    pub fn double_size() -> Self {
        PrintStyle { double_width: true, double_height: true, ..Default::default() }
    }
}

/// Character font selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontType {
    /// Standard font (12×24 dots on most receipt printers)
    #[default]
    A,
    /// Compressed font (9×24 dots)
    B,
    C,
    /// OCR font, for machine-read documents
    Ocr,
}

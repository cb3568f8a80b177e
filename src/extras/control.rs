//! # Control Items
//!
//! Small byte-emitting items: paper cuts, feeds, code-page switches, line
//! spacing, flash logos, free text and caller-supplied escape codes. Each
//! is a thin wrapper over one dialect command.

use super::{ExtraItem, RenderEnv};
use crate::dialect::{Alignment, CutMode, FeedUnit, LogoSize};
use crate::error::RenglonError;

// ============================================================================
// CUT PAPER
// ============================================================================

/// Cut the paper (receipt printers).
pub struct CutPaper {
    mode: CutMode,
}

impl CutPaper {
    pub fn new(mode: CutMode) -> Self {
        CutPaper { mode }
    }
}

impl ExtraItem for CutPaper {
    fn render(&self, env: &RenderEnv<'_>) -> Result<Option<Vec<u8>>, RenglonError> {
        Ok(Some(env.dialect.cut(self.mode)))
    }
}

// ============================================================================
// EMPTY SPACE
// ============================================================================

/// Feed blank paper, by whole lines or by dot rows.
///
/// Only valid on continuous paper: feeding bypasses the line counter, so
/// using it in a paged report is an error.
pub struct EmptySpace {
    unit: FeedUnit,
    amount: u8,
}

impl EmptySpace {
    /// Feed `n` text lines at the current line spacing.
    pub fn lines(n: u8) -> Self {
        EmptySpace { unit: FeedUnit::Lines, amount: n }
    }

    /// Feed `n` dot rows.
    pub fn dots(n: u8) -> Self {
        EmptySpace { unit: FeedUnit::Dots, amount: n }
    }
}

impl ExtraItem for EmptySpace {
    fn render(&self, env: &RenderEnv<'_>) -> Result<Option<Vec<u8>>, RenglonError> {
        if env.paged {
            return Err(RenglonError::NotPageable("EmptySpace"));
        }
        Ok(Some(env.dialect.feed(self.unit, self.amount)))
    }
}

// ============================================================================
// CODE PAGE
// ============================================================================

/// Switch the printer's character code page.
///
/// This changes how the printer draws bytes above 0x7F; pair it with the
/// matching [`TextEncoding`](crate::encoding::TextEncoding) on the report
/// so the emitted bytes and the printed glyphs agree.
pub struct CodePage {
    page: u8,
}

impl CodePage {
    pub fn new(page: u8) -> Self {
        CodePage { page }
    }
}

impl ExtraItem for CodePage {
    fn render(&self, env: &RenderEnv<'_>) -> Result<Option<Vec<u8>>, RenglonError> {
        Ok(Some(env.dialect.code_page(self.page)))
    }
}

// ============================================================================
// LINE SPACING
// ============================================================================

/// Set or reset the line spacing.
pub struct LineSpacing {
    dots: u8,
}

impl LineSpacing {
    /// Space lines `n` dot units apart.
    pub fn dots(n: u8) -> Self {
        LineSpacing { dots: n }
    }

    /// Restore the printer's default spacing.
    pub fn reset() -> Self {
        LineSpacing { dots: 0 }
    }
}

impl ExtraItem for LineSpacing {
    fn render(&self, env: &RenderEnv<'_>) -> Result<Option<Vec<u8>>, RenglonError> {
        Ok(Some(env.dialect.line_spacing(self.dots)))
    }

    fn append_newline(&self) -> bool {
        false
    }
}

// ============================================================================
// NV LOGO
// ============================================================================

/// Print a logo stored in the printer's flash memory.
pub struct NvLogo {
    index: u8,
    size: LogoSize,
    alignment: Alignment,
}

impl NvLogo {
    /// Print logo `index`, normal size, centered.
    pub fn new(index: u8) -> Self {
        NvLogo { index, size: LogoSize::Normal, alignment: Alignment::Center }
    }

    pub fn size(mut self, size: LogoSize) -> Self {
        self.size = size;
        self
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

impl ExtraItem for NvLogo {
    fn render(&self, env: &RenderEnv<'_>) -> Result<Option<Vec<u8>>, RenglonError> {
        let mut out = Vec::with_capacity(8);
        if let Some(align) = env.dialect.align(self.alignment) {
            out.extend_from_slice(&align);
        }
        out.extend_from_slice(&env.dialect.nv_logo(self.index, self.size));
        Ok(Some(out))
    }

    fn append_newline(&self) -> bool {
        false
    }
}

// ============================================================================
// FREE TEXT
// ============================================================================

/// Verbatim text written through the report's encoding, outside any
/// template. Meant for receipt mode; embedded line feeds are passed
/// through but not counted against a page.
pub struct FreeText {
    text: String,
    newline: bool,
}

impl FreeText {
    pub fn new(text: impl Into<String>) -> Self {
        FreeText { text: text.into(), newline: true }
    }

    /// Suppress the trailing line feed.
    pub fn no_newline(mut self) -> Self {
        self.newline = false;
        self
    }
}

impl ExtraItem for FreeText {
    fn render(&self, env: &RenderEnv<'_>) -> Result<Option<Vec<u8>>, RenglonError> {
        Ok(Some(env.encoding.encode(&self.text)))
    }

    fn append_newline(&self) -> bool {
        self.newline
    }
}

// ============================================================================
// CUSTOM CODE
// ============================================================================

/// Caller-supplied escape codes written to the stream as-is.
pub struct CustomCode {
    bytes: Vec<u8>,
    newline: bool,
}

impl CustomCode {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        CustomCode { bytes: bytes.into(), newline: true }
    }

    /// Suppress the trailing line feed.
    pub fn no_newline(mut self) -> Self {
        self.newline = false;
        self
    }
}

impl ExtraItem for CustomCode {
    fn render(&self, _env: &RenderEnv<'_>) -> Result<Option<Vec<u8>>, RenglonError> {
        Ok(Some(self.bytes.clone()))
    }

    fn append_newline(&self) -> bool {
        self.newline
    }
}

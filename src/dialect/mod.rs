//! # Printer Dialects
//!
//! A dialect maps the engine's abstract formatting vocabulary — alignment,
//! font styles, print styles, cuts, feeds, symbologies — onto the concrete
//! control-code byte sequences of one printer family. The layout core never
//! hardcodes printer bytes; everything it emits besides text goes through
//! the [`Dialect`] trait.
//!
//! | Dialect | Family | Typical hardware |
//! |---------|--------|------------------|
//! | [`EscP`](escp::EscP) | Epson ESC/P | 9/24-pin dot-matrix (LX/FX series) |
//! | [`EscPos`](escpos::EscPos) | Epson ESC/POS | thermal receipt printers |
//! | [`StarLine`](starline::StarLine) | Star line mode | Star Micronics TSP/SP series |
//!
//! Unknown or unsupported mappings return `None` — the engine then emits
//! plain text with no decoration, which every printer can render.
//!
//! ## Code pairs
//!
//! Every decoration is a self-contained `(start, end)` byte-sequence pair:
//! `start` is written immediately before the decorated content, `end`
//! immediately after. Pairs nest by plain concatenation in application
//! order; no stack-based matching is needed. Single-shot codes (alignment,
//! font selection) are pairs with an empty `end`.

pub mod escp;
pub mod escpos;
pub mod starline;
mod style;

pub use escp::EscP;
pub use escpos::EscPos;
pub use starline::StarLine;
pub use style::{Alignment, FontStyle, FontType, Pitch, PrintStyle};

// ============================================================================
// CONTROL BYTES
// ============================================================================

/// ESC (Escape) - prefix of most commands
pub const ESC: u8 = 0x1B;
/// GS (Group Separator) - extended command prefix (ESC/POS)
pub const GS: u8 = 0x1D;
/// FS (File Separator) - NV graphics prefix (ESC/POS)
pub const FS: u8 = 0x1C;
/// RS (Record Separator) - barcode data terminator (Star line mode)
pub const RS: u8 = 0x1E;
/// LF (Line Feed) - print buffer and advance one line
pub const LF: u8 = 0x0A;
/// FF (Form Feed) - advance to top of next page
pub const FF: u8 = 0x0C;
/// SI (Shift In) - condensed mode on (ESC/P)
pub const SI: u8 = 0x0F;
/// DC2 (Device Control 2) - condensed mode off (ESC/P)
pub const DC2: u8 = 0x12;

// ============================================================================
// CODE PAIRS
// ============================================================================

/// A start/end control-code pair wrapped around decorated content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodePair {
    pub start: Vec<u8>,
    pub end: Vec<u8>,
}

impl CodePair {
    pub fn new(start: impl Into<Vec<u8>>, end: impl Into<Vec<u8>>) -> Self {
        CodePair { start: start.into(), end: end.into() }
    }

    /// A pair with no closing sequence (single-shot codes).
    pub fn start_only(start: impl Into<Vec<u8>>) -> Self {
        CodePair { start: start.into(), end: Vec::new() }
    }

    /// Concatenate several pairs into one: starts in order, ends in order.
    pub fn merged(pairs: impl IntoIterator<Item = CodePair>) -> Self {
        let mut merged = CodePair::default();
        for pair in pairs {
            merged.start.extend_from_slice(&pair.start);
            merged.end.extend_from_slice(&pair.end);
        }
        merged
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_empty() && self.end.is_empty()
    }
}

// ============================================================================
// COMMAND VOCABULARY
// ============================================================================

/// Paper cut variants (GS V on ESC/POS, ESC d on Star).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum CutMode {
    #[default]
    Full = 0,
    Partial = 1,
    FeedAndFull = 2,
    FeedAndPartial = 3,
}

/// Unit for paper feed commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedUnit {
    /// Whole text lines at the current line spacing
    Lines,
    /// Individual dot rows
    Dots,
}

/// Magnification of a flash-stored logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum LogoSize {
    #[default]
    Normal = 0,
    DoubleWidth = 1,
    DoubleHeight = 2,
    Quadruple = 3,
}

/// 1D barcode symbologies.
///
/// Discriminants are the ESC/POS `GS k` function-B codes; Star line mode
/// uses its own mapping (see [`starline`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BarcodeKind {
    UpcA = 65,
    UpcE = 66,
    Ean13 = 67,
    Ean8 = 68,
    Code39 = 69,
    Itf = 70,
    Codabar = 71,
    Code93 = 72,
    Code128 = 73,
}

impl BarcodeKind {
    /// Symbology name for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            BarcodeKind::UpcA => "UPC-A",
            BarcodeKind::UpcE => "UPC-E",
            BarcodeKind::Ean13 => "EAN-13",
            BarcodeKind::Ean8 => "EAN-8",
            BarcodeKind::Code39 => "Code 39",
            BarcodeKind::Itf => "ITF",
            BarcodeKind::Codabar => "Codabar",
            BarcodeKind::Code93 => "Code 93",
            BarcodeKind::Code128 => "Code 128",
        }
    }
}

/// Placement of human-readable interpretation characters around a barcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum HriPosition {
    #[default]
    NotPrinted = 0,
    Above = 1,
    Below = 2,
    Both = 3,
}

/// Font for human-readable interpretation characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum HriFont {
    A = 0,
    #[default]
    B = 1,
}

/// QR code model selection. Discriminants are the ESC/POS function-165 codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum QrModel {
    Model1 = 49,
    #[default]
    Model2 = 50,
    Micro = 51,
}

/// QR error correction level. Discriminants are the ESC/POS function-169 codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum QrLevel {
    #[default]
    L = 48,
    M = 49,
    Q = 50,
    H = 51,
}

// ============================================================================
// DIALECT TRAIT
// ============================================================================

/// One printer family's control-code table.
///
/// Default method bodies carry the ESC/POS-compatible behavior most
/// Epson-style firmware shares; each dialect overrides where its family
/// diverges. Style lookups return `None` for combinations the family cannot
/// express, and the engine degrades to undecorated text.
pub trait Dialect {
    /// Human-readable family name, for logs and CLI listings.
    fn name(&self) -> &'static str;

    /// Initialize printer to power-on defaults (written at stream start).
    fn reset(&self) -> Vec<u8> {
        vec![ESC, b'@']
    }

    /// Print the line buffer and advance one line.
    fn line_feed(&self) -> Vec<u8> {
        vec![LF]
    }

    /// Advance to the top of the next page.
    fn form_feed(&self) -> Vec<u8> {
        vec![FF]
    }

    /// Start/end pair for a character style, if the family supports it.
    fn font_style(&self, _style: FontStyle) -> Option<CodePair> {
        None
    }

    /// Start/end pair for a combined print style (pitch + magnification).
    fn print_style(&self, _style: PrintStyle) -> Option<CodePair> {
        None
    }

    /// One-shot alignment selection code.
    ///
    /// The shared `ESC a` form takes an ASCII digit: `0` left, `1` center,
    /// `2` right, `3` justify.
    fn align(&self, alignment: Alignment) -> Option<Vec<u8>> {
        let n = match alignment {
            Alignment::Left => b'0',
            Alignment::Center => b'1',
            Alignment::Right => b'2',
            Alignment::Justify => b'3',
        };
        Some(vec![ESC, b'a', n])
    }

    /// One-shot font selection code.
    fn font(&self, _font: FontType) -> Option<Vec<u8>> {
        None
    }

    /// Cut the paper (GS V m).
    fn cut(&self, mode: CutMode) -> Vec<u8> {
        vec![GS, b'V', mode as u8]
    }

    /// Select a character code page (ESC t n).
    fn code_page(&self, page: u8) -> Vec<u8> {
        vec![ESC, b't', page]
    }

    /// Feed paper by whole lines (ESC d n) or dot rows (ESC J n).
    fn feed(&self, unit: FeedUnit, amount: u8) -> Vec<u8> {
        match unit {
            FeedUnit::Lines => vec![ESC, b'd', amount],
            FeedUnit::Dots => vec![ESC, b'J', amount],
        }
    }

    /// Set line spacing in dot units; `0` restores the family default.
    fn line_spacing(&self, dots: u8) -> Vec<u8> {
        if dots == 0 { vec![ESC, b'2'] } else { vec![ESC, b'3', dots] }
    }

    /// Print a flash-stored logo (FS p n m).
    fn nv_logo(&self, index: u8, size: LogoSize) -> Vec<u8> {
        vec![FS, b'p', index, size as u8]
    }

    /// Full command sequence for a 1D barcode, `None` if unsupported.
    ///
    /// `data` has already passed the symbology's validation rules.
    fn barcode(
        &self,
        _kind: BarcodeKind,
        _height: u8,
        _module_width: u8,
        _hri: HriPosition,
        _hri_font: HriFont,
        _data: &[u8],
    ) -> Option<Vec<u8>> {
        None
    }

    /// Full store-and-print sequence for a QR code, `None` if unsupported.
    fn qr(&self, _model: QrModel, _module_size: u8, _level: QrLevel, _data: &[u8]) -> Option<Vec<u8>> {
        None
    }

    /// Raster image command (GS v 0) for pre-packed 1-bit rows.
    ///
    /// `packed` holds `ceil(width_dots / 8)` bytes per row, MSB leftmost,
    /// `height_dots` rows.
    fn raster_image(&self, width_dots: u16, height_dots: u16, packed: &[u8]) -> Option<Vec<u8>> {
        let row_bytes = (width_dots as usize).div_ceil(8) as u16;
        let mut cmd = vec![
            GS,
            b'v',
            b'0',
            0,
            (row_bytes % 256) as u8,
            (row_bytes / 256) as u8,
            (height_dots % 256) as u8,
            (height_dots / 256) as u8,
        ];
        cmd.extend_from_slice(packed);
        Some(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bare;
    impl Dialect for Bare {
        fn name(&self) -> &'static str {
            "bare"
        }
    }

    #[test]
    fn default_reset_is_esc_at() {
        assert_eq!(Bare.reset(), vec![0x1B, 0x40]);
    }

    #[test]
    fn default_align_uses_ascii_digits() {
        assert_eq!(Bare.align(Alignment::Left), Some(vec![0x1B, b'a', b'0']));
        assert_eq!(Bare.align(Alignment::Center), Some(vec![0x1B, b'a', b'1']));
        assert_eq!(Bare.align(Alignment::Right), Some(vec![0x1B, b'a', b'2']));
        assert_eq!(Bare.align(Alignment::Justify), Some(vec![0x1B, b'a', b'3']));
    }

    #[test]
    fn default_styles_are_unmapped() {
        assert_eq!(Bare.font_style(FontStyle::Emphasized), None);
        assert_eq!(Bare.barcode(BarcodeKind::Code39, 50, 3, HriPosition::NotPrinted, HriFont::B, b"X"), None);
    }

    #[test]
    fn merged_pairs_concatenate_in_order() {
        let a = CodePair::new(vec![1], vec![2]);
        let b = CodePair::start_only(vec![3]);
        let m = CodePair::merged([a, b]);
        assert_eq!(m.start, vec![1, 3]);
        assert_eq!(m.end, vec![2]);
    }

    #[test]
    fn raster_header_encodes_row_bytes_little_endian() {
        let cmd = Bare.raster_image(16, 2, &[0xFF, 0x00, 0x0F, 0xF0]).unwrap();
        assert_eq!(&cmd[..8], &[0x1D, b'v', b'0', 0, 2, 0, 2, 0]);
        assert_eq!(&cmd[8..], &[0xFF, 0x00, 0x0F, 0xF0]);
    }
}

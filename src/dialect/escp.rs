//! # ESC/P Dialect
//!
//! Control codes for Epson ESC/P 9-pin and 24-pin dot-matrix printers
//! (LX/FX/LQ series). These are the page-oriented workhorses: tractor-fed
//! continuous paper, form feeds between pages, pitch selection down to
//! 15 cpi. No barcode or QR engine on board.
//!
//! ## Style commands
//!
//! | Style | On | Off |
//! |-------|----|----|
//! | Emphasized | 1B 45 | 1B 46 |
//! | Underline | 1B 2D 31 | 1B 2D 30 |
//! | Italic | 1B 34 | 1B 35 |
//! | Double width | 1B 57 01 | 1B 57 00 |
//! | Double height | 1B 77 01 | 1B 77 00 |
//!
//! ## Pitch commands
//!
//! | Pitch | Code |
//! |-------|------|
//! | Pica (10 cpi) | 1B 50 |
//! | Elite (12 cpi) | 1B 4D |
//! | Condensed | 0F (cancel 12) |
//! | 15 cpi | 1B 67 |
//!
//! Pitch selections are modal with no dedicated cancel code, so they
//! contribute to the start sequence only; condensed and magnification
//! carry their cancel codes in the end sequence.

use super::{CodePair, DC2, Dialect, ESC, FontStyle, FontType, Pitch, PrintStyle, SI};

/// Epson ESC/P dot-matrix printer dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct EscP;

impl Dialect for EscP {
    fn name(&self) -> &'static str {
        "ESC/P"
    }

    fn font_style(&self, style: FontStyle) -> Option<CodePair> {
        match style {
            FontStyle::Emphasized => Some(CodePair::new([ESC, b'E'], [ESC, b'F'])),
            FontStyle::Underline => Some(CodePair::new([ESC, b'-', b'1'], [ESC, b'-', b'0'])),
            FontStyle::Italic => Some(CodePair::new([ESC, b'4'], [ESC, b'5'])),
            _ => None,
        }
    }

    fn print_style(&self, style: PrintStyle) -> Option<CodePair> {
        let mut parts = Vec::new();
        match style.pitch {
            Some(Pitch::Pica) => parts.push(CodePair::start_only([ESC, b'P'])),
            Some(Pitch::Elite) => parts.push(CodePair::start_only([ESC, b'M'])),
            Some(Pitch::Condensed) => parts.push(CodePair::new([SI], [DC2])),
            Some(Pitch::Pitch15) => parts.push(CodePair::start_only([ESC, b'g'])),
            Some(Pitch::Pitch12) | Some(Pitch::Pitch16) | None => {}
        }
        if style.double_width {
            parts.push(CodePair::new([ESC, b'W', 1], [ESC, b'W', 0]));
        }
        if style.double_height {
            parts.push(CodePair::new([ESC, b'w', 1], [ESC, b'w', 0]));
        }
        if parts.is_empty() {
            return None;
        }
        Some(CodePair::merged(parts))
    }

    fn font(&self, font: FontType) -> Option<Vec<u8>> {
        // ESC k n typeface selection: 0 Roman, 1 Sans serif
        let n = match font {
            FontType::A => 0,
            FontType::B => 1,
            FontType::C | FontType::Ocr => return None,
        };
        Some(vec![ESC, b'k', n])
    }

    fn code_page(&self, page: u8) -> Vec<u8> {
        // international character set, not a full code page table
        vec![ESC, b'R', page]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emphasized_uses_esc_e_esc_f() {
        let pair = EscP.font_style(FontStyle::Emphasized).unwrap();
        assert_eq!(pair.start, vec![0x1B, 0x45]);
        assert_eq!(pair.end, vec![0x1B, 0x46]);
    }

    #[test]
    fn underline_takes_ascii_digit() {
        let pair = EscP.font_style(FontStyle::Underline).unwrap();
        assert_eq!(pair.start, vec![0x1B, 0x2D, 0x31]);
        assert_eq!(pair.end, vec![0x1B, 0x2D, 0x30]);
    }

    #[test]
    fn italic_supported_inverse_not() {
        assert!(EscP.font_style(FontStyle::Italic).is_some());
        assert_eq!(EscP.font_style(FontStyle::Inverse), None);
        assert_eq!(EscP.font_style(FontStyle::UnderlineDouble), None);
    }

    #[test]
    fn condensed_pairs_si_with_dc2() {
        let pair = EscP.print_style(PrintStyle::pitch(Pitch::Condensed)).unwrap();
        assert_eq!(pair.start, vec![0x0F]);
        assert_eq!(pair.end, vec![0x12]);
    }

    #[test]
    fn pica_has_no_cancel_code() {
        let pair = EscP.print_style(PrintStyle::pitch(Pitch::Pica)).unwrap();
        assert_eq!(pair.start, vec![0x1B, 0x50]);
        assert!(pair.end.is_empty());
    }

    #[test]
    fn condensed_double_width_merges() {
        let style = PrintStyle { pitch: Some(Pitch::Condensed), double_width: true, ..Default::default() };
        let pair = EscP.print_style(style).unwrap();
        assert_eq!(pair.start, vec![0x0F, 0x1B, 0x57, 0x01]);
        assert_eq!(pair.end, vec![0x12, 0x1B, 0x57, 0x00]);
    }

    #[test]
    fn as_before_emits_nothing() {
        assert_eq!(EscP.print_style(PrintStyle::default()), None);
    }

    #[test]
    fn international_charset_selection() {
        assert_eq!(EscP.code_page(2), vec![0x1B, 0x52, 0x02]);
    }

    #[test]
    fn no_barcode_engine() {
        use super::super::{BarcodeKind, HriFont, HriPosition, QrLevel, QrModel};
        assert_eq!(
            EscP.barcode(BarcodeKind::Code39, 50, 3, HriPosition::Below, HriFont::B, b"X"),
            None
        );
        assert_eq!(EscP.qr(QrModel::Model2, 4, QrLevel::L, b"X"), None);
    }
}

//! # ESC/POS Dialect
//!
//! Control codes for Epson ESC/POS thermal receipt printers and the many
//! compatible OEM devices. This is the richest family: character styles,
//! size magnification via `GS !`, 1D barcodes via `GS k` (function B) and
//! QR codes via the `GS ( k` function group.
//!
//! ## Style commands
//!
//! | Style | On | Off |
//! |-------|----|----|
//! | Emphasized | 1B 45 01 | 1B 45 00 |
//! | Underline | 1B 2D 01 | 1B 2D 00 |
//! | Double underline | 1B 2D 02 | 1B 2D 00 |
//! | Inverse | 1D 42 01 | 1D 42 00 |
//! | Size | 1D 21 n | 1D 21 00 |
//!
//! Pitch selection does not exist on thermal hardware (fixed-pitch heads),
//! so pitch requests contribute no codes.

use super::{
    BarcodeKind, CodePair, Dialect, ESC, FontStyle, FontType, GS, HriFont, HriPosition, PrintStyle,
    QrLevel, QrModel,
};

/// Epson ESC/POS thermal printer dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct EscPos;

impl Dialect for EscPos {
    fn name(&self) -> &'static str {
        "ESC/POS"
    }

    fn font_style(&self, style: FontStyle) -> Option<CodePair> {
        match style {
            FontStyle::Emphasized => Some(CodePair::new([ESC, b'E', 1], [ESC, b'E', 0])),
            FontStyle::Underline => Some(CodePair::new([ESC, b'-', 1], [ESC, b'-', 0])),
            FontStyle::UnderlineDouble => Some(CodePair::new([ESC, b'-', 2], [ESC, b'-', 0])),
            FontStyle::Inverse => Some(CodePair::new([GS, b'B', 1], [GS, b'B', 0])),
            _ => None,
        }
    }

    fn print_style(&self, style: PrintStyle) -> Option<CodePair> {
        // GS ! n: high nibble = width multiplier - 1, low nibble = height - 1
        let mut n = 0u8;
        if style.double_width {
            n |= 0x10;
        }
        if style.double_height {
            n |= 0x01;
        }
        if n == 0 {
            return None;
        }
        Some(CodePair::new([GS, b'!', n], [GS, b'!', 0]))
    }

    fn font(&self, font: FontType) -> Option<Vec<u8>> {
        let n = match font {
            FontType::A => 0,
            FontType::B => 1,
            FontType::C => 2,
            FontType::Ocr => return None,
        };
        Some(vec![ESC, b'M', n])
    }

    fn barcode(
        &self,
        kind: BarcodeKind,
        height: u8,
        module_width: u8,
        hri: HriPosition,
        hri_font: HriFont,
        data: &[u8],
    ) -> Option<Vec<u8>> {
        let mut cmd = Vec::with_capacity(16 + data.len());
        cmd.extend_from_slice(&[GS, b'f', hri_font as u8]);
        cmd.extend_from_slice(&[GS, b'H', hri as u8]);
        cmd.extend_from_slice(&[GS, b'h', height]);
        cmd.extend_from_slice(&[GS, b'w', module_width.min(6)]);
        // function B: symbology code 65..73, explicit length byte
        cmd.extend_from_slice(&[GS, b'k', kind as u8, data.len() as u8]);
        cmd.extend_from_slice(data);
        Some(cmd)
    }

    fn qr(&self, model: QrModel, module_size: u8, level: QrLevel, data: &[u8]) -> Option<Vec<u8>> {
        // GS ( k function group 49; store length counts cn fn m plus data
        let store_len = data.len() + 3;
        let (pl, ph) = ((store_len % 256) as u8, (store_len / 256) as u8);

        let mut cmd = Vec::with_capacity(32 + data.len());
        cmd.extend_from_slice(&[GS, b'(', b'k', 4, 0, 49, 65, model as u8, 0]);
        cmd.extend_from_slice(&[GS, b'(', b'k', 3, 0, 49, 67, module_size]);
        cmd.extend_from_slice(&[GS, b'(', b'k', 3, 0, 49, 69, level as u8]);
        cmd.extend_from_slice(&[GS, b'(', b'k', pl, ph, 49, 80, 48]);
        cmd.extend_from_slice(data);
        cmd.extend_from_slice(&[GS, b'(', b'k', 3, 0, 49, 81, 48]);
        Some(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emphasized_pair() {
        let pair = EscPos.font_style(FontStyle::Emphasized).unwrap();
        assert_eq!(pair.start, vec![0x1B, 0x45, 0x01]);
        assert_eq!(pair.end, vec![0x1B, 0x45, 0x00]);
    }

    #[test]
    fn inverse_uses_gs_b() {
        let pair = EscPos.font_style(FontStyle::Inverse).unwrap();
        assert_eq!(pair.start, vec![0x1D, 0x42, 0x01]);
        assert_eq!(pair.end, vec![0x1D, 0x42, 0x00]);
    }

    #[test]
    fn italic_is_unsupported() {
        assert_eq!(EscPos.font_style(FontStyle::Italic), None);
        assert_eq!(EscPos.font_style(FontStyle::Normal), None);
    }

    #[test]
    fn size_magnification_nibbles() {
        let pair = EscPos.print_style(PrintStyle::double_size()).unwrap();
        assert_eq!(pair.start, vec![0x1D, 0x21, 0x11]);
        assert_eq!(pair.end, vec![0x1D, 0x21, 0x00]);

        let w = EscPos.print_style(PrintStyle::double_width()).unwrap();
        assert_eq!(w.start, vec![0x1D, 0x21, 0x10]);
    }

    #[test]
    fn pitch_alone_emits_nothing() {
        use super::super::Pitch;
        assert_eq!(EscPos.print_style(PrintStyle::pitch(Pitch::Condensed)), None);
    }

    #[test]
    fn barcode_command_sequence() {
        let cmd = EscPos
            .barcode(BarcodeKind::Code39, 50, 3, HriPosition::Below, HriFont::B, b"ABC-123")
            .unwrap();
        let expected: Vec<u8> = [
            &[0x1D, b'f', 1][..],
            &[0x1D, b'H', 2],
            &[0x1D, b'h', 50],
            &[0x1D, b'w', 3],
            &[0x1D, b'k', 69, 7],
            b"ABC-123",
        ]
        .concat();
        assert_eq!(cmd, expected);
    }

    #[test]
    fn barcode_module_width_is_clamped() {
        let cmd = EscPos
            .barcode(BarcodeKind::Ean13, 80, 9, HriPosition::NotPrinted, HriFont::A, b"4006381333931")
            .unwrap();
        assert_eq!(cmd[10], 6, "module width clamps to 6");
    }

    #[test]
    fn qr_store_length_counts_header() {
        let cmd = EscPos.qr(QrModel::Model2, 4, QrLevel::M, b"HELLO").unwrap();
        // store block: GS ( k pL pH 49 80 48 + 5 data bytes, pL = 5 + 3
        let store_at = cmd.windows(2).position(|w| w == [49, 80]).unwrap();
        assert_eq!(cmd[store_at - 2], 8);
        assert_eq!(cmd[store_at - 1], 0);
        // trailing print function
        assert_eq!(&cmd[cmd.len() - 8..], &[0x1D, b'(', b'k', 3, 0, 49, 81, 48]);
    }

    #[test]
    fn font_selection() {
        assert_eq!(EscPos.font(FontType::B), Some(vec![0x1B, b'M', 1]));
        assert_eq!(EscPos.font(FontType::Ocr), None);
    }
}

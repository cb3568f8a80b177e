//! # Star Line Mode Dialect
//!
//! Control codes for Star Micronics printers in line mode (SP500/SP700
//! impact and TSP series thermal). Star borrowed the ESC prefix but almost
//! none of the Epson byte assignments, so nearly every table here diverges:
//! `ESC 4` turns on *inverse* (italic on ESC/P), alignment is `ESC GS a n`
//! with a binary argument, cuts are `ESC d m`.
//!
//! ## Style commands
//!
//! | Style | On | Off |
//! |-------|----|----|
//! | Emphasized | 1B 45 | 1B 46 |
//! | Underline | 1B 2D 01 | 1B 2D 00 |
//! | Upperline | 1B 5F 01 | 1B 5F 00 |
//! | Inverse | 1B 34 | 1B 35 |
//! | Magnification | 1B 69 h w | 1B 69 00 00 |
//!
//! ## Symbology commands
//!
//! 1D barcodes are `ESC b n1 n2 n3 n4 data RS` with ASCII-digit type codes;
//! QR codes use the `ESC GS y` function group (Rev 4.10, section 2.3.15).

use super::{
    Alignment, BarcodeKind, CodePair, CutMode, Dialect, ESC, FS, FeedUnit, FontStyle, FontType,
    GS, HriFont, HriPosition, LogoSize, PrintStyle, QrLevel, QrModel, RS,
};

/// Star Micronics line-mode dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct StarLine;

impl Dialect for StarLine {
    fn name(&self) -> &'static str {
        "Star line mode"
    }

    fn font_style(&self, style: FontStyle) -> Option<CodePair> {
        match style {
            FontStyle::Emphasized => Some(CodePair::new([ESC, b'E'], [ESC, b'F'])),
            FontStyle::Underline => Some(CodePair::new([ESC, b'-', 1], [ESC, b'-', 0])),
            FontStyle::Upperline => Some(CodePair::new([ESC, b'_', 1], [ESC, b'_', 0])),
            FontStyle::Inverse => Some(CodePair::new([ESC, b'4'], [ESC, b'5'])),
            _ => None,
        }
    }

    fn print_style(&self, style: PrintStyle) -> Option<CodePair> {
        // ESC i h w: expanded height / width multipliers, 0 = normal
        let h = style.double_height as u8;
        let w = style.double_width as u8;
        if h == 0 && w == 0 {
            return None;
        }
        Some(CodePair::new([ESC, b'i', h, w], [ESC, b'i', 0, 0]))
    }

    fn align(&self, alignment: Alignment) -> Option<Vec<u8>> {
        let n = match alignment {
            Alignment::Left => 0,
            Alignment::Center => 1,
            Alignment::Right => 2,
            Alignment::Justify => return None,
        };
        Some(vec![ESC, GS, b'a', n])
    }

    fn font(&self, font: FontType) -> Option<Vec<u8>> {
        let n = match font {
            FontType::A => 0,
            FontType::B => 1,
            FontType::C | FontType::Ocr => return None,
        };
        Some(vec![ESC, RS, b'F', n])
    }

    fn cut(&self, mode: CutMode) -> Vec<u8> {
        vec![ESC, b'd', mode as u8]
    }

    fn code_page(&self, page: u8) -> Vec<u8> {
        vec![ESC, GS, b't', page]
    }

    fn feed(&self, unit: FeedUnit, amount: u8) -> Vec<u8> {
        match unit {
            FeedUnit::Lines => vec![ESC, b'a', amount],
            FeedUnit::Dots => vec![ESC, b'I', amount],
        }
    }

    fn nv_logo(&self, index: u8, size: LogoSize) -> Vec<u8> {
        vec![ESC, FS, b'p', index, size as u8]
    }

    fn barcode(
        &self,
        kind: BarcodeKind,
        height: u8,
        module_width: u8,
        hri: HriPosition,
        _hri_font: HriFont,
        data: &[u8],
    ) -> Option<Vec<u8>> {
        // n1: ASCII type code, n2: HRI + feed mode, n3: 48 + module width
        let n1 = match kind {
            BarcodeKind::UpcE => b'0',
            BarcodeKind::UpcA => b'1',
            BarcodeKind::Ean8 => b'2',
            BarcodeKind::Ean13 => b'3',
            BarcodeKind::Code39 => b'4',
            BarcodeKind::Itf => b'5',
            BarcodeKind::Code128 => b'6',
            BarcodeKind::Code93 => b'7',
            BarcodeKind::Codabar => b'8',
        };
        let n2 = if hri == HriPosition::NotPrinted { b'1' } else { b'2' };
        let n3 = 48 + module_width.clamp(1, 3);
        let n4 = height.max(1);

        let mut cmd = Vec::with_capacity(7 + data.len());
        cmd.extend_from_slice(&[ESC, b'b', n1, n2, n3, n4]);
        cmd.extend_from_slice(data);
        cmd.push(RS);
        Some(cmd)
    }

    fn qr(&self, model: QrModel, module_size: u8, level: QrLevel, data: &[u8]) -> Option<Vec<u8>> {
        let m = match model {
            QrModel::Model1 => 1,
            QrModel::Model2 => 2,
            QrModel::Micro => return None,
        };
        let ec = match level {
            QrLevel::L => 0,
            QrLevel::M => 1,
            QrLevel::Q => 2,
            QrLevel::H => 3,
        };
        let len = data.len().min(u16::MAX as usize) as u16;

        let mut cmd = Vec::with_capacity(32 + data.len());
        cmd.extend_from_slice(&[ESC, GS, b'y', b'S', b'0', m]);
        cmd.extend_from_slice(&[ESC, GS, b'y', b'S', b'1', ec]);
        cmd.extend_from_slice(&[ESC, GS, b'y', b'S', b'2', module_size.clamp(1, 8)]);
        // store in AUTO analysis mode, length little-endian
        cmd.extend_from_slice(&[ESC, GS, b'y', b'D', b'1', 0, (len & 0xFF) as u8, (len >> 8) as u8]);
        cmd.extend_from_slice(data);
        cmd.extend_from_slice(&[ESC, GS, b'y', b'P']);
        Some(cmd)
    }

    fn raster_image(&self, width_dots: u16, height_dots: u16, packed: &[u8]) -> Option<Vec<u8>> {
        let row_bytes = (width_dots as usize).div_ceil(8) as u16;
        let mut cmd = Vec::with_capacity(9 + packed.len());
        cmd.extend_from_slice(&[
            ESC,
            GS,
            b'S',
            1,
            (row_bytes % 256) as u8,
            (row_bytes / 256) as u8,
            (height_dots % 256) as u8,
            (height_dots / 256) as u8,
            0,
        ]);
        cmd.extend_from_slice(packed);
        Some(cmd)
    }
}

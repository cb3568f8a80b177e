//! # 1D Barcodes
//!
//! Prints a linear barcode through the dialect's symbology command. Data
//! is checked against the symbology's character-set and length rules at
//! construction, so a report never ships a code the printer firmware will
//! reject halfway through a job.
//!
//! | Symbology | Accepted data |
//! |-----------|---------------|
//! | UPC-A | 11 or 12 digits |
//! | UPC-E | 6-8 or 11-12 digits |
//! | EAN-13 | 12 or 13 digits |
//! | EAN-8 | 7 or 8 digits |
//! | Code 39 | digits, `A-Z`, space, `$ % + - . /`; optional `*` wrapping |
//! | ITF | an even number of digits |
//! | Codabar | start/stop in `A-D`, digits and `$ + - . / :` between |
//! | Code 93 | ASCII |
//! | Code 128 | code-set prefix `{A` / `{B` / `{C`, then ASCII |
//!
//! All symbologies cap data at 255 bytes, the limit of the single-byte
//! length field in the print command.

use std::sync::LazyLock;

use regex::Regex;

use super::{ExtraItem, RenderEnv};
use crate::dialect::{Alignment, BarcodeKind, HriFont, HriPosition};
use crate::error::RenglonError;

/// A 1D barcode item.
///
/// ## Example
///
/// ```
/// use renglon::dialect::{BarcodeKind, HriPosition};
/// use renglon::extras::Barcode;
///
/// let code = Barcode::new(BarcodeKind::Ean13, "4006381333931")?
///     .height(80)
///     .hri(HriPosition::Below);
/// # Ok::<(), renglon::RenglonError>(())
/// ```
#[derive(Debug)]
pub struct Barcode {
    kind: BarcodeKind,
    data: String,
    height: u8,
    module_width: u8,
    hri: HriPosition,
    hri_font: HriFont,
    alignment: Alignment,
}

impl Barcode {
    /// Create a barcode, validating `data` against the symbology's rules.
    ///
    /// Defaults: height 50 dots, module width 3, no human-readable
    /// characters, centered.
    pub fn new(kind: BarcodeKind, data: impl Into<String>) -> Result<Self, RenglonError> {
        let data = data.into();
        if !valid(kind, &data) {
            return Err(RenglonError::InvalidBarcode { symbology: kind.name(), data });
        }
        Ok(Barcode {
            kind,
            data,
            height: 50,
            module_width: 3,
            hri: HriPosition::NotPrinted,
            hri_font: HriFont::B,
            alignment: Alignment::Center,
        })
    }

    /// Set the bar height in dots.
    pub fn height(mut self, dots: u8) -> Self {
        self.height = dots;
        self
    }

    /// Set the narrow-module width in dots (printers accept 1-6).
    pub fn module_width(mut self, dots: u8) -> Self {
        self.module_width = dots;
        self
    }

    /// Place human-readable interpretation characters around the bars.
    pub fn hri(mut self, position: HriPosition) -> Self {
        self.hri = position;
        self
    }

    /// Select the font for human-readable characters.
    pub fn hri_font(mut self, font: HriFont) -> Self {
        self.hri_font = font;
        self
    }

    /// Set the horizontal placement (default center).
    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

impl ExtraItem for Barcode {
    fn render(&self, env: &RenderEnv<'_>) -> Result<Option<Vec<u8>>, RenglonError> {
        let Some(cmd) = env.dialect.barcode(
            self.kind,
            self.height,
            self.module_width,
            self.hri,
            self.hri_font,
            self.data.as_bytes(),
        ) else {
            return Ok(None);
        };

        // alignment is modal on these printers; select it, do not restore
        let mut out = Vec::with_capacity(cmd.len() + 4);
        if let Some(align) = env.dialect.align(self.alignment) {
            out.extend_from_slice(&align);
        }
        out.extend_from_slice(&cmd);
        Ok(Some(out))
    }

    fn append_newline(&self) -> bool {
        false
    }
}

fn valid(kind: BarcodeKind, data: &str) -> bool {
    static UPC_A: LazyLock<Regex> = LazyLock::new(|| Regex::new("^[0-9]{11,12}$").unwrap());
    static UPC_E: LazyLock<Regex> =
        LazyLock::new(|| Regex::new("^([0-9]{6,8}|[0-9]{11,12})$").unwrap());
    static EAN13: LazyLock<Regex> = LazyLock::new(|| Regex::new("^[0-9]{12,13}$").unwrap());
    static EAN8: LazyLock<Regex> = LazyLock::new(|| Regex::new("^[0-9]{7,8}$").unwrap());
    static CODE39: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^([0-9A-Z \$\%\+\-\.\/]+|\*[0-9A-Z \$\%\+\-\.\/]+\*)$").unwrap()
    });
    static ITF: LazyLock<Regex> = LazyLock::new(|| Regex::new("^([0-9]{2})+$").unwrap());
    static CODABAR: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[A-Da-d][0-9\$\+\-\.\/\:]+[A-Da-d]$").unwrap());
    static CODE128: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^\{[A-C][\x00-\x7F]+$").unwrap());

    if data.is_empty() || data.len() > 255 {
        return false;
    }
    match kind {
        BarcodeKind::UpcA => UPC_A.is_match(data),
        BarcodeKind::UpcE => UPC_E.is_match(data),
        BarcodeKind::Ean13 => EAN13.is_match(data),
        BarcodeKind::Ean8 => EAN8.is_match(data),
        BarcodeKind::Code39 => CODE39.is_match(data),
        BarcodeKind::Itf => ITF.is_match(data),
        BarcodeKind::Codabar => CODABAR.is_match(data),
        BarcodeKind::Code93 => data.is_ascii(),
        BarcodeKind::Code128 => CODE128.is_match(data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{EscP, EscPos};
    use crate::encoding::TextEncoding;

    fn env<'a>(dialect: &'a dyn crate::dialect::Dialect) -> RenderEnv<'a> {
        RenderEnv { dialect, encoding: &TextEncoding::Ascii, paged: false }
    }

    #[test]
    fn symbology_rules_accept_and_reject() {
        assert!(Barcode::new(BarcodeKind::UpcA, "04210000526").is_ok());
        assert!(Barcode::new(BarcodeKind::UpcA, "0421000052").is_err());
        assert!(Barcode::new(BarcodeKind::Ean13, "4006381333931").is_ok());
        assert!(Barcode::new(BarcodeKind::Ean13, "40063813339AB").is_err());
        assert!(Barcode::new(BarcodeKind::Ean8, "9638507").is_ok());
        assert!(Barcode::new(BarcodeKind::Code39, "*HELLO-1*").is_ok());
        assert!(Barcode::new(BarcodeKind::Code39, "hello").is_err());
        assert!(Barcode::new(BarcodeKind::Itf, "123456").is_ok());
        assert!(Barcode::new(BarcodeKind::Itf, "12345").is_err());
        assert!(Barcode::new(BarcodeKind::Codabar, "A40156B").is_ok());
        assert!(Barcode::new(BarcodeKind::Codabar, "40156").is_err());
        assert!(Barcode::new(BarcodeKind::Code93, "Any ASCII!").is_ok());
        assert!(Barcode::new(BarcodeKind::Code128, "{BHello").is_ok());
        assert!(Barcode::new(BarcodeKind::Code128, "Hello").is_err());
    }

    #[test]
    fn empty_data_is_rejected() {
        assert!(Barcode::new(BarcodeKind::Code93, "").is_err());
    }

    #[test]
    fn oversized_data_is_rejected() {
        let long = "A".repeat(256);
        assert!(Barcode::new(BarcodeKind::Code93, long).is_err());
    }

    #[test]
    fn invalid_error_names_symbology() {
        let err = Barcode::new(BarcodeKind::Ean8, "12ab").unwrap_err();
        assert_eq!(err.to_string(), "Invalid EAN-8 barcode data: \"12ab\"");
    }

    #[test]
    fn renders_alignment_then_command() {
        let code = Barcode::new(BarcodeKind::Code39, "ABC-123").unwrap();
        let bytes = code.render(&env(&EscPos)).unwrap().unwrap();
        let expected: Vec<u8> = [
            &[0x1B, b'a', b'1'][..], // center
            &[0x1D, b'f', 1],
            &[0x1D, b'H', 0],
            &[0x1D, b'h', 50],
            &[0x1D, b'w', 3],
            &[0x1D, b'k', 69, 7],
            b"ABC-123",
        ]
        .concat();
        assert_eq!(bytes, expected);
        assert!(!code.append_newline());
    }

    #[test]
    fn builders_change_command_parameters() {
        let code = Barcode::new(BarcodeKind::Ean13, "4006381333931")
            .unwrap()
            .height(120)
            .module_width(2)
            .hri(HriPosition::Below)
            .hri_font(HriFont::A)
            .aligned(Alignment::Left);
        let bytes = code.render(&env(&EscPos)).unwrap().unwrap();
        assert_eq!(&bytes[..3], &[0x1B, b'a', b'0']);
        assert_eq!(&bytes[3..12], &[0x1D, b'f', 0, 0x1D, b'H', 2, 0x1D, b'h', 120]);
        assert_eq!(&bytes[12..15], &[0x1D, b'w', 2]);
    }

    #[test]
    fn unsupported_dialect_skips_item() {
        let code = Barcode::new(BarcodeKind::Code39, "ABC").unwrap();
        assert!(code.render(&env(&EscP)).unwrap().is_none());
    }
}

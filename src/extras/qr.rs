//! # QR Codes
//!
//! Stores QR data in the printer's symbol buffer and prints it in one
//! sequence. ESC/POS uses the `GS ( k` function-49 group; Star line mode
//! has its own `ESC GS y` commands. Dialects without 2D support skip the
//! item.

use super::{ExtraItem, RenderEnv};
use crate::dialect::{Alignment, QrLevel, QrModel};
use crate::error::RenglonError;

/// Data bytes the storage command can address (pL/pH range of the
/// function-80 store command).
const MAX_DATA: usize = 7089;

/// A QR code item.
///
/// ## Example
///
/// ```
/// use renglon::dialect::QrLevel;
/// use renglon::extras::QrCode;
///
/// let qr = QrCode::new("https://example.com/r/42")?
///     .module_size(6)
///     .level(QrLevel::M);
/// # Ok::<(), renglon::RenglonError>(())
/// ```
pub struct QrCode {
    data: String,
    model: QrModel,
    module_size: u8,
    level: QrLevel,
    alignment: Alignment,
}

impl QrCode {
    /// Create a QR code item. Defaults: model 2, module size 4, error
    /// correction L, centered.
    ///
    /// Errors when `data` is empty or exceeds the storage command's
    /// 7089-byte capacity.
    pub fn new(data: impl Into<String>) -> Result<Self, RenglonError> {
        let data = data.into();
        if data.is_empty() {
            return Err(RenglonError::InvalidQr("no data".into()));
        }
        if data.len() > MAX_DATA {
            return Err(RenglonError::InvalidQr(format!(
                "{} bytes exceeds the {MAX_DATA}-byte limit",
                data.len()
            )));
        }
        Ok(QrCode {
            data,
            model: QrModel::Model2,
            module_size: 4,
            level: QrLevel::L,
            alignment: Alignment::Center,
        })
    }

    /// Select the QR model. Micro QR renders only on dialects that
    /// support it.
    pub fn model(mut self, model: QrModel) -> Self {
        self.model = model;
        self
    }

    /// Set the module (cell) size in dots, 1-16.
    pub fn module_size(mut self, dots: u8) -> Self {
        self.module_size = dots.clamp(1, 16);
        self
    }

    /// Set the error correction level.
    pub fn level(mut self, level: QrLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the horizontal placement (default center).
    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

impl ExtraItem for QrCode {
    fn render(&self, env: &RenderEnv<'_>) -> Result<Option<Vec<u8>>, RenglonError> {
        let Some(cmd) =
            env.dialect.qr(self.model, self.module_size, self.level, self.data.as_bytes())
        else {
            return Ok(None);
        };

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{EscP, EscPos, StarLine};
    use crate::encoding::TextEncoding;

    fn env<'a>(dialect: &'a dyn crate::dialect::Dialect) -> RenderEnv<'a> {
        RenderEnv { dialect, encoding: &TextEncoding::Ascii, paged: false }
    }

    #[test]
    fn empty_and_oversized_data_are_errors() {
        assert!(QrCode::new("").is_err());
        assert!(QrCode::new("x".repeat(7090)).is_err());
        assert!(QrCode::new("x".repeat(7089)).is_ok());
    }

    #[test]
    fn defaults_render_store_and_print() {
        let qr = QrCode::new("OK").unwrap();
        let bytes = qr.render(&env(&EscPos)).unwrap().unwrap();
        let expected: Vec<u8> = [
            &[0x1B, b'a', b'1'][..],                      // center
            &[0x1D, b'(', b'k', 4, 0, 49, 65, 50, 0],     // model 2
            &[0x1D, b'(', b'k', 3, 0, 49, 67, 4],         // module size
            &[0x1D, b'(', b'k', 3, 0, 49, 69, 48],        // level L
            &[0x1D, b'(', b'k', 5, 0, 49, 80, 48], b"OK", // store
            &[0x1D, b'(', b'k', 3, 0, 49, 81, 48],        // print
        ]
        .concat();
        assert_eq!(bytes, expected);
        assert!(!qr.append_newline());
    }

    #[test]
    fn star_dialect_uses_its_own_sequence() {
        let qr = QrCode::new("OK").unwrap();
        let bytes = qr.render(&env(&StarLine)).unwrap().unwrap();
        // alignment prefix, then the Star model-select command
        assert_eq!(&bytes[..9], &[0x1B, 0x1D, b'a', 1, 0x1B, 0x1D, b'y', b'S', b'0']);
    }

    #[test]
    fn micro_model_skips_on_star() {
        let qr = QrCode::new("OK").unwrap().model(QrModel::Micro);
        assert!(qr.render(&env(&StarLine)).unwrap().is_none());
    }

    #[test]
    fn unsupported_dialect_skips_item() {
        let qr = QrCode::new("OK").unwrap();
        assert!(qr.render(&env(&EscP)).unwrap().is_none());
    }

    #[test]
    fn module_size_is_clamped() {
        let qr = QrCode::new("OK").unwrap().module_size(99);
        let bytes = qr.render(&env(&EscPos)).unwrap().unwrap();
        // size byte is the last of the third command block
        assert_eq!(bytes[3 + 9 + 7], 16);
    }
}

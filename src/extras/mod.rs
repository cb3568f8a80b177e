//! # Extra Items
//!
//! Byte-emitting report items beyond template lines: barcodes, QR codes,
//! raster images, paper cuts, feeds, code-page switches and raw control
//! codes. They live in the report tree like any other item (usually as
//! `UserDefined` children) but bypass the template pipeline entirely —
//! each renders straight to printer bytes through the report's dialect.
//!
//! | Item | Command family | Trailing LF |
//! |------|----------------|-------------|
//! | [`Barcode`] | 1D symbology print | no |
//! | [`QrCode`] | 2D store-and-print | no |
//! | [`Image`] | raster graphics | yes |
//! | [`NvLogo`] | flash-logo print | no |
//! | [`CutPaper`] | paper cut | yes |
//! | [`EmptySpace`] | paper feed | yes |
//! | [`CodePage`] | code-page select | yes |
//! | [`LineSpacing`] | line-spacing set/reset | no |
//! | [`FreeText`] | encoded text | configurable |
//! | [`CustomCode`] | caller bytes | yes |
//!
//! A dialect that cannot express an item returns `None` from its command
//! builder and the item is skipped; bad input data (an EAN-13 with letters
//! in it, QR data past the storage limit) is an error at construction, not
//! at render time.

mod barcode;
mod control;
mod image;
mod qr;

pub use barcode::Barcode;
pub use control::{CodePage, CustomCode, CutPaper, EmptySpace, FreeText, LineSpacing, NvLogo};
pub use image::Image;
pub use qr::QrCode;

use crate::dialect::Dialect;
use crate::encoding::TextEncoding;
use crate::error::RenglonError;

/// Everything an extra item may consult while rendering.
pub struct RenderEnv<'a> {
    /// Control-code table of the target printer family
    pub dialect: &'a dyn Dialect,
    /// Byte encoding of the output stream
    pub encoding: &'a TextEncoding,
    /// Whether the report paginates (page height > 0)
    pub paged: bool,
}

/// A report item that renders directly to printer bytes.
///
/// Implementations return `Ok(None)` when there is nothing to emit — the
/// dialect lacks the command, or the item carries no data — and the engine
/// silently skips them. Errors are reserved for items that cannot be used
/// at all in the current report (see [`EmptySpace`]).
pub trait ExtraItem {
    /// Produce the item's byte sequence for this environment.
    fn render(&self, env: &RenderEnv<'_>) -> Result<Option<Vec<u8>>, RenglonError>;

    /// Whether a line feed follows the emitted bytes. Items that print
    /// inline content (barcodes, logos) suppress it so the printer's own
    /// advance is the only one.
    fn append_newline(&self) -> bool {
        true
    }
}

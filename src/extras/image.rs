//! # Raster Images
//!
//! Emits a pre-rasterized bitmap through the dialect's raster command.
//! Bit convention follows the printers: one bit per dot, MSB is the
//! leftmost dot, a set bit prints ink.

use super::{ExtraItem, RenderEnv};
use crate::error::RenglonError;

/// Grayscale samples below this value print as ink.
const INK_THRESHOLD: u8 = 127;

/// A raster image item.
///
/// ## Example
///
/// ```
/// use renglon::extras::Image;
///
/// // 16x2 checkerboard from packed rows
/// let img = Image::from_packed(16, 2, vec![0xAA, 0xAA, 0x55, 0x55]);
/// ```
pub struct Image {
    width: u16,
    height: u16,
    packed: Vec<u8>,
}

impl Image {
    /// Create an image from packed 1-bit rows.
    ///
    /// `packed` must hold `ceil(width / 8) * height` bytes, rows top to
    /// bottom, MSB first within each byte.
    pub fn from_packed(width: u16, height: u16, packed: Vec<u8>) -> Self {
        Image { width, height, packed }
    }

    /// Create an image from 8-bit grayscale samples, row-major.
    ///
    /// Samples darker than the ink threshold become set bits; missing
    /// samples and partial-byte padding stay white.
    pub fn from_luma(width: u16, height: u16, luma: &[u8]) -> Self {
        let row_bytes = (width as usize).div_ceil(8);
        let mut packed = vec![0u8; row_bytes * height as usize];
        for y in 0..height as usize {
            for x in 0..width as usize {
                let dark =
                    luma.get(y * width as usize + x).is_some_and(|&v| v < INK_THRESHOLD);
                if dark {
                    packed[y * row_bytes + x / 8] |= 0x80 >> (x % 8);
                }
            }
        }
        Image { width, height, packed }
    }
}

impl ExtraItem for Image {
    fn render(&self, env: &RenderEnv<'_>) -> Result<Option<Vec<u8>>, RenglonError> {
        Ok(env.dialect.raster_image(self.width, self.height, &self.packed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{EscPos, StarLine};
    use crate::encoding::TextEncoding;

    fn env<'a>(dialect: &'a dyn crate::dialect::Dialect) -> RenderEnv<'a> {
        RenderEnv { dialect, encoding: &TextEncoding::Ascii, paged: false }
    }

    #[test]
    fn luma_packs_msb_first() {
        // 10 dots wide: ink, white, ink, white... then 6 padding bits
        let row: Vec<u8> = (0..10).map(|x| if x % 2 == 0 { 0 } else { 255 }).collect();
        let img = Image::from_luma(10, 1, &row);
        assert_eq!(img.packed, vec![0b1010_1010, 0b1000_0000]);
    }

    #[test]
    fn missing_samples_stay_white() {
        let img = Image::from_luma(8, 2, &[0; 8]);
        assert_eq!(img.packed, vec![0xFF, 0x00]);
    }

    #[test]
    fn renders_raster_header_and_rows() {
        let img = Image::from_packed(16, 2, vec![0xFF, 0x00, 0x0F, 0xF0]);
        let bytes = img.render(&env(&EscPos)).unwrap().unwrap();
        assert_eq!(&bytes[..8], &[0x1D, b'v', b'0', 0, 2, 0, 2, 0]);
        assert_eq!(&bytes[8..], &[0xFF, 0x00, 0x0F, 0xF0]);
        assert!(img.append_newline());
    }

    #[test]
    fn star_raster_uses_its_own_header() {
        let img = Image::from_packed(8, 1, vec![0xAA]);
        let bytes = img.render(&env(&StarLine)).unwrap().unwrap();
        assert_eq!(bytes, vec![0x1B, 0x1D, b'S', 1, 1, 0, 1, 0, 0, 0xAA]);
    }
}

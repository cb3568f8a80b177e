//! # Text Encoding
//!
//! Converts Unicode strings to the single-byte encodings character-mode
//! printers actually consume. The engine composes text as `String`s; bytes
//! are produced only at emission time, so the encoding is a property of the
//! whole output stream, not of individual lines.
//!
//! Three families are supported:
//!
//! - **ASCII** — lossy passthrough, anything above U+007F becomes `?`.
//!   The safe default when the printer's code page is unknown.
//! - **CP437** — the IBM PC code page most receipt printers power up with.
//!   Implemented with a local table because CP437 is not a web encoding.
//! - **Any [`encoding_rs`] encoding** — windows-1252, IBM866 and friends,
//!   for printers whose code page has been switched (see `CodePage` item).

use tracing::debug;

/// Output byte encoding for a report.
#[derive(Debug, Clone, Copy, Default)]
pub enum TextEncoding {
    /// 7-bit ASCII; unmappable characters become `?`
    #[default]
    Ascii,
    /// IBM Code Page 437 (the usual power-on code page)
    Cp437,
    /// Any encoding known to `encoding_rs`, e.g. `encoding_rs::WINDOWS_1252`
    Other(&'static encoding_rs::Encoding),
}

impl TextEncoding {
    /// Encode `text` and append the bytes to `out`.
    ///
    /// Unmappable characters degrade to `?` in every encoding; encoding
    /// never fails. Page-number placeholders rely on `$`, digits and space
    /// encoding as single ASCII bytes, which holds for all three families.
    pub fn encode_into(&self, text: &str, out: &mut Vec<u8>) {
        match self {
            TextEncoding::Ascii => {
                for ch in text.chars() {
                    if ch.is_ascii() {
                        out.push(ch as u8);
                    } else {
                        debug!(ch = %ch.escape_unicode(), "character outside ASCII, substituting '?'");
                        out.push(b'?');
                    }
                }
            }
            TextEncoding::Cp437 => {
                for ch in text.chars() {
                    out.push(cp437_byte(ch).unwrap_or_else(|| {
                        debug!(ch = %ch.escape_unicode(), "character outside CP437, substituting '?'");
                        b'?'
                    }));
                }
            }
            TextEncoding::Other(enc) => {
                let (bytes, _, _) = enc.encode(text);
                out.extend_from_slice(&bytes);
            }
        }
    }

    /// Encode `text` into a fresh byte vector.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        let mut out = Vec::with_capacity(text.len());
        self.encode_into(text, &mut out);
        out
    }
}

/// CP437 upper half, indexed by `byte - 0x80`.
///
/// Row order follows the code page: accented Latin, currency, Spanish
/// punctuation and fractions, shade blocks, box drawing, block elements,
/// Greek, math, and NBSP at 0xFF.
const CP437_HIGH: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å', // 0x80
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ', // 0x90
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»', // 0xA0
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐', // 0xB0
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧', // 0xC0
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀', // 0xD0
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩', // 0xE0
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{00A0}', // 0xF0
];

/// Map a Unicode character to its CP437 byte, if it has one.
fn cp437_byte(ch: char) -> Option<u8> {
    if ch.is_ascii() {
        return Some(ch as u8);
    }
    CP437_HIGH
        .iter()
        .position(|&c| c == ch)
        .map(|i| 0x80 + i as u8)
}

//! # Code Page 437 Encoding
//!
//! Converts Unicode strings to CP437 single-byte encoding.
//!
//! The printer must have Code Page 437 selected (`ESC t 0` on ESC/POS,
//! `ESC GS t 1` on StarPRNT) for these bytes to render correctly. ASCII
//! passes through unchanged; characters outside CP437 become `?`.

/// CP437 upper half, bytes 0x80–0xFF in order, one row per 16 bytes.
const UPPER_HALF: &str = concat!(
    "ÇüéâäàåçêëèïîìÄÅ",
    "ÉæÆôöòûùÿÖÜ¢£¥₧ƒ",
    "áíóúñÑªº¿⌐¬½¼¡«»",
    "░▒▓│┤╡╢╖╕╣║╗╝╜╛┐",
    "└┴┬├─┼╞╟╚╔╩╦╠═╬╧",
    "╨╤╥╙╘╒╓╫╪┘┌█▄▌▐▀",
    "αßΓπΣσµτΦΘΩδ∞φε∩",
    "≡±≥≤⌠⌡÷≈°∙·√ⁿ²■\u{00A0}",
);

/// Encode a Unicode string as CP437 bytes.
pub fn encode(s: &str) -> Vec<u8> {
    s.chars()
        .map(|ch| {
            if ch.is_ascii() {
                ch as u8
            } else if let Some(byte) = upper_half_byte(ch) {
                byte
            } else {
                tracing::warn!(
                    "cp437: unmapped character '{}' (U+{:04X}), replacing with '?'",
                    ch,
                    ch as u32
                );
                b'?'
            }
        })
        .collect()
}

fn upper_half_byte(ch: char) -> Option<u8> {
    UPPER_HALF
        .chars()
        .position(|c| c == ch)
        .map(|i| 0x80 + i as u8)
}

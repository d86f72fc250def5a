//! # ESC/POS Commands
//!
//! The subset of ESC/POS used by receipt layouts.
//!
//! | Command | Bytes | Effect |
//! |---------|-------|--------|
//! | Initialize | ESC @ | Reset to power-on state |
//! | Justification | ESC a n | 0 left, 1 center, 2 right |
//! | Emphasis | ESC E n | Bold on/off |
//! | Reverse | GS B n | White on black on/off |
//! | Character size | GS ! n | Width/height multipliers |
//! | Code table | ESC t n | Character table selection |
//! | Cut | GS V m n | Feed to cutter, then cut |

use super::{Alignment, Codepage, ESC, GS};

/// # Initialize Printer (ESC @)
///
/// Clears the print buffer and resets all text modes.
///
/// ```
/// use vozy::protocol::escpos;
///
/// assert_eq!(escpos::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

/// Select justification (ESC a n). Applies from the start of the next line.
#[inline]
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

/// Turn emphasized mode on or off (ESC E n).
#[inline]
pub fn bold(enabled: bool) -> Vec<u8> {
    vec![ESC, b'E', enabled as u8]
}

/// Turn white/black reverse printing on or off (GS B n).
#[inline]
pub fn invert(enabled: bool) -> Vec<u8> {
    vec![GS, b'B', enabled as u8]
}

/// # Select Character Size (GS ! n)
///
/// `width` and `height` are multipliers (1-8). The parameter byte holds
/// the width multiplier minus one in the high nibble and the height
/// multiplier minus one in the low nibble.
///
/// ```
/// use vozy::protocol::escpos;
///
/// // Triple width, double height
/// assert_eq!(escpos::size(3, 2), vec![0x1D, 0x21, 0x21]);
/// ```
pub fn size(width: u8, height: u8) -> Vec<u8> {
    let w = width.clamp(1, 8) - 1;
    let h = height.clamp(1, 8) - 1;
    vec![GS, b'!', (w << 4) | h]
}

/// Select character code table (ESC t n).
///
/// `None` for ASCII, which needs no table switch.
pub fn codepage(cp: Codepage) -> Option<Vec<u8>> {
    match cp {
        Codepage::Ascii => None,
        Codepage::Cp437 => Some(vec![ESC, b't', 0]),
    }
}

/// # Feed and Cut (GS V m n)
///
/// Function B: feeds paper to the cutting position, then cuts.
/// `m = 65` full cut, `m = 66` partial cut.
#[inline]
pub fn cut(partial: bool) -> Vec<u8> {
    vec![GS, b'V', if partial { 66 } else { 65 }, 0]
}

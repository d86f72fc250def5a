//! # Printer Command Protocols
//!
//! Low-level command builders for the two command languages VOZY-compatible
//! receipt printers speak.
//!
//! ## Module Structure
//!
//! - [`escpos`]: ESC/POS (Epson-style, most portable BLE printers)
//! - [`starprnt`]: StarPRNT (Star Micronics)
//! - [`cp437`]: Unicode → Code Page 437 text encoding
//!
//! ## Usage Example
//!
//! ```
//! use vozy::protocol::{escpos, Alignment};
//!
//! let mut data = Vec::new();
//! data.extend(escpos::init());
//! data.extend(escpos::align(Alignment::Center));
//! data.extend(escpos::bold(true));
//! data.extend(b"RECEIPT\n");
//! data.extend(escpos::bold(false));
//! data.extend(escpos::cut(false));
//! ```

pub mod cp437;
pub mod escpos;
pub mod starprnt;

use serde::{Deserialize, Serialize};

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print and advance one line
pub const LF: u8 = 0x0A;

/// Printer command language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    #[default]
    EscPos,
    StarPrnt,
}

impl Language {
    /// Parse a language name (`esc-pos`, `escpos`, `star-prnt`, `starprnt`).
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().replace(['-', '_', '/'], "").as_str() {
            "escpos" => Ok(Self::EscPos),
            "starprnt" => Ok(Self::StarPrnt),
            _ => Err(format!(
                "Unknown language '{}'. Use 'esc-pos' or 'star-prnt'",
                s
            )),
        }
    }
}

/// Text alignment options (same parameter values in both languages)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

/// Character table used for text bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codepage {
    /// 7-bit ASCII; anything else prints as `?`
    #[default]
    Ascii,
    /// Code Page 437 (US English, box drawing)
    Cp437,
}

impl Codepage {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "ascii" => Ok(Self::Ascii),
            "cp437" | "437" => Ok(Self::Cp437),
            _ => Err(format!("Unknown codepage '{}'. Use 'ascii' or 'cp437'", s)),
        }
    }

    /// Encode text into bytes of this table.
    pub fn encode(&self, s: &str) -> Vec<u8> {
        match self {
            Self::Ascii => s
                .chars()
                .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
                .collect(),
            Self::Cp437 => cp437::encode(s),
        }
    }
}

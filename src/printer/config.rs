//! # Printer Configuration
//!
//! This module defines hardware specifications for supported thermal printers.
//!
//! ## Supported Printers
//!
//! | Id | Model | Width (dots) | Columns | Language |
//! |----|-------|--------------|---------|----------|
//! | `generic-58` | Generic 58mm | 384 | 32 | ESC/POS |
//! | `generic-80` | Generic 80mm | 576 | 48 | ESC/POS |
//! | `tsp650ii` | Star TSP650II | 576 | 48 | StarPRNT |
//!
//! ## Usage
//!
//! ```
//! use vozy::printer::PrinterConfig;
//!
//! let config = PrinterConfig::by_model("tsp650ii").unwrap();
//! println!("Print width: {} dots, {} columns",
//!          config.width_dots,
//!          config.columns);
//! ```

use crate::protocol::Language;

/// # Printer Configuration
///
/// Defines the hardware characteristics of a thermal printer.
///
/// ## Calculations
///
/// ```text
/// dots_per_mm = dpi / 25.4
/// width_mm = width_dots / dots_per_mm
///
/// For a 58mm printer:
///   dots_per_mm = 203 / 25.4 ≈ 8
///   width_mm = 384 / 8 = 48mm
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Short identifier used on the command line and in JSON
    pub id: &'static str,

    /// Printer model name
    pub name: &'static str,

    /// Maximum print width in dots (pixels)
    pub width_dots: u16,

    /// Resolution in dots per inch
    pub dpi: u16,

    /// Characters per line in the standard 12x24 font
    pub columns: u8,

    /// Command language the printer speaks
    pub language: Language,
}

impl PrinterConfig {
    /// Generic 58mm ESC/POS printer. Most portable BLE receipt printers
    /// sold under the VOZY name are this class.
    pub const GENERIC_58MM: Self = Self {
        id: "generic-58",
        name: "Generic 58mm",
        width_dots: 384,
        dpi: 203,
        columns: 32,
        language: Language::EscPos,
    };

    /// Generic 80mm ESC/POS printer.
    pub const GENERIC_80MM: Self = Self {
        id: "generic-80",
        name: "Generic 80mm",
        width_dots: 576,
        dpi: 203,
        columns: 48,
        language: Language::EscPos,
    };

    /// # Star TSP650II Configuration
    ///
    /// 80mm paper width thermal receipt printer.
    ///
    /// ## Print Area
    ///
    /// ```text
    /// ├── 4mm ──┼────── 72mm printable ──────┼── 4mm ──┤
    /// │ margin  │         576 dots           │ margin  │
    /// ```
    pub const TSP650II: Self = Self {
        id: "tsp650ii",
        name: "Star TSP650II",
        width_dots: 576,
        dpi: 203,
        columns: 48,
        language: Language::StarPrnt,
    };

    /// List all built-in presets.
    pub fn built_in() -> [Self; 3] {
        [Self::GENERIC_58MM, Self::GENERIC_80MM, Self::TSP650II]
    }

    /// Look up a preset by id or display name (case-insensitive).
    pub fn by_model(model: &str) -> Option<Self> {
        Self::built_in()
            .into_iter()
            .find(|p| p.id.eq_ignore_ascii_case(model) || p.name.eq_ignore_ascii_case(model))
    }

    /// Calculate dots per millimeter
    ///
    /// ## Example
    ///
    /// ```
    /// use vozy::printer::PrinterConfig;
    ///
    /// let config = PrinterConfig::GENERIC_58MM;
    /// assert!((config.dots_per_mm() - 8.0).abs() < 0.1);
    /// ```
    #[inline]
    pub fn dots_per_mm(&self) -> f32 {
        self.dpi as f32 / 25.4
    }

    /// Calculate print width in millimeters
    #[inline]
    pub fn width_mm(&self) -> f32 {
        self.width_dots as f32 / self.dots_per_mm()
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::GENERIC_58MM
    }
}

// ============================================================================
// TESTS
// ============================================================================

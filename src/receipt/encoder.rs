//! # Receipt Encoder
//!
//! A chaining text encoder that records IR ops. Layouts drive it through
//! `&mut ReceiptEncoder`; the pipeline owns it before and after.
//!
//! ## Word Wrapping
//!
//! [`ReceiptEncoder::text`] tracks the print head in character cells. A cell
//! is one column at width multiplier 1, two at width 2, and so on. When the
//! next word would overflow the line, a newline is inserted before it.

use serde::{Deserialize, Serialize};

use crate::error::VozyError;
use crate::ir::{Op, Program};
use crate::printer::PrinterConfig;
use crate::protocol::{Alignment, Codepage, Language};

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Encoder options. Unset fields fall back to the printer model preset.
///
/// Deserializes from the JSON bodies accepted by the print endpoints:
///
/// ```
/// use vozy::receipt::EncoderConfig;
///
/// let config: EncoderConfig =
///     serde_json::from_str(r#"{"printerModel": "tsp650ii", "columns": 42}"#).unwrap();
/// assert_eq!(config.columns(), 42);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EncoderConfig {
    /// Printer preset id or name (see [`PrinterConfig::by_model`])
    pub printer_model: Option<String>,
    /// Characters per line
    pub columns: Option<u8>,
    /// Command language override
    pub language: Option<Language>,
    /// Character table; CP437 when unset
    pub codepage: Option<Codepage>,
}

impl EncoderConfig {
    /// Options for a named printer preset, everything else defaulted.
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            printer_model: Some(model.into()),
            ..Self::default()
        }
    }

    /// Reject unknown printer models and zero columns.
    pub fn validate(&self) -> Result<(), VozyError> {
        if let Some(model) = &self.printer_model {
            if PrinterConfig::by_model(model).is_none() {
                let known: Vec<&str> = PrinterConfig::built_in().iter().map(|p| p.id).collect();
                return Err(VozyError::InvalidConfig(format!(
                    "Unknown printer model '{}'. Use one of: {}",
                    model,
                    known.join(", ")
                )));
            }
        }
        if self.columns == Some(0) {
            return Err(VozyError::InvalidConfig("columns must be at least 1".into()));
        }
        Ok(())
    }

    /// The printer preset these options resolve to.
    pub fn printer(&self) -> PrinterConfig {
        match &self.printer_model {
            Some(model) => PrinterConfig::by_model(model).unwrap_or_else(|| {
                tracing::warn!(model = %model, "unknown printer model, using default preset");
                PrinterConfig::default()
            }),
            None => PrinterConfig::default(),
        }
    }

    pub fn columns(&self) -> u8 {
        self.columns.unwrap_or_else(|| self.printer().columns).max(1)
    }

    pub fn language(&self) -> Language {
        self.language.unwrap_or_else(|| self.printer().language)
    }

    pub fn codepage(&self) -> Codepage {
        self.codepage.unwrap_or(Codepage::Cp437)
    }
}

// ============================================================================
// ENCODER
// ============================================================================

/// Horizontal rule style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleStyle {
    #[default]
    Single,
    Double,
}

/// Paper cut style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CutKind {
    #[default]
    Full,
    Partial,
}

/// Records receipt commands as IR ops.
///
/// ```
/// use vozy::receipt::{EncoderConfig, ReceiptEncoder, RuleStyle};
/// use vozy::protocol::Alignment;
///
/// let mut encoder = ReceiptEncoder::new(&EncoderConfig::default());
/// encoder
///     .initialize()
///     .align(Alignment::Center)
///     .bold(true)
///     .line("HELLO")
///     .rule(RuleStyle::Single);
/// let bytes = encoder.encode();
/// assert_eq!(&bytes[..2], &[0x1B, 0x40]);
/// ```
#[derive(Debug, Clone)]
pub struct ReceiptEncoder {
    program: Program,
    columns: u8,
    language: Language,
    codepage: Codepage,
    width_mult: u8,
    cursor: usize,
}

impl ReceiptEncoder {
    pub fn new(config: &EncoderConfig) -> Self {
        Self {
            program: Program::new(),
            columns: config.columns(),
            language: config.language(),
            codepage: config.codepage(),
            width_mult: 1,
            cursor: 0,
        }
    }

    /// Characters per line at normal width.
    pub fn columns(&self) -> u8 {
        self.columns
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Ops recorded so far (unoptimized).
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Reset the printer and select the configured character table.
    pub fn initialize(&mut self) -> &mut Self {
        self.program.push(Op::Init);
        if self.codepage != Codepage::Ascii {
            self.program.push(Op::SetCodepage(self.codepage));
        }
        self.width_mult = 1;
        self
    }

    pub fn align(&mut self, alignment: Alignment) -> &mut Self {
        self.program.push(Op::SetAlign(alignment));
        self
    }

    pub fn bold(&mut self, enabled: bool) -> &mut Self {
        self.program.push(Op::SetBold(enabled));
        self
    }

    pub fn invert(&mut self, enabled: bool) -> &mut Self {
        self.program.push(Op::SetInvert(enabled));
        self
    }

    /// Set character width and height multipliers, each clamped to 1-8.
    pub fn size(&mut self, width: u8, height: u8) -> &mut Self {
        let width = width.clamp(1, 8);
        let height = height.clamp(1, 8);
        self.width_mult = width;
        self.program.push(Op::SetSize { width, height });
        self
    }

    /// Print text, wrapping at word boundaries.
    pub fn text(&mut self, value: &str) -> &mut Self {
        let limit = usize::from(self.columns);
        let cell = usize::from(self.width_mult);
        let mut run = String::new();

        for word in value.split_inclusive(' ') {
            let visible = word.trim_end_matches(' ').chars().count() * cell;
            if self.cursor > 0 && visible > 0 && self.cursor + visible > limit {
                self.flush_run(&mut run);
                self.program.push(Op::Newline);
                self.cursor = 0;
            }
            run.push_str(word);
            self.cursor += word.chars().count() * cell;
        }

        self.flush_run(&mut run);
        self
    }

    pub fn newline(&mut self) -> &mut Self {
        self.program.push(Op::Newline);
        self.cursor = 0;
        self
    }

    pub fn newlines(&mut self, count: usize) -> &mut Self {
        for _ in 0..count {
            self.newline();
        }
        self
    }

    /// Print text followed by a newline.
    pub fn line(&mut self, value: &str) -> &mut Self {
        self.text(value).newline()
    }

    /// Print a full-width horizontal rule, followed by a newline.
    ///
    /// Box-drawing characters under CP437, `-`/`=` under ASCII.
    pub fn rule(&mut self, style: RuleStyle) -> &mut Self {
        if self.cursor > 0 {
            self.newline();
        }
        let ch = match (self.codepage, style) {
            (Codepage::Cp437, RuleStyle::Single) => '─',
            (Codepage::Cp437, RuleStyle::Double) => '═',
            (Codepage::Ascii, RuleStyle::Single) => '-',
            (Codepage::Ascii, RuleStyle::Double) => '=',
        };
        let width = usize::from(self.columns / self.width_mult).max(1);
        self.program.push(Op::Text(ch.to_string().repeat(width)));
        self.newline()
    }

    pub fn cut(&mut self, kind: CutKind) -> &mut Self {
        self.program.push(Op::Cut {
            partial: kind == CutKind::Partial,
        });
        self.cursor = 0;
        self
    }

    /// Optimized program of everything recorded.
    pub fn finish(self) -> Program {
        self.program.optimize()
    }

    /// Optimize and generate bytes in the configured language.
    pub fn encode(self) -> Vec<u8> {
        let language = self.language;
        let bytes = self.finish().to_bytes(language);
        tracing::debug!(bytes = bytes.len(), ?language, "encoded receipt");
        bytes
    }

    fn flush_run(&mut self, run: &mut String) {
        if !run.is_empty() {
            self.program.push(Op::Text(std::mem::take(run)));
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

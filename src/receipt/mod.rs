//! # Receipts
//!
//! Layouts and the pipeline that turns them into printer bytes.
//!
//! ## Pipeline
//!
//! ```text
//! EncoderConfig ──► ReceiptEncoder ──► initialize ──► newline ──► Layout ──► encode
//!                                                       │
//!                                            always the first line
//! ```
//!
//! Every receipt starts with one blank line so the top of the first printed
//! row clears the tear bar. The pipeline emits it before a layout ever sees
//! the encoder, and the encoder has no way to take recorded ops back.
//!
//! ## Layout Trait
//!
//! A layout implements exactly one method:
//!
//! ```
//! use vozy::receipt::{EncoderConfig, Layout, Receipt, ReceiptEncoder};
//!
//! struct Hello;
//!
//! impl Layout for Hello {
//!     fn layout(&self, encoder: &mut ReceiptEncoder) {
//!         encoder.line("hello");
//!     }
//! }
//!
//! let bytes = Receipt::new(Hello, EncoderConfig::default()).encode();
//! assert!(!bytes.is_empty());
//! ```

mod bill;
mod encoder;
mod queue;

pub use bill::BillReceipt;
pub use encoder::{CutKind, EncoderConfig, ReceiptEncoder, RuleStyle};
pub use queue::QueueTicket;

use crate::ir::Program;

/// A receipt body. Receives the encoder after initialization.
pub trait Layout {
    fn layout(&self, encoder: &mut ReceiptEncoder);
}

// Allow boxed layouts
impl Layout for Box<dyn Layout + Send + Sync> {
    fn layout(&self, encoder: &mut ReceiptEncoder) {
        self.as_ref().layout(encoder);
    }
}

// Allow references to layouts
impl<T: Layout + ?Sized> Layout for &T {
    fn layout(&self, encoder: &mut ReceiptEncoder) {
        (*self).layout(encoder);
    }
}

/// A layout paired with encoder options.
#[derive(Debug, Clone)]
pub struct Receipt<L> {
    layout: L,
    config: EncoderConfig,
}

impl<L: Layout> Receipt<L> {
    pub fn new(layout: L, config: EncoderConfig) -> Self {
        Self { layout, config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Compile to an optimized IR program.
    pub fn compile(&self) -> Program {
        self.render().finish()
    }

    /// Compile, optimize, and generate bytes.
    pub fn encode(&self) -> Vec<u8> {
        self.render().encode()
    }

    fn render(&self) -> ReceiptEncoder {
        let mut encoder = ReceiptEncoder::new(&self.config);
        encoder.initialize();
        encoder.newline();
        self.layout.layout(&mut encoder);
        encoder
    }
}

// ============================================================================
// TESTS
// ============================================================================

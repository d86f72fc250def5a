//! # IR Opcodes
//!
//! This module defines the intermediate representation (IR) for receipt
//! printing. The IR is a sequence of opcodes that can be inspected,
//! optimized, and compiled to ESC/POS or StarPRNT bytes.
//!
//! ```text
//! Layout → ReceiptEncoder → IR (inspectable) → Optimizer → Codegen → Bytes
//! ```
//!
//! Each opcode is a single atomic operation. Style changes are individual
//! ops so the optimizer can drop redundant ones.

use crate::protocol::{Alignment, Codepage};

/// Style state tracked for optimization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleState {
    pub alignment: Alignment,
    pub bold: bool,
    pub invert: bool,
    pub width_mult: u8,
    pub height_mult: u8,
    pub codepage: Codepage,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            alignment: Alignment::Left,
            bold: false,
            invert: false,
            width_mult: 1,
            height_mult: 1,
            codepage: Codepage::Ascii,
        }
    }
}

impl StyleState {
    /// Apply `op`, returning whether the state changed.
    ///
    /// Init (ESC @) resets every field, the character table included.
    /// Ops that carry no style leave the state alone.
    pub fn apply(&mut self, op: &Op) -> bool {
        match op {
            Op::Init => std::mem::take(self) != *self,
            Op::SetAlign(a) => std::mem::replace(&mut self.alignment, *a) != *a,
            Op::SetBold(b) => std::mem::replace(&mut self.bold, *b) != *b,
            Op::SetInvert(i) => std::mem::replace(&mut self.invert, *i) != *i,
            Op::SetSize { width, height } => {
                let changed = self.width_mult != *width || self.height_mult != *height;
                self.width_mult = *width;
                self.height_mult = *height;
                changed
            }
            Op::SetCodepage(cp) => std::mem::replace(&mut self.codepage, *cp) != *cp,
            Op::Cut { .. } | Op::Text(_) | Op::Newline => false,
        }
    }
}

/// IR opcodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    // ========== Printer Control ==========
    /// Initialize printer (ESC @). Resets to default state.
    Init,

    /// Feed to the cutter and cut. `partial: true` leaves a small hinge.
    Cut { partial: bool },

    // ========== Style Changes ==========
    /// Set text alignment.
    SetAlign(Alignment),

    /// Enable/disable bold.
    SetBold(bool),

    /// Enable/disable inverted (white on black).
    SetInvert(bool),

    /// Set character size multipliers (1 = normal, up to 8).
    SetSize { width: u8, height: u8 },

    /// Select the character table used for subsequent text.
    SetCodepage(Codepage),

    // ========== Content ==========
    /// Text (no trailing newline).
    Text(String),

    /// Line feed (newline).
    Newline,
}

impl Op {
    /// Whether this op only resets or configures the printer, producing no
    /// output on paper.
    pub fn is_setup(&self) -> bool {
        matches!(self, Op::Init | Op::SetCodepage(_))
    }
}

/// A compiled IR program.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub ops: Vec<Op>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Add an op to the program.
    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    /// Get the number of ops in the program.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if the program is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate over ops.
    pub fn iter(&self) -> impl Iterator<Item = &Op> {
        self.ops.iter()
    }

    /// First op that affects the paper (skips init and codepage setup).
    pub fn first_structural(&self) -> Option<&Op> {
        self.ops.iter().find(|op| !op.is_setup())
    }
}

impl FromIterator<Op> for Program {
    fn from_iter<T: IntoIterator<Item = Op>>(iter: T) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

//! # Intermediate Representation (IR)
//!
//! This module provides the IR layer for receipt printing. The IR is a
//! "bytecode" representation that sits between receipt layouts and raw
//! printer command bytes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌───────────┐     ┌──────────┐
//! │   Layouts   │ ──► │     IR      │ ──► │ Optimizer │ ──► │ Codegen  │
//! │  (encoder)  │     │  (Vec<Op>)  │     │           │     │ (bytes)  │
//! └─────────────┘     └─────────────┘     └───────────┘     └──────────┘
//! ```
//!
//! ## Benefits of IR
//!
//! 1. **Inspectable**: Debug and visualize what will be printed
//! 2. **Optimizable**: Remove redundant style changes, merge text
//! 3. **Portable**: One program compiles to ESC/POS or StarPRNT
//!
//! ## Example
//!
//! ```
//! use vozy::ir::{Op, Program};
//! use vozy::protocol::{Alignment, Language};
//!
//! let mut program = Program::new();
//! program.push(Op::Init);
//! program.push(Op::SetAlign(Alignment::Center));
//! program.push(Op::SetBold(true));
//! program.push(Op::Text("HELLO".into()));
//! program.push(Op::Newline);
//! program.push(Op::Cut { partial: false });
//!
//! let bytes = program.optimize().to_bytes(Language::EscPos);
//! assert_eq!(&bytes[..2], &[0x1B, 0x40]);
//! ```

mod codegen;
mod ops;
mod optimize;

// Re-export the ops types (codegen and optimize add methods to Program via impl)
pub use ops::*;

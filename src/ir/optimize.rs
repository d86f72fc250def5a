//! # IR Optimizer
//!
//! Optimization passes that shrink programs before code generation.
//!
//! 1. **Remove redundant init**: drop an Init that would reset nothing
//! 2. **Remove redundant styles**: don't emit SetBold(true) if already bold
//! 3. **Merge adjacent text**: combine consecutive Text ops
//!
//! Newlines and cuts are never removed or reordered.

use super::ops::{Op, Program, StyleState};

impl Program {
    /// Apply all optimization passes.
    pub fn optimize(self) -> Self {
        let ops = self.ops;
        let ops = remove_redundant_init(ops);
        let ops = remove_redundant_styles(ops);
        let ops = merge_adjacent_text(ops);
        Program { ops }
    }
}

/// Remove Init ops that would reset nothing.
///
/// The first Init is always kept. A later one is kept when some style
/// differs from the power-on defaults, so a mid-receipt reset still clears
/// bold, inversion, size and the character table.
fn remove_redundant_init(ops: Vec<Op>) -> Vec<Op> {
    let mut seen_init = false;
    let mut state = StyleState::default();
    ops.into_iter()
        .filter(|op| {
            let changed = state.apply(op);
            if matches!(op, Op::Init) {
                let keep = !seen_init || changed;
                seen_init = true;
                return keep;
            }
            true
        })
        .collect()
}

/// Remove style changes that don't change the current state.
fn remove_redundant_styles(ops: Vec<Op>) -> Vec<Op> {
    let mut state = StyleState::default();
    ops.into_iter()
        .filter(|op| {
            let changed = state.apply(op);
            match op {
                Op::SetAlign(_)
                | Op::SetBold(_)
                | Op::SetInvert(_)
                | Op::SetSize { .. }
                | Op::SetCodepage(_) => changed,
                // Init and non-style ops pass through unchanged
                _ => true,
            }
        })
        .collect()
}

/// Merge consecutive Text ops into a single op.
fn merge_adjacent_text(ops: Vec<Op>) -> Vec<Op> {
    let mut result = Vec::with_capacity(ops.len());
    let mut pending_text: Option<String> = None;

    for op in ops {
        match op {
            Op::Text(s) => {
                if let Some(ref mut pending) = pending_text {
                    pending.push_str(&s);
                } else {
                    pending_text = Some(s);
                }
            }
            other => {
                if let Some(text) = pending_text.take() {
                    result.push(Op::Text(text));
                }
                result.push(other);
            }
        }
    }

    if let Some(text) = pending_text {
        result.push(Op::Text(text));
    }

    result
}

//! Diagnostic trace of a connection attempt.

/// Append-only, ordered log of human-readable events.
///
/// Insertion order is the chronological trace. The log is cleared only at
/// the start of [`PrinterConnection::connect`](super::PrinterConnection::connect).
/// Each entry is also emitted as a `tracing` debug event.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsLog {
    entries: Vec<String>,
}

impl DiagnosticsLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(target: "vozy::diagnostics", "{}", message);
        self.entries.push(message);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.contains(needle))
    }
}

//! Error kinds raised by the editing core.
//!
//! The core only signals; logging and alerting happen one layer up in `editor`.

use thiserror::Error;

/// Everything the buffer, cursor and history can fail with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// A 1-based line number (or the row derived from it) is not inside the document.
    #[error("line {line} is outside the buffer (1..={size})")]
    OutOfBufferRange { line: usize, size: usize },

    /// A value such as a block range or a history step is outside its valid bounds.
    #[error("value out of range: {what}")]
    ValueOutOfRange { what: &'static str },

    /// The user confirmed quitting. Not a failure: unwinds to the main loop.
    #[error("execution interrupted")]
    InterruptedExecution,
}

impl EditorError {
    /// Whether the error should be reported and then ignored.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InterruptedExecution)
    }
}

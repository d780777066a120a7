//! Error types for cfgtree

use thiserror::Error;

/// Result type for cfgtree operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for cfgtree
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Recoverable irregularities met while reconstructing a tree.
///
/// None of these stop a parse. They are collected on the [`Tree`](crate::Tree)
/// so callers can decide how much to trust a partial result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// A quote was opened and never closed; the rest of the line became one word
    #[error("line {line}: unbalanced quote, remainder kept as text")]
    MalformedLine { line: usize },

    /// A block terminator with no open block at its depth
    #[error("line {line}: terminator at indent {indent} closes nothing")]
    UnmatchedTerminator { line: usize, indent: usize },

    /// Dedent that is not a whole number of indent steps
    #[error("line {line}: dedent of {delta} is not a multiple of step {step}")]
    IrregularIndent { line: usize, delta: usize, step: usize },

    /// Input ended with more than one token whose block was never closed
    #[error("{open} blocks left open at end of input")]
    Unterminated { open: usize },

    /// Input ended inside a multi-line literal
    #[error("line {line}: literal block never closed")]
    UnterminatedLiteral { line: usize },

    /// No rule could build a token for the line, so it was skipped
    #[error("line {line}: no rule matched, line skipped")]
    UnmatchedLine { line: usize },
}

impl Anomaly {
    /// Source line the anomaly points at, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            Anomaly::MalformedLine { line }
            | Anomaly::UnmatchedTerminator { line, .. }
            | Anomaly::IrregularIndent { line, .. }
            | Anomaly::UnterminatedLiteral { line }
            | Anomaly::UnmatchedLine { line } => Some(*line),
            Anomaly::Unterminated { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anomaly_display() {
        let anomaly = Anomaly::IrregularIndent { line: 7, delta: 3, step: 2 };
        assert_eq!(
            anomaly.to_string(),
            "line 7: dedent of 3 is not a multiple of step 2"
        );
        assert_eq!(anomaly.line(), Some(7));
        assert_eq!(Anomaly::Unterminated { open: 2 }.line(), None);
    }
}

//! Reconstruction engine
//!
//! Lines are split into words by the [`lexer`], recognized by the [`rules`]
//! and assembled into a tree by one of the two reconstructors.

pub mod indented;
pub mod lexer;
pub mod rules;
pub mod terminated;

pub use lexer::{indent_of, split_words, Word, Words};
pub use rules::{Rule, RuleSet};

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: no rule recognizes '{text}'")]
    UnmatchedLine { line: usize, text: String },

    #[error("parser already holds a tree, use a fresh parser")]
    AlreadyParsed,
}

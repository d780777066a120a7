//! Path expression parser
//!
//! Folds scanned pieces into segments. Quotes toggle a verbatim mode in
//! which delimiters are ordinary text; an odd number of quotes leaves the
//! rest of the expression inside the last segment.

use super::lexer::{scan, PathToken};
use super::DataPath;
use tracing::debug;

/// Parse a path expression. Leading `/` and surrounding whitespace are optional.
pub fn parse(text: &str) -> DataPath {
    let mut segments = Vec::new();
    let mut quoted = false;
    let mut segment = String::new();

    for token in scan(text.trim()) {
        match token {
            PathToken::Quote => quoted = !quoted,
            PathToken::Delimiter if quoted => segment.push('/'),
            PathToken::Delimiter => {
                if !segment.is_empty() {
                    segments.push(std::mem::take(&mut segment));
                }
            }
            PathToken::Text(text) => segment.push_str(&text),
        }
    }

    if quoted {
        debug!(path = %text, "unbalanced quote in path, remainder kept verbatim");
    }

    if !segment.is_empty() {
        segments.push(segment);
    }

    DataPath::new(segments)
}

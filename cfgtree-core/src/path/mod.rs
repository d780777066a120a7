//! Path expressions over the configuration tree
//!
//! A path is a `/`-delimited list of segments. A segment may embed a
//! double-quoted part that keeps `/` and spaces verbatim:
//!
//! ```text
//! /configure/router "management 1"/ctx
//! ```

pub mod lexer;
pub mod parser;

pub use lexer::{scan, PathToken};
pub use parser::parse;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parsed path: one segment per tree level
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataPath {
    segments: Vec<String>,
}

impl DataPath {
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// Copy of this path extended by one segment
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl From<Vec<String>> for DataPath {
    fn from(segments: Vec<String>) -> Self {
        Self::new(segments)
    }
}

impl FromStr for DataPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse(s))
    }
}

impl fmt::Display for DataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            if segment.contains('/') || segment.contains(' ') {
                write!(f, "/\"{}\"", segment)?;
            } else {
                write!(f, "/{}", segment)?;
            }
        }
        Ok(())
    }
}

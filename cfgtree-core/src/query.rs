//! Path matcher and path enumeration

use crate::path::DataPath;
use crate::token::Token;
use crate::tree::Tree;

/// Case-insensitive identity prefix test
fn matches(token: &Token, needle: &str) -> bool {
    token.identity().to_lowercase().starts_with(needle)
}

/// Resolve `path` against `roots`.
///
/// The first segment selects roots, each later segment selects direct
/// children of the previous selection. An empty path selects nothing.
pub fn select<'a>(roots: &'a [Token], path: &DataPath) -> Vec<&'a Token> {
    let Some((first, rest)) = path.segments().split_first() else {
        return Vec::new();
    };

    let needle = first.to_lowercase();
    let mut found: Vec<&'a Token> = roots.iter().filter(|t| matches(t, &needle)).collect();

    for segment in rest {
        if found.is_empty() {
            break;
        }

        let needle = segment.to_lowercase();
        let mut next = Vec::new();
        for &token in &found {
            next.extend(token.children.iter().filter(|c| matches(c, &needle)));
        }
        found = next;
    }

    found
}

/// Depth-first walk yielding the identity path of every node
#[derive(Debug, Clone)]
pub struct Paths<'a> {
    stack: Vec<(&'a Token, DataPath)>,
}

impl<'a> Paths<'a> {
    pub fn new(roots: &'a [Token]) -> Self {
        let stack = roots.iter().rev().map(|t| (t, DataPath::default())).collect();
        Self { stack }
    }
}

impl Iterator for Paths<'_> {
    type Item = DataPath;

    fn next(&mut self) -> Option<Self::Item> {
        let (token, parent) = self.stack.pop()?;
        let path = parent.join(token.identity());

        for child in token.children.iter().rev() {
            self.stack.push((child, path.clone()));
        }

        Some(path)
    }
}

impl Tree {
    pub fn query(&self, path: &DataPath) -> Vec<&Token> {
        select(self.roots(), path)
    }

    /// Fresh lazy walk over every root-to-node path
    pub fn enumerate_paths(&self) -> Paths<'_> {
        Paths::new(self.roots())
    }
}

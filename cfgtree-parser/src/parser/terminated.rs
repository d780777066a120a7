//! Terminator-based reconstruction
//!
//! Blocks are closed by an explicit keyword (`exit`) written at the indent
//! of the line that opened them. Tokens are buffered flat in source order;
//! a terminator folds everything deeper than itself into the open token at
//! its own indent. Whatever is still buffered at the end of the input is
//! folded by indentation alone and becomes the roots of the tree, with
//! reopened root blocks merged into their first declaration.

use super::lexer::{indent_of, split_words};
use super::rules::RuleSet;
use super::ParseError;
use cfgtree_core::config::TerminatedConfig;
use cfgtree_core::merge::{adopt, merge};
use cfgtree_core::{Anomaly, Token, Tree};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Waiting for the start marker
    Preamble,
    Active,
    /// Stop marker seen, the rest is ignored
    Done,
}

/// A buffered token and whether its terminator has been seen
#[derive(Debug)]
struct Entry {
    token: Token,
    closed: bool,
}

struct Reconstructor<'c> {
    config: &'c TerminatedConfig,
    rules: &'c RuleSet,
    strict: bool,
    state: State,
    open: Vec<Entry>,
    tree: Tree,
}

/// Rebuild the tree of a terminator-based dump
pub fn reconstruct<'a, I>(
    lines: I,
    config: &TerminatedConfig,
    rules: &RuleSet,
    strict: bool,
) -> Result<Tree, ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let state = if config.start_marker.is_some() {
        State::Preamble
    } else {
        State::Active
    };
    let mut reconstructor = Reconstructor {
        config,
        rules,
        strict,
        state,
        open: Vec::new(),
        tree: Tree::new(config.indent_step),
    };

    for (idx, line) in lines.into_iter().enumerate() {
        reconstructor.feed(idx + 1, line)?;
        if reconstructor.state == State::Done {
            break;
        }
    }

    Ok(reconstructor.finish())
}

impl Reconstructor<'_> {
    fn feed(&mut self, line_no: usize, raw: &str) -> Result<(), ParseError> {
        let trimmed = raw.trim();

        if self.state == State::Preamble {
            if self.config.start_marker.as_deref() == Some(trimmed) {
                debug!(line = line_no, "start marker reached");
                self.state = State::Active;
            }
            return Ok(());
        }

        if self.config.stop_marker.as_deref() == Some(trimmed) {
            debug!(line = line_no, "stop marker reached");
            self.state = State::Done;
            return Ok(());
        }

        if trimmed.is_empty() || has_prefix(trimmed, &self.config.comment_prefix) {
            return Ok(());
        }

        let split = split_words(trimmed);
        if split.unbalanced {
            self.tree.record(Anomaly::MalformedLine { line: line_no });
        }
        let words = split.words;
        let Some(first) = words.first() else {
            return Ok(());
        };

        if !self.config.echo_keyword.is_empty() && *first == self.config.echo_keyword {
            return Ok(());
        }

        let indent = indent_of(raw);
        if has_prefix(first, &self.config.terminator) {
            self.close(line_no, indent);
            return Ok(());
        }

        match self.rules.apply(&words, indent, self.config.indent_step) {
            Some(token) => {
                trace!(line = line_no, identity = %token.identity(), "token buffered");
                self.open.push(Entry { token, closed: false });
            }
            None if self.strict => {
                return Err(ParseError::UnmatchedLine {
                    line: line_no,
                    text: trimmed.to_string(),
                });
            }
            None => self.tree.record(Anomaly::UnmatchedLine { line: line_no }),
        }

        Ok(())
    }

    /// Close the open block at `indent`
    fn close(&mut self, line_no: usize, indent: usize) {
        let target = self
            .open
            .iter()
            .rposition(|entry| entry.token.indent() <= indent)
            .filter(|&idx| self.open[idx].token.indent() == indent && !self.open[idx].closed);

        match target {
            Some(idx) => {
                self.fold(idx);
                self.open[idx].closed = true;
            }
            None => self.tree.record(Anomaly::UnmatchedTerminator {
                line: line_no,
                indent,
            }),
        }
    }

    /// Move the entries following `idx` that are deeper than it into it
    fn fold(&mut self, idx: usize) {
        let depth = self.open[idx].token.indent();
        let end = self.open[idx + 1..]
            .iter()
            .position(|entry| entry.token.indent() <= depth)
            .map_or(self.open.len(), |pos| idx + 1 + pos);

        let children: Vec<Entry> = self.open.drain(idx + 1..end).collect();
        let parent = &mut self.open[idx].token;
        parent.mark_container();
        debug!(block = %parent.identity(), children = children.len(), "block folded");

        for child in children {
            adopt(parent, child.token);
        }
    }

    fn finish(mut self) -> Tree {
        let unclosed = self.open.iter().filter(|entry| !entry.closed).count();
        if unclosed > 1 {
            self.tree.record(Anomaly::Unterminated { open: unclosed });
            self.tree.set_complete(false);
        }

        // Fold what was never closed by indentation alone
        while let Some(idx) = self
            .open
            .windows(2)
            .rposition(|pair| pair[0].token.indent() < pair[1].token.indent())
        {
            self.fold(idx);
        }

        // A block reopened at root level joins its first declaration
        for Entry { token, .. } in self.open {
            let roots = self.tree.roots_mut();
            let reopened = roots
                .iter()
                .position(|root| root.same_declaration(&token) && (root.is_block() || token.is_block()));
            match reopened {
                Some(idx) => {
                    debug!(block = %token.identity(), "reopened root merged");
                    merge(&mut roots[idx], token);
                }
                None => roots.push(token),
            }
        }
        self.tree
    }
}

fn has_prefix(text: &str, prefix: &str) -> bool {
    !prefix.is_empty() && text.starts_with(prefix)
}

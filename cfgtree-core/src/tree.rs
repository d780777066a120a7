//! Reconstructed configuration tree

use crate::error::Anomaly;
use crate::token::Token;
use tracing::{debug, warn};

/// Ordered root tokens of one parsed dump plus what the parse noticed on the way
#[derive(Debug, Clone)]
pub struct Tree {
    roots: Vec<Token>,
    indent_step: Option<usize>,
    default_step: usize,
    complete: bool,
    anomalies: Vec<Anomaly>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Tree {
    /// Empty tree rendering with `default_step` until a step is discovered
    pub fn new(default_step: usize) -> Self {
        Self {
            roots: Vec::new(),
            indent_step: None,
            default_step: default_step.max(1),
            complete: true,
            anomalies: Vec::new(),
        }
    }

    pub fn roots(&self) -> &[Token] {
        &self.roots
    }

    pub fn roots_mut(&mut self) -> &mut Vec<Token> {
        &mut self.roots
    }

    pub fn push_root(&mut self, token: Token) {
        self.roots.push(token);
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn indent_step(&self) -> usize {
        self.indent_step.unwrap_or(self.default_step)
    }

    /// Record the indent step seen in the input. Only the first call sticks.
    pub fn discover_indent_step(&mut self, step: usize) -> bool {
        if self.indent_step.is_some() || step == 0 {
            return false;
        }
        debug!(step, "indent step discovered");
        self.indent_step = Some(step);
        true
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn set_complete(&mut self, complete: bool) {
        self.complete = complete;
    }

    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    pub fn record(&mut self, anomaly: Anomaly) {
        match anomaly {
            // dumps routinely open with a stray "exit all"
            Anomaly::UnmatchedTerminator { .. } => debug!("{}", anomaly),
            _ => warn!("{}", anomaly),
        }
        self.anomalies.push(anomaly);
    }
}

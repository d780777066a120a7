//! Terminator-based dialect (Nokia SR OS classic CLI)

use crate::parser::{terminated, ParseError, RuleSet};
use crate::ConfigParser;
use cfgtree_core::config::{ParserConfig, TerminatedConfig};
use cfgtree_core::Tree;

/// Parser for dumps whose blocks are closed by `exit`
#[derive(Debug, Clone)]
pub struct TerminatedParser {
    config: TerminatedConfig,
    rules: RuleSet,
    strict: bool,
    tree: Option<Tree>,
}

impl Default for TerminatedParser {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}

impl TerminatedParser {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            config: config.terminated.clone(),
            rules: RuleSet::terminated(),
            strict: config.strict,
            tree: None,
        }
    }

    /// Replace the rule list
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Whether `lines` look like a dump of this dialect
    pub fn identify<'a, I>(lines: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines.into_iter().map(str::trim).any(|line| {
            line.starts_with("exit all") || line.starts_with("# TiMOS")
        })
    }

    pub fn into_tree(self) -> Option<Tree> {
        self.tree
    }
}

impl ConfigParser for TerminatedParser {
    fn parse<'a>(&mut self, lines: &mut dyn Iterator<Item = &'a str>) -> Result<(), ParseError> {
        if self.tree.is_some() {
            return Err(ParseError::AlreadyParsed);
        }
        let tree = terminated::reconstruct(lines, &self.config, &self.rules, self.strict)?;
        self.tree = Some(tree);
        Ok(())
    }

    fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }
}

//! Indent-based dialect (Cisco IOS)

use crate::parser::{indented, ParseError, RuleSet};
use crate::ConfigParser;
use cfgtree_core::config::{IndentedConfig, ParserConfig};
use cfgtree_core::Tree;

/// Parser for dumps nested by indentation only
#[derive(Debug, Clone)]
pub struct IndentedParser {
    config: IndentedConfig,
    rules: RuleSet,
    tree: Option<Tree>,
}

impl Default for IndentedParser {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}

impl IndentedParser {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            config: config.indented.clone(),
            rules: RuleSet::indented(),
            tree: None,
        }
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Section separators (`!` alone on a line) mark this dialect
    pub fn identify<'a, I>(lines: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines.into_iter().any(|line| line.trim() == "!")
    }

    pub fn into_tree(self) -> Option<Tree> {
        self.tree
    }
}

impl ConfigParser for IndentedParser {
    fn parse<'a>(&mut self, lines: &mut dyn Iterator<Item = &'a str>) -> Result<(), ParseError> {
        if self.tree.is_some() {
            return Err(ParseError::AlreadyParsed);
        }
        self.tree = Some(indented::reconstruct(lines, &self.config, &self.rules));
        Ok(())
    }

    fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }
}

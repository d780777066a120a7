//! cfgtree configuration dump parser
//!
//! This crate rebuilds the configuration tree of a network device from the
//! flat text of its configuration dump.
//!
//! # Example
//!
//! ```rust,ignore
//! use cfgtree_parser::{ConfigParser, TerminatedParser};
//!
//! let source = r#"
//! configure
//!     system
//!         name "PE1"
//!     exit
//! exit all
//! "#;
//!
//! let mut parser = TerminatedParser::default();
//! parser.parse_str(source).unwrap();
//! let system = parser.query(&"/configure/system".parse().unwrap());
//! ```

pub mod adapter;
pub mod parser;

pub use adapter::{IndentedParser, TerminatedParser};
pub use parser::{indent_of, split_words, ParseError, Rule, RuleSet, Word, Words};

use cfgtree_core::config::ParserConfig;
use cfgtree_core::{DataPath, Token, Tree};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// A dialect parser holding at most one reconstructed tree.
///
/// Projections of a parser that has not parsed anything yet are empty.
pub trait ConfigParser {
    /// Build the tree from a line stream. A parser parses once.
    fn parse<'a>(&mut self, lines: &mut dyn Iterator<Item = &'a str>) -> Result<(), ParseError>;

    /// The tree, once parsed
    fn tree(&self) -> Option<&Tree>;

    fn parse_str(&mut self, source: &str) -> Result<(), ParseError> {
        self.parse(&mut source.lines())
    }

    fn is_complete(&self) -> bool {
        self.tree().is_some_and(Tree::is_complete)
    }

    fn to_nested_map(&self) -> Value {
        self.tree()
            .map(Tree::to_nested_map)
            .unwrap_or_else(|| Value::Object(Map::new()))
    }

    /// Indented text of the whole tree
    fn dumps(&self) -> String {
        self.tree().map(Tree::to_text).unwrap_or_default()
    }

    /// Nested map of every token matching `path`
    fn query(&self, path: &DataPath) -> Vec<Value> {
        self.tree()
            .map(|tree| tree.query(path).into_iter().map(Token::to_nested_map).collect())
            .unwrap_or_default()
    }

    fn get_paths(&self) -> Vec<DataPath> {
        self.tree()
            .map(|tree| tree.enumerate_paths().collect())
            .unwrap_or_default()
    }
}

/// Configuration dump conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// Blocks closed by an explicit `exit`
    Terminated,
    /// Blocks implied by indentation
    Indented,
}

impl Dialect {
    /// Sniff the dialect of a dump
    pub fn detect(source: &str) -> Option<Self> {
        if TerminatedParser::identify(source.lines()) {
            Some(Dialect::Terminated)
        } else if IndentedParser::identify(source.lines()) {
            Some(Dialect::Indented)
        } else {
            None
        }
    }

    /// A fresh parser for this dialect
    pub fn parser(self, config: &ParserConfig) -> Box<dyn ConfigParser> {
        match self {
            Dialect::Terminated => Box::new(TerminatedParser::new(config)),
            Dialect::Indented => Box::new(IndentedParser::new(config)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Terminated => "terminated",
            Dialect::Indented => "indented",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "terminated" => Ok(Dialect::Terminated),
            "indented" => Ok(Dialect::Indented),
            other => Err(format!("unknown dialect '{}'", other)),
        }
    }
}

/// Full pipeline: source -> Tree
pub fn parse(dialect: Dialect, source: &str, config: &ParserConfig) -> Result<Tree, ParseError> {
    match dialect {
        Dialect::Terminated => parser::terminated::reconstruct(
            source.lines(),
            &config.terminated,
            &RuleSet::terminated(),
            config.strict,
        ),
        Dialect::Indented => Ok(parser::indented::reconstruct(
            source.lines(),
            &config.indented,
            &RuleSet::indented(),
        )),
    }
}

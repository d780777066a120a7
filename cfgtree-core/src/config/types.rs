//! Configuration type definitions
//!
//! These types describe the conventions of each dump dialect: comment
//! markers, block terminators, preamble/trailer markers and indentation.

use serde::{Deserialize, Serialize};

/// Root configuration for the parsers
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ParserConfig {
    /// Fail on lines no rule can build instead of skipping them
    #[serde(default)]
    pub strict: bool,

    /// Dialect closing blocks with an explicit keyword
    #[serde(default)]
    pub terminated: TerminatedConfig,

    /// Dialect nesting by indentation only
    #[serde(default)]
    pub indented: IndentedConfig,
}

/// Terminator-based dialect conventions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerminatedConfig {
    /// Lines starting with this are comments
    pub comment_prefix: String,

    /// Lines whose first word is this are dropped
    pub echo_keyword: String,

    /// First-word prefix that closes a block
    pub terminator: String,

    /// Skip everything up to and including this line
    pub start_marker: Option<String>,

    /// Stop at this line
    pub stop_marker: Option<String>,

    /// Child indent of rule-built tokens and rendering step
    pub indent_step: usize,
}

impl Default for TerminatedConfig {
    fn default() -> Self {
        Self {
            comment_prefix: "#".to_string(),
            echo_keyword: "echo".to_string(),
            terminator: "exit".to_string(),
            start_marker: None,
            stop_marker: None,
            indent_step: 4,
        }
    }
}

/// Indent-based dialect conventions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IndentedConfig {
    /// Lines starting with this are comments
    pub comment_prefix: String,

    /// Skip everything up to and including this line. Input in which it
    /// never appears is parsed from the first line.
    pub start_marker: Option<String>,

    /// Stop at this line
    pub stop_marker: Option<String>,

    /// First word of a line that may open a multi-line literal
    pub literal_keyword: String,

    /// Delimiter of multi-line literals
    pub literal_marker: String,

    /// Indent step used until one is seen in the input
    pub default_indent_step: usize,
}

impl Default for IndentedConfig {
    fn default() -> Self {
        Self {
            comment_prefix: "!".to_string(),
            start_marker: Some("!".to_string()),
            stop_marker: Some("end".to_string()),
            literal_keyword: "banner".to_string(),
            literal_marker: "^C".to_string(),
            default_indent_step: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParserConfig::default();
        assert!(!config.strict);
        assert_eq!(config.terminated.terminator, "exit");
        assert_eq!(config.terminated.indent_step, 4);
        assert_eq!(config.indented.stop_marker.as_deref(), Some("end"));
        assert_eq!(config.indented.start_marker.as_deref(), Some("!"));
        assert_eq!(config.terminated.start_marker, None);
    }

    #[test]
    fn test_json_deserialize_partial() {
        let json = r#"{
            "strict": true,
            "indented": { "literal_marker": "%" }
        }"#;
        let config: ParserConfig = serde_json::from_str(json).unwrap();
        assert!(config.strict);
        assert_eq!(config.indented.literal_marker, "%");
        assert_eq!(config.indented.literal_keyword, "banner");
        assert_eq!(config.terminated, TerminatedConfig::default());
    }
}

//! cfgtree core library
//!
//! This crate provides the configuration tree model shared by the dialect
//! parsers: tokens and trees, the merge engine, nested-map and text
//! projections, and the path query language.

pub mod config;
pub mod error;
pub mod merge;
pub mod path;
pub mod projection;
pub mod query;
pub mod token;
pub mod tree;

pub use error::{Anomaly, Error, Result};
pub use path::DataPath;
pub use query::Paths;
pub use token::Token;
pub use tree::Tree;

/// cfgtree version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

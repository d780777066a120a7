//! Dialect adapters

mod indented;
mod terminated;

pub use indented::IndentedParser;
pub use terminated::TerminatedParser;

//! Utility modules shared across features
//!
//! - `tree_sitter`: node lookup and text/line helpers
//! - `entropy`: seedable randomness and fresh-name generation

pub mod entropy;
pub mod tree_sitter;

//! Shared module - Common types and utilities
//!
//! Span and replacement models plus the helpers every level needs for
//! reading tree-sitter nodes and drawing random names.

pub mod models;
pub mod utils;

// Re-exports for convenience
pub use models::*;
pub use utils::entropy::{Entropy, NameStyle};

//! Core models shared across features

pub mod replacement;
pub mod source_unit;
pub mod span;

pub use replacement::{Replacement, ReplacementSet};
pub use source_unit::SourceUnit;
pub use span::ByteSpan;

//! Tree-sitter backed grammars

pub mod grammar;
pub mod languages;

pub use grammar::{grammar, registry, Grammar, GrammarRegistry};

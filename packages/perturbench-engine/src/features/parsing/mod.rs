//! Parsing Feature
//!
//! Grammar and keyword registry plus the AST walker every level runs on.
//!
//! ## Structure
//! - `domain/` - LanguageId, PreservedKeywordSet, ParseTree, AstWalker
//! - `infrastructure/` - tree-sitter Grammar registry, per-language node kinds

pub mod domain;
pub mod infrastructure;

pub use domain::{identifier_tokens, AstWalker, LanguageId, ParseTree, PreservedKeywordSet};
pub use infrastructure::{grammar, registry, Grammar, GrammarRegistry};

//! Parsing domain models

pub mod keywords;
pub mod language_id;
pub mod parse_tree;
pub mod walker;

pub use keywords::{identifier_tokens, PreservedKeywordSet};
pub use language_id::LanguageId;
pub use parse_tree::ParseTree;
pub use walker::AstWalker;

//! Identifier Renaming Feature (Level 1)
//!
//! ## Structure
//! - `domain/` - IdentifierMap, BudgetUsage
//! - `application/` - IdentifierRenamer

pub mod application;
pub mod domain;

pub use application::{IdentifierRenamer, RenameOutcome};
pub use domain::{BudgetUsage, IdentifierMap, MappingEntry};

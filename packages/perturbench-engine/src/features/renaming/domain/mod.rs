pub mod budget;
pub mod identifier_map;

pub use budget::BudgetUsage;
pub use identifier_map::{IdentifierMap, MappingEntry};

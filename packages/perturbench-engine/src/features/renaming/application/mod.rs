pub mod renamer;

pub use renamer::{IdentifierRenamer, RenameOutcome};

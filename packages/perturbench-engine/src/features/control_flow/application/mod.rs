mod braced;
mod python;
pub mod transformer;

pub use transformer::{ControlFlowOutcome, ControlFlowTransformer, RewriteStats};

//! Control-Flow Restructuring Feature (Level 3)
//!
//! ## Structure
//! - `application/` - ControlFlowTransformer with Python and brace-language planners

pub mod application;

pub use application::{ControlFlowOutcome, ControlFlowTransformer, RewriteStats};

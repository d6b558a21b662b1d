//! Feature modules
//!
//! One module per obfuscation level plus the shared parsing layer and the
//! perturbation sweep built on Level 1.

pub mod control_flow;
pub mod dead_code;
pub mod parsing;
pub mod perturbation;
pub mod renaming;
pub mod string_encryption;

//! perturbench-engine
//!
//! Cross-language source obfuscation and perturbation for code-model
//! benchmarks. Python, Java, JavaScript and C sources are parsed with
//! tree-sitter and rewritten through byte-span replacements:
//!
//! - Level 1: budget-limited identifier renaming
//! - Level 2: inert dead-code injection
//! - Level 3: control-flow restructuring
//! - Level 4: XOR string encryption with an injected decryptor
//!
//! The perturbation sweep renames at growing budgets and scores every
//! variant against the original.
//!
//! ```rust,ignore
//! use perturbench_engine::{Entropy, LanguageId, ObfuscationLevel, Obfuscator, SourceUnit};
//!
//! let unit = SourceUnit::new("def foo(x):\n    return x\n", LanguageId::Python);
//! let outcome = Obfuscator::new().obfuscate(&unit, ObfuscationLevel::L3, &mut Entropy::seeded(7))?;
//! println!("{}", outcome.unit.code());
//! ```

pub mod config;
pub mod errors;
pub mod features;
pub mod pipeline;
pub mod shared;

pub use config::EngineConfig;
pub use errors::{ObfuscationError, Result};
pub use features::parsing::LanguageId;
pub use features::perturbation::{PerturbationDriver, PerturbationRecord, SimilarityMetric};
pub use pipeline::{BatchRunner, ObfuscationLevel, Obfuscator};
pub use shared::{Entropy, SourceUnit};

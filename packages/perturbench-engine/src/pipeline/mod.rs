//! Obfuscation pipeline
//!
//! ## Structure
//! - `level` - ObfuscationLevel (L1..L4)
//! - `pass` - ObfuscationPass trait and per-level adapters
//! - `obfuscator` - cumulative level orchestration
//! - `batch` - JSON Lines batch runner on a rayon pool

pub mod batch;
pub mod level;
pub mod obfuscator;
pub mod pass;

pub use batch::{
    BatchOutcome, BatchRunner, BatchSummary, BenchmarkSample, FailureCause, LevelOutput,
    SampleFailure, SampleInput, SampleRecord,
};
pub use level::ObfuscationLevel;
pub use obfuscator::{ObfuscationOutcome, Obfuscator};
pub use pass::{BoxedPass, ObfuscationPass, PassDetail, PassReport, RenamePass};

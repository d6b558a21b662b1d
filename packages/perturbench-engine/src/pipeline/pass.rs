//! Obfuscation pass trait
//!
//! Every level implements [`ObfuscationPass`] so the orchestrator can run
//! them uniformly. A pass parses its own input, so passes never share
//! tree state.

use serde::Serialize;
use std::time::Duration;

use super::level::ObfuscationLevel;
use crate::errors::Result;
use crate::features::control_flow::{ControlFlowTransformer, RewriteStats};
use crate::features::dead_code::{DeadCodeInjector, InsertionContext, TemplateKind};
use crate::features::renaming::{BudgetUsage, IdentifierRenamer};
use crate::features::string_encryption::{EncryptionReport, StringEncryptor};
use crate::shared::models::SourceUnit;
use crate::shared::Entropy;

/// Level-specific details of one applied pass
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "pass", rename_all = "snake_case")]
pub enum PassDetail {
    Rename { renamed: usize, budget: BudgetUsage },
    DeadCode { inserted: Vec<(InsertionContext, TemplateKind)> },
    ControlFlow(RewriteStats),
    Encryption(EncryptionReport),
}

/// Result of one pass
#[derive(Debug, Clone, Serialize)]
pub struct PassReport {
    pub level: ObfuscationLevel,
    #[serde(skip)]
    pub duration: Duration,
    pub detail: PassDetail,
}

impl PassReport {
    pub fn new(level: ObfuscationLevel, detail: PassDetail) -> Self {
        Self {
            level,
            duration: Duration::ZERO,
            detail,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Constructs the pass changed
    pub fn changes(&self) -> usize {
        match &self.detail {
            PassDetail::Rename { renamed, .. } => *renamed,
            PassDetail::DeadCode { inserted } => inserted.len(),
            PassDetail::ControlFlow(stats) => stats.total(),
            PassDetail::Encryption(report) => report.encrypted,
        }
    }
}

/// One obfuscation level
pub trait ObfuscationPass: Send + Sync {
    fn level(&self) -> ObfuscationLevel;

    /// Transform `unit` into a new unit of the same language
    fn apply(&self, unit: &SourceUnit, entropy: &mut Entropy) -> Result<(SourceUnit, PassReport)>;

    fn name(&self) -> &'static str {
        self.level().name()
    }
}

/// Boxed pass (for dynamic dispatch)
pub type BoxedPass = Box<dyn ObfuscationPass>;

// ============================================================================
// Level passes
// ============================================================================

/// Level 1 with a fixed budget (`None` renames every eligible name)
#[derive(Debug, Clone, Default)]
pub struct RenamePass {
    pub renamer: IdentifierRenamer,
    pub budget: Option<usize>,
}

impl ObfuscationPass for RenamePass {
    fn level(&self) -> ObfuscationLevel {
        ObfuscationLevel::L1
    }

    fn apply(&self, unit: &SourceUnit, entropy: &mut Entropy) -> Result<(SourceUnit, PassReport)> {
        let outcome = self.renamer.rename(unit, self.budget, entropy)?;
        let detail = PassDetail::Rename {
            renamed: outcome.mapping.len(),
            budget: outcome.budget,
        };
        Ok((unit.with_code(outcome.code), PassReport::new(self.level(), detail)))
    }
}

impl ObfuscationPass for DeadCodeInjector {
    fn level(&self) -> ObfuscationLevel {
        ObfuscationLevel::L2
    }

    fn apply(&self, unit: &SourceUnit, entropy: &mut Entropy) -> Result<(SourceUnit, PassReport)> {
        let outcome = self.inject(unit, entropy)?;
        let detail = PassDetail::DeadCode {
            inserted: outcome.inserted,
        };
        Ok((unit.with_code(outcome.code), PassReport::new(self.level(), detail)))
    }
}

impl ObfuscationPass for ControlFlowTransformer {
    fn level(&self) -> ObfuscationLevel {
        ObfuscationLevel::L3
    }

    fn apply(&self, unit: &SourceUnit, _entropy: &mut Entropy) -> Result<(SourceUnit, PassReport)> {
        let outcome = self.transform(unit)?;
        Ok((
            unit.with_code(outcome.code),
            PassReport::new(self.level(), PassDetail::ControlFlow(outcome.stats)),
        ))
    }
}

impl ObfuscationPass for StringEncryptor {
    fn level(&self) -> ObfuscationLevel {
        ObfuscationLevel::L4
    }

    fn apply(&self, unit: &SourceUnit, _entropy: &mut Entropy) -> Result<(SourceUnit, PassReport)> {
        let outcome = self.encrypt(unit)?;
        Ok((
            unit.with_code(outcome.code),
            PassReport::new(self.level(), PassDetail::Encryption(outcome.report)),
        ))
    }
}

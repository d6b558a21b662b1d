//! Pipeline orchestrator
//!
//! Applies levels `1..=N` in order. Each pass parses the previous pass's
//! output, so byte offsets never cross a level boundary.

use std::time::Instant;
use tracing::debug;

use super::level::ObfuscationLevel;
use super::pass::{BoxedPass, PassReport, RenamePass};
use crate::config::EngineConfig;
use crate::errors::Result;
use crate::features::control_flow::ControlFlowTransformer;
use crate::features::dead_code::DeadCodeInjector;
use crate::features::parsing::{grammar, LanguageId};
use crate::features::renaming::IdentifierRenamer;
use crate::features::string_encryption::StringEncryptor;
use crate::shared::models::SourceUnit;
use crate::shared::Entropy;

#[derive(Debug, Clone)]
pub struct ObfuscationOutcome {
    pub unit: SourceUnit,
    /// One report per applied level, lowest first
    pub reports: Vec<PassReport>,
}

pub struct Obfuscator {
    /// Indexed by `level - 1`
    passes: [BoxedPass; 4],
    verify_output: bool,
    allow_error_trees: bool,
}

impl Default for Obfuscator {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl Obfuscator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        let allow = config.parsing.allow_error_trees;
        Self {
            passes: [
                Box::new(RenamePass {
                    renamer: IdentifierRenamer::new().allow_error_trees(allow),
                    budget: config.rename.budget,
                }),
                Box::new(
                    DeadCodeInjector::new()
                        .templates_per_block(config.dead_code.templates_per_block)
                        .allow_error_trees(allow),
                ),
                Box::new(ControlFlowTransformer::new().allow_error_trees(allow)),
                Box::new(
                    StringEncryptor::new()
                        .with_key(config.encryption.key)
                        .allow_error_trees(allow),
                ),
            ],
            verify_output: config.parsing.verify_output,
            allow_error_trees: allow,
        }
    }

    /// Run levels `1..=level` over `unit`
    pub fn obfuscate(
        &self,
        unit: &SourceUnit,
        level: ObfuscationLevel,
        entropy: &mut Entropy,
    ) -> Result<ObfuscationOutcome> {
        let mut current = unit.clone();
        let mut reports = Vec::with_capacity(level.as_u8() as usize);

        for step in level.cumulative() {
            let pass = &self.passes[step.as_u8() as usize - 1];
            let start = Instant::now();
            let (next, report) = pass.apply(&current, entropy)?;
            let report = report.with_duration(start.elapsed());
            debug!(
                level = %step,
                changes = report.changes(),
                elapsed_us = report.duration.as_micros() as u64,
                "pass finished"
            );
            reports.push(report);
            current = next;
        }

        // Error-tolerant runs may start from a broken tree, so only strict
        // runs re-check the final text.
        if self.verify_output && !self.allow_error_trees {
            grammar(current.language()).parse(current.code())?;
        }

        Ok(ObfuscationOutcome {
            unit: current,
            reports,
        })
    }

    /// String-typed entry point: `(code, language tag, level 1..=4)`
    pub fn obfuscate_code(
        &self,
        code: &str,
        language: &str,
        level: u8,
        entropy: &mut Entropy,
    ) -> Result<String> {
        let language: LanguageId = language.parse()?;
        let level = ObfuscationLevel::try_from(level)?;
        let outcome = self.obfuscate(&SourceUnit::new(code, language), level, entropy)?;
        Ok(outcome.unit.into_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ObfuscationError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_level_one_matches_rename_example() {
        let mut config = EngineConfig::default();
        config.rename.budget = Some(2);
        let unit = SourceUnit::new("def foo(x):\n    y = x + 1\n    return y\n", LanguageId::Python);

        let outcome = Obfuscator::from_config(&config)
            .obfuscate(&unit, ObfuscationLevel::L1, &mut Entropy::sequential("v"))
            .unwrap();
        assert_eq!(outcome.unit.code(), "def foo(v0):\n    v1 = v0 + 1\n    return v1\n");
        assert_eq!(outcome.reports.len(), 1);
    }

    #[test]
    fn test_reports_follow_level_order() {
        let unit = SourceUnit::new(
            "int f(int a) {\n    if (a > 0) {\n        return a;\n    }\n    return 0;\n}\n",
            LanguageId::C,
        );
        let outcome = Obfuscator::new()
            .obfuscate(&unit, ObfuscationLevel::L3, &mut Entropy::seeded(11))
            .unwrap();
        let levels: Vec<u8> = outcome.reports.iter().map(|r| r.level.as_u8()).collect();
        assert_eq!(levels, vec![1, 2, 3]);
        assert!(outcome.unit.code().contains("if (1 && ("));
    }

    #[test]
    fn test_parse_failure_is_surfaced() {
        let unit = SourceUnit::new("def broken(:\n", LanguageId::Python);
        let result = Obfuscator::new().obfuscate(&unit, ObfuscationLevel::L2, &mut Entropy::seeded(0));
        assert!(matches!(result, Err(ObfuscationError::ParseFailure { .. })));
    }

    #[test]
    fn test_string_entry_point_rejects_bad_inputs() {
        let obfuscator = Obfuscator::new();
        let mut entropy = Entropy::seeded(0);
        assert!(matches!(
            obfuscator.obfuscate_code("x = 1\n", "ruby", 1, &mut entropy),
            Err(ObfuscationError::UnsupportedLanguage(_))
        ));
        assert!(matches!(
            obfuscator.obfuscate_code("x = 1\n", "python", 0, &mut entropy),
            Err(ObfuscationError::InvalidLevel(0))
        ));
    }

    #[test]
    fn test_level_four_encrypts_after_lower_levels() {
        let code = "function greet() {\n  console.log(\"hi\");\n}\n";
        let out = Obfuscator::new()
            .obfuscate_code(code, "javascript", 4, &mut Entropy::seeded(5))
            .unwrap();
        assert!(out.contains("_decrypt("));
        assert!(!out.contains("\"hi\""));
        assert!(grammar(LanguageId::JavaScript).parse(&out).is_ok());
    }
}

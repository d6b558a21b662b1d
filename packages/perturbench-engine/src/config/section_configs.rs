//! Per-section engine configuration
//!
//! Every section deserializes with `#[serde(default)]`, so a YAML file only
//! names the fields it changes.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::validation::{check_range, Validatable};
use crate::features::perturbation::SimilarityMetric;
use crate::shared::NameStyle;

// ============================================================================
// Parsing
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParsingConfig {
    /// Accept trees with ERROR/MISSING nodes instead of failing the sample
    pub allow_error_trees: bool,

    /// Re-parse the final output strictly
    pub verify_output: bool,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            allow_error_trees: false,
            verify_output: true,
        }
    }
}

impl Validatable for ParsingConfig {
    fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "ParsingConfig"
    }
}

// ============================================================================
// Level 1
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenameConfig {
    /// Distinct names renamed per call (absent = all eligible)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<usize>,

    /// Prefix of generated names
    pub name_prefix: String,

    /// Random letters after the prefix (1..=64)
    pub name_length: usize,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            budget: None,
            name_prefix: "_".to_string(),
            name_length: 8,
        }
    }
}

impl RenameConfig {
    pub fn name_style(&self) -> NameStyle {
        NameStyle::Random {
            prefix: self.name_prefix.clone(),
            length: self.name_length,
        }
    }
}

impl Validatable for RenameConfig {
    fn validate(&self) -> ConfigResult<()> {
        check_range(
            "rename.name_length",
            self.name_length,
            1,
            64,
            "Generated names need at least one random letter",
        )?;

        let mut chars = self.name_prefix.chars();
        let valid_start = chars
            .next()
            .map_or(false, |c| c == '_' || c.is_ascii_alphabetic());
        if !valid_start || !chars.all(|c| c == '_' || c.is_ascii_alphanumeric()) {
            return Err(ConfigError::Invalid(format!(
                "rename.name_prefix '{}' must be a non-empty ASCII identifier prefix",
                self.name_prefix
            )));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "RenameConfig"
    }
}

// ============================================================================
// Level 2
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeadCodeConfig {
    /// Templates before each brace-language closing brace (1..=8)
    pub templates_per_block: usize,
}

impl Default for DeadCodeConfig {
    fn default() -> Self {
        Self {
            templates_per_block: 2,
        }
    }
}

impl Validatable for DeadCodeConfig {
    fn validate(&self) -> ConfigResult<()> {
        check_range(
            "dead_code.templates_per_block",
            self.templates_per_block,
            1,
            8,
            "At least one template per block",
        )
    }

    fn config_name(&self) -> &'static str {
        "DeadCodeConfig"
    }
}

// ============================================================================
// Level 4
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncryptionConfig {
    /// XOR key (1..=127 keeps ASCII payloads ASCII)
    pub key: u8,
}

impl Default for EncryptionConfig {
    fn default() -> Self {
        Self {
            key: crate::features::string_encryption::DEFAULT_KEY,
        }
    }
}

impl Validatable for EncryptionConfig {
    fn validate(&self) -> ConfigResult<()> {
        check_range(
            "encryption.key",
            self.key,
            1,
            127,
            "Key 0 is the identity and keys above 127 leave ASCII",
        )
    }

    fn config_name(&self) -> &'static str {
        "EncryptionConfig"
    }
}

// ============================================================================
// Perturbation sweep
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PerturbationConfig {
    /// Upper bound on sweep length (1..=10000)
    pub max_pert: usize,

    /// Character shingle size (1..=16)
    pub shingle_size: usize,

    pub metric: SimilarityMetric,
}

impl Default for PerturbationConfig {
    fn default() -> Self {
        Self {
            max_pert: 5,
            shingle_size: 1,
            metric: SimilarityMetric::Cosine,
        }
    }
}

impl Validatable for PerturbationConfig {
    fn validate(&self) -> ConfigResult<()> {
        check_range(
            "perturbation.max_pert",
            self.max_pert,
            1,
            10_000,
            "Sweep length must be reasonable",
        )?;
        check_range(
            "perturbation.shingle_size",
            self.shingle_size,
            1,
            16,
            "Shingles are character windows",
        )
    }

    fn config_name(&self) -> &'static str {
        "PerturbationConfig"
    }
}

// ============================================================================
// Batch
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    /// Worker threads (0 = number of CPUs, up to 256)
    pub workers: usize,

    /// Base seed; absent = non-deterministic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Obfuscation levels emitted per sample
    pub levels: Vec<u8>,
}

impl BatchConfig {
    /// Effective worker count
    pub fn worker_count(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get()
        } else {
            self.workers
        }
    }
}

impl Validatable for BatchConfig {
    fn validate(&self) -> ConfigResult<()> {
        check_range(
            "batch.workers",
            self.workers,
            0,
            256,
            "Number of workers must be reasonable (0=auto)",
        )?;
        for &level in &self.levels {
            check_range("batch.levels", level, 1, 4, "Obfuscation levels are 1..=4")?;
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "BatchConfig"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ParsingConfig::default().validate().is_ok());
        assert!(RenameConfig::default().validate().is_ok());
        assert!(DeadCodeConfig::default().validate().is_ok());
        assert!(EncryptionConfig::default().validate().is_ok());
        assert!(PerturbationConfig::default().validate().is_ok());
        assert!(BatchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_range_violations() {
        let err = EncryptionConfig { key: 200 }.validate().unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { ref key, .. } if key == "encryption.key"));

        let err = BatchConfig {
            levels: vec![1, 5],
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(err.to_string().contains("1..=4"));

        assert!(DeadCodeConfig {
            templates_per_block: 0
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_name_prefix_must_be_identifier() {
        let bad = RenameConfig {
            name_prefix: "1x".to_string(),
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(ConfigError::Invalid(_))));

        let empty = RenameConfig {
            name_prefix: String::new(),
            ..Default::default()
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_worker_count_auto() {
        assert!(BatchConfig::default().worker_count() >= 1);
        let fixed = BatchConfig {
            workers: 3,
            ..Default::default()
        };
        assert_eq!(fixed.worker_count(), 3);
    }
}

//! Engine configuration
//!
//! One value describes every level plus the sweep and batch settings.
//! Built from defaults, loaded from YAML, then adjusted by CLI flags.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigExportV1, SUPPORTED_VERSIONS};
use super::section_configs::*;
use super::validation::Validatable;
use crate::shared::Entropy;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub parsing: ParsingConfig,
    pub rename: RenameConfig,
    pub dead_code: DeadCodeConfig,
    pub encryption: EncryptionConfig,
    pub perturbation: PerturbationConfig,
    pub batch: BatchConfig,
}

impl EngineConfig {
    /// Load and validate a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        debug!(path = %path.display(), "engine config loaded");
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        match export.version {
            None => return Err(ConfigError::MissingVersion),
            Some(v) if !SUPPORTED_VERSIONS.contains(&v) => {
                return Err(ConfigError::UnsupportedVersion {
                    found: v,
                    supported: SUPPORTED_VERSIONS.to_vec(),
                })
            }
            Some(_) => {}
        }

        let config = Self {
            parsing: export.parsing,
            rename: export.rename,
            dead_code: export.dead_code,
            encryption: export.encryption,
            perturbation: export.perturbation,
            batch: export.batch,
        };
        config.validate()?;
        Ok(config)
    }

    /// Export as YAML Schema v1
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            parsing: self.parsing.clone(),
            rename: self.rename.clone(),
            dead_code: self.dead_code.clone(),
            encryption: self.encryption.clone(),
            perturbation: self.perturbation.clone(),
            batch: self.batch.clone(),
        };
        Ok(serde_yaml::to_string(&export)?)
    }

    /// Name source styled by the `rename` section
    pub fn entropy(&self, seed: Option<u64>) -> Entropy {
        let entropy = match seed {
            Some(seed) => Entropy::seeded(seed),
            None => Entropy::from_entropy(),
        };
        entropy.with_style(self.rename.name_style())
    }

    /// Sections in validation order
    fn sections(&self) -> [&dyn Validatable; 6] {
        [
            &self.parsing,
            &self.rename,
            &self.dead_code,
            &self.encryption,
            &self.perturbation,
            &self.batch,
        ]
    }
}

impl Validatable for EngineConfig {
    fn validate(&self) -> ConfigResult<()> {
        for section in self.sections() {
            section.validate().map_err(|e| {
                debug!(section = section.config_name(), error = %e, "invalid config section");
                e
            })?;
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "EngineConfig"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::perturbation::SimilarityMetric;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = EngineConfig::default();
        config.rename.budget = Some(3);
        config.batch.levels = vec![1, 4];

        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("budget: 3"));
        assert_eq!(EngineConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_yaml_loading_partial_sections() {
        let yaml_content = r#"
version: 1
encryption:
  key: 42
perturbation:
  metric: jaccard
  shingle_size: 3
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let config = EngineConfig::from_yaml(temp_file.path()).unwrap();
        assert_eq!(config.encryption.key, 42);
        assert_eq!(config.perturbation.metric, SimilarityMetric::Jaccard);
        assert_eq!(config.perturbation.max_pert, 5);
        assert_eq!(config.dead_code.templates_per_block, 2);
        assert!(config.parsing.verify_output);
    }

    #[test]
    fn test_yaml_missing_version() {
        let result = EngineConfig::from_yaml_str("rename:\n  name_length: 4\n");
        assert!(matches!(result, Err(ConfigError::MissingVersion)));
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let result = EngineConfig::from_yaml_str("version: 2\n");
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn test_yaml_unknown_field_rejected() {
        let result = EngineConfig::from_yaml_str("version: 1\nrename:\n  budgett: 2\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_yaml_out_of_range_rejected() {
        let result = EngineConfig::from_yaml_str("version: 1\ndead_code:\n  templates_per_block: 9\n");
        assert!(matches!(result, Err(ConfigError::OutOfRange { .. })));
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("dead_code.templates_per_block = 9"), "{msg}");
    }

    #[test]
    fn test_entropy_uses_rename_style() {
        let mut config = EngineConfig::default();
        config.rename.name_prefix = "tmp_".to_string();
        config.rename.name_length = 3;
        let name = config.entropy(Some(1)).fresh_name();
        assert!(name.starts_with("tmp_"));
        assert_eq!(name.len(), 7);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = EngineConfig::from_yaml("/nonexistent/engine.yaml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}

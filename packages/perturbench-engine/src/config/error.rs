//! Engine configuration errors

use thiserror::Error;

/// Problems loading or validating `engine.yaml`
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Numeric setting outside its accepted bounds; `key` is the dotted YAML path
    #[error("{key} = {value} is outside {min}..={max} ({hint})")]
    OutOfRange {
        key: String,
        value: String,
        min: String,
        max: String,
        hint: String,
    },

    #[error("engine config has no `version` key; start the file with `version: 1`")]
    MissingVersion,

    #[error("engine config schema v{found} is not readable by this build (reads v{})", supported.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", v"))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    #[error("cannot read engine config: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed YAML, wrong value types and unknown keys
    #[error("malformed engine config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Setting that is well-typed and in range but still unusable
    #[error("invalid engine config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    pub fn out_of_range(
        key: impl Into<String>,
        value: impl ToString,
        min: impl ToString,
        max: impl ToString,
        hint: impl Into<String>,
    ) -> Self {
        Self::OutOfRange {
            key: key.into(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
            hint: hint.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_names_yaml_path() {
        let err = ConfigError::out_of_range(
            "rename.name_length",
            0,
            1,
            64,
            "Generated names need at least one random letter",
        );

        assert_eq!(
            err.to_string(),
            "rename.name_length = 0 is outside 1..=64 (Generated names need at least one random letter)"
        );
    }

    #[test]
    fn test_unsupported_version_lists_readable_versions() {
        let err = ConfigError::UnsupportedVersion {
            found: 3,
            supported: vec![1, 2],
        };
        assert_eq!(
            err.to_string(),
            "engine config schema v3 is not readable by this build (reads v1, v2)"
        );
    }

    #[test]
    fn test_missing_version_suggests_header() {
        let msg = ConfigError::MissingVersion.to_string();
        assert!(msg.contains("version: 1"));
    }
}

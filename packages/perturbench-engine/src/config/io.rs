//! YAML schema types
//!
//! Loading and export live on `EngineConfig`; this module only fixes the
//! on-disk shape.

use serde::{Deserialize, Serialize};

use super::section_configs::*;

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    #[serde(default)]
    pub version: Option<u32>,

    #[serde(default)]
    pub parsing: ParsingConfig,

    #[serde(default)]
    pub rename: RenameConfig,

    #[serde(default)]
    pub dead_code: DeadCodeConfig,

    #[serde(default)]
    pub encryption: EncryptionConfig,

    #[serde(default)]
    pub perturbation: PerturbationConfig,

    #[serde(default)]
    pub batch: BatchConfig,
}

pub const SUPPORTED_VERSIONS: &[u32] = &[1];

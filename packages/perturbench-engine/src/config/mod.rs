//! Engine configuration
//!
//! ## Usage
//! ```rust,ignore
//! let config = EngineConfig::from_yaml("engine.yaml")?;
//! let obfuscator = Obfuscator::from_config(&config);
//! ```

pub mod engine_config;
pub mod error;
pub mod io;
pub mod section_configs;
pub mod validation;

pub use engine_config::EngineConfig;
pub use error::{ConfigError, ConfigResult};
pub use section_configs::{
    BatchConfig, DeadCodeConfig, EncryptionConfig, ParsingConfig, PerturbationConfig,
    RenameConfig,
};
pub use validation::Validatable;

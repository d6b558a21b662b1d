//! Error types for perturbench-engine
//!
//! Every condition surfaced by the engine is a distinct variant so that a
//! batch driver can skip a failing sample without mistaking it for a
//! successful transformation.

use thiserror::Error;

use crate::config::ConfigError;
use crate::features::parsing::LanguageId;

/// Main error type for obfuscation and perturbation operations
#[derive(Debug, Error)]
pub enum ObfuscationError {
    /// Language tag outside the supported grammars
    #[error("Unsupported language '{0}'. Supported languages: python, java, javascript, c")]
    UnsupportedLanguage(String),

    /// Grammar could not produce an error-free tree
    #[error("Parse failure ({language}) at {line}:{column}: {detail}")]
    ParseFailure {
        language: LanguageId,
        line: usize,
        column: usize,
        detail: String,
    },

    /// Two replacements claim overlapping byte ranges
    #[error("Overlapping replacements: [{}, {}) and [{}, {})", first.0, first.1, second.0, second.1)]
    OverlappingSpan {
        first: (usize, usize),
        second: (usize, usize),
    },

    /// Replacement range outside the buffer or not on a char boundary
    #[error("Invalid replacement span [{start}, {end}) for buffer of {len} bytes")]
    InvalidSpan { start: usize, end: usize, len: usize },

    /// Obfuscation level outside 1..=4
    #[error("Invalid obfuscation level {0}. Valid levels: 1, 2, 3, 4")]
    InvalidLevel(u8),

    /// No syntactically valid place to inject generated code
    #[error("No injection point for {what} in {language} source")]
    NoInjectionPoint {
        language: LanguageId,
        what: &'static str,
    },

    /// Identifier map would stop being injective
    #[error("Generated name '{generated}' is already assigned to '{existing}'")]
    NameCollision { generated: String, existing: String },

    /// Batch worker pool could not be built
    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ObfuscationError {
    /// Create a parse failure at a 0-indexed tree-sitter position
    pub fn parse_failure(
        language: LanguageId,
        row: usize,
        column: usize,
        detail: impl Into<String>,
    ) -> Self {
        ObfuscationError::ParseFailure {
            language,
            line: row + 1,
            column,
            detail: detail.into(),
        }
    }

    /// Whether the error concerns the input sample rather than the engine setup
    pub fn is_sample_error(&self) -> bool {
        matches!(
            self,
            ObfuscationError::UnsupportedLanguage(_)
                | ObfuscationError::ParseFailure { .. }
                | ObfuscationError::OverlappingSpan { .. }
                | ObfuscationError::InvalidSpan { .. }
                | ObfuscationError::NoInjectionPoint { .. }
        )
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, ObfuscationError>;

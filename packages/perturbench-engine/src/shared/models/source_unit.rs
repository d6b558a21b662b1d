//! Immutable code buffer tagged with its language

use serde::{Deserialize, Serialize};

use crate::features::parsing::LanguageId;

/// One benchmark sample's code
///
/// Transformations never mutate a unit; they return a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceUnit {
    code: String,
    language: LanguageId,
}

impl SourceUnit {
    pub fn new(code: impl Into<String>, language: LanguageId) -> Self {
        Self {
            code: code.into(),
            language,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn language(&self) -> LanguageId {
        self.language
    }

    /// New unit in the same language
    pub fn with_code(&self, code: impl Into<String>) -> Self {
        Self::new(code, self.language)
    }

    pub fn into_code(self) -> String {
        self.code
    }
}

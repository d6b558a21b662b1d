//! Closed set of supported source languages

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ObfuscationError;

/// Language identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageId {
    Python,
    Java,
    JavaScript,
    C,
}

impl LanguageId {
    pub const ALL: [LanguageId; 4] = [
        LanguageId::Python,
        LanguageId::Java,
        LanguageId::JavaScript,
        LanguageId::C,
    ];

    /// Get language name as string
    pub fn name(&self) -> &'static str {
        match self {
            LanguageId::Python => "python",
            LanguageId::Java => "java",
            LanguageId::JavaScript => "javascript",
            LanguageId::C => "c",
        }
    }

    /// Get language from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "py" | "pyi" => Some(LanguageId::Python),
            "java" => Some(LanguageId::Java),
            "js" | "jsx" | "mjs" | "cjs" => Some(LanguageId::JavaScript),
            "c" | "h" => Some(LanguageId::C),
            _ => None,
        }
    }

    /// Get supported file extensions
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            LanguageId::Python => &["py", "pyi"],
            LanguageId::Java => &["java"],
            LanguageId::JavaScript => &["js", "jsx", "mjs", "cjs"],
            LanguageId::C => &["c", "h"],
        }
    }

    /// Blocks are delimited by indentation rather than braces
    pub fn is_indentation_based(&self) -> bool {
        matches!(self, LanguageId::Python)
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LanguageId {
    type Err = ObfuscationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "python" | "py" => Ok(LanguageId::Python),
            "java" => Ok(LanguageId::Java),
            "javascript" | "js" => Ok(LanguageId::JavaScript),
            "c" => Ok(LanguageId::C),
            _ => Err(ObfuscationError::UnsupportedLanguage(s.to_string())),
        }
    }
}

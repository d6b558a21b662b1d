//! Original-to-generated identifier mapping for one renaming call

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::errors::{ObfuscationError, Result};

/// Injective name mapping in first-seen order
#[derive(Debug, Clone, Default)]
pub struct IdentifierMap {
    forward: FxHashMap<String, String>,
    order: Vec<String>,
    generated: FxHashSet<String>,
}

impl IdentifierMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `original` to `generated`
    ///
    /// Re-inserting an original is a no-op returning `false`. A generated
    /// name already assigned to another original is a `NameCollision`.
    pub fn insert(&mut self, original: &str, generated: &str) -> Result<bool> {
        if self.forward.contains_key(original) {
            return Ok(false);
        }
        if self.generated.contains(generated) {
            let existing = self
                .order
                .iter()
                .find(|o| self.forward.get(*o).map(String::as_str) == Some(generated))
                .cloned()
                .unwrap_or_default();
            return Err(ObfuscationError::NameCollision {
                generated: generated.to_string(),
                existing,
            });
        }
        self.forward
            .insert(original.to_string(), generated.to_string());
        self.generated.insert(generated.to_string());
        self.order.push(original.to_string());
        Ok(true)
    }

    pub fn get(&self, original: &str) -> Option<&str> {
        self.forward.get(original).map(String::as_str)
    }

    pub fn contains(&self, original: &str) -> bool {
        self.forward.contains_key(original)
    }

    pub fn is_generated(&self, name: &str) -> bool {
        self.generated.contains(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// `(original, generated)` pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order
            .iter()
            .filter_map(move |o| self.forward.get(o).map(|g| (o.as_str(), g.as_str())))
    }

    pub fn to_entries(&self) -> Vec<MappingEntry> {
        self.iter()
            .map(|(original, generated)| MappingEntry {
                original: original.to_string(),
                generated: generated.to_string(),
            })
            .collect()
    }
}

/// Serializable view of one mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingEntry {
    pub original: String,
    pub generated: String,
}

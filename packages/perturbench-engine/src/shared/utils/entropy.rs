//! Seedable randomness for name generation and template choice
//!
//! An `Entropy` is per-call state. Passes receive it by `&mut` so that the
//! same seed always yields the same variant, and concurrent samples each
//! own an independent instance obtained through [`Entropy::fork`].

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;

use crate::errors::{ObfuscationError, Result};

const MAX_NAME_ATTEMPTS: usize = 1024;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// How fresh identifiers are spelled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameStyle {
    /// `prefix` followed by `length` random ASCII letters
    Random { prefix: String, length: usize },
    /// `prefix0`, `prefix1`, ... (stable names for tests and diffs)
    Sequential { prefix: String, next: usize },
}

impl Default for NameStyle {
    fn default() -> Self {
        NameStyle::Random {
            prefix: "_".to_string(),
            length: 8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Entropy {
    rng: StdRng,
    style: NameStyle,
}

impl Entropy {
    /// Deterministic source with the default name style
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            style: NameStyle::default(),
        }
    }

    /// Non-deterministic source for production runs
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            style: NameStyle::default(),
        }
    }

    /// Sequential names `prefix0`, `prefix1`, ... with a fixed-seed rng
    pub fn sequential(prefix: impl Into<String>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(0),
            style: NameStyle::Sequential {
                prefix: prefix.into(),
                next: 0,
            },
        }
    }

    pub fn with_style(mut self, style: NameStyle) -> Self {
        self.style = style;
        self
    }

    pub fn style(&self) -> &NameStyle {
        &self.style
    }

    /// Next candidate identifier; callers reject candidates that collide
    pub fn fresh_name(&mut self) -> String {
        match &mut self.style {
            NameStyle::Random { prefix, length } => {
                let mut name = String::with_capacity(prefix.len() + *length);
                name.push_str(prefix);
                for _ in 0..*length {
                    let idx = self.rng.gen_range(0..ALPHABET.len());
                    name.push(ALPHABET[idx] as char);
                }
                name
            }
            NameStyle::Sequential { prefix, next } => {
                let name = format!("{}{}", prefix, next);
                *next += 1;
                name
            }
        }
    }

    /// Fresh name absent from `taken`, which then records it
    pub fn unique_name(&mut self, taken: &mut FxHashSet<String>) -> Result<String> {
        let mut last = String::new();
        for _ in 0..MAX_NAME_ATTEMPTS {
            let candidate = self.fresh_name();
            if !taken.contains(&candidate) {
                taken.insert(candidate.clone());
                return Ok(candidate);
            }
            last = candidate;
        }
        Err(ObfuscationError::NameCollision {
            generated: last,
            existing: "an identifier already in the source".to_string(),
        })
    }

    /// Uniform index in `0..len`; `len` must be non-zero
    pub fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len.max(1))
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Independent child source; the parent advances by one draw
    pub fn fork(&mut self) -> Self {
        let seed: u64 = self.rng.gen();
        let style = match &self.style {
            NameStyle::Sequential { prefix, .. } => NameStyle::Sequential {
                prefix: prefix.clone(),
                next: 0,
            },
            other => other.clone(),
        };
        Self {
            rng: StdRng::seed_from_u64(seed),
            style,
        }
    }
}

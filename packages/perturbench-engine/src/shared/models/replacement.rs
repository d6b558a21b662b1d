//! Span replacements over one immutable source buffer
//!
//! A pass computes every rewrite against the original text as a
//! `(start, end, text)` triple, validates that no two of them overlap, and
//! splices them from the highest offset downward so that offsets of the
//! not-yet-applied replacements stay valid.

use super::span::ByteSpan;
use crate::errors::{ObfuscationError, Result};

/// A byte-range rewrite instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub span: ByteSpan,
    pub text: String,
}

impl Replacement {
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            span: ByteSpan::new(start, end),
            text: text.into(),
        }
    }

    /// Zero-width insertion at `at`
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::new(at, at, text)
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    /// Signed change in buffer length once applied
    pub fn len_delta(&self) -> isize {
        self.text.len() as isize - self.span.len() as isize
    }
}

/// Ordered collection of replacements for one pass
#[derive(Debug, Clone, Default)]
pub struct ReplacementSet {
    items: Vec<Replacement>,
}

impl ReplacementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, replacement: Replacement) {
        self.items.push(replacement);
    }

    pub fn replace(&mut self, start: usize, end: usize, text: impl Into<String>) {
        self.push(Replacement::new(start, end, text));
    }

    pub fn insert(&mut self, at: usize, text: impl Into<String>) {
        self.push(Replacement::insert(at, text));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Replacement> {
        self.items.iter()
    }

    /// Net change in buffer length once every replacement is applied
    pub fn len_delta(&self) -> isize {
        self.items.iter().map(Replacement::len_delta).sum()
    }

    /// Check bounds, char boundaries and pairwise disjointness
    ///
    /// Zero-width insertions may touch the boundary of another span but
    /// never fall strictly inside it.
    pub fn validate(&self, source: &str) -> Result<()> {
        let len = source.len();
        for r in &self.items {
            if r.start() > r.end()
                || r.end() > len
                || !source.is_char_boundary(r.start())
                || !source.is_char_boundary(r.end())
            {
                return Err(ObfuscationError::InvalidSpan {
                    start: r.start(),
                    end: r.end(),
                    len,
                });
            }
        }

        let mut sorted: Vec<&Replacement> = self.items.iter().collect();
        sorted.sort_by_key(|r| (r.start(), r.end()));

        let mut widest: Option<&Replacement> = None;
        for r in sorted {
            if let Some(prev) = widest {
                if r.start() < prev.end() && !(r.span.is_empty() && r.start() == prev.start()) {
                    return Err(ObfuscationError::OverlappingSpan {
                        first: (prev.start(), prev.end()),
                        second: (r.start(), r.end()),
                    });
                }
                if r.start() == prev.start()
                    && !prev.span.is_empty()
                    && !r.span.is_empty()
                {
                    return Err(ObfuscationError::OverlappingSpan {
                        first: (prev.start(), prev.end()),
                        second: (r.start(), r.end()),
                    });
                }
            }
            if widest.map_or(true, |w| r.end() >= w.end()) {
                widest = Some(r);
            }
        }
        Ok(())
    }

    /// Validate, then splice every replacement into a copy of `source`
    ///
    /// Application runs in descending `(start, end, insertion index)` order,
    /// so insertions sharing a position appear in the order they were pushed
    /// and an insertion at the start of a wider span lands before it.
    pub fn apply(&self, source: &str) -> Result<String> {
        self.validate(source)?;

        let mut order: Vec<usize> = (0..self.items.len()).collect();
        order.sort_by(|&a, &b| {
            let (ra, rb) = (&self.items[a], &self.items[b]);
            (rb.start(), rb.end(), b).cmp(&(ra.start(), ra.end(), a))
        });

        let mut output = source.to_string();
        for idx in order {
            let r = &self.items[idx];
            output.replace_range(r.start()..r.end(), &r.text);
        }
        Ok(output)
    }
}

impl FromIterator<Replacement> for ReplacementSet {
    fn from_iter<I: IntoIterator<Item = Replacement>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

//! Byte-range locations in a source buffer

use serde::{Deserialize, Serialize};

/// Half-open byte range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ByteSpan {
    pub start: usize,
    pub end: usize,
}

impl ByteSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span covered by a tree-sitter node
    pub fn of(node: &tree_sitter::Node) -> Self {
        Self::new(node.start_byte(), node.end_byte())
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether `offset` falls strictly inside the span
    pub fn strictly_contains(&self, offset: usize) -> bool {
        self.start < offset && offset < self.end
    }

    pub fn contains_span(&self, other: &ByteSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_containment() {
        let outer = ByteSpan::new(2, 10);
        assert!(outer.contains_span(&ByteSpan::new(2, 10)));
        assert!(outer.contains_span(&ByteSpan::new(4, 6)));
        assert!(!outer.contains_span(&ByteSpan::new(1, 6)));
        assert!(outer.strictly_contains(3));
        assert!(!outer.strictly_contains(2));
        assert!(!outer.strictly_contains(10));
        assert_eq!(outer.len(), 8);
        assert!(ByteSpan::new(5, 5).is_empty());
    }
}

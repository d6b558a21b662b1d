//! Textual similarity between a sample and its variants
//!
//! Both metrics work on character q-gram shingles. With `q = 1` the cosine
//! metric is the plain character-frequency cosine.
//!
//! Returns values in [0.0, 1.0]; two empty inputs are identical.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMetric {
    /// Cosine over shingle term-frequency vectors
    #[default]
    Cosine,
    /// Jaccard over shingle sets
    Jaccard,
}

/// Overlapping character windows of `size`; shorter text is one shingle
pub fn shingles(text: &str, size: usize) -> Vec<&str> {
    let size = size.max(1);
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let chars = bounds.len() - 1;
    if chars == 0 {
        return Vec::new();
    }
    if chars <= size {
        return vec![text];
    }
    (0..=chars - size)
        .map(|i| &text[bounds[i]..bounds[i + size]])
        .collect()
}

/// J(A, B) = |A ∩ B| / |A ∪ B|
pub fn jaccard_similarity(a: &[&str], b: &[&str]) -> f64 {
    let set_a: FxHashSet<&str> = a.iter().copied().collect();
    let set_b: FxHashSet<&str> = b.iter().copied().collect();
    if set_a.is_empty() && set_b.is_empty() {
        return 1.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    intersection as f64 / union as f64
}

/// cos(A, B) over term frequencies
pub fn cosine_similarity(a: &[&str], b: &[&str]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let mut tf: FxHashMap<&str, (f64, f64)> = FxHashMap::default();
    for &s in a {
        tf.entry(s).or_default().0 += 1.0;
    }
    for &s in b {
        tf.entry(s).or_default().1 += 1.0;
    }

    let (dot, norm_a, norm_b) = tf
        .values()
        .fold((0.0, 0.0, 0.0), |(dot, na, nb), (x, y)| {
            (dot + x * y, na + x * x, nb + y * y)
        });
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b).sqrt()).clamp(0.0, 1.0)
}

/// Normalized distance `1 - similarity`, in [0.0, 1.0]
pub fn text_distance(a: &str, b: &str, metric: SimilarityMetric, shingle_size: usize) -> f64 {
    if a == b {
        return 0.0;
    }
    let sa = shingles(a, shingle_size);
    let sb = shingles(b, shingle_size);
    let similarity = match metric {
        SimilarityMetric::Cosine => cosine_similarity(&sa, &sb),
        SimilarityMetric::Jaccard => jaccard_similarity(&sa, &sb),
    };
    // Rounding in the cosine norms can leave equal shingle bags a hair below 1.0
    if similarity > 1.0 - 4.0 * f64::EPSILON {
        return 0.0;
    }
    (1.0 - similarity).clamp(0.0, 1.0)
}

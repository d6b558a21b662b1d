pub mod similarity;

pub use similarity::{
    cosine_similarity, jaccard_similarity, shingles, text_distance, SimilarityMetric,
};

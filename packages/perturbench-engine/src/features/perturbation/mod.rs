//! Perturbation Feature
//!
//! Distance-ranked families of renamed variants for one sample.
//!
//! ## Structure
//! - `domain/` - shingle similarity metrics
//! - `application/` - PerturbationDriver

pub mod application;
pub mod domain;

pub use application::{PerturbationDriver, PerturbationRecord};
pub use domain::{text_distance, SimilarityMetric};

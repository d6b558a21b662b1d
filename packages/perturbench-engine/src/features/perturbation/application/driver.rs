//! Perturbation sweep
//!
//! Level-1 renaming at budgets `0, 1, ..., noise_max - 1`, each variant
//! scored against the untouched sample. Records come out in budget order;
//! distance is not guaranteed to grow with the budget.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::Result;
use crate::features::perturbation::domain::{text_distance, SimilarityMetric};
use crate::features::renaming::IdentifierRenamer;
use crate::shared::models::SourceUnit;
use crate::shared::Entropy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerturbationRecord {
    pub budget: usize,
    pub variant: String,
    pub distance: f64,
}

#[derive(Debug, Clone)]
pub struct PerturbationDriver {
    renamer: IdentifierRenamer,
    metric: SimilarityMetric,
    shingle_size: usize,
}

impl Default for PerturbationDriver {
    fn default() -> Self {
        Self {
            renamer: IdentifierRenamer::new(),
            metric: SimilarityMetric::Cosine,
            shingle_size: 1,
        }
    }
}

impl PerturbationDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metric(mut self, metric: SimilarityMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_shingle_size(mut self, size: usize) -> Self {
        self.shingle_size = size.max(1);
        self
    }

    pub fn with_renamer(mut self, renamer: IdentifierRenamer) -> Self {
        self.renamer = renamer;
        self
    }

    /// `min(max_pert, renamable)`
    pub fn noise_max(&self, unit: &SourceUnit, max_pert: usize) -> Result<usize> {
        Ok(max_pert.min(self.renamer.count_renamable(unit)?))
    }

    pub fn sweep(
        &self,
        unit: &SourceUnit,
        max_pert: usize,
        entropy: &mut Entropy,
    ) -> Result<Vec<PerturbationRecord>> {
        let noise_max = self.noise_max(unit, max_pert)?;
        let mut records = Vec::with_capacity(noise_max);

        for budget in 0..noise_max {
            let outcome = self.renamer.rename(unit, Some(budget), entropy)?;
            let distance = text_distance(unit.code(), &outcome.code, self.metric, self.shingle_size);
            records.push(PerturbationRecord {
                budget,
                variant: outcome.code,
                distance,
            });
        }

        debug!(
            language = %unit.language(),
            max_pert,
            noise_max,
            "perturbation sweep done"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::LanguageId;

    #[test]
    fn test_sweep_is_clamped_to_renamable_names() {
        let unit = SourceUnit::new(
            "def f(a, b):\n    c = a + b\n    d = c * 2\n    return d\n",
            LanguageId::Python,
        );
        let records = PerturbationDriver::new()
            .sweep(&unit, 5, &mut Entropy::seeded(3))
            .unwrap();
        assert_eq!(records.len(), 4);
        for (i, r) in records.iter().enumerate() {
            assert_eq!(r.budget, i);
            assert!((0.0..=1.0).contains(&r.distance));
        }
        assert_eq!(records[0].variant, unit.code());
        assert_eq!(records[0].distance, 0.0);
        assert!(records[3].distance > 0.0);
    }

    #[test]
    fn test_small_max_pert_bounds_the_sweep() {
        let unit = SourceUnit::new("int f(int a, int b) { return a + b; }", LanguageId::C);
        let records = PerturbationDriver::new()
            .with_metric(SimilarityMetric::Jaccard)
            .with_shingle_size(3)
            .sweep(&unit, 1, &mut Entropy::seeded(0))
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].variant, unit.code());
    }

    #[test]
    fn test_nothing_renamable_gives_empty_sweep() {
        let unit = SourceUnit::new("print(len([]))\n", LanguageId::Python);
        let driver = PerturbationDriver::new();
        assert_eq!(driver.noise_max(&unit, 5).unwrap(), 0);
        assert!(driver.sweep(&unit, 5, &mut Entropy::seeded(0)).unwrap().is_empty());
    }
}

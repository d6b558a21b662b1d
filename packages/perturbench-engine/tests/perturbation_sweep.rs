//! Perturbation sweep and rename-budget properties

mod common;

use common::*;
use perturbench_engine::features::renaming::IdentifierRenamer;
use perturbench_engine::{Entropy, LanguageId, PerturbationDriver, SimilarityMetric, SourceUnit};

#[test]
fn test_zero_budget_is_identity() {
    let renamer = IdentifierRenamer::new();
    for unit in all_samples() {
        let outcome = renamer.rename(&unit, Some(0), &mut Entropy::seeded(1)).unwrap();
        assert_eq!(outcome.code, unit.code(), "{}", unit.language());
        assert!(outcome.mapping.is_empty());
    }
}

#[test]
fn test_renamed_count_is_min_of_budget_and_renamable() {
    let renamer = IdentifierRenamer::new();
    for unit in all_samples() {
        let available = renamer.count_renamable(&unit).unwrap();
        assert!(available > 0, "{}", unit.language());
        for budget in [1, 2, available, available + 3] {
            let outcome = renamer
                .rename(&unit, Some(budget), &mut Entropy::seeded(budget as u64))
                .unwrap();
            assert_eq!(outcome.mapping.len(), budget.min(available));

            let mut generated: Vec<&str> = outcome.mapping.iter().map(|(_, g)| g).collect();
            generated.sort_unstable();
            generated.dedup();
            assert_eq!(generated.len(), outcome.mapping.len());
        }
    }
}

#[test]
fn test_sweep_with_four_identifiers_is_clamped() {
    let unit = SourceUnit::new(fixture_n_locals(4), LanguageId::Python);
    let records = PerturbationDriver::new()
        .sweep(&unit, 5, &mut Entropy::seeded(8))
        .unwrap();

    assert_eq!(records.len(), 4);
    let budgets: Vec<usize> = records.iter().map(|r| r.budget).collect();
    assert_eq!(budgets, vec![0, 1, 2, 3]);
    assert!(records.iter().all(|r| (0.0..=1.0).contains(&r.distance)));
}

#[test]
fn test_sweep_bounded_by_max_pert() {
    let unit = SourceUnit::new(fixture_n_locals(12), LanguageId::Python);
    let records = PerturbationDriver::new()
        .with_metric(SimilarityMetric::Jaccard)
        .with_shingle_size(3)
        .sweep(&unit, 6, &mut Entropy::seeded(8))
        .unwrap();
    assert_eq!(records.len(), 6);
    assert_eq!(records[0].distance, 0.0);
    assert!(records[5].distance > 0.0);
}

#[test]
fn test_records_serialize_for_downstream_tools() {
    let unit = SourceUnit::new(C_SAMPLE, LanguageId::C);
    let records = PerturbationDriver::new()
        .sweep(&unit, 2, &mut Entropy::seeded(5))
        .unwrap();
    let json = serde_json::to_value(&records).unwrap();
    assert_eq!(json[0]["budget"], 0);
    assert!(json[1]["variant"].as_str().unwrap().contains("int main(void)"));
}

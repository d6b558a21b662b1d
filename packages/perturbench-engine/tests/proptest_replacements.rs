//! Property tests for span replacement
//!
//! - Length: output length = input length + sum of per-span deltas
//! - Splicing: descending application equals a left-to-right rebuild
//! - Overlap: intersecting spans are rejected before anything is applied

use perturbench_engine::errors::ObfuscationError;
use perturbench_engine::shared::{Replacement, ReplacementSet};
use proptest::prelude::*;

fn source_and_spans() -> impl Strategy<Value = (String, Vec<(usize, usize, String)>)> {
    "[a-z =+;\n]{0,80}"
        .prop_flat_map(|source| {
            let len = source.len();
            let cuts = proptest::collection::btree_set(0..=len, 0..(len + 1).min(10));
            let texts = proptest::collection::vec("[A-Za-z_]{0,6}", 5);
            (Just(source), cuts, texts)
        })
        .prop_map(|(source, cuts, texts)| {
            let cuts: Vec<usize> = cuts.into_iter().collect();
            let spans = cuts
                .chunks(2)
                .zip(texts)
                .filter_map(|(pair, text)| match pair {
                    [start, end] => Some((*start, *end, text)),
                    [at] => Some((*at, *at, text)),
                    _ => None,
                })
                .collect();
            (source, spans)
        })
}

fn rebuild(source: &str, spans: &[(usize, usize, String)]) -> String {
    let mut out = String::new();
    let mut cursor = 0;
    for (start, end, text) in spans {
        out.push_str(&source[cursor..*start]);
        out.push_str(text);
        cursor = *end;
    }
    out.push_str(&source[cursor..]);
    out
}

proptest! {
    #[test]
    fn prop_length_matches_deltas((source, spans) in source_and_spans()) {
        let set: ReplacementSet = spans
            .iter()
            .rev()
            .map(|(s, e, t)| Replacement::new(*s, *e, t.clone()))
            .collect();
        let output = set.apply(&source).unwrap();
        prop_assert_eq!(output.len() as isize, source.len() as isize + set.len_delta());
        prop_assert_eq!(output, rebuild(&source, &spans));
    }

    #[test]
    fn prop_overlap_rejected(
        source in "[a-z]{3,40}",
        a in 0usize..40,
        b in 0usize..40,
        m in 0usize..40,
    ) {
        let len = source.len();
        let start = a % (len - 1);
        let end = start + 1 + b % (len - start);
        let mid = start + m % (end - start);

        let set: ReplacementSet = vec![
            Replacement::new(start, end, "X"),
            Replacement::new(mid, mid + 1, "Y"),
        ]
        .into_iter()
        .collect();
        let overlapping = matches!(
            set.apply(&source),
            Err(ObfuscationError::OverlappingSpan { .. })
        );
        prop_assert!(overlapping);
    }
}

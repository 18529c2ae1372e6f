//! Property tests: condensation is idempotent and monotone in the threshold.

use kolmo_condenser::{CondenseStrategy, Condenser};
use proptest::prelude::*;
use proptest::string::string_regex;

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

/// A corpus drawn from a small vocabulary, so duplicates and case or
/// spacing variants are common.
fn arb_corpus() -> impl Strategy<Value = Vec<String>> {
    let phrase = prop_oneof![
        Just("the quick brown fox jumps"),
        Just("The  quick brown fox JUMPS"),
        Just("lorem ipsum dolor sit amet"),
        Just("lorem ipsum dolor sit amet, consectetur"),
        Just("AAAA"),
        Just("   "),
        Just("ownership and borrowing rules"),
    ];
    prop::collection::vec(phrase.prop_map(String::from), 0..24)
}

/// One base text and a variant sharing a random-length prefix with it,
/// drawn from `letters` only.
fn arb_pair(letters: &'static str) -> impl Strategy<Value = (String, String)> {
    let base = string_regex(&format!("[{letters} ]{{8,40}}")).unwrap();
    let tail = string_regex(&format!("[{letters} ]{{0,12}}")).unwrap();
    (base, tail, 0.0f64..=1.0).prop_map(|(base, tail, keep)| {
        let cut = (base.chars().count() as f64 * keep) as usize;
        let variant: String = base.chars().take(cut).chain(tail.chars()).collect();
        (base, variant)
    })
}

/// Partially overlapping pairs. Pairs use disjoint alphabets, so no
/// shingle is shared across pairs.
fn arb_overlap_corpus() -> impl Strategy<Value = Vec<String>> {
    (
        arb_pair("abc"),
        arb_pair("def"),
        arb_pair("ghi"),
        arb_pair("jkl"),
    )
        .prop_map(|(a, b, c, d)| [a, b, c, d].into_iter().flat_map(|(x, y)| [x, y]).collect())
}

fn near_count(strategy: CondenseStrategy, corpus: &[String]) -> usize {
    Condenser::new(strategy)
        .unwrap()
        .condense(corpus.to_vec())
        .near_count()
}

fn kept_texts(strategy: &CondenseStrategy, corpus: Vec<String>) -> Vec<String> {
    Condenser::new(strategy.clone())
        .unwrap()
        .condense(corpus)
        .kept_items()
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Condensing an already condensed corpus changes nothing.
    #[test]
    fn condensation_is_idempotent(corpus in arb_corpus()) {
        for strategy in [CondenseStrategy::stream(), CondenseStrategy::lessons()] {
            let once = kept_texts(&strategy, corpus.clone());
            let twice = kept_texts(&strategy, once.clone());
            prop_assert_eq!(once, twice);
        }
    }

    /// Raising the threshold never increases the near-duplicate count.
    #[test]
    fn near_duplicates_monotone_in_threshold(
        corpus in arb_corpus(),
        low in 0.0f64..=1.0,
        high in 0.0f64..=1.0,
    ) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        for strategy in [CondenseStrategy::stream(), CondenseStrategy::lessons()] {
            prop_assert!(
                near_count(strategy.clone().with_threshold(high), &corpus)
                    <= near_count(strategy.with_threshold(low), &corpus)
            );
        }
    }

    /// Same property over texts with partial shingle overlap, where the
    /// threshold decides the outcome.
    #[test]
    fn partial_overlap_near_duplicates_monotone_in_threshold(
        corpus in arb_overlap_corpus(),
        low in 0.0f64..=1.0,
        high in 0.0f64..=1.0,
    ) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        for strategy in [CondenseStrategy::stream(), CondenseStrategy::lessons()] {
            prop_assert!(
                near_count(strategy.clone().with_threshold(high), &corpus)
                    <= near_count(strategy.with_threshold(low), &corpus)
            );
        }
    }

    /// Every input is kept, archived, or dropped exactly once.
    #[test]
    fn outcome_partitions_input(corpus in arb_corpus()) {
        let n = corpus.len();
        let outcome = Condenser::new(CondenseStrategy::lessons()).unwrap().condense(corpus);
        prop_assert_eq!(outcome.kept.len() + outcome.archived.len() + outcome.dropped, n);
        let kept: Vec<usize> = outcome.kept.iter().map(|k| k.index).collect();
        for archived in &outcome.archived {
            prop_assert!(kept.contains(&archived.into));
        }
    }

    /// The same input always produces the same partition.
    #[test]
    fn condensation_is_deterministic(corpus in arb_corpus()) {
        let strategy = CondenseStrategy::stream();
        prop_assert_eq!(kept_texts(&strategy, corpus.clone()), kept_texts(&strategy, corpus));
    }
}

// ---------------------------------------------------------------------------
// Threshold Sensitivity
// ---------------------------------------------------------------------------

#[test]
fn global_threshold_changes_near_count() {
    let corpus: Vec<String> = [
        "the quick brown fox jumps over the lazy dog",
        "the quick brown fox jumps over the lazy cat",
        "the quick brown fox",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    // Jaccard to the first text: 33/39 for the second, 12/36 for the third.
    let counts: Vec<usize> = [0.3, 0.5, 0.9]
        .iter()
        .map(|&t| near_count(CondenseStrategy::lessons().with_threshold(t), &corpus))
        .collect();
    assert_eq!(counts, vec![2, 1, 0]);

    // Digest buckets never compare texts that differ after normalization.
    assert_eq!(near_count(CondenseStrategy::stream().with_threshold(0.0), &corpus), 0);
}

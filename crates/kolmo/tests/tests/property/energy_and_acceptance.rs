//! Property tests: energy ordering and the Metropolis acceptance bound.

use kolmo_annealer::{
    acceptance_probability, metropolis_accept, temperature_at, Baseline, EnergyEvaluator,
    EnergyWeights, FailingOracle, SizeEstimator, MIN_TEMPERATURE,
};
use proptest::prelude::*;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Size is the text length, so tests control it directly.
struct LengthEstimator;

impl SizeEstimator for LengthEstimator {
    fn compressed_size(&self, text: &str) -> usize {
        text.len()
    }
}

fn empty_baseline() -> Baseline {
    Baseline {
        outputs: vec![],
        vectors: vec![],
    }
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// With equal similarity and entropy, the smaller compressed size scores lower.
    #[test]
    fn smaller_size_scores_lower(
        a in "[a-z]{1,60}",
        b in "[a-z]{1,60}",
        output in "[a-z ]{0,40}",
    ) {
        prop_assume!(a.len() != b.len());
        let eval = EnergyEvaluator::new(Arc::new(FailingOracle))
            .with_estimator(Arc::new(LengthEstimator));
        let outputs = [Some(output)];
        let ca = eval.score_outputs(&a, &outputs, &empty_baseline());
        let cb = eval.score_outputs(&b, &outputs, &empty_baseline());
        prop_assert_eq!(ca.similarity, cb.similarity);
        prop_assert_eq!(ca.entropy, cb.entropy);
        prop_assert_eq!(a.len() < b.len(), ca.score < cb.score);
    }

    /// Reordering output lines leaves the score bit-identical.
    #[test]
    fn score_ignores_output_line_order(
        lines in prop::collection::vec("[a-e]{1,3}( [a-e]{1,3}){0,6}", 1..8),
    ) {
        let eval = EnergyEvaluator::new(Arc::new(FailingOracle));
        let forward = [Some(lines.join("\n"))];
        let mut reversed_lines = lines.clone();
        reversed_lines.reverse();
        let reversed = [Some(reversed_lines.join("\n"))];
        let a = eval.score_outputs("prompt", &forward, &empty_baseline());
        let b = eval.score_outputs("prompt", &reversed, &empty_baseline());
        prop_assert_eq!(a.entropy.to_bits(), b.entropy.to_bits());
        prop_assert_eq!(a.score.to_bits(), b.score.to_bits());
    }

    /// The energy is linear in each weighted term.
    #[test]
    fn energy_matches_weighted_sum(
        size in 0usize..10_000,
        tokens in 0usize..500,
        entropy in 0.0f64..12.0,
        similarity in -1.0f64..=1.0,
        decay in 0.0f64..50.0,
    ) {
        let w = EnergyWeights {
            size: 1.0,
            tokens: 2.0,
            entropy: 100.0,
            similarity: 1000.0,
            decay: 3.0,
        };
        let expected = size as f64 + 2.0 * tokens as f64 + 100.0 * entropy
            - 1000.0 * similarity
            + 3.0 * decay;
        let actual = w.energy(size, tokens, entropy, similarity, decay);
        prop_assert!((actual - expected).abs() < 1e-6);
    }

    /// acceptance_probability equals min(1, exp(-delta / t)).
    #[test]
    fn acceptance_is_clamped_exponential(delta in -1e3f64..1e3, t in MIN_TEMPERATURE..10.0) {
        let p = acceptance_probability(delta, t);
        prop_assert!((0.0..=1.0).contains(&p));
        prop_assert!((p - (-delta / t).exp().min(1.0)).abs() < 1e-12);
    }

    /// For a worsening move, cooling never raises the acceptance probability.
    #[test]
    fn acceptance_falls_as_temperature_falls(
        delta in 0.0f64..100.0,
        t1 in MIN_TEMPERATURE..5.0,
        t2 in MIN_TEMPERATURE..5.0,
    ) {
        let (cold, hot) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        prop_assert!(acceptance_probability(delta, cold) <= acceptance_probability(delta, hot));
    }

    /// A zero delta is accepted whatever the draw.
    #[test]
    fn zero_delta_always_accepted(t in MIN_TEMPERATURE..10.0, draw in 0.0f64..1.0) {
        prop_assert!(metropolis_accept(0.0, t, draw));
    }

    /// The schedule never leaves [MIN_TEMPERATURE, t0] and never heats up.
    #[test]
    fn schedule_is_bounded_and_non_increasing(
        iterations in 1usize..500,
        t0 in MIN_TEMPERATURE..10.0,
    ) {
        let mut previous = f64::INFINITY;
        for step in 0..iterations {
            let t = temperature_at(step, iterations, t0);
            prop_assert!(t >= MIN_TEMPERATURE && t <= t0);
            prop_assert!(t <= previous);
            previous = t;
        }
    }
}

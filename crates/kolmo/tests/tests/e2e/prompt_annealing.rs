//! End-to-end test: reduction pre-pass -> baseline capture -> annealing -> persisted artifact.

use kolmo_annealer::{
    classical_reduce, AnnealConfig, AnnealError, AnnealingScheduler, EnergyEvaluator,
    FailingOracle, SimulatedOracle,
};
use kolmo_tests::SAMPLE_PROMPT;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn samples() -> Vec<String> {
    vec!["refund request".into(), "invoice question".into()]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn zero_iterations_returns_baseline_as_best() {
    let evaluator = EnergyEvaluator::new(Arc::new(SimulatedOracle::echo()));
    let mut scheduler =
        AnnealingScheduler::new(evaluator, AnnealConfig::default().with_iterations(0)).unwrap();

    let report = scheduler.run(SAMPLE_PROMPT, &samples()).await.unwrap();
    assert_eq!(report.baseline, report.best);
    assert_eq!(report.best.text, SAMPLE_PROMPT);
    assert!(report.improvements.is_empty());
}

#[tokio::test]
async fn reduced_prompt_anneals_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("prompt.annealed.txt");

    let reduced = classical_reduce(SAMPLE_PROMPT);
    assert!(reduced.starts_with("#VBH: support-agent v2\nCONFIRM:"));
    assert!(!reduced.contains("\n\n\n"));

    let oracle = Arc::new(SimulatedOracle::fixed("policy answer"));
    let evaluator = EnergyEvaluator::new(oracle.clone());
    let config = AnnealConfig::default()
        .with_iterations(50)
        .with_seed(11)
        .with_artifact_path(&artifact);
    let mut scheduler = AnnealingScheduler::new(evaluator, config).unwrap();

    let report = scheduler.run(&reduced, &samples()).await.unwrap();
    assert!(report.best.score < report.baseline.score);
    assert_eq!(std::fs::read_to_string(&artifact).unwrap(), report.best.text);
    assert_eq!(oracle.calls(), samples().len() * (2 + 50));
}

#[tokio::test]
async fn failing_oracle_aborts_before_iterating() {
    let evaluator = EnergyEvaluator::new(Arc::new(FailingOracle));
    let mut scheduler = AnnealingScheduler::new(evaluator, AnnealConfig::default()).unwrap();
    assert!(matches!(
        scheduler.run(SAMPLE_PROMPT, &samples()).await,
        Err(AnnealError::NoBaselineOutput)
    ));
}

#[tokio::test]
async fn same_seed_same_result() {
    let run = |seed| async move {
        let evaluator = EnergyEvaluator::new(Arc::new(SimulatedOracle::echo()));
        let config = AnnealConfig::default().with_iterations(25).with_seed(seed);
        AnnealingScheduler::new(evaluator, config)
            .unwrap()
            .run(SAMPLE_PROMPT, &samples())
            .await
            .unwrap()
    };
    let a = run(5).await;
    let b = run(5).await;
    assert_eq!(a.best, b.best);
    assert_eq!(a.accepted, b.accepted);
}

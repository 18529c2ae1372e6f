//! `kolmo anneal`

use clap::Args;
use kolmo_annealer::{classical_reduce, AnnealingScheduler, CommandOracle, EnergyEvaluator};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::KolmoConfig;
use crate::error::CliResult;
use crate::output::{print_field, print_info, print_success, print_warning};

#[derive(Args, Debug)]
pub struct AnnealArgs {
    /// Prompt file to shrink
    pub prompt: PathBuf,

    /// Shell command that reads a sample on stdin and the prompt from the override variable
    #[arg(long)]
    pub cmd: String,

    /// Sample input file (repeatable)
    #[arg(short = 'i', long = "input")]
    pub inputs: Vec<PathBuf>,

    /// Number of annealing steps
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Initial temperature
    #[arg(long)]
    pub temperature: Option<f64>,

    /// RNG seed for a replayable run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where to write the best prompt (defaults to <stem>.annealed.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Apply the deterministic reduction before annealing
    #[arg(long)]
    pub reduce: bool,
}

pub async fn execute(args: AnnealArgs, config: &KolmoConfig) -> CliResult<()> {
    let mut baseline = tokio::fs::read_to_string(&args.prompt).await?;
    if args.reduce {
        baseline = classical_reduce(&baseline);
    }

    let mut samples = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        samples.push(tokio::fs::read_to_string(input).await?);
    }

    let settings = &config.anneal;
    let mut oracle =
        CommandOracle::shell(args.cmd.as_str()).with_override_var(settings.override_var.as_str());
    if let Some(timeout) = settings.timeout() {
        oracle = oracle.with_timeout(timeout);
    }
    let evaluator = EnergyEvaluator::new(Arc::new(oracle)).with_weights(settings.weights.clone());

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| annealed_path(&args.prompt));
    let mut anneal_config = settings.anneal_config().with_artifact_path(&output);
    if let Some(iterations) = args.iterations {
        anneal_config = anneal_config.with_iterations(iterations);
    }
    if let Some(temperature) = args.temperature {
        anneal_config = anneal_config.with_temperature(temperature);
    }
    if let Some(seed) = args.seed {
        anneal_config = anneal_config.with_seed(seed);
    }

    let mut scheduler = AnnealingScheduler::new(evaluator, anneal_config)?;
    let report = scheduler.run(&baseline, &samples).await?;

    print_info(&format!("baseline: {}", report.baseline));
    print_info(&format!("best:     {}", report.best));
    print_field("accepted", format!("{}/{}", report.accepted, report.steps));
    if report.improved() {
        print_success(&format!(
            "{} improvements, best written to {}",
            report.improvements.len(),
            output.display()
        ));
    } else {
        print_warning("no improvement over the baseline");
    }
    Ok(())
}

/// `dir/name.ext` -> `dir/name.annealed.ext`
fn annealed_path(prompt: &Path) -> PathBuf {
    let stem = prompt
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match prompt.extension() {
        Some(ext) => format!("{}.annealed.{}", stem, ext.to_string_lossy()),
        None => format!("{}.annealed", stem),
    };
    prompt.with_file_name(name)
}

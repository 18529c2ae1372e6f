//! `kolmo lessons`

use clap::Args;
use kolmo_condenser::compact_lessons;
use std::path::PathBuf;

use crate::config::KolmoConfig;
use crate::error::CliResult;
use crate::output::{print_field, print_success, print_warning};

#[derive(Args, Debug)]
pub struct LessonsArgs {
    /// Directory of lesson artifacts
    pub dir: PathBuf,

    /// Artifact file extension
    #[arg(long)]
    pub extension: Option<String>,

    /// Jaccard threshold for near duplicates
    #[arg(long)]
    pub threshold: Option<f64>,
}

pub fn execute(args: LessonsArgs, config: &KolmoConfig) -> CliResult<()> {
    let mut strategy = config.lessons.strategy();
    if let Some(threshold) = args.threshold {
        strategy = strategy.with_threshold(threshold);
    }
    let extension = args
        .extension
        .as_deref()
        .unwrap_or(&config.lessons.extension)
        .trim_start_matches('.');

    let report = compact_lessons(&args.dir, extension, &strategy)?;
    if report.merged.is_empty() {
        print_warning("no duplicate lessons found");
    }
    for entry in &report.merged {
        print_field(&entry.src, format!("merged into {}", entry.into));
    }
    print_success(&format!(
        "{} canonical, {} archived",
        report.canonical,
        report.merged.len()
    ));
    print_field("manifest", report.manifest.display());
    Ok(())
}

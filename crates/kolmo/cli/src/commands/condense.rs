//! `kolmo condense`

use clap::Args;
use kolmo_condenser::condense_packs;
use std::path::PathBuf;

use crate::config::KolmoConfig;
use crate::error::CliResult;
use crate::output::{print_field, print_success};

#[derive(Args, Debug)]
pub struct CondenseArgs {
    /// Directory holding one sub-directory per pack
    pub packs_dir: PathBuf,

    /// Jaccard threshold for near duplicates
    #[arg(long)]
    pub threshold: Option<f64>,
}

pub fn execute(args: CondenseArgs, config: &KolmoConfig) -> CliResult<()> {
    let mut strategy = config.condense.strategy();
    if let Some(threshold) = args.threshold {
        strategy = strategy.with_threshold(threshold);
    }

    let summary = condense_packs(&args.packs_dir, &strategy)?;
    for report in &summary.packs {
        print_field(
            &report.index.display().to_string(),
            format!(
                "kept={} archived={} (exact={} near={}) dropped={} malformed={}",
                report.kept,
                report.archived,
                report.exact,
                report.near,
                report.dropped,
                report.malformed
            ),
        );
    }
    print_success(&format!(
        "condensed {} packs: kept={} archived={}",
        summary.packs.len(),
        summary.total_kept,
        summary.total_archived
    ));
    Ok(())
}

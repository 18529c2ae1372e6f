//! `kolmo reduce`

use kolmo_annealer::{classical_reduce, ReductionReport};
use tokio::io::AsyncReadExt;

use crate::error::CliResult;

/// Reduced text on stdout, JSON report on stderr.
pub async fn execute() -> CliResult<()> {
    let mut input = String::new();
    tokio::io::stdin().read_to_string(&mut input).await?;

    let reduced = classical_reduce(&input);
    let report = ReductionReport::new(&input, &reduced);

    println!("{}", reduced);
    eprintln!("{}", serde_json::to_string(&report)?);
    Ok(())
}

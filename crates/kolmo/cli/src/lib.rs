#![deny(unsafe_code)]
//! kolmo CLI - command-line interface for the kolmo pipelines
//!
//! This CLI provides a terminal interface to:
//! - Split documents into overlapping JSONL chunks
//! - Condense chunk packs and compact lesson artifacts
//! - Anneal a prompt against an external command
//! - Run the deterministic reduction pre-pass

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

use commands::{anneal, chunk, condense, lessons, reduce};
pub use config::KolmoConfig;
pub use error::{CliError, CliResult};

/// kolmo CLI application
#[derive(Parser)]
#[command(name = "kolmo")]
#[command(about = "kolmo - prompt annealing and corpus condensation", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "KOLMO_CONFIG", global = true)]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Split a document into overlapping chunks and append them to a JSONL index
    Chunk(chunk::ChunkArgs),

    /// Condense every <packs_dir>/*/index.jsonl in place
    Condense(condense::CondenseArgs),

    /// Compact near-duplicate lesson artifacts
    Lessons(lessons::LessonsArgs),

    /// Shrink a prompt by simulated annealing
    Anneal(anneal::AnnealArgs),

    /// Reduce stdin deterministically; report on stderr
    Reduce,

    /// Show the effective configuration
    Config,
}

/// Run using the current process arguments.
pub async fn run() -> CliResult<()> {
    run_with_args(std::env::args_os()).await
}

/// Run using the provided argument iterator.
pub async fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    // Load config
    let config = KolmoConfig::load(cli.config.as_deref())?;

    // Initialize tracing
    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    init_tracing(&level, cli.json_logs || config.logging.json);

    // Execute command
    match cli.command {
        Commands::Chunk(args) => chunk::execute(args, &config),
        Commands::Condense(args) => condense::execute(args, &config),
        Commands::Lessons(args) => lessons::execute(args, &config),
        Commands::Anneal(args) => anneal::execute(args, &config).await,
        Commands::Reduce => reduce::execute().await,
        Commands::Config => output::print_json(&config),
    }
}

/// Logs go to stderr so stdout stays clean for `reduce`.
fn init_tracing(level: &str, json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| level.into());

    // A subscriber may already be installed when run twice in one process.
    let _ = if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
}

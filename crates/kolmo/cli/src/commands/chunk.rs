//! `kolmo chunk`

use clap::Args;
use kolmo_chunker::{ChunkParams, ChunkSplitter};
use kolmo_core::append_records;
use std::path::{Path, PathBuf};

use crate::config::KolmoConfig;
use crate::error::CliResult;
use crate::output::{print_field, print_success};

#[derive(Args, Debug)]
pub struct ChunkArgs {
    /// Document to split
    pub file: PathBuf,

    /// Pack the chunks belong to
    #[arg(long)]
    pub pack_id: String,

    /// Directory that `source` paths are relative to (defaults to the file's directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Window size in characters
    #[arg(long)]
    pub max_chars: Option<usize>,

    /// Characters shared by consecutive windows
    #[arg(long)]
    pub overlap: Option<usize>,

    /// JSONL index to append to
    #[arg(long)]
    pub out: PathBuf,
}

pub fn execute(args: ChunkArgs, config: &KolmoConfig) -> CliResult<()> {
    let defaults = config.chunking.params();
    let params = ChunkParams::new(
        args.max_chars.unwrap_or(defaults.max_chars),
        args.overlap.unwrap_or(defaults.overlap),
    );
    let splitter = ChunkSplitter::new(params)?;

    let root = match &args.root {
        Some(root) => root.clone(),
        None => args
            .file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };
    let records = splitter.split_file(&args.file, &root, &args.pack_id)?;
    append_records(&args.out, &records)?;

    print_success(&format!(
        "{} chunks from {}",
        records.len(),
        args.file.display()
    ));
    print_field("index", args.out.display());
    Ok(())
}

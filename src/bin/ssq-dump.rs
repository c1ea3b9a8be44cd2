//! ssq-dump - print the decoded contents of ssq chart files
//!
//! Each file is decoded on its own; a file that fails to decode is reported
//! and the rest of the batch still runs.

use anyhow::{Context, Result};
use clap::Parser;
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ssq-dump")]
#[command(about = "Hudson SSQ decoder")]
#[command(version)]
struct Cli {
    /// ssq files to decode
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Emit the decoded model as JSON instead of the text dump
    #[arg(long)]
    json: bool,

    /// Log each decoded chunk
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut failed = 0usize;
    for path in &cli.files {
        println!("{}", path.display());
        if let Err(e) = dump(path, cli.json) {
            eprintln!("error: {e:#}");
            failed += 1;
        }
        println!();
    }

    if failed > 0 {
        eprintln!("{failed} of {} files failed to decode", cli.files.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn dump(path: &Path, json: bool) -> Result<()> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file =
        ssq::decode(&bytes).with_context(|| format!("Failed to decode {}", path.display()))?;

    if json {
        let out = serde_json::to_string_pretty(&file).context("Failed to serialize")?;
        println!("{out}");
    } else {
        print!("{file}");
    }
    Ok(())
}

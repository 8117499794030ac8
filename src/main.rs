use anyhow::Result;
use clap::{Parser, Subcommand};
use statute_etl::{render_summary, Period, StatuteCopier};
use std::path::PathBuf;
use std::process::ExitCode;

const INPUT_ROOT: &str = "./data/state_laws";
const OUTPUT_ROOT: &str = "./data/json";

#[derive(Parser)]
#[command(name = "statute-etl")]
#[command(about = "Normalize per-jurisdiction statute JSONL for loading")]
struct Cli {
    /// Directory holding one subdirectory per jurisdiction
    #[arg(long, global = true, default_value = INPUT_ROOT)]
    input_root: PathBuf,

    /// Where output files are written
    #[arg(long, global = true, default_value = OUTPUT_ROOT)]
    output_dir: PathBuf,

    /// Hide the progress bar
    #[arg(long, global = true)]
    no_progress: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Copy every jurisdiction into a single statutes_<period>.jsonl
    Unified {
        /// Period to copy, e.g. 2023
        period: Period,
        /// Only process the first N jurisdictions (sorted by name)
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        limit: Option<u64>,
    },

    /// Write <jurisdiction>_<period>.jsonl per jurisdiction plus manifest_<period>.txt
    ByState {
        /// Period to copy, e.g. 2023
        period: Period,
    },
}

fn main() -> Result<ExitCode> {
    // Argument errors exit here, before any file I/O.
    let cli = Cli::parse();

    let copier = StatuteCopier::new()
        .input_root(&cli.input_root)
        .output_dir(&cli.output_dir)
        .progress(!cli.no_progress);

    let stats = match cli.command {
        Command::Unified { period, limit } => copier
            .limit(limit.map(|n| n as usize))
            .copy_unified(&period)?,
        Command::ByState { period } => copier.copy_by_jurisdiction(&period)?,
    };

    println!("{}", render_summary(&stats));

    if stats.is_complete() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

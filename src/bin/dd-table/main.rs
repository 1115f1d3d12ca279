//! dd-table - build and query double-dummy lookup tables
//!
//! Reads a corpus of `<deal>\t<tricks>` lines, encodes every record, and
//! writes the keys and values as one binary table:
//!
//! Usage:
//!   dd-table build <corpus.tsv> [-o table.ddt] [--parallel] [--skip-invalid]
//!   dd-table show <table.ddt> [-n 5]
//!   dd-table lookup <table.ddt> <deal>
//!   dd-table key <deal>
//!   dd-table value <tricks>

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dd_table::{
    encode_deal, load_file, save_file, verify_file, BuildConfig, FailurePolicy, LookupTable,
    ResultRow, TableBuilder, TableError,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "dd-table")]
#[command(about = "Build and query double-dummy lookup tables")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a table from a corpus file
    Build {
        /// Corpus file, one `<deal>\t<tricks>` record per line
        corpus: PathBuf,

        /// Output table (defaults to the corpus path with a .ddt extension)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        /// Encode records on all cores
        #[arg(short = 'p', long = "parallel")]
        parallel: bool,

        /// Lines per parallel chunk
        #[arg(long = "chunk-size", default_value_t = 1 << 16)]
        chunk_size: usize,

        /// Drop malformed records instead of aborting
        #[arg(long = "skip-invalid")]
        skip_invalid: bool,

        /// Records to print after reloading the saved table
        #[arg(short = 'n', long = "head", default_value_t = 5)]
        head: usize,
    },

    /// Print the first records of a table
    Show {
        table: PathBuf,

        #[arg(short = 'n', long = "head", default_value_t = 5)]
        head: usize,
    },

    /// Print the trick table stored for a deal
    Lookup { table: PathBuf, deal: String },

    /// Print the key for a deal
    Key { deal: String },

    /// Print the value for 20 comma-separated trick counts
    Value { tricks: String },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dd_table=info")),
        )
        .init();

    let args = Args::parse();

    match run(args.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match command {
        Command::Build {
            corpus,
            output,
            parallel,
            chunk_size,
            skip_invalid,
            head,
        } => {
            let policy = if skip_invalid {
                FailurePolicy::Skip
            } else {
                FailurePolicy::FailFast
            };
            let config = BuildConfig {
                policy,
                parallel,
                chunk_size,
            };
            let output = output.unwrap_or_else(|| corpus.with_extension("ddt"));
            build(&corpus, &output, config, head)?;
        }
        Command::Show { table, head } => {
            let table = load_file(&table)?;
            println!("{} records", table.len());
            print_head(&table, head);
        }
        Command::Lookup { table, deal } => {
            let table = load_file(&table)?;
            let key = encode_deal(&deal)?;
            match table.index().get(&key) {
                Some(value) => println!("{}", value.to_row()?),
                None => {
                    eprintln!("Deal not found: {key}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Key { deal } => {
            println!("{}", encode_deal(&deal)?);
        }
        Command::Value { tricks } => {
            let row: ResultRow = tricks.parse()?;
            println!("{}", row.value());
            println!("{row}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Build, save, then reload and check the saved table before showing its head
fn build(
    corpus: &Path,
    output: &Path,
    config: BuildConfig,
    head: usize,
) -> Result<(), TableError> {
    let (table, report) = TableBuilder::new(config).build_file(corpus)?;
    if report.skipped > 0 {
        eprintln!("Skipped {} malformed record(s)", report.skipped);
    }

    save_file(&table, output)?;
    let reloaded = verify_file(output, &table)?;
    info!(path = %output.display(), records = reloaded.len(), "table verified");

    print_head(&reloaded, head);
    Ok(())
}

fn print_head(table: &LookupTable, head: usize) {
    for (key, value) in table.iter().take(head) {
        let pbn = key
            .to_deal()
            .map(|d| d.to_pbn())
            .unwrap_or_else(|| "?".to_string());
        println!("{key} {value}  {pbn}");
    }
}

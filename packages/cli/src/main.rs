#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Transcript credit audit from the command line.
//!
//! ```text
//! credit_audit transcript.pdf
//! credit_audit transcript.docx --format json
//! credit_audit transcript.pdf --export-dir out/
//! ```
//!
//! Logging goes through `pretty_env_logger` and honours `RUST_LOG`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use credit_audit_cli::{AuditOptions, audit_file, export, report};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "credit_audit",
    about = "Classify transcript courses into degree credit buckets"
)]
struct Cli {
    /// Transcript document (.docx or .pdf)
    file: PathBuf,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write one CSV file per non-empty course list into this directory
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Regex with named groups name, credit, grade for PDF course lines
    #[arg(long)]
    line_pattern: Option<String>,

    /// Log progress at info level unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let default_filter = if verbose { "info" } else { "error" };
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_owned());

    pretty_env_logger::formatted_builder()
        .parse_filters(&filters)
        .init();
}

fn run(cli: &Cli) -> Result<(), credit_audit_cli::AuditError> {
    let options = AuditOptions {
        line_pattern: cli.line_pattern.clone(),
    };
    let result = audit_file(&cli.file, &options)?;

    if result.is_empty() {
        println!("{}", report::NO_DATA_MESSAGE);
        return Ok(());
    }

    match cli.format {
        OutputFormat::Text => print!("{}", report::render_text(&result)),
        OutputFormat::Json => println!("{}", report::render_json(&result)?),
    }

    if let Some(dir) = &cli.export_dir {
        let written = export::export_all(&result, dir)?;
        eprintln!("Exported {} CSV file(s) to {}", written.len(), dir.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Audit of {} failed: {e}", cli.file.display());
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

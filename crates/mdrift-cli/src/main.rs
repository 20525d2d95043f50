#![forbid(unsafe_code)]

//! mdrift CLI
//!
//! Checks a markdown registry table against an authoritative listing
//! command and exits non-zero on drift:
//!
//! ```bash
//! mdrift --document README.md --scrub-env OPENREG_DEV_DEBUG -- openreg models -o porcelain
//! ```
//!
//! Exit code 0 means the counts match; 1 means they differ (a remediation
//! diagnostic is printed). Any other failure is an ordinary error.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use mdrift_core::{CommandListing, DEFAULT_ROW_PREFIX, Document, DriftReport, check};

const DEFAULT_HINT: &str = "regenerate the table and commit the result";

/// Markdown registry table drift checker
#[derive(Parser, Debug)]
#[command(name = "mdrift", version, about, long_about = None)]
struct Args {
    /// Markdown document containing the rendered registry table
    #[arg(short, long, default_value = "README.md", env = "MDRIFT_DOCUMENT")]
    document: PathBuf,

    /// Raw-HTML prefix that marks a documented table row
    #[arg(short, long, default_value = DEFAULT_ROW_PREFIX, env = "MDRIFT_PREFIX")]
    prefix: String,

    /// Environment variable hidden from the listing command
    #[arg(long, value_name = "NAME")]
    scrub_env: Option<String>,

    /// Remediation instruction printed when the counts drift
    #[arg(long, default_value = DEFAULT_HINT)]
    hint: String,

    /// Output format for the drift report
    #[arg(short, long, value_enum, default_value_t = Output::Human)]
    output: Output,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Listing command that prints one authoritative entry per line
    #[arg(last = true, required = true, value_name = "PROGRAM [ARGS]...")]
    listing: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Output {
    /// Silent on success, one diagnostic line on drift
    Human,
    /// Full report as a JSON object, match or drift
    Json,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("mdrift: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    if verbose {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
            .init();
    } else {
        tracing_subscriber::fmt::init();
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let document = Document::load(&args.document)
        .with_context(|| format!("cannot scan {}", args.document.display()))?;
    let source = listing_command(&args.listing, args.scrub_env.as_deref())?;
    let report = check(&document, &args.prefix, &source)?;

    match args.output {
        Output::Json => println!("{}", report_json(&report)),
        Output::Human if report.is_drifted() => {
            eprintln!("{}", drift_message(&report, &args.hint));
        }
        Output::Human => {}
    }

    if report.is_drifted() {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn listing_command(listing: &[String], scrub: Option<&str>) -> Result<CommandListing> {
    let Some((program, rest)) = listing.split_first() else {
        bail!("no listing command given (pass it after '--')");
    };
    let mut command = CommandListing::new(program).args(rest.iter().cloned());
    if let Some(name) = scrub {
        command = command.scrub_env(name);
    }
    Ok(command)
}

fn drift_message(report: &DriftReport, hint: &str) -> String {
    format!(
        "table drift: {} documented rows, listing reports {} (delta {:+}); {hint}",
        report.documented,
        report.reported,
        report.delta(),
    )
}

fn report_json(report: &DriftReport) -> serde_json::Value {
    serde_json::json!({
        "documented": report.documented,
        "reported": report.reported,
        "delta": report.delta(),
        "drifted": report.is_drifted(),
    })
}

// ============================================================================
// Tests
// ============================================================================

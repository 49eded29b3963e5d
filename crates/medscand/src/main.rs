//! Command line interface for the medscan affiliation scanner.
//!
//! Fetches PubMed papers for a query and writes a CSV report of per-paper
//! industry involvement: non-academic authors, company-flavored affiliations,
//! and the first contact email found on each record.
//!
//! # Usage
//!
//! ```bash
//! # Print the report for the ten best matches to stdout
//! medscan "engineered antibody"
//!
//! # Save fifty matches to a file, with debug logging
//! medscan "sglt2 inhibitor" --retmax 50 --file report.csv -vvv
//!
//! # Use an NCBI API key to raise the rate limits
//! medscan "crispr" --api-key "$NCBI_API_KEY"
//! ```
//!
//! Zero search hits is a normal outcome: a notice goes to stderr and the
//! process exits successfully without writing a report. Any failure prints a
//! single diagnostic line to stderr and exits non-zero, without a backtrace.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::PathBuf;

use clap::{builder::ArgAction, Parser};
use console::style;
use medscan::{
  classify::Classifier,
  client::PubmedClient,
  error::Result,
  pipeline::{scan, ScanOutcome},
  report,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Prefix for informational messages.
static INFO_PREFIX: &str = "ℹ ";
/// Prefix for error messages.
static ERROR_PREFIX: &str = "✗ ";

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Scan PubMed result sets for industry-affiliated authors")]
struct Cli {
  /// PubMed search query (full query syntax supported)
  query: String,

  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(short, long, action = ArgAction::Count, help = "Increase logging verbosity")]
  verbose: u8,

  /// Output CSV file path; the report goes to stdout when omitted
  #[arg(long, short)]
  file: Option<PathBuf>,

  /// Number of papers to fetch
  #[arg(long, default_value_t = 10)]
  retmax: usize,

  /// NCBI API key to raise rate limits
  #[arg(long)]
  api_key: Option<String>,
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Entry point: parse arguments, run the scan, report failures as one
/// diagnostic line.
#[tokio::main]
async fn main() {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  if let Err(e) = run(cli).await {
    eprintln!("{} {e}", style(ERROR_PREFIX).red());
    std::process::exit(1);
  }
}

/// Runs one scan end to end: search, fetch, extract, write.
async fn run(cli: Cli) -> Result<()> {
  let mut client = PubmedClient::new();
  if let Some(key) = cli.api_key {
    client = client.with_api_key(key);
  }

  debug!("scanning for query: {} (retmax {})", cli.query, cli.retmax);

  let classifier = Classifier::default();
  match scan(&client, &classifier, &cli.query, cli.retmax).await? {
    ScanOutcome::NoMatches => {
      eprintln!("{} No papers found for the query.", style(INFO_PREFIX).yellow());
      Ok(())
    },
    ScanOutcome::Papers(papers) => report::write_report(&papers, cli.file.as_deref()),
  }
}

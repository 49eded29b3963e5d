//! PubMed affiliation scanning and report generation library.
//!
//! `medscan` queries PubMed for papers matching a search term, classifies each
//! author's affiliations with keyword heuristics, and produces a tabular report
//! of the papers that involve industry (non-academic) authors. It provides:
//!
//! - A thin NCBI E-utilities client (ESearch + EFetch)
//! - Streaming extraction of bibliographic records from EFetch XML
//! - Keyword-based academic/company affiliation classification
//! - CSV report writing to a file or stdout
//!
//! # Getting Started
//!
//! ```no_run
//! use medscan::{
//!   classify::Classifier,
//!   client::PubmedClient,
//!   pipeline::{scan, ScanOutcome},
//!   prelude::*,
//! };
//!
//! #[tokio::main]
//! async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!   let client = PubmedClient::new();
//!   let classifier = Classifier::default();
//!
//!   match scan(&client, &classifier, "cancer immunotherapy", 10).await? {
//!     ScanOutcome::NoMatches => eprintln!("No papers found for the query."),
//!     ScanOutcome::Papers(papers) => medscan::report::write_report(&papers, None)?,
//!   }
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`classify`]: Keyword lexicons and the affiliation classifier
//! - [`client`]: PubMed E-utilities document source
//! - [`extract`]: EFetch XML parsing and per-record paper assembly
//! - [`paper`]: Output record types
//! - [`pipeline`]: The search-fetch-extract pipeline and its source seam
//! - [`report`]: CSV report writing
//!
//! # Design Philosophy
//!
//! The classification is a deliberately simple substring heuristic: it trades
//! false positives on short company tokens for zero configuration. Every output
//! field is always present; a missing source field degrades to an empty string
//! or empty list, never to an error. One invocation of the pipeline is one
//! linear batch run with no retries, pagination, or fan-out.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{collections::BTreeSet, io::Write, path::Path, time::Duration};

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, trace};

pub mod classify;
pub mod client;
pub mod error;
pub mod extract;
pub mod paper;
pub mod pipeline;
pub mod report;

use crate::{classify::*, error::*, extract::*, paper::*, pipeline::*};

/// Common traits and types for ergonomic imports.
///
/// Brings the pipeline seam and the crate error type into scope with a single
/// glob import:
///
/// ```no_run
/// use medscan::prelude::*;
/// ```
pub mod prelude {
  pub use crate::{
    error::{MedscanError, Result},
    pipeline::DocumentSource,
  };
}

//! Error types for the medscan library.
//!
//! One enum covers the failure modes of a scan run: the two network calls, the
//! batch XML parse, report writing, and configuration loading. None of these
//! are retried; a failed call aborts the run. Missing optional fields on a
//! record are never errors, they degrade to empty values during extraction.

use thiserror::Error;

/// Error type alias used for the [`medscan`](crate) crate.
pub type Result<T> = core::result::Result<T, MedscanError>;

/// Errors that can occur while scanning PubMed and writing the report.
#[derive(Error, Debug)]
pub enum MedscanError {
  /// A network request failed at the transport level.
  ///
  /// This can occur when:
  /// - The network is unavailable or the server is unreachable
  /// - The request times out
  /// - TLS errors occur
  /// - The response body cannot be read or decoded
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The remote service answered with a non-success status.
  ///
  /// The string parameter carries the endpoint and the status code that was
  /// returned, for the diagnostic stream.
  #[error("API error: {0}")]
  Api(String),

  /// The EFetch batch could not be interpreted as bibliographic records.
  ///
  /// This wraps reader errors from `quick-xml` and only fires on
  /// fundamentally malformed XML; records missing optional sub-fields parse
  /// fine and degrade to empty values.
  #[error(transparent)]
  Xml(#[from] quick_xml::Error),

  /// Writing the CSV report failed.
  #[error(transparent)]
  Csv(#[from] csv::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// A TOML client configuration could not be deserialized.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),
}

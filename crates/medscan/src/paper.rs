//! Output record types for the affiliation scan.
//!
//! A [`Paper`] is the normalized unit of output derived from one PubMed
//! record. Every field is always present: absence of a source field is
//! represented as an empty string or empty list, never as a missing value.
//! The two multi-valued fields are aggregated views over the record's authors,
//! deduplicated and lexicographically sorted, and frozen once assembled.

use super::*;

/// A single author as it appears on a record.
///
/// The display name is the trimmed join of forename and family name; either
/// part may be missing in the source, so the name can be empty (for instance
/// for collective author entries). Authors are constructed once per record
/// parse and are not shared across papers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
  /// Display name, possibly empty.
  pub name:         String,
  /// Free-text affiliation strings in source order; may embed email
  /// addresses.
  pub affiliations: Vec<String>,
}

/// One row of the output report.
///
/// # Field semantics
///
/// - `pmid` and `title` are empty strings when the source omits them.
/// - `publication_date` is `"YYYY-MM-DD"` when a year is present (month and
///   day default to `"01"`, and are otherwise carried verbatim, so PubMed
///   month names like `"Jan"` pass through), the free-text MedlineDate when
///   only that exists, or empty.
/// - `non_academic_authors` holds the deduplicated, sorted names of authors
///   with no academic keyword in any affiliation. An author with zero
///   affiliations counts as non-academic.
/// - `company_affiliations` holds the deduplicated, sorted full affiliation
///   strings that matched a company keyword, across all authors.
/// - `corresponding_email` is the first email found scanning authors in
///   source order and each author's affiliations in source order, or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paper {
  /// Source document identifier (PMID).
  pub pmid:                 String,
  /// Article title.
  pub title:                String,
  /// Formatted or free-text publication date.
  pub publication_date:     String,
  /// Sorted, deduplicated names of non-academic authors.
  pub non_academic_authors: Vec<String>,
  /// Sorted, deduplicated company-flavored affiliation strings.
  pub company_affiliations: Vec<String>,
  /// First email address found on the record, or empty.
  pub corresponding_email:  String,
}

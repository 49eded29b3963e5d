//! Keyword heuristics for affiliation classification.
//!
//! This module decides whether a free-text affiliation signals an academic
//! institution or a company, and pulls the first email address out of a text
//! fragment. Classification is a case-insensitive substring search against two
//! fixed lexicons; there is no tokenization and no whole-word matching.
//!
//! # Known limitation
//!
//! Because matching is pure substring search, short company tokens such as
//! `"ab"`, `"sa"`, `"co."`, and `"ag"` match inside unrelated words ("ag" in
//! "Agriculture", "sa" in "Sarah"). This is a deliberate trade-off inherited
//! from the heuristic's design: it keeps the lexicons tiny and configuration
//! free at the cost of false positives on company detection. The false
//! positives are covered explicitly in this module's tests rather than
//! corrected.
//!
//! # Examples
//!
//! ```
//! use medscan::classify::Classifier;
//!
//! let classifier = Classifier::default();
//! assert!(classifier.is_academic("Department of Biology, University of X"));
//! assert!(classifier.is_company("Acme Biotech Inc"));
//! assert_eq!(classifier.extract_email("contact: jane@acme.com"), Some("jane@acme.com"));
//! ```

use super::*;

/// Keywords whose presence (as a substring, case-insensitive) marks an
/// affiliation as academic.
pub static ACADEMIC_KEYWORDS: &[&str] = &[
  "university",
  "college",
  "institute",
  "school of",
  "department of",
  "faculty of",
  "research center",
  "centre for",
  "hospital",
  "medical center",
  "clinic",
];

/// Keywords whose presence (as a substring, case-insensitive) marks an
/// affiliation as commercial. The short tokens near the end are known
/// false-positive sources, see the module documentation.
pub static COMPANY_KEYWORDS: &[&str] = &[
  "inc",
  "ltd",
  "llc",
  "gmbh",
  "corporation",
  "corp",
  "pharma",
  "biotech",
  "biotechnology",
  "technologies",
  "systems",
  "bio",
  "laboratories",
  "laboratory",
  "sas",
  "sa",
  "nv",
  "ab",
  "co.",
  "ag",
];

lazy_static! {
  /// Leftmost-match email pattern: local part, `@`, dotted domain labels, and
  /// an alphabetic top-level label of two or more characters.
  static ref EMAIL_REGEX: Regex =
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap();
}

/// Stateless affiliation classifier over a pair of keyword lexicons.
///
/// The default classifier uses the process-wide [`ACADEMIC_KEYWORDS`] and
/// [`COMPANY_KEYWORDS`] constants. Custom lexicons can be injected with
/// [`Classifier::with_lexicons`], which exists so tests can probe edge cases
/// without editing the constants.
///
/// All methods are pure and reentrant; the classifier holds no mutable state.
#[derive(Debug, Clone)]
pub struct Classifier {
  /// Lowercased academic keywords.
  academic: Vec<String>,
  /// Lowercased company keywords.
  company:  Vec<String>,
}

impl Default for Classifier {
  fn default() -> Self { Self::with_lexicons(ACADEMIC_KEYWORDS, COMPANY_KEYWORDS) }
}

impl Classifier {
  /// Creates a classifier with the default lexicons.
  pub fn new() -> Self { Self::default() }

  /// Creates a classifier over custom lexicons.
  ///
  /// Keywords are lowercased once here so classification only lowercases the
  /// input text.
  pub fn with_lexicons(academic: &[&str], company: &[&str]) -> Self {
    Self {
      academic: academic.iter().map(|k| k.to_lowercase()).collect(),
      company:  company.iter().map(|k| k.to_lowercase()).collect(),
    }
  }

  /// Returns true if ANY academic keyword appears anywhere in the text,
  /// case-insensitively.
  pub fn is_academic(&self, text: &str) -> bool { contains_keyword(text, &self.academic) }

  /// Returns true if ANY company keyword appears anywhere in the text,
  /// case-insensitively.
  pub fn is_company(&self, text: &str) -> bool { contains_keyword(text, &self.company) }

  /// Returns the first email-shaped substring by leftmost position, if any.
  pub fn extract_email<'a>(&self, text: &'a str) -> Option<&'a str> {
    EMAIL_REGEX.find(text).map(|m| m.as_str())
  }
}

/// Substring search of every keyword against the lowercased text.
fn contains_keyword(text: &str, keywords: &[String]) -> bool {
  let lower = text.to_lowercase();
  keywords.iter().any(|k| lower.contains(k.as_str()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn academic_match_is_case_insensitive() {
    let classifier = Classifier::default();
    let text = "Department of Biology, University of Example";
    assert!(classifier.is_academic(text));
    assert!(classifier.is_academic(&text.to_uppercase()));
    assert_eq!(classifier.is_academic(text), classifier.is_academic(&text.to_uppercase()));
  }

  #[test]
  fn company_match_is_case_insensitive() {
    let classifier = Classifier::default();
    assert!(classifier.is_company("ACME BIOTECH INC"));
    assert!(classifier.is_company("acme biotech inc"));
  }

  #[test]
  fn non_matching_text_is_neither() {
    let classifier = Classifier::default();
    assert!(!classifier.is_academic("42 Nowhere Street"));
    assert!(!classifier.is_company("42 Nowhere Street"));
  }

  // The short tokens match as substrings of unrelated words. These cases
  // document the known false positives instead of fixing them.
  #[test]
  fn short_company_tokens_match_inside_words() {
    let classifier = Classifier::default();
    // "ag" inside "Agriculture"
    assert!(classifier.is_company("National Center of Agriculture"));
    // "sa" inside "Sarajevo"
    assert!(classifier.is_company("Sarajevo Public Archive"));
    // "ab" inside "Alabama"
    assert!(classifier.is_company("Alabama State Office"));
  }

  #[test]
  fn injected_lexicons_override_the_defaults() {
    let classifier = Classifier::with_lexicons(&["observatory"], &["consortium"]);
    assert!(classifier.is_academic("Mountain Observatory"));
    assert!(!classifier.is_academic("University of Example"));
    assert!(classifier.is_company("Widget Consortium"));
    assert!(!classifier.is_company("Acme Biotech Inc"));
  }

  #[test]
  fn extract_email_returns_leftmost_match() {
    let classifier = Classifier::default();
    let text = "first.last+tag@example.co.uk then second@example.org";
    assert_eq!(classifier.extract_email(text), Some("first.last+tag@example.co.uk"));
  }

  #[test]
  fn extract_email_requires_alphabetic_tld() {
    let classifier = Classifier::default();
    assert_eq!(classifier.extract_email("no email here"), None);
    assert_eq!(classifier.extract_email("broken@nodomain"), None);
  }

  #[test]
  fn extract_email_finds_address_inside_affiliation() {
    let classifier = Classifier::default();
    let text = "Acme Biotech Inc, contact: jane@acme.com";
    assert_eq!(classifier.extract_email(text), Some("jane@acme.com"));
  }
}

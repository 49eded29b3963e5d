//! CSV report writing.
//!
//! Serializes a paper sequence as delimited tabular text with a fixed header.
//! Multi-valued cells (authors, company affiliations) are joined with `"; "`.
//! The destination is either a named file, overwritten if it exists, or
//! standard output; a successful file write is confirmed with a record count
//! on stdout.

use super::*;

/// Fixed, ordered report header.
pub static REPORT_HEADER: [&str; 6] = [
  "PubmedID",
  "Title",
  "Publication Date",
  "Non-academicAuthor(s)",
  "CompanyAffiliation(s)",
  "Corresponding Author Email",
];

/// Separator used inside multi-valued cells.
static MULTI_VALUE_SEPARATOR: &str = "; ";

/// Writes the report to the given path, or to stdout when no path is given.
///
/// On a successful file write, prints `Saved {n} records to {path}` to
/// standard output.
pub fn write_report(papers: &[Paper], path: Option<&Path>) -> Result<()> {
  match path {
    Some(path) => {
      let mut writer = csv::Writer::from_path(path)?;
      write_rows(&mut writer, papers)?;
      println!("Saved {} records to {}", papers.len(), path.display());
    },
    None => {
      let mut writer = csv::Writer::from_writer(std::io::stdout());
      write_rows(&mut writer, papers)?;
    },
  }
  Ok(())
}

/// Writes the header and one row per paper to an open CSV writer.
pub fn write_rows<W: Write>(writer: &mut csv::Writer<W>, papers: &[Paper]) -> Result<()> {
  writer.write_record(REPORT_HEADER)?;
  for paper in papers {
    let authors = paper.non_academic_authors.join(MULTI_VALUE_SEPARATOR);
    let companies = paper.company_affiliations.join(MULTI_VALUE_SEPARATOR);
    writer.write_record([
      paper.pmid.as_str(),
      paper.title.as_str(),
      paper.publication_date.as_str(),
      authors.as_str(),
      companies.as_str(),
      paper.corresponding_email.as_str(),
    ])?;
  }
  writer.flush()?;
  Ok(())
}

//! EFetch XML parsing and per-record paper assembly.
//!
//! This module turns one raw EFetch batch (a `PubmedArticleSet` document) into
//! [`Paper`] values. Parsing is a single streaming pass with `quick-xml`: a
//! small state machine collects, per `PubmedArticle` element, the first
//! `PMID`, the first `ArticleTitle`, the first `PubDate`, and every `Author`
//! with its `AffiliationInfo/Affiliation` strings. The collected
//! [`PubmedRecord`] is then folded into a [`Paper`] by
//! [`PubmedRecord::into_paper`], which applies the keyword classifier.
//!
//! Missing optional sub-fields never fail a record; they degrade to empty
//! strings or lists. Only XML the reader cannot interpret at all fails the
//! whole batch.
//!
//! # Examples
//!
//! ```
//! use medscan::{classify::Classifier, extract::extract_papers};
//!
//! let xml = r#"
//!   <PubmedArticleSet>
//!     <PubmedArticle>
//!       <MedlineCitation>
//!         <PMID>12345</PMID>
//!         <Article><ArticleTitle>A result</ArticleTitle></Article>
//!       </MedlineCitation>
//!     </PubmedArticle>
//!   </PubmedArticleSet>"#;
//!
//! let papers = extract_papers(xml, &Classifier::default()).unwrap();
//! assert_eq!(papers[0].pmid, "12345");
//! assert_eq!(papers[0].title, "A result");
//! ```

use quick_xml::{events::Event, Reader};

use super::*;

/// Publication date fields as they appear on a record, all optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDate {
  /// `PubDate/Year` text.
  pub year:    Option<String>,
  /// `PubDate/Month` text, carried verbatim (often a name like `"Jan"`).
  pub month:   Option<String>,
  /// `PubDate/Day` text.
  pub day:     Option<String>,
  /// `PubDate/MedlineDate` free-text fallback (e.g. `"2020 Spring"`).
  pub medline: Option<String>,
}

/// One raw bibliographic record, structurally parsed but not yet classified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PubmedRecord {
  /// First `PMID` text found on the article.
  pub pmid:    Option<String>,
  /// First `ArticleTitle` text found on the article.
  pub title:   Option<String>,
  /// First `PubDate` element's fields.
  pub date:    RecordDate,
  /// Authors in source order.
  pub authors: Vec<Author>,
}

impl PubmedRecord {
  /// Assembles the output [`Paper`] for this record.
  ///
  /// This is a pure function of the record and the classifier: running it
  /// twice on clones of the same record yields identical papers.
  ///
  /// The assembly rules:
  ///
  /// 1. `pmid` and `title` default to the empty string.
  /// 2. A year yields `"{year}-{month or 01}-{day or 01}"`; otherwise the
  ///    MedlineDate is used verbatim; otherwise the date is empty.
  /// 3. An author is academic iff ANY affiliation matches the academic
  ///    lexicon, so an author with zero affiliations is non-academic. Named
  ///    non-academic authors are collected (deduplicated, sorted).
  /// 4. Every affiliation of every author matching the company lexicon is
  ///    collected in full (deduplicated, sorted), regardless of that
  ///    author's academic status.
  /// 5. The corresponding email is the first match of an early-exit linear
  ///    scan over authors and their affiliations in source order.
  pub fn into_paper(self, classifier: &Classifier) -> Paper {
    let PubmedRecord { pmid, title, date, authors } = self;

    let publication_date = if let Some(year) = &date.year {
      format!(
        "{}-{}-{}",
        year,
        date.month.as_deref().unwrap_or("01"),
        date.day.as_deref().unwrap_or("01")
      )
    } else if let Some(medline) = &date.medline {
      medline.clone()
    } else {
      String::new()
    };

    let mut non_academic_authors = BTreeSet::new();
    let mut company_affiliations = BTreeSet::new();
    for author in &authors {
      let is_academic = author.affiliations.iter().any(|aff| classifier.is_academic(aff));
      if !is_academic && !author.name.is_empty() {
        non_academic_authors.insert(author.name.clone());
      }
      for aff in &author.affiliations {
        if classifier.is_company(aff) {
          company_affiliations.insert(aff.clone());
        }
      }
    }

    let corresponding_email = authors
      .iter()
      .flat_map(|author| author.affiliations.iter())
      .find_map(|aff| classifier.extract_email(aff))
      .unwrap_or_default()
      .to_string();

    Paper {
      pmid: pmid.unwrap_or_default(),
      title: title.unwrap_or_default(),
      publication_date,
      non_academic_authors: non_academic_authors.into_iter().collect(),
      company_affiliations: company_affiliations.into_iter().collect(),
      corresponding_email,
    }
  }
}

/// Extracts papers from one raw EFetch batch, preserving document order.
///
/// This is the extraction pipeline: every `PubmedArticle` in the batch yields
/// exactly one [`Paper`], with no filtering and no cross-paper deduplication.
/// An empty batch (or one without any articles) yields an empty vector.
pub fn extract_papers(xml: &str, classifier: &Classifier) -> Result<Vec<Paper>> {
  Ok(parse_records(xml)?.into_iter().map(|record| record.into_paper(classifier)).collect())
}

/// Parses the raw batch into [`PubmedRecord`]s, one per `PubmedArticle`.
pub fn parse_records(xml: &str) -> Result<Vec<PubmedRecord>> {
  let mut reader = Reader::from_str(xml);
  reader.config_mut().trim_text(true);

  let mut records = Vec::new();
  let mut stack: Vec<String> = Vec::new();
  let mut article: Option<ArticleState> = None;

  loop {
    match reader.read_event()? {
      Event::Start(e) => {
        let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
        if tag == "PubmedArticle" && article.is_none() {
          article = Some(ArticleState::default());
        } else if let Some(state) = article.as_mut() {
          state.open_element(&tag, stack.last().map(String::as_str));
        }
        stack.push(tag);
      },
      Event::Text(e) => {
        if let Some(state) = article.as_mut() {
          let text = e.unescape().map_err(quick_xml::Error::from)?;
          state.capture_text(stack.last().map(String::as_str), &text);
        }
      },
      Event::End(_) => {
        if let Some(tag) = stack.pop() {
          if tag == "PubmedArticle" {
            if let Some(state) = article.take() {
              records.push(state.into_record());
            }
          } else if let Some(state) = article.as_mut() {
            state.close_element(&tag);
          }
        }
      },
      Event::Eof => break,
      _ => (),
    }
  }

  trace!("parsed {} records from batch", records.len());
  Ok(records)
}

/// Author fields accumulated while inside an `Author` element.
#[derive(Debug, Default)]
struct AuthorState {
  /// First `ForeName` text.
  fore_name:    Option<String>,
  /// First `LastName` text.
  last_name:    Option<String>,
  /// Trimmed, non-empty `AffiliationInfo/Affiliation` strings in order.
  affiliations: Vec<String>,
}

impl AuthorState {
  /// Joins the name parts, collapsing missing ones, and freezes the author.
  fn into_author(self) -> Author {
    let name = format!(
      "{} {}",
      self.fore_name.as_deref().unwrap_or(""),
      self.last_name.as_deref().unwrap_or("")
    )
    .trim()
    .to_string();
    Author { name, affiliations: self.affiliations }
  }
}

/// Accumulator for one `PubmedArticle` element.
///
/// "First wins" fields use `Option` and only fill once, which reproduces the
/// first-in-document-order semantics of the extraction rules. Title and
/// affiliation text are buffered between their start and end tags because the
/// text can arrive in several chunks when the element carries inline markup.
#[derive(Debug, Default)]
struct ArticleState {
  /// First `PMID` text anywhere in the article.
  pmid:         Option<String>,
  /// First completed `ArticleTitle` text.
  title:        Option<String>,
  /// Open `ArticleTitle` buffer.
  title_buf:    Option<String>,
  /// Fields of the first `PubDate` element.
  date:         RecordDate,
  /// Currently inside the first `PubDate`.
  in_pubdate:   bool,
  /// The first `PubDate` has already closed; later ones are ignored.
  pubdate_seen: bool,
  /// Authors in document order, the last one possibly still open.
  authors:      Vec<AuthorState>,
  /// Currently inside an `Author` element.
  author_open:  bool,
  /// Open `Affiliation` buffer.
  aff_buf:      Option<String>,
}

impl ArticleState {
  /// Reacts to an opening tag inside the article.
  fn open_element(&mut self, tag: &str, parent: Option<&str>) {
    match tag {
      "PubDate" if !self.pubdate_seen && !self.in_pubdate => self.in_pubdate = true,
      "Author" if !self.author_open => {
        self.authors.push(AuthorState::default());
        self.author_open = true;
      },
      "ArticleTitle" if self.title.is_none() && self.title_buf.is_none() =>
        self.title_buf = Some(String::new()),
      "Affiliation" if self.author_open && parent == Some("AffiliationInfo") =>
        self.aff_buf = Some(String::new()),
      _ => (),
    }
  }

  /// Stores a text chunk according to the element it appeared in.
  fn capture_text(&mut self, current: Option<&str>, text: &str) {
    match current {
      Some("Affiliation") if self.aff_buf.is_some() => append_chunk(&mut self.aff_buf, text),
      Some("ArticleTitle") if self.title_buf.is_some() => append_chunk(&mut self.title_buf, text),
      Some("PMID") =>
        if self.pmid.is_none() {
          self.pmid = Some(text.trim().to_string());
        },
      Some("Year") if self.in_pubdate =>
        if self.date.year.is_none() {
          self.date.year = Some(text.to_string());
        },
      Some("Month") if self.in_pubdate =>
        if self.date.month.is_none() {
          self.date.month = Some(text.to_string());
        },
      Some("Day") if self.in_pubdate =>
        if self.date.day.is_none() {
          self.date.day = Some(text.to_string());
        },
      Some("MedlineDate") if self.in_pubdate =>
        if self.date.medline.is_none() {
          self.date.medline = Some(text.to_string());
        },
      Some("LastName") if self.author_open => {
        if let Some(author) = self.authors.last_mut() {
          if author.last_name.is_none() {
            author.last_name = Some(text.to_string());
          }
        }
      },
      Some("ForeName") if self.author_open => {
        if let Some(author) = self.authors.last_mut() {
          if author.fore_name.is_none() {
            author.fore_name = Some(text.to_string());
          }
        }
      },
      _ => (),
    }
  }

  /// Reacts to a closing tag inside the article.
  fn close_element(&mut self, tag: &str) {
    match tag {
      "PubDate" if self.in_pubdate => {
        self.in_pubdate = false;
        self.pubdate_seen = true;
      },
      "ArticleTitle" =>
        if let Some(buf) = self.title_buf.take() {
          if self.title.is_none() {
            self.title = Some(buf.trim().to_string());
          }
        },
      "Affiliation" =>
        if let Some(buf) = self.aff_buf.take() {
          let trimmed = buf.trim();
          if !trimmed.is_empty() {
            if let Some(author) = self.authors.last_mut() {
              author.affiliations.push(trimmed.to_string());
            }
          }
        },
      "Author" => self.author_open = false,
      _ => (),
    }
  }

  /// Freezes the accumulator into a [`PubmedRecord`].
  fn into_record(self) -> PubmedRecord {
    PubmedRecord {
      pmid:    self.pmid,
      title:   self.title,
      date:    self.date,
      authors: self.authors.into_iter().map(AuthorState::into_author).collect(),
    }
  }
}

/// Appends a text chunk to an open buffer, separating chunks with one space.
fn append_chunk(buf: &mut Option<String>, text: &str) {
  if let Some(buf) = buf.as_mut() {
    if !buf.is_empty() {
      buf.push(' ');
    }
    buf.push_str(text);
  }
}

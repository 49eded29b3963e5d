//! The search-fetch-extract pipeline and its document source seam.
//!
//! A scan is one linear batch run: one search call for identifiers, one fetch
//! call for the raw records, one extraction pass. There is no retrying, no
//! pagination past the single batch, and no parallel fan-out across
//! identifiers. Zero identifiers is a normal, successful outcome, modeled as
//! [`ScanOutcome::NoMatches`] rather than an error.
//!
//! The [`DocumentSource`] trait abstracts the remote service so the pipeline
//! can be driven by the real [`PubmedClient`](crate::client::PubmedClient) or
//! by a stub in tests.

use super::*;

/// Identifier list and total hit count returned by a search call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHits {
  /// Matching document identifiers, in service order, capped at the
  /// requested batch size.
  pub ids:   Vec<String>,
  /// Total number of hits the service reported for the query, which can
  /// exceed the identifier list length.
  pub total: u64,
}

/// A remote service supplying identifier search and bulk record retrieval.
///
/// Both calls are blocking round trips bounded only by their per-call
/// timeouts. Failures surface as [`MedscanError`] values and abort the run;
/// they are never retried.
#[async_trait]
pub trait DocumentSource: Send + Sync {
  /// Searches for documents matching a query term.
  async fn search(&self, term: &str, retmax: usize) -> Result<SearchHits>;

  /// Fetches the raw records for the given identifiers as one batch.
  ///
  /// An empty identifier list must yield an empty batch without a network
  /// round trip.
  async fn fetch_records(&self, ids: &[String]) -> Result<String>;
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
  /// The search returned zero identifiers. A successful terminal outcome;
  /// callers should notify the user and skip the report writer.
  NoMatches,
  /// Extracted papers, one per record, in source order.
  Papers(Vec<Paper>),
}

/// Runs one scan: search, fetch, extract.
///
/// Papers come out in the order the service returned the records, with no
/// filtering and no deduplication across papers.
///
/// # Errors
///
/// Fails if either remote call fails ([`MedscanError::Network`] /
/// [`MedscanError::Api`]) or the batch cannot be parsed at all
/// ([`MedscanError::Xml`]).
pub async fn scan<S>(
  source: &S,
  classifier: &Classifier,
  query: &str,
  retmax: usize,
) -> Result<ScanOutcome>
where
  S: DocumentSource + ?Sized,
{
  let hits = source.search(query, retmax).await?;
  debug!("search returned {} of {} total hits", hits.ids.len(), hits.total);

  if hits.ids.is_empty() {
    return Ok(ScanOutcome::NoMatches);
  }

  let batch = source.fetch_records(&hits.ids).await?;
  let papers = extract_papers(&batch, classifier)?;
  Ok(ScanOutcome::Papers(papers))
}

#[cfg(test)]
mod tests {
  use tracing_test::traced_test;

  use super::*;

  /// Canned source that records nothing and serves a fixed batch.
  struct StubSource {
    ids:   Vec<String>,
    batch: String,
  }

  #[async_trait]
  impl DocumentSource for StubSource {
    async fn search(&self, _term: &str, _retmax: usize) -> Result<SearchHits> {
      Ok(SearchHits { ids: self.ids.clone(), total: self.ids.len() as u64 })
    }

    async fn fetch_records(&self, ids: &[String]) -> Result<String> {
      assert!(!ids.is_empty(), "pipeline must not fetch an empty id list");
      Ok(self.batch.clone())
    }
  }

  /// Source whose search always fails, to check error propagation.
  struct FailingSource;

  #[async_trait]
  impl DocumentSource for FailingSource {
    async fn search(&self, _term: &str, _retmax: usize) -> Result<SearchHits> {
      Err(MedscanError::Api("esearch returned status 429".into()))
    }

    async fn fetch_records(&self, _ids: &[String]) -> Result<String> {
      unreachable!("search already failed")
    }
  }

  #[traced_test]
  #[tokio::test]
  async fn zero_identifiers_short_circuit_to_no_matches() {
    let source = StubSource { ids: vec![], batch: String::new() };
    let outcome = scan(&source, &Classifier::default(), "nothing", 10).await.unwrap();
    assert_eq!(outcome, ScanOutcome::NoMatches);
  }

  #[traced_test]
  #[tokio::test]
  async fn papers_come_out_in_batch_order() {
    let batch = r#"
      <PubmedArticleSet>
        <PubmedArticle><MedlineCitation><PMID>10</PMID></MedlineCitation></PubmedArticle>
        <PubmedArticle><MedlineCitation><PMID>20</PMID></MedlineCitation></PubmedArticle>
      </PubmedArticleSet>"#;
    let source = StubSource { ids: vec!["10".into(), "20".into()], batch: batch.into() };
    let outcome = scan(&source, &Classifier::default(), "anything", 10).await.unwrap();
    match outcome {
      ScanOutcome::Papers(papers) => {
        assert_eq!(papers.len(), 2);
        assert_eq!(papers[0].pmid, "10");
        assert_eq!(papers[1].pmid, "20");
      },
      ScanOutcome::NoMatches => panic!("expected papers"),
    }
  }

  #[tokio::test]
  async fn search_failure_aborts_the_run() {
    let result = scan(&FailingSource, &Classifier::default(), "anything", 10).await;
    assert!(matches!(result, Err(MedscanError::Api(_))));
  }
}

//! PubMed document source over the NCBI E-utilities API.
//!
//! Two endpoints back the pipeline: ESearch resolves a query term to a list
//! of PMIDs, EFetch bulk-retrieves the matching records as one XML batch.
//! Both calls carry a static per-request timeout and an optional API key that
//! raises NCBI's rate limits (3 requests/second without a key, 10 with one).
//!
//! Endpoints and timeouts live in a [`ClientConfig`] with sensible defaults;
//! configurations can also be loaded from TOML:
//!
//! ```
//! use medscan::client::PubmedClient;
//!
//! let toml = r#"
//!     search_timeout_secs = 10
//!     api_key = "secret"
//! "#;
//!
//! let client = PubmedClient::from_config_str(toml)?;
//! # Ok::<(), medscan::error::MedscanError>(())
//! ```

use super::*;

/// Default ESearch endpoint.
pub static ESEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";
/// Default EFetch endpoint.
pub static EFETCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

/// Endpoint and timeout configuration for [`PubmedClient`].
///
/// Every field has a default, so a TOML configuration only needs the fields
/// it wants to override.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
  /// ESearch endpoint URL.
  #[serde(default = "default_esearch_url")]
  pub esearch_url:         String,
  /// EFetch endpoint URL.
  #[serde(default = "default_efetch_url")]
  pub efetch_url:          String,
  /// Per-request timeout for the identifier search, in seconds.
  #[serde(default = "default_search_timeout")]
  pub search_timeout_secs: u64,
  /// Per-request timeout for the batch fetch, in seconds. Larger than the
  /// search timeout since the batch body can be sizable.
  #[serde(default = "default_fetch_timeout")]
  pub fetch_timeout_secs:  u64,
  /// Optional NCBI API key sent with every request.
  #[serde(default)]
  pub api_key:             Option<String>,
}

/// Default for [`ClientConfig::esearch_url`].
fn default_esearch_url() -> String { ESEARCH_URL.to_string() }
/// Default for [`ClientConfig::efetch_url`].
fn default_efetch_url() -> String { EFETCH_URL.to_string() }
/// Default for [`ClientConfig::search_timeout_secs`].
fn default_search_timeout() -> u64 { 30 }
/// Default for [`ClientConfig::fetch_timeout_secs`].
fn default_fetch_timeout() -> u64 { 60 }

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      esearch_url:         default_esearch_url(),
      efetch_url:          default_efetch_url(),
      search_timeout_secs: default_search_timeout(),
      fetch_timeout_secs:  default_fetch_timeout(),
      api_key:             None,
    }
  }
}

/// HTTP client for the two E-utilities calls.
#[derive(Debug, Clone)]
pub struct PubmedClient {
  /// Shared reqwest client.
  http:   reqwest::Client,
  /// Endpoints, timeouts, and credential.
  config: ClientConfig,
}

impl Default for PubmedClient {
  fn default() -> Self { Self::new() }
}

impl PubmedClient {
  /// Creates a client with the default configuration.
  pub fn new() -> Self { Self::from_config(ClientConfig::default()) }

  /// Creates a client from an explicit configuration.
  pub fn from_config(config: ClientConfig) -> Self {
    Self { http: reqwest::Client::new(), config }
  }

  /// Creates a client from a TOML configuration string.
  pub fn from_config_str(toml_str: &str) -> Result<Self> {
    Ok(Self::from_config(toml::from_str(toml_str)?))
  }

  /// Creates a client from a TOML configuration file.
  pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    Self::from_config_str(&content)
  }

  /// Sets the NCBI API key on the client.
  pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
    self.config.api_key = Some(key.into());
    self
  }

  /// Read access to the active configuration.
  pub fn config(&self) -> &ClientConfig { &self.config }
}

/// The `esearchresult` envelope of an ESearch JSON response.
#[derive(Debug, Default, Deserialize)]
struct ESearchResponse {
  /// Payload object; absent on some error responses.
  #[serde(default)]
  esearchresult: ESearchResult,
}

/// Identifier list and hit count fields of an ESearch result.
#[derive(Debug, Default, Deserialize)]
struct ESearchResult {
  /// PMIDs matching the query, capped at `retmax`.
  #[serde(default)]
  idlist: Vec<String>,
  /// Total hit count, returned by the service as a string.
  #[serde(default)]
  count:  String,
}

#[async_trait]
impl DocumentSource for PubmedClient {
  async fn search(&self, term: &str, retmax: usize) -> Result<SearchHits> {
    let retmax = retmax.to_string();
    let mut params =
      vec![("db", "pubmed"), ("term", term), ("retmode", "json"), ("retmax", retmax.as_str())];
    if let Some(key) = &self.config.api_key {
      params.push(("api_key", key.as_str()));
    }

    debug!("calling esearch for term: {term}");
    let response = self
      .http
      .get(&self.config.esearch_url)
      .query(&params)
      .timeout(Duration::from_secs(self.config.search_timeout_secs))
      .send()
      .await?;

    if !response.status().is_success() {
      return Err(MedscanError::Api(format!("esearch returned status {}", response.status())));
    }

    let body: ESearchResponse = response.json().await?;
    let total = body.esearchresult.count.parse().unwrap_or(0);
    trace!("esearch ids: {:?} (count {total})", body.esearchresult.idlist);
    Ok(SearchHits { ids: body.esearchresult.idlist, total })
  }

  async fn fetch_records(&self, ids: &[String]) -> Result<String> {
    if ids.is_empty() {
      return Ok(String::new());
    }

    let joined = ids.join(",");
    let mut params = vec![("db", "pubmed"), ("id", joined.as_str()), ("retmode", "xml")];
    if let Some(key) = &self.config.api_key {
      params.push(("api_key", key.as_str()));
    }

    debug!("calling efetch for {} ids", ids.len());
    let response = self
      .http
      .get(&self.config.efetch_url)
      .query(&params)
      .timeout(Duration::from_secs(self.config.fetch_timeout_secs))
      .send()
      .await?;

    if !response.status().is_success() {
      return Err(MedscanError::Api(format!("efetch returned status {}", response.status())));
    }

    Ok(response.text().await?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn config_defaults_point_at_the_public_endpoints() {
    let config = ClientConfig::default();
    assert_eq!(config.esearch_url, ESEARCH_URL);
    assert_eq!(config.efetch_url, EFETCH_URL);
    assert_eq!(config.search_timeout_secs, 30);
    assert_eq!(config.fetch_timeout_secs, 60);
    assert!(config.api_key.is_none());
  }

  #[test]
  fn toml_config_overrides_only_named_fields() {
    let client = PubmedClient::from_config_str(
      r#"
        esearch_url = "http://localhost:9999/esearch"
        fetch_timeout_secs = 5
      "#,
    )
    .unwrap();
    assert_eq!(client.config().esearch_url, "http://localhost:9999/esearch");
    assert_eq!(client.config().efetch_url, EFETCH_URL);
    assert_eq!(client.config().fetch_timeout_secs, 5);
    assert_eq!(client.config().search_timeout_secs, 30);
  }

  #[test]
  fn invalid_toml_is_a_config_error() {
    assert!(matches!(
      PubmedClient::from_config_str("search_timeout_secs = \"soon\""),
      Err(MedscanError::TomlDe(_))
    ));
  }

  #[test]
  fn with_api_key_sets_the_credential() {
    let client = PubmedClient::new().with_api_key("secret");
    assert_eq!(client.config().api_key.as_deref(), Some("secret"));
  }

  #[test]
  fn esearch_response_parses_idlist_and_count() {
    let body = r#"{"esearchresult": {"idlist": ["1", "2"], "count": "123"}}"#;
    let parsed: ESearchResponse = serde_json::from_str(body).unwrap();
    assert_eq!(parsed.esearchresult.idlist, vec!["1", "2"]);
    assert_eq!(parsed.esearchresult.count, "123");
  }

  #[test]
  fn esearch_response_tolerates_missing_fields() {
    let parsed: ESearchResponse = serde_json::from_str("{}").unwrap();
    assert!(parsed.esearchresult.idlist.is_empty());
    assert_eq!(parsed.esearchresult.count, "");
  }

  #[tokio::test]
  async fn empty_id_list_skips_the_network() {
    // No local server is running on this port; an actual request would fail.
    let client = PubmedClient::from_config_str(r#"efetch_url = "http://localhost:1/efetch""#).unwrap();
    assert_eq!(client.fetch_records(&[]).await.unwrap(), "");
  }

  // Live round trip against NCBI; run with `cargo test -- --ignored`.
  #[ignore]
  #[tokio::test]
  async fn live_search_returns_identifiers() {
    let client = PubmedClient::new();
    let hits = client.search("cancer", 3).await.unwrap();
    assert!(!hits.ids.is_empty());
    assert!(hits.total >= hits.ids.len() as u64);
  }
}

//! DBLP publication index adapter.
//!
//! The [`DblpSource`] queries the DBLP publication search API for works by an
//! author and maps each hit into an index-sourced [`Publication`].

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::model::{Publication, PublicationSource};

use super::http_client::{HttpTimeouts, build_source_http_client, transport_error};
use super::{IndexSource, SourceError};

/// Default DBLP API base URL.
const DEFAULT_BASE_URL: &str = "https://dblp.org";

/// Source label used in logs and errors.
const SOURCE_NAME: &str = "dblp";

/// Default maximum number of hits requested per query.
const DEFAULT_MAX_HITS: u32 = 100;

// ==================== DBLP API Response Types ====================

/// Top-level DBLP search response.
#[derive(Debug, Deserialize)]
pub(crate) struct DblpResponse {
    pub result: DblpResult,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DblpResult {
    #[serde(default)]
    pub hits: Option<DblpHits>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DblpHits {
    /// Absent when the query matched nothing.
    #[serde(default)]
    pub hit: Vec<DblpHit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DblpHit {
    #[serde(default)]
    pub info: Option<DblpInfo>,
}

/// Publication record inside a DBLP hit.
#[derive(Debug, Deserialize)]
pub(crate) struct DblpInfo {
    pub title: Option<String>,
    pub year: Option<String>,
    pub venue: Option<DblpVenue>,
}

/// DBLP reports `venue` as a string, or an array for multi-venue entries.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum DblpVenue {
    One(String),
    Many(Vec<String>),
}

impl DblpVenue {
    fn into_label(self) -> Option<String> {
        let label = match self {
            Self::One(venue) => venue,
            Self::Many(venues) => venues.join(", "),
        };
        if label.trim().is_empty() { None } else { Some(label) }
    }
}

// ==================== DblpSource ====================

/// Publication index backed by the DBLP search API.
///
/// Queries `{base}/search/publ/api?q=author:{name}&format=json&h={max_hits}`.
/// DBLP does not report citation counts, so every publication's citations
/// are unknown.
pub struct DblpSource {
    client: Client,
    base_url: String,
    max_hits: u32,
}

impl DblpSource {
    /// Creates a DBLP source against the public API.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if HTTP client construction fails.
    #[instrument(skip_all)]
    pub fn new(timeouts: HttpTimeouts) -> Result<Self, SourceError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeouts)
    }

    /// Creates a DBLP source with a custom base URL (mirrors, wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if HTTP client construction fails.
    #[instrument(skip_all, fields(base_url))]
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeouts: HttpTimeouts,
    ) -> Result<Self, SourceError> {
        let client = build_source_http_client(SOURCE_NAME, timeouts)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_hits: DEFAULT_MAX_HITS,
        })
    }

    /// Sets the maximum number of hits requested per query.
    #[must_use]
    pub fn with_max_hits(mut self, max_hits: u32) -> Self {
        self.max_hits = max_hits.max(1);
        self
    }
}

impl std::fmt::Debug for DblpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DblpSource")
            .field("base_url", &self.base_url)
            .field("max_hits", &self.max_hits)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl IndexSource for DblpSource {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    #[instrument(skip(self), fields(source = SOURCE_NAME))]
    async fn fetch_publications(&self, author_name: &str) -> Result<Vec<Publication>, SourceError> {
        let query = format!("author:{author_name}");
        let url = format!(
            "{}/search/publ/api?q={}&format=json&h={}",
            self.base_url,
            urlencoding::encode(&query),
            self.max_hits
        );

        debug!(api_url = %url, "Calling DBLP API");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(SOURCE_NAME, &e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "DBLP API error");
            return Err(SourceError::http_status(SOURCE_NAME, status.as_u16()));
        }

        let body = response
            .json::<DblpResponse>()
            .await
            .map_err(|e| SourceError::invalid_response(SOURCE_NAME, &e.to_string()))?;

        let publications = extract_publications(body);
        debug!(count = publications.len(), "DBLP publications fetched");
        Ok(publications)
    }
}

// ==================== Extraction Helpers ====================

/// Maps DBLP hits into index publications, skipping hits without an `info` block.
fn extract_publications(response: DblpResponse) -> Vec<Publication> {
    let hits = response.result.hits.map(|h| h.hit).unwrap_or_default();
    hits.into_iter()
        .filter_map(|hit| hit.info)
        .map(|info| Publication {
            title: info.title.unwrap_or_default(),
            year: info.year.filter(|y| !y.trim().is_empty()),
            journal: info.venue.and_then(DblpVenue::into_label),
            citations: None,
            abstract_text: None,
            source: PublicationSource::Index,
        })
        .collect()
}

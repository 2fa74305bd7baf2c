//! Semantic Scholar academic profile adapter.
//!
//! The [`SemanticScholarSource`] searches the Semantic Scholar Graph API for an
//! author and maps the best match into an [`AuthorProfile`] whose publications
//! carry abstracts.

use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::model::{AuthorProfile, Publication, PublicationSource};

use super::http_client::{HttpTimeouts, build_source_http_client, transport_error};
use super::{ProfileSource, SourceError};

/// Default Semantic Scholar API base URL.
const DEFAULT_BASE_URL: &str = "https://api.semanticscholar.org";

/// Source label used in logs and errors.
const SOURCE_NAME: &str = "semantic-scholar";

/// Author and paper fields requested from the author search endpoint.
const AUTHOR_FIELDS: &str = "name,affiliations,citationCount,hIndex,papers.title,papers.year,papers.venue,papers.citationCount,papers.abstract,papers.fieldsOfStudy";

/// Citation threshold for the i10-index.
const I10_CITATION_THRESHOLD: i64 = 10;

// ==================== Semantic Scholar API Response Types ====================

/// Response of `GET /graph/v1/author/search`.
#[derive(Debug, Deserialize)]
pub(crate) struct AuthorSearchResponse {
    #[serde(default)]
    pub data: Vec<S2Author>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct S2Author {
    pub name: Option<String>,
    #[serde(default)]
    pub affiliations: Option<Vec<String>>,
    pub citation_count: Option<i64>,
    pub h_index: Option<i64>,
    #[serde(default)]
    pub papers: Option<Vec<S2Paper>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct S2Paper {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub venue: Option<String>,
    pub citation_count: Option<i64>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub fields_of_study: Option<Vec<String>>,
}

// ==================== SemanticScholarSource ====================

/// Academic profile service backed by the Semantic Scholar Graph API.
///
/// Queries `{base}/graph/v1/author/search?query={name}&limit=1&fields=...` and
/// takes the first match. Interest terms are the distinct fields of study
/// across the author's papers; the i10-index is computed from paper citation
/// counts.
pub struct SemanticScholarSource {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl SemanticScholarSource {
    /// Creates a source against the public Semantic Scholar API.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if HTTP client construction fails.
    #[instrument(skip_all)]
    pub fn new(timeouts: HttpTimeouts) -> Result<Self, SourceError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeouts)
    }

    /// Creates a source with a custom base URL (for testing with wiremock).
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
            api_key: None,
        })
    }

    /// Sets the API key sent as the `x-api-key` header.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::ClientInit`] if the key contains control characters.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Result<Self, SourceError> {
        let api_key = api_key.into();
        if api_key.chars().any(char::is_control) {
            return Err(SourceError::client_init(
                SOURCE_NAME,
                "API key contains invalid control characters",
            ));
        }
        self.api_key = Some(api_key).filter(|key| !key.is_empty());
        Ok(self)
    }
}

impl std::fmt::Debug for SemanticScholarSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticScholarSource")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ProfileSource for SemanticScholarSource {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    #[instrument(skip(self), fields(source = SOURCE_NAME))]
    async fn fetch_author(&self, author_name: &str) -> Result<Option<AuthorProfile>, SourceError> {
        let url = format!(
            "{}/graph/v1/author/search?query={}&limit=1&fields={}",
            self.base_url,
            urlencoding::encode(author_name),
            AUTHOR_FIELDS
        );

        debug!(api_url = %url, "Calling Semantic Scholar API");

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(SOURCE_NAME, &e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Semantic Scholar API error");
            return Err(SourceError::http_status(SOURCE_NAME, status.as_u16()));
        }

        let body = response
            .json::<AuthorSearchResponse>()
            .await
            .map_err(|e| SourceError::invalid_response(SOURCE_NAME, &e.to_string()))?;

        let Some(author) = body.data.into_iter().next() else {
            debug!("No matching author");
            return Ok(None);
        };

        let profile = map_author(author);
        debug!(
            publications = profile.publications.len(),
            interests = profile.interests.len(),
            "Semantic Scholar profile fetched"
        );
        Ok(Some(profile))
    }
}

// ==================== Mapping Helpers ====================

fn map_author(author: S2Author) -> AuthorProfile {
    let papers = author.papers.unwrap_or_default();

    let interests = collect_fields_of_study(&papers);
    let i10_index = papers
        .iter()
        .filter(|paper| paper.citation_count.unwrap_or(0) >= I10_CITATION_THRESHOLD)
        .count();

    let publications = papers
        .into_iter()
        .map(|paper| Publication {
            title: paper.title.unwrap_or_default(),
            year: paper.year.map(|year| year.to_string()),
            journal: paper.venue.filter(|venue| !venue.trim().is_empty()),
            citations: paper.citation_count,
            abstract_text: paper.abstract_text,
            source: PublicationSource::Profile,
        })
        .collect();

    AuthorProfile {
        name: author.name.unwrap_or_default(),
        affiliation: author
            .affiliations
            .and_then(|affiliations| affiliations.into_iter().find(|a| !a.trim().is_empty())),
        interests,
        citations: author.citation_count,
        h_index: author.h_index,
        i10_index: i64::try_from(i10_index).ok(),
        publications,
    }
}

/// Distinct fields of study across `papers`, in first-seen order.
fn collect_fields_of_study(papers: &[S2Paper]) -> Vec<String> {
    let mut seen = HashSet::new();
    papers
        .iter()
        .filter_map(|paper| paper.fields_of_study.as_ref())
        .flatten()
        .filter(|field| !field.trim().is_empty())
        .filter(|field| seen.insert(field.to_lowercase()))
        .cloned()
        .collect()
}

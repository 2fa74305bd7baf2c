//! Author profile pipeline.
//!
//! Resolves an author name to a stored profile:
//!
//! ```text
//! Lookup ──hit──▶ Found
//!   │
//!  miss
//!   ▼
//! Fetching ─▶ Merging ─▶ Enriching ─▶ Persisting ─▶ Done
//! ```
//!
//! A stored record is returned verbatim without touching either source. On a
//! miss both sources are queried concurrently; an index failure contributes
//! no publications, while a profile failure aborts before anything is
//! written. The re-check before persisting is optimistic: two concurrent
//! first requests for the same author may both insert.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::enrich::enrich_profile;
use crate::keywords::{DEFAULT_MAX_KEYWORDS, KeywordExtractor};
use crate::merge::dedupe_publications;
use crate::model::{AuthorProfile, StoredAuthor};
use crate::sources::{IndexSource, ProfileSource, SourceError};
use crate::store::{RecordStore, StoreError};

/// Pipeline states, logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Lookup,
    Found,
    Fetching,
    Merging,
    Enriching,
    Persisting,
    Done,
}

impl PipelineStage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lookup => "lookup",
            Self::Found => "found",
            Self::Fetching => "fetching",
            Self::Merging => "merging",
            Self::Enriching => "enriching",
            Self::Persisting => "persisting",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the returned record was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Already stored; returned unchanged.
    Found,
    /// Built from the sources and stored under a new id.
    Inserted,
    /// Built from the sources and replaced an existing record in place.
    Updated,
}

/// Result of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    pub author: StoredAuthor,
    pub resolution: Resolution,
}

/// Fatal pipeline failures. Nothing is written when one of these is returned.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The profile source knows no author by this name.
    #[error("no author profile found for '{name}'\n  Suggestion: Check the spelling or try the author's full name")]
    ProfileNotFound {
        /// The queried name
        name: String,
    },

    /// The profile source could not be queried.
    #[error("author profile source failed: {0}")]
    ProfileUnavailable(#[source] SourceError),

    /// The record store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Resolves author names to stored, enriched profiles.
pub struct AuthorPipeline<S> {
    store: S,
    index: Arc<dyn IndexSource>,
    profile: Arc<dyn ProfileSource>,
    extractor: KeywordExtractor,
    max_keywords: usize,
}

impl<S: RecordStore> AuthorPipeline<S> {
    /// Creates a pipeline over an injected store and source pair.
    #[must_use]
    pub fn new(
        store: S,
        index: Arc<dyn IndexSource>,
        profile: Arc<dyn ProfileSource>,
        extractor: KeywordExtractor,
    ) -> Self {
        Self {
            store,
            index,
            profile,
            extractor,
            max_keywords: DEFAULT_MAX_KEYWORDS,
        }
    }

    /// Sets the per-abstract keyword limit used during enrichment.
    #[must_use]
    pub fn with_max_keywords(mut self, max_keywords: usize) -> Self {
        self.max_keywords = max_keywords;
        self
    }

    /// Returns the stored record for `author_name`, building it on a miss.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::ProfileNotFound`] when the profile source has no match
    /// - [`PipelineError::ProfileUnavailable`] when the profile source fails
    /// - [`PipelineError::Store`] when lookup or persistence fails
    #[instrument(skip(self))]
    pub async fn run(&self, author_name: &str) -> Result<PipelineOutcome, PipelineError> {
        enter(PipelineStage::Lookup);
        if let Some(author) = self.store.find_by_name(author_name).await? {
            enter(PipelineStage::Found);
            info!(id = %author.id, "Returning stored author record");
            return Ok(PipelineOutcome {
                author,
                resolution: Resolution::Found,
            });
        }

        enter(PipelineStage::Fetching);
        let (index_result, profile_result) = tokio::join!(
            self.index.fetch_publications(author_name),
            self.profile.fetch_author(author_name)
        );

        let index_publications = match index_result {
            Ok(publications) => publications,
            Err(e) => {
                warn!(source = self.index.name(), error = %e, "Index source failed, continuing without it");
                Vec::new()
            }
        };

        let mut profile = match profile_result {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                warn!(source = self.profile.name(), "Profile source found no author");
                return Err(PipelineError::ProfileNotFound {
                    name: author_name.to_string(),
                });
            }
            Err(e) => return Err(PipelineError::ProfileUnavailable(e)),
        };

        if profile.name.trim().is_empty() {
            profile.name = author_name.to_string();
        }
        info!(
            index_publications = index_publications.len(),
            profile_publications = profile.publications.len(),
            "Sources fetched"
        );

        enter(PipelineStage::Merging);
        let mut combined = index_publications;
        combined.append(&mut profile.publications);
        let deduped = dedupe_publications(combined);

        enter(PipelineStage::Enriching);
        let profile = enrich_profile(profile, deduped, &self.extractor, self.max_keywords);

        enter(PipelineStage::Persisting);
        let outcome = self.persist(author_name, profile).await?;

        enter(PipelineStage::Done);
        info!(
            id = %outcome.author.id,
            resolution = ?outcome.resolution,
            publications = outcome.author.profile.publications.len(),
            interests = outcome.author.profile.interests.len(),
            "Author record stored"
        );
        Ok(outcome)
    }

    async fn persist(
        &self,
        queried_name: &str,
        profile: AuthorProfile,
    ) -> Result<PipelineOutcome, PipelineError> {
        let mut existing = self.store.find_by_name(queried_name).await?;
        if existing.is_none() && profile.name != queried_name {
            existing = self.store.find_by_name(&profile.name).await?;
        }

        let (id, resolution) = match existing {
            Some(stored) => {
                debug!(id = %stored.id, "Record appeared since lookup, replacing");
                self.store.update_by_id(stored.id, &profile).await?;
                (stored.id, Resolution::Updated)
            }
            None => (self.store.insert(&profile).await?, Resolution::Inserted),
        };

        Ok(PipelineOutcome {
            author: StoredAuthor { id, profile },
            resolution,
        })
    }
}

fn enter(stage: PipelineStage) {
    debug!(stage = %stage, "Pipeline stage");
}

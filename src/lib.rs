//! Author Profiler Library
//!
//! Builds enriched author profiles by combining a publication index (DBLP)
//! with an academic profile service (Semantic Scholar), and caches them in a
//! local record store.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`model`] - Author, publication and stored-record types
//! - [`sources`] - HTTP adapters for the index and profile services
//! - [`merge`] - Title normalization and publication deduplication
//! - [`keywords`] - RAKE keyword extraction filtered by interest terms
//! - [`enrich`] - Interest enrichment from abstracts
//! - [`db`] - Database connection and schema management
//! - [`store`] - Author record persistence
//! - [`pipeline`] - Lookup, fetch, merge, enrich and persist orchestration
//! - [`config`] - Config file loading
//! - [`output`] - JSON rendering of stored records

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod db;
pub mod enrich;
pub mod keywords;
pub mod merge;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod sources;
pub mod store;
mod user_agent;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use db::{Database, DatabaseOptions, DbError};
pub use enrich::enrich_profile;
pub use keywords::{DEFAULT_MAX_KEYWORDS, KeywordExtractor};
pub use merge::{dedupe_publications, normalize_title};
pub use model::{AuthorProfile, Publication, PublicationSource, StoreId, StoredAuthor};
pub use output::render_author;
pub use pipeline::{AuthorPipeline, PipelineError, PipelineOutcome, PipelineStage, Resolution};
pub use sources::{IndexSource, ProfileSource, SourceError};
pub use store::{RecordStore, SqliteRecordStore, StoreError};

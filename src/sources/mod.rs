//! External bibliographic source adapters.
//!
//! Two kinds of source feed the pipeline:
//!
//! - [`IndexSource`] - a structured publication index returning minimal
//!   records (title, year, venue). [`DblpSource`] is the default.
//! - [`ProfileSource`] - an academic profile service returning author-level
//!   metadata (affiliation, citation stats, interest terms) and publications
//!   with abstracts. [`SemanticScholarSource`] is the default.
//!
//! Adapters return `Result` rather than swallowing failures; the pipeline
//! decides which failures are recoverable.
//!
//! # Example
//!
//! ```no_run
//! use author_profiler::sources::{DblpSource, HttpTimeouts, IndexSource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dblp = DblpSource::new(HttpTimeouts::default())?;
//! let publications = dblp.fetch_publications("Jane Doe").await?;
//! println!("{} publications", publications.len());
//! # Ok(())
//! # }
//! ```

mod dblp;
mod error;
mod http_client;
mod semantic_scholar;

pub use dblp::DblpSource;
pub use error::SourceError;
pub use http_client::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS, HttpTimeouts,
    build_source_http_client,
};
pub use semantic_scholar::SemanticScholarSource;

use async_trait::async_trait;

use crate::model::{AuthorProfile, Publication};

/// A publication index queried by author name.
///
/// Uses `async_trait` so the pipeline can hold `Arc<dyn IndexSource>` and
/// tests can substitute doubles.
#[async_trait]
pub trait IndexSource: Send + Sync {
    /// Returns the source's label (e.g. "dblp").
    fn name(&self) -> &str;

    /// Fetches the publications listed for `author_name`.
    ///
    /// Every returned publication carries [`crate::model::PublicationSource::Index`].
    async fn fetch_publications(&self, author_name: &str) -> Result<Vec<Publication>, SourceError>;
}

/// An academic profile service queried by author name.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Returns the source's label (e.g. "semantic-scholar").
    fn name(&self) -> &str;

    /// Fetches the best matching author profile, or `None` when the service
    /// knows no such author.
    ///
    /// Publications on the returned profile carry
    /// [`crate::model::PublicationSource::Profile`] and may include abstracts.
    async fn fetch_author(&self, author_name: &str) -> Result<Option<AuthorProfile>, SourceError>;
}

//! Keyword extraction from publication abstracts.
//!
//! This module ranks candidate phrases with the RAKE (Rapid Automatic Keyword
//! Extraction) algorithm and optionally filters them against an author's
//! declared interest terms.

mod extractor;

pub use extractor::{DEFAULT_MAX_KEYWORDS, KeywordExtractor};

use std::collections::HashSet;

use tracing::instrument;

/// Removes repeated keywords, keeping the first occurrence of each.
///
/// Comparison is exact; callers wanting case-folded matching must normalize
/// beforehand.
#[must_use]
#[instrument(skip(keywords), fields(count = keywords.len()))]
pub fn unique_keywords(keywords: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keywords
        .into_iter()
        .filter(|keyword| seen.insert(keyword.clone()))
        .collect()
}

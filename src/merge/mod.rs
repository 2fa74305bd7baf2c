//! Publication merging and deduplication across sources.
//!
//! Both sources frequently report the same work. Entries are matched by
//! normalized title and a deterministic source preference decides which one
//! is kept: profile entries always win over index entries and are never
//! displaced once kept.

mod normalizer;

pub use normalizer::normalize_title;

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::model::{Publication, PublicationSource};

/// Deduplicates a concatenated publication list by normalized title.
///
/// Walks the input in order, remembering the source of the entry currently
/// kept for each normalized title:
/// - unseen title: keep the entry
/// - kept entry came from the index source: remove it and append the incoming
///   entry at its own position
/// - kept entry came from the profile source: discard the incoming entry
///
/// Entries with an empty title are dropped without error. A non-empty title
/// that normalizes to nothing still takes part, under the empty key.
#[must_use]
#[instrument(skip(publications), fields(input = publications.len()))]
pub fn dedupe_publications(publications: Vec<Publication>) -> Vec<Publication> {
    let mut kept_sources: HashMap<String, PublicationSource> = HashMap::new();
    let mut unique: Vec<(String, Publication)> = Vec::with_capacity(publications.len());
    let mut dropped_untitled = 0usize;
    let mut discarded = 0usize;

    for publication in publications {
        if publication.title.is_empty() {
            dropped_untitled += 1;
            continue;
        }
        let key = normalize_title(&publication.title);

        match kept_sources.get(&key) {
            None => {}
            Some(PublicationSource::Index) => {
                unique.retain(|(existing, _)| *existing != key);
            }
            Some(PublicationSource::Profile) => {
                discarded += 1;
                continue;
            }
        }

        kept_sources.insert(key.clone(), publication.source);
        unique.push((key, publication));
    }

    debug!(
        kept = unique.len(),
        discarded,
        dropped_untitled,
        "Deduplicated publications"
    );

    unique
        .into_iter()
        .map(|(_, publication)| publication)
        .collect()
}

//! Keyword extraction using RAKE (Rapid Automatic Keyword Extraction) algorithm.

use rake::{Rake, StopWords};
use stop_words::{LANGUAGE, get};
use tracing::instrument;

/// Default maximum number of keywords returned per text.
pub const DEFAULT_MAX_KEYWORDS: usize = 10;

/// Keyword extractor using RAKE for ranking candidate phrases from text.
pub struct KeywordExtractor {
    /// Cached RAKE instance with pre-built English stop words.
    rake: Rake,
}

impl std::fmt::Debug for KeywordExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordExtractor").finish()
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    /// Creates a new keyword extractor with English stop words.
    #[must_use]
    #[instrument]
    pub fn new() -> Self {
        let raw_stop_words = get(LANGUAGE::English);
        let mut sw = StopWords::new();
        for word in raw_stop_words {
            sw.insert(word);
        }
        Self {
            rake: Rake::new(sw),
        }
    }

    /// Returns every RAKE phrase for `text`, highest score first.
    #[must_use]
    #[instrument(skip(self, text), fields(len = text.len()))]
    pub fn ranked_phrases(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let mut scored = self.rake.run(text);
        // Equal scores fall back to lexical order so output is stable across calls.
        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.keyword.cmp(&b.keyword))
        });
        scored
            .into_iter()
            .map(|keyword_score| keyword_score.keyword)
            .collect()
    }

    /// Extracts up to `max_keywords` ranked phrases from `text`.
    ///
    /// When `interest_terms` is non-empty, only phrases containing at least one
    /// term (case-insensitive substring match) pass; ranked order is kept among
    /// the passing phrases. An empty term list lets every phrase through.
    ///
    /// # Arguments
    /// * `text` - Free text, typically a publication abstract
    /// * `max_keywords` - Upper bound on the number of returned phrases
    /// * `interest_terms` - Optional whitelist of research interest terms
    #[must_use]
    #[instrument(skip(self, text, interest_terms), fields(terms = interest_terms.len()))]
    pub fn extract(&self, text: &str, max_keywords: usize, interest_terms: &[String]) -> Vec<String> {
        let ranked = self.ranked_phrases(text);
        if interest_terms.is_empty() {
            return ranked.into_iter().take(max_keywords).collect();
        }

        let lowered_terms: Vec<String> = interest_terms
            .iter()
            .map(|term| term.to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();

        ranked
            .into_iter()
            .filter(|phrase| matches_any_term(phrase, &lowered_terms))
            .take(max_keywords)
            .collect()
    }
}

/// Returns true if `phrase` contains any of the (already lowercased) terms.
fn matches_any_term(phrase: &str, lowered_terms: &[String]) -> bool {
    let lowered_phrase = phrase.to_lowercase();
    lowered_terms
        .iter()
        .any(|term| lowered_phrase.contains(term.as_str()))
}

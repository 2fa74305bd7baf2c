//! Profile enrichment from publication abstracts.
//!
//! Abstracts are consumed here: keywords matching the author's declared
//! interests are appended to the interest list and every abstract is stripped
//! before the record is stored.

use tracing::{debug, instrument};

use crate::keywords::{KeywordExtractor, unique_keywords};
use crate::model::{AuthorProfile, Publication};

/// Enriches `profile` with keywords from the abstracts of `publications`.
///
/// For each publication with a non-blank abstract, up to `max_keywords` phrases
/// are extracted, filtered by the interest terms the profile had before
/// enrichment. Each publication's keywords are deduplicated on their own and
/// appended to a combined pool; the same keyword from two publications
/// appears twice. The pool is appended to `profile.interests` in order.
///
/// The returned profile's publications are `publications` with every abstract
/// removed.
#[must_use]
#[instrument(
    skip(profile, publications, extractor),
    fields(author = %profile.name, publications = publications.len())
)]
pub fn enrich_profile(
    mut profile: AuthorProfile,
    publications: Vec<Publication>,
    extractor: &KeywordExtractor,
    max_keywords: usize,
) -> AuthorProfile {
    let mut keyword_pool = Vec::new();
    let mut stripped = Vec::with_capacity(publications.len());

    for mut publication in publications {
        if let Some(abstract_text) = publication.abstract_text.take()
            && !abstract_text.trim().is_empty()
        {
            let keywords = extractor.extract(&abstract_text, max_keywords, &profile.interests);
            keyword_pool.extend(unique_keywords(keywords));
        }
        stripped.push(publication);
    }

    debug!(
        keywords = keyword_pool.len(),
        declared_interests = profile.interests.len(),
        "Appending abstract keywords to interests"
    );

    profile.interests.extend(keyword_pool);
    profile.publications = stripped;
    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::DEFAULT_MAX_KEYWORDS;
    use crate::model::PublicationSource;

    fn profile_with_interests(interests: &[&str]) -> AuthorProfile {
        let mut profile = AuthorProfile::new("Jane Doe");
        profile.interests = interests.iter().map(ToString::to_string).collect();
        profile
    }

    #[test]
    fn test_enrich_appends_matching_keywords_after_declared_interests() {
        let extractor = KeywordExtractor::new();
        let profile = profile_with_interests(&["privacy"]);
        let publications = vec![
            Publication::new("Private FL", PublicationSource::Profile)
                .with_abstract("We study federated learning and privacy"),
        ];

        let enriched = enrich_profile(profile, publications, &extractor, DEFAULT_MAX_KEYWORDS);

        assert_eq!(enriched.interests[0], "privacy");
        assert!(enriched.interests.len() > 1, "got {:?}", enriched.interests);
        assert!(
            enriched.interests[1..]
                .iter()
                .all(|k| k.to_lowercase().contains("privacy"))
        );
    }

    #[test]
    fn test_enrich_strips_every_abstract() {
        let extractor = KeywordExtractor::new();
        let publications = vec![
            Publication::new("A", PublicationSource::Profile).with_abstract("Graph learning"),
            Publication::new("B", PublicationSource::Index),
            Publication::new("C", PublicationSource::Profile).with_abstract(""),
        ];

        let enriched = enrich_profile(
            profile_with_interests(&[]),
            publications,
            &extractor,
            DEFAULT_MAX_KEYWORDS,
        );

        assert_eq!(enriched.publications.len(), 3);
        assert!(enriched.publications.iter().all(|p| p.abstract_text.is_none()));
    }

    #[test]
    fn test_enrich_skips_blank_abstracts() {
        let extractor = KeywordExtractor::new();
        let publications = vec![
            Publication::new("A", PublicationSource::Profile).with_abstract("   "),
            Publication::new("B", PublicationSource::Profile).with_abstract(""),
        ];

        let enriched = enrich_profile(profile_with_interests(&[]), publications, &extractor, 5);

        assert!(enriched.interests.is_empty());
    }

    #[test]
    fn test_enrich_treats_unknown_marker_abstract_as_text() {
        let extractor = KeywordExtractor::new();
        let expected = unique_keywords(extractor.extract("N/A", DEFAULT_MAX_KEYWORDS, &[]));
        let publications =
            vec![Publication::new("A", PublicationSource::Profile).with_abstract("N/A")];

        let enriched = enrich_profile(
            profile_with_interests(&[]),
            publications,
            &extractor,
            DEFAULT_MAX_KEYWORDS,
        );

        assert_eq!(enriched.interests, expected);
        assert!(enriched.publications[0].abstract_text.is_none());
    }

    #[test]
    fn test_enrich_keeps_cross_publication_duplicates() {
        let extractor = KeywordExtractor::new();
        let abstract_text = "Differential privacy";
        let publications = vec![
            Publication::new("A", PublicationSource::Profile).with_abstract(abstract_text),
            Publication::new("B", PublicationSource::Profile).with_abstract(abstract_text),
        ];

        let enriched = enrich_profile(
            profile_with_interests(&["privacy"]),
            publications,
            &extractor,
            DEFAULT_MAX_KEYWORDS,
        );

        let appended = &enriched.interests[1..];
        assert!(!appended.is_empty());
        assert_eq!(appended.len() % 2, 0, "both publications contribute: {appended:?}");
        let half = appended.len() / 2;
        assert_eq!(appended[..half], appended[half..]);
    }

    #[test]
    fn test_enrich_without_interests_takes_all_phrases() {
        let extractor = KeywordExtractor::new();
        let publications = vec![
            Publication::new("A", PublicationSource::Profile)
                .with_abstract("Quantum error correction for superconducting qubits"),
        ];

        let enriched = enrich_profile(profile_with_interests(&[]), publications, &extractor, 2);

        assert!(!enriched.interests.is_empty());
        assert!(enriched.interests.len() <= 2);
    }

    #[test]
    fn test_enrich_filters_with_declared_interests_only() {
        let extractor = KeywordExtractor::new();
        // The first abstract yields "privacy" phrases; if they were used as filter terms
        // for the second abstract, unrelated phrases containing them would slip in.
        let publications = vec![
            Publication::new("A", PublicationSource::Profile)
                .with_abstract("Differential privacy budgets"),
            Publication::new("B", PublicationSource::Profile)
                .with_abstract("Differential equations in fluid dynamics"),
        ];

        let enriched = enrich_profile(
            profile_with_interests(&["privacy"]),
            publications,
            &extractor,
            DEFAULT_MAX_KEYWORDS,
        );

        assert!(
            enriched
                .interests
                .iter()
                .all(|k| k.to_lowercase().contains("privacy")),
            "got {:?}",
            enriched.interests
        );
    }

    #[test]
    fn test_enrich_preserves_aggregate_fields() {
        let extractor = KeywordExtractor::new();
        let mut profile = profile_with_interests(&[]);
        profile.affiliation = Some("Example University".to_string());
        profile.h_index = Some(12);

        let enriched = enrich_profile(profile, Vec::new(), &extractor, DEFAULT_MAX_KEYWORDS);

        assert_eq!(enriched.affiliation.as_deref(), Some("Example University"));
        assert_eq!(enriched.h_index, Some(12));
        assert_eq!(enriched.citations, None);
        assert!(enriched.publications.is_empty());
    }
}

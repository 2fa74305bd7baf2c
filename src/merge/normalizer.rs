//! Title normalization for publication deduplication.

/// Normalizes a publication title into its deduplication key.
///
/// Every character that is not an ASCII letter or digit is removed and the
/// remainder is lowercased, so titles differing only by punctuation, spacing
/// or case produce the same key. An empty title yields an empty key.
#[must_use]
pub fn normalize_title(title: &str) -> String {
    title
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title_strips_punctuation_and_case() {
        assert_eq!(
            normalize_title("Deep Learning: A Survey!"),
            normalize_title("deeplearningasurvey")
        );
        assert_eq!(normalize_title("Deep Learning: A Survey!"), "deeplearningasurvey");
    }

    #[test]
    fn test_normalize_title_collapses_separators() {
        assert_eq!(
            normalize_title("Graph Neural Networks"),
            normalize_title("graph-neural-networks")
        );
        assert_eq!(normalize_title("  Graph\tNeural_Networks. "), "graphneuralnetworks");
    }

    #[test]
    fn test_normalize_title_keeps_digits() {
        assert_eq!(normalize_title("BERT 2.0 (v3)"), "bert20v3");
    }

    #[test]
    fn test_normalize_title_drops_non_ascii_letters() {
        assert_eq!(normalize_title("Über Café"), "bercaf");
    }

    #[test]
    fn test_normalize_title_empty_input_returns_empty() {
        assert_eq!(normalize_title(""), "");
        assert_eq!(normalize_title(" .,;:!? "), "");
    }

    #[test]
    fn test_normalize_title_is_idempotent() {
        let samples = [
            "Deep Learning: A Survey!",
            "Über Café",
            "",
            "already normalized 123",
        ];
        for sample in samples {
            let once = normalize_title(sample);
            assert_eq!(normalize_title(&once), once, "not idempotent for {sample:?}");
        }
    }
}

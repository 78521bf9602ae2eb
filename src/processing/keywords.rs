//! Keyword overlap between the reference and each document

use crate::processing::text_processor::TextNormalizer;
use std::collections::BTreeSet;

/// Presence-based matching: the tokens a document shares with the reference
#[derive(Debug, Clone, Default)]
pub struct KeywordMatcher {
    normalizer: TextNormalizer,
}

impl KeywordMatcher {
    pub fn new(normalizer: TextNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn reference_keywords(&self, reference: &str) -> BTreeSet<String> {
        self.normalizer.token_set(reference)
    }

    /// Tokens of `document` that also occur in `reference_keywords`
    pub fn matches(&self, reference_keywords: &BTreeSet<String>, document: &str) -> BTreeSet<String> {
        self.matches_normalized(reference_keywords, &self.normalizer.normalize(document))
    }

    /// Like [`matches`](Self::matches) for text this matcher's normalizer already produced
    pub fn matches_normalized(&self, reference_keywords: &BTreeSet<String>, normalized: &str) -> BTreeSet<String> {
        normalized
            .split_whitespace()
            .filter(|token| reference_keywords.contains(*token))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::stop_words::StopWords;
    use std::sync::Arc;

    fn matcher() -> KeywordMatcher {
        KeywordMatcher::new(TextNormalizer::with_stop_words(Arc::new(StopWords::from_words(["and", "with"]))))
    }

    #[test]
    fn test_intersection() {
        let matcher = matcher();
        let reference = matcher.reference_keywords("Rust engineer with Kafka and Postgres");
        let matched = matcher.matches(&reference, "Postgres DBA, some RUST, no streaming. Rust!");

        assert_eq!(matched.into_iter().collect::<Vec<_>>(), vec!["postgres", "rust"]);
    }

    #[test]
    fn test_matches_are_subset_of_reference() {
        let matcher = matcher();
        let reference = matcher.reference_keywords("distributed systems engineer");
        let matched = matcher.matches(&reference, "Engineer of distributed ledgers, systems and more");

        assert!(matched.is_subset(&reference));
        assert_eq!(matched.len(), 3);
    }

    #[test]
    fn test_normalized_text_matches_like_raw_text() {
        let matcher = matcher();
        let reference = matcher.reference_keywords("Rust engineer with Kafka and Postgres");
        let raw = "Postgres DBA, some RUST, no streaming. Rust!";
        let normalized = matcher.normalizer.normalize(raw);

        assert_eq!(matcher.matches_normalized(&reference, &normalized), matcher.matches(&reference, raw));
    }

    #[test]
    fn test_empty_document_has_no_matches() {
        let matcher = matcher();
        let reference = matcher.reference_keywords("rust");
        assert!(matcher.matches(&reference, "").is_empty());
    }
}

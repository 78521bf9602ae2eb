//! Relevance scoring of documents against a reference text

use crate::processing::tfidf::{cosine_similarity, TfIdfVectorizer};
use log::debug;
use serde::{Deserialize, Serialize};

/// Similarity of one document to the reference, rounded to two decimals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub id: String,
    pub score: f64,
}

/// Scores for one batch, aligned with the input order
#[derive(Debug, Clone, PartialEq)]
pub struct RelevanceScores {
    pub scores: Vec<f64>,
    pub vocabulary_size: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RelevanceScorer {
    vectorizer: TfIdfVectorizer,
}

impl RelevanceScorer {
    pub fn new(max_features: usize) -> Self {
        Self {
            vectorizer: TfIdfVectorizer::new(max_features),
        }
    }

    /// Fit the term weights on `[reference, documents...]` and compare the
    /// reference row with each document row.
    ///
    /// The fit is redone on every call. Scores from different calls are not
    /// comparable with each other.
    pub fn score<S: AsRef<str>>(&self, reference: &str, documents: &[S]) -> RelevanceScores {
        let mut corpus: Vec<&str> = Vec::with_capacity(documents.len() + 1);
        corpus.push(reference);
        corpus.extend(documents.iter().map(|d| d.as_ref()));

        let matrix = self.vectorizer.fit_transform(&corpus);
        if matrix.is_empty_vocabulary() {
            debug!("Empty vocabulary across {} texts; all scores are zero", corpus.len());
            return RelevanceScores {
                scores: vec![0.0; documents.len()],
                vocabulary_size: 0,
            };
        }

        let reference_row = &matrix.rows[0];
        let scores = matrix.rows[1..]
            .iter()
            .map(|row| round_score(cosine_similarity(reference_row, row)))
            .collect();

        debug!(
            "Scored {} documents over a vocabulary of {} terms",
            documents.len(),
            matrix.vocabulary.len()
        );

        RelevanceScores {
            scores,
            vocabulary_size: matrix.vocabulary.len(),
        }
    }
}

/// Clamp into [0, 1] and round to two decimals, ties to even
pub fn round_score(score: f64) -> f64 {
    // adding 0.0 turns -0.0 into 0.0
    (score.clamp(0.0, 1.0) * 100.0).round_ties_even() / 100.0 + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_document_scores_one() {
        let reference = "senior backend engineer distributed systems experience";
        let scores = RelevanceScorer::default().score(reference, &[reference, "frontend designer"]);

        assert_eq!(scores.scores, vec![1.0, 0.0]);
    }

    #[test]
    fn test_disjoint_vocabulary_scores_zero() {
        let scores = RelevanceScorer::default().score("rust tokio axum", &["watercolor painting"]);
        assert_eq!(scores.scores, vec![0.0]);
    }

    #[test]
    fn test_partial_overlap_is_between_bounds() {
        let scores = RelevanceScorer::default().score(
            "rust tokio postgres kubernetes",
            &["rust postgres java spring", "rust tokio postgres kubernetes aws"],
        );

        for score in &scores.scores {
            assert!(*score > 0.0 && *score < 1.0);
        }
        assert!(scores.scores[1] > scores.scores[0]);
    }

    #[test]
    fn test_empty_documents_score_zero() {
        let scores = RelevanceScorer::default().score("rust engineer", &["", "rust"]);
        assert_eq!(scores.scores[0], 0.0);
        assert!(scores.scores[1] > 0.0);
    }

    #[test]
    fn test_empty_corpus_falls_back_to_zero() {
        let scores = RelevanceScorer::default().score("", &["", ""]);
        assert_eq!(scores.scores, vec![0.0, 0.0]);
        assert_eq!(scores.vocabulary_size, 0);
    }

    #[test]
    fn test_scores_aligned_with_input() {
        let documents: Vec<String> = Vec::new();
        assert!(RelevanceScorer::default().score("rust", &documents).scores.is_empty());
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(0.8349), 0.83);
        assert_eq!(round_score(0.999999), 1.0);
        assert_eq!(round_score(1.0000002), 1.0);
        assert_eq!(round_score(-0.0), 0.0);
    }

    #[test]
    fn test_round_score_ties_to_even() {
        // 0.125 and 0.375 are exact in binary, so these are true ties
        assert_eq!(round_score(0.125), 0.12);
        assert_eq!(round_score(0.375), 0.38);
    }
}

//! TF-IDF vectorization over a single batch
//!
//! The model is fitted on the corpus it transforms and then thrown away.
//! Weights depend on every text in the batch, so vectors (and any scores
//! derived from them) are only comparable within one fit.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};

/// Terms are runs of two or more word characters
static TERM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("Invalid term regex"));

pub const DEFAULT_MAX_FEATURES: usize = 1000;

/// Sparse row: `(term index, weight)` pairs sorted by term index
pub type SparseVector = Vec<(usize, f64)>;

#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    max_features: usize,
}

/// Result of fitting and transforming one corpus
#[derive(Debug, Clone, PartialEq)]
pub struct TfIdfMatrix {
    /// Vocabulary in index order (lexicographic)
    pub vocabulary: Vec<String>,
    /// Smoothed idf per vocabulary term
    pub idf: Vec<f64>,
    /// One L2-normalized row per input text
    pub rows: Vec<SparseVector>,
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FEATURES)
    }
}

impl TfIdfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self {
            max_features: max_features.max(1),
        }
    }

    pub fn max_features(&self) -> usize {
        self.max_features
    }

    pub fn fit_transform<S: AsRef<str>>(&self, corpus: &[S]) -> TfIdfMatrix {
        let counts: Vec<HashMap<String, usize>> = corpus.iter().map(|text| Self::term_counts(text.as_ref())).collect();

        let mut totals: HashMap<&str, usize> = HashMap::new();
        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        for doc in &counts {
            for (term, count) in doc {
                *totals.entry(term.as_str()).or_insert(0) += count;
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        // Keep the most frequent terms; ties go to the lexicographically smaller term
        let mut ranked: Vec<(&str, usize)> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features);

        let mut vocabulary: Vec<String> = ranked.into_iter().map(|(term, _)| term.to_string()).collect();
        vocabulary.sort();

        let index: HashMap<&str, usize> = vocabulary.iter().enumerate().map(|(i, term)| (term.as_str(), i)).collect();

        let n = corpus.len() as f64;
        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|term| {
                let df = document_frequency.get(term.as_str()).copied().unwrap_or(0) as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let rows = counts
            .iter()
            .map(|doc| {
                let mut row: SparseVector = doc
                    .iter()
                    .filter_map(|(term, &count)| index.get(term.as_str()).map(|&i| (i, count as f64 * idf[i])))
                    .collect();
                row.sort_by_key(|&(i, _)| i);
                l2_normalize(&mut row);
                row
            })
            .collect();

        TfIdfMatrix { vocabulary, idf, rows }
    }

    fn term_counts(text: &str) -> HashMap<String, usize> {
        let lowered = text.to_lowercase();
        let mut counts = HashMap::new();
        for term in TERM.find_iter(&lowered) {
            *counts.entry(term.as_str().to_string()).or_insert(0) += 1;
        }
        counts
    }
}

impl TfIdfMatrix {
    pub fn is_empty_vocabulary(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// Dense view of one row, mostly useful for inspection
    pub fn term_weights(&self, row: usize) -> BTreeMap<&str, f64> {
        self.rows
            .get(row)
            .map(|r| r.iter().map(|&(i, w)| (self.vocabulary[i].as_str(), w)).collect())
            .unwrap_or_default()
    }
}

fn l2_normalize(row: &mut SparseVector) {
    let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, w) in row.iter_mut() {
            *w /= norm;
        }
    }
}

/// Cosine similarity of two sparse rows; 0.0 when either is a zero vector
pub fn cosine_similarity(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let norm_a = a.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let (mut i, mut j, mut dot) = (0, 0, 0.0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }

    dot / (norm_a * norm_b)
}

//! Text normalization

use crate::processing::stop_words::StopWords;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("Invalid punctuation regex"));

/// Lowercases, strips punctuation, tokenizes and drops stop words and
/// non-alphabetic tokens.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    stop_words: Arc<StopWords>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self::with_stop_words(StopWords::english())
    }

    pub fn with_stop_words(stop_words: Arc<StopWords>) -> Self {
        Self { stop_words }
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Normalized tokens joined by single spaces
    pub fn normalize(&self, text: &str) -> String {
        self.tokens(text).join(" ")
    }

    pub fn tokens(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let stripped = NON_WORD.replace_all(&lowered, "");

        stripped
            .unicode_words()
            .filter(|word| word.chars().all(char::is_alphabetic))
            .filter(|word| !self.stop_words.contains(word))
            .map(str::to_string)
            .collect()
    }

    pub fn token_set(&self, text: &str) -> BTreeSet<String> {
        self.tokens(text).into_iter().collect()
    }
}

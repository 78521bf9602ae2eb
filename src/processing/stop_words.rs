//! Read-only stop-word sets

use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::Arc;

static ENGLISH: Lazy<Arc<StopWords>> = Lazy::new(|| {
    let words: Vec<String> = stop_words::get(stop_words::LANGUAGE::English);
    Arc::new(StopWords::from_words(words))
});

/// An immutable set of lowercase stop words.
///
/// The English default is built once per process and shared; normalizers hold
/// it behind an `Arc`, so a smaller set can be injected where needed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| w.as_ref().trim().to_lowercase()).collect(),
        }
    }

    /// The process-wide English list
    pub fn english() -> Arc<StopWords> {
        Arc::clone(&ENGLISH)
    }

    /// English list plus `extra`; shares the default set when `extra` is empty
    pub fn english_with<S: AsRef<str>>(extra: &[S]) -> Arc<StopWords> {
        if extra.is_empty() {
            return Self::english();
        }

        let mut words = ENGLISH.words.clone();
        words.extend(extra.iter().map(|w| w.as_ref().trim().to_lowercase()));
        Arc::new(Self { words })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_list_is_shared() {
        let a = StopWords::english();
        let b = StopWords::english();

        assert!(Arc::ptr_eq(&a, &b));
        assert!(a.contains("the"));
        assert!(a.contains("and"));
        assert!(!a.contains("rust"));
    }

    #[test]
    fn test_from_words_lowercases() {
        let words = StopWords::from_words(["The", " AND "]);
        assert!(words.contains("the"));
        assert!(words.contains("and"));
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn test_english_with_extra() {
        let words = StopWords::english_with(&["Resume"]);
        assert!(words.contains("resume"));
        assert!(words.contains("the"));
        assert!(!StopWords::english().contains("resume"));
    }
}

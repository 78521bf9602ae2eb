//! Text processing and analysis module

pub mod analyzer;
pub mod document;
pub mod experience;
pub mod keywords;
pub mod scorer;
pub mod sentiment;
pub mod stop_words;
pub mod text_processor;
pub mod tfidf;

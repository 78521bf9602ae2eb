//! Input processing module
//! Handles format detection, text extraction and fail-soft loading

pub mod file_detector;
pub mod loader;
pub mod manager;
pub mod text_extractor;

pub use file_detector::DocumentFormat;
pub use loader::{DocumentLoader, DocumentSource, Extraction, SourceContent};

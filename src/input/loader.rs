//! Fail-soft document loading
//!
//! A bad document never aborts a batch: every fault is captured as
//! [`Extraction::Failed`] and reads as empty text downstream.

use crate::error::{Result, ResumeMatcherError};
use crate::input::file_detector::DocumentFormat;
use crate::input::text_extractor::{DocxExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the bytes of a source document come from
#[derive(Debug, Clone, PartialEq)]
pub enum SourceContent {
    Bytes(Vec<u8>),
    Path(PathBuf),
}

/// One input document: identity, content and declared format
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSource {
    pub id: String,
    pub content: SourceContent,
    pub format: DocumentFormat,
}

impl DocumentSource {
    pub fn from_bytes(id: impl Into<String>, bytes: Vec<u8>, format: DocumentFormat) -> Self {
        Self {
            id: id.into(),
            content: SourceContent::Bytes(bytes),
            format,
        }
    }

    pub fn from_text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::from_bytes(id, text.into().into_bytes(), DocumentFormat::PlainText)
    }

    /// Identity is the file name; format is inferred from the extension
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self {
            id: source_id(path),
            content: SourceContent::Path(path.to_path_buf()),
            format: DocumentFormat::from_path(path),
        }
    }
}

/// File name of a path, falling back to the full path when there is none
pub fn source_id(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Outcome of extracting text from one source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Extraction {
    Extracted { text: String },
    Failed { reason: String },
}

impl Extraction {
    pub fn text(&self) -> &str {
        match self {
            Extraction::Extracted { text } => text,
            Extraction::Failed { .. } => "",
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Extraction::Extracted { text } => text,
            Extraction::Failed { .. } => String::new(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Extraction::Failed { .. })
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentLoader;

impl DocumentLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, source: &DocumentSource) -> Extraction {
        match self.try_load(source) {
            Ok(text) => {
                debug!("Extracted {} characters from {}", text.chars().count(), source.id);
                Extraction::Extracted { text }
            }
            Err(e) => {
                warn!("Could not extract text from {}: {}", source.id, e);
                Extraction::Failed { reason: e.to_string() }
            }
        }
    }

    fn try_load(&self, source: &DocumentSource) -> Result<String> {
        let extractor: &dyn TextExtractor = match source.format {
            DocumentFormat::PlainText => &PlainTextExtractor,
            DocumentFormat::Paragraphs => &DocxExtractor,
            DocumentFormat::Pages => &PdfExtractor,
            DocumentFormat::Unknown => {
                return Err(ResumeMatcherError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    source.id
                )));
            }
        };

        match &source.content {
            SourceContent::Bytes(bytes) => extractor.extract(bytes),
            SourceContent::Path(path) => extractor.extract(&std::fs::read(path)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_plain_text_source() {
        let source = DocumentSource::from_text("jane.txt", "Senior Rust engineer");
        let extraction = DocumentLoader::new().load(&source);

        assert!(!extraction.is_failure());
        assert_eq!(extraction.text(), "Senior Rust engineer");
    }

    #[test]
    fn test_unknown_format_fails_soft() {
        let source = DocumentSource::from_bytes("jane.csv", b"name,skills".to_vec(), DocumentFormat::Unknown);
        let extraction = DocumentLoader::new().load(&source);

        assert!(extraction.is_failure());
        assert_eq!(extraction.into_text(), "");
    }

    #[test]
    fn test_malformed_container_fails_soft() {
        let source = DocumentSource::from_bytes("broken.docx", b"garbage".to_vec(), DocumentFormat::Paragraphs);
        let extraction = DocumentLoader::new().load(&source);

        assert!(extraction.is_failure());
        assert_eq!(extraction.text(), "");
    }

    #[test]
    fn test_path_source() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("john.txt");
        std::fs::write(&path, "Backend developer since 2015").unwrap();

        let source = DocumentSource::from_path(&path);
        assert_eq!(source.id, "john.txt");
        assert_eq!(source.format, DocumentFormat::PlainText);
        assert_eq!(DocumentLoader::new().load(&source).text(), "Backend developer since 2015");
    }

    #[test]
    fn test_missing_path_fails_soft() {
        let source = DocumentSource::from_path("/definitely/not/here.txt");
        assert!(DocumentLoader::new().load(&source).is_failure());
    }
}

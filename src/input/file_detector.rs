//! Document format detection

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container format of a source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentFormat {
    /// UTF-8 text, decoded verbatim
    PlainText,
    /// Paragraph-structured container (DOCX)
    Paragraphs,
    /// Page-structured container (PDF)
    Pages,
    Unknown,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" => DocumentFormat::PlainText,
            "docx" => DocumentFormat::Paragraphs,
            "pdf" => DocumentFormat::Pages,
            _ => DocumentFormat::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(DocumentFormat::Unknown)
    }

    pub fn supported_extensions() -> &'static [&'static str] {
        &["txt", "docx", "pdf"]
    }
}

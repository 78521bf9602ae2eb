//! Loaded documents

use crate::input::loader::{DocumentLoader, DocumentSource, Extraction};
use crate::processing::text_processor::TextNormalizer;
use serde::{Deserialize, Serialize};

/// A candidate document after loading: raw text plus its normalized form.
/// Immutable for the rest of the analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub raw_text: String,
    pub normalized: String,
    pub extraction: ExtractionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractionStatus {
    Extracted,
    Failed { reason: String },
}

/// The outcome of an extraction without its text
impl From<&Extraction> for ExtractionStatus {
    fn from(extraction: &Extraction) -> Self {
        match extraction {
            Extraction::Extracted { .. } => ExtractionStatus::Extracted,
            Extraction::Failed { reason } => ExtractionStatus::Failed { reason: reason.clone() },
        }
    }
}

impl Document {
    pub fn load(source: &DocumentSource, loader: &DocumentLoader, normalizer: &TextNormalizer) -> Self {
        let outcome = loader.load(source);
        let extraction = ExtractionStatus::from(&outcome);
        let raw_text = outcome.into_text();
        let normalized = normalizer.normalize(&raw_text);

        Self {
            id: source.id.clone(),
            raw_text,
            normalized,
            extraction,
        }
    }

    pub fn is_extraction_failure(&self) -> bool {
        matches!(self.extraction, ExtractionStatus::Failed { .. })
    }
}

/// The job description, normalized with the same pipeline as the documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceText {
    pub raw_text: String,
    pub normalized: String,
}

impl ReferenceText {
    pub fn new(raw_text: impl Into<String>, normalizer: &TextNormalizer) -> Self {
        let raw_text = raw_text.into();
        let normalized = normalizer.normalize(&raw_text);
        Self { raw_text, normalized }
    }
}

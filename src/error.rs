//! Error handling for the resume matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeMatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("Text decoding error: {0}")]
    TextDecoding(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeMatcherError>;

impl From<zip::result::ZipError> for ResumeMatcherError {
    fn from(err: zip::result::ZipError) -> Self {
        ResumeMatcherError::DocxExtraction(err.to_string())
    }
}

impl From<quick_xml::Error> for ResumeMatcherError {
    fn from(err: quick_xml::Error) -> Self {
        ResumeMatcherError::DocxExtraction(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for ResumeMatcherError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        ResumeMatcherError::DocxExtraction(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for ResumeMatcherError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ResumeMatcherError::TextDecoding(err.to_string())
    }
}

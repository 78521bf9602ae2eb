//! Resume matcher library
//!
//! Ranks resumes against a job description by TF-IDF cosine similarity and
//! reports matched keywords, sentiment polarity and an experience estimate for
//! each resume. Term weights are fitted per batch, so scores are only
//! comparable within the batch that produced them.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{Result, ResumeMatcherError};
pub use input::{DocumentFormat, DocumentSource};
pub use output::MatchReport;
pub use processing::analyzer::AnalysisEngine;

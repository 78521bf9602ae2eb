//! Analysis engine: runs the four per-document analyses over a batch

use crate::config::Config;
use crate::error::{Result, ResumeMatcherError};
use crate::input::loader::{DocumentLoader, DocumentSource};
use crate::processing::document::{Document, ExtractionStatus, ReferenceText};
use crate::processing::experience::{estimate_experience, ExperienceEstimate};
use crate::processing::keywords::KeywordMatcher;
use crate::processing::scorer::{RelevanceScorer, SimilarityResult};
use crate::processing::sentiment::{SentimentBands, SentimentEstimator, VaderScorer};
use crate::processing::stop_words::StopWords;
use crate::processing::text_processor::TextNormalizer;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::time::Instant;

/// Coordinates loading, normalization and the four analyses.
///
/// Holds no per-batch state, so one engine can serve concurrent callers.
pub struct AnalysisEngine {
    loader: DocumentLoader,
    normalizer: TextNormalizer,
    scorer: RelevanceScorer,
    keyword_matcher: KeywordMatcher,
    sentiment: SentimentEstimator,
}

/// Raw results of analyzing one batch, keyed by document id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchAnalysis {
    /// Document ids in input order
    pub document_ids: Vec<String>,
    pub extraction: BTreeMap<String, ExtractionStatus>,
    pub similarities: Vec<SimilarityResult>,
    pub keywords: BTreeMap<String, BTreeSet<String>>,
    pub sentiment: BTreeMap<String, f64>,
    pub experience: BTreeMap<String, ExperienceEstimate>,
    pub reference_keywords: BTreeSet<String>,
    pub vocabulary_size: usize,
    pub processing_time_ms: u64,
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::with_components(TextNormalizer::new(), RelevanceScorer::default(), SentimentEstimator::default())
    }
}

impl AnalysisEngine {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let normalizer =
            TextNormalizer::with_stop_words(StopWords::english_with(&config.processing.extra_stop_words));
        let bands = SentimentBands {
            positive: config.sentiment.positive_threshold,
            negative: config.sentiment.negative_threshold,
        };

        Ok(Self::with_components(
            normalizer,
            RelevanceScorer::new(config.processing.max_features),
            SentimentEstimator::new(Box::new(VaderScorer), bands),
        ))
    }

    pub fn with_components(normalizer: TextNormalizer, scorer: RelevanceScorer, sentiment: SentimentEstimator) -> Self {
        Self {
            loader: DocumentLoader::new(),
            keyword_matcher: KeywordMatcher::new(normalizer.clone()),
            normalizer,
            scorer,
            sentiment,
        }
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    pub fn sentiment_bands(&self) -> SentimentBands {
        self.sentiment.bands()
    }

    pub fn load_documents(&self, sources: &[DocumentSource]) -> Vec<Document> {
        sources
            .iter()
            .map(|source| Document::load(source, &self.loader, &self.normalizer))
            .collect()
    }

    /// One rounded similarity score per document, in input order
    pub fn score_against_reference(&self, sources: &[DocumentSource], reference: &str) -> Result<Vec<SimilarityResult>> {
        ensure_unique_ids(sources)?;
        let documents = self.load_documents(sources);
        let reference = ReferenceText::new(reference, &self.normalizer);
        let (similarities, _) = self.similarities(&documents, &reference);
        ensure_covers(&documents, similarities.iter().map(|s| s.id.as_str()), "similarity")?;
        Ok(similarities)
    }

    pub fn match_keywords(
        &self,
        sources: &[DocumentSource],
        reference: &str,
    ) -> Result<BTreeMap<String, BTreeSet<String>>> {
        ensure_unique_ids(sources)?;
        let documents = self.load_documents(sources);
        let reference_keywords = self.keyword_matcher.reference_keywords(reference);
        let keywords = self.keywords(&documents, &reference_keywords);
        ensure_covers(&documents, keywords.keys().map(String::as_str), "keyword")?;
        Ok(keywords)
    }

    pub fn estimate_sentiment(&self, sources: &[DocumentSource]) -> Result<BTreeMap<String, f64>> {
        ensure_unique_ids(sources)?;
        let documents = self.load_documents(sources);
        let sentiment = self.sentiment_scores(&documents);
        ensure_covers(&documents, sentiment.keys().map(String::as_str), "sentiment")?;
        Ok(sentiment)
    }

    pub fn estimate_experience(&self, sources: &[DocumentSource]) -> Result<BTreeMap<String, ExperienceEstimate>> {
        ensure_unique_ids(sources)?;
        let documents = self.load_documents(sources);
        let experience = self.experience(&documents);
        ensure_covers(&documents, experience.keys().map(String::as_str), "experience")?;
        Ok(experience)
    }

    /// Load every document once and run all four analyses.
    ///
    /// Rejects an empty batch, a blank reference text and duplicate ids.
    pub fn analyze(&self, sources: &[DocumentSource], reference: &str) -> Result<BatchAnalysis> {
        let started = Instant::now();

        if sources.is_empty() {
            return Err(ResumeMatcherError::InvalidInput("No documents to analyze".to_string()));
        }
        if reference.trim().is_empty() {
            return Err(ResumeMatcherError::InvalidInput("Job description is empty".to_string()));
        }
        ensure_unique_ids(sources)?;

        info!("Analyzing {} document(s) against the job description", sources.len());

        let documents = self.load_documents(sources);
        let failed = documents.iter().filter(|d| d.is_extraction_failure()).count();
        if failed > 0 {
            info!("{} document(s) could not be read and will be scored as empty", failed);
        }

        let reference = ReferenceText::new(reference, &self.normalizer);
        let reference_keywords = self.keyword_matcher.reference_keywords(&reference.raw_text);

        let (similarities, vocabulary_size) = self.similarities(&documents, &reference);
        let keywords = self.keywords(&documents, &reference_keywords);
        let sentiment = self.sentiment_scores(&documents);
        let experience = self.experience(&documents);

        ensure_covers(&documents, similarities.iter().map(|s| s.id.as_str()), "similarity")?;
        ensure_covers(&documents, keywords.keys().map(String::as_str), "keyword")?;
        ensure_covers(&documents, sentiment.keys().map(String::as_str), "sentiment")?;
        ensure_covers(&documents, experience.keys().map(String::as_str), "experience")?;

        let processing_time_ms = started.elapsed().as_millis() as u64;
        info!("Analysis completed in {}ms", processing_time_ms);

        Ok(BatchAnalysis {
            document_ids: documents.iter().map(|d| d.id.clone()).collect(),
            extraction: documents.iter().map(|d| (d.id.clone(), d.extraction.clone())).collect(),
            similarities,
            keywords,
            sentiment,
            experience,
            reference_keywords,
            vocabulary_size,
            processing_time_ms,
        })
    }

    fn similarities(&self, documents: &[Document], reference: &ReferenceText) -> (Vec<SimilarityResult>, usize) {
        let normalized: Vec<&str> = documents.iter().map(|d| d.normalized.as_str()).collect();
        let scores = self.scorer.score(&reference.normalized, &normalized);

        let results = documents
            .iter()
            .zip(scores.scores)
            .map(|(doc, score)| {
                debug!("{}: similarity {:.2}", doc.id, score);
                SimilarityResult {
                    id: doc.id.clone(),
                    score,
                }
            })
            .collect();

        (results, scores.vocabulary_size)
    }

    fn keywords(
        &self,
        documents: &[Document],
        reference_keywords: &BTreeSet<String>,
    ) -> BTreeMap<String, BTreeSet<String>> {
        documents
            .iter()
            .map(|doc| {
                let matched = self.keyword_matcher.matches_normalized(reference_keywords, &doc.normalized);
                (doc.id.clone(), matched)
            })
            .collect()
    }

    fn sentiment_scores(&self, documents: &[Document]) -> BTreeMap<String, f64> {
        documents
            .iter()
            .map(|doc| (doc.id.clone(), self.sentiment.polarity(&doc.raw_text)))
            .collect()
    }

    fn experience(&self, documents: &[Document]) -> BTreeMap<String, ExperienceEstimate> {
        documents
            .iter()
            .map(|doc| (doc.id.clone(), estimate_experience(&doc.raw_text)))
            .collect()
    }
}

fn ensure_unique_ids(sources: &[DocumentSource]) -> Result<()> {
    let mut seen = HashSet::new();
    for source in sources {
        if !seen.insert(source.id.as_str()) {
            return Err(ResumeMatcherError::InvalidInput(format!("Duplicate document id: {}", source.id)));
        }
    }
    Ok(())
}

/// Every analysis must report on exactly the input documents
fn ensure_covers<'a>(documents: &[Document], ids: impl Iterator<Item = &'a str>, analysis: &str) -> Result<()> {
    let expected: BTreeSet<&str> = documents.iter().map(|d| d.id.as_str()).collect();
    let actual: BTreeSet<&str> = ids.collect();

    if expected != actual {
        return Err(ResumeMatcherError::Processing(format!(
            "{} results cover {} document(s), expected {}",
            analysis,
            actual.len(),
            expected.len()
        )));
    }
    Ok(())
}

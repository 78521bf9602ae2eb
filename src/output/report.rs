//! Aggregated report: one insight per candidate plus chart-ready series

use crate::error::{Result, ResumeMatcherError};
use crate::processing::analyzer::BatchAnalysis;
use crate::processing::document::ExtractionStatus;
use crate::processing::experience::ExperienceEstimate;
use crate::processing::sentiment::{SentimentBands, SentimentClass};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::SystemTime;

/// Everything the presentation layer needs for one batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    /// Candidates in input order
    pub candidates: Vec<CandidateInsight>,

    pub summary: ReportSummary,

    /// Inputs for the score bar chart, sentiment pie chart and keyword cloud
    pub chart_data: ChartData,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateInsight {
    pub id: String,
    pub similarity_score: f64,
    pub matched_keywords: Vec<String>,
    pub sentiment_score: f64,
    pub sentiment: SentimentClass,
    pub experience: ExperienceEstimate,
    pub extraction: ExtractionStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub document_count: usize,
    pub failed_extractions: usize,
    pub average_score: f64,
    pub top_candidate: Option<String>,
    pub reference_keyword_count: usize,
    pub vocabulary_size: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub similarity_bars: Vec<ScoreBar>,
    pub sentiment_distribution: SentimentDistribution,
    /// Matched keyword -> number of candidates it matched in
    pub keyword_frequencies: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBar {
    pub id: String,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: SystemTime,
    pub matcher_version: String,
    pub job_source: String,
    pub processing_time_ms: u64,
}

impl SentimentDistribution {
    pub fn record(&mut self, class: SentimentClass) {
        match class {
            SentimentClass::Positive => self.positive += 1,
            SentimentClass::Neutral => self.neutral += 1,
            SentimentClass::Negative => self.negative += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    /// Share of each class in percent, in positive/neutral/negative order
    pub fn percentages(&self) -> [f64; 3] {
        let total = self.total();
        if total == 0 {
            return [0.0; 3];
        }
        let pct = |n: usize| n as f64 * 100.0 / total as f64;
        [pct(self.positive), pct(self.neutral), pct(self.negative)]
    }
}

impl MatchReport {
    pub fn from_batch_analysis(analysis: &BatchAnalysis, bands: SentimentBands, job_source: &str) -> Result<Self> {
        let mut candidates = Vec::with_capacity(analysis.document_ids.len());

        for similarity in &analysis.similarities {
            let id = similarity.id.as_str();
            let sentiment_score = *lookup(&analysis.sentiment, id, "sentiment")?;

            candidates.push(CandidateInsight {
                id: id.to_string(),
                similarity_score: similarity.score,
                matched_keywords: lookup(&analysis.keywords, id, "keyword")?.iter().cloned().collect(),
                sentiment_score,
                sentiment: bands.classify(sentiment_score),
                experience: *lookup(&analysis.experience, id, "experience")?,
                extraction: lookup(&analysis.extraction, id, "extraction")?.clone(),
            });
        }

        let chart_data = Self::create_chart_data(&candidates);
        let summary = Self::create_summary(&candidates, analysis);

        Ok(Self {
            candidates,
            summary,
            chart_data,
            metadata: ReportMetadata {
                generated_at: SystemTime::now(),
                matcher_version: env!("CARGO_PKG_VERSION").to_string(),
                job_source: job_source.to_string(),
                processing_time_ms: analysis.processing_time_ms,
            },
        })
    }

    /// Candidates by descending score; ties keep id order
    pub fn ranked(&self) -> Vec<&CandidateInsight> {
        let mut ranked: Vec<&CandidateInsight> = self.candidates.iter().collect();
        ranked.sort_by(|a, b| {
            b.similarity_score
                .total_cmp(&a.similarity_score)
                .then_with(|| a.id.cmp(&b.id))
        });
        ranked
    }

    fn create_chart_data(candidates: &[CandidateInsight]) -> ChartData {
        let mut chart_data = ChartData::default();

        for candidate in candidates {
            chart_data.similarity_bars.push(ScoreBar {
                id: candidate.id.clone(),
                score: candidate.similarity_score,
            });
            chart_data.sentiment_distribution.record(candidate.sentiment);
            for keyword in &candidate.matched_keywords {
                *chart_data.keyword_frequencies.entry(keyword.clone()).or_insert(0) += 1;
            }
        }

        chart_data
    }

    fn create_summary(candidates: &[CandidateInsight], analysis: &BatchAnalysis) -> ReportSummary {
        let document_count = candidates.len();
        let average_score = if document_count == 0 {
            0.0
        } else {
            candidates.iter().map(|c| c.similarity_score).sum::<f64>() / document_count as f64
        };

        let top_candidate = candidates
            .iter()
            .filter(|c| c.similarity_score > 0.0)
            .max_by(|a, b| {
                a.similarity_score
                    .total_cmp(&b.similarity_score)
                    .then_with(|| b.id.cmp(&a.id))
            })
            .map(|c| c.id.clone());

        ReportSummary {
            document_count,
            failed_extractions: candidates
                .iter()
                .filter(|c| matches!(c.extraction, ExtractionStatus::Failed { .. }))
                .count(),
            average_score,
            top_candidate,
            reference_keyword_count: analysis.reference_keywords.len(),
            vocabulary_size: analysis.vocabulary_size,
        }
    }
}

fn lookup<'a, V>(map: &'a BTreeMap<String, V>, id: &str, analysis: &str) -> Result<&'a V> {
    map.get(id)
        .ok_or_else(|| ResumeMatcherError::Processing(format!("No {} result for document {}", analysis, id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::scorer::SimilarityResult;
    use std::collections::BTreeSet;

    fn keywords(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn analysis() -> BatchAnalysis {
        let ids = ["a.txt", "b.pdf", "c.docx"];
        BatchAnalysis {
            document_ids: ids.iter().map(|s| s.to_string()).collect(),
            extraction: BTreeMap::from([
                ("a.txt".to_string(), ExtractionStatus::Extracted),
                ("b.pdf".to_string(), ExtractionStatus::Extracted),
                ("c.docx".to_string(), ExtractionStatus::Failed { reason: "bad zip".to_string() }),
            ]),
            similarities: vec![
                SimilarityResult { id: "a.txt".to_string(), score: 0.42 },
                SimilarityResult { id: "b.pdf".to_string(), score: 0.87 },
                SimilarityResult { id: "c.docx".to_string(), score: 0.0 },
            ],
            keywords: BTreeMap::from([
                ("a.txt".to_string(), keywords(&["rust", "tokio"])),
                ("b.pdf".to_string(), keywords(&["rust", "kafka", "tokio"])),
                ("c.docx".to_string(), keywords(&[])),
            ]),
            sentiment: BTreeMap::from([
                ("a.txt".to_string(), 0.6),
                ("b.pdf".to_string(), -0.3),
                ("c.docx".to_string(), 0.0),
            ]),
            experience: BTreeMap::from([
                ("a.txt".to_string(), ExperienceEstimate::Years(4)),
                ("b.pdf".to_string(), ExperienceEstimate::NotAvailable),
                ("c.docx".to_string(), ExperienceEstimate::NotAvailable),
            ]),
            reference_keywords: keywords(&["rust", "tokio", "kafka", "postgres"]),
            vocabulary_size: 12,
            processing_time_ms: 3,
        }
    }

    #[test]
    fn test_candidates_keep_input_order() {
        let report = MatchReport::from_batch_analysis(&analysis(), SentimentBands::default(), "job.txt").unwrap();

        let ids: Vec<&str> = report.candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a.txt", "b.pdf", "c.docx"]);
        assert_eq!(report.candidates[0].sentiment, SentimentClass::Positive);
        assert_eq!(report.candidates[1].sentiment, SentimentClass::Negative);
        assert_eq!(report.candidates[2].sentiment, SentimentClass::Neutral);
    }

    #[test]
    fn test_ranked() {
        let report = MatchReport::from_batch_analysis(&analysis(), SentimentBands::default(), "job.txt").unwrap();

        let ranked: Vec<&str> = report.ranked().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ranked, vec!["b.pdf", "a.txt", "c.docx"]);
    }

    #[test]
    fn test_chart_data() {
        let report = MatchReport::from_batch_analysis(&analysis(), SentimentBands::default(), "job.txt").unwrap();
        let chart = &report.chart_data;

        assert_eq!(chart.similarity_bars.len(), 3);
        assert_eq!(chart.similarity_bars[1], ScoreBar { id: "b.pdf".to_string(), score: 0.87 });
        assert_eq!(
            chart.sentiment_distribution,
            SentimentDistribution { positive: 1, neutral: 1, negative: 1 }
        );
        assert_eq!(chart.keyword_frequencies["rust"], 2);
        assert_eq!(chart.keyword_frequencies["kafka"], 1);
        assert!(!chart.keyword_frequencies.contains_key("postgres"));
    }

    #[test]
    fn test_summary() {
        let report = MatchReport::from_batch_analysis(&analysis(), SentimentBands::default(), "job.txt").unwrap();

        assert_eq!(report.summary.document_count, 3);
        assert_eq!(report.summary.failed_extractions, 1);
        assert_eq!(report.summary.top_candidate.as_deref(), Some("b.pdf"));
        assert_eq!(report.summary.reference_keyword_count, 4);
        assert!((report.summary.average_score - 0.43).abs() < 1e-9);
    }

    #[test]
    fn test_missing_result_is_an_error() {
        let mut analysis = analysis();
        analysis.sentiment.remove("b.pdf");

        let result = MatchReport::from_batch_analysis(&analysis, SentimentBands::default(), "job.txt");
        assert!(matches!(result, Err(ResumeMatcherError::Processing(_))));
    }

    #[test]
    fn test_distribution_percentages() {
        let distribution = SentimentDistribution { positive: 1, neutral: 3, negative: 0 };
        assert_eq!(distribution.percentages(), [25.0, 75.0, 0.0]);
        assert_eq!(SentimentDistribution::default().percentages(), [0.0, 0.0, 0.0]);
    }
}

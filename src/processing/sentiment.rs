//! Lexical sentiment polarity

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scores the polarity of raw text in roughly [-1, 1]
pub trait PolarityScorer: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

/// VADER compound score
#[derive(Debug, Default, Clone, Copy)]
pub struct VaderScorer;

impl PolarityScorer for VaderScorer {
    fn polarity(&self, text: &str) -> f64 {
        let analyzer = vader_sentiment::SentimentIntensityAnalyzer::new();
        let scores = analyzer.polarity_scores(text);
        let score = |key: &str| scores.get(key).copied().unwrap_or(0.0);

        // vader_sentiment shifts a zero valence sum by the punctuation
        // amplifier, so `!` and `?` alone would read as negative
        if score("pos") == 0.0 && score("neg") == 0.0 {
            return 0.0;
        }
        score("compound")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentClass {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for SentimentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentClass::Positive => write!(f, "Positive"),
            SentimentClass::Neutral => write!(f, "Neutral"),
            SentimentClass::Negative => write!(f, "Negative"),
        }
    }
}

/// Band edges: above `positive` is positive, below `negative` is negative,
/// anything in between (inclusive) is neutral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentBands {
    pub positive: f64,
    pub negative: f64,
}

impl Default for SentimentBands {
    fn default() -> Self {
        Self {
            positive: 0.1,
            negative: -0.1,
        }
    }
}

impl SentimentBands {
    pub fn classify(&self, polarity: f64) -> SentimentClass {
        if polarity > self.positive {
            SentimentClass::Positive
        } else if polarity < self.negative {
            SentimentClass::Negative
        } else {
            SentimentClass::Neutral
        }
    }
}

pub struct SentimentEstimator {
    scorer: Box<dyn PolarityScorer>,
    bands: SentimentBands,
}

impl Default for SentimentEstimator {
    fn default() -> Self {
        Self::new(Box::new(VaderScorer), SentimentBands::default())
    }
}

impl SentimentEstimator {
    pub fn new(scorer: Box<dyn PolarityScorer>, bands: SentimentBands) -> Self {
        Self { scorer, bands }
    }

    /// Blank text is exactly neutral and never reaches the scorer
    pub fn polarity(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        self.scorer.polarity(text)
    }

    pub fn classify(&self, polarity: f64) -> SentimentClass {
        self.bands.classify(polarity)
    }

    pub fn bands(&self) -> SentimentBands {
        self.bands
    }
}

//! Configuration management for the resume matcher

use crate::error::{Result, ResumeMatcherError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub processing: ProcessingConfig,
    pub sentiment: SentimentConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Vocabulary cap for the term-weighting space
    pub max_features: usize,
    /// Words removed in addition to the default English stop-word list
    #[serde(default)]
    pub extra_stop_words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentConfig {
    pub positive_threshold: f64,
    pub negative_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    /// Present candidates by descending score instead of input order
    #[serde(default)]
    pub ranked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            processing: ProcessingConfig {
                max_features: 1000,
                extra_stop_words: Vec::new(),
            },
            sentiment: SentimentConfig {
                positive_threshold: 0.1,
                negative_threshold: -0.1,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
                ranked: false,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first use
    pub fn load() -> Result<Self> {
        Self::load_or_create(&Self::config_path())
    }

    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ResumeMatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.processing.max_features == 0 {
            return Err(ResumeMatcherError::Configuration(
                "processing.max_features must be at least 1".to_string(),
            ));
        }

        if self.sentiment.negative_threshold > self.sentiment.positive_threshold {
            return Err(ResumeMatcherError::Configuration(format!(
                "sentiment.negative_threshold ({}) is above sentiment.positive_threshold ({})",
                self.sentiment.negative_threshold, self.sentiment.positive_threshold
            )));
        }

        Ok(())
    }

    /// Set a value by dotted key, e.g. `processing.max_features`
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "processing.max_features" => self.processing.max_features = parse_value(key, value)?,
            "processing.extra_stop_words" => {
                self.processing.extra_stop_words = value
                    .split(',')
                    .map(|w| w.trim().to_lowercase())
                    .filter(|w| !w.is_empty())
                    .collect();
            }
            "sentiment.positive_threshold" => self.sentiment.positive_threshold = parse_value(key, value)?,
            "sentiment.negative_threshold" => self.sentiment.negative_threshold = parse_value(key, value)?,
            "output.format" => {
                self.output.format = crate::cli::parse_output_format(value)
                    .map_err(ResumeMatcherError::Configuration)?;
            }
            "output.detailed" => self.output.detailed = parse_value(key, value)?,
            "output.color_output" => self.output.color_output = parse_value(key, value)?,
            "output.ranked" => self.output.ranked = parse_value(key, value)?,
            _ => {
                return Err(ResumeMatcherError::Configuration(format!("Unknown configuration key: {}", key)));
            }
        }

        self.validate()
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ResumeMatcherError::Configuration(format!("Invalid value for {}: {}", key, value)))
}

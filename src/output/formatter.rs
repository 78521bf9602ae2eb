//! Output formatters for match reports

use crate::config::OutputFormat;
use crate::error::{Result, ResumeMatcherError};
use crate::output::report::*;
use crate::processing::document::ExtractionStatus;
use crate::processing::sentiment::SentimentClass;
use colored::{Color, Colorize};
use std::fmt::Write as _;
use std::path::Path;

const BAR_WIDTH: usize = 20;

/// Trait for formatting match reports
pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and text bars
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
    ranked: bool,
}

/// JSON formatter for piping into other tools
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharing results
pub struct MarkdownFormatter {
    include_metadata: bool,
    ranked: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn candidates_in_order(report: &MatchReport, ranked: bool) -> Vec<&CandidateInsight> {
    if ranked {
        report.ranked()
    } else {
        report.candidates.iter().collect()
    }
}

fn score_bar(score: f64) -> String {
    let filled = ((score.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn format_generated_at(report: &MatchReport) -> String {
    chrono::DateTime::<chrono::Utc>::from(report.metadata.generated_at)
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

fn write_err(e: std::fmt::Error) -> ResumeMatcherError {
    ResumeMatcherError::OutputFormatting(e.to_string())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool, ranked: bool) -> Self {
        Self { use_colors, detailed, ranked }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let (badge, color) = match (score * 100.0).round() as u32 {
            75..=100 => ("STRONG", Color::Green),
            50..=74 => ("GOOD", Color::BrightGreen),
            25..=49 => ("PARTIAL", Color::Yellow),
            1..=24 => ("WEAK", Color::Red),
            _ => ("NONE", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn sentiment_color(class: SentimentClass) -> Color {
        match class {
            SentimentClass::Positive => Color::Green,
            SentimentClass::Neutral => Color::White,
            SentimentClass::Negative => Color::Red,
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();
        let candidates = candidates_in_order(report, self.ranked);
        let width = candidates.iter().map(|c| c.id.chars().count()).max().unwrap_or(0);

        output.push_str(&self.format_header("📊 RESUME MATCH ANALYSIS", 1));
        writeln!(
            output,
            "Generated: {} | Processing time: {}ms",
            format_generated_at(report),
            report.metadata.processing_time_ms
        )
        .map_err(write_err)?;
        writeln!(
            output,
            "Job description: {} | Resumes: {} | Unreadable: {}",
            report.metadata.job_source, report.summary.document_count, report.summary.failed_extractions
        )
        .map_err(write_err)?;

        output.push_str(&self.format_header("Similarity Scores", 2));
        for candidate in &candidates {
            writeln!(
                output,
                "  {:<width$}  {}  {:.2} {}",
                candidate.id,
                self.colorize(&score_bar(candidate.similarity_score), Color::Cyan),
                candidate.similarity_score,
                self.format_score_badge(candidate.similarity_score),
                width = width
            )
            .map_err(write_err)?;
        }
        if let Some(top) = &report.summary.top_candidate {
            writeln!(output, "\nBest match: {}", self.colorize(top, Color::Cyan)).map_err(write_err)?;
        }

        output.push_str(&self.format_header("🎯 Keyword Matches", 2));
        for candidate in &candidates {
            writeln!(
                output,
                "  {:<width$}  {}/{} keywords",
                candidate.id,
                candidate.matched_keywords.len(),
                report.summary.reference_keyword_count,
                width = width
            )
            .map_err(write_err)?;
            if self.detailed && !candidate.matched_keywords.is_empty() {
                writeln!(output, "    {}", candidate.matched_keywords.join(", ")).map_err(write_err)?;
            }
        }

        output.push_str(&self.format_header("🧠 Sentiment Analysis", 2));
        for candidate in &candidates {
            writeln!(
                output,
                "  {:<width$}  {:>5.2}  {}",
                candidate.id,
                candidate.sentiment_score,
                self.colorize(&candidate.sentiment.to_string(), Self::sentiment_color(candidate.sentiment)),
                width = width
            )
            .map_err(write_err)?;
        }
        let [positive, neutral, negative] = report.chart_data.sentiment_distribution.percentages();
        writeln!(
            output,
            "  Distribution: Positive {:.1}% | Neutral {:.1}% | Negative {:.1}%",
            positive, neutral, negative
        )
        .map_err(write_err)?;

        output.push_str(&self.format_header("📜 Experience Information", 2));
        for candidate in &candidates {
            writeln!(output, "  {:<width$}  {}", candidate.id, candidate.experience, width = width)
                .map_err(write_err)?;
        }

        if self.detailed {
            let failures: Vec<(&str, &str)> = candidates
                .iter()
                .filter_map(|c| match &c.extraction {
                    ExtractionStatus::Failed { reason } => Some((c.id.as_str(), reason.as_str())),
                    ExtractionStatus::Extracted => None,
                })
                .collect();

            if !failures.is_empty() {
                output.push_str(&self.format_header("⚠️  Unreadable Documents", 3));
                for (id, reason) in failures {
                    writeln!(output, "  {}: {}", id, self.colorize(reason, Color::Red)).map_err(write_err)?;
                }
            }

            if !report.chart_data.keyword_frequencies.is_empty() {
                output.push_str(&self.format_header("Most Matched Keywords", 3));
                let mut frequencies: Vec<(&String, &usize)> = report.chart_data.keyword_frequencies.iter().collect();
                frequencies.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
                for (keyword, count) in frequencies.into_iter().take(15) {
                    writeln!(output, "  {} ({})", keyword, count).map_err(write_err)?;
                }
            }

            writeln!(
                output,
                "\nTF-IDF vocabulary: {} terms (scores are relative to this batch)",
                report.summary.vocabulary_size
            )
            .map_err(write_err)?;
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool, ranked: bool) -> Self {
        Self { include_metadata, ranked }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();
        let candidates = candidates_in_order(report, self.ranked);

        output.push_str("# Resume Match Analysis\n\n");

        if self.include_metadata {
            writeln!(output, "- **Generated:** {}", format_generated_at(report)).map_err(write_err)?;
            writeln!(output, "- **Job description:** {}", report.metadata.job_source).map_err(write_err)?;
            writeln!(output, "- **Matcher version:** {}", report.metadata.matcher_version).map_err(write_err)?;
            writeln!(output, "- **Processing time:** {}ms\n", report.metadata.processing_time_ms).map_err(write_err)?;
        }

        output.push_str("## Results\n\n");
        output.push_str("| Resume | Score | Matched keywords | Sentiment | Experience |\n");
        output.push_str("|---|---:|---|---|---|\n");
        for candidate in &candidates {
            writeln!(
                output,
                "| {} | {:.2} | {} | {:.2} ({}) | {} |",
                Self::escape_cell(&candidate.id),
                candidate.similarity_score,
                Self::escape_cell(&candidate.matched_keywords.join(", ")),
                candidate.sentiment_score,
                candidate.sentiment,
                candidate.experience
            )
            .map_err(write_err)?;
        }

        let distribution = report.chart_data.sentiment_distribution;
        output.push_str("\n## Sentiment Distribution\n\n");
        writeln!(
            output,
            "- Positive: {}\n- Neutral: {}\n- Negative: {}",
            distribution.positive, distribution.neutral, distribution.negative
        )
        .map_err(write_err)?;

        let failures: Vec<&CandidateInsight> = candidates
            .iter()
            .copied()
            .filter(|c| matches!(c.extraction, ExtractionStatus::Failed { .. }))
            .collect();
        if !failures.is_empty() {
            output.push_str("\n## Unreadable Documents\n\n");
            for candidate in failures {
                if let ExtractionStatus::Failed { reason } = &candidate.extraction {
                    writeln!(output, "- `{}`: {}", candidate.id, reason).map_err(write_err)?;
                }
            }
        }

        output.push_str("\n---\n*Scores are relative to this batch of resumes.*\n");
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true, false),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, ranked: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed, ranked),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(true, ranked),
        }
    }

    pub fn generate_report(&self, report: &MatchReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, job_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(job_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_matches{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_matches{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_matches{}.md", base_name, timestamp_suffix),
    }
}

//! Resume matcher: rank resumes against a job description

use clap::Parser;
use log::{error, info, warn};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction};
use resume_matcher::config::{Config, OutputFormat};
use resume_matcher::error::{Result, ResumeMatcherError};
use resume_matcher::input::file_detector::DocumentFormat;
use resume_matcher::input::manager::InputManager;
use resume_matcher::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use resume_matcher::output::report::MatchReport;
use resume_matcher::processing::analyzer::AnalysisEngine;
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_or_create(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Rank {
            resumes,
            job,
            job_text,
            output,
            save,
            max_features,
            detailed,
            ranked,
        } => {
            let mut config = config;
            if let Some(max_features) = max_features {
                config.processing.max_features = max_features;
            }

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeMatcherError::InvalidInput)?,
                None => config.output.format,
            };

            rank(RankOptions {
                resumes,
                job,
                job_text,
                save,
                output_format,
                detailed: detailed || config.output.detailed,
                ranked: ranked || config.output.ranked,
                config,
            })
            .await
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", content);
                Ok(())
            }
            ConfigAction::Path => {
                println!("{}", config_path.display());
                Ok(())
            }
            ConfigAction::Reset => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset to defaults: {}", config_path.display());
                Ok(())
            }
            ConfigAction::Set { key, value } => {
                let mut config = config;
                config.set_value(&key, &value)?;
                config.save_to(config_path)?;
                println!("Set {} = {}", key, value);
                Ok(())
            }
        },
    }
}

struct RankOptions {
    resumes: Vec<PathBuf>,
    job: Option<PathBuf>,
    job_text: Option<String>,
    save: Option<PathBuf>,
    output_format: OutputFormat,
    detailed: bool,
    ranked: bool,
    config: Config,
}

async fn rank(options: RankOptions) -> Result<()> {
    let engine = AnalysisEngine::new(&options.config)?;
    let mut input_manager = InputManager::new().with_progress(options.save.is_none());

    let (job_text, job_source) = match (&options.job, options.job_text) {
        (Some(path), _) => {
            cli::validate_file_extension(path, DocumentFormat::supported_extensions())
                .map_err(|e| ResumeMatcherError::InvalidInput(format!("Job description file: {}", e)))?;
            (input_manager.read_reference(path).await?, path.display().to_string())
        }
        (None, Some(text)) => (text, "job".to_string()),
        (None, None) => {
            return Err(ResumeMatcherError::InvalidInput("A job description is required".to_string()));
        }
    };

    for resume in &options.resumes {
        if let Err(e) = cli::validate_file_extension(resume, DocumentFormat::supported_extensions()) {
            warn!("{}: {} (it will be scored as empty)", resume.display(), e);
        }
    }

    let sources = input_manager.read_sources(&options.resumes).await;
    let analysis = engine.analyze(&sources, &job_text)?;
    let report = MatchReport::from_batch_analysis(&analysis, engine.sentiment_bands(), &job_source)?;

    let generator = ReportGenerator::with_options(
        options.config.output.color_output && options.save.is_none(),
        options.detailed,
        options.ranked,
        true,
    );
    let content = generator.generate_report(&report, &options.output_format)?;

    match &options.save {
        Some(path) => {
            // A directory gets a generated file name
            let path = if path.is_dir() {
                path.join(suggest_filename(&options.output_format, &job_source, true))
            } else {
                path.clone()
            };
            save_report_to_file(&content, &path)?;
            info!("Report saved to {}", path.display());
        }
        None => println!("{}", content),
    }

    Ok(())
}

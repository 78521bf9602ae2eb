//! Input manager: reads files from disk into document sources

use crate::error::{Result, ResumeMatcherError};
use crate::input::file_detector::DocumentFormat;
use crate::input::loader::{source_id, DocumentLoader, DocumentSource, Extraction, SourceContent};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;

pub struct InputManager {
    cache: HashMap<PathBuf, Vec<u8>>,
    enable_cache: bool,
    show_progress: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
            show_progress: false,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub fn with_progress(mut self, enable: bool) -> Self {
        self.show_progress = enable;
        self
    }

    /// Read one file into an in-memory source.
    ///
    /// A file that cannot be read keeps its path as content, so the loader
    /// records the failure for that document instead of aborting the batch.
    pub async fn read_source(&mut self, path: &Path) -> DocumentSource {
        let format = DocumentFormat::from_path(path);
        let id = source_id(path);

        match self.read_bytes(path).await {
            Ok(bytes) => DocumentSource {
                id,
                content: SourceContent::Bytes(bytes),
                format,
            },
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                DocumentSource {
                    id,
                    content: SourceContent::Path(path.to_path_buf()),
                    format,
                }
            }
        }
    }

    pub async fn read_sources(&mut self, paths: &[PathBuf]) -> Vec<DocumentSource> {
        let progress = if self.show_progress {
            let bar = ProgressBar::new(paths.len() as u64);
            if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}") {
                bar.set_style(style.progress_chars("=> "));
            }
            bar
        } else {
            ProgressBar::hidden()
        };

        let mut name_counts: HashMap<String, usize> = HashMap::new();
        for path in paths {
            *name_counts.entry(source_id(path)).or_insert(0) += 1;
        }

        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            progress.set_message(source_id(path));
            let mut source = self.read_source(path).await;
            // Same file name in different directories: identify by full path
            if name_counts.get(&source.id).copied().unwrap_or(0) > 1 {
                source.id = path.display().to_string();
            }
            sources.push(source);
            progress.inc(1);
        }
        progress.finish_and_clear();

        info!("Read {} document(s)", sources.len());
        sources
    }

    /// Read the job description. Unlike candidate documents, it must yield text.
    pub async fn read_reference(&mut self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(ResumeMatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let source = self.read_source(path).await;
        match DocumentLoader::new().load(&source) {
            Extraction::Extracted { text } => Ok(text),
            Extraction::Failed { reason } => Err(ResumeMatcherError::InvalidInput(format!(
                "Could not read job description {}: {}",
                path.display(),
                reason
            ))),
        }
    }

    async fn read_bytes(&mut self, path: &Path) -> Result<Vec<u8>> {
        if self.enable_cache {
            if let Some(cached) = self.cache.get(path) {
                info!("Using cached content for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        let bytes = fs::read(path).await?;

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), bytes.clone());
        }

        Ok(bytes)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

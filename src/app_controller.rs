use anyhow::{Context, Result, anyhow};
use futures::stream::{self, StreamExt};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::{Config, ProcessingMode};
use crate::file_utils::FileManager;
use crate::translation::{FileReport, LinePipeline, LineTranslator, TranslationService};

// @module: Application controller for chapter translation

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// One report per translated file, in completion order
    pub files: Vec<FileReport>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn total_lines(&self) -> usize {
        self.files.iter().map(|f| f.counts.total).sum()
    }

    pub fn translated_lines(&self) -> usize {
        self.files.iter().map(|f| f.counts.translated).sum()
    }
}

/// Main application controller for chapter translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the whole directory through the configured provider
    pub async fn run(&self) -> Result<RunSummary> {
        let provider = self.config.translation.provider;
        if self.config.translation.get_api_key().is_empty() {
            warn!(
                "No API key found for {} (set {}), every translation request will fail",
                provider.display_name(),
                provider.api_key_env_var()
            );
        }

        let translation_service = TranslationService::new(&self.config)?;
        info!("texlate: {} - {}", provider.display_name(), translation_service.options.model);

        let result = self.run_with_translator(&translation_service).await;

        let usage = translation_service.usage();
        if usage.requests > 0 {
            info!("{}", usage.summary());
        }

        result
    }

    /// Run the whole directory through `translator`
    pub async fn run_with_translator<T: LineTranslator + ?Sized>(&self, translator: &T) -> Result<RunSummary> {
        let start_time = Instant::now();
        let input_dir = &self.config.input_dir;
        let output_dir = &self.config.output_dir;

        let files = FileManager::list_chapter_files(input_dir)
            .with_context(|| format!("Failed to list chapter files in {:?}", input_dir))?;
        if files.is_empty() {
            warn!("No chapter files found in {:?}", input_dir);
        }

        FileManager::ensure_dir(output_dir)?;

        let multi_progress = MultiProgress::new();
        let folder_pb = multi_progress.add(ProgressBar::new(files.len() as u64));
        folder_pb.set_style(Self::bar_style(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}",
        ));

        let reports = match self.config.processing.mode {
            ProcessingMode::Sequential => {
                self.run_sequential(translator, &files, &multi_progress, &folder_pb).await?
            }
            ProcessingMode::Concurrent => {
                self.run_concurrent(translator, &files, &multi_progress, &folder_pb).await?
            }
        };

        folder_pb.finish_and_clear();

        let summary = RunSummary {
            files: reports,
            elapsed: start_time.elapsed(),
        };
        info!(
            "Processing complete: {} files, {} lines ({} translated) in {}",
            summary.files.len(),
            summary.total_lines(),
            summary.translated_lines(),
            Self::format_duration(summary.elapsed)
        );
        Ok(summary)
    }

    /// One file after another; the first failure aborts the run
    async fn run_sequential<T: LineTranslator + ?Sized>(
        &self,
        translator: &T,
        files: &[String],
        multi_progress: &MultiProgress,
        folder_pb: &ProgressBar,
    ) -> Result<Vec<FileReport>> {
        let mut reports = Vec::with_capacity(files.len());
        for file_name in files {
            folder_pb.set_message(format!("Processing: {}", file_name));
            let report = self.process_one(translator, file_name, multi_progress).await?;
            reports.push(report);
            folder_pb.inc(1);
        }
        Ok(reports)
    }

    /// Up to `max_concurrent_files` files in flight; failures are collected.
    ///
    /// Files sharing an output path run one after another in sorted order,
    /// so the last one wins as in sequential mode.
    async fn run_concurrent<T: LineTranslator + ?Sized>(
        &self,
        translator: &T,
        files: &[String],
        multi_progress: &MultiProgress,
        folder_pb: &ProgressBar,
    ) -> Result<Vec<FileReport>> {
        let limit = self.config.processing.max_concurrent_files.max(1);
        let groups = Self::group_by_output(files, &self.config.output_dir);
        debug!(
            "Processing {} files ({} output paths) with up to {} in flight",
            files.len(),
            groups.len(),
            limit
        );

        let outcomes: Vec<(String, Result<FileReport>)> = stream::iter(groups)
            .map(|group| async move {
                let mut group_outcomes = Vec::with_capacity(group.len());
                for file_name in group {
                    let outcome = self.process_one(translator, file_name, multi_progress).await;
                    folder_pb.inc(1);
                    group_outcomes.push((file_name.clone(), outcome));
                }
                stream::iter(group_outcomes)
            })
            .buffer_unordered(limit)
            .flatten()
            .collect()
            .await;

        let mut reports = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for (file_name, outcome) in outcomes {
            match outcome {
                Ok(report) => reports.push(report),
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    failures.push(format!("{}: {:#}", file_name, e));
                }
            }
        }

        if !failures.is_empty() {
            return Err(anyhow!(
                "{} of {} files failed:\n{}",
                failures.len(),
                files.len(),
                failures.join("\n")
            ));
        }
        Ok(reports)
    }

    /// Translate a single chapter with its own progress bar
    async fn process_one<T: LineTranslator + ?Sized>(
        &self,
        translator: &T,
        file_name: &str,
        multi_progress: &MultiProgress,
    ) -> Result<FileReport> {
        let input_path = self.config.input_dir.join(file_name);
        let output_path = FileManager::generate_output_path(file_name, &self.config.output_dir);

        let progress_bar = multi_progress.add(ProgressBar::new_spinner());
        progress_bar.set_style(Self::bar_style("{spinner:.green} [{elapsed_precise}] {msg}: {pos} lines"));
        progress_bar.set_message(file_name.to_string());

        let pb = progress_bar.clone();
        let pipeline = LinePipeline::new(translator);
        let result = pipeline
            .process_file(&input_path, &output_path, move |count| {
                pb.set_position(count as u64);
                debug!("{}: {}", file_name, count);
            })
            .await;

        progress_bar.finish_and_clear();
        let report = result.with_context(|| format!("Failed to translate {}", file_name))?;
        debug!("{} finished in {}", file_name, Self::format_duration(report.elapsed));
        Ok(report)
    }

    // Chapters keyed by output path; each group keeps the input's sorted order
    fn group_by_output<'a>(files: &'a [String], output_dir: &Path) -> Vec<Vec<&'a String>> {
        let mut groups: BTreeMap<PathBuf, Vec<&'a String>> = BTreeMap::new();
        for file_name in files {
            groups
                .entry(FileManager::generate_output_path(file_name, output_dir))
                .or_default()
                .push(file_name);
        }
        groups.into_values().collect()
    }

    fn bar_style(template: &str) -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ")
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

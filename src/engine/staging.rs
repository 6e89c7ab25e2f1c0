use std::path::Path;

use tracing::{error, info, warn};

use super::{RunStatus, UploadEngine, UploadResult, enumerate_runs, read_run_status};
use crate::config::ConfigurationStore;
use crate::error::Result;
use crate::types::SUPPORTED_PARSERS;

/// Batch staging report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub staged: usize,
    pub skipped: usize,
    pub errors: usize,
}

enum StageOutcome {
    Staged,
    Blocked(String),
}

/// Local engine: checks runs and metadata files and reports what is ready to upload.
///
/// Transfer to the server is done by a separate service; this engine never
/// modifies run directories.
#[derive(Debug, Clone)]
pub struct StagingEngine {
    base_url: Option<String>,
    parser: String,
}

impl StagingEngine {
    pub fn new(config: &ConfigurationStore) -> Self {
        Self {
            base_url: config.base_url().map(str::to_string),
            parser: config.parser().to_string(),
        }
    }

    fn parser_supported(&self) -> bool {
        if SUPPORTED_PARSERS.contains(&self.parser.as_str()) {
            return true;
        }
        error!(
            parser = %self.parser,
            supported = ?SUPPORTED_PARSERS,
            "Unsupported parser"
        );
        eprintln!(
            "Unsupported parser '{}'; expected one of: {}",
            self.parser,
            SUPPORTED_PARSERS.join(", ")
        );
        false
    }

    fn stage_run(&self, directory: &Path, force: bool, assemblies: bool) -> Result<StageOutcome> {
        if !directory.is_dir() {
            return Ok(StageOutcome::Blocked(format!(
                "{} is not a directory",
                directory.display()
            )));
        }

        if !force {
            let status = read_run_status(directory)?;
            if status != RunStatus::New {
                return Ok(StageOutcome::Blocked(format!(
                    "run has status '{status}', use --force to upload anyway"
                )));
            }
        }

        info!(
            run = %directory.display(),
            parser = %self.parser,
            base_url = self.base_url.as_deref().unwrap_or("<unset>"),
            force,
            assemblies,
            "Run staged for upload"
        );
        Ok(StageOutcome::Staged)
    }

    /// Stage every run under `directory`, skipping runs that are not uploadable.
    pub fn stage_batch(&self, directory: &Path, force: bool, assemblies: bool) -> Result<BatchReport> {
        let runs = enumerate_runs(directory)?;
        info!(directory = %directory.display(), runs = runs.len(), "Starting batch");

        let mut report = BatchReport::default();
        for run in runs {
            match self.stage_run(&run, force, assemblies) {
                Ok(StageOutcome::Staged) => report.staged += 1,
                Ok(StageOutcome::Blocked(reason)) => {
                    info!(run = %run.display(), %reason, "Skipping run");
                    report.skipped += 1;
                }
                Err(e) => {
                    warn!(run = %run.display(), error = %e, "Error staging run");
                    report.errors += 1;
                }
            }
        }

        info!(
            staged = report.staged,
            skipped = report.skipped,
            errors = report.errors,
            "Batch complete"
        );
        Ok(report)
    }
}

impl UploadEngine for StagingEngine {
    fn upload_run(&self, directory: &Path, force: bool, assemblies: bool) -> UploadResult {
        if !self.parser_supported() {
            return UploadResult::failure();
        }
        match self.stage_run(directory, force, assemblies) {
            Ok(StageOutcome::Staged) => {
                println!("Run {} is ready for upload", directory.display());
                UploadResult::success()
            }
            Ok(StageOutcome::Blocked(reason)) => {
                eprintln!("Run {} not uploaded: {}", directory.display(), reason);
                UploadResult::failure()
            }
            Err(e) => {
                eprintln!("Run {} not uploaded: {}", directory.display(), e);
                UploadResult::failure()
            }
        }
    }

    fn upload_batch(&self, directory: &Path, force: bool, assemblies: bool) -> UploadResult {
        if !self.parser_supported() {
            return UploadResult::failure();
        }
        match self.stage_batch(directory, force, assemblies) {
            Ok(report) if report.errors == 0 => {
                println!(
                    "Batch ready: {} run(s) staged, {} skipped",
                    report.staged, report.skipped
                );
                UploadResult::success()
            }
            Ok(report) => {
                eprintln!("Batch finished with {} failed run(s)", report.errors);
                UploadResult::failure()
            }
            Err(e) => {
                eprintln!("Could not read batch directory {}: {}", directory.display(), e);
                UploadResult::failure()
            }
        }
    }

    fn upload_metadata(&self, file: &Path) -> UploadResult {
        if !self.parser_supported() {
            return UploadResult::failure();
        }
        if !file.is_file() {
            eprintln!("Metadata file not found: {}", file.display());
            return UploadResult::failure();
        }
        info!(
            metadata = %file.display(),
            base_url = self.base_url.as_deref().unwrap_or("<unset>"),
            "Metadata staged for upload"
        );
        println!("Metadata file {} is ready for upload", file.display());
        UploadResult::success()
    }
}

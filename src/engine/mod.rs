//! Upload engine seam: the collaborator that performs the actual upload.
//!
//! The front end only ever calls one of the three entry points per invocation
//! and passes the returned exit code through unchanged. This module also holds
//! the run-directory helpers shared by engine implementations: batch
//! enumeration and the per-run status file.
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod staging;

pub use staging::{BatchReport, StagingEngine};

/// Name of the status file kept inside each run directory.
pub const STATUS_FILE_NAME: &str = "irida_uploader_status.info";

/// Outcome of one engine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadResult {
    pub exit_code: i32,
}

impl UploadResult {
    pub fn success() -> Self {
        Self { exit_code: 0 }
    }

    pub fn failure() -> Self {
        Self { exit_code: 1 }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait UploadEngine {
    /// Upload a single sequencing run directory.
    fn upload_run(&self, directory: &Path, force: bool, assemblies: bool) -> UploadResult;

    /// Upload every run directory directly under `directory`.
    ///
    /// The run list is taken once when the call starts; runs added to
    /// `directory` afterwards are not uploaded.
    fn upload_batch(&self, directory: &Path, force: bool, assemblies: bool) -> UploadResult;

    /// Upload sample metadata from a file.
    fn upload_metadata(&self, file: &Path) -> UploadResult;
}

/// Snapshot of the immediate subdirectories of `parent`, sorted by path.
///
/// The returned list is fixed at the time of the call.
pub fn enumerate_runs(parent: &Path) -> Result<Vec<PathBuf>> {
    let mut runs = Vec::new();
    for entry in fs::read_dir(parent)? {
        let path = entry?.path();
        if path.is_dir() {
            runs.push(path);
        }
    }
    runs.sort();
    Ok(runs)
}

/// Upload state recorded in a run's status file.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    New,
    Uploading,
    Partial,
    Error,
    Complete,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::New => write!(f, "new"),
            RunStatus::Uploading => write!(f, "uploading"),
            RunStatus::Partial => write!(f, "partial"),
            RunStatus::Error => write!(f, "error"),
            RunStatus::Complete => write!(f, "complete"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct StatusFile {
    #[serde(rename = "Upload Status")]
    upload_status: RunStatus,
}

/// Status of the run in `directory`. A run without a status file is new.
pub fn read_run_status(directory: &Path) -> Result<RunStatus> {
    let path = directory.join(STATUS_FILE_NAME);
    if !path.exists() {
        return Ok(RunStatus::New);
    }
    let content = fs::read_to_string(&path)?;
    let file: StatusFile = serde_json::from_str(&content)?;
    Ok(file.upload_status)
}

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::types::UploadMode;

/// Everything the dispatcher needs for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub mode: UploadMode,
    /// Run directory, batch parent directory, or metadata file, depending on `mode`
    pub path: PathBuf,
    /// Upload even when the run is not in `new` status
    pub force: bool,
    /// Upload assemblies instead of raw sequence files
    pub assemblies: bool,
}

impl UploadRequest {
    pub fn new(mode: UploadMode, path: PathBuf, force: bool, assemblies: bool) -> Self {
        Self {
            mode,
            path,
            force,
            assemblies,
        }
    }
}

fn present(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}

/// Pick the upload mode from the mutually exclusive directory/metadata inputs.
///
/// Exactly one of `directory` and `metadata` must be given (an empty path
/// counts as absent). A directory must be writable by this process; the
/// metadata file is not checked here.
pub fn validate_mode(
    directory: Option<&Path>,
    metadata: Option<&Path>,
    batch: bool,
) -> Result<(UploadMode, PathBuf)> {
    match (present(directory), present(metadata)) {
        (Some(dir), None) => {
            if !is_writable(dir) {
                debug!(directory = %dir.display(), "Upload directory is not writable");
                return Err(Error::DirectoryNotWritable {
                    path: dir.to_path_buf(),
                });
            }
            let mode = if batch {
                UploadMode::BatchRun
            } else {
                UploadMode::SingleRun
            };
            debug!(%mode, directory = %dir.display(), "Mode validated");
            Ok((mode, dir.to_path_buf()))
        }
        (None, Some(file)) => {
            debug!(mode = %UploadMode::MetadataOnly, metadata = %file.display(), "Mode validated");
            Ok((UploadMode::MetadataOnly, file.to_path_buf()))
        }
        (dir, file) => Err(Error::ModeConflict {
            directory: dir.is_some(),
            metadata: file.is_some(),
        }),
    }
}

/// Whether the current process may write to `path`. Missing paths are not writable.
///
/// A one-off check; the upload itself may still race with permission changes.
#[cfg(unix)]
pub fn is_writable(path: &Path) -> bool {
    use nix::unistd::{AccessFlags, access};
    access(path, AccessFlags::W_OK).is_ok()
}

#[cfg(not(unix))]
pub fn is_writable(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}

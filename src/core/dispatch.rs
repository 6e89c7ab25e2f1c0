use tracing::info;

use super::mode::UploadRequest;
use crate::engine::UploadEngine;
use crate::types::UploadMode;

/// Invoke exactly one engine entry point for `request` and return its exit code unchanged.
///
/// `force` and `assemblies` are not passed to the metadata entry point.
pub fn dispatch<E>(engine: &E, request: &UploadRequest) -> i32
where
    E: UploadEngine + ?Sized,
{
    info!(
        mode = %request.mode,
        path = %request.path.display(),
        force = request.force,
        assemblies = request.assemblies,
        "Dispatching upload"
    );

    let result = match request.mode {
        UploadMode::SingleRun => engine.upload_run(&request.path, request.force, request.assemblies),
        UploadMode::BatchRun => {
            engine.upload_batch(&request.path, request.force, request.assemblies)
        }
        UploadMode::MetadataOnly => engine.upload_metadata(&request.path),
    };

    info!(exit_code = result.exit_code, "Upload engine finished");
    result.exit_code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{MockUploadEngine, UploadResult};
    use std::path::{Path, PathBuf};

    #[test]
    fn single_run_calls_only_the_run_entry() {
        let mut engine = MockUploadEngine::new();
        engine
            .expect_upload_run()
            .withf(|dir, force, assemblies| {
                dir.to_path_buf() == PathBuf::from("/runs/run1") && *force && !*assemblies
            })
            .times(1)
            .returning(|_, _, _| UploadResult { exit_code: 7 });
        engine.expect_upload_batch().never();
        engine.expect_upload_metadata().never();

        let request = UploadRequest::new(UploadMode::SingleRun, "/runs/run1".into(), true, false);
        assert_eq!(dispatch(&engine, &request), 7);
    }

    #[test]
    fn batch_run_calls_only_the_batch_entry() {
        let mut engine = MockUploadEngine::new();
        engine.expect_upload_run().never();
        engine
            .expect_upload_batch()
            .withf(|dir, force, assemblies| {
                dir.to_path_buf() == PathBuf::from("/runs") && !*force && *assemblies
            })
            .times(1)
            .returning(|_, _, _| UploadResult::failure());
        engine.expect_upload_metadata().never();

        let request = UploadRequest::new(UploadMode::BatchRun, "/runs".into(), false, true);
        assert_eq!(dispatch(&engine, &request), 1);
    }

    #[test]
    fn metadata_calls_only_the_metadata_entry() {
        let mut engine = MockUploadEngine::new();
        engine.expect_upload_run().never();
        engine.expect_upload_batch().never();
        engine
            .expect_upload_metadata()
            .withf(|file| file.to_path_buf() == Path::new("meta.csv").to_path_buf())
            .times(1)
            .returning(|_| UploadResult::success());

        let request = UploadRequest::new(UploadMode::MetadataOnly, "meta.csv".into(), true, true);
        assert_eq!(dispatch(&engine, &request), 0);
    }
}

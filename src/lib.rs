#![doc = r#"
IRIDA Uploader front end — resolve what to upload and with which settings, then hand
the work to an upload engine.

This crate holds the part of the uploader that sits between the command line and the
engine that talks to the IRIDA server: loading the configuration file, applying
command-line overrides (including interactive prompts), choosing between single-run,
batch, and metadata-only uploads, and dispatching to exactly one engine entry point.

Configuration file
------------------
Settings live in a TOML file, by default `<user config dir>/irida-uploader/config.toml`:

```toml
[Settings]
client_id = "uploader"
client_secret = "secret"
username = "admin"
password = "password"
base_url = "http://localhost:8080/api/"
parser = "miseq"
```

`parser` is optional and defaults to `miseq`; the other five settings must come from the
file or from an override.

Run an invocation with your own engine
--------------------------------------
```rust,no_run
use std::path::{Path, PathBuf};
use irida_uploader::{
    Invocation, TerminalPrompter, TomlFileBackend, UploadEngine, UploadResult, run_invocation,
};

struct PrintEngine;

impl UploadEngine for PrintEngine {
    fn upload_run(&self, directory: &Path, force: bool, assemblies: bool) -> UploadResult {
        println!("run {} force={force} assemblies={assemblies}", directory.display());
        UploadResult::success()
    }
    fn upload_batch(&self, directory: &Path, _force: bool, _assemblies: bool) -> UploadResult {
        println!("batch {}", directory.display());
        UploadResult::success()
    }
    fn upload_metadata(&self, file: &Path) -> UploadResult {
        println!("metadata {}", file.display());
        UploadResult::success()
    }
}

let invocation = Invocation {
    directory: Some(PathBuf::from("/data/runs/240101_M01234_0001")),
    ..Default::default()
};
let code = run_invocation(&invocation, &TomlFileBackend, &mut TerminalPrompter, |_| PrintEngine);
std::process::exit(code);
```

Useful modules
--------------
- [`api`] — `Invocation` and `run_invocation`, the top-level entry point.
- [`config`] — configuration store, override resolution, prompts.
- [`core`] — mode validation and dispatch.
- [`engine`] — the `UploadEngine` seam, run enumeration, and the local staging engine.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod types;

// Curated public API surface
pub use api::{Invocation, Stage, prepare, run_invocation};
pub use config::{
    ConfigOverrides, ConfigurationBackend, ConfigurationStore, Override, Prompter,
    TerminalPrompter, TomlFileBackend, apply_overrides, default_config_path, resolve_overrides,
};
pub use crate::core::{UploadRequest, dispatch, is_writable, validate_mode};
pub use engine::{
    BatchReport, RunStatus, StagingEngine, UploadEngine, UploadResult, enumerate_runs,
    read_run_status,
};
pub use error::{Error, Result};
pub use types::{ConfigSetting, DEFAULT_PARSER, SUPPORTED_PARSERS, UploadMode};

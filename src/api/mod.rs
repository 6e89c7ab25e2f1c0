//! Top-level entry point: one invocation from parsed arguments to exit code.
//!
//! An invocation moves strictly forward through
//! `Start -> ConfigLoaded -> OverridesApplied -> ModeValidated -> Dispatched -> Done`.
//! Any failure before dispatch ends the run with a single diagnostic line and
//! exit code 1, without calling the engine. After dispatch the engine's exit
//! code is returned as is.
use std::path::PathBuf;

use tracing::{debug, error, info};

use crate::config::{ConfigOverrides, ConfigurationBackend, ConfigurationStore, Prompter, apply_overrides};
use crate::core::{UploadRequest, dispatch, validate_mode};
use crate::engine::UploadEngine;
use crate::error::{Error, Result};

/// Inputs for one invocation, independent of how they were parsed.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    /// Run directory (or parent of runs with `batch`)
    pub directory: Option<PathBuf>,
    /// Sample metadata file
    pub metadata: Option<PathBuf>,
    /// Alternative configuration file
    pub config: Option<PathBuf>,
    pub force: bool,
    pub batch: bool,
    pub assemblies: bool,
    pub overrides: ConfigOverrides,
}

/// Stages of an invocation, in order.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Stage {
    Start,
    ConfigLoaded,
    OverridesApplied,
    ModeValidated,
    Dispatched,
    Done,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Start => "start",
            Stage::ConfigLoaded => "config_loaded",
            Stage::OverridesApplied => "overrides_applied",
            Stage::ModeValidated => "mode_validated",
            Stage::Dispatched => "dispatched",
            Stage::Done => "done",
        };
        write!(f, "{}", s)
    }
}

/// Load configuration, apply overrides and validate the mode.
///
/// Returns the read-only store and the request to dispatch.
pub fn prepare<P>(
    invocation: &Invocation,
    backend: &dyn ConfigurationBackend,
    prompter: &mut P,
) -> Result<(ConfigurationStore, UploadRequest)>
where
    P: Prompter + ?Sized,
{
    debug!(stage = %Stage::Start);

    let mut store = ConfigurationStore::load_with(backend, invocation.config.as_deref());
    debug!(stage = %Stage::ConfigLoaded, config_path = %store.path().display());

    apply_overrides(&mut store, &invocation.overrides, prompter)?;
    store.require_complete()?;
    debug!(stage = %Stage::OverridesApplied);

    let (mode, path) = validate_mode(
        invocation.directory.as_deref(),
        invocation.metadata.as_deref(),
        invocation.batch,
    )?;
    debug!(stage = %Stage::ModeValidated, %mode);

    let request = UploadRequest::new(mode, path, invocation.force, invocation.assemblies);
    Ok((store, request))
}

/// Run one invocation and return the process exit code.
///
/// `engine_for` builds the engine from the resolved configuration; it is only
/// called once every pre-flight check has passed.
pub fn run_invocation<P, E, F>(
    invocation: &Invocation,
    backend: &dyn ConfigurationBackend,
    prompter: &mut P,
    engine_for: F,
) -> i32
where
    P: Prompter + ?Sized,
    E: UploadEngine,
    F: FnOnce(&ConfigurationStore) -> E,
{
    let (store, request) = match prepare(invocation, backend, prompter) {
        Ok(prepared) => prepared,
        Err(e) => return report(&e),
    };

    let engine = engine_for(&store);
    let exit_code = dispatch(&engine, &request);
    debug!(stage = %Stage::Dispatched, exit_code);

    info!(stage = %Stage::Done, exit_code, "Invocation finished");
    exit_code
}

fn report(e: &Error) -> i32 {
    error!(stage = %Stage::Done, error = %e, "Invocation aborted before upload");
    match e {
        Error::DirectoryNotWritable { .. } => eprintln!("ERROR! {e}"),
        _ => eprintln!("{e}"),
    }
    e.exit_code()
}

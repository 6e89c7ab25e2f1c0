//! Command Line Interface (CLI) layer for the uploader.
//!
//! This module defines argument parsing (`args`) and the orchestration logic
//! (`runner`) that wires parsed options to `irida_uploader::api`.
//!
//! If you are embedding the uploader into another application, prefer using
//! `irida_uploader::run_invocation` with your own engine instead of the CLI code.
pub mod args;
pub mod runner;

pub use args::{CliArgs, normalize_args};
pub use runner::run;

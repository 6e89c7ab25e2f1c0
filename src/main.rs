//! IRIDA Uploader CLI entrypoint.
//!
//! Provides a thin wrapper over the `cli` module: parse args, resolve configuration,
//! dispatch to a single-run, batch, or metadata upload, and exit with its status.
//! For programmatic use, prefer the library API (`irida_uploader::api`).

use clap::Parser;

mod cli;

fn main() {
    let args = cli::CliArgs::parse_from(cli::normalize_args(std::env::args_os()));
    std::process::exit(cli::run(args));
}

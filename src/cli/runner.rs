use tracing::debug;
use tracing_subscriber::EnvFilter;

use irida_uploader::{StagingEngine, TerminalPrompter, TomlFileBackend, run_invocation};

use super::args::CliArgs;

/// Install a stderr subscriber only when `--log` or `RUST_LOG` asks for one.
///
/// Without either, stderr carries only the one-line diagnostics printed by
/// the front end and the engine.
fn init_logging(verbose: bool) {
    let from_env = std::env::var_os("RUST_LOG").is_some();
    if !verbose && !from_env {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run(args: CliArgs) -> i32 {
    init_logging(args.log);
    debug!(
        directory = ?args.directory,
        metadata = ?args.metadata,
        config = ?args.config,
        "Arguments parsed"
    );

    let invocation = args.into_invocation();
    run_invocation(
        &invocation,
        &TomlFileBackend,
        &mut TerminalPrompter,
        StagingEngine::new,
    )
}

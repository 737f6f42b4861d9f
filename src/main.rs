//! modcompat binary entry point.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use modcompat::cli::{self, Cli};
use modcompat::ui::output::{self, Verbosity};

/// Environment variable holding a log filter (EnvFilter syntax).
const LOG_ENV: &str = "MODCOMPAT_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    setup_tracing(Verbosity::from_flags(cli.quiet, cli.debug));

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(describe(&err));
            ExitCode::FAILURE
        }
    }
}

/// Outermost context plus the root cause.
///
/// Library errors already embed their sources, so the full chain repeats.
fn describe(err: &anyhow::Error) -> String {
    let root = err.root_cause();
    if err.chain().count() > 1 {
        format!("{}: {}", err, root)
    } else {
        err.to_string()
    }
}

fn setup_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

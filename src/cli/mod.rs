//! cli
//!
//! Command-line interface layer for modcompat.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Handlers build an [`crate::session::IndexSession`]
//! or call the metadata loader directly, then format the result through
//! [`crate::ui::output`].

pub mod args;
pub mod commands;

pub use args::{Cli, Command, Shell};

use std::path::PathBuf;

use crate::ui::output::Verbosity;

/// State shared by every command handler.
#[derive(Debug, Clone)]
pub struct Context {
    /// Explicit configuration file, if given
    pub config: Option<PathBuf>,
    /// Working directory, for config lookup
    pub cwd: PathBuf,
    /// Output verbosity
    pub verbosity: Verbosity,
}

impl Context {
    /// Build the context from parsed flags.
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        Ok(Self {
            config: cli.config.clone(),
            cwd: std::env::current_dir()?,
            verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
        })
    }
}

/// Run a parsed command line.
///
/// This is the main entry point called from `main.rs` once logging is up.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = Context::from_cli(&cli)?;
    commands::dispatch(cli.command, &ctx)
}

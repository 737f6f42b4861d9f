//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Runs the library operation
//! 3. Formats and displays output

mod completion;
mod inspect;
mod scan;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use inspect::inspect;
pub use scan::scan;

use crate::cli::args::Command;
use crate::cli::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Inspect { jar, json } => inspect::inspect(ctx, &jar, json),
        Command::Scan {
            mods,
            libraries,
            checks,
        } => scan::scan(ctx, &mods, &libraries, &checks),
        Command::Completion { shell } => completion::completion(shell),
    }
}

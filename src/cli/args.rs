//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Use this configuration file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// modcompat - Fabric mod pre-indexing for compatibility checks
#[derive(Parser, Debug)]
#[command(name = "modcompat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this configuration file instead of searching for one
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the mod metadata of a jar
    #[command(
        name = "inspect",
        long_about = "Parse and display the fabric.mod.json of a jar.\n\n\
            Prints entrypoints grouped by category, the access widener, and \
            the nested jars the mod bundles. A jar without mod metadata is \
            not an error.",
        after_help = "\
EXAMPLES:
    # Human-readable summary
    modcompat inspect mods/sodium.jar

    # Machine-readable output
    modcompat inspect mods/sodium.jar --json"
    )]
    Inspect {
        /// Jar to inspect
        jar: PathBuf,

        /// Print the metadata as JSON
        #[arg(long)]
        json: bool,
    },

    /// Pre-index mods and libraries and query the reflection oracle
    #[command(
        name = "scan",
        long_about = "Run one indexing session.\n\n\
            Every library is pre-indexed first (its entrypoints are not \
            scanned), then every mod. Each archive and the nested jars it \
            declares are indexed. Afterwards each --check class is looked up \
            in the entrypoint registry.",
        after_help = "\
EXAMPLES:
    # Scan a mod against a library and check one class
    modcompat scan --mod mods/a.jar --library libs/fabric-api.jar \\
        --check com.example.ExampleMod

    # Slashed class names work too
    modcompat scan --mod mods/a.jar --check com/example/ExampleMod"
    )]
    Scan {
        /// Jar checked directly (repeatable)
        #[arg(long = "mod", value_name = "JAR")]
        mods: Vec<PathBuf>,

        /// Jar that is only a dependency (repeatable)
        #[arg(long = "library", value_name = "JAR")]
        libraries: Vec<PathBuf>,

        /// Class to look up in the reflection oracle (repeatable)
        #[arg(long = "check", value_name = "CLASS")]
        checks: Vec<String>,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
EXAMPLES:
    # Bash
    modcompat completion bash > ~/.local/share/bash-completion/completions/modcompat

    # Zsh
    modcompat completion zsh > \"${fpath[1]}/_modcompat\"

    # Fish
    modcompat completion fish > ~/.config/fish/completions/modcompat.fish

    # PowerShell
    modcompat completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn scan_flags_repeat() {
        let cli = Cli::try_parse_from([
            "modcompat", "scan", "--mod", "a.jar", "--mod", "b.jar", "--library", "l.jar",
            "--check", "x.Y",
        ])
        .unwrap();

        match cli.command {
            Command::Scan {
                mods,
                libraries,
                checks,
            } => {
                assert_eq!(mods, [PathBuf::from("a.jar"), PathBuf::from("b.jar")]);
                assert_eq!(libraries, [PathBuf::from("l.jar")]);
                assert_eq!(checks, ["x.Y"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["modcompat", "inspect", "a.jar", "-q", "--config", "c.toml"])
            .unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
    }
}

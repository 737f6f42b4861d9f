//! modcompat - Fabric mod pre-indexing for compatibility checks
//!
//! Before a mod compatibility checker indexes a jar, modcompat reads the
//! jar's `fabric.mod.json`. It records the classes declared as
//! entrypoints, which the loader instantiates reflectively, and hands
//! every bundled nested jar to the indexer so its classes are visible
//! too.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer
//! - [`session`] - One indexing run: plugins, indexer, oracle queries
//! - [`plugin`] - The plugin interface a session drives
//! - [`fabric`] - The Fabric plugin: entrypoint registry and nested jars
//! - [`core`] - Domain types, metadata parsing, configuration
//! - [`archive`] - Read access to jar files
//! - [`index`] - The indexing collaborator
//! - [`ui`] - User-facing output
//!
//! # Invariants
//!
//! 1. A failed document never touches the registry or other archives
//! 2. Entrypoints are registered only from fully parsed documents
//! 3. No temporary file outlives the indexing of its nested jar

pub mod archive;
pub mod cli;
pub mod core;
pub mod fabric;
pub mod index;
pub mod plugin;
pub mod session;
pub mod ui;

//! core::metadata
//!
//! Mod metadata document: schema, parser, and archive loading.
//!
//! # Modules
//!
//! - [`schema`] - Parsed model and error types (v1)
//! - [`parser`] - Streaming token-driven parser
//! - [`load`] - Finding the metadata entry inside an archive
//!
//! # Document Format
//!
//! A single JSON object stored as `fabric.mod.json` at the archive root:
//!
//! | field | type | required |
//! |---|---|---|
//! | `schemaVersion` | integer, must be 1 | yes |
//! | `entrypoints` | object of string to array of string or `{adapter?, value}` | no |
//! | `jars` | array of `{file}` | no |
//! | `accessWidener` | string | no |
//!
//! Any other field, at any depth, is ignored.

pub mod load;
pub mod parser;
pub mod schema;

// Re-export commonly used types
pub use load::{load_metadata, LoadError};
pub use parser::{parse_metadata, parse_metadata_str};
pub use schema::{
    EntrypointEntry, MetadataError, ModMetadata, Shape, DEFAULT_ADAPTER, METADATA_ENTRY,
    SCHEMA_VERSION,
};

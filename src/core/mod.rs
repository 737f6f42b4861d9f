//! core
//!
//! Core domain types, schemas, and configuration for modcompat.
//!
//! # Modules
//!
//! - [`types`] - Strong types: ClassName, ReflectionAccess
//! - [`metadata`] - Mod metadata schema, parser, and loading
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing keeps class identifiers in one canonical form
//! - Schemas are strict where they matter and tolerant of unknown fields
//! - Errors say where in the document they happened

pub mod config;
pub mod metadata;
pub mod types;

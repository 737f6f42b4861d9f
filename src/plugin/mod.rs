//! plugin
//!
//! The interface between an indexing session and format-specific plugins.
//!
//! # Lifecycle
//!
//! 1. `initialize` once per process, to claim configuration sections
//! 2. `pre_index_library` / `pre_index_mod` once per archive, before the
//!    session indexes that archive itself
//! 3. `is_class_accessed_via_reflection` any time after, for the rest of
//!    the session
//!
//! Pre-index failures are scoped to one archive. The session decides
//! whether to skip it or stop.

use std::path::Path;

use thiserror::Error;

use crate::archive::ArchiveError;
use crate::core::config::SectionRegistry;
use crate::core::metadata::{LoadError, MetadataError};
use crate::core::types::ReflectionAccess;
use crate::fabric::ExtractError;
use crate::index::Indexer;

/// Errors from pre-indexing one archive.
#[derive(Debug, Error)]
pub enum PreIndexError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("invalid mod metadata in '{archive}': {source}")]
    Metadata {
        archive: String,
        #[source]
        source: MetadataError,
    },

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("indexing nested archive '{entry}' failed: {source}")]
    Index {
        entry: String,
        #[source]
        source: std::io::Error,
    },
}

impl PreIndexError {
    pub(crate) fn from_load(archive: &Path, err: LoadError) -> Self {
        match err {
            LoadError::Archive(err) => PreIndexError::Archive(err),
            LoadError::Metadata(source) => PreIndexError::Metadata {
                archive: archive.display().to_string(),
                source,
            },
        }
    }
}

/// What one pre-index call did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreIndexReport {
    /// Whether the archive carried a metadata document
    pub metadata_found: bool,
    /// Entrypoint classes added to the registry by this call
    pub entrypoints_registered: usize,
    /// Nested archive entries handed to the indexer, in order
    pub nested_indexed: Vec<String>,
}

/// A format-specific plugin.
pub trait Plugin: Send + Sync {
    /// Stable identifier.
    fn id(&self) -> &'static str;

    /// One-time setup: claim configuration sections.
    fn initialize(&self, sections: &mut SectionRegistry);

    /// Pre-index an archive that is only a dependency of what is checked.
    fn pre_index_library(
        &self,
        indexer: &mut dyn Indexer,
        path: &Path,
    ) -> Result<PreIndexReport, PreIndexError>;

    /// Pre-index an archive that is checked directly.
    fn pre_index_mod(
        &self,
        indexer: &mut dyn Indexer,
        path: &Path,
    ) -> Result<PreIndexReport, PreIndexError>;

    /// Whether `class` (path form) is known to be reached via reflection.
    fn is_class_accessed_via_reflection(&self, class: &str) -> ReflectionAccess;
}

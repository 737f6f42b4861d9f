//! session
//!
//! One indexing run.
//!
//! # Design
//!
//! An [`IndexSession`] owns the plugins and the indexer for the length of
//! a run. Each archive added to the session is first offered to every
//! plugin (pre-indexing), then indexed itself. Oracle queries are
//! answered by asking every plugin and keeping the strongest answer.
//!
//! # Failures
//!
//! A failure is always scoped to one archive. With `keep_going` set the
//! archive is recorded as skipped and the run continues; otherwise the
//! error is returned and the caller decides. An archive whose metadata
//! document is invalid is still indexed as a plain archive first.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::config::SectionRegistry;
use crate::core::types::ReflectionAccess;
use crate::index::Indexer;
use crate::plugin::{Plugin, PreIndexError, PreIndexReport};

/// Errors from adding an archive to a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("plugin '{plugin}' failed on '{}': {source}", archive.display())]
    PreIndex {
        plugin: &'static str,
        archive: PathBuf,
        #[source]
        source: PreIndexError,
    },

    #[error("failed to index '{}': {source}", archive.display())]
    Index {
        archive: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SessionError {
    /// The archive the failure belongs to.
    pub fn archive(&self) -> &Path {
        match self {
            SessionError::PreIndex { archive, .. } | SessionError::Index { archive, .. } => {
                archive
            }
        }
    }
}

/// How an archive takes part in the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveRole {
    /// Checked directly; its entrypoints are scanned
    Mod,
    /// Only a dependency of what is checked
    Library,
}

/// An archive skipped because of a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedArchive {
    pub path: PathBuf,
    pub reason: String,
}

/// Running totals for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub mods: usize,
    pub libraries: usize,
    pub with_metadata: usize,
    pub entrypoints_registered: usize,
    pub nested_indexed: usize,
    pub skipped: Vec<SkippedArchive>,
}

impl SessionSummary {
    fn record(&mut self, report: &PreIndexReport) {
        self.with_metadata += usize::from(report.metadata_found);
        self.entrypoints_registered += report.entrypoints_registered;
        self.nested_indexed += report.nested_indexed.len();
    }
}

/// A run-scoped indexing session.
pub struct IndexSession<I: Indexer> {
    plugins: Vec<Box<dyn Plugin>>,
    indexer: I,
    keep_going: bool,
    summary: SessionSummary,
}

impl<I: Indexer> IndexSession<I> {
    /// Create a session with no plugins that stops at the first failure.
    pub fn new(indexer: I) -> Self {
        Self {
            plugins: Vec::new(),
            indexer,
            keep_going: false,
            summary: SessionSummary::default(),
        }
    }

    /// Skip failing archives instead of stopping.
    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    /// Add a plugin and let it claim its configuration sections.
    pub fn register(&mut self, plugin: Box<dyn Plugin>, sections: &mut SectionRegistry) {
        plugin.initialize(sections);
        tracing::debug!(plugin = plugin.id(), "plugin registered");
        self.plugins.push(plugin);
    }

    /// Pre-index and index an archive checked directly.
    pub fn add_mod(&mut self, path: &Path) -> Result<(), SessionError> {
        self.add(path, ArchiveRole::Mod)
    }

    /// Pre-index and index a dependency archive.
    pub fn add_library(&mut self, path: &Path) -> Result<(), SessionError> {
        self.add(path, ArchiveRole::Library)
    }

    /// Pre-index and index an archive.
    ///
    /// # Errors
    ///
    /// Returns the first failure for this archive unless the session
    /// keeps going, in which case the archive is recorded as skipped.
    pub fn add(&mut self, path: &Path, role: ArchiveRole) -> Result<(), SessionError> {
        match role {
            ArchiveRole::Mod => self.summary.mods += 1,
            ArchiveRole::Library => self.summary.libraries += 1,
        }

        match self.process(path, role) {
            Ok(()) => Ok(()),
            Err(err) if self.keep_going => {
                tracing::debug!(archive = %path.display(), error = %err, "skipping archive");
                self.summary.skipped.push(SkippedArchive {
                    path: path.to_path_buf(),
                    reason: err.to_string(),
                });
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    fn process(&mut self, path: &Path, role: ArchiveRole) -> Result<(), SessionError> {
        for plugin in &self.plugins {
            let result = match role {
                ArchiveRole::Mod => plugin.pre_index_mod(&mut self.indexer, path),
                ArchiveRole::Library => plugin.pre_index_library(&mut self.indexer, path),
            };
            match result {
                Ok(report) => self.summary.record(&report),
                Err(source) => {
                    // A bad document does not make the archive itself unusable.
                    if matches!(source, PreIndexError::Metadata { .. }) {
                        tracing::debug!(archive = %path.display(), "indexing as plain archive");
                        index_outer(&mut self.indexer, path)?;
                    }
                    return Err(SessionError::PreIndex {
                        plugin: plugin.id(),
                        archive: path.to_path_buf(),
                        source,
                    });
                }
            }
        }

        index_outer(&mut self.indexer, path)
    }

    /// Ask every plugin whether `class` (path form) is reached via reflection.
    pub fn is_class_accessed_via_reflection(&self, class: &str) -> ReflectionAccess {
        self.plugins
            .iter()
            .map(|plugin| plugin.is_class_accessed_via_reflection(class))
            .fold(ReflectionAccess::Unknown, ReflectionAccess::or)
    }

    /// Totals so far.
    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    /// The session's indexer.
    pub fn indexer(&self) -> &I {
        &self.indexer
    }

    /// Identifiers of the registered plugins.
    pub fn plugin_ids(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|plugin| plugin.id()).collect()
    }
}

fn index_outer<I: Indexer>(indexer: &mut I, path: &Path) -> Result<(), SessionError> {
    indexer
        .index_archive(path)
        .map_err(|source| SessionError::Index {
            archive: path.to_path_buf(),
            source,
        })
}

//! fabric::extract
//!
//! Copying nested jars out of their owning archive.
//!
//! # Lifecycle
//!
//! Each extracted jar lives in its own temporary file, owned by the
//! returned [`NestedArchive`]. The file is deleted when that value is
//! dropped, which covers success, copy failure, and indexer failure
//! alike.

use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::archive::{Archive, ArchiveError};
use crate::index::Indexer;
use crate::plugin::PreIndexError;

/// Default size of the copy buffer, in bytes.
pub const DEFAULT_COPY_BUFFER_SIZE: usize = 8 * 1024;

/// Prefix of temporary file names.
const TEMP_PREFIX: &str = "modcompat-nested-";

/// Errors from extracting a nested jar.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("failed to create temporary file for '{entry}': {source}")]
    TempFile {
        entry: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to copy '{entry}' out of '{archive}': {source}")]
    Copy {
        archive: PathBuf,
        entry: String,
        #[source]
        source: io::Error,
    },
}

/// A nested jar copied to a temporary file.
///
/// The file is removed when this is dropped.
#[derive(Debug)]
pub struct NestedArchive {
    entry: String,
    file: NamedTempFile,
    size: u64,
}

impl NestedArchive {
    /// In-archive path the jar was copied from.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Location of the temporary copy.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Number of bytes copied.
    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Copies nested jars to temporary storage and hands them to an indexer.
#[derive(Debug, Clone)]
pub struct NestedArchiveExtractor {
    pub(crate) temp_dir: Option<PathBuf>,
    pub(crate) buffer_size: usize,
}

impl Default for NestedArchiveExtractor {
    fn default() -> Self {
        Self {
            temp_dir: None,
            buffer_size: DEFAULT_COPY_BUFFER_SIZE,
        }
    }
}

impl NestedArchiveExtractor {
    /// Create an extractor using the OS temporary directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place temporary files in `dir` instead.
    pub fn temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Set the copy buffer size. Zero is bumped to one byte.
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    /// Copy `entry` out of `archive` into a new temporary file.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::EntryNotFound`] (wrapped) if the entry does
    /// not exist, or an I/O error if the copy cannot complete. No
    /// temporary file survives a failure.
    pub fn extract(
        &self,
        archive: &mut dyn Archive,
        entry: &str,
    ) -> Result<NestedArchive, ExtractError> {
        let archive_path = archive.path().to_path_buf();
        let mut reader = archive.open_entry(entry)?;

        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_PREFIX).suffix(".jar");
        let file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(|source| ExtractError::TempFile {
            entry: entry.to_string(),
            source,
        })?;

        let copy_error = |source| ExtractError::Copy {
            archive: archive_path.clone(),
            entry: entry.to_string(),
            source,
        };

        let mut writer = BufWriter::with_capacity(self.buffer_size, file);
        let size = io::copy(&mut reader, &mut writer).map_err(copy_error)?;
        let file = writer
            .into_inner()
            .map_err(|err| copy_error(err.into_error()))?;

        Ok(NestedArchive {
            entry: entry.to_string(),
            file,
            size,
        })
    }

    /// Extract each entry in order and index it before moving on.
    ///
    /// Each temporary file is gone by the time the next entry starts.
    /// Stops at the first failure.
    pub fn extract_all(
        &self,
        archive: &mut dyn Archive,
        entries: &[String],
        indexer: &mut dyn Indexer,
    ) -> Result<Vec<String>, PreIndexError> {
        let mut indexed = Vec::with_capacity(entries.len());

        for entry in entries {
            let nested = self.extract(archive, entry)?;
            tracing::info!(
                archive = %archive.path().display(),
                entry = %entry,
                bytes = nested.size(),
                "indexing nested archive"
            );

            indexer
                .index_archive(nested.path())
                .map_err(|source| PreIndexError::Index {
                    entry: entry.clone(),
                    source,
                })?;
            indexed.push(entry.clone());
        }

        Ok(indexed)
    }
}

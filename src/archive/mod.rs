//! archive
//!
//! Read access to jar archives.
//!
//! # Design
//!
//! The rest of the crate only sees the [`Archive`] trait: check whether
//! an entry exists, list entries, and open an entry as a byte stream.
//! [`JarArchive`] implements it over the `zip` crate for archives on
//! disk. Writing archives is out of scope.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use zip::result::ZipError;
use zip::ZipArchive;

/// Errors from archive access.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to open archive '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read archive '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: ZipError,
    },

    #[error("entry '{entry}' not found in archive '{path}'")]
    EntryNotFound { path: PathBuf, entry: String },
}

/// An archive whose entries can be looked up and streamed.
pub trait Archive {
    /// Location of the archive, for messages.
    fn path(&self) -> &Path;

    /// Check whether a file entry with this exact name exists.
    fn contains(&self, entry: &str) -> bool;

    /// Names of all entries, in archive order.
    fn entry_names(&self) -> Vec<String>;

    /// Open an entry for reading.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::EntryNotFound`] if there is no such entry.
    fn open_entry(&mut self, entry: &str) -> Result<Box<dyn Read + '_>, ArchiveError>;
}

/// A jar (zip) archive on disk.
pub struct JarArchive {
    path: PathBuf,
    zip: ZipArchive<BufReader<File>>,
}

impl JarArchive {
    /// Open the archive at `path` and read its central directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ArchiveError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| ArchiveError::Open {
            path: path.clone(),
            source,
        })?;
        let zip = ZipArchive::new(BufReader::new(file)).map_err(|source| ArchiveError::Read {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path, zip })
    }

    /// Number of entries in the archive.
    pub fn len(&self) -> usize {
        self.zip.len()
    }

    /// Check if the archive has no entries.
    pub fn is_empty(&self) -> bool {
        self.zip.is_empty()
    }
}

impl Archive for JarArchive {
    fn path(&self) -> &Path {
        &self.path
    }

    fn contains(&self, entry: &str) -> bool {
        self.zip.index_for_name(entry).is_some()
    }

    fn entry_names(&self) -> Vec<String> {
        self.zip.file_names().map(str::to_owned).collect()
    }

    fn open_entry(&mut self, entry: &str) -> Result<Box<dyn Read + '_>, ArchiveError> {
        match self.zip.by_name(entry) {
            Ok(file) => Ok(Box::new(file)),
            Err(ZipError::FileNotFound) => Err(ArchiveError::EntryNotFound {
                path: self.path.clone(),
                entry: entry.to_string(),
            }),
            Err(source) => Err(ArchiveError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

//! index
//!
//! The indexing collaborator.
//!
//! # Design
//!
//! Pre-indexing hands every archive it discovers to an [`Indexer`]. What
//! the indexer does with it is opaque to the plugin: bytecode analysis,
//! class listing, or nothing at all. The call is synchronous and the
//! archive path is only valid for its duration.
//!
//! [`ClassIndex`] is the indexer the command line uses: it records the
//! class names every archive contains.

use std::collections::BTreeSet;
use std::io;
use std::path::Path;

use crate::archive::{Archive, JarArchive};
use crate::core::types::ClassName;

/// Suffix of class file entries.
const CLASS_SUFFIX: &str = ".class";

/// Receives archives to index.
pub trait Indexer {
    /// Index the archive at `path`.
    ///
    /// The file may be deleted as soon as this returns.
    fn index_archive(&mut self, path: &Path) -> io::Result<()>;
}

/// Class names found across every indexed archive.
#[derive(Debug, Default)]
pub struct ClassIndex {
    classes: BTreeSet<ClassName>,
    archives: usize,
}

impl ClassIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a class was seen in any indexed archive.
    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// All classes, sorted.
    pub fn classes(&self) -> impl Iterator<Item = &ClassName> {
        self.classes.iter()
    }

    /// Number of distinct classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Number of archives indexed so far.
    pub fn archive_count(&self) -> usize {
        self.archives
    }
}

impl Indexer for ClassIndex {
    fn index_archive(&mut self, path: &Path) -> io::Result<()> {
        let jar = JarArchive::open(path).map_err(io::Error::other)?;

        let before = self.classes.len();
        self.classes.extend(
            jar.entry_names()
                .iter()
                .filter_map(|name| name.strip_suffix(CLASS_SUFFIX))
                .map(ClassName::from_path),
        );
        self.archives += 1;

        tracing::debug!(
            archive = %path.display(),
            new_classes = self.classes.len() - before,
            "indexed archive"
        );
        Ok(())
    }
}

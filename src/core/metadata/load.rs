//! core::metadata::load
//!
//! Locate and parse the metadata entry of an archive.

use std::io::BufReader;

use thiserror::Error;

use super::parser::parse_metadata;
use super::schema::{MetadataError, ModMetadata, METADATA_ENTRY};
use crate::archive::{Archive, ArchiveError};

/// Errors from loading metadata out of an archive.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("invalid fabric.mod.json: {0}")]
    Metadata(#[from] MetadataError),
}

/// Load the metadata document from an archive.
///
/// Returns `Ok(None)` when the archive has no metadata entry: such an
/// archive simply does not use this format.
pub fn load_metadata(archive: &mut dyn Archive) -> Result<Option<ModMetadata>, LoadError> {
    if !archive.contains(METADATA_ENTRY) {
        return Ok(None);
    }
    let entry = archive.open_entry(METADATA_ENTRY)?;
    let metadata = parse_metadata(BufReader::new(entry))?;
    Ok(Some(metadata))
}

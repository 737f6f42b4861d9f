//! fabric
//!
//! Pre-indexing for Fabric mods.
//!
//! # Modules
//!
//! - [`registry`] - Session-wide set of entrypoint classes
//! - [`extract`] - Copying nested jars to temporary storage
//!
//! # Flow
//!
//! For each archive: load `fabric.mod.json` (absent means nothing to
//! do), register the declared entrypoints when the archive is checked
//! directly, then extract and index every nested jar in document order.
//! Nested jars are indexed as plain archives: their own metadata is not
//! read.
//!
//! # Example
//!
//! ```no_run
//! use modcompat::fabric::FabricPlugin;
//! use modcompat::index::ClassIndex;
//! use modcompat::plugin::Plugin;
//! use std::path::Path;
//!
//! let plugin = FabricPlugin::new();
//! let mut index = ClassIndex::new();
//! plugin.pre_index_mod(&mut index, Path::new("mods/example.jar")).unwrap();
//!
//! let access = plugin.is_class_accessed_via_reflection("com/example/ExampleMod");
//! println!("{access}");
//! ```

pub mod extract;
pub mod registry;

pub use extract::{ExtractError, NestedArchive, NestedArchiveExtractor, DEFAULT_COPY_BUFFER_SIZE};
pub use registry::EntrypointRegistry;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::archive::{Archive, JarArchive};
use crate::core::config::{Config, ConfigError, SectionRegistry};
use crate::core::metadata::load_metadata;
use crate::core::types::{ClassName, ReflectionAccess};
use crate::index::Indexer;
use crate::plugin::{Plugin, PreIndexError, PreIndexReport};

/// Plugin identifier.
pub const PLUGIN_ID: &str = "fabric";

/// Name of this plugin's configuration section.
pub const FABRIC_SECTION: &str = "fabric";

/// The `[fabric]` configuration section.
///
/// # Example
///
/// ```toml
/// [fabric]
/// temp_dir = "/var/tmp/modcompat"
/// copy_buffer_size = 65536
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FabricSection {
    /// Directory for extracted nested jars (default: OS temp dir)
    pub temp_dir: Option<PathBuf>,

    /// Copy buffer size in bytes
    pub copy_buffer_size: Option<usize>,
}

impl FabricSection {
    /// Validate the section values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.copy_buffer_size == Some(0) {
            return Err(ConfigError::InvalidValue(
                "fabric.copy_buffer_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    fn extractor(&self) -> NestedArchiveExtractor {
        let mut extractor = NestedArchiveExtractor::new()
            .buffer_size(self.copy_buffer_size.unwrap_or(DEFAULT_COPY_BUFFER_SIZE));
        if let Some(dir) = &self.temp_dir {
            extractor = extractor.temp_dir(dir);
        }
        extractor
    }
}

/// The Fabric pre-indexing plugin.
///
/// Owns the session's [`EntrypointRegistry`]; create one plugin per
/// session.
#[derive(Debug, Default)]
pub struct FabricPlugin {
    registry: Arc<EntrypointRegistry>,
    extractor: NestedArchiveExtractor,
}

impl FabricPlugin {
    /// Create a plugin with default extraction settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a plugin configured from the `[fabric]` section.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let section: FabricSection = config.section(FABRIC_SECTION)?.unwrap_or_default();
        section.validate()?;
        Ok(Self::with_extractor(section.extractor()))
    }

    /// Create a plugin with a specific extractor.
    pub fn with_extractor(extractor: NestedArchiveExtractor) -> Self {
        Self {
            registry: Arc::default(),
            extractor,
        }
    }

    /// The session's entrypoint registry.
    pub fn registry(&self) -> &Arc<EntrypointRegistry> {
        &self.registry
    }

    /// Pre-index the archive at `path`.
    ///
    /// `scan_entrypoints` is set for archives checked directly and unset
    /// for libraries they depend on.
    pub fn pre_index(
        &self,
        indexer: &mut dyn Indexer,
        path: &Path,
        scan_entrypoints: bool,
    ) -> Result<PreIndexReport, PreIndexError> {
        let mut jar = JarArchive::open(path)?;
        self.pre_index_archive(&mut jar, indexer, scan_entrypoints)
    }

    /// Pre-index an already opened archive.
    ///
    /// # Errors
    ///
    /// Any error aborts this archive only. Entrypoints are registered
    /// only once the whole document has parsed, so a bad document never
    /// leaves partial entries behind.
    pub fn pre_index_archive(
        &self,
        archive: &mut dyn Archive,
        indexer: &mut dyn Indexer,
        scan_entrypoints: bool,
    ) -> Result<PreIndexReport, PreIndexError> {
        let metadata = load_metadata(archive)
            .map_err(|err| PreIndexError::from_load(archive.path(), err))?;

        let Some(metadata) = metadata else {
            tracing::debug!(archive = %archive.path().display(), "no mod metadata");
            return Ok(PreIndexReport::default());
        };

        let mut report = PreIndexReport {
            metadata_found: true,
            ..Default::default()
        };

        if scan_entrypoints {
            let classes = metadata.entrypoint_names().map(ClassName::from_qualified);
            report.entrypoints_registered = self.registry.extend(classes);
            tracing::debug!(
                archive = %archive.path().display(),
                registered = report.entrypoints_registered,
                "registered entrypoints"
            );
        }

        report.nested_indexed =
            self.extractor
                .extract_all(archive, metadata.nested_archives(), indexer)?;

        Ok(report)
    }
}

impl Plugin for FabricPlugin {
    fn id(&self) -> &'static str {
        PLUGIN_ID
    }

    fn initialize(&self, sections: &mut SectionRegistry) {
        sections.register(FABRIC_SECTION);
    }

    fn pre_index_library(
        &self,
        indexer: &mut dyn Indexer,
        path: &Path,
    ) -> Result<PreIndexReport, PreIndexError> {
        self.pre_index(indexer, path, false)
    }

    fn pre_index_mod(
        &self,
        indexer: &mut dyn Indexer,
        path: &Path,
    ) -> Result<PreIndexReport, PreIndexError> {
        self.pre_index(indexer, path, true)
    }

    fn is_class_accessed_via_reflection(&self, class: &str) -> ReflectionAccess {
        self.registry.access(class)
    }
}

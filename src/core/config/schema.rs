//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Layout
//!
//! ```toml
//! [scan]
//! keep_going = true
//!
//! # Plugin sections: any other table
//! [fabric]
//! temp_dir = "/tmp/modcompat"
//! copy_buffer_size = 65536
//! ```
//!
//! The core only knows `[scan]`. Every other top-level table is a plugin
//! section, kept as raw TOML until the owning plugin asks for it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Contents of a configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    /// Session settings
    pub scan: Option<ScanSettings>,

    /// Plugin sections by name
    #[serde(flatten)]
    pub sections: BTreeMap<String, toml::Table>,
}

/// Session settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScanSettings {
    /// Continue with the next archive when one fails to pre-index
    pub keep_going: Option<bool>,
}

/// Names of the configuration sections plugins have claimed.
///
/// Filled once at plugin initialization; sections present in the file
/// but claimed by nobody are reported as warnings.
#[derive(Debug, Clone, Default)]
pub struct SectionRegistry {
    names: BTreeSet<&'static str>,
}

impl SectionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a section name.
    ///
    /// Returns `false` if the name was already registered.
    pub fn register(&mut self, name: &'static str) -> bool {
        self.names.insert(name)
    }

    /// Check if a section name has been claimed.
    pub fn is_registered(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_and_sections_parse() {
        let file: ConfigFile = toml::from_str(
            r#"
            [scan]
            keep_going = false

            [fabric]
            temp_dir = "/tmp/x"
            "#,
        )
        .unwrap();

        assert_eq!(file.scan.unwrap().keep_going, Some(false));
        assert_eq!(
            file.sections["fabric"]["temp_dir"].as_str(),
            Some("/tmp/x")
        );
    }

    #[test]
    fn unknown_scan_key_rejected() {
        let result: Result<ConfigFile, _> = toml::from_str(
            r#"
            [scan]
            keep_going = true
            parallel = 4
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn registry_deduplicates() {
        let mut registry = SectionRegistry::new();
        assert!(registry.register("fabric"));
        assert!(!registry.register("fabric"));
        assert!(registry.is_registered("fabric"));
        assert!(!registry.is_registered("quilt"));
        assert_eq!(registry.names().collect::<Vec<_>>(), ["fabric"]);
    }
}

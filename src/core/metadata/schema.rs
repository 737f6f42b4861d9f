//! core::metadata::schema
//!
//! Mod metadata model (schema version 1).
//!
//! # Schema Design
//!
//! The document is forward compatible:
//! - `schemaVersion` is mandatory and must be `1`
//! - Unknown fields are skipped at every nesting level
//! - Entrypoint entries are either a bare string or an object with
//!   an optional `adapter` and a required `value`
//!
//! Only the parts this crate consumes survive parsing: entrypoint
//! names grouped by category, the access widener path, and the paths
//! of nested jars.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Name of the metadata entry inside a mod archive.
pub const METADATA_ENTRY: &str = "fabric.mod.json";

/// The only supported schema version.
pub const SCHEMA_VERSION: u64 = 1;

/// Language adapter assumed when an entrypoint object names none.
pub const DEFAULT_ADAPTER: &str = "default";

/// JSON shape found at a position, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Shape::Null => "null",
            Shape::Bool => "a boolean",
            Shape::Number => "a number",
            Shape::String => "a string",
            Shape::Array => "an array",
            Shape::Object => "an object",
        };
        f.write_str(text)
    }
}

/// Errors from metadata parsing.
///
/// Every variant aborts parsing of the current document. None of them
/// says anything about the archive itself, which stays usable as a
/// plain archive.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("unsupported schema version ({found}), only version {} is supported", SCHEMA_VERSION)]
    SchemaVersion { found: String },

    #[error("malformed `{field}`: expected {expected}, found {found}")]
    Malformed {
        field: String,
        expected: &'static str,
        found: Shape,
    },

    #[error("missing required field `{field}` in `{within}`")]
    MissingField { field: &'static str, within: String },

    #[error("`{field}` must be {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: Shape,
    },

    #[error("invalid JSON: {0}")]
    Syntax(String),

    #[error("failed to read metadata: {0}")]
    Io(#[from] std::io::Error),
}

/// One entrypoint declaration as written in the document.
///
/// Both forms name a single qualified identifier. The adapter is kept
/// for completeness but nothing downstream interprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrypointEntry {
    /// `"a.b.C"`
    Plain(String),
    /// `{ "adapter": "kotlin", "value": "a.b.C" }`
    Adapted { adapter: String, value: String },
}

impl EntrypointEntry {
    /// The qualified identifier, whichever form was used.
    pub fn value(&self) -> &str {
        match self {
            EntrypointEntry::Plain(value) | EntrypointEntry::Adapted { value, .. } => value,
        }
    }

    /// The language adapter, [`DEFAULT_ADAPTER`] for the bare form.
    pub fn adapter(&self) -> &str {
        match self {
            EntrypointEntry::Plain(_) => DEFAULT_ADAPTER,
            EntrypointEntry::Adapted { adapter, .. } => adapter,
        }
    }

    /// Collapse to the qualified identifier.
    pub fn into_value(self) -> String {
        match self {
            EntrypointEntry::Plain(value) | EntrypointEntry::Adapted { value, .. } => value,
        }
    }
}

/// Parsed mod metadata.
///
/// Only constructed by the parser, and only for schema version 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModMetadata {
    entrypoints: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    access_widener: Option<String>,
    nested_archives: Vec<String>,
}

impl ModMetadata {
    pub(crate) fn new(
        entrypoints: BTreeMap<String, Vec<String>>,
        access_widener: Option<String>,
        nested_archives: Vec<String>,
    ) -> Self {
        Self {
            entrypoints,
            access_widener,
            nested_archives,
        }
    }

    /// Entrypoint identifiers by category.
    ///
    /// A category mapped to an empty list was declared empty; a
    /// missing category was not declared at all.
    pub fn entrypoints(&self) -> &BTreeMap<String, Vec<String>> {
        &self.entrypoints
    }

    /// Identifiers of one category, if declared.
    pub fn category(&self, name: &str) -> Option<&[String]> {
        self.entrypoints.get(name).map(Vec::as_slice)
    }

    /// Every declared identifier across all categories.
    pub fn entrypoint_names(&self) -> impl Iterator<Item = &str> {
        self.entrypoints.values().flatten().map(String::as_str)
    }

    /// Path of the access widener file, if any.
    pub fn access_widener(&self) -> Option<&str> {
        self.access_widener.as_deref()
    }

    /// In-archive paths of nested jars, in document order.
    pub fn nested_archives(&self) -> &[String] {
        &self.nested_archives
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod entrypoint_entry {
        use super::*;

        #[test]
        fn plain_uses_default_adapter() {
            let entry = EntrypointEntry::Plain("a.b.C".into());
            assert_eq!(entry.value(), "a.b.C");
            assert_eq!(entry.adapter(), DEFAULT_ADAPTER);
        }

        #[test]
        fn adapted_keeps_adapter() {
            let entry = EntrypointEntry::Adapted {
                adapter: "kotlin".into(),
                value: "a.b.C".into(),
            };
            assert_eq!(entry.adapter(), "kotlin");
            assert_eq!(entry.into_value(), "a.b.C");
        }
    }

    mod mod_metadata {
        use super::*;

        #[test]
        fn names_span_categories() {
            let mut entrypoints = BTreeMap::new();
            entrypoints.insert("main".to_string(), vec!["a.Main".to_string()]);
            entrypoints.insert(
                "client".to_string(),
                vec!["a.Client".to_string(), "a.Other".to_string()],
            );
            entrypoints.insert("server".to_string(), vec![]);

            let meta = ModMetadata::new(entrypoints, None, vec![]);

            let mut names: Vec<_> = meta.entrypoint_names().collect();
            names.sort_unstable();
            assert_eq!(names, ["a.Client", "a.Main", "a.Other"]);
            assert_eq!(meta.category("server"), Some(&[] as &[String]));
            assert_eq!(meta.category("preLaunch"), None);
        }

        #[test]
        fn serializes_camel_case() {
            let meta = ModMetadata::new(
                BTreeMap::new(),
                Some("example.accesswidener".into()),
                vec!["META-INF/jars/lib.jar".into()],
            );
            let json = serde_json::to_value(&meta).unwrap();
            assert_eq!(json["accessWidener"], "example.accesswidener");
            assert_eq!(json["nestedArchives"][0], "META-INF/jars/lib.jar");
        }

        #[test]
        fn missing_access_widener_is_omitted() {
            let json = serde_json::to_value(ModMetadata::default()).unwrap();
            assert!(json.get("accessWidener").is_none());
        }
    }
}

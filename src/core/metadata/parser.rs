//! core::metadata::parser
//!
//! Streaming parser for the metadata document.
//!
//! # Design
//!
//! The document is read token by token through `serde_json`'s streaming
//! deserializer. Each position in the document has its own expectation
//! type ([`Expect`]) that lists the JSON shapes it accepts; every other
//! shape is rejected on the spot with a typed [`MetadataError`].
//! Unknown keys are consumed with [`IgnoredAny`] without building a
//! value tree.
//!
//! `schemaVersion` is checked before anything else regardless of where
//! it sits. Known fields that precede it are held as JSON values and
//! only checked once the version is known to be 1.
//!
//! Because `serde_json` only carries its own error type through the
//! visitors, the typed error is parked in a shared [`Failure`] slot and
//! picked up again once deserialization unwinds.
//!
//! # Example
//!
//! ```
//! use modcompat::core::metadata::parse_metadata_str;
//!
//! let meta = parse_metadata_str(r#"{
//!     "schemaVersion": 1,
//!     "entrypoints": {
//!         "main": ["com.example.ExampleMod"],
//!         "client": [{ "adapter": "kotlin", "value": "com.example.Client" }]
//!     },
//!     "jars": [{ "file": "META-INF/jars/lib.jar" }]
//! }"#).unwrap();
//!
//! assert_eq!(meta.category("client"), Some(&["com.example.Client".to_string()][..]));
//! assert_eq!(meta.nested_archives(), ["META-INF/jars/lib.jar"]);
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;

use serde::de::{self, DeserializeSeed, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde_json::error::Category;
use serde_json::{Number, Value as JsonValue};

use super::schema::{
    EntrypointEntry, MetadataError, ModMetadata, Shape, DEFAULT_ADAPTER, SCHEMA_VERSION,
};

/// Parse a metadata document from a reader.
///
/// The reader is consumed incrementally; wrap files and archive entries
/// in a `BufReader`. Trailing non-whitespace after the document is an
/// error.
///
/// # Errors
///
/// - [`MetadataError::SchemaVersion`] if `schemaVersion` is absent or not 1
/// - [`MetadataError::Malformed`] if a container has the wrong shape
/// - [`MetadataError::MissingField`] if `value` or `file` is absent
/// - [`MetadataError::TypeMismatch`] if a string field is not a string
/// - [`MetadataError::Syntax`] for invalid or truncated JSON
/// - [`MetadataError::Io`] if the reader fails
pub fn parse_metadata<R: Read>(reader: R) -> Result<ModMetadata, MetadataError> {
    let failure = Failure::default();
    let mut deserializer = serde_json::Deserializer::from_reader(reader);

    let parsed = Expecting(Document { failure: &failure })
        .deserialize(&mut deserializer)
        .and_then(|meta| deserializer.end().map(|()| meta));

    parsed.map_err(|err| failure.take().unwrap_or_else(|| from_json(err)))
}

/// Parse a metadata document held in memory.
pub fn parse_metadata_str(json: &str) -> Result<ModMetadata, MetadataError> {
    parse_metadata(json.as_bytes())
}

fn from_json(err: serde_json::Error) -> MetadataError {
    match err.classify() {
        Category::Io => MetadataError::Io(err.into()),
        Category::Syntax | Category::Eof | Category::Data => MetadataError::Syntax(err.to_string()),
    }
}

/// Slot holding the typed error behind a `serde_json` error.
#[derive(Default)]
struct Failure(RefCell<Option<MetadataError>>);

impl Failure {
    fn raise<E: de::Error>(&self, error: MetadataError) -> E {
        let err = E::custom(&error);
        self.0.replace(Some(error));
        err
    }

    fn take(&self) -> Option<MetadataError> {
        self.0.take()
    }
}

/// The shapes accepted at one position of the document.
///
/// Every hook rejects by default; implementors override the ones that
/// are valid where they stand.
trait Expect<'de>: Sized {
    type Value;

    const EXPECTED: &'static str;

    fn mismatch<E: de::Error>(&self, found: Shape) -> E;

    fn number<E: de::Error>(self, _value: Number) -> Result<Self::Value, E> {
        Err(self.mismatch(Shape::Number))
    }

    fn string<E: de::Error>(self, _value: &str) -> Result<Self::Value, E> {
        Err(self.mismatch(Shape::String))
    }

    fn array<A: SeqAccess<'de>>(self, _seq: A) -> Result<Self::Value, A::Error> {
        Err(self.mismatch(Shape::Array))
    }

    fn object<A: MapAccess<'de>>(self, _map: A) -> Result<Self::Value, A::Error> {
        Err(self.mismatch(Shape::Object))
    }
}

/// Adapts an [`Expect`] to serde's seed and visitor traits.
struct Expecting<X>(X);

impl<'de, X: Expect<'de>> DeserializeSeed<'de> for Expecting<X> {
    type Value = X::Value;

    fn deserialize<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<X::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de, X: Expect<'de>> Visitor<'de> for Expecting<X> {
    type Value = X::Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(X::EXPECTED)
    }

    fn visit_unit<E: de::Error>(self) -> Result<X::Value, E> {
        Err(self.0.mismatch(Shape::Null))
    }

    fn visit_bool<E: de::Error>(self, _value: bool) -> Result<X::Value, E> {
        Err(self.0.mismatch(Shape::Bool))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<X::Value, E> {
        self.0.number(Number::from(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<X::Value, E> {
        self.0.number(Number::from(value))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<X::Value, E> {
        match Number::from_f64(value) {
            Some(number) => self.0.number(number),
            None => Err(self.0.mismatch(Shape::Number)),
        }
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<X::Value, E> {
        self.0.string(value)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<X::Value, A::Error> {
        self.0.array(seq)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<X::Value, A::Error> {
        self.0.object(map)
    }
}

/// The top-level object.
struct Document<'a> {
    failure: &'a Failure,
}

impl<'de> Expect<'de> for Document<'_> {
    type Value = ModMetadata;

    const EXPECTED: &'static str = "a metadata object";

    fn mismatch<E: de::Error>(&self, found: Shape) -> E {
        self.failure.raise(MetadataError::Malformed {
            field: "document".to_string(),
            expected: "an object",
            found,
        })
    }

    fn object<A: MapAccess<'de>>(self, mut map: A) -> Result<ModMetadata, A::Error> {
        let failure = self.failure;
        let mut version_seen = false;
        let mut fields = Fields::default();
        // Fields read before `schemaVersion`, checked once the version is known.
        let mut pending = Vec::new();

        while let Some(key) = map.next_key::<String>()? {
            match (Field::from_key(&key), version_seen) {
                (Some(field), true) => {
                    map.next_value_seed(FieldSeed {
                        failure,
                        field,
                        fields: &mut fields,
                    })?;
                }
                (Some(field), false) => pending.push((field, map.next_value::<JsonValue>()?)),
                (None, _) if key == "schemaVersion" => {
                    map.next_value_seed(Expecting(SchemaVersion { failure }))?;
                    version_seen = true;
                }
                (None, _) => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        if !version_seen {
            return Err(failure.raise(MetadataError::SchemaVersion {
                found: "missing".to_string(),
            }));
        }

        let mut early = Fields::default();
        for (field, value) in pending {
            let seed = FieldSeed {
                failure,
                field,
                fields: &mut early,
            };
            seed.deserialize(value)
                .map_err(<A::Error as de::Error>::custom)?;
        }

        Ok(fields.or(early).into_metadata())
    }
}

/// Known top-level fields other than `schemaVersion`.
#[derive(Debug, Clone, Copy)]
enum Field {
    Entrypoints,
    Jars,
    AccessWidener,
}

impl Field {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "entrypoints" => Some(Field::Entrypoints),
            "jars" => Some(Field::Jars),
            "accessWidener" => Some(Field::AccessWidener),
            _ => None,
        }
    }
}

/// Top-level fields read so far.
#[derive(Default)]
struct Fields {
    entrypoints: Option<BTreeMap<String, Vec<String>>>,
    access_widener: Option<String>,
    nested_archives: Option<Vec<String>>,
}

impl Fields {
    /// Keep `self`'s values, falling back to `earlier` for unset fields.
    fn or(self, earlier: Fields) -> Fields {
        Fields {
            entrypoints: self.entrypoints.or(earlier.entrypoints),
            access_widener: self.access_widener.or(earlier.access_widener),
            nested_archives: self.nested_archives.or(earlier.nested_archives),
        }
    }

    fn into_metadata(self) -> ModMetadata {
        ModMetadata::new(
            self.entrypoints.unwrap_or_default(),
            self.access_widener,
            self.nested_archives.unwrap_or_default(),
        )
    }
}

/// Reads one top-level field into [`Fields`].
struct FieldSeed<'a> {
    failure: &'a Failure,
    field: Field,
    fields: &'a mut Fields,
}

impl<'de> DeserializeSeed<'de> for FieldSeed<'_> {
    type Value = ();

    fn deserialize<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        let failure = self.failure;
        match self.field {
            Field::Entrypoints => {
                let value = Expecting(Entrypoints { failure }).deserialize(deserializer)?;
                self.fields.entrypoints = Some(value);
            }
            Field::Jars => {
                let value = Expecting(Jars { failure }).deserialize(deserializer)?;
                self.fields.nested_archives = Some(value);
            }
            Field::AccessWidener => {
                let seed = StringField {
                    failure,
                    field: "accessWidener".to_string(),
                };
                self.fields.access_widener = Some(Expecting(seed).deserialize(deserializer)?);
            }
        }
        Ok(())
    }
}

/// `schemaVersion`: a number equal to 1.
struct SchemaVersion<'a> {
    failure: &'a Failure,
}

impl<'de> Expect<'de> for SchemaVersion<'_> {
    type Value = ();

    const EXPECTED: &'static str = "schema version 1";

    fn mismatch<E: de::Error>(&self, found: Shape) -> E {
        self.failure.raise(MetadataError::SchemaVersion {
            found: found.to_string(),
        })
    }

    fn number<E: de::Error>(self, value: Number) -> Result<(), E> {
        // 1.0 is numerically 1 as well
        if value.as_u64() == Some(SCHEMA_VERSION) || value.as_f64() == Some(1.0) {
            Ok(())
        } else {
            Err(self.failure.raise(MetadataError::SchemaVersion {
                found: value.to_string(),
            }))
        }
    }
}

/// A field that must hold a string.
struct StringField<'a> {
    failure: &'a Failure,
    field: String,
}

impl<'de> Expect<'de> for StringField<'_> {
    type Value = String;

    const EXPECTED: &'static str = "a string";

    fn mismatch<E: de::Error>(&self, found: Shape) -> E {
        self.failure.raise(MetadataError::TypeMismatch {
            field: self.field.clone(),
            expected: "a string",
            found,
        })
    }

    fn string<E: de::Error>(self, value: &str) -> Result<String, E> {
        Ok(value.to_owned())
    }
}

/// `entrypoints`: category name to list of entries.
struct Entrypoints<'a> {
    failure: &'a Failure,
}

impl<'de> Expect<'de> for Entrypoints<'_> {
    type Value = BTreeMap<String, Vec<String>>;

    const EXPECTED: &'static str = "an object of entrypoint lists";

    fn mismatch<E: de::Error>(&self, found: Shape) -> E {
        self.failure.raise(MetadataError::Malformed {
            field: "entrypoints".to_string(),
            expected: "an object",
            found,
        })
    }

    fn object<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut categories = BTreeMap::new();
        while let Some(category) = map.next_key::<String>()? {
            let list = EntrypointList {
                failure: self.failure,
                category: &category,
            };
            let names = map.next_value_seed(Expecting(list))?;
            // A repeated category replaces the earlier list.
            categories.insert(category, names);
        }
        Ok(categories)
    }
}

/// One category's array of entries.
struct EntrypointList<'a> {
    failure: &'a Failure,
    category: &'a str,
}

impl<'de> Expect<'de> for EntrypointList<'_> {
    type Value = Vec<String>;

    const EXPECTED: &'static str = "an array of entrypoints";

    fn mismatch<E: de::Error>(&self, found: Shape) -> E {
        self.failure.raise(MetadataError::Malformed {
            field: format!("entrypoints.{}", self.category),
            expected: "an array",
            found,
        })
    }

    fn array<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<String>, A::Error> {
        let mut names = Vec::new();
        loop {
            let item = EntrypointItem {
                failure: self.failure,
                category: self.category,
                index: names.len(),
            };
            match seq.next_element_seed(Expecting(item))? {
                Some(entry) => names.push(entry.into_value()),
                None => return Ok(names),
            }
        }
    }
}

/// A single entry: bare string or `{adapter?, value}`.
struct EntrypointItem<'a> {
    failure: &'a Failure,
    category: &'a str,
    index: usize,
}

impl EntrypointItem<'_> {
    fn field(&self) -> String {
        format!("entrypoints.{}[{}]", self.category, self.index)
    }
}

impl<'de> Expect<'de> for EntrypointItem<'_> {
    type Value = EntrypointEntry;

    const EXPECTED: &'static str = "an entrypoint string or object";

    fn mismatch<E: de::Error>(&self, found: Shape) -> E {
        self.failure.raise(MetadataError::Malformed {
            field: self.field(),
            expected: "a string or an object",
            found,
        })
    }

    fn string<E: de::Error>(self, value: &str) -> Result<EntrypointEntry, E> {
        Ok(EntrypointEntry::Plain(value.to_owned()))
    }

    fn object<A: MapAccess<'de>>(self, mut map: A) -> Result<EntrypointEntry, A::Error> {
        let field = self.field();
        let mut adapter = None;
        let mut value = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "adapter" => {
                    let seed = StringField {
                        failure: self.failure,
                        field: format!("{field}.adapter"),
                    };
                    adapter = Some(map.next_value_seed(Expecting(seed))?);
                }
                "value" => {
                    let seed = StringField {
                        failure: self.failure,
                        field: format!("{field}.value"),
                    };
                    value = Some(map.next_value_seed(Expecting(seed))?);
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        let Some(value) = value else {
            return Err(self.failure.raise(MetadataError::MissingField {
                field: "value",
                within: field,
            }));
        };

        Ok(EntrypointEntry::Adapted {
            adapter: adapter.unwrap_or_else(|| DEFAULT_ADAPTER.to_string()),
            value,
        })
    }
}

/// `jars`: array of `{file}` objects.
struct Jars<'a> {
    failure: &'a Failure,
}

impl<'de> Expect<'de> for Jars<'_> {
    type Value = Vec<String>;

    const EXPECTED: &'static str = "an array of nested jars";

    fn mismatch<E: de::Error>(&self, found: Shape) -> E {
        self.failure.raise(MetadataError::Malformed {
            field: "jars".to_string(),
            expected: "an array",
            found,
        })
    }

    fn array<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<String>, A::Error> {
        let mut files = Vec::new();
        loop {
            let jar = Jar {
                failure: self.failure,
                index: files.len(),
            };
            match seq.next_element_seed(Expecting(jar))? {
                Some(file) => files.push(file),
                None => return Ok(files),
            }
        }
    }
}

/// One nested jar reference.
struct Jar<'a> {
    failure: &'a Failure,
    index: usize,
}

impl<'de> Expect<'de> for Jar<'_> {
    type Value = String;

    const EXPECTED: &'static str = "a nested jar object";

    fn mismatch<E: de::Error>(&self, found: Shape) -> E {
        self.failure.raise(MetadataError::Malformed {
            field: format!("jars[{}]", self.index),
            expected: "an object",
            found,
        })
    }

    fn object<A: MapAccess<'de>>(self, mut map: A) -> Result<String, A::Error> {
        let mut file = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == "file" {
                let seed = StringField {
                    failure: self.failure,
                    field: format!("jars[{}].file", self.index),
                };
                file = Some(map.next_value_seed(Expecting(seed))?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }

        file.ok_or_else(|| {
            self.failure.raise(MetadataError::MissingField {
                field: "file",
                within: format!("jars[{}]", self.index),
            })
        })
    }
}

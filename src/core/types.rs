//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ClassName`] - Class identifier in path form (`a/b/C`)
//! - [`ReflectionAccess`] - Answer of the reflection oracle
//!
//! # Examples
//!
//! ```
//! use modcompat::core::types::ClassName;
//!
//! let class = ClassName::from_qualified("com.example.mod.ExampleMod");
//! assert_eq!(class.as_str(), "com/example/mod/ExampleMod");
//! ```

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;

/// Separator between package segments in a path-style class identifier.
pub const PATH_SEPARATOR: char = '/';

/// A class identifier in path form, as used inside class files and jars.
///
/// Qualified names declared in metadata documents use `.` between
/// segments; [`ClassName::from_qualified`] converts them. No other
/// validation is applied: the identifier is whatever the document says.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ClassName(String);

impl ClassName {
    /// Convert a dotted qualified name (`a.b.C`) to path form (`a/b/C`).
    pub fn from_qualified(name: &str) -> Self {
        Self(name.replace('.', &PATH_SEPARATOR.to_string()))
    }

    /// Wrap a name that is already in path form.
    pub fn from_path(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Accept either form.
    ///
    /// Names containing a `/` are taken as-is, anything else is treated
    /// as a dotted qualified name.
    pub fn parse(name: &str) -> Self {
        if name.contains(PATH_SEPARATOR) {
            Self::from_path(name)
        } else {
            Self::from_qualified(name)
        }
    }

    /// Get the path-form identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClassName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ClassName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Whether a class is known to be reached through reflection.
///
/// The answer is one-sided: there is no "not accessed" variant, because
/// the absence of a declaration never proves a class is unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReflectionAccess {
    /// The class is declared as reflectively invoked.
    Confirmed,
    /// Nothing is known either way.
    Unknown,
}

impl ReflectionAccess {
    /// Check if access is confirmed.
    pub fn is_confirmed(self) -> bool {
        matches!(self, ReflectionAccess::Confirmed)
    }

    /// Combine two answers: confirmed by either means confirmed.
    pub fn or(self, other: ReflectionAccess) -> ReflectionAccess {
        if self.is_confirmed() || other.is_confirmed() {
            ReflectionAccess::Confirmed
        } else {
            ReflectionAccess::Unknown
        }
    }
}

impl fmt::Display for ReflectionAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReflectionAccess::Confirmed => f.write_str("confirmed"),
            ReflectionAccess::Unknown => f.write_str("unknown"),
        }
    }
}

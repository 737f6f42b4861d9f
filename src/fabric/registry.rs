//! fabric::registry
//!
//! Session-wide set of classes declared as entrypoints.
//!
//! # Invariants
//!
//! - Insert-only: nothing is ever removed during a session
//! - One archive's entrypoints are inserted under a single write lock,
//!   so concurrent readers never see half of an archive
//! - Safe to share between threads

use std::collections::HashSet;

use parking_lot::RwLock;

use crate::core::types::{ClassName, ReflectionAccess};

/// Entrypoint classes collected across a session.
#[derive(Debug, Default)]
pub struct EntrypointRegistry {
    classes: RwLock<HashSet<ClassName>>,
}

impl EntrypointRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one class. Returns `true` if it was not present yet.
    pub fn insert(&self, class: ClassName) -> bool {
        self.classes.write().insert(class)
    }

    /// Add a batch of classes atomically.
    ///
    /// Returns how many were not present yet.
    pub fn extend<I>(&self, classes: I) -> usize
    where
        I: IntoIterator<Item = ClassName>,
    {
        let mut set = self.classes.write();
        classes
            .into_iter()
            .fold(0, |added, class| added + usize::from(set.insert(class)))
    }

    /// Check if a class (path form) is registered.
    pub fn contains(&self, class: &str) -> bool {
        self.classes.read().contains(class)
    }

    /// One-sided reflection oracle over the registry.
    pub fn access(&self, class: &str) -> ReflectionAccess {
        if self.contains(class) {
            ReflectionAccess::Confirmed
        } else {
            ReflectionAccess::Unknown
        }
    }

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.classes.read().len()
    }

    /// Check if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.classes.read().is_empty()
    }

    /// Registered classes, sorted.
    pub fn snapshot(&self) -> Vec<ClassName> {
        let mut classes: Vec<_> = self.classes.read().iter().cloned().collect();
        classes.sort_unstable();
        classes
    }
}

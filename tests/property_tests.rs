//! Property-based tests for metadata parsing and class identifiers.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use std::collections::BTreeMap;

use proptest::prelude::*;
use serde_json::{json, Map, Value};

use modcompat::core::metadata::{parse_metadata_str, ModMetadata};
use modcompat::core::types::{ClassName, ReflectionAccess};
use modcompat::fabric::EntrypointRegistry;

/// Strategy for dotted Java class names.
fn qualified_class() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z][a-z0-9_]{0,8}", 0..4).prop_flat_map(|packages| {
        "[A-Z][A-Za-z0-9_$]{0,12}".prop_map(move |simple| {
            let mut parts = packages.clone();
            parts.push(simple);
            parts.join(".")
        })
    })
}

/// Strategy for entrypoint categories with their classes.
fn entrypoint_map() -> impl Strategy<Value = BTreeMap<String, Vec<String>>> {
    prop::collection::btree_map("[a-z][a-z_]{0,10}", prop::collection::vec(qualified_class(), 0..5), 0..5)
}

/// Strategy for arbitrary JSON values of limited depth.
fn any_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[ -~]{0,16}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

fn document(entrypoints: Value) -> Value {
    json!({ "schemaVersion": 1, "entrypoints": entrypoints })
}

fn parse(value: &Value) -> ModMetadata {
    parse_metadata_str(&value.to_string()).unwrap()
}

proptest! {
    /// Bare strings and `{adapter, value}` objects yield the same classes.
    #[test]
    fn bare_and_object_entrypoints_are_equivalent(
        entrypoints in entrypoint_map(),
        adapter in "[a-z]{1,8}",
    ) {
        let bare: Map<String, Value> = entrypoints
            .iter()
            .map(|(category, classes)| (category.clone(), json!(classes)))
            .collect();
        let objects: Map<String, Value> = entrypoints
            .iter()
            .map(|(category, classes)| {
                let items: Vec<Value> = classes
                    .iter()
                    .map(|class| json!({ "adapter": adapter, "value": class }))
                    .collect();
                (category.clone(), Value::Array(items))
            })
            .collect();

        let from_bare = parse(&document(Value::Object(bare)));
        let from_objects = parse(&document(Value::Object(objects)));

        prop_assert_eq!(from_bare.entrypoints(), &entrypoints);
        prop_assert_eq!(from_objects.entrypoints(), &entrypoints);
    }

    /// Unknown top-level keys never change the result.
    #[test]
    fn unknown_keys_are_ignored(
        entrypoints in entrypoint_map(),
        extra in prop::collection::btree_map("x_[a-z]{1,8}", any_json(), 0..5),
    ) {
        let baseline = document(json!(entrypoints));
        let mut noisy = baseline.clone();
        if let Value::Object(map) = &mut noisy {
            map.extend(extra);
        }

        prop_assert_eq!(parse(&noisy), parse(&baseline));
    }

    /// Registered names come out in path form only.
    #[test]
    fn dotted_names_become_slashed(name in qualified_class()) {
        let class = ClassName::from_qualified(&name);
        prop_assert!(!class.as_str().contains('.'));
        prop_assert_eq!(class.as_str(), name.replace('.', "/"));
        prop_assert_eq!(ClassName::parse(class.as_str()), class.clone());
        prop_assert_eq!(ClassName::parse(&name), class);
    }

    /// Every registered entrypoint is confirmed; nothing else is.
    #[test]
    fn registry_confirms_exactly_what_was_registered(
        registered in prop::collection::hash_set(qualified_class(), 0..20),
        candidate in qualified_class(),
    ) {
        let registry = EntrypointRegistry::new();
        registry.extend(registered.iter().map(|name| ClassName::from_qualified(name)));

        for name in &registered {
            prop_assert_eq!(
                registry.access(ClassName::from_qualified(name).as_str()),
                ReflectionAccess::Confirmed
            );
        }
        let expected = if registered.contains(&candidate) {
            ReflectionAccess::Confirmed
        } else {
            ReflectionAccess::Unknown
        };
        prop_assert_eq!(registry.access(ClassName::from_qualified(&candidate).as_str()), expected);
    }
}

//! Property-based tests for settings flattening.
//!
//! Random two-level documents with sequence leaves are rendered to YAML,
//! loaded through a `ConfigStore`, and checked against the root-to-leaf
//! paths computed directly from the generated structure.

use std::collections::BTreeMap;

use feedwatch_settings::ConfigStore;
use proptest::prelude::*;
use tempfile::TempDir;

type Document = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Keys that YAML always reads back as plain strings.
fn key_strategy() -> impl Strategy<Value = String> {
    "k[a-z0-9_]{0,8}".prop_map(String::from)
}

/// Leaf values that YAML always reads back as plain strings.
fn value_strategy() -> impl Strategy<Value = String> {
    "v[a-zA-Z0-9 _-]{0,16}[a-z]".prop_map(String::from)
}

fn document_strategy() -> impl Strategy<Value = Document> {
    prop::collection::btree_map(
        key_strategy(),
        prop::collection::btree_map(
            key_strategy(),
            prop::collection::vec(value_strategy(), 0..5),
            0..4,
        ),
        0..6,
    )
}

fn expected_paths(doc: &Document) -> BTreeMap<String, String> {
    let mut expected = BTreeMap::new();
    for (outer, inner) in doc {
        for (key, items) in inner {
            for (index, value) in items.iter().enumerate() {
                expected.insert(format!("{outer}.{key}.{index}"), value.clone());
            }
        }
    }
    expected
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn flattened_keys_are_root_to_leaf_paths(doc in document_strategy()) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.yaml");
        std::fs::write(&path, serde_yaml::to_string(&doc).unwrap()).unwrap();

        let store = ConfigStore::new(&path);
        let flattened = store.get_raw().unwrap();

        prop_assert_eq!(flattened.as_ref().clone().into_inner(), expected_paths(&doc));
    }

    #[test]
    fn repeated_loads_are_identical(doc in document_strategy()) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.yaml");
        std::fs::write(&path, serde_yaml::to_string(&doc).unwrap()).unwrap();

        let store = ConfigStore::new(&path);
        let first = store.get_raw().unwrap();
        store.reset().unwrap();
        let second = store.get_raw().unwrap();

        prop_assert_eq!(first, second);
    }
}

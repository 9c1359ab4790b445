//! Parsed settings documents and the flattening algorithm.
//!
//! Responsibilities:
//! - Model a parsed source as a tagged tree (`Mapping`, `Sequence`, `Scalar`).
//! - Flatten that tree into dotted-path keys with string values.
//!
//! Does NOT handle:
//! - Reading or locating the source file (see `source.rs`).
//! - Caching the flattened result (see `ConfigStore`).
//!
//! Invariants:
//! - Mapping keys are joined with `.`; sequence elements use their zero-based index.
//! - Sequence order is preserved; mapping order has no effect on the result.
//! - Only scalar leaves produce entries. Empty mappings and sequences vanish.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::Serialize;
use serde_yaml::Value;
use serde_yaml::value::TaggedValue;

/// A parsed settings document before flattening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigDocument {
    /// Key/value pairs. Keys are the string form of the source keys.
    Mapping(Vec<(String, ConfigDocument)>),
    /// Ordered elements addressed by index.
    Sequence(Vec<ConfigDocument>),
    /// A leaf, already rendered as a string.
    Scalar(String),
}

impl ConfigDocument {
    /// Flattens the document into dotted-path keys.
    ///
    /// A scalar at the root has no path and is dropped.
    pub fn flatten(&self) -> FlattenedSettings {
        let mut out = BTreeMap::new();
        self.flatten_into("", &mut out);
        FlattenedSettings(out)
    }

    fn flatten_into(&self, prefix: &str, out: &mut BTreeMap<String, String>) {
        match self {
            Self::Mapping(entries) => {
                for (key, value) in entries {
                    value.flatten_into(&join_path(prefix, key), out);
                }
            }
            Self::Sequence(items) => {
                for (index, value) in items.iter().enumerate() {
                    value.flatten_into(&join_path(prefix, &index.to_string()), out);
                }
            }
            Self::Scalar(value) => {
                if !prefix.is_empty() {
                    out.insert(prefix.to_string(), value.clone());
                }
            }
        }
    }
}

fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

impl From<Value> for ConfigDocument {
    fn from(value: Value) -> Self {
        match value {
            Value::Mapping(map) => Self::Mapping(
                map.into_iter()
                    .map(|(key, value)| (scalar_string(key), Self::from(value)))
                    .collect(),
            ),
            Value::Sequence(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Tagged(tagged) => {
                let TaggedValue { value, .. } = *tagged;
                Self::from(value)
            }
            scalar => Self::Scalar(scalar_string(scalar)),
        }
    }
}

/// Renders a YAML value as the string stored for a leaf or used as a key.
///
/// `null` renders as the empty string.
fn scalar_string(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text,
        Value::Tagged(tagged) => {
            let TaggedValue { value, .. } = *tagged;
            scalar_string(value)
        }
        // Composite mapping keys have no dotted form; use their inline YAML.
        composite => serde_yaml::to_string(&composite)
            .map(|rendered| rendered.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Flat mapping from dotted path to string value.
///
/// Immutable once built. A fresh instance is produced on every store load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FlattenedSettings(BTreeMap<String, String>);

impl FlattenedSettings {
    /// Returns the value stored under `path`, if any.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl From<BTreeMap<String, String>> for FlattenedSettings {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl<'a> IntoIterator for &'a FlattenedSettings {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> ConfigDocument {
        ConfigDocument::from(serde_yaml::from_str::<Value>(yaml).unwrap())
    }

    #[test]
    fn test_flatten_nested_mappings_and_sequences() {
        let doc = parse(
            "db:\n  user: bar\n  pass: barcode\nsys:\n  users: [foo, bar, test, zoo]\n",
        );
        let flat = doc.flatten();

        assert_eq!(flat.get("db.user"), Some("bar"));
        assert_eq!(flat.get("db.pass"), Some("barcode"));
        assert_eq!(flat.get("sys.users.0"), Some("foo"));
        assert_eq!(flat.get("sys.users.3"), Some("zoo"));
        assert_eq!(flat.len(), 6);
        // Intermediate nodes are not leaves.
        assert!(!flat.contains("db"));
        assert!(!flat.contains("sys.users"));
    }

    #[test]
    fn test_flatten_sequence_of_mappings() {
        let doc = parse("topics:\n  - name: orders\n    partitions: 3\n  - name: refunds\n");
        let flat = doc.flatten();

        assert_eq!(flat.get("topics.0.name"), Some("orders"));
        assert_eq!(flat.get("topics.0.partitions"), Some("3"));
        assert_eq!(flat.get("topics.1.name"), Some("refunds"));
    }

    #[test]
    fn test_scalar_rendering() {
        let doc = parse("a: true\nb: 1.5\nc: ~\nd: 064\ne: '064'\n7: seven\n");
        let flat = doc.flatten();

        assert_eq!(flat.get("a"), Some("true"));
        assert_eq!(flat.get("b"), Some("1.5"));
        assert_eq!(flat.get("c"), Some(""));
        assert_eq!(flat.get("e"), Some("064"));
        assert_eq!(flat.get("7"), Some("seven"));
    }

    #[test]
    fn test_empty_containers_and_root_scalar_produce_nothing() {
        assert!(parse("a: {}\nb: []\n").flatten().is_empty());
        assert!(parse("just-a-string").flatten().is_empty());
        assert!(parse("").flatten().is_empty());
    }

    #[test]
    fn test_tagged_values_are_unwrapped() {
        let doc = parse("limit: !threshold 42\n");
        assert_eq!(doc.flatten().get("limit"), Some("42"));
    }

    #[test]
    fn test_flattened_settings_serializes_as_plain_map() {
        let doc = parse("db:\n  port: 5432\n");
        let json = serde_json::to_string(&doc.flatten()).unwrap();
        assert_eq!(json, r#"{"db.port":"5432"}"#);
    }
}

//! Ordered manifest document

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level manifest fields in insertion order.
///
/// Scalar writes replace the previous value in place, so a field keeps the
/// position it was first inserted at. Map-valued fields (scripts,
/// dependencies, exports, ...) are merged key by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManifestDocument {
    fields: Map<String, Value>,
}

impl ManifestDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a scalar (or whole-value) field
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Remove a top-level field entirely
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Merge entries into a map-valued field, creating it if absent
    pub fn merge<K, V, I>(&mut self, key: &str, entries: I) -> &mut Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let slot = self
            .fields
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        if let Value::Object(map) = slot {
            for (k, v) in entries {
                map.insert(k.into(), v.into());
            }
        }
        self
    }

    /// Remove one entry from a map-valued field
    pub fn remove_entry(&mut self, key: &str, entry: &str) -> Option<Value> {
        self.fields
            .get_mut(key)
            .and_then(Value::as_object_mut)
            .and_then(|map| map.shift_remove(entry))
    }

    /// Entries of a map-valued field
    pub fn entries(&self, key: &str) -> Option<&Map<String, Value>> {
        self.fields.get(key).and_then(Value::as_object)
    }

    /// Range declared for a package in `dependencies` or `devDependencies`
    pub fn dependency_range(&self, package: &str) -> Option<&str> {
        DEPENDENCY_FIELDS.iter().find_map(|field| {
            self.entries(field)
                .and_then(|deps| deps.get(package))
                .and_then(Value::as_str)
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// Fields holding package-name to version-range maps
pub const DEPENDENCY_FIELDS: &[&str] = &["dependencies", "devDependencies"];

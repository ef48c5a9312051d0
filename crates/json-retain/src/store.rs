//! [`UnknownFieldStore`]: ordered capture of every top-level payload field.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// An ordered mapping from wire-key to raw decoded JSON value.
///
/// After a decode the store holds *every* top-level key of the source
/// payload, including keys that are also bound to typed fields; encode
/// overwrites the bound keys rather than the decode pruning them. The store
/// is replaced wholesale on each decode and selectively overwritten on each
/// encode; it is never diffed against a previous version.
///
/// Key order follows the source payload (the backing map preserves insertion
/// order), but output key order is an implementation detail and must not be
/// relied upon: JSON objects are semantically unordered.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UnknownFieldStore {
    entries: Map<String, Value>,
}

impl UnknownFieldStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the raw value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts a value, returning the previous one if the key was present.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Borrows the backing object map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.entries
    }

    /// Consumes the store, yielding the backing object map.
    pub fn into_map(self) -> Map<String, Value> {
        self.entries
    }
}

impl From<Map<String, Value>> for UnknownFieldStore {
    fn from(entries: Map<String, Value>) -> Self {
        Self { entries }
    }
}

impl From<UnknownFieldStore> for Map<String, Value> {
    fn from(store: UnknownFieldStore) -> Self {
        store.entries
    }
}

impl<'a> IntoIterator for &'a UnknownFieldStore {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// Transparent: the store is its backing object on the wire.
impl Serialize for UnknownFieldStore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UnknownFieldStore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Map::deserialize(deserializer).map(Self::from)
    }
}

//! Insertion-ordered string-keyed maps.
//!
//! Field order in records and mask maps is visible in the output documents,
//! so these keep entries in insertion order instead of hashing or sorting.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A map from field name to value that iterates in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

/// Decoded values of one word, keyed by field name.
pub type FieldRecord = OrderedMap<u64>;

/// Hex-string masks as they appear in a document header.
pub type MaskMap = OrderedMap<String>;

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Inserts or replaces `name`. A replaced entry keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

impl<V: PartialEq> OrderedMap<V> {
    /// Equality that ignores entry order.
    pub fn same_entries(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of field names")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = OrderedMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            if map.contains_key(&key) {
                return Err(serde::de::Error::custom(format!("duplicate field `{key}`")));
            }
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order() {
        let mut record = FieldRecord::new();
        record.insert("tileId", 5);
        record.insert("xflip", 1);
        record.insert("palette", 3);
        assert_eq!(
            record.keys().collect::<Vec<_>>(),
            vec!["tileId", "xflip", "palette"]
        );
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut record = FieldRecord::new();
        record.insert("a", 1);
        record.insert("b", 2);
        assert_eq!(record.insert("a", 9), Some(1));
        assert_eq!(record.iter().next(), Some(("a", &9)));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_same_entries_ignores_order() {
        let left: FieldRecord = [("a", 1), ("b", 2)].into_iter().collect();
        let right: FieldRecord = [("b", 2), ("a", 1)].into_iter().collect();
        assert_ne!(left, right);
        assert!(left.same_entries(&right));
    }

    #[test]
    fn test_json_preserves_order() {
        let json = r#"{"z":1,"a":2,"m":3}"#;
        let record: FieldRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
        assert_eq!(serde_json::to_string(&record).unwrap(), json);
    }

    #[test]
    fn test_json_rejects_duplicates() {
        let result: Result<FieldRecord, _> = serde_json::from_str(r#"{"a":1,"a":2}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_json_rejects_negative_values() {
        let result: Result<FieldRecord, _> = serde_json::from_str(r#"{"a":-1}"#);
        assert!(result.is_err());
    }
}

//! Shared container types for per-column analysis results.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An insertion-ordered map from column name to a per-column result.
///
/// Column order follows the dataset schema, so iteration always yields columns
/// in the order they appeared in the header. Serializes as a JSON object whose
/// keys keep that order. Equality is order-sensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMap<T> {
    entries: IndexMap<String, T>,
}

impl<T> ColumnMap<T> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Creates an empty map with room for `capacity` columns.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Inserts a value, replacing any previous value for the same column in
    /// place.
    pub fn insert(&mut self, column: impl Into<String>, value: T) {
        self.entries.insert(column.into(), value);
    }

    /// Returns the value for a column.
    pub fn get(&self, column: &str) -> Option<&T> {
        self.entries.get(column)
    }

    /// Returns true if the map holds a value for the column.
    pub fn contains(&self, column: &str) -> bool {
        self.entries.contains_key(column)
    }

    /// Iterates over `(column, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Iterates over column names in schema order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for ColumnMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for ColumnMap<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl<T> FromIterator<(String, T)> for ColumnMap<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for ColumnMap<T> {
    type Item = (String, T);
    type IntoIter = indexmap::map::IntoIter<String, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_schema_order() {
        let mut map = ColumnMap::new();
        map.insert("zeta", 1);
        map.insert("alpha", 2);
        map.insert("mid", 3);

        let columns: Vec<&str> = map.columns().collect();
        assert_eq!(columns, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut map = ColumnMap::new();
        map.insert("a", 1);
        map.insert("a", 5);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), Some(&5));
        assert!(!map.contains("b"));
    }

    #[test]
    fn test_json_object_keeps_order() {
        let map: ColumnMap<u32> = vec![("b".to_string(), 2), ("a".to_string(), 1)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"b":2,"a":1}"#);

        let back: ColumnMap<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_equality_depends_on_order() {
        let forward: ColumnMap<u32> = vec![("a".to_string(), 1), ("b".to_string(), 2)]
            .into_iter()
            .collect();
        let reversed: ColumnMap<u32> = vec![("b".to_string(), 2), ("a".to_string(), 1)]
            .into_iter()
            .collect();
        assert_ne!(forward, reversed);
    }

    #[test]
    fn test_lookup_across_many_columns() {
        let map: ColumnMap<usize> = (0..5000).map(|i| (format!("col_{i}"), i)).collect();
        assert_eq!(map.len(), 5000);
        assert_eq!(map.get("col_4999"), Some(&4999));
        assert_eq!(map.columns().next(), Some("col_0"));
        assert!(!map.contains("col_5000"));
    }
}

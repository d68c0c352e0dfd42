//! Insertion-ordered table type for parsed TOML documents.
//!
//! This module provides [`Table`], a wrapper around [`IndexMap`] that keeps
//! entries in the order they were first assigned. The order is significant:
//! it is the order in which entries are rendered.
//!
//! ## Deep paths
//!
//! Tables are built through dotted key paths:
//!
//! - [`Table::ensure_path`] creates or descends a chain of sub-tables
//! - [`Table::set_path`] does the same, then inserts or overwrites the leaf
//! - [`Table::push_table_array`] appends a fresh table to an array of tables
//!
//! Descending into a key that holds an array of tables enters its last table,
//! so assignments after a `[[name]]` header land in the newest entry.
//!
//! ## Examples
//!
//! ```rust
//! use toml2php::{Table, Value};
//!
//! let mut table = Table::new();
//! table.set_path(&["server", "port"], Value::from(8080));
//! table.set_path(&["server", "host"], Value::from("localhost"));
//!
//! assert_eq!(table.len(), 1);
//! assert_eq!(
//!     table.get_path("server.host").and_then(|v| v.as_str()),
//!     Some("localhost")
//! );
//! ```

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::Value;

/// An ordered table of string keys to [`Value`]s.
///
/// Re-inserting an existing key replaces its value in place; the entry keeps
/// its original position.
///
/// # Examples
///
/// ```rust
/// use toml2php::{Table, Value};
///
/// let mut table = Table::new();
/// table.insert("first".to_string(), Value::from(1));
/// table.insert("second".to_string(), Value::from(2));
/// table.insert("first".to_string(), Value::from(3));
///
/// let keys: Vec<_> = table.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table(IndexMap<String, Value>);

impl Table {
    /// Creates an empty `Table`.
    #[must_use]
    pub fn new() -> Self {
        Table(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Table(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, returning the previous value for the key.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Descends through `keys`, creating missing sub-tables on the way, and
    /// returns the innermost table.
    ///
    /// A key holding an array of tables is entered through its last table.
    /// Any other non-table value in the way is replaced by an empty table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml2php::Table;
    ///
    /// let mut root = Table::new();
    /// root.ensure_path(&["a", "b"]);
    /// root.ensure_path(&["a", "c"]);
    ///
    /// let a = root.get("a").and_then(|v| v.as_table()).unwrap();
    /// assert_eq!(a.keys().collect::<Vec<_>>(), vec!["b", "c"]);
    /// ```
    pub fn ensure_path<S: AsRef<str>>(&mut self, keys: &[S]) -> &mut Table {
        let mut table = self;
        for key in keys {
            let slot = table
                .0
                .entry(key.as_ref().to_string())
                .or_insert_with(|| Value::Table(Table::new()));
            table = descend(slot);
        }
        table
    }

    /// Stores `value` at the dotted path `keys`, creating parent tables as
    /// needed. Returns the value previously stored at that path.
    ///
    /// An empty path leaves the table unchanged and returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml2php::{Table, Value};
    ///
    /// let mut root = Table::new();
    /// assert!(root.set_path(&["a", "b", "c"], Value::from(1)).is_none());
    /// assert!(root.set_path(&["a", "b", "c"], Value::from(2)).is_some());
    /// assert_eq!(root.get_path("a.b.c").and_then(|v| v.as_i64()), Some(2));
    /// ```
    pub fn set_path<S: AsRef<str>>(&mut self, keys: &[S], value: Value) -> Option<Value> {
        let (leaf, parents) = keys.split_last()?;
        self.ensure_path(parents)
            .insert(leaf.as_ref().to_string(), value)
    }

    /// Appends a new empty table to the array of tables at `keys` and returns it.
    ///
    /// The array is created when absent. A value at `keys` that is not an
    /// array of tables is replaced. An empty path returns `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml2php::{Table, Value};
    ///
    /// let mut root = Table::new();
    /// root.push_table_array(&["fruit"]).insert("name".into(), Value::from("apple"));
    /// root.push_table_array(&["fruit"]).insert("name".into(), Value::from("banana"));
    ///
    /// let fruit = root.get("fruit").and_then(|v| v.as_array()).unwrap();
    /// assert_eq!(fruit.len(), 2);
    /// assert_eq!(root.get_path("fruit.1.name").and_then(|v| v.as_str()), Some("banana"));
    /// ```
    pub fn push_table_array<S: AsRef<str>>(&mut self, keys: &[S]) -> &mut Table {
        let Some((leaf, parents)) = keys.split_last() else {
            return self;
        };
        let slot = self
            .ensure_path(parents)
            .0
            .entry(leaf.as_ref().to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        let items = table_array(slot);
        items.push(Value::Table(Table::new()));
        let last = items.len() - 1;
        descend(&mut items[last])
    }

    /// Copies every entry of `other` into this table.
    ///
    /// Keys already present are overwritten in place; new keys are appended
    /// in `other`'s order.
    pub fn merge(&mut self, other: Table) {
        for (key, value) in other {
            self.0.insert(key, value);
        }
    }

    /// Looks up a `.`-separated path. Segments that follow an array are
    /// parsed as element indices.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml2php::parse_document;
    ///
    /// let table = parse_document("[a]\nlist = [10, 20]").unwrap();
    /// assert_eq!(table.get_path("a.list.1").and_then(|v| v.as_i64()), Some(20));
    /// assert!(table.get_path("a.missing").is_none());
    /// ```
    #[must_use]
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Table(table) => table.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

/// Turns `slot` into something a path can descend through and enters it.
fn descend(slot: &mut Value) -> &mut Table {
    let enterable = match &*slot {
        Value::Table(_) => true,
        Value::Array(items) => matches!(items.last(), Some(Value::Table(_))),
        _ => false,
    };
    if !enterable {
        *slot = Value::Table(Table::new());
    }
    // `slot` is now a table or an array ending in a table.
    match slot {
        Value::Table(table) => table,
        Value::Array(items) => {
            let last = items.len() - 1;
            descend(&mut items[last])
        }
        other => {
            *other = Value::Table(Table::new());
            descend(other)
        }
    }
}

fn table_array(slot: &mut Value) -> &mut Vec<Value> {
    if !matches!(&*slot, Value::Array(items) if items.iter().all(Value::is_table)) {
        *slot = Value::Array(Vec::new());
    }
    match slot {
        Value::Array(items) => items,
        other => {
            *other = Value::Array(Vec::new());
            table_array(other)
        }
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

impl From<IndexMap<String, Value>> for Table {
    fn from(map: IndexMap<String, Value>) -> Self {
        Table(map)
    }
}

impl IntoIterator for Table {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Table {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Table(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(table: &Table) -> Vec<&str> {
        table.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_set_path_overwrites_in_place() {
        let mut table = Table::new();
        table.set_path(&["a"], Value::from(1));
        table.set_path(&["b"], Value::from(2));
        table.set_path(&["a"], Value::from(3));

        assert_eq!(keys(&table), vec!["a", "b"]);
        assert_eq!(table.get("a").and_then(Value::as_i64), Some(3));
    }

    #[test]
    fn test_set_path_empty_is_noop() {
        let mut table = Table::new();
        let empty: [&str; 0] = [];
        assert!(table.set_path(&empty, Value::from(1)).is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_ensure_path_replaces_scalar() {
        let mut table = Table::new();
        table.set_path(&["a"], Value::from("scalar"));
        table.ensure_path(&["a", "b"]);

        let a = table.get("a").and_then(Value::as_table).unwrap();
        assert!(a.get("b").is_some_and(Value::is_table));
    }

    #[test]
    fn test_ensure_path_keeps_existing_entries() {
        let mut table = Table::new();
        table.set_path(&["a", "x"], Value::from(1));
        table.ensure_path(&["a"]);
        assert_eq!(table.get_path("a.x").and_then(Value::as_i64), Some(1));
    }

    #[test]
    fn test_table_array_descent_enters_last_entry() {
        let mut table = Table::new();
        table.push_table_array(&["fruit"]);
        table.set_path(&["fruit", "name"], Value::from("apple"));
        table.push_table_array(&["fruit"]);
        table.set_path(&["fruit", "name"], Value::from("banana"));
        table.ensure_path(&["fruit", "physical"]);

        let fruit = table.get("fruit").and_then(Value::as_array).unwrap();
        assert_eq!(fruit.len(), 2);
        assert_eq!(table.get_path("fruit.0.name").and_then(Value::as_str), Some("apple"));
        assert!(table.get_path("fruit.0.physical").is_none());
        assert!(table.get_path("fruit.1.physical").is_some());
    }

    #[test]
    fn test_push_table_array_replaces_other_values() {
        let mut table = Table::new();
        table.set_path(&["list"], Value::Array(vec![Value::from(1)]));
        table.push_table_array(&["list"]);

        let list = table.get("list").and_then(Value::as_array).unwrap();
        assert_eq!(list, &vec![Value::Table(Table::new())]);
    }

    #[test]
    fn test_scalar_array_is_not_descended() {
        let mut table = Table::new();
        table.set_path(&["a"], Value::Array(vec![Value::from(1)]));
        table.set_path(&["a", "b"], Value::from(2));
        assert_eq!(table.get_path("a.b").and_then(Value::as_i64), Some(2));
    }

    #[test]
    fn test_ensure_path_replaces_empty_array() {
        let mut table = Table::new();
        table.set_path(&["a"], Value::Array(vec![]));
        table.ensure_path(&["a", "b"]).insert("c".to_string(), Value::from(1));

        assert!(table.get("a").is_some_and(Value::is_table));
        assert_eq!(table.get_path("a.b.c").and_then(Value::as_i64), Some(1));
    }

    #[test]
    fn test_push_table_array_over_scalar_and_nested() {
        let mut table = Table::new();
        table.set_path(&["x"], Value::from(true));
        table.push_table_array(&["x", "items"]).insert("n".to_string(), Value::from(1));
        table.push_table_array(&["x", "items"]).insert("n".to_string(), Value::from(2));

        assert_eq!(table.get_path("x.items.1.n").and_then(Value::as_i64), Some(2));
        let items = table.get_path("x.items").and_then(Value::as_array).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_merge_overwrites_in_place() {
        let mut target: Table = vec![
            ("a".to_string(), Value::from(1)),
            ("b".to_string(), Value::from(2)),
        ]
        .into_iter()
        .collect();
        let source: Table = vec![
            ("c".to_string(), Value::from(3)),
            ("a".to_string(), Value::from(4)),
        ]
        .into_iter()
        .collect();

        target.merge(source);
        assert_eq!(keys(&target), vec!["a", "b", "c"]);
        assert_eq!(target.get("a").and_then(Value::as_i64), Some(4));
    }

    #[test]
    fn test_get_path_misses() {
        let mut table = Table::new();
        table.set_path(&["a", "b"], Value::from(1));
        assert!(table.get_path("").is_none());
        assert!(table.get_path("a.b.c").is_none());
        assert!(table.get_path("a.x").is_none());
    }
}

//! An insertion-ordered, string-keyed map.
//!
//! `Map` is the node type of every plain object handled by this crate. Keys
//! are unique; inserting an existing key overwrites its value *in place*, so
//! the first insertion decides where the key appears during iteration. This
//! is the ordering rule flatten/merge/clean rely on when they rebuild objects.
//!
//! Entries live in an [`IndexMap`], so lookups, inserts and overwrites are
//! constant time however wide an object is, while iteration follows
//! insertion order.
//!
//! ## Examples
//!
//! ```
//! use objutil::Map;
//! use objutil::Value;
//!
//! let mut map = Map::new();
//! map.insert("b", 1);
//! map.insert("a", 2);
//! map.insert("b", 3);
//!
//! assert_eq!(map.keys().collect::<Vec<_>>(), ["b", "a"]);
//! assert_eq!(map["b"], Value::from(3));
//! assert_eq!(map["missing"], Value::Undefined);
//! ```
//!
//! ### Serde
//!
//! With the `serde` feature, a `Map` serializes as a map, skipping entries
//! whose value is [`Value::Undefined`] exactly like `JSON.stringify` does, and
//! deserializes from any map while keeping the order the deserializer yields.

use core::fmt;
use core::iter::FromIterator;
use core::iter::IntoIterator;
use core::ops::Index;

use indexmap::IndexMap;
use indexmap::map;

use crate::Value;

static UNDEFINED: Value = Value::Undefined;

/// Insertion-ordered map from `String` keys to [`Value`]s.
#[derive(Clone, Default)]
pub struct Map {
  entries: IndexMap<String, Value>,
}

impl Map {
  /// Creates an empty map. Does not allocate.
  pub fn new() -> Self {
    Self {
      entries: IndexMap::new(),
    }
  }

  /// Creates an empty map able to hold `capacity` entries without
  /// reallocating.
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      entries: IndexMap::with_capacity(capacity),
    }
  }

  /// Returns the number of entries.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Returns `true` if the map declares `key`, whatever its value, including
  /// [`Value::Undefined`].
  pub fn contains_key(&self, key: &str) -> bool {
    self.entries.contains_key(key)
  }

  /// Returns the value declared under `key`, or `None` if the key is absent.
  pub fn get(&self, key: &str) -> Option<&Value> {
    self.entries.get(key)
  }

  pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
    self.entries.get_mut(key)
  }

  /// Inserts `value` under `key`, returning the previous value if the key was
  /// already declared. An existing key keeps its position.
  pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<Value>
  where
    K: Into<String>,
    V: Into<Value>,
  {
    self.entries.insert(key.into(), value.into())
  }

  /// Returns a mutable reference to the value under `key`, inserting the
  /// result of `default` first if the key is absent.
  pub fn get_or_insert_with<F>(&mut self, key: &str, default: F) -> &mut Value
  where
    F: FnOnce() -> Value,
  {
    let index = match self.entries.get_index_of(key) {
      Some(i) => i,
      None => self.entries.insert_full(key.to_owned(), default()).0,
    };
    &mut self.entries[index]
  }

  /// Removes `key`, shifting later entries down to keep their order.
  pub fn remove(&mut self, key: &str) -> Option<Value> {
    self.entries.shift_remove(key)
  }

  pub fn clear(&mut self) {
    self.entries.clear();
  }

  /// Iterates over the keys in insertion order.
  pub fn keys(&self) -> impl DoubleEndedIterator<Item = &str> + '_ {
    self.entries.keys().map(String::as_str)
  }

  /// Iterates over the values in insertion order.
  pub fn values(&self) -> impl DoubleEndedIterator<Item = &Value> + '_ {
    self.entries.values()
  }

  pub fn iter(&self) -> Iter<'_> {
    Iter {
      inner: self.entries.iter(),
    }
  }

  pub fn iter_mut(&mut self) -> IterMut<'_> {
    IterMut {
      inner: self.entries.iter_mut(),
    }
  }

  /// Keeps only the entries for which `f` returns `true`, in order.
  pub fn retain<F>(&mut self, mut f: F)
  where
    F: FnMut(&str, &Value) -> bool,
  {
    self.entries.retain(|k, v| f(k, v));
  }
}

/// Borrowing iterator over the entries of a [`Map`].
pub struct Iter<'a> {
  inner: map::Iter<'a, String, Value>,
}

impl<'a> Iterator for Iter<'a> {
  type Item = (&'a String, &'a Value);

  fn next(&mut self) -> Option<Self::Item> {
    self.inner.next()
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.inner.size_hint()
  }
}

impl DoubleEndedIterator for Iter<'_> {
  fn next_back(&mut self) -> Option<Self::Item> {
    self.inner.next_back()
  }
}

impl ExactSizeIterator for Iter<'_> {}

/// Mutable iterator over the entries of a [`Map`]. Keys stay immutable.
pub struct IterMut<'a> {
  inner: map::IterMut<'a, String, Value>,
}

impl<'a> Iterator for IterMut<'a> {
  type Item = (&'a String, &'a mut Value);

  fn next(&mut self) -> Option<Self::Item> {
    self.inner.next()
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.inner.size_hint()
  }
}

impl ExactSizeIterator for IterMut<'_> {}

impl<'a> Index<&'a str> for Map {
  type Output = Value;

  /// Missing keys index to [`Value::Undefined`] instead of panicking.
  fn index(&self, key: &'a str) -> &Self::Output {
    self.get(key).unwrap_or(&UNDEFINED)
  }
}

impl fmt::Debug for Map {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map().entries(self.iter()).finish()
  }
}

/// Two maps are equal when they declare the same keys with equal values;
/// insertion order is not compared.
impl PartialEq for Map {
  fn eq(&self, other: &Self) -> bool {
    self.entries == other.entries
  }
}

impl<K, V> Extend<(K, V)> for Map
where
  K: Into<String>,
  V: Into<Value>,
{
  fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
    for (k, v) in iter {
      self.insert(k, v);
    }
  }
}

impl<K, V> FromIterator<(K, V)> for Map
where
  K: Into<String>,
  V: Into<Value>,
{
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let iter = iter.into_iter();
    let mut map = Self::with_capacity(iter.size_hint().0);
    map.extend(iter);
    map
  }
}

impl IntoIterator for Map {
  type Item = (String, Value);
  type IntoIter = map::IntoIter<String, Value>;

  fn into_iter(self) -> Self::IntoIter {
    self.entries.into_iter()
  }
}

impl<'a> IntoIterator for &'a Map {
  type Item = (&'a String, &'a Value);
  type IntoIter = Iter<'a>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl<'a> IntoIterator for &'a mut Map {
  type Item = (&'a String, &'a mut Value);
  type IntoIter = IterMut<'a>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter_mut()
  }
}

#[cfg(feature = "serde")]
mod serde_impl {
  use super::*;

  impl serde::Serialize for Map {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
      S: serde::Serializer,
    {
      use serde::ser::SerializeMap;
      let defined = self
        .values()
        .filter(|v| !matches!(v, Value::Undefined))
        .count();
      let mut map = serializer.serialize_map(Some(defined))?;
      for (k, v) in self.iter() {
        if !matches!(v, Value::Undefined) {
          map.serialize_entry(k, v)?;
        }
      }
      map.end()
    }
  }

  impl<'de> serde::Deserialize<'de> for Map {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
      D: serde::Deserializer<'de>,
    {
      use serde::de::MapAccess;
      use serde::de::Visitor;

      struct MapVisitor;

      impl<'de> Visitor<'de> for MapVisitor {
        type Value = Map;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
          formatter.write_str("a map")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
          A: MapAccess<'de>,
        {
          let mut map = Map::with_capacity(access.size_hint().unwrap_or(0));
          while let Some((key, value)) = access.next_entry::<String, Value>()? {
            map.insert(key, value);
          }
          Ok(map)
        }
      }

      deserializer.deserialize_map(MapVisitor)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn insert_keeps_first_position() {
    let mut map = Map::new();
    assert_eq!(map.insert("a", 1), None);
    map.insert("b", 2);
    assert_eq!(map.insert("a", 3), Some(Value::from(1)));
    assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(map["a"], Value::from(3));
  }

  #[test]
  fn declared_undefined_is_not_absent() {
    let mut map = Map::new();
    map.insert("a", Value::Undefined);
    assert!(map.contains_key("a"));
    assert_eq!(map.get("a"), Some(&Value::Undefined));
    assert_eq!(map.get("b"), None);
    assert_eq!(map["b"], Value::Undefined);
  }

  #[test]
  fn equality_ignores_order() {
    let left: Map = [("a", 1), ("b", 2)].into_iter().collect();
    let right: Map = [("b", 2), ("a", 1)].into_iter().collect();
    assert_eq!(left, right);

    let other: Map = [("a", 1), ("c", 2)].into_iter().collect();
    assert_ne!(left, other);
  }

  #[test]
  fn remove_shifts_later_entries() {
    let mut map: Map = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
    assert_eq!(map.remove("b"), Some(Value::from(2)));
    assert_eq!(map.remove("b"), None);
    assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "c"]);
  }

  #[test]
  fn get_or_insert_with_only_inserts_once() {
    let mut map = Map::new();
    *map.get_or_insert_with("a", || Value::from(1)) = Value::from(2);
    let value = map.get_or_insert_with("a", || Value::from(10));
    assert_eq!(*value, Value::from(2));
    assert_eq!(map.len(), 1);
  }

  #[test]
  fn retain_filters_entries() {
    let mut map: Map = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
    map.retain(|k, _| k != "b");
    assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "c"]);
  }

  #[test]
  fn clear_removes_every_entry() {
    let mut map: Map = [("a", 1), ("b", 2)].into_iter().collect();
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.get("a"), None);
  }

  #[test]
  fn wide_maps_keep_order_and_overwrite_in_place() {
    const WIDTH: usize = 50_000;
    let mut map: Map = (0..WIDTH).map(|i| (format!("k{i}"), i)).collect();
    assert_eq!(map.len(), WIDTH);
    assert_eq!(map.insert("k25000", "x"), Some(Value::from(25_000)));
    assert_eq!(map.keys().nth(25_000), Some("k25000"));
    assert_eq!(map["k49999"], Value::from(49_999));
    assert_eq!(map.remove("k0"), Some(Value::from(0)));
    assert_eq!(map.keys().next(), Some("k1"));

    let reversed: Map = map.clone().into_iter().rev().collect();
    assert_eq!(reversed, map);
  }

  #[cfg(feature = "serde")]
  mod serde_tests {
    use super::*;
    use serde_json;

    #[test]
    fn undefined_entries_are_skipped() {
      let mut map = Map::new();
      map.insert("id", 10);
      map.insert("name", Value::Undefined);
      map.insert("size", Value::Null);
      let json = serde_json::to_string(&map).unwrap();
      assert_eq!(json, r#"{"id":10,"size":null}"#);
    }

    #[test]
    fn deserialize_keeps_key_order() {
      let map: Map = serde_json::from_str(r#"{"z":1,"a":2,"m":3}"#).unwrap();
      assert_eq!(map.keys().collect::<Vec<_>>(), ["z", "a", "m"]);
    }
  }
}

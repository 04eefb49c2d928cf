//! Small helpers over slices.
//!
//! [`includes`] and [`missing`] work on any `PartialEq` item. [`unique`] and
//! [`distinct`] compare [`Value`]s deeply, either whole or through the value
//! found at a nested [`KeyPath`].

use crate::KeyPath;
use crate::Value;
use crate::read_nested_property;

static UNDEFINED: Value = Value::Undefined;

/// `true` when `items` contains `value`.
pub fn includes<T: PartialEq>(items: &[T], value: &T) -> bool {
  items.iter().any(|item| item == value)
}

/// The items of `a` that `b` does not contain, in the order of `a`.
///
/// ```rust
/// assert_eq!(objutil::missing(&["a", "b"], &["c", "a"]), ["b"]);
/// ```
pub fn missing<T: PartialEq + Clone>(a: &[T], b: &[T]) -> Vec<T> {
  a.iter().filter(|item| !includes(b, item)).cloned().collect()
}

fn comparison_key<'v>(item: &'v Value, key: Option<&KeyPath>) -> &'v Value {
  match key {
    None => item,
    Some(path) => {
      read_nested_property(item, path.segments()).unwrap_or(&UNDEFINED)
    }
  }
}

/// `true` when no two items share the same comparison key: the item itself
/// when `key` is `None`, otherwise the value at `key` inside each item
/// (absent paths compare as `undefined`).
pub fn unique(items: &[Value], key: Option<&KeyPath>) -> bool {
  let keys: Vec<&Value> =
    items.iter().map(|item| comparison_key(item, key)).collect();
  keys
    .iter()
    .enumerate()
    .all(|(i, current)| !keys[..i].contains(current))
}

/// The first item for each distinct comparison key, in order. See [`unique`]
/// for how keys are compared.
///
/// ```rust
/// use objutil::KeyPath;
/// use objutil::distinct;
/// use objutil::object;
///
/// let users = [
///   object! { "id" => 1, "name" => "john" },
///   object! { "id" => 2, "name" => "henry" },
///   object! { "id" => 1, "name" => "jane" },
/// ];
/// let by_id = distinct(&users, Some(&KeyPath::from("id")));
/// assert_eq!(by_id, &users[..2]);
/// ```
pub fn distinct(items: &[Value], key: Option<&KeyPath>) -> Vec<Value> {
  let mut seen: Vec<&Value> = Vec::new();
  let mut result = Vec::new();
  for item in items {
    let current = comparison_key(item, key);
    if !seen.contains(&current) {
      seen.push(current);
      result.push(item.clone());
    }
  }
  result
}

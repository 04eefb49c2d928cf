//! Key paths and nested property access.
//!
//! A [`KeyPath`] is an ordered list of string segments locating a value
//! inside nested objects. Reading follows the path and gives up quietly as
//! soon as a segment is missing; writing creates the missing intermediate
//! objects on the way down and mutates the target in place.
//!
//! ```rust
//! use objutil::KeyPath;
//! use objutil::Value;
//! use objutil::assign_nested_property;
//! use objutil::object;
//! use objutil::read_nested_property;
//!
//! # fn main() -> objutil::Result<()> {
//! let mut data = object! {};
//! let path: KeyPath = "level1.level2".parse().unwrap();
//! assign_nested_property(&mut data, &path, 100)?;
//!
//! assert_eq!(read_nested_property(&data, &path), Some(&Value::from(100)));
//! assert_eq!(read_nested_property(&data, &["level1", "nope"]), None);
//! # Ok(())
//! # }
//! ```

use core::convert::Infallible;
use core::fmt;
use core::fmt::Display;
use core::ops::Deref;
use core::str::FromStr;

use crate::Error;
use crate::Map;
use crate::Result;
use crate::Value;
use crate::value::parse_index;

/// Separator used when a key path is given as a single string.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Ordered sequence of key segments.
///
/// Parsing from a string splits on [`DEFAULT_SEPARATOR`]; use
/// [`KeyPath::parse`] for any other separator. A `KeyPath` dereferences to
/// `[String]`, so it can be passed wherever the access functions take a slice
/// of segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
  feature = "index",
  derive(derive_more::Index, derive_more::IndexMut)
)]
pub struct KeyPath {
  #[cfg_attr(feature = "index", index)]
  #[cfg_attr(feature = "index", index_mut)]
  segments: Vec<String>,
}

impl KeyPath {
  /// Creates an empty path.
  pub const fn new() -> Self {
    Self {
      segments: Vec::new(),
    }
  }

  /// Splits `path` on `separator`. An empty separator splits into
  /// individual characters.
  pub fn parse(path: &str, separator: &str) -> Self {
    Self {
      segments: split_key(path, separator),
    }
  }

  #[inline]
  pub fn segments(&self) -> &[String] {
    &self.segments
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.segments.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.segments.is_empty()
  }

  /// Appends a segment.
  pub fn push(&mut self, segment: impl Into<String>) {
    self.segments.push(segment.into());
  }

  /// Joins the segments with `separator`.
  pub fn join(&self, separator: &str) -> String {
    self.segments.join(separator)
  }
}

/// Splits a composite key into path segments the way `String.split` does:
/// every occurrence of `separator` cuts, empty segments are kept, and an
/// empty separator cuts between characters.
pub(crate) fn split_key(key: &str, separator: &str) -> Vec<String> {
  if separator.is_empty() {
    key.chars().map(String::from).collect()
  } else {
    key.split(separator).map(str::to_owned).collect()
  }
}

impl Deref for KeyPath {
  type Target = [String];

  #[inline(always)]
  fn deref(&self) -> &Self::Target {
    &self.segments
  }
}

impl AsRef<[String]> for KeyPath {
  #[inline(always)]
  fn as_ref(&self) -> &[String] {
    &self.segments
  }
}

impl Display for KeyPath {
  #[inline(always)]
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.join(DEFAULT_SEPARATOR))
  }
}

impl FromStr for KeyPath {
  type Err = Infallible;

  #[inline(always)]
  fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
    Ok(Self::parse(s, DEFAULT_SEPARATOR))
  }
}

impl From<&str> for KeyPath {
  #[inline(always)]
  fn from(s: &str) -> Self {
    Self::parse(s, DEFAULT_SEPARATOR)
  }
}

impl From<String> for KeyPath {
  #[inline(always)]
  fn from(s: String) -> Self {
    Self::parse(&s, DEFAULT_SEPARATOR)
  }
}

impl From<Vec<String>> for KeyPath {
  #[inline(always)]
  fn from(segments: Vec<String>) -> Self {
    Self { segments }
  }
}

impl From<Vec<&str>> for KeyPath {
  fn from(segments: Vec<&str>) -> Self {
    segments.as_slice().into()
  }
}

impl From<&[&str]> for KeyPath {
  fn from(segments: &[&str]) -> Self {
    Self {
      segments: segments.iter().map(|s| (*s).to_owned()).collect(),
    }
  }
}

impl<const N: usize> From<[&str; N]> for KeyPath {
  fn from(segments: [&str; N]) -> Self {
    segments.as_slice().into()
  }
}

impl FromIterator<String> for KeyPath {
  fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
    Self {
      segments: iter.into_iter().collect(),
    }
  }
}

impl IntoIterator for KeyPath {
  type Item = String;
  type IntoIter = std::vec::IntoIter<String>;

  fn into_iter(self) -> Self::IntoIter {
    self.segments.into_iter()
  }
}

/// Returns the value at the end of `path`, or `None` if it is absent.
///
/// Each non-final segment must name an existing key (or array index) of the
/// current value, otherwise the walk stops with `None`. Walking through a
/// scalar, `null`, `undefined` or an instance also yields `None`. The final
/// segment returns whatever is declared there, so a key declared as
/// [`Value::Undefined`] gives `Some(&Value::Undefined)` while a missing key
/// gives `None`. An empty path yields `None`.
pub fn read_nested_property<'v, S>(root: &'v Value, path: &[S]) -> Option<&'v Value>
where
  S: AsRef<str>,
{
  let (last, parents) = path.split_last()?;
  let mut current = root;
  for key in parents {
    current = current.get(key.as_ref())?;
  }
  current.get(last.as_ref())
}

/// Assigns `value` at `path` inside `root`, creating an empty object for
/// every missing intermediate key. A prior value at the final key is
/// overwritten; `root` itself is never replaced. An empty path does nothing.
///
/// # Errors
///
/// [`Error::NotAssignable`] when the walk has to descend into, or assign
/// onto, something that is neither an object nor an array, and
/// [`Error::InvalidIndex`] when an array is addressed with a segment that is
/// not an index up to `2^32 - 2`. Intermediate objects created before the failure are kept.
pub fn assign_nested_property<S, V>(
  root: &mut Value,
  path: &[S],
  value: V,
) -> Result<()>
where
  S: AsRef<str>,
  V: Into<Value>,
{
  let Some((last, parents)) = path.split_last() else {
    return Ok(());
  };
  let mut current = root;
  for key in parents {
    current = child_or_insert(current, key.as_ref())?;
  }
  set_child(current, last.as_ref(), value.into())
}

impl Map {
  /// Map-rooted form of [`read_nested_property`].
  pub fn read<S>(&self, path: &[S]) -> Option<&Value>
  where
    S: AsRef<str>,
  {
    let (first, rest) = path.split_first()?;
    let node = self.get(first.as_ref())?;
    if rest.is_empty() {
      Some(node)
    } else {
      read_nested_property(node, rest)
    }
  }

  /// Map-rooted form of [`assign_nested_property`].
  pub fn assign<S, V>(&mut self, path: &[S], value: V) -> Result<()>
  where
    S: AsRef<str>,
    V: Into<Value>,
  {
    let Some((last, parents)) = path.split_last() else {
      return Ok(());
    };
    let Some((first, rest)) = parents.split_first() else {
      self.insert(last.as_ref(), value);
      return Ok(());
    };
    let mut current =
      self.get_or_insert_with(first.as_ref(), || Value::Object(Map::new()));
    for key in rest {
      current = child_or_insert(current, key.as_ref())?;
    }
    set_child(current, last.as_ref(), value.into())
  }
}

fn child_or_insert<'v>(node: &'v mut Value, key: &str) -> Result<&'v mut Value> {
  match node {
    Value::Object(map) => {
      Ok(map.get_or_insert_with(key, || Value::Object(Map::new())))
    }
    Value::Array(items) => {
      let len = items.len();
      let index = grow_to_index(items, key)?;
      if index >= len {
        items[index] = Value::Object(Map::new());
      }
      Ok(&mut items[index])
    }
    other => Err(Error::not_assignable(key, other.type_name())),
  }
}

/// Parses `key` as an index into `items` and pads `items` with
/// [`Value::Undefined`] holes until that index exists.
fn grow_to_index(items: &mut Vec<Value>, key: &str) -> Result<usize> {
  let index = parse_index(key).ok_or_else(|| Error::invalid_index(key))?;
  let len = index.checked_add(1).ok_or_else(|| Error::invalid_index(key))?;
  if len > items.len() {
    items
      .try_reserve_exact(len - items.len())
      .map_err(|_| Error::invalid_index(key))?;
    items.resize(len, Value::Undefined);
  }
  Ok(index)
}

fn set_child(node: &mut Value, key: &str, value: Value) -> Result<()> {
  match node {
    Value::Object(map) => {
      map.insert(key, value);
      Ok(())
    }
    Value::Array(items) => {
      let index = grow_to_index(items, key)?;
      items[index] = value;
      Ok(())
    }
    other => Err(Error::not_assignable(key, other.type_name())),
  }
}

/// Collects the value of `key` from every item that declares it. Items
/// without the key are skipped.
pub fn pluck(items: &[Value], key: &str) -> Vec<Value> {
  items
    .iter()
    .filter_map(|item| item.as_object()?.get(key).cloned())
    .collect()
}

/// Collects the value found at `path` in every item, one entry per item;
/// items where the path is absent contribute [`Value::Undefined`].
///
/// ```rust
/// use objutil::Value;
/// use objutil::object;
/// use objutil::pluck_nested;
///
/// let people = [
///   object! { "info" => object! { "city" => "Monaco" } },
///   object! { "info" => object! { "city" => "Paris" } },
///   object! {},
/// ];
/// assert_eq!(
///   pluck_nested(&people, &"info.city".into()),
///   [Value::from("Monaco"), Value::from("Paris"), Value::Undefined]
/// );
/// ```
pub fn pluck_nested(items: &[Value], path: &KeyPath) -> Vec<Value> {
  items
    .iter()
    .map(|item| {
      read_nested_property(item, path)
        .cloned()
        .unwrap_or(Value::Undefined)
    })
    .collect()
}

/// Returns the keys whose value in `target` is missing: absent, undefined,
/// null, or an empty string.
pub fn missing_keys<S>(keys: &[S], target: &Value) -> Vec<String>
where
  S: AsRef<str>,
{
  keys
    .iter()
    .map(|key| key.as_ref())
    .filter(|key: &&str| match target.get(key) {
      None => true,
      Some(Value::String(s)) => s.is_empty(),
      Some(value) => value.is_nullish(),
    })
    .map(str::to_owned)
    .collect()
}

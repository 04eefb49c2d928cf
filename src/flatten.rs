//! Flattening nested objects into single-level maps, and back.
//!
//! [`flatten`] walks a plain object graph depth-first and emits one entry per
//! leaf, keyed by the path to that leaf joined with a separator and wrapped in
//! an optional prefix and suffix. [`reverse_flatten`] rebuilds the nested
//! object from such a map.
//!
//! ```rust
//! use objutil::FlattenOptions;
//! use objutil::Value;
//! use objutil::flatten;
//! use objutil::object;
//! use objutil::reverse_flatten;
//!
//! # fn main() -> objutil::Result<()> {
//! let data = object! { "a" => object! { "b" => object! { "c" => "x" } } };
//! let options = FlattenOptions::new().with_prefix("p.").with_suffix(".s");
//!
//! let flat = flatten(&data, &options);
//! assert_eq!(flat["p.a.b.c.s"], Value::from("x"));
//! assert_eq!(Value::from(reverse_flatten(&flat, &options)?), data);
//! # Ok(())
//! # }
//! ```
//!
//! ## Leaves
//!
//! Only non-empty plain objects are recursed into. Arrays, scalars, `null`,
//! `undefined`, instances and *empty* objects are leaves. An empty object is
//! emitted as `{}` under `prefix + key`, without the suffix, so a round trip
//! keeps it as an empty object instead of dropping it.
//!
//! ## Prefix and suffix trimming
//!
//! [`reverse_flatten`] removes the prefix and suffix by length, not by
//! matching them, and it trims exactly the way the historical implementation
//! of this format does: the suffix cut keeps one character too many and the
//! prefix cut drops the last character. With both a prefix and a suffix the
//! two cancel out and the trim is exact; with only one of them the recovered
//! key is off by one character. Existing flattened data depends on this, so
//! it is kept as is.

use tracing::trace;

use crate::Map;
use crate::Result;
use crate::Value;
use crate::path::DEFAULT_SEPARATOR;
use crate::path::split_key;

/// Parameters shared by [`flatten`] and [`reverse_flatten`].
///
/// With the `serde` feature the options deserialize from any format, with
/// missing fields taking their default.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlattenOptions {
  /// Joins path segments. Defaults to [`DEFAULT_SEPARATOR`].
  pub separator: String,
  /// Prepended to every flattened key.
  pub prefix:    String,
  /// Appended to every flattened leaf key.
  pub suffix:    String,
  /// Leaf keys to leave out.
  ///
  /// When flattening, an item names a leaf's *own* key and matches that key
  /// at any depth. When reversing, an item is compared with the raw
  /// flattened key and with the key after prefix/suffix removal.
  pub omits:     Vec<String>,
}

impl Default for FlattenOptions {
  fn default() -> Self {
    Self {
      separator: DEFAULT_SEPARATOR.to_owned(),
      prefix:    String::new(),
      suffix:    String::new(),
      omits:     Vec::new(),
    }
  }
}

impl FlattenOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
    self.separator = separator.into();
    self
  }

  pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
    self.prefix = prefix.into();
    self
  }

  pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
    self.suffix = suffix.into();
    self
  }

  /// Adds one key to the omit list.
  pub fn omit(mut self, key: impl Into<String>) -> Self {
    self.omits.push(key.into());
    self
  }

  fn is_omitted(&self, key: &str) -> bool {
    self.omits.iter().any(|omit| omit == key)
  }
}

/// Flattens `data` into a single-level map.
///
/// The own keys of `data` are an object's keys or an array's indices;
/// anything else (including `null` and `undefined`) flattens to an empty
/// map. Keys are emitted depth-first in insertion order; when two paths
/// compose to the same key, the later one overwrites the earlier value in
/// place.
pub fn flatten(data: &Value, options: &FlattenOptions) -> Map {
  let mut result = Map::new();
  flatten_into(&mut result, &data.own_entries(), &options.prefix, options);
  trace!(
    leaves = result.len(),
    separator = %options.separator,
    "flattened object"
  );
  result
}

fn flatten_into(
  result: &mut Map,
  node: &Map,
  prefix: &str,
  options: &FlattenOptions,
) {
  for (key, value) in node {
    match value {
      Value::Object(child) if !child.is_empty() => {
        let child_prefix = format!("{prefix}{key}{}", options.separator);
        flatten_into(result, child, &child_prefix, options);
      }
      Value::Object(_) => {
        result.insert(format!("{prefix}{key}"), value.clone());
      }
      _ if options.is_omitted(key) => {
        trace!(key = %key, prefix = %prefix, "omitted leaf");
      }
      _ => {
        result.insert(format!("{prefix}{key}{}", options.suffix), value.clone());
      }
    }
  }
}

/// Rebuilds a nested object from a flattened map.
///
/// For each key that is not omitted, the suffix and prefix are trimmed off
/// (see the [module docs](self) for the exact arithmetic), the remainder is
/// split on the separator and the value is assigned at that path.
///
/// # Errors
///
/// Fails when two keys conflict structurally, e.g. `a` holding a scalar and
/// `a.b` needing `a` to be an object, or when a segment under an array is not
/// a valid index.
pub fn reverse_flatten(flattened: &Map, options: &FlattenOptions) -> Result<Map> {
  let mut result = Map::new();
  for (key, value) in flattened {
    if options.is_omitted(key) {
      continue;
    }
    let stripped = strip_affixes(key, &options.prefix, &options.suffix);
    if options.is_omitted(&stripped) {
      continue;
    }
    result.assign(&split_key(&stripped, &options.separator), value.clone())?;
  }
  trace!(keys = flattened.len(), "reversed flattened object");
  Ok(result)
}

/// Trims `suffix` and `prefix` off `key` by character count.
///
/// The suffix cut keeps `len(key) - len(suffix) + 1` characters. The prefix
/// cut then keeps the range `len(prefix)..len - 1`, with both bounds clamped
/// to the string and swapped when the start is past the end.
fn strip_affixes(key: &str, prefix: &str, suffix: &str) -> String {
  let mut chars: Vec<char> = key.chars().collect();

  if !suffix.is_empty() {
    let keep = chars.len() as isize - suffix.chars().count() as isize + 1;
    chars.truncate(keep.max(0) as usize);
  }

  if !prefix.is_empty() {
    let len = chars.len();
    let start = prefix.chars().count().min(len);
    let end = len.saturating_sub(1);
    let (start, end) = if start > end { (end, start) } else { (start, end) };
    chars = chars[start..end].to_vec();
  }

  chars.into_iter().collect()
}

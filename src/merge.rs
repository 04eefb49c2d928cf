//! Merging two objects under a priority side.
//!
//! Every merge takes the union of both sides' keys (left keys first, then
//! the keys only the right side has) and picks one value per key:
//!
//! - [`merge`] and [`merge_nested`] use the prioritized side's value unless it
//!   is absent, `undefined` or `null`, in which case the other side's value is
//!   used.
//! - [`merge_strict`] and [`merge_nested_strict`] use the prioritized side's
//!   value whenever that side *declares* the key, whatever the value. A
//!   declared [`Value::Undefined`] therefore wins and stays in the result; it
//!   only disappears when the result is serialized.
//!
//! The nested variants flatten both sides first, merge leaf by leaf and
//! unflatten the result, which gives a recursive merge without a separate
//! recursive algorithm.
//!
//! ```rust
//! use objutil::MergeOptions;
//! use objutil::Priority;
//! use objutil::merge;
//! use objutil::merge_nested;
//! use objutil::object;
//!
//! # fn main() -> objutil::Result<()> {
//! let left = object! { "id" => 10, "name" => "john" };
//! let right = object! { "name" => "henry" };
//! let merged = merge(&left, &right, Priority::Right);
//! assert_eq!(merged["name"], "henry");
//! assert_eq!(merged["id"], objutil::Value::from(10));
//!
//! let left = object! { "info" => object! { "a" => "x" } };
//! let right = object! { "info" => object! { "b" => "y" } };
//! let nested = merge_nested(&left, &right, &MergeOptions::default())?;
//! assert_eq!(
//!   objutil::Value::from(nested),
//!   object! { "info" => object! { "a" => "x", "b" => "y" } }
//! );
//! # Ok(())
//! # }
//! ```

use core::fmt;
use core::fmt::Display;
use core::str::FromStr;

use tracing::debug;

use crate::Error;
use crate::FlattenOptions;
use crate::Map;
use crate::Result;
use crate::Value;
use crate::flatten;
use crate::reverse_flatten;

/// Separator used to flatten both sides of a nested merge. Chosen to be
/// unlikely in real keys.
pub const MERGE_SEPARATOR: &str = "----";

/// Which side wins when both sides of a merge define a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Priority {
  #[default]
  Left,
  Right,
}

impl Priority {
  pub const fn as_str(&self) -> &'static str {
    match self {
      Priority::Left => "left",
      Priority::Right => "right",
    }
  }

  /// Orders `(left, right)` as `(prioritized, other)`.
  #[inline]
  fn order<T>(self, left: T, right: T) -> (T, T) {
    match self {
      Priority::Left => (left, right),
      Priority::Right => (right, left),
    }
  }
}

impl Display for Priority {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Priority {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "left" => Ok(Priority::Left),
      "right" => Ok(Priority::Right),
      other => Err(Error::UnknownPriority(other.to_owned())),
    }
  }
}

/// Parameters of [`merge_nested`] and [`merge_nested_strict`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MergeOptions {
  pub priority:  Priority,
  /// Separator used to flatten both sides. Defaults to [`MERGE_SEPARATOR`].
  pub separator: String,
}

impl Default for MergeOptions {
  fn default() -> Self {
    Self {
      priority:  Priority::default(),
      separator: MERGE_SEPARATOR.to_owned(),
    }
  }
}

impl MergeOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_priority(mut self, priority: Priority) -> Self {
    self.priority = priority;
    self
  }

  pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
    self.separator = separator.into();
    self
  }
}

type Pick = fn(Option<&Value>, Option<&Value>) -> Value;

/// Prioritized value unless nullish, else the other side's.
fn pick_filled(primary: Option<&Value>, other: Option<&Value>) -> Value {
  match primary {
    Some(value) if !value.is_nullish() => value.clone(),
    _ => other.cloned().unwrap_or_default(),
  }
}

/// Prioritized value whenever it is declared.
fn pick_declared(primary: Option<&Value>, other: Option<&Value>) -> Value {
  primary.or(other).cloned().unwrap_or_default()
}

fn merge_maps(left: &Map, right: &Map, priority: Priority, pick: Pick) -> Map {
  let right_only = right.keys().filter(|key| !left.contains_key(key));
  left
    .keys()
    .chain(right_only)
    .map(|key| {
      let (primary, other) = priority.order(left.get(key), right.get(key));
      (key, pick(primary, other))
    })
    .collect()
}

/// Shallow merge of the own keys of `left` and `right`. Null, undefined and
/// other non-object inputs count as empty objects.
pub fn merge(left: &Value, right: &Value, priority: Priority) -> Map {
  merge_maps(&left.own_entries(), &right.own_entries(), priority, pick_filled)
}

/// Shallow merge where the prioritized side wins as soon as it declares a
/// key, even as `undefined` or `null`.
pub fn merge_strict(left: &Value, right: &Value, priority: Priority) -> Map {
  merge_maps(
    &left.own_entries(),
    &right.own_entries(),
    priority,
    pick_declared,
  )
}

/// Leaf-by-leaf merge of two nested objects with [`merge`]'s rule.
///
/// # Errors
///
/// Only when the merged leaves cannot be unflattened again, which requires
/// keys containing the separator.
pub fn merge_nested(
  left: &Value,
  right: &Value,
  options: &MergeOptions,
) -> Result<Map> {
  merge_flattened(left, right, options, pick_filled)
}

/// Leaf-by-leaf merge of two nested objects with [`merge_strict`]'s rule.
pub fn merge_nested_strict(
  left: &Value,
  right: &Value,
  options: &MergeOptions,
) -> Result<Map> {
  merge_flattened(left, right, options, pick_declared)
}

fn merge_flattened(
  left: &Value,
  right: &Value,
  options: &MergeOptions,
  pick: Pick,
) -> Result<Map> {
  let flatten_options =
    FlattenOptions::new().with_separator(options.separator.as_str());
  let left = flatten(left, &flatten_options);
  let right = flatten(right, &flatten_options);
  let merged = merge_maps(&left, &right, options.priority, pick);
  debug!(
    left = left.len(),
    right = right.len(),
    merged = merged.len(),
    priority = %options.priority,
    "merged flattened objects"
  );
  reverse_flatten(&merged, &flatten_options)
}

//! Re-keying and filtering the top-level entries of an object.

use core::fmt;

use tracing::trace;

use crate::Map;
use crate::Value;

type Filter = Box<dyn Fn(Value) -> Value + Send + Sync>;

/// Builds a new object out of the own entries of another one.
///
/// Every entry that is not omitted is run through the filters registered
/// for its key, in registration order, and inserted under
/// `key_prefix + key + key_suffix`. Null and undefined values are inserted
/// like any other. The `additional` entries are laid over the result last,
/// replacing values under equal keys.
///
/// ```rust
/// use objutil::Extender;
/// use objutil::Value;
/// use objutil::object;
/// use objutil::utils::to_text;
///
/// let data = object! { "name" => "Arnold", "nickname" => "Mortel", "dead" => false };
/// let extended = Extender::new()
///   .key_prefix("the.")
///   .filter("name", |v| format!("Hello {}", to_text(&v)).into())
///   .filter("name", |v| format!("{}!", to_text(&v)).into())
///   .omit("nickname")
///   .apply(&data);
///
/// assert_eq!(
///   Value::from(extended),
///   object! { "the.name" => "Hello Arnold!", "the.dead" => false }
/// );
/// ```
#[derive(Default)]
pub struct Extender {
  key_prefix: String,
  key_suffix: String,
  omits:      Vec<String>,
  filters:    Vec<(String, Filter)>,
  additional: Map,
}

impl Extender {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn key_prefix(mut self, prefix: impl Into<String>) -> Self {
    self.key_prefix = prefix.into();
    self
  }

  pub fn key_suffix(mut self, suffix: impl Into<String>) -> Self {
    self.key_suffix = suffix.into();
    self
  }

  /// Leaves `key` out of the result entirely.
  pub fn omit(mut self, key: impl Into<String>) -> Self {
    self.omits.push(key.into());
    self
  }

  /// Registers a filter for the value under `key`. Filters registered for
  /// the same key run in the order they were added.
  pub fn filter<F>(mut self, key: impl Into<String>, filter: F) -> Self
  where
    F: Fn(Value) -> Value + Send + Sync + 'static,
  {
    self.filters.push((key.into(), Box::new(filter)));
    self
  }

  /// Entries laid over the result after every key has been inserted.
  pub fn additional(mut self, entries: Map) -> Self {
    self.additional.extend(entries);
    self
  }

  pub fn apply(&self, data: &Value) -> Map {
    let entries = data.own_entries();
    let mut result = Map::with_capacity(entries.len() + self.additional.len());
    for (key, value) in entries.iter() {
      if self.omits.iter().any(|omit| omit == key) {
        trace!(key = %key, "omitted entry");
        continue;
      }
      let value = self
        .filters
        .iter()
        .filter(|(filtered, _)| filtered == key)
        .fold(value.clone(), |value, (_, filter)| filter(value));
      result.insert(
        format!("{}{key}{}", self.key_prefix, self.key_suffix),
        value,
      );
    }
    result.extend(self.additional.iter().map(|(k, v)| (k, v.clone())));
    result
  }
}

impl fmt::Debug for Extender {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Extender")
      .field("key_prefix", &self.key_prefix)
      .field("key_suffix", &self.key_suffix)
      .field("omits", &self.omits)
      .field(
        "filters",
        &self.filters.iter().map(|(key, _)| key).collect::<Vec<_>>(),
      )
      .field("additional", &self.additional)
      .finish()
  }
}

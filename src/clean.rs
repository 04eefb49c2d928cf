//! Removing or rewriting unwanted leaves of nested objects.
//!
//! Every cleaner flattens its input with a separator (by default
//! [`CLEAN_SEPARATOR`], which real keys are unlikely to contain, so dotted
//! keys like `"owner.user.id"` survive untouched), keeps or rewrites each
//! leaf, and assigns the kept leaves back into a fresh object. Parents whose
//! leaves were all dropped therefore disappear too.
//!
//! | function              | drops                                              |
//! | --------------------- | -------------------------------------------------- |
//! | [`clean`]             | `null`, `undefined`                                |
//! | [`clean_with_empty`]  | the above and `""`                                 |
//! | [`clean_all`]         | the above, `false`, `[]`, `{}`, keyless instances  |
//! | [`undefined_to_null`] | nothing, `undefined` becomes `null`                |

use tracing::debug;

use crate::FlattenOptions;
use crate::Map;
use crate::Result;
use crate::Value;
use crate::flatten;
use crate::path::split_key;

/// Default separator of every cleaner.
pub const CLEAN_SEPARATOR: &str = ":-:-:";

/// What happens to a single leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
  Nullish,
  NullishOrEmpty,
  All,
  UndefinedToNull,
}

impl Rule {
  /// The value to assign for `leaf`, or `None` to drop it.
  fn apply(self, leaf: &Value) -> Option<Value> {
    let keep = match self {
      Rule::Nullish => !leaf.is_nullish(),
      Rule::NullishOrEmpty => match leaf {
        Value::String(s) => !s.is_empty(),
        other => !other.is_nullish(),
      },
      Rule::All => match leaf {
        Value::Undefined | Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) | Value::Instance(_) => {
          leaf.own_key_count() > 0
        }
        _ => true,
      },
      Rule::UndefinedToNull => {
        return Some(match leaf {
          Value::Undefined => Value::Null,
          other => other.clone(),
        });
      }
    };
    keep.then(|| leaf.clone())
  }
}

/// A cleaner with a configurable flattening separator.
///
/// ```rust
/// use objutil::Cleaner;
/// use objutil::object;
///
/// # fn main() -> objutil::Result<()> {
/// let data = object! { "a" => object! { "b" => objutil::Value::Null, "c" => 1 } };
/// let cleaned = Cleaner::new().separator("/").clean(&data)?;
/// assert_eq!(objutil::Value::from(cleaned), object! { "a" => object! { "c" => 1 } });
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Cleaner {
  pub separator: String,
}

impl Default for Cleaner {
  fn default() -> Self {
    Self {
      separator: CLEAN_SEPARATOR.to_owned(),
    }
  }
}

impl Cleaner {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn separator(mut self, separator: impl Into<String>) -> Self {
    self.separator = separator.into();
    self
  }

  /// Drops `null` and `undefined` leaves.
  pub fn clean(&self, data: &Value) -> Result<Map> {
    self.rebuild(data, Rule::Nullish)
  }

  /// Drops `null`, `undefined` and empty string leaves. `false` and `0` are
  /// kept.
  pub fn clean_with_empty(&self, data: &Value) -> Result<Map> {
    self.rebuild(data, Rule::NullishOrEmpty)
  }

  /// Drops every "empty" leaf: `null`, `undefined`, `""`, `false`, empty
  /// arrays, empty objects and instances without own keys.
  pub fn clean_all(&self, data: &Value) -> Result<Map> {
    self.rebuild(data, Rule::All)
  }

  /// Replaces `undefined` leaves with `null`, keeping every key.
  pub fn undefined_to_null(&self, data: &Value) -> Result<Map> {
    self.rebuild(data, Rule::UndefinedToNull)
  }

  fn rebuild(&self, data: &Value, rule: Rule) -> Result<Map> {
    let options = FlattenOptions::new().with_separator(self.separator.as_str());
    let flattened = flatten(data, &options);
    let mut result = Map::new();
    let mut dropped = 0usize;
    for (key, leaf) in &flattened {
      match rule.apply(leaf) {
        Some(value) => result.assign(&split_key(key, &self.separator), value)?,
        None => dropped += 1,
      }
    }
    debug!(?rule, leaves = flattened.len(), dropped, "cleaned object");
    Ok(result)
  }
}

/// [`Cleaner::clean`] with the default separator.
pub fn clean(data: &Value) -> Result<Map> {
  Cleaner::new().clean(data)
}

/// [`Cleaner::clean_with_empty`] with the default separator.
pub fn clean_with_empty(data: &Value) -> Result<Map> {
  Cleaner::new().clean_with_empty(data)
}

/// [`Cleaner::clean_all`] with the default separator.
pub fn clean_all(data: &Value) -> Result<Map> {
  Cleaner::new().clean_all(data)
}

/// [`Cleaner::undefined_to_null`] with the default separator.
pub fn undefined_to_null(data: &Value) -> Result<Map> {
  Cleaner::new().undefined_to_null(data)
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::object;

  fn date() -> Value {
    Value::instance("Date", "1950-02-01T00:00:00.000Z")
  }

  #[test]
  fn clean_removes_null_properties() {
    let data = object! { "id" => 10, "name" => "amina", "size" => Value::Null };
    let cleaned = clean(&data).unwrap();
    assert_eq!(Value::from(cleaned), object! { "id" => 10, "name" => "amina" });
  }

  #[test]
  fn clean_keeps_false_and_instances() {
    let data = object! {
      "id" => 10,
      "size" => Value::Null,
      "age" => object! { "$exists" => false },
      "date" => object! { "first" => date() },
    };
    let cleaned = clean(&data).unwrap();
    assert_eq!(
      Value::from(cleaned),
      object! {
        "id" => 10,
        "age" => object! { "$exists" => false },
        "date" => object! { "first" => date() },
      }
    );
  }

  #[test]
  fn clean_with_empty_removes_empty_strings_at_every_depth() {
    let level = |inner: Option<Value>| {
      let mut value = object! {
        "id" => 10,
        "name" => "amina",
        "size" => Value::Null,
        "age" => Value::Undefined,
        "arnold" => "",
      };
      if let (Some(inner), Some(map)) = (inner, value.as_object_mut()) {
        map.insert("objc", inner);
      }
      value
    };
    let data = level(Some(level(Some(level(None)))));
    let cleaned = clean_with_empty(&data).unwrap();
    assert_eq!(
      Value::from(cleaned),
      object! {
        "id" => 10,
        "name" => "amina",
        "objc" => object! {
          "id" => 10,
          "name" => "amina",
          "objc" => object! { "id" => 10, "name" => "amina" },
        },
      }
    );
  }

  #[test]
  fn clean_with_empty_keeps_zero_false_and_dotted_keys() {
    let data = object! {
      "a" => Value::Null,
      "b" => "",
      "c" => 0,
      "d" => false,
      "age" => object! { "$exists" => false, "owner.user.id" => 0 },
    };
    let cleaned = clean_with_empty(&data).unwrap();
    assert_eq!(
      Value::from(cleaned),
      object! {
        "c" => 0,
        "d" => false,
        "age" => object! { "$exists" => false, "owner.user.id" => 0 },
      }
    );
  }

  #[test]
  fn clean_all_removes_every_empty_leaf() {
    let data = object! {
      "id" => 10,
      "name" => "amina",
      "size" => Value::Null,
      "age" => object! { "$exists" => false, "owner.user.id" => 0 },
      "arr" => vec!["hello"],
      "emptyArr" => Vec::<Value>::new(),
      "lambou" => "",
      "nothing" => object! {},
      "when" => date(),
    };
    let cleaned = clean_all(&data).unwrap();
    assert_eq!(
      Value::from(cleaned),
      object! {
        "id" => 10,
        "name" => "amina",
        "age" => object! { "owner.user.id" => 0 },
        "arr" => vec!["hello"],
      }
    );
  }

  #[test]
  fn clean_all_keeps_instances_with_own_keys() {
    let point = Value::instance("Point", object! { "x" => 1 });
    let data = object! { "p" => point.clone() };
    assert_eq!(Value::from(clean_all(&data).unwrap()), object! { "p" => point });
  }

  #[test]
  fn clean_all_is_idempotent() {
    let data = object! {
      "a" => object! { "b" => false, "c" => object! { "d" => "" } },
      "e" => vec![Value::Null],
      "f" => object! { "g" => 1, "h" => Vec::<Value>::new() },
    };
    let once = Value::from(clean_all(&data).unwrap());
    let twice = Value::from(clean_all(&once).unwrap());
    assert_eq!(once, object! { "e" => vec![Value::Null], "f" => object! { "g" => 1 } });
    assert_eq!(twice, once);
  }

  #[test]
  fn undefined_to_null_keeps_every_key() {
    let data = object! {
      "id" => Value::Undefined,
      "name" => "amina",
      "size" => Value::Null,
      "age" => object! {
        "$exists" => Value::Undefined,
        "owner.user.id" => Value::Undefined,
      },
      "lambou" => "",
      "obj" => object! {},
      "nested" => object! {
        "nes" => object! { "n" => object! {} },
        "plu" => object! { "m" => Value::Undefined },
      },
    };
    let converted = undefined_to_null(&data).unwrap();
    assert_eq!(
      Value::from(converted),
      object! {
        "id" => Value::Null,
        "name" => "amina",
        "size" => Value::Null,
        "age" => object! {
          "$exists" => Value::Null,
          "owner.user.id" => Value::Null,
        },
        "lambou" => "",
        "obj" => object! {},
        "nested" => object! {
          "nes" => object! { "n" => object! {} },
          "plu" => object! { "m" => Value::Null },
        },
      }
    );
  }

  #[test]
  fn custom_separator_splits_dotted_keys() {
    let data = object! { "owner.user.id" => 0, "gone" => Value::Null };
    let cleaned = Cleaner::new().separator(".").clean(&data).unwrap();
    assert_eq!(
      Value::from(cleaned),
      object! { "owner" => object! { "user" => object! { "id" => 0 } } }
    );
  }

  #[test]
  fn nullish_input_cleans_to_empty() {
    assert!(clean(&Value::Null).unwrap().is_empty());
    assert!(clean_all(&Value::Undefined).unwrap().is_empty());
  }
}

use core::fmt;
use std::borrow::Cow;

use crate::Map;

/// A dynamically typed value in a plain object graph.
///
/// Every value carries an explicit type tag, which is how this crate tells
/// a *plain object* (the only thing flatten/merge/clean ever recurse into)
/// apart from arrays, scalars and other structured values.
///
/// # Variants
///
/// 1. [`Undefined`](Value::Undefined): a key that is declared but holds no
///    value. This is distinct from the key being absent from its [`Map`], and
///    distinct from [`Null`](Value::Null). Serialization drops it from maps.
/// 2. [`Null`](Value::Null): an explicit null.
/// 3. [`Bool`](Value::Bool), [`Number`](Value::Number) and
///    [`String`](Value::String): scalars. Numbers are IEEE doubles.
/// 4. [`Array`](Value::Array): an ordered list. Always a leaf.
/// 5. [`Object`](Value::Object): a plain object, i.e. a key/value [`Map`].
/// 6. [`Instance`](Value::Instance): a structured value that is *not* a plain
///    object, such as a date. Always a leaf.
///
/// # Examples
///
/// ```rust
/// use objutil::Value;
/// use objutil::object;
///
/// let user = object! {
///   "id" => 10,
///   "name" => "john",
///   "tags" => vec!["a", "b"],
///   "info" => object! { "nickname" => Value::Undefined },
/// };
///
/// assert!(user.is_plain_object());
/// assert_eq!(user.get("id"), Some(&Value::from(10)));
/// assert_eq!(user.get("missing"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "is_variant", derive(derive_more::IsVariant))]
pub enum Value {
  /// Declared without a value.
  #[default]
  Undefined,
  Null,
  Bool(bool),
  Number(f64),
  String(String),
  Array(Vec<Value>),
  /// A plain object. This is the only variant the transform functions
  /// descend into.
  Object(Map),
  /// A non-plain structured value, treated as an opaque leaf.
  Instance(Instance),
}

/// A structured value that is not a plain object, e.g. a date or any other
/// class instance.
///
/// An instance has a class name and the value it serializes to. Transforms
/// never look inside it; the only thing they ask is how many own keys it has
/// (see [`Value::own_key_count`]), which is the key count of its inner value
/// when that is an object and zero otherwise.
///
/// ```rust
/// use objutil::Value;
///
/// let date = Value::instance("Date", "1950-02-01T00:00:00.000Z");
/// let Value::Instance(inner) = &date else { unreachable!() };
/// assert_eq!(inner.class(), "Date");
/// assert_eq!(date.own_key_count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "constructors", derive(derive_more::Constructor))]
pub struct Instance {
  class: String,
  value: Box<Value>,
}

impl Instance {
  /// Creates a new `Instance`.
  #[cfg(not(feature = "constructors"))]
  pub const fn new(class: String, value: Box<Value>) -> Self {
    Self { class, value }
  }

  /// Name of the class this value is an instance of.
  pub fn class(&self) -> &str {
    &self.class
  }

  /// The value this instance serializes to.
  pub fn value(&self) -> &Value {
    &self.value
  }
}

impl Value {
  /// Shorthand for building a [`Value::Instance`].
  pub fn instance(class: impl Into<String>, value: impl Into<Value>) -> Self {
    Value::Instance(Instance {
      class: class.into(),
      value: Box::new(value.into()),
    })
  }

  /// Name of this value's type, as used in error messages.
  pub const fn type_name(&self) -> &'static str {
    match self {
      Value::Undefined => "undefined",
      Value::Null => "null",
      Value::Bool(_) => "boolean",
      Value::Number(_) => "number",
      Value::String(_) => "string",
      Value::Array(_) => "array",
      Value::Object(_) => "object",
      Value::Instance(_) => "instance",
    }
  }

  /// `true` for [`Value::Undefined`] and [`Value::Null`].
  #[inline]
  pub const fn is_nullish(&self) -> bool {
    matches!(self, Value::Undefined | Value::Null)
  }

  /// `true` only for a plain object. Arrays, null and instances are not
  /// plain objects, even though they may be structured.
  #[inline]
  pub const fn is_plain_object(&self) -> bool {
    matches!(self, Value::Object(_))
  }

  pub const fn as_bool(&self) -> Option<bool> {
    match self {
      Value::Bool(b) => Some(*b),
      _ => None,
    }
  }

  pub const fn as_f64(&self) -> Option<f64> {
    match self {
      Value::Number(n) => Some(*n),
      _ => None,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Value::String(s) => Some(s),
      _ => None,
    }
  }

  pub fn as_array(&self) -> Option<&Vec<Value>> {
    match self {
      Value::Array(items) => Some(items),
      _ => None,
    }
  }

  pub fn as_object(&self) -> Option<&Map> {
    match self {
      Value::Object(map) => Some(map),
      _ => None,
    }
  }

  pub fn as_object_mut(&mut self) -> Option<&mut Map> {
    match self {
      Value::Object(map) => Some(map),
      _ => None,
    }
  }

  /// Looks up a single key. Objects are looked up by key, arrays by decimal
  /// index; every other value has no keys.
  pub fn get(&self, key: &str) -> Option<&Value> {
    match self {
      Value::Object(map) => map.get(key),
      Value::Array(items) => parse_index(key).and_then(|i| items.get(i)),
      _ => None,
    }
  }

  /// Number of own keys of an object-typed value: entries of an object,
  /// elements of an array, entries of an instance's inner object. Scalars,
  /// null and undefined have none.
  pub fn own_key_count(&self) -> usize {
    match self {
      Value::Object(map) => map.len(),
      Value::Array(items) => items.len(),
      Value::Instance(instance) => match instance.value() {
        Value::Object(map) => map.len(),
        _ => 0,
      },
      _ => 0,
    }
  }

  /// The own enumerable entries of this value: an object's entries as they
  /// are, an array's elements keyed by index, nothing for anything else.
  pub fn own_entries(&self) -> Cow<'_, Map> {
    match self {
      Value::Object(map) => Cow::Borrowed(map),
      Value::Array(items) => Cow::Owned(
        items
          .iter()
          .enumerate()
          .map(|(i, item)| (i.to_string(), item.clone()))
          .collect(),
      ),
      _ => Cow::Owned(Map::new()),
    }
  }
}

/// Largest index an array can be addressed with, `2^32 - 2`.
pub(crate) const MAX_ARRAY_INDEX: usize = u32::MAX as usize - 1;

/// Parses a canonical array index: decimal digits, no sign, no leading zero,
/// at most [`MAX_ARRAY_INDEX`].
pub(crate) fn parse_index(key: &str) -> Option<usize> {
  if key.is_empty()
    || !key.bytes().all(|b| b.is_ascii_digit())
    || (key.len() > 1 && key.starts_with('0'))
  {
    return None;
  }
  key.parse().ok().filter(|index| *index <= MAX_ARRAY_INDEX)
}

impl fmt::Display for Value {
  /// Short human-readable rendering, for logs and error messages.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Undefined => f.write_str("undefined"),
      Value::Null => f.write_str("null"),
      Value::Bool(b) => write!(f, "{b}"),
      Value::Number(n) => write!(f, "{n}"),
      Value::String(s) => write!(f, "{s:?}"),
      Value::Array(items) => write!(f, "[{} items]", items.len()),
      Value::Object(map) => write!(f, "{{{} keys}}", map.len()),
      Value::Instance(instance) => {
        write!(f, "{}({})", instance.class, instance.value)
      }
    }
  }
}

impl From<bool> for Value {
  #[inline(always)]
  fn from(b: bool) -> Self {
    Value::Bool(b)
  }
}

macro_rules! impl_from_number {
  ($($ty:ty),* $(,)?) => {
    $(
      impl From<$ty> for Value {
        #[inline(always)]
        fn from(n: $ty) -> Self {
          Value::Number(n as f64)
        }
      }
    )*
  };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<&str> for Value {
  #[inline(always)]
  fn from(s: &str) -> Self {
    Value::String(s.to_owned())
  }
}

impl From<String> for Value {
  #[inline(always)]
  fn from(s: String) -> Self {
    Value::String(s)
  }
}

impl<'a> From<Cow<'a, str>> for Value {
  #[inline(always)]
  fn from(s: Cow<'a, str>) -> Self {
    Value::String(s.into_owned())
  }
}

impl From<Map> for Value {
  #[inline(always)]
  fn from(map: Map) -> Self {
    Value::Object(map)
  }
}

impl From<Instance> for Value {
  #[inline(always)]
  fn from(instance: Instance) -> Self {
    Value::Instance(instance)
  }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
  fn from(items: Vec<T>) -> Self {
    Value::Array(items.into_iter().map(Into::into).collect())
  }
}

/// `None` becomes [`Value::Null`].
impl<T: Into<Value>> From<Option<T>> for Value {
  fn from(value: Option<T>) -> Self {
    match value {
      Some(value) => value.into(),
      None => Value::Null,
    }
  }
}

impl<T: Into<Value>> FromIterator<T> for Value {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    Value::Array(iter.into_iter().map(Into::into).collect())
  }
}

impl PartialEq<str> for Value {
  fn eq(&self, other: &str) -> bool {
    self.as_str() == Some(other)
  }
}

impl PartialEq<&str> for Value {
  fn eq(&self, other: &&str) -> bool {
    self.as_str() == Some(*other)
  }
}

/// Builds a [`Value::Object`] from `key => value` pairs. Values go through
/// `Into<Value>`, so literals, vectors and nested `object!` calls all work.
///
/// ```rust
/// use objutil::object;
///
/// let empty = object! {};
/// let nested = object! { "a" => object! { "b" => 1 } };
/// assert_eq!(empty.own_key_count(), 0);
/// assert_eq!(nested.own_key_count(), 1);
/// ```
#[macro_export]
macro_rules! object {
  () => {
    $crate::Value::Object($crate::Map::new())
  };
  ($($key:expr => $value:expr),+ $(,)?) => {{
    let mut map = $crate::Map::new();
    $(
      map.insert($key, $value);
    )+
    $crate::Value::Object(map)
  }};
}

#[cfg(feature = "serde")]
mod serde_impl {
  use core::fmt;

  use serde::Deserialize;
  use serde::Deserializer;
  use serde::Serialize;
  use serde::Serializer;
  use serde::de;

  use super::*;

  /// Largest magnitude an IEEE double holds as an exact integer.
  const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

  impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
      S: Serializer,
    {
      match self {
        Value::Undefined | Value::Null => serializer.serialize_unit(),
        Value::Bool(b) => serializer.serialize_bool(*b),
        Value::Number(n) => {
          if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
            serializer.serialize_i64(*n as i64)
          } else {
            serializer.serialize_f64(*n)
          }
        }
        Value::String(s) => serializer.serialize_str(s),
        // undefined elements go out as null, via the unit arm above
        Value::Array(items) => serializer.collect_seq(items),
        Value::Object(map) => map.serialize(serializer),
        Value::Instance(instance) => instance.value.serialize(serializer),
      }
    }
  }

  impl Serialize for Instance {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
      S: Serializer,
    {
      self.value.serialize(serializer)
    }
  }

  struct ValueVisitor;

  impl<'de> de::Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
      formatter.write_str("any value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
    where
      E: de::Error,
    {
      Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
      E: de::Error,
    {
      Ok(Value::from(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
      E: de::Error,
    {
      Ok(Value::from(v))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
      E: de::Error,
    {
      Ok(Value::Number(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
      E: de::Error,
    {
      Ok(Value::from(v))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
      E: de::Error,
    {
      Ok(Value::String(v))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
      E: de::Error,
    {
      Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
      E: de::Error,
    {
      Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
      D: Deserializer<'de>,
    {
      Value::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
      A: de::SeqAccess<'de>,
    {
      let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
      while let Some(item) = seq.next_element::<Value>()? {
        items.push(item);
      }
      Ok(Value::Array(items))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
      A: de::MapAccess<'de>,
    {
      let mut map = Map::with_capacity(access.size_hint().unwrap_or(0));
      while let Some((key, value)) = access.next_entry::<String, Value>()? {
        map.insert(key, value);
      }
      Ok(Value::Object(map))
    }
  }

  impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
      D: Deserializer<'de>,
    {
      deserializer.deserialize_any(ValueVisitor)
    }
  }
}

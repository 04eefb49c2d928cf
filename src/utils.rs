//! Loose value checks and string helpers for form and query handling.

use std::sync::LazyLock;

use regex::NoExpand;
use regex::Regex;

use crate::Value;

static WHITE_SPACE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\s").expect("white space pattern is valid"));

/// `true` unless `value` is `null` or `undefined`.
pub fn is_filled(value: &Value) -> bool {
  !value.is_nullish()
}

/// `true` when `value` is filled and renders to a non-empty string, which is
/// what a query string would carry. Empty strings and empty arrays (or arrays
/// of a single empty string) are not filled.
pub fn is_query_param_filled(value: &Value) -> bool {
  is_filled(value) && !to_text(value).is_empty()
}

/// Renders `value` the way string interpolation does: arrays join their
/// items with `,` (nullish items as empty), objects become
/// `[object Object]`, instances render their inner value.
pub fn to_text(value: &Value) -> String {
  match value {
    Value::Undefined => "undefined".to_owned(),
    Value::Null => "null".to_owned(),
    Value::Bool(b) => b.to_string(),
    Value::Number(n) => number_to_text(*n),
    Value::String(s) => s.clone(),
    Value::Array(items) => items
      .iter()
      .map(|item| match item {
        Value::Undefined | Value::Null => String::new(),
        other => to_text(other),
      })
      .collect::<Vec<_>>()
      .join(","),
    Value::Object(_) => "[object Object]".to_owned(),
    Value::Instance(instance) => to_text(instance.value()),
  }
}

fn number_to_text(n: f64) -> String {
  if n == f64::INFINITY {
    "Infinity".to_owned()
  } else if n == f64::NEG_INFINITY {
    "-Infinity".to_owned()
  } else if n.is_nan() {
    "NaN".to_owned()
  } else {
    n.to_string()
  }
}

/// Converts `value` to a number, giving `0` for anything that is not one.
///
/// Strings are trimmed and may be empty (`0`), decimal with an optional
/// sign, fraction and exponent, `Infinity`, or a `0x`/`0o`/`0b` literal.
/// `true` is `1`; `false`, `null` and empty arrays are `0`; an array with a
/// single item converts that item.
///
/// ```rust
/// use objutil::Value;
/// use objutil::utils::force_number;
///
/// assert_eq!(force_number(&Value::from("100")), 100.0);
/// assert_eq!(force_number(&Value::from(" 0x1F ")), 31.0);
/// assert_eq!(force_number(&Value::from("100a")), 0.0);
/// ```
pub fn force_number(value: &Value) -> f64 {
  let number = match value {
    Value::Undefined => f64::NAN,
    Value::Null => 0.0,
    Value::Bool(b) => f64::from(u8::from(*b)),
    Value::Number(n) => *n,
    Value::String(s) => parse_number(s),
    Value::Array(_) => parse_number(&to_text(value)),
    Value::Object(_) => f64::NAN,
    Value::Instance(instance) => force_number(instance.value()),
  };
  if number.is_nan() { 0.0 } else { number }
}

/// Numeric parse of a string; `NaN` when it is not a number literal.
fn parse_number(text: &str) -> f64 {
  let text = text.trim();
  if text.is_empty() {
    return 0.0;
  }

  let radix = match text.get(..2) {
    Some("0x" | "0X") => Some(16),
    Some("0o" | "0O") => Some(8),
    Some("0b" | "0B") => Some(2),
    _ => None,
  };
  if let Some(radix) = radix {
    let digits = &text[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
      return f64::NAN;
    }
    return digits.chars().fold(0.0, |acc, c| {
      acc * f64::from(radix) + f64::from(c.to_digit(radix).unwrap_or(0))
    });
  }

  let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
  if unsigned == "Infinity" {
    return if text.starts_with('-') {
      f64::NEG_INFINITY
    } else {
      f64::INFINITY
    };
  }
  let is_decimal = unsigned
    .chars()
    .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
  if !is_decimal {
    return f64::NAN;
  }
  text.parse().unwrap_or(f64::NAN)
}

/// Replaces every white space character of `value` with `replacement`, or
/// removes it when there is none.
pub fn remove_all_white_spaces(
  value: &str,
  replacement: Option<&str>,
) -> String {
  WHITE_SPACE
    .replace_all(value, NoExpand(replacement.unwrap_or_default()))
    .into_owned()
}

/// Replaces every match of `search` in `value`. `replacement` may refer to
/// capture groups as `$1` or `${name}`.
pub fn replace_all_match(
  value: &str,
  search: &Regex,
  replacement: &str,
) -> String {
  search.replace_all(value, replacement).into_owned()
}

/// The language part of a locale: everything before the first `-`, or
/// failing that before the first `_`. Empty when the locale has neither.
pub fn extract_language_tag(locale: Option<&str>) -> String {
  let Some(locale) = locale else {
    return String::new();
  };
  locale
    .split_once('-')
    .or_else(|| locale.split_once('_'))
    .map(|(language, _)| language.to_owned())
    .unwrap_or_default()
}

/// `true` for locales made of exactly two two-letter parts separated by `-`
/// or `_`, such as `en-US` or `fr_FR`.
pub fn is_locale_valid(locale: Option<&str>) -> bool {
  let Some(locale) = locale.filter(|locale| !locale.is_empty()) else {
    return false;
  };
  let parts: Vec<&str> = locale.split(['-', '_']).collect();
  parts.len() == 2 && parts.iter().all(|part| part.chars().count() == 2)
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::object;

  #[test]
  fn filled_values() {
    assert!(is_filled(&Value::from("hello")));
    assert!(is_filled(&Value::from(false)));
    assert!(!is_filled(&Value::Undefined));
    assert!(!is_filled(&Value::Null));
  }

  #[test]
  fn query_param_filled_values() {
    assert!(is_query_param_filled(&Value::from("hello")));
    assert!(is_query_param_filled(&Value::from(0)));
    assert!(is_query_param_filled(&object! {}));
    assert!(!is_query_param_filled(&Value::from("")));
    assert!(!is_query_param_filled(&Value::Undefined));
    assert!(!is_query_param_filled(&Value::Null));
    assert!(!is_query_param_filled(&Value::Array(vec![])));
    assert!(!is_query_param_filled(&Value::from(vec![""])));
  }

  #[test]
  fn text_rendering() {
    assert_eq!(to_text(&Value::from(100)), "100");
    assert_eq!(to_text(&Value::from(1.5)), "1.5");
    assert_eq!(to_text(&Value::from(f64::NEG_INFINITY)), "-Infinity");
    assert_eq!(
      to_text(&Value::from(vec![Value::from(1), Value::Null, Value::from("a")])),
      "1,,a"
    );
    assert_eq!(to_text(&object! { "a" => 1 }), "[object Object]");
    assert_eq!(to_text(&Value::instance("Id", "abc")), "abc");
  }

  #[test]
  fn force_number_of_numbers_and_strings() {
    assert_eq!(force_number(&Value::from(100)), 100.0);
    assert_eq!(force_number(&Value::from("100")), 100.0);
    assert_eq!(force_number(&Value::from("  -2.5e3 ")), -2500.0);
    assert_eq!(force_number(&Value::from(".5")), 0.5);
    assert_eq!(force_number(&Value::from("")), 0.0);
    assert_eq!(force_number(&Value::from("0b101")), 5.0);
    assert_eq!(force_number(&Value::from("0o17")), 15.0);
    assert_eq!(force_number(&Value::from("-Infinity")), f64::NEG_INFINITY);
  }

  #[test]
  fn force_number_falls_back_to_zero() {
    assert_eq!(force_number(&Value::from("100a")), 0.0);
    assert_eq!(force_number(&Value::from(f64::NAN)), 0.0);
    assert_eq!(force_number(&Value::from("inf")), 0.0);
    assert_eq!(force_number(&Value::from("-0x10")), 0.0);
    assert_eq!(force_number(&Value::from("0x")), 0.0);
    assert_eq!(force_number(&Value::from("0x1g")), 0.0);
    assert_eq!(force_number(&Value::Undefined), 0.0);
    assert_eq!(force_number(&object! {}), 0.0);
  }

  #[test]
  fn force_number_of_wide_radix_literals() {
    let wide = format!("0x{}", "f".repeat(40));
    let n = force_number(&Value::from(wide));
    assert!(n.is_finite() && n > 1e48);
    assert_eq!(n, 16f64.powi(40));
    let wide = format!("0b1{}", "0".repeat(200));
    assert_eq!(force_number(&Value::from(wide)), 2f64.powi(200));
    assert_eq!(force_number(&Value::from("0xFF")), 255.0);
  }

  #[test]
  fn force_number_of_other_values() {
    assert_eq!(force_number(&Value::from(true)), 1.0);
    assert_eq!(force_number(&Value::from(false)), 0.0);
    assert_eq!(force_number(&Value::Null), 0.0);
    assert_eq!(force_number(&Value::Array(vec![])), 0.0);
    assert_eq!(force_number(&Value::from(vec!["7"])), 7.0);
    assert_eq!(force_number(&Value::from(vec![1, 2])), 0.0);
  }

  #[test]
  fn white_space_removal() {
    assert_eq!(
      remove_all_white_spaces("lambou Arnold T oma   s", None),
      "lambouArnoldTomas"
    );
    assert_eq!(
      remove_all_white_spaces("lambou Arnold T oma   s", Some("-")),
      "lambou-Arnold-T-oma---s"
    );
    assert_eq!(remove_all_white_spaces("a\tb\nc", Some("")), "abc");
    assert_eq!(remove_all_white_spaces("a b", Some("$1")), "a$1b");
    assert_eq!(remove_all_white_spaces("a b", Some("${x}")), "a${x}b");
  }

  #[test]
  fn replaces_all_matches() {
    let search = Regex::new("a").unwrap();
    assert_eq!(
      replace_all_match("lambou langouo arnold", &search, "A"),
      "lAmbou lAngouo Arnold"
    );
    let digits = Regex::new(r"(\d+)").unwrap();
    assert_eq!(replace_all_match("a1b22", &digits, "<$1>"), "a<1>b<22>");
  }

  #[test]
  fn language_tags() {
    assert_eq!(extract_language_tag(Some("en_US")), "en");
    assert_eq!(extract_language_tag(Some("en-US")), "en");
    assert_eq!(extract_language_tag(Some("en_US-x")), "en_US");
    assert_eq!(extract_language_tag(Some("en")), "");
    assert_eq!(extract_language_tag(None), "");
  }

  #[test]
  fn locale_validation() {
    assert!(is_locale_valid(Some("en_US")));
    assert!(is_locale_valid(Some("fr-FR")));
    assert!(!is_locale_valid(Some("en")));
    assert!(!is_locale_valid(Some("eng_US")));
    assert!(!is_locale_valid(Some("en-US-x")));
    assert!(!is_locale_valid(Some("")));
    assert!(!is_locale_valid(None));
  }
}

//! # objutil
//!
//! ### Flatten, merge and clean nested plain objects
//!
//! This crate works on dynamically typed object graphs, the kind of data that
//! arrives from forms, query strings and JSON documents. Everything revolves
//! around [`Value`], a JSON-like value that also tells an *absent* key apart
//! from a key that is present but `undefined`, and an insertion-ordered
//! [`Map`] of string keys to values.
//!
//! ---
//!
//! ## Flattening
//!
//! [`flatten`] turns nested objects into a single-level map whose keys are
//! the joined paths to each leaf, and [`reverse_flatten`] turns such a map
//! back into nested objects. Every other transformation in the crate is built
//! on this pair.
//!
//! ```rust
//! use objutil::FlattenOptions;
//! use objutil::Value;
//! use objutil::flatten;
//! use objutil::object;
//!
//! let data = object! { "user" => object! { "name" => "john", "age" => 42 } };
//! let flat = flatten(&data, &FlattenOptions::default());
//! assert_eq!(flat["user.name"], Value::from("john"));
//! assert_eq!(flat["user.age"], Value::from(42));
//! ```
//!
//! ## Merging
//!
//! [`merge`] and [`merge_strict`] combine two objects key by key with a
//! [`Priority`] side; [`merge_nested`] and [`merge_nested_strict`] do the
//! same leaf by leaf.
//!
//! ## Cleaning
//!
//! [`clean`], [`clean_with_empty`], [`clean_all`] and [`undefined_to_null`]
//! drop or rewrite unwanted leaves at any depth. [`Cleaner`] runs them with a
//! custom separator.
//!
//! ## Paths
//!
//! [`read_nested_property`] and [`assign_nested_property`] address values
//! through a [`KeyPath`]; [`pluck`], [`pluck_nested`] and [`missing_keys`]
//! build on them.
//!
//! ## Odds and ends
//!
//! [`Extender`] re-keys and filters the entries of an object, the [`arr`]
//! module holds slice helpers, [`utils`] holds loose checks and string
//! helpers for form and query handling, and [`HttpStatus`] names the HTTP
//! status codes.
//!
//! ---
//!
//! ## Logging
//!
//! The transformations emit [`tracing`] events at the `trace` and `debug`
//! levels. Nothing is printed unless the application installs a subscriber.
//!
//! ---
//!
//! ## Features
//!
//! - `serde`†: Enables serialization and deserialization support via Serde.
//!   Values serialize like `JSON.stringify` would write them.
//! - `is_variant`†: Derives `is_*` variant checks on [`Value`].
//! - `constructors`†: Derives [`Instance::new`].
//! - `index`†: Lets a [`KeyPath`] be indexed by segment position.
//!
//! > † enabled by default

pub mod arr;
pub mod clean;
pub mod error;
pub mod extend;
pub mod flatten;
pub mod http_status;
pub mod map;
pub mod merge;
pub mod path;
pub mod utils;
pub mod value;

pub use arr::*;
pub use clean::*;
pub use error::*;
pub use extend::*;
pub use flatten::*;
pub use http_status::*;
pub use map::*;
pub use merge::*;
pub use path::*;
pub use value::*;

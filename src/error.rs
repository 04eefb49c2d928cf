//! Error type shared by every fallible operation in the crate.
//!
//! Reads never fail: looking something up through the wrong kind of value
//! just resolves to nothing. The errors below only surface when a value has to
//! be *written* somewhere it cannot go, or when a textual/numeric identifier
//! does not name anything the crate knows about.

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
  /// A key path tried to descend into, or assign onto, a value that is
  /// neither an object nor an array.
  #[error("cannot assign property `{segment}` on a value of type {found}")]
  NotAssignable {
    /// The path segment being resolved when the walk failed.
    segment: String,
    /// Type name of the value found at that point.
    found:   &'static str,
  },

  /// A path segment applied to an array is not a canonical index, or is past
  /// the largest addressable one.
  #[error("`{segment}` is not a valid array index")]
  InvalidIndex { segment: String },

  #[error("unknown merge priority `{0}`, expected `left` or `right`")]
  UnknownPriority(String),

  #[error("unknown HTTP status code {0}")]
  UnknownStatusCode(u16),
}

impl Error {
  pub(crate) fn not_assignable(
    segment: impl Into<String>,
    found: &'static str,
  ) -> Self {
    Self::NotAssignable {
      segment: segment.into(),
      found,
    }
  }

  pub(crate) fn invalid_index(segment: impl Into<String>) -> Self {
    Self::InvalidIndex {
      segment: segment.into(),
    }
  }
}

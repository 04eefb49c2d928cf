//! Named HTTP status codes.
//!
//! ```rust
//! use objutil::HttpStatus;
//!
//! assert_eq!(HttpStatus::NotFound.code(), 404);
//! assert_eq!(HttpStatus::try_from(201), Ok(HttpStatus::Created));
//! assert!(HttpStatus::ServiceUnavailable.is_server_error());
//! assert_eq!(HttpStatus::ImATeapot.to_string(), "418 ImATeapot");
//! ```

use core::fmt;

use crate::Error;

macro_rules! http_statuses {
  ($(
    $(#[$meta:meta])*
    $name:ident = $code:literal,
  )+) => {
    /// A known HTTP status code. The discriminant is the numeric code.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    #[repr(u16)]
    pub enum HttpStatus {
      $(
        $(#[$meta])*
        $name = $code,
      )+
    }

    impl HttpStatus {
      /// Every known status, in ascending code order.
      pub const ALL: &'static [HttpStatus] = &[$(HttpStatus::$name,)+];

      /// The variant name, e.g. `"NotFound"`.
      pub const fn name(self) -> &'static str {
        match self {
          $(HttpStatus::$name => stringify!($name),)+
        }
      }

      /// Looks up the status for `code`.
      pub const fn from_code(code: u16) -> Option<Self> {
        match code {
          $($code => Some(HttpStatus::$name),)+
          _ => None,
        }
      }
    }
  };
}

http_statuses! {
  // 1xx informational
  Continue = 100,
  SwitchingProtocols = 101,
  Processing = 102,
  EarlyHints = 103,

  // 2xx success
  Ok = 200,
  Created = 201,
  Accepted = 202,
  NonAuthoritativeInformation = 203,
  NoContent = 204,
  ResetContent = 205,
  PartialContent = 206,
  MultiStatus = 207,
  AlreadyReported = 208,
  ImUsed = 226,

  // 3xx redirection
  MultipleChoices = 300,
  MovedPermanently = 301,
  Found = 302,
  SeeOther = 303,
  NotModified = 304,
  UseProxy = 305,
  /// No longer used, kept because clients may still receive it.
  SwitchProxy = 306,
  TemporaryRedirect = 307,
  PermanentRedirect = 308,

  // 4xx client errors
  BadRequest = 400,
  Unauthorized = 401,
  PaymentRequired = 402,
  Forbidden = 403,
  NotFound = 404,
  MethodNotAllowed = 405,
  NotAcceptable = 406,
  ProxyAuthenticationRequired = 407,
  RequestTimeout = 408,
  Conflict = 409,
  Gone = 410,
  LengthRequired = 411,
  PreconditionFailed = 412,
  PayloadTooLarge = 413,
  UriTooLong = 414,
  UnsupportedMediaType = 415,
  RangeNotSatisfiable = 416,
  ExpectationFailed = 417,
  ImATeapot = 418,
  MisdirectedRequest = 421,
  UnprocessableEntity = 422,
  Locked = 423,
  FailedDependency = 424,
  TooEarly = 425,
  UpgradeRequired = 426,
  PreconditionRequired = 428,
  TooManyRequests = 429,
  RequestHeaderFieldsTooLarge = 431,
  UnavailableForLegalReasons = 451,

  // 5xx server errors
  InternalServerError = 500,
  NotImplemented = 501,
  BadGateway = 502,
  ServiceUnavailable = 503,
  GatewayTimeout = 504,
  HttpVersionNotSupported = 505,
  VariantAlsoNegotiates = 506,
  InsufficientStorage = 507,
  LoopDetected = 508,
  NotExtended = 510,
  NetworkAuthenticationRequired = 511,
}

impl HttpStatus {
  #[inline(always)]
  pub const fn code(self) -> u16 {
    self as u16
  }

  pub const fn is_informational(self) -> bool {
    matches!(self.code(), 100..=199)
  }

  pub const fn is_success(self) -> bool {
    matches!(self.code(), 200..=299)
  }

  pub const fn is_redirection(self) -> bool {
    matches!(self.code(), 300..=399)
  }

  pub const fn is_client_error(self) -> bool {
    matches!(self.code(), 400..=499)
  }

  pub const fn is_server_error(self) -> bool {
    matches!(self.code(), 500..=599)
  }

  /// Client or server error.
  pub const fn is_error(self) -> bool {
    self.code() >= 400
  }
}

impl TryFrom<u16> for HttpStatus {
  type Error = Error;

  fn try_from(code: u16) -> Result<Self, Self::Error> {
    Self::from_code(code).ok_or(Error::UnknownStatusCode(code))
  }
}

impl From<HttpStatus> for u16 {
  #[inline(always)]
  fn from(status: HttpStatus) -> Self {
    status.code()
  }
}

impl fmt::Display for HttpStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.code(), self.name())
  }
}

#[cfg(feature = "serde")]
mod serde_impl {
  use serde::Deserialize;
  use serde::Deserializer;
  use serde::Serialize;
  use serde::Serializer;
  use serde::de;

  use super::*;

  /// Serialized as the bare numeric code.
  impl Serialize for HttpStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
      S: Serializer,
    {
      serializer.serialize_u16(self.code())
    }
  }

  impl<'de> Deserialize<'de> for HttpStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
      D: Deserializer<'de>,
    {
      let code = u16::deserialize(deserializer)?;
      HttpStatus::try_from(code).map_err(de::Error::custom)
    }
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn codes_match_discriminants() {
    assert_eq!(HttpStatus::Continue.code(), 100);
    assert_eq!(HttpStatus::ImUsed.code(), 226);
    assert_eq!(u16::from(HttpStatus::UnavailableForLegalReasons), 451);
    assert_eq!(HttpStatus::NetworkAuthenticationRequired as u16, 511);
  }

  #[test]
  fn every_status_round_trips_through_its_code() {
    assert_eq!(HttpStatus::ALL.len(), 63);
    for &status in HttpStatus::ALL {
      assert_eq!(HttpStatus::try_from(status.code()), Ok(status));
    }
    assert!(HttpStatus::ALL.windows(2).all(|pair| pair[0] < pair[1]));
  }

  #[test]
  fn unknown_codes_are_rejected() {
    for code in [0, 99, 209, 419, 420, 427, 430, 509, 600] {
      assert_eq!(
        HttpStatus::try_from(code),
        Err(Error::UnknownStatusCode(code))
      );
    }
  }

  #[test]
  fn classes() {
    assert!(HttpStatus::EarlyHints.is_informational());
    assert!(HttpStatus::Ok.is_success());
    assert!(HttpStatus::PermanentRedirect.is_redirection());
    assert!(HttpStatus::TooManyRequests.is_client_error());
    assert!(HttpStatus::TooManyRequests.is_error());
    assert!(HttpStatus::LoopDetected.is_server_error());
    assert!(!HttpStatus::NoContent.is_error());
  }

  #[test]
  fn display_shows_code_and_name() {
    assert_eq!(HttpStatus::NotFound.to_string(), "404 NotFound");
    assert_eq!(HttpStatus::Ok.name(), "Ok");
  }

  #[cfg(feature = "serde")]
  mod serde_tests {
    use pretty_assertions::assert_eq;
    use serde_json;

    use super::*;

    #[test]
    fn serializes_as_number() {
      let json = serde_json::to_string(&HttpStatus::Created).unwrap();
      assert_eq!(json, "201");
      let status: HttpStatus = serde_json::from_str("503").unwrap();
      assert_eq!(status, HttpStatus::ServiceUnavailable);
      assert!(serde_json::from_str::<HttpStatus>("299").is_err());
    }
  }
}

//! HTTP-style status carried by an [`ApiError`](crate::ApiError).

use core::fmt;

use http::StatusCode;
use serde::{Serialize, Serializer};

/// Reason text used when a status has no canonical phrase.
pub const UNKNOWN_REASON: &str = "Unknown Status";

/// Status code plus its canonical reason phrase.
///
/// Serializes as the bare integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Status(StatusCode);

impl Status {
    pub const BAD_REQUEST: Self = Self(StatusCode::BAD_REQUEST);
    pub const NOT_FOUND: Self = Self(StatusCode::NOT_FOUND);
    pub const CONFLICT: Self = Self(StatusCode::CONFLICT);
    pub const UNSUPPORTED_MEDIA_TYPE: Self = Self(StatusCode::UNSUPPORTED_MEDIA_TYPE);
    pub const INTERNAL_SERVER_ERROR: Self = Self(StatusCode::INTERNAL_SERVER_ERROR);

    /// Wraps an [`http::StatusCode`].
    #[inline]
    pub const fn new(code: StatusCode) -> Self {
        Self(code)
    }

    /// Builds a status from its numeric value.
    ///
    /// Returns `None` outside the `100..=999` range accepted by `http`.
    #[inline]
    pub fn from_u16(code: u16) -> Option<Self> {
        StatusCode::from_u16(code).ok().map(Self)
    }

    /// Returns the numeric code.
    #[inline]
    pub fn as_u16(&self) -> u16 {
        self.0.as_u16()
    }

    /// Returns the wrapped [`http::StatusCode`].
    #[inline]
    pub const fn code(&self) -> StatusCode {
        self.0
    }

    /// Returns the canonical reason phrase, or [`UNKNOWN_REASON`].
    #[inline]
    pub fn reason(&self) -> &'static str {
        self.0.canonical_reason().unwrap_or(UNKNOWN_REASON)
    }

    /// Decimal form of the code, used as the category token for correlation codes.
    #[inline]
    pub fn token(&self) -> &str {
        self.0.as_str()
    }

    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.0.is_server_error()
    }
}

impl From<StatusCode> for Status {
    #[inline]
    fn from(code: StatusCode) -> Self {
        Self(code)
    }
}

impl From<Status> for StatusCode {
    #[inline]
    fn from(status: Status) -> Self {
        status.0
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.as_u16())
    }
}

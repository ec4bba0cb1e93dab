//! The serializable error model.
//!
//! [`ApiError`] is the body handed back to API callers. Multi-cause failures
//! carry an ordered list of [`SubError`]s, each with its own correlation
//! code. An empty list is left out of the serialized body entirely.
//!
//! ```
//! use status_rail::{ApiError, FieldError, Status};
//!
//! let err = ApiError::builder(Status::BAD_REQUEST, "Validation error")
//!     .without_code()
//!     .sub_error(FieldError::new("user", "email", "", "must not be blank"))
//!     .build();
//!
//! let json = serde_json::to_value(&err).unwrap();
//! assert!(json.get("code").is_none());
//! assert_eq!(json["subErrors"][0]["field"], "email");
//! ```
use smallvec::SmallVec;

pub mod api_error;
pub mod sub_error;
pub mod timestamp;

pub use api_error::*;
pub use sub_error::*;
pub use timestamp::*;

/// SmallVec-backed sub-error storage.
///
/// Inline space for two entries covers the common one-or-two field case.
pub type SubErrors = SmallVec<[SubError; 2]>;

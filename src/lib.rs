//! Classified, serializable API errors with deterministic correlation codes.
//!
//! Each submodule re-exports its public surface from here, so consumers can
//! simply depend on `status_rail::*` or pick focused pieces as needed.
//!
//! # Examples
//!
//! ## Classifying a Failure
//!
//! ```
//! use status_rail::{classify, FailureDescription};
//!
//! let err = classify(FailureDescription::type_mismatch("age", "abc", "Integer"));
//!
//! assert_eq!(err.status().as_u16(), 400);
//! assert_eq!(
//!     err.message(),
//!     "The parameter 'age' of value 'abc' could not be converted to type 'Integer'"
//! );
//! assert!(err.code().is_some());
//! ```
//!
//! ## Validation Failures
//!
//! ```
//! use status_rail::code::generate;
//! use status_rail::validation::{FieldFailure, GlobalFailure};
//! use status_rail::{classify, FailureDescription};
//!
//! let err = classify(FailureDescription::validation(
//!     [FieldFailure::new("user", "email", "must not be blank")],
//!     [GlobalFailure::new("user", "passwords must match")],
//! ));
//!
//! assert_eq!(err.message(), "Validation error");
//! assert_eq!(err.sub_errors().len(), 2);
//! assert_eq!(err.sub_errors()[0].code(), generate("email", "must not be blank").ok());
//! ```
//!
//! ## Serialized Shape
//!
//! ```
//! use status_rail::{classify, FailureDescription};
//!
//! let err = classify(FailureDescription::missing_parameter("user_id"));
//! let json = serde_json::to_value(&err).unwrap();
//!
//! assert_eq!(json["status"], 400);
//! assert_eq!(json["message"], "user_id parameter is missing");
//! assert!(json.get("subErrors").is_none());
//! ```

/// Deterministic correlation codes
pub mod code;
/// Failure descriptions and their classification
pub mod classify;
/// Boundary helpers: tagging, diagnostics, configuration and rendering
pub mod handler;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Status codes and reason phrases
pub mod status;
/// ApiError and SubError structures
pub mod types;
/// Aggregation of validation failures into sub-errors
pub mod validation;

/// Tower integration - Layer and Service implementations (requires `tower` feature)
#[cfg(feature = "tower")]
pub mod tower;

pub use classify::{classify, FailureDescription};
pub use code::{generate, generate_or_absent, CorrelationCode, EncodingError};
pub use handler::{ErrorHandler, ErrorResponse, IntoFailure};
pub use status::Status;
pub use types::{ApiError, ApiErrorBuilder, FieldError, ObjectError, SubError, SubErrors, Timestamp};
pub use validation::aggregate;

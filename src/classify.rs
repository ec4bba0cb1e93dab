//! Failure classification.
//!
//! The request boundary inspects a live failure once and describes it as a
//! [`FailureDescription`]. [`classify`] maps that description onto a status
//! and a message and stamps the correlation code. Classification is a pure
//! function: it does not log, allocate shared state or perform I/O.
//!
//! | Failure | Status | Message |
//! |---|---|---|
//! | `ValidationFailed` | 400 | `Validation error` (details in sub-errors) |
//! | `ConstraintViolations` | 400 | `Validation error` (details in sub-errors) |
//! | `MissingParameter` | 400 | `{name} parameter is missing` |
//! | `TypeMismatch` | 400 | `The parameter '{param}' of value '{value}' could not be converted to type '{expected_type}'` |
//! | `MalformedBody` | 400 | `Malformed JSON request` |
//! | `UnsupportedMediaType` | 415 | `Unsupported Media Type` |
//! | `EntityNotFound` | 404 | the supplied detail, or `Not Found` |
//! | `DataConflict` | 409 / 500 | `Database error` / `Data integrity violation` |
//! | `UnwritableResponse` | 500 | `Error writing JSON output` |
//! | `NoRouteFound` | 400 | `Could not find the {method} method for URL {url}` |
//! | `ExplicitStatusFailure` | given | the reason, or the canonical phrase |
//! | `Unclassified` | 500 | `Internal Server Error` |
//!
//! # Examples
//!
//! ```
//! use status_rail::{classify, FailureDescription};
//!
//! let err = classify(FailureDescription::unclassified("NullPointerException at line 42"));
//! assert_eq!(err.status().as_u16(), 500);
//! assert_eq!(err.message(), "Internal Server Error");
//! ```

use core::fmt;

use http::Method;

use crate::status::Status;
use crate::types::ApiError;
use crate::validation::{aggregate, aggregate_violations, ConstraintViolation, FieldFailure, GlobalFailure};

pub const VALIDATION_ERROR: &str = "Validation error";
pub const MALFORMED_BODY: &str = "Malformed JSON request";
pub const DATABASE_ERROR: &str = "Database error";
pub const DATA_INTEGRITY_VIOLATION: &str = "Data integrity violation";
pub const UNWRITABLE_RESPONSE: &str = "Error writing JSON output";

/// A failure already tagged with its category by the request boundary.
///
/// Variants that may carry internal diagnostic text (`detail`,
/// `content_type`) keep it for logging only; it never reaches the
/// classified message.
#[derive(Debug, Clone, PartialEq)]
pub enum FailureDescription {
    /// Request body binding failed one or more validation rules.
    ValidationFailed {
        field_failures: Vec<FieldFailure>,
        global_failures: Vec<GlobalFailure>,
    },
    /// Parameter or nested-property constraints were broken.
    ConstraintViolations(Vec<ConstraintViolation>),
    MissingParameter {
        name: String,
    },
    TypeMismatch {
        param: String,
        value: String,
        expected_type: String,
    },
    /// The request body could not be parsed.
    MalformedBody {
        detail: Option<String>,
    },
    UnsupportedMediaType {
        content_type: Option<String>,
    },
    /// A lookup came back empty. `detail` comes from trusted code and is
    /// shown as-is.
    EntityNotFound {
        detail: Option<String>,
    },
    /// A write was rejected by the data store.
    DataConflict {
        root_cause_is_constraint: bool,
    },
    /// The success response could not be serialized.
    UnwritableResponse {
        detail: Option<String>,
    },
    /// No handler is mapped for the method and URL.
    NoRouteFound {
        method: Method,
        url: String,
    },
    /// The failure already names its own status.
    ExplicitStatusFailure {
        status: Status,
        reason: Option<String>,
    },
    /// Anything else.
    Unclassified {
        detail: String,
    },
}

impl FailureDescription {
    pub fn validation(
        field_failures: impl IntoIterator<Item = FieldFailure>,
        global_failures: impl IntoIterator<Item = GlobalFailure>,
    ) -> Self {
        Self::ValidationFailed {
            field_failures: field_failures.into_iter().collect(),
            global_failures: global_failures.into_iter().collect(),
        }
    }

    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    pub fn type_mismatch(
        param: impl Into<String>,
        value: impl Into<String>,
        expected_type: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            param: param.into(),
            value: value.into(),
            expected_type: expected_type.into(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::EntityNotFound { detail: Some(detail.into()) }
    }

    pub fn data_conflict(root_cause_is_constraint: bool) -> Self {
        Self::DataConflict { root_cause_is_constraint }
    }

    pub fn no_route(method: Method, url: impl Into<String>) -> Self {
        Self::NoRouteFound { method, url: url.into() }
    }

    pub fn explicit(status: Status, reason: Option<String>) -> Self {
        Self::ExplicitStatusFailure { status, reason }
    }

    /// Wraps any failure the boundary could not tag; its text is kept for logs.
    pub fn unclassified(error: impl fmt::Display) -> Self {
        Self::Unclassified { detail: error.to_string() }
    }

    /// Stable snake_case name of the category, for structured logs.
    pub fn category(&self) -> &'static str {
        match self {
            Self::ValidationFailed { .. } => "validation_failed",
            Self::ConstraintViolations(_) => "constraint_violations",
            Self::MissingParameter { .. } => "missing_parameter",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::MalformedBody { .. } => "malformed_body",
            Self::UnsupportedMediaType { .. } => "unsupported_media_type",
            Self::EntityNotFound { .. } => "entity_not_found",
            Self::DataConflict { .. } => "data_conflict",
            Self::UnwritableResponse { .. } => "unwritable_response",
            Self::NoRouteFound { .. } => "no_route_found",
            Self::ExplicitStatusFailure { .. } => "explicit_status",
            Self::Unclassified { .. } => "unclassified",
        }
    }

    /// Internal diagnostic text that must not be shown to callers.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::MalformedBody { detail } | Self::UnwritableResponse { detail } => {
                detail.as_deref()
            },
            Self::UnsupportedMediaType { content_type } => content_type.as_deref(),
            Self::Unclassified { detail } => Some(detail),
            _ => None,
        }
    }
}

/// Maps a tagged failure onto an [`ApiError`].
pub fn classify(failure: FailureDescription) -> ApiError {
    use FailureDescription::*;

    match failure {
        ValidationFailed { field_failures, global_failures } => {
            ApiError::builder(Status::BAD_REQUEST, VALIDATION_ERROR)
                .without_code()
                .sub_errors(aggregate(field_failures, global_failures))
                .build()
        },
        ConstraintViolations(violations) => ApiError::builder(Status::BAD_REQUEST, VALIDATION_ERROR)
            .without_code()
            .sub_errors(aggregate_violations(violations))
            .build(),
        MissingParameter { name } => {
            ApiError::new(Status::BAD_REQUEST, format!("{name} parameter is missing"))
        },
        TypeMismatch { param, value, expected_type } => ApiError::new(
            Status::BAD_REQUEST,
            format!(
                "The parameter '{param}' of value '{value}' could not be converted to type '{expected_type}'"
            ),
        ),
        MalformedBody { .. } => ApiError::new(Status::BAD_REQUEST, MALFORMED_BODY),
        UnsupportedMediaType { .. } => reason_only(Status::UNSUPPORTED_MEDIA_TYPE),
        EntityNotFound { detail } => match non_blank(detail) {
            Some(detail) => ApiError::new(Status::NOT_FOUND, detail),
            None => ApiError::builder(Status::NOT_FOUND, Status::NOT_FOUND.reason())
                .without_code()
                .build(),
        },
        DataConflict { root_cause_is_constraint: true } => {
            ApiError::new(Status::CONFLICT, DATABASE_ERROR)
        },
        DataConflict { root_cause_is_constraint: false } => {
            ApiError::new(Status::INTERNAL_SERVER_ERROR, DATA_INTEGRITY_VIOLATION)
        },
        UnwritableResponse { .. } => ApiError::new(Status::INTERNAL_SERVER_ERROR, UNWRITABLE_RESPONSE),
        // 400 rather than 404 is kept for compatibility with existing clients.
        NoRouteFound { method, url } => ApiError::new(
            Status::BAD_REQUEST,
            format!("Could not find the {method} method for URL {url}"),
        ),
        ExplicitStatusFailure { status, reason } => match non_blank(reason) {
            Some(reason) => ApiError::new(status, reason),
            None => reason_only(status),
        },
        Unclassified { .. } => reason_only(Status::INTERNAL_SERVER_ERROR),
    }
}

fn reason_only(status: Status) -> ApiError {
    ApiError::new(status, status.reason())
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

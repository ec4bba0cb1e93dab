use core::fmt;

use serde::Serialize;

use crate::code::{generate_or_absent, CorrelationCode};
use crate::status::Status;
use crate::types::{SubError, SubErrors, Timestamp};

/// Externally visible error body.
///
/// Built once per failure through [`ApiError::new`] or [`ApiError::builder`];
/// nothing can be changed after construction.
///
/// # Examples
///
/// ```
/// use status_rail::{ApiError, Status};
///
/// let err = ApiError::new(Status::NOT_FOUND, "order 7 does not exist");
/// assert_eq!(err.status().as_u16(), 404);
/// assert!(err.code().is_some());
/// assert!(err.sub_errors().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    timestamp: Timestamp,
    status: Status,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<CorrelationCode>,
    #[serde(skip_serializing_if = "no_sub_errors")]
    sub_errors: SubErrors,
}

fn no_sub_errors(sub_errors: &SubErrors) -> bool {
    sub_errors.is_empty()
}

impl ApiError {
    /// Creates an error stamped now, coded from `(status, message)`.
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        Self::builder(status, message).build()
    }

    /// Starts building an error for `status` and `message`.
    pub fn builder(status: Status, message: impl Into<String>) -> ApiErrorBuilder {
        ApiErrorBuilder {
            status,
            message: message.into(),
            coded: true,
            sub_errors: SubErrors::new(),
            timestamp: None,
        }
    }

    #[inline]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn code(&self) -> Option<CorrelationCode> {
        self.code
    }

    /// Sub-errors in the order they were supplied.
    #[inline]
    pub fn sub_errors(&self) -> &[SubError] {
        &self.sub_errors
    }

    #[inline]
    pub fn into_sub_errors(self) -> SubErrors {
        self.sub_errors
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)?;
        if let Some(code) = self.code {
            write!(f, " (code: {})", code)?;
        }
        if !self.sub_errors.is_empty() {
            write!(f, " [{} sub-errors]", self.sub_errors.len())?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Construction-time access to an [`ApiError`].
#[must_use]
#[derive(Debug, Clone)]
pub struct ApiErrorBuilder {
    status: Status,
    message: String,
    coded: bool,
    sub_errors: SubErrors,
    timestamp: Option<Timestamp>,
}

impl ApiErrorBuilder {
    /// Leaves the parent code absent; detail codes live on the sub-errors.
    #[inline]
    pub fn without_code(mut self) -> Self {
        self.coded = false;
        self
    }

    /// Appends sub-errors, keeping their order.
    #[inline]
    pub fn sub_errors<I>(mut self, sub_errors: I) -> Self
    where
        I: IntoIterator<Item = SubError>,
    {
        self.sub_errors.extend(sub_errors);
        self
    }

    #[inline]
    pub fn sub_error(mut self, sub_error: impl Into<SubError>) -> Self {
        self.sub_errors.push(sub_error.into());
        self
    }

    /// Uses a fixed instant instead of the clock.
    #[inline]
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn build(self) -> ApiError {
        let code = if self.coded {
            generate_or_absent(self.status.token(), self.message.as_str())
        } else {
            None
        };
        ApiError {
            timestamp: self.timestamp.unwrap_or_else(Timestamp::now),
            status: self.status,
            message: self.message,
            code,
            sub_errors: self.sub_errors,
        }
    }
}

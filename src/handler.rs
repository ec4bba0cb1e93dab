//! The request-boundary side of classification.
//!
//! Frameworks own interception; this module gives them the pieces to plug in:
//!
//! - [`IntoFailure`] - the one place a concrete error is tagged
//! - [`DiagnosticSink`] - where the original failure is logged, injected
//!   rather than global
//! - [`ErrorHandler`] - tags, classifies, reports and renders
//! - [`HandlerConfig`] - runtime switches, loadable from application config
//!
//! # Examples
//!
//! ```
//! use status_rail::handler::{Diagnostic, DiagnosticSink, ErrorHandler};
//! use status_rail::FailureDescription;
//!
//! struct Stderr;
//!
//! impl DiagnosticSink for Stderr {
//!     fn report(&self, d: &Diagnostic<'_>) {
//!         eprintln!("{} -> {}", d.category, d.error);
//!     }
//! }
//!
//! let handler = ErrorHandler::new().with_sink(Stderr);
//!
//! let response = handler.handle(FailureDescription::missing_parameter("user_id"));
//! assert_eq!(response.status_code(), http::StatusCode::BAD_REQUEST);
//!
//! let rendered = handler.render(&response);
//! assert_eq!(rendered.headers()["content-type"], "application/json");
//! ```

use core::fmt;

use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Response, StatusCode};
use serde::Deserialize;

use crate::classify::{classify, FailureDescription};
use crate::types::ApiError;
use crate::validation::Violations;

/// Conversion from a concrete failure into a tagged description.
///
/// Implement this for an application's error type instead of inspecting
/// error types at classification time.
pub trait IntoFailure {
    fn into_failure(self) -> FailureDescription;
}

impl IntoFailure for FailureDescription {
    #[inline]
    fn into_failure(self) -> FailureDescription {
        self
    }
}

/// Body parsing errors. I/O failures while reading are not the caller's fault.
impl IntoFailure for serde_json::Error {
    fn into_failure(self) -> FailureDescription {
        match self.classify() {
            serde_json::error::Category::Io => FailureDescription::unclassified(self),
            _ => FailureDescription::MalformedBody { detail: Some(self.to_string()) },
        }
    }
}

impl IntoFailure for Violations {
    fn into_failure(self) -> FailureDescription {
        Violations::into_failure(self)
            .unwrap_or_else(|| FailureDescription::validation(Vec::new(), Vec::new()))
    }
}

/// Record handed to a [`DiagnosticSink`] after classification.
#[derive(Debug, Clone, Copy)]
pub struct Diagnostic<'a> {
    /// The tagged failure, as it was before classification.
    pub failure: &'a FailureDescription,
    /// See [`FailureDescription::category`].
    pub category: &'static str,
    /// Internal text withheld from the response body.
    pub detail: Option<&'a str>,
    pub error: &'a ApiError,
}

/// Destination for diagnostics about handled failures.
pub trait DiagnosticSink {
    fn report(&self, diagnostic: &Diagnostic<'_>);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic<'_>),
{
    #[inline]
    fn report(&self, diagnostic: &Diagnostic<'_>) {
        self(diagnostic)
    }
}

/// Discards every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    #[inline]
    fn report(&self, _diagnostic: &Diagnostic<'_>) {}
}

/// Emits diagnostics as `tracing` events: 5xx at `ERROR`, everything else at `WARN`.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[cfg(feature = "tracing")]
impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic<'_>) {
        let error = diagnostic.error;
        let status = error.status().as_u16();
        let code = error.code().map(|c| c.to_string());
        let sub_errors = error.sub_errors().len();

        if error.status().is_server_error() {
            tracing::error!(
                status,
                code = code.as_deref(),
                category = diagnostic.category,
                detail = diagnostic.detail,
                sub_errors,
                "{}",
                error.message()
            );
        } else {
            tracing::warn!(
                status,
                code = code.as_deref(),
                category = diagnostic.category,
                detail = diagnostic.detail,
                sub_errors,
                "{}",
                error.message()
            );
        }
    }
}

/// Runtime switches for [`ErrorHandler`].
///
/// Deserializes with defaults so it can sit in a larger config file:
///
/// ```
/// use status_rail::handler::HandlerConfig;
///
/// let config: HandlerConfig = serde_json::from_str(r#"{ "enabled": false }"#).unwrap();
/// assert!(!config.enabled);
///
/// let config: HandlerConfig = serde_json::from_str("{}").unwrap();
/// assert!(config.enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// When off, boundary adapters pass failures through untouched.
    pub enabled: bool,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl HandlerConfig {
    #[must_use]
    #[inline]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// A classified failure ready to be written to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    error: ApiError,
}

impl ErrorResponse {
    #[inline]
    pub fn new(error: ApiError) -> Self {
        Self { error }
    }

    /// Transport status, taken from the body's status.
    #[inline]
    pub fn status_code(&self) -> StatusCode {
        self.error.status().code()
    }

    #[inline]
    pub fn body(&self) -> &ApiError {
        &self.error
    }

    #[inline]
    pub fn into_body(self) -> ApiError {
        self.error
    }

    /// Serializes the body as JSON.
    ///
    /// # Errors
    ///
    /// Propagates the serializer's error.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.error)
    }
}

impl From<ApiError> for ErrorResponse {
    #[inline]
    fn from(error: ApiError) -> Self {
        Self::new(error)
    }
}

/// Classifies failures and reports them to an injected sink.
#[derive(Debug, Clone, Default)]
pub struct ErrorHandler<D = NoopSink> {
    config: HandlerConfig,
    sink: D,
}

impl ErrorHandler<NoopSink> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D> ErrorHandler<D> {
    /// Replaces the diagnostic sink.
    #[inline]
    pub fn with_sink<S>(self, sink: S) -> ErrorHandler<S> {
        ErrorHandler { config: self.config, sink }
    }

    #[inline]
    pub fn with_config(mut self, config: HandlerConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    #[inline]
    pub fn sink(&self) -> &D {
        &self.sink
    }
}

impl<D: DiagnosticSink> ErrorHandler<D> {
    /// Tags, classifies and reports a failure.
    ///
    /// Always produces a response, regardless of [`HandlerConfig::enabled`].
    pub fn handle<E: IntoFailure>(&self, error: E) -> ErrorResponse {
        let failure = error.into_failure();
        let error = classify(failure.clone());
        self.sink.report(&Diagnostic {
            failure: &failure,
            category: failure.category(),
            detail: failure.detail(),
            error: &error,
        });
        ErrorResponse::new(error)
    }

    /// Writes a response as a JSON HTTP response.
    ///
    /// A body that cannot be serialized is replaced by the
    /// `UnwritableResponse` body, which is reported like any other failure.
    /// The built-in [`ApiError`] always serializes, so this only triggers
    /// if its serializer ever starts returning errors.
    pub fn render(&self, response: &ErrorResponse) -> Response<Vec<u8>> {
        match response.to_json_bytes() {
            Ok(body) => json_response(response.status_code(), body),
            Err(err) => self.render_unwritable(&err),
        }
    }

    fn render_unwritable(&self, err: &dyn fmt::Display) -> Response<Vec<u8>> {
        let fallback =
            self.handle(FailureDescription::UnwritableResponse { detail: Some(err.to_string()) });
        let body = fallback.to_json_bytes().unwrap_or_default();
        json_response(fallback.status_code(), body)
    }

    /// Shorthand for [`handle`](Self::handle) followed by [`render`](Self::render).
    pub fn respond<E: IntoFailure>(&self, error: E) -> Response<Vec<u8>> {
        self.render(&self.handle(error))
    }
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response<Vec<u8>> {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

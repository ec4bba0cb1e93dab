//! Tower integration for status-rail.
//!
//! This module provides a Tower `Layer` and `Service` that turn a wrapped
//! service's errors into classified [`ErrorResponse`]s at the service
//! boundary.
//!
//! # Feature Flag
//!
//! Requires the `tower` feature:
//!
//! ```toml
//! [dependencies]
//! status-rail = { version = "0.1", features = ["tower"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use status_rail::handler::ErrorHandler;
//! use status_rail::tower::ApiErrorLayer;
//! use tower::ServiceBuilder;
//!
//! let service = ServiceBuilder::new()
//!     .layer(ApiErrorLayer::new(ErrorHandler::new()))
//!     .service(my_service);
//! ```

use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use std::sync::Arc;

use futures_core::future::FusedFuture;
use pin_project_lite::pin_project;
use tower::{Layer, Service};

use crate::handler::{DiagnosticSink, ErrorHandler, ErrorResponse, IntoFailure};

/// Error produced by [`ApiErrorService`].
#[derive(Debug)]
pub enum LayerError<E> {
    /// The failure was classified and reported.
    Response(ErrorResponse),
    /// The handler is disabled; the original error is returned untouched.
    Passthrough(E),
}

impl<E> LayerError<E> {
    /// Returns the classified response, if any.
    #[inline]
    pub fn response(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Response(response) => Some(response),
            Self::Passthrough(_) => None,
        }
    }

    #[inline]
    pub fn into_response(self) -> Option<ErrorResponse> {
        match self {
            Self::Response(response) => Some(response),
            Self::Passthrough(_) => None,
        }
    }
}

impl<E: fmt::Display> fmt::Display for LayerError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Response(response) => fmt::Display::fmt(response.body(), f),
            Self::Passthrough(error) => fmt::Display::fmt(error, f),
        }
    }
}

impl<E> std::error::Error for LayerError<E> where E: std::error::Error + 'static {}

/// A Tower [`Layer`] that classifies errors of the wrapped service.
///
/// The handler is shared between every service the layer builds.
#[derive(Debug)]
pub struct ApiErrorLayer<D> {
    handler: Arc<ErrorHandler<D>>,
}

impl<D> ApiErrorLayer<D> {
    #[inline]
    pub fn new(handler: ErrorHandler<D>) -> Self {
        Self { handler: Arc::new(handler) }
    }

    #[inline]
    pub fn handler(&self) -> &ErrorHandler<D> {
        &self.handler
    }
}

impl<D> Clone for ApiErrorLayer<D> {
    fn clone(&self) -> Self {
        Self { handler: Arc::clone(&self.handler) }
    }
}

impl<S, D> Layer<S> for ApiErrorLayer<D> {
    type Service = ApiErrorService<S, D>;

    #[inline]
    fn layer(&self, inner: S) -> Self::Service {
        ApiErrorService { inner, handler: Arc::clone(&self.handler) }
    }
}

/// A Tower [`Service`] that classifies the inner service's errors.
///
/// Created by [`ApiErrorLayer`].
#[derive(Debug)]
pub struct ApiErrorService<S, D> {
    inner: S,
    handler: Arc<ErrorHandler<D>>,
}

impl<S, D> ApiErrorService<S, D> {
    #[inline]
    pub fn new(inner: S, handler: ErrorHandler<D>) -> Self {
        Self { inner, handler: Arc::new(handler) }
    }

    #[inline]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    #[inline]
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    #[inline]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Clone, D> Clone for ApiErrorService<S, D> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone(), handler: Arc::clone(&self.handler) }
    }
}

impl<S, D, Request> Service<Request> for ApiErrorService<S, D>
where
    S: Service<Request>,
    S::Error: IntoFailure,
    D: DiagnosticSink,
{
    type Response = S::Response;
    type Error = LayerError<S::Error>;
    type Future = ApiErrorFuture<S::Future, D>;

    #[inline]
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        let handler = &self.handler;
        self.inner.poll_ready(cx).map_err(|e| convert(handler, e))
    }

    #[inline]
    fn call(&mut self, request: Request) -> Self::Future {
        ApiErrorFuture { inner: self.inner.call(request), handler: Arc::clone(&self.handler) }
    }
}

fn convert<E, D>(handler: &ErrorHandler<D>, error: E) -> LayerError<E>
where
    E: IntoFailure,
    D: DiagnosticSink,
{
    if handler.config().enabled {
        LayerError::Response(handler.handle(error))
    } else {
        LayerError::Passthrough(error)
    }
}

pin_project! {
    /// Future returned by [`ApiErrorService`].
    #[must_use = "futures do nothing unless polled"]
    pub struct ApiErrorFuture<F, D> {
        #[pin]
        inner: F,
        handler: Arc<ErrorHandler<D>>,
    }
}

impl<F, T, E, D> Future for ApiErrorFuture<F, D>
where
    F: Future<Output = Result<T, E>>,
    E: IntoFailure,
    D: DiagnosticSink,
{
    type Output = Result<T, LayerError<E>>;

    #[inline]
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        match this.inner.poll(cx) {
            Poll::Ready(Ok(response)) => Poll::Ready(Ok(response)),
            Poll::Ready(Err(error)) => Poll::Ready(Err(convert(&**this.handler, error))),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<F, T, E, D> FusedFuture for ApiErrorFuture<F, D>
where
    F: FusedFuture<Output = Result<T, E>>,
    E: IntoFailure,
    D: DiagnosticSink,
{
    #[inline]
    fn is_terminated(&self) -> bool {
        self.inner.is_terminated()
    }
}

/// Extension trait for wrapping a service with error classification.
pub trait ServiceApiErrorExt<Request>: Service<Request> + Sized {
    fn with_error_handler<D>(self, handler: ErrorHandler<D>) -> ApiErrorService<Self, D> {
        ApiErrorService::new(self, handler)
    }
}

impl<S, Request> ServiceApiErrorExt<Request> for S where S: Service<Request> {}

//! Aggregation of validation failures into sub-errors.
//!
//! A validation pass can fail in many places at once. This module keeps every
//! individual failure, gives each its own correlation code and returns them
//! in a stable order: field failures first, then object-wide failures.
//!
//! # Key Components
//!
//! - [`FieldFailure`] / [`GlobalFailure`] - failures as reported by a binder
//! - [`ConstraintViolation`] - failures on parameters or nested properties
//! - [`aggregate`] - the order-preserving conversion into [`SubError`](crate::SubError)s
//! - [`Violations`] - an accumulator for building the failure lists by hand
mod aggregator;
mod failure;
mod violations;

pub use self::aggregator::*;
pub use self::failure::*;
pub use self::violations::*;

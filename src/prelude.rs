//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use status_rail::prelude::*;
//!
//! fn lookup(id: u64) -> Result<String, FailureDescription> {
//!     Err(FailureDescription::not_found(format!("order {id} does not exist")))
//! }
//!
//! let response = ErrorHandler::new().handle(lookup(7).unwrap_err());
//! assert_eq!(response.body().message(), "order 7 does not exist");
//! ```

// Core types
pub use crate::classify::{classify, FailureDescription};
pub use crate::status::Status;
pub use crate::types::{ApiError, SubError};
pub use crate::validation::{FieldFailure, GlobalFailure, Violations};

// Boundary
pub use crate::handler::{DiagnosticSink, ErrorHandler, ErrorResponse, IntoFailure};

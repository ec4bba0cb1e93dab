//! Deterministic correlation codes.
//!
//! A [`CorrelationCode`] is a name-based (version 3, MD5) UUID computed from
//! the bytes of a category token followed by the bytes of a message, with no
//! separator and no namespace. The same pair always produces the same code,
//! on every platform and in every process, which makes the code usable for
//! grouping support tickets and log lines that describe the same failure.
//!
//! # Examples
//!
//! ```
//! use status_rail::code::generate;
//!
//! let a = generate("email", "must not be blank").unwrap();
//! let b = generate("email", "must not be blank").unwrap();
//! assert_eq!(a, b);
//! assert_eq!(a.to_string(), "098ec4e5-44e6-3703-86af-d92e4eff7f1a");
//! ```
//!
//! Codes are diagnostic aids, not correctness requirements. Callers that must
//! always produce a response use [`generate_or_absent`], which is the single
//! place where a generation failure is turned into an absent code.

use core::fmt;
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};

use serde::{Serialize, Serializer};
use uuid::{Builder, Uuid};

/// Opaque identifier derived from `(category, message)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CorrelationCode(Uuid);

impl CorrelationCode {
    /// Returns the underlying UUID.
    #[inline]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the raw 16 bytes of the code.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl fmt::Display for CorrelationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl From<CorrelationCode> for Uuid {
    #[inline]
    fn from(code: CorrelationCode) -> Self {
        code.0
    }
}

impl Serialize for CorrelationCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0.hyphenated())
    }
}

/// Which of the two generator inputs could not be encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeInputRole {
    Category,
    Message,
}

impl fmt::Display for CodeInputRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category => f.write_str("category"),
            Self::Message => f.write_str("message"),
        }
    }
}

/// Failure to obtain the byte representation of a generator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingError {
    role: CodeInputRole,
    reason: Cow<'static, str>,
}

impl EncodingError {
    /// Creates an encoding error for the given input role.
    pub fn new(role: CodeInputRole, reason: impl Into<Cow<'static, str>>) -> Self {
        Self { role, reason: reason.into() }
    }

    /// Returns which input failed to encode.
    #[inline]
    pub fn role(&self) -> CodeInputRole {
        self.role
    }

    /// Returns the reason the input could not be encoded.
    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    fn with_role(mut self, role: CodeInputRole) -> Self {
        self.role = role;
        self
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot encode {} for correlation code: {}", self.role, self.reason)
    }
}

impl std::error::Error for EncodingError {}

/// Values that can feed the code generator.
///
/// Implemented for the string types that always encode (`str`, `String`,
/// `Cow<str>`) and for OS strings, which only encode when they hold valid
/// Unicode.
pub trait CodeInput {
    /// Returns the bytes hashed for this input.
    fn code_bytes(&self) -> Result<Cow<'_, [u8]>, EncodingError>;
}

impl CodeInput for str {
    #[inline]
    fn code_bytes(&self) -> Result<Cow<'_, [u8]>, EncodingError> {
        Ok(Cow::Borrowed(self.as_bytes()))
    }
}

impl CodeInput for String {
    #[inline]
    fn code_bytes(&self) -> Result<Cow<'_, [u8]>, EncodingError> {
        self.as_str().code_bytes()
    }
}

impl CodeInput for Cow<'_, str> {
    #[inline]
    fn code_bytes(&self) -> Result<Cow<'_, [u8]>, EncodingError> {
        self.as_ref().code_bytes()
    }
}

impl CodeInput for OsStr {
    fn code_bytes(&self) -> Result<Cow<'_, [u8]>, EncodingError> {
        self.to_str()
            .map(|s| Cow::Borrowed(s.as_bytes()))
            .ok_or_else(|| EncodingError::new(CodeInputRole::Category, "not valid unicode"))
    }
}

impl CodeInput for OsString {
    #[inline]
    fn code_bytes(&self) -> Result<Cow<'_, [u8]>, EncodingError> {
        self.as_os_str().code_bytes()
    }
}

impl<T: CodeInput + ?Sized> CodeInput for &T {
    #[inline]
    fn code_bytes(&self) -> Result<Cow<'_, [u8]>, EncodingError> {
        (**self).code_bytes()
    }
}

/// Derives the correlation code for `(category, message)`.
///
/// # Errors
///
/// Returns [`EncodingError`] when either input has no byte representation.
pub fn generate<C, M>(category: &C, message: &M) -> Result<CorrelationCode, EncodingError>
where
    C: CodeInput + ?Sized,
    M: CodeInput + ?Sized,
{
    let category = category.code_bytes().map_err(|e| e.with_role(CodeInputRole::Category))?;
    let message = message.code_bytes().map_err(|e| e.with_role(CodeInputRole::Message))?;
    Ok(from_parts(&category, &message))
}

/// Derives the correlation code, yielding `None` if generation fails.
///
/// This is the only place a generation failure is discarded.
#[inline]
pub fn generate_or_absent<C, M>(category: &C, message: &M) -> Option<CorrelationCode>
where
    C: CodeInput + ?Sized,
    M: CodeInput + ?Sized,
{
    generate(category, message).ok()
}

fn from_parts(category: &[u8], message: &[u8]) -> CorrelationCode {
    let mut bytes = Vec::with_capacity(category.len() + message.len());
    bytes.extend_from_slice(category);
    bytes.extend_from_slice(message);
    let digest = md5::compute(&bytes);
    CorrelationCode(Builder::from_md5_bytes(digest.0).into_uuid())
}

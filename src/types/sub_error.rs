use serde::Serialize;
use serde_json::Value;

use crate::code::{generate_or_absent, CorrelationCode};

/// One cause inside a multi-cause failure.
///
/// Serializes untagged: a field error carries `field` and `rejectedValue`,
/// an object error does not.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SubError {
    Field(FieldError),
    Object(ObjectError),
}

impl SubError {
    /// Name of the object or form the failure belongs to.
    pub fn object_name(&self) -> &str {
        match self {
            Self::Field(e) => &e.object_name,
            Self::Object(e) => &e.object_name,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Field(e) => &e.message,
            Self::Object(e) => &e.message,
        }
    }

    pub fn code(&self) -> Option<CorrelationCode> {
        match self {
            Self::Field(e) => e.code,
            Self::Object(e) => e.code,
        }
    }

    #[inline]
    pub fn as_field(&self) -> Option<&FieldError> {
        match self {
            Self::Field(e) => Some(e),
            Self::Object(_) => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&ObjectError> {
        match self {
            Self::Object(e) => Some(e),
            Self::Field(_) => None,
        }
    }
}

impl From<FieldError> for SubError {
    #[inline]
    fn from(error: FieldError) -> Self {
        Self::Field(error)
    }
}

impl From<ObjectError> for SubError {
    #[inline]
    fn from(error: ObjectError) -> Self {
        Self::Object(error)
    }
}

/// A single field-level validation failure on a named object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    #[serde(rename = "object")]
    pub(crate) object_name: String,
    pub(crate) field: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub(crate) rejected_value: Value,
    pub(crate) message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) code: Option<CorrelationCode>,
}

impl FieldError {
    /// Creates a field error coded from `(field, message)`.
    pub fn new(
        object_name: impl Into<String>,
        field: impl Into<String>,
        rejected_value: impl Into<Value>,
        message: impl Into<String>,
    ) -> Self {
        let field = field.into();
        let message = message.into();
        let code = generate_or_absent(field.as_str(), message.as_str());
        Self::coded(object_name.into(), field, rejected_value.into(), message, code)
    }

    pub(crate) fn coded(
        object_name: String,
        field: String,
        rejected_value: Value,
        message: String,
        code: Option<CorrelationCode>,
    ) -> Self {
        Self { object_name, field, rejected_value, message, code }
    }

    #[inline]
    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    #[inline]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The rejected input, `Value::Null` when none was captured.
    #[inline]
    pub fn rejected_value(&self) -> &Value {
        &self.rejected_value
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn code(&self) -> Option<CorrelationCode> {
        self.code
    }
}

/// A failure not attributable to one field, such as a cross-field rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectError {
    #[serde(rename = "object")]
    pub(crate) object_name: String,
    pub(crate) message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) code: Option<CorrelationCode>,
}

impl ObjectError {
    /// Creates an object error coded from `(object_name, message)`.
    pub fn new(object_name: impl Into<String>, message: impl Into<String>) -> Self {
        let object_name = object_name.into();
        let message = message.into();
        let code = generate_or_absent(object_name.as_str(), message.as_str());
        Self { object_name, message, code }
    }

    #[inline]
    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn code(&self) -> Option<CorrelationCode> {
        self.code
    }
}

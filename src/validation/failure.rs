use serde_json::Value;

/// A single field that failed validation, as reported by the binding layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFailure {
    pub object_name: String,
    pub field: String,
    pub rejected_value: Value,
    pub message: String,
    /// Category of the originating rule (e.g. `NotBlank`), when known.
    pub constraint: Option<String>,
}

impl FieldFailure {
    pub fn new(
        object_name: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            object_name: object_name.into(),
            field: field.into(),
            rejected_value: Value::Null,
            message: message.into(),
            constraint: None,
        }
    }

    /// Records the value that was rejected.
    #[must_use]
    #[inline]
    pub fn rejected(mut self, value: impl Into<Value>) -> Self {
        self.rejected_value = value.into();
        self
    }

    /// Records the rule category; the sub-error code is then derived from it.
    #[must_use]
    #[inline]
    pub fn constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = Some(constraint.into());
        self
    }
}

/// A failure of a rule spanning the whole object rather than one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalFailure {
    pub object_name: String,
    pub message: String,
}

impl GlobalFailure {
    pub fn new(object_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { object_name: object_name.into(), message: message.into() }
    }
}

/// A constraint broken on a method parameter or nested property.
///
/// `root` names the validated type and `path` the property path within it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintViolation {
    pub root: String,
    pub path: String,
    pub message: String,
    pub invalid_value: Value,
}

impl ConstraintViolation {
    pub fn new(root: impl Into<String>, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            path: path.into(),
            message: message.into(),
            invalid_value: Value::Null,
        }
    }

    #[must_use]
    #[inline]
    pub fn invalid_value(mut self, value: impl Into<Value>) -> Self {
        self.invalid_value = value.into();
        self
    }
}

impl From<ConstraintViolation> for FieldFailure {
    fn from(violation: ConstraintViolation) -> Self {
        FieldFailure::new(violation.root, violation.path, violation.message)
            .rejected(violation.invalid_value)
    }
}

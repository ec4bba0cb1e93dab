use serde_json::Value;
use smallvec::SmallVec;

use crate::classify::FailureDescription;
use crate::types::SubErrors;
use crate::validation::{aggregate, FieldFailure, GlobalFailure};

/// Collects validation failures while a request is checked.
///
/// Field and global failures are kept in separate lists so the final
/// sub-error order is always fields first, then globals, each in the order
/// they were recorded.
///
/// # Examples
///
/// ```
/// use status_rail::validation::Violations;
///
/// let mut violations = Violations::new();
/// violations.reject_field("user", "age", -3, "must be positive");
/// violations.reject_object("user", "at least one contact method is required");
///
/// assert_eq!(violations.len(), 2);
/// let result: Result<(), _> = violations.finish(());
/// assert!(result.is_err());
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Violations {
    fields: SmallVec<[FieldFailure; 2]>,
    globals: SmallVec<[GlobalFailure; 1]>,
}

impl Violations {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push_field(&mut self, failure: FieldFailure) {
        self.fields.push(failure);
    }

    #[inline]
    pub fn push_global(&mut self, failure: GlobalFailure) {
        self.globals.push(failure);
    }

    /// Records a field failure with its rejected value.
    pub fn reject_field(
        &mut self,
        object_name: impl Into<String>,
        field: impl Into<String>,
        rejected_value: impl Into<Value>,
        message: impl Into<String>,
    ) {
        self.push_field(FieldFailure::new(object_name, field, message).rejected(rejected_value));
    }

    /// Records a failure of an object-wide rule.
    pub fn reject_object(&mut self, object_name: impl Into<String>, message: impl Into<String>) {
        self.push_global(GlobalFailure::new(object_name, message));
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.globals.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len() + self.globals.len()
    }

    #[inline]
    pub fn field_failures(&self) -> &[FieldFailure] {
        &self.fields
    }

    #[inline]
    pub fn global_failures(&self) -> &[GlobalFailure] {
        &self.globals
    }

    /// Aggregates everything recorded so far.
    pub fn into_sub_errors(self) -> SubErrors {
        aggregate(self.fields, self.globals)
    }

    /// Returns `None` when nothing was recorded.
    pub fn into_failure(self) -> Option<FailureDescription> {
        if self.is_empty() {
            return None;
        }
        Some(FailureDescription::ValidationFailed {
            field_failures: self.fields.into_vec(),
            global_failures: self.globals.into_vec(),
        })
    }

    /// Yields `value` when nothing was recorded, the validation failure otherwise.
    pub fn finish<T>(self, value: T) -> Result<T, FailureDescription> {
        match self.into_failure() {
            None => Ok(value),
            Some(failure) => Err(failure),
        }
    }
}

impl Extend<FieldFailure> for Violations {
    fn extend<I: IntoIterator<Item = FieldFailure>>(&mut self, iter: I) {
        self.fields.extend(iter);
    }
}

impl Extend<GlobalFailure> for Violations {
    fn extend<I: IntoIterator<Item = GlobalFailure>>(&mut self, iter: I) {
        self.globals.extend(iter);
    }
}

impl FromIterator<FieldFailure> for Violations {
    fn from_iter<I: IntoIterator<Item = FieldFailure>>(iter: I) -> Self {
        Self { fields: iter.into_iter().collect(), globals: SmallVec::new() }
    }
}

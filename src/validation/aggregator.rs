use crate::code::generate_or_absent;
use crate::types::{FieldError, ObjectError, SubError, SubErrors};
use crate::validation::{ConstraintViolation, FieldFailure, GlobalFailure};

/// Turns validation failures into sub-errors.
///
/// Field failures come first in their original order, followed by global
/// failures in theirs. Nothing is merged, deduplicated or sorted, so the
/// output always has one entry per input.
///
/// # Examples
///
/// ```
/// use status_rail::validation::{aggregate, FieldFailure, GlobalFailure};
///
/// let sub_errors = aggregate(
///     [FieldFailure::new("user", "email", "must not be blank")],
///     [GlobalFailure::new("user", "passwords must match")],
/// );
///
/// assert_eq!(sub_errors.len(), 2);
/// assert_eq!(sub_errors[0].as_field().unwrap().field(), "email");
/// assert_eq!(sub_errors[1].message(), "passwords must match");
/// ```
pub fn aggregate<F, G>(field_failures: F, global_failures: G) -> SubErrors
where
    F: IntoIterator<Item = FieldFailure>,
    G: IntoIterator<Item = GlobalFailure>,
{
    let field_failures = field_failures.into_iter();
    let global_failures = global_failures.into_iter();

    let mut sub_errors = SubErrors::with_capacity(
        field_failures.size_hint().0 + global_failures.size_hint().0,
    );
    sub_errors.extend(field_failures.map(field_error));
    sub_errors.extend(global_failures.map(object_error));
    sub_errors
}

/// Turns constraint violations into field sub-errors, in input order.
pub fn aggregate_violations<I>(violations: I) -> SubErrors
where
    I: IntoIterator<Item = ConstraintViolation>,
{
    aggregate(violations.into_iter().map(FieldFailure::from), core::iter::empty())
}

fn field_error(failure: FieldFailure) -> SubError {
    let FieldFailure { object_name, field, rejected_value, message, constraint } = failure;
    let code = match constraint.as_deref() {
        Some(constraint) => generate_or_absent(constraint, message.as_str()),
        None => generate_or_absent(field.as_str(), message.as_str()),
    };
    SubError::Field(FieldError::coded(object_name, field, rejected_value, message, code))
}

fn object_error(failure: GlobalFailure) -> SubError {
    SubError::Object(ObjectError::new(failure.object_name, failure.message))
}

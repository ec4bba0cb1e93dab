use status_rail::code::generate;
use status_rail::validation::{aggregate, FieldFailure, GlobalFailure, Violations};
use status_rail::{classify, FailureDescription, SubError};

fn fields(n: usize) -> Vec<FieldFailure> {
    (0..n).map(|i| FieldFailure::new("form", format!("field{i}"), format!("bad {i}"))).collect()
}

fn globals(n: usize) -> Vec<GlobalFailure> {
    (0..n).map(|i| GlobalFailure::new("form", format!("rule {i}"))).collect()
}

#[test]
fn single_field_failure_scenario() {
    let sub_errors = aggregate(
        [FieldFailure::new("user", "email", "must not be blank")],
        Vec::<GlobalFailure>::new(),
    );

    assert_eq!(sub_errors.len(), 1);
    match &sub_errors[0] {
        SubError::Field(field) => {
            assert_eq!(field.object_name(), "user");
            assert_eq!(field.field(), "email");
            assert_eq!(field.message(), "must not be blank");
            assert_eq!(field.code(), generate("email", "must not be blank").ok());
        },
        other => panic!("expected field error, got {other:?}"),
    }
}

#[test]
fn output_length_equals_input_length() {
    for f in 0..4 {
        for g in 0..4 {
            assert_eq!(aggregate(fields(f), globals(g)).len(), f + g);
        }
    }
}

#[test]
fn empty_inputs_yield_empty_output() {
    assert!(aggregate(Vec::new(), Vec::new()).is_empty());
}

#[test]
fn fields_keep_order_then_globals_keep_order() {
    let sub_errors = aggregate(fields(3), globals(2));

    for (i, sub_error) in sub_errors.iter().take(3).enumerate() {
        assert_eq!(sub_error.as_field().unwrap().field(), format!("field{i}"));
    }
    for (j, sub_error) in sub_errors.iter().skip(3).enumerate() {
        assert_eq!(sub_error.as_object().unwrap().message(), format!("rule {j}"));
    }
}

#[test]
fn order_is_not_sorted_by_name() {
    let sub_errors = aggregate(
        [
            FieldFailure::new("user", "zip", "required"),
            FieldFailure::new("user", "age", "required"),
        ],
        Vec::new(),
    );

    assert_eq!(sub_errors[0].as_field().unwrap().field(), "zip");
    assert_eq!(sub_errors[1].as_field().unwrap().field(), "age");
}

#[test]
fn duplicates_are_preserved() {
    let failure = FieldFailure::new("user", "email", "must not be blank");
    let sub_errors = aggregate([failure.clone(), failure], [
        GlobalFailure::new("user", "same"),
        GlobalFailure::new("user", "same"),
    ]);

    assert_eq!(sub_errors.len(), 4);
    assert_eq!(sub_errors[0], sub_errors[1]);
    assert_eq!(sub_errors[2], sub_errors[3]);
}

#[test]
fn constraint_category_drives_field_code() {
    let sub_errors = aggregate(
        [FieldFailure::new("user", "email", "must not be blank").constraint("NotBlank")],
        Vec::new(),
    );

    assert_eq!(sub_errors[0].code(), generate("NotBlank", "must not be blank").ok());
    assert_ne!(sub_errors[0].code(), generate("email", "must not be blank").ok());
}

#[test]
fn global_code_uses_object_name() {
    let sub_errors = aggregate(Vec::new(), [GlobalFailure::new("user", "passwords must match")]);
    assert_eq!(sub_errors[0].code(), generate("user", "passwords must match").ok());
}

#[test]
fn rejected_value_is_carried() {
    let sub_errors =
        aggregate([FieldFailure::new("user", "age", "must be positive").rejected(-3)], Vec::new());
    assert_eq!(sub_errors[0].as_field().unwrap().rejected_value(), &serde_json::json!(-3));
}

#[test]
fn violations_collect_in_recording_order() {
    let mut violations = Violations::new();
    violations.reject_object("user", "dates overlap");
    violations.reject_field("user", "name", "", "must not be blank");
    violations.reject_field("user", "age", 200, "must be at most 150");

    assert_eq!(violations.len(), 3);
    assert_eq!(violations.field_failures().len(), 2);
    assert_eq!(violations.global_failures().len(), 1);

    let sub_errors = violations.into_sub_errors();
    assert_eq!(sub_errors[0].as_field().unwrap().field(), "name");
    assert_eq!(sub_errors[1].as_field().unwrap().field(), "age");
    assert_eq!(sub_errors[2].message(), "dates overlap");
}

#[test]
fn empty_violations_finish_successfully() {
    let violations = Violations::new();
    assert!(violations.is_empty());
    assert_eq!(violations.finish(5), Ok(5));
}

#[test]
fn violations_finish_into_validation_failure() {
    let mut violations: Violations = fields(2).into_iter().collect();
    violations.extend(globals(1));

    let failure = violations.finish(()).unwrap_err();
    let err = classify(failure);

    assert_eq!(err.message(), "Validation error");
    assert_eq!(err.sub_errors().len(), 3);
}

#[test]
fn empty_violations_have_no_failure() {
    assert_eq!(Violations::new().into_failure(), None::<FailureDescription>);
}

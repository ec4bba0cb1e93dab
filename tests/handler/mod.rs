use std::sync::Mutex;

use http::StatusCode;
use status_rail::handler::{
    Diagnostic, DiagnosticSink, ErrorHandler, HandlerConfig, IntoFailure, NoopSink,
};
use status_rail::validation::Violations;
use status_rail::FailureDescription;

#[derive(Debug, Default)]
struct RecordingSink {
    records: Mutex<Vec<(String, Option<String>, u16, String)>>,
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: &Diagnostic<'_>) {
        self.records.lock().unwrap().push((
            diagnostic.category.to_owned(),
            diagnostic.detail.map(str::to_owned),
            diagnostic.error.status().as_u16(),
            diagnostic.error.message().to_owned(),
        ));
    }
}

impl RecordingSink {
    fn records(&self) -> Vec<(String, Option<String>, u16, String)> {
        self.records.lock().unwrap().clone()
    }
}

#[derive(Debug)]
enum AppError {
    UserMissing(u64),
    Database(String),
}

impl IntoFailure for AppError {
    fn into_failure(self) -> FailureDescription {
        match self {
            AppError::UserMissing(id) => FailureDescription::not_found(format!("user {id} not found")),
            AppError::Database(detail) => FailureDescription::Unclassified { detail },
        }
    }
}

#[test]
fn handle_reports_internal_detail_to_sink_only() {
    let handler = ErrorHandler::new().with_sink(RecordingSink::default());

    let response = handler.handle(AppError::Database("connection refused: 10.0.0.3:5432".into()));

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body().message(), "Internal Server Error");

    let records = handler.sink().records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, "unclassified");
    assert_eq!(records[0].1.as_deref(), Some("connection refused: 10.0.0.3:5432"));
    assert_eq!(records[0].2, 500);
}

#[test]
fn handle_uses_application_tagging() {
    let handler = ErrorHandler::new().with_sink(RecordingSink::default());

    let response = handler.handle(AppError::UserMissing(7));

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.body().message(), "user 7 not found");
    assert_eq!(handler.sink().records()[0].1, None);
}

#[test]
fn sink_sees_the_failure_before_classification() {
    #[derive(Default)]
    struct LastFailure(Mutex<Option<(FailureDescription, Option<String>)>>);

    impl DiagnosticSink for LastFailure {
        fn report(&self, diagnostic: &Diagnostic<'_>) {
            let code = diagnostic.error.code().map(|c| c.to_string());
            *self.0.lock().unwrap() = Some((diagnostic.failure.clone(), code));
        }
    }

    let handler = ErrorHandler::new().with_sink(LastFailure::default());
    let failure = FailureDescription::type_mismatch("age", "abc", "int");
    let response = handler.handle(failure.clone());

    let (seen, code) = handler.sink().0.lock().unwrap().take().unwrap();
    assert_eq!(seen, failure);
    assert_eq!(seen.category(), "type_mismatch");
    assert_eq!(code, response.body().code().map(|c| c.to_string()));
    assert!(code.is_some());
}

#[test]
fn render_writes_json_with_status() {
    let handler = ErrorHandler::new();
    let rendered = handler.respond(FailureDescription::missing_parameter("user_id"));

    assert_eq!(rendered.status(), StatusCode::BAD_REQUEST);
    assert_eq!(rendered.headers()["content-type"], "application/json");

    let body: serde_json::Value = serde_json::from_slice(rendered.body()).unwrap();
    assert_eq!(body["status"], 400);
    assert_eq!(body["message"], "user_id parameter is missing");
    assert!(body["code"].is_string());
    assert!(body["timestamp"].is_string());
    assert!(body.get("subErrors").is_none());
}

#[test]
fn malformed_json_bodies_are_tagged_as_malformed() {
    let parse_error = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
    let handler = ErrorHandler::new().with_sink(RecordingSink::default());

    let response = handler.handle(parse_error);

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.body().message(), "Malformed JSON request");
    let records = handler.sink().records();
    assert_eq!(records[0].0, "malformed_body");
    assert!(records[0].1.is_some());
}

#[test]
fn violations_can_be_handled_directly() {
    let mut violations = Violations::new();
    violations.reject_field("user", "email", "nope", "must be a well-formed email address");

    let response = ErrorHandler::new().handle(violations);

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.body().sub_errors().len(), 1);
    assert_eq!(response.body().code(), None);
}

#[test]
fn empty_violations_still_produce_validation_error() {
    let response = ErrorHandler::new().handle(Violations::new());

    assert_eq!(response.body().message(), "Validation error");
    assert!(response.body().sub_errors().is_empty());
}

#[test]
fn closures_act_as_sinks() {
    fn count_into(counter: &Mutex<u32>) -> impl Fn(&Diagnostic<'_>) + '_ {
        move |_| *counter.lock().unwrap() += 1
    }

    let counter = Mutex::new(0);
    let handler = ErrorHandler::new().with_sink(count_into(&counter));
    handler.handle(FailureDescription::data_conflict(true));
    handler.handle(FailureDescription::data_conflict(false));

    assert_eq!(*counter.lock().unwrap(), 2);
}

#[test]
fn config_defaults_to_enabled_and_can_be_switched_off() {
    assert!(HandlerConfig::default().enabled);

    let handler = ErrorHandler::new().with_config(HandlerConfig::default().enabled(false));
    assert!(!handler.config().enabled);

    // A disabled handler still answers direct calls.
    let response = handler.handle(FailureDescription::data_conflict(true));
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[test]
fn config_loads_from_partial_documents() {
    let config: HandlerConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, HandlerConfig::default());

    let config: HandlerConfig = serde_json::from_str(r#"{"enabled": false}"#).unwrap();
    assert!(!config.enabled);
}

#[test]
fn noop_sink_is_default() {
    let handler: ErrorHandler<NoopSink> = ErrorHandler::default();
    let response = handler.handle(FailureDescription::unclassified("boom"));
    assert_eq!(response.into_body().message(), "Internal Server Error");
}

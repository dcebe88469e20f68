//! End-to-end integration tests for request-file
//!
//! These tests run template files through the full pipeline (load,
//! resolve, materialise, send, format, export) against a stub HTTP client.

use super::{run_template, template, vars, StubClient, Workspace};
use request_file::commands::{RunError, RunOptions, Runner};
use request_file::formatter::Format;
use request_file::models::{HttpResponse, TemplateError};
use request_file::varfile::VarMap;
use request_file::variables::NonInteractive;
use serde_json::{json, Value};

#[test]
fn test_empty_response_produces_empty_output() {
    let workspace = Workspace::new();
    let mut session = workspace.open_session("");
    let client = StubClient::new(HttpResponse::new(200, "OK"));
    let template = template(r#"{"url": "https://example.com", "method": "GET"}"#);

    let (result, output) = run_template(
        &mut session,
        &VarMap::new(),
        &client,
        &RunOptions::default(),
        &template,
    );

    assert!(result.unwrap().is_empty());
    assert_eq!(output, "\n");
    assert_eq!(client.sent_urls(), vec!["https://example.com"]);
    assert!(session.exports().is_empty());
}

#[test]
fn test_explicit_replacement_fills_url() {
    let workspace = Workspace::new();
    let mut session = workspace.open_session("");
    let client = StubClient::json("{}");
    let options = RunOptions {
        explicit: vars(&[("CAT_NAME", "Felix")]),
        ..RunOptions::default()
    };
    let template = template(
        r#"{
            "replacements": {":name": {"name": "CAT_NAME", "required": true}},
            "url": "https://api/cats/:name"
        }"#,
    );

    let (result, _) = run_template(&mut session, &VarMap::new(), &client, &options, &template);
    result.unwrap();

    assert_eq!(client.sent_urls(), vec!["https://api/cats/Felix"]);
}

#[test]
fn test_typed_replacements_in_json_body() {
    let workspace = Workspace::new();
    let mut session = workspace.open_session("");
    let client = StubClient::json("{}");
    let options = RunOptions {
        explicit: vars(&[("AGE", "3"), ("PETTED", "true")]),
        ..RunOptions::default()
    };
    let template = template(
        r#"{
            "replacements": {
                ":age": {"name": "AGE", "type": "integer"},
                ":petted": {"name": "PETTED", "type": "boolean"}
            },
            "url": "https://api/cats",
            "method": "post",
            "json": {"age": ":age", "petted": ":petted", "note": "age :age"}
        }"#,
    );

    let (result, _) = run_template(&mut session, &VarMap::new(), &client, &options, &template);
    result.unwrap();

    let sent = client.sent.borrow();
    assert_eq!(sent[0].method, "POST");
    assert_eq!(sent[0].headers.get("content-type"), Some("application/json"));
    let body: Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"age": 3, "petted": true, "note": "age 3"}));
}

#[test]
fn test_query_params_and_form_body() {
    let workspace = Workspace::new();
    let mut session = workspace.open_session("");
    let client = StubClient::json("{}");
    let template = template(
        r#"{
            "url": "https://api/cats",
            "method": "POST",
            "params": {"tag": ["black", "small"], "page": "2"},
            "data": {"name": "Felix"}
        }"#,
    );

    let (result, _) = run_template(
        &mut session,
        &VarMap::new(),
        &client,
        &RunOptions::default(),
        &template,
    );
    result.unwrap();

    let sent = client.sent.borrow();
    assert_eq!(sent[0].url, "https://api/cats?tag=black&tag=small&page=2");
    assert_eq!(sent[0].body.as_deref(), Some("name=Felix"));
    assert_eq!(
        sent[0].headers.get("Content-Type"),
        Some("application/x-www-form-urlencoded")
    );
}

#[test]
fn test_unresolved_optional_placeholder_is_left_in_place() {
    let workspace = Workspace::new();
    let mut session = workspace.open_session("");
    let client = StubClient::json("{}");
    let template = template(
        r#"{
            "replacements": {":token": {"name": "TOKEN", "required": false}},
            "url": "https://api/cats",
            "headers": {"Authorization": "Bearer :token"}
        }"#,
    );

    let (result, _) = run_template(
        &mut session,
        &VarMap::new(),
        &client,
        &RunOptions::default(),
        &template,
    );
    result.unwrap();

    assert_eq!(
        client.sent.borrow()[0].headers.get("Authorization"),
        Some("Bearer :token")
    );
}

#[test]
fn test_strict_mode_rejects_missing_required() {
    let workspace = Workspace::new();
    let mut session = workspace.open_session("");
    let client = StubClient::json("{}");
    let options = RunOptions {
        strict_required: true,
        ..RunOptions::default()
    };
    let template = template(
        r#"{"replacements": {":name": {"name": "CAT_NAME"}}, "url": "https://api/cats/:name"}"#,
    );

    let (result, _) = run_template(&mut session, &VarMap::new(), &client, &options, &template);

    let err = result.unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(
        err.to_string(),
        "No value provided for required replacement CAT_NAME"
    );
    assert!(client.sent.borrow().is_empty());
}

#[test]
fn test_verbose_and_mock_formats() {
    let workspace = Workspace::new();
    let mut session = workspace.open_session("");
    let client = StubClient::json(r#"{"id":7}"#);
    let template = template(r#"{"url": "https://api/cats/7"}"#);

    let verbose = RunOptions {
        format: Format::Verbose,
        ..RunOptions::default()
    };
    let (_, output) = run_template(&mut session, &VarMap::new(), &client, &verbose, &template);
    assert_eq!(
        output,
        "Status: 200 OK\nContent-Type: application/json\nBody:\n{\n  \"id\": 7\n}\n"
    );

    let mock = RunOptions {
        format: Format::RequestsMock,
        ..RunOptions::default()
    };
    let (_, output) = run_template(&mut session, &VarMap::new(), &client, &mock, &template);
    let record: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(record["method"], "GET");
    assert_eq!(record["url"], "https://api/cats/7");
    assert_eq!(record["status_code"], 200);
    assert_eq!(record["json"], json!({"id": 7}));
}

#[test]
fn test_batch_continues_past_invalid_templates() {
    let workspace = Workspace::new();
    let missing_url = workspace.write("missing-url.json", r#"{"method": "GET"}"#);
    let bad_type = workspace.write(
        "bad-type.json",
        r#"{"replacements": {":x": {"type": "date"}}, "url": "https://api/:x"}"#,
    );
    let good = workspace.write("good.json", r#"{"url": "https://api/cats"}"#);
    let absent = workspace.path("absent.json");

    let mut session = workspace.open_session("");
    let client = StubClient::json("[]");
    let options = RunOptions::default();
    let env = VarMap::new();
    let mut prompter = NonInteractive;
    let mut runner = Runner::new(&mut session, &env, &mut prompter, &client, &options, Vec::new());

    let summary = runner
        .run_all(&[missing_url, bad_type, good, absent])
        .unwrap();

    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failures.len(), 3);
    assert!(matches!(
        summary.failures[0].error,
        RunError::Template(TemplateError::Invalid { .. })
    ));
    assert!(summary.failures[0].error.to_string().contains("url"));
    assert!(matches!(
        summary.failures[1].error,
        RunError::Template(TemplateError::Invalid { .. })
    ));
    assert!(matches!(
        summary.failures[2].error,
        RunError::Template(TemplateError::Io { .. })
    ));
    assert_eq!(client.sent_urls(), vec!["https://api/cats"]);
}

#[test]
fn test_batch_stops_on_invalid_value() {
    let workspace = Workspace::new();
    let bad_value = workspace.write(
        "bad-value.json",
        r#"{"replacements": {":age": {"name": "AGE", "type": "integer", "default": "old"}}, "url": "https://api/:age"}"#,
    );
    let good = workspace.write("good.json", r#"{"url": "https://api/cats"}"#);

    let mut session = workspace.open_session("");
    let client = StubClient::json("[]");
    let options = RunOptions::default();
    let env = VarMap::new();
    let mut prompter = NonInteractive;
    let mut runner = Runner::new(&mut session, &env, &mut prompter, &client, &options, Vec::new());

    let err = runner.run_all(&[bad_value, good]).unwrap_err();

    assert!(err.is_fatal());
    assert!(err.to_string().starts_with("Invalid value for AGE"));
    assert!(client.sent.borrow().is_empty());
}

//! Export integration tests
//!
//! Pathspec evaluation against response bodies and the idempotent merge of
//! exported values into var-files.

use super::{run_template, template, StubClient, Workspace};
use request_file::commands::RunOptions;
use request_file::export::{read_pathspec, PathspecError};
use request_file::varfile::{decode, merge_file, VarMap};
use serde_json::json;

#[test]
fn test_pathspec_into_array_of_objects() {
    let body = r#"{"a": [{"b": "c"}]}"#;

    assert_eq!(read_pathspec(body, "json:.a.0.b").unwrap(), json!("c"));

    let err = read_pathspec(body, "json:.a.1.b").unwrap_err();
    assert!(matches!(err, PathspecError::IndexOutOfRange { .. }));
    assert_eq!(err.path(), Some("a.1"));
    assert_eq!(err.observed(), Some(&json!([{"b": "c"}])));
}

#[test]
fn test_pathspec_failure_position_is_first_unresolved_component() {
    let body = r#"{"cats": {"felix": {"tags": ["black"]}}}"#;

    let err = read_pathspec(body, "json:.cats.tom.tags.0").unwrap_err();
    assert!(matches!(err, PathspecError::MissingKey { .. }));
    assert_eq!(err.path(), Some("cats.tom"));

    let err = read_pathspec(body, "json:.cats.felix.tags.first").unwrap_err();
    assert!(matches!(err, PathspecError::InvalidIndex { .. }));
    assert_eq!(err.path(), Some("cats.felix.tags.first"));

    let err = read_pathspec(body, "json:.cats.felix.tags.0.name").unwrap_err();
    assert!(matches!(err, PathspecError::NotAContainer { .. }));
    assert_eq!(err.path(), Some("cats.felix.tags.0.name"));
}

#[test]
fn test_failed_exports_degrade_to_empty_values() {
    let workspace = Workspace::new();
    let mut session = workspace.open_session("");
    let client = StubClient::json(r#"{"id": 7, "owner": {"name": "Jon"}}"#);
    let template = template(
        r#"{
            "url": "https://api/cats",
            "exports": {
                "CAT_ID": "json:.id",
                "VET": "json:.vet.name",
                "OWNER": "json:.owner",
                "BROKEN": "xpath://id"
            }
        }"#,
    );

    let (result, _) = run_template(
        &mut session,
        &VarMap::new(),
        &client,
        &RunOptions::default(),
        &template,
    );

    assert_eq!(
        result.unwrap(),
        vec![
            ("CAT_ID".to_string(), "7".to_string()),
            ("VET".to_string(), String::new()),
            ("OWNER".to_string(), r#"{"name":"Jon"}"#.to_string()),
            ("BROKEN".to_string(), String::new()),
        ]
    );
}

#[test]
fn test_exports_use_namespace_prefix_and_print() {
    let workspace = Workspace::new();
    let mut session = workspace.open_session("staging");
    let client = StubClient::json(r#"{"id": 7}"#);
    let options = RunOptions {
        print_exports: true,
        ..RunOptions::default()
    };
    let template = template(r#"{"url": "https://api/cats", "exports": {"CAT_ID": "json:.id"}}"#);

    let (result, output) =
        run_template(&mut session, &VarMap::new(), &client, &options, &template);
    result.unwrap();

    assert!(output.ends_with("staging_CAT_ID='7'\n"));
    assert_eq!(session.exports().get("staging_CAT_ID"), Some("7"));
}

#[test]
fn test_export_merge_is_idempotent() {
    let workspace = Workspace::new();
    let path = workspace.write(
        "exports.env",
        "# shared exports\nHOST='localhost'\nCAT_ID='1'\n",
    );

    merge_file(&path, [("CAT_ID", "2")]).unwrap();
    merge_file(&path, [("CAT_ID", "3")]).unwrap();
    merge_file(&path, [("CAT_ID", "3")]).unwrap();

    assert_eq!(
        workspace.read("exports.env"),
        "# shared exports\nHOST='localhost'\nCAT_ID='3'\n\n"
    );
}

#[test]
fn test_export_files_receive_every_run() {
    let workspace = Workspace::new();
    let exports_file = workspace.path("cats.env");
    let options = RunOptions {
        export_files: vec![exports_file.clone()],
        ..RunOptions::default()
    };
    let template = template(r#"{"url": "https://api/cats", "exports": {"CAT_ID": "json:.id"}}"#);

    for id in ["7", "8"] {
        let mut session = workspace.open_session("");
        let client = StubClient::json(&format!(r#"{{"id": {}}}"#, id));
        let (result, _) =
            run_template(&mut session, &VarMap::new(), &client, &options, &template);
        result.unwrap();
        session.close().unwrap();
    }

    let content = workspace.read("cats.env");
    assert_eq!(content, "CAT_ID='8'\n\n");
    assert_eq!(
        decode(&content),
        vec![("CAT_ID".to_string(), "8".to_string())]
    );
}

#[test]
fn test_export_merge_matches_text_before_first_equals() {
    // Keys are matched on the raw text before `=`, so an indented line is
    // a different key and the new value is appended.
    let workspace = Workspace::new();
    let path = workspace.write("exports.env", "  CAT_ID='1'\n");

    merge_file(&path, [("CAT_ID", "2")]).unwrap();

    assert_eq!(workspace.read("exports.env"), "  CAT_ID='1'\nCAT_ID='2'\n\n");
}

//! Request chaining integration tests
//!
//! Values exported by one request are picked up as environment values by
//! later requests, in the same run and in later runs.

use super::{run_template, template, StubClient, Workspace};
use request_file::commands::RunOptions;
use request_file::models::Template;
use request_file::session::Session;
use request_file::varfile::VarMap;

fn create_cat() -> Template {
    template(
        r#"{
            "url": "https://api/cats",
            "method": "POST",
            "json": {"name": "Felix"},
            "exports": {"CAT_ID": "json:.id"}
        }"#,
    )
}

fn get_cat() -> Template {
    template(
        r#"{
            "replacements": {":id": {"name": "CAT_ID"}},
            "url": "https://api/cats/:id"
        }"#,
    )
}

#[test]
fn test_export_feeds_next_template_in_same_run() {
    let workspace = Workspace::new();
    let mut session = workspace.open_session("");
    let client = StubClient::json(r#"{"id": 42}"#);
    let options = RunOptions::default();

    run_template(&mut session, &VarMap::new(), &client, &options, &create_cat())
        .0
        .unwrap();
    run_template(&mut session, &VarMap::new(), &client, &options, &get_cat())
        .0
        .unwrap();

    assert_eq!(
        client.sent_urls(),
        vec!["https://api/cats", "https://api/cats/42"]
    );
}

#[test]
fn test_persisted_exports_feed_later_runs() {
    let workspace = Workspace::new();
    let client = StubClient::json(r#"{"id": 42}"#);
    let options = RunOptions::default();

    let mut session = workspace.open_session("dev");
    run_template(&mut session, &VarMap::new(), &client, &options, &create_cat())
        .0
        .unwrap();
    session.close().unwrap();

    assert_eq!(workspace.read("state/environment"), "dev_CAT_ID='42'\n\n");

    let mut session = workspace.open_session("dev");
    run_template(&mut session, &VarMap::new(), &client, &options, &get_cat())
        .0
        .unwrap();
    session.close().unwrap();

    assert_eq!(client.sent_urls()[1], "https://api/cats/42");
}

#[test]
fn test_other_namespace_does_not_see_exports() {
    let workspace = Workspace::new();
    let client = StubClient::json(r#"{"id": 42}"#);
    let options = RunOptions::default();

    let mut session = workspace.open_session("dev");
    run_template(&mut session, &VarMap::new(), &client, &options, &create_cat())
        .0
        .unwrap();
    session.close().unwrap();

    let mut session = workspace.open_session("prod");
    run_template(&mut session, &VarMap::new(), &client, &options, &get_cat())
        .0
        .unwrap();
    session.close().unwrap();

    assert_eq!(client.sent_urls()[1], "https://api/cats/:id");
}

#[test]
fn test_imports_override_persisted_exports() {
    let workspace = Workspace::new();
    let client = StubClient::json(r#"{"id": 42}"#);
    let options = RunOptions::default();

    let mut session = workspace.open_session("");
    run_template(&mut session, &VarMap::new(), &client, &options, &create_cat())
        .0
        .unwrap();
    session.close().unwrap();

    let import = workspace.write("fixture.env", "# fixture\nCAT_ID='99'\n");
    let mut session = Session::open(workspace.state_paths(), "", &[import]);
    run_template(&mut session, &VarMap::new(), &client, &options, &get_cat())
        .0
        .unwrap();
    session.close().unwrap();

    assert_eq!(client.sent_urls()[1], "https://api/cats/99");
    assert_eq!(workspace.read("state/environment"), "CAT_ID='42'\n\n");
}

#[test]
fn test_process_environment_loses_to_exports() {
    let workspace = Workspace::new();
    let client = StubClient::json(r#"{"id": 42}"#);
    let options = RunOptions::default();
    let process_env: VarMap = [("CAT_ID", "1")].into_iter().collect();

    let mut session = workspace.open_session("");
    run_template(&mut session, &process_env, &client, &options, &create_cat())
        .0
        .unwrap();
    run_template(&mut session, &process_env, &client, &options, &get_cat())
        .0
        .unwrap();

    assert_eq!(client.sent_urls()[1], "https://api/cats/42");
}

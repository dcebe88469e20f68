//! Resolution precedence integration tests
//!
//! Explicit input beats the environment, which beats defaults and history,
//! which beat prompting. Explicit and environment values are never written
//! to the history.

use super::{run_template, run_template_with, template, vars, StubClient, Workspace};
use request_file::commands::RunOptions;
use request_file::models::Template;
use request_file::varfile::VarMap;
use request_file::variables::{LinePrompter, ProcessEnv};
use serial_test::serial;
use std::io::Cursor;

fn cat_template() -> Template {
    template(
        r#"{
            "replacements": {":name": {"name": "CAT_NAME", "default": "Garfield"}},
            "url": "https://api/cats/:name"
        }"#,
    )
}

fn options_with(explicit: &[(&str, &str)]) -> RunOptions {
    RunOptions {
        explicit: vars(explicit),
        ..RunOptions::default()
    }
}

#[test]
fn test_precedence_explicit_then_environment_then_default() {
    let workspace = Workspace::new();
    let mut session = workspace.open_session("");
    let client = StubClient::json("{}");
    let env = vars(&[("CAT_NAME", "Tom")]);
    let template = cat_template();

    let all = options_with(&[("CAT_NAME", "Felix")]);
    run_template(&mut session, &env, &client, &all, &template).0.unwrap();

    let no_explicit = options_with(&[]);
    run_template(&mut session, &env, &client, &no_explicit, &template).0.unwrap();

    run_template(&mut session, &VarMap::new(), &client, &no_explicit, &template)
        .0
        .unwrap();

    assert_eq!(
        client.sent_urls(),
        vec![
            "https://api/cats/Felix",
            "https://api/cats/Tom",
            "https://api/cats/Garfield",
        ]
    );
}

#[test]
fn test_precedence_explicit_then_environment_then_history() {
    let workspace = Workspace::new();
    let paths = workspace.state_paths();
    std::fs::create_dir_all(workspace.path("state")).unwrap();
    std::fs::write(
        &paths.history,
        "REQUESTFILE_NAMESPACE=''\nCAT_NAME='Whiskers'\n\n",
    )
    .unwrap();

    let mut session = workspace.open_session("");
    let client = StubClient::json("{}");
    let env = vars(&[("CAT_NAME", "Tom")]);
    let template = template(
        r#"{
            "replacements": {":name": {"name": "CAT_NAME"}},
            "url": "https://api/cats/:name"
        }"#,
    );

    let all = options_with(&[("CAT_NAME", "Felix")]);
    run_template(&mut session, &env, &client, &all, &template).0.unwrap();

    let no_explicit = options_with(&[]);
    run_template(&mut session, &env, &client, &no_explicit, &template).0.unwrap();

    run_template(&mut session, &VarMap::new(), &client, &no_explicit, &template)
        .0
        .unwrap();
    session.close().unwrap();

    assert_eq!(
        client.sent_urls(),
        vec![
            "https://api/cats/Felix",
            "https://api/cats/Tom",
            "https://api/cats/Whiskers",
        ]
    );
    assert!(std::fs::read_to_string(&paths.history)
        .unwrap()
        .contains("CAT_NAME='Whiskers'"));
}

#[test]
fn test_environment_lookup_uses_namespace_prefix() {
    let workspace = Workspace::new();
    let mut session = workspace.open_session("staging");
    let client = StubClient::json("{}");
    let env = vars(&[("CAT_NAME", "Tom"), ("staging_CAT_NAME", "Salem")]);

    run_template(&mut session, &env, &client, &options_with(&[]), &cat_template())
        .0
        .unwrap();

    assert_eq!(client.sent_urls(), vec!["https://api/cats/Salem"]);
}

#[test]
#[serial]
fn test_process_environment_is_consulted() {
    std::env::set_var("REQUESTFILE_IT_CAT", "Crookshanks");

    let workspace = Workspace::new();
    let mut session = workspace.open_session("");
    let client = StubClient::json("{}");
    let template = template(
        r#"{"replacements": {":name": {"name": "REQUESTFILE_IT_CAT"}}, "url": "https://api/cats/:name"}"#,
    );

    let result = run_template(&mut session, &ProcessEnv, &client, &options_with(&[]), &template).0;
    std::env::remove_var("REQUESTFILE_IT_CAT");
    result.unwrap();

    assert_eq!(client.sent_urls(), vec!["https://api/cats/Crookshanks"]);
}

#[test]
fn test_prompt_answer_is_remembered_across_runs() {
    let workspace = Workspace::new();
    let client = StubClient::json("{}");
    let template = template(
        r#"{"replacements": {":name": {"name": "CAT_NAME"}}, "url": "https://api/cats/:name"}"#,
    );

    // First run: nothing known, the operator types a name.
    {
        let mut session = workspace.open_session("");
        let mut prompter = LinePrompter::new(Cursor::new("Felix\n"), Vec::new());
        run_template_with(
            &mut session,
            &VarMap::new(),
            &mut prompter,
            &client,
            &options_with(&[]),
            &template,
        )
        .0
        .unwrap();
        session.close().unwrap();
    }

    // Second run: the last answer is offered and accepted with Enter.
    let mut session = workspace.open_session("");
    let mut output = Vec::new();
    {
        let mut prompter = LinePrompter::new(Cursor::new("\n"), &mut output);
        run_template_with(
            &mut session,
            &VarMap::new(),
            &mut prompter,
            &client,
            &options_with(&[]),
            &template,
        )
        .0
        .unwrap();
    }
    session.close().unwrap();

    assert_eq!(
        String::from_utf8(output).unwrap(),
        "Enter a value for CAT_NAME (Felix): "
    );
    assert_eq!(
        client.sent_urls(),
        vec!["https://api/cats/Felix", "https://api/cats/Felix"]
    );
    assert_eq!(
        workspace.read("state/last-inputs"),
        "REQUESTFILE_NAMESPACE=''\nCAT_NAME='Felix'\n\n"
    );
}

#[test]
fn test_history_is_partitioned_by_namespace() {
    let workspace = Workspace::new();
    let client = StubClient::json("{}");
    let template = template(
        r#"{"replacements": {":name": {"name": "CAT_NAME"}}, "url": "https://api/cats/:name"}"#,
    );

    let mut session = workspace.open_session("dev");
    session.history.set("dev", "CAT_NAME", "Felix");
    session.history.set("prod", "CAT_NAME", "Tom");

    run_template(&mut session, &VarMap::new(), &client, &options_with(&[]), &template)
        .0
        .unwrap();

    assert_eq!(client.sent_urls(), vec!["https://api/cats/Felix"]);
}

#[test]
fn test_required_without_any_value_keeps_placeholder() {
    let workspace = Workspace::new();
    let mut session = workspace.open_session("");
    let client = StubClient::json("{}");
    let template = template(
        r#"{"replacements": {":name": {"name": "CAT_NAME"}}, "url": "https://api/cats/:name"}"#,
    );

    run_template(&mut session, &VarMap::new(), &client, &options_with(&[]), &template)
        .0
        .unwrap();

    assert_eq!(client.sent_urls(), vec!["https://api/cats/:name"]);
}

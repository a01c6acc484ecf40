#![allow(non_snake_case)]

use super::*;
use crate::module::ModuleDef;
use test_case::test_case;

fn leaf(path: &str, export_name: &str, key: &str) -> Module {
    Module::leaf(ModuleDef::new(path, export_name, "")).with_key(key)
}

#[test]
fn render_barrel___inline_composite___imports_leaves_and_declares_aggregate() {
    let item = Module::composite(
        "ActionCreateIssue",
        vec![
            leaf("input", "ActionCreateIssueInput", "input"),
            leaf("output", "ActionCreateIssueOutput", "output"),
        ],
        None,
    )
    .rename("createIssue");

    let content = render_barrel("Actions", &[item]);

    assert_eq!(
        content,
        "import * as createIssue_input from './create-issue/input';\n\
         import * as createIssue_output from './create-issue/output';\n\
         \n\
         export type ActionCreateIssue = {\n  \
           input: createIssue_input.ActionCreateIssueInput;\n  \
           output: createIssue_output.ActionCreateIssueOutput;\n\
         };\n\
         \n\
         export type Actions = {\n  \
           createIssue: ActionCreateIssue;\n\
         };\n"
    );
}

#[test]
fn render_barrel___file_owning_children___are_reexported() {
    let section = Module::barrel("action", "Actions", vec![]);
    let configuration = Module::leaf(ModuleDef::new("configuration/index", "Configuration", ""));

    let content = render_barrel("Integration", &[configuration, section]);

    assert_eq!(
        content,
        "import * as configuration from './configuration';\n\
         import * as action from './action';\n\
         \n\
         export * from './configuration';\n\
         export * from './action';\n\
         \n\
         export type Integration = {\n  \
           configuration: configuration.Configuration;\n  \
           actions: action.Actions;\n\
         };\n"
    );
}

#[test]
fn render_barrel___nested_inline_composites___declare_children_first() {
    let messages = Module::composite(
        "ChannelIssueMessages",
        vec![leaf("text", "ChannelIssueMessagesText", "text")],
        None,
    )
    .rename("messages");
    let channel = Module::composite("ChannelIssue", vec![messages], None).rename("issue");

    let content = render_barrel("Channels", &[channel]);

    let messages_at = content.find("export type ChannelIssueMessages").unwrap();
    let channel_at = content.find("export type ChannelIssue =").unwrap();
    assert!(messages_at < channel_at);
    assert!(content.contains("import * as issue_messages_text from './issue/messages/text';"));
    assert!(content.contains("  messages: ChannelIssueMessages;\n"));
    assert!(!content.contains("export * from"));
}

#[test]
fn render_barrel___no_children___declares_empty_aggregate() {
    assert_eq!(render_barrel("Events", &[]), "export type Events = {};\n");
}

#[test]
fn render_barrel___non_identifier_key___is_quoted() {
    let item = Module::composite("EventPing", vec![], None).rename("ping-pong");

    let content = render_barrel("Events", &[item]);

    assert!(content.contains("  'ping-pong': EventPing;\n"));
}

#[test_case("create-issue/input", "./create-issue/input")]
#[test_case("action/index", "./action")]
#[test_case("index", "./index")]
fn import_specifier___strips_index(path: &str, expected: &str) {
    assert_eq!(import_specifier(path), expected);
}

#[test_case("./create-issue/input", "createIssue_input")]
#[test_case("./action", "action")]
#[test_case("./issue/messages/message-tags", "issue_messages_messageTags")]
fn import_alias___camel_cases_segments(specifier: &str, expected: &str) {
    assert_eq!(import_alias(specifier), expected);
}

#[test]
fn render_aggregate___renders_members_in_order() {
    let members = vec![
        ("b".to_string(), "B".to_string()),
        ("a".to_string(), "A".to_string()),
    ];

    assert_eq!(
        render_aggregate("Pair", &members),
        "export type Pair = {\n  b: B;\n  a: A;\n};"
    );
}

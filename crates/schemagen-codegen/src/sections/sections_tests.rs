#![allow(non_snake_case)]

use super::*;
use schemagen_core::{Definition, GenerationError};
use serde_json::json;

fn pool() -> WorkerPool {
    WorkerPool::with_workers(2).unwrap()
}

fn paths(module: &Module) -> Vec<String> {
    let mut out = Vec::new();
    collect(module, &mut out);
    out
}

fn collect(module: &Module, out: &mut Vec<String>) {
    if let Some(def) = module.def() {
        out.push(def.path.clone());
    }
    for child in module.children() {
        collect(child, out);
    }
}

fn content<'a>(module: &'a Module, path: &str) -> &'a str {
    fn find<'a>(module: &'a Module, path: &str) -> Option<&'a str> {
        if let Some(def) = module.def().filter(|d| d.path == path) {
            return Some(&def.content);
        }
        module.children().iter().find_map(|c| find(c, path))
    }
    find(module, path).unwrap_or_else(|| panic!("no module at {}", path))
}

fn definition(value: serde_json::Value) -> Definition {
    Definition::from_json_str(&value.to_string()).unwrap()
}

// Section tests

#[test]
fn Section___symbol___qualifies_pascal_key() {
    assert_eq!(ACTIONS.symbol("createIssue"), "ActionCreateIssue");
    assert_eq!(ENTITIES.symbol("issue_comment"), "EntityIssueComment");
}

// Action tests

#[test]
fn build_actions___empty___returns_none() {
    let result = build_actions(&pool(), &OrderedMap::new()).unwrap();

    assert!(result.is_none());
}

#[test]
fn build_actions___single_action___produces_input_output_and_index() {
    let def = definition(json!({
        "actions": {
            "createIssue": {
                "input": {"schema": {"properties": {"title": {"type": "string"}}, "required": ["title"]}},
                "output": {"schema": {"properties": {"id": {"type": "string"}}, "required": ["id"]}}
            }
        }
    }));

    let module = build_actions(&pool(), &def.actions).unwrap().unwrap();

    assert_eq!(module.key(), "actions");
    assert_eq!(
        paths(&module),
        vec![
            "action/index",
            "action/create-issue/input",
            "action/create-issue/output"
        ]
    );
    assert_eq!(
        content(&module, "action/create-issue/input"),
        "export interface ActionCreateIssueInput {\n  title: string;\n}\n"
    );
    assert!(content(&module, "action/index").contains("  createIssue: ActionCreateIssue;\n"));
}

#[test]
fn build_actions___items___sorted_by_key_in_index() {
    let action = json!({"input": {"schema": {}}, "output": {"schema": {}}});
    let def = definition(json!({"actions": {"zeta": action, "alpha": action}}));

    let module = build_actions(&pool(), &def.actions).unwrap().unwrap();

    let keys: Vec<&str> = module.children().iter().map(Module::key).collect();
    assert_eq!(keys, vec!["alpha", "zeta"]);
}

#[test]
fn build_actions___malformed_schema___returns_schema_error() {
    let def = definition(json!({
        "actions": {
            "ok": {"input": {"schema": {}}, "output": {"schema": {}}},
            "broken": {"input": {"schema": {}}, "output": {"schema": {"$ref": "#/x"}}}
        }
    }));

    let result = build_actions(&pool(), &def.actions);

    assert_eq!(
        result,
        Err(GenerationError::Schema {
            section: "actions".into(),
            item: "broken".into(),
            path: "/output/schema/$ref".into(),
            message: "unsupported keyword `$ref`".into(),
        })
    );
}

// Payload / schema section tests

#[test]
fn build_events___uses_payload_facet() {
    let def = definition(json!({"events": {"issueCreated": {"schema": {"type": "object"}}}}));

    let module = build_events(&pool(), &def.events).unwrap().unwrap();

    assert_eq!(
        paths(&module),
        vec!["event/index", "event/issue-created/payload"]
    );
    assert!(content(&module, "event/issue-created/payload")
        .contains("export interface EventIssueCreatedPayload"));
}

#[test]
fn build_states___uses_payload_facet() {
    let def = definition(json!({"states": {"credentials": {"type": "integration", "schema": {}}}}));

    let module = build_states(&pool(), &def.states).unwrap().unwrap();

    assert_eq!(paths(&module), vec!["state/index", "state/credentials/payload"]);
    assert_eq!(
        content(&module, "state/credentials/payload"),
        "export type StateCredentialsPayload = unknown;\n"
    );
}

#[test]
fn build_entities___uses_schema_facet() {
    let def = definition(json!({"entities": {"issue": {"schema": {}}}}));

    let module = build_entities(&pool(), &def.entities).unwrap().unwrap();

    assert_eq!(paths(&module), vec!["entity/index", "entity/issue/schema"]);
    assert!(content(&module, "entity/index").contains("export type Entities = {\n  issue: EntityIssue;\n};"));
}

#[test]
fn build_configurations___uses_schema_facet() {
    let def = definition(json!({"configurations": {"apiKey": {"schema": {}}}}));

    let module = build_configurations(&pool(), &def.configurations).unwrap().unwrap();

    assert_eq!(
        paths(&module),
        vec!["configurations/index", "configurations/api-key/schema"]
    );
    assert!(content(&module, "configurations/api-key/schema").contains("ConfigurationApiKeySchema"));
}

#[test]
fn build_configuration___single_leaf_at_index() {
    let record = SchemaRecord::new(json!({"properties": {"token": {"type": "string"}}}));

    let module = build_configuration(&record).unwrap();

    assert_eq!(module.key(), "configuration");
    assert_eq!(paths(&module), vec!["configuration/index"]);
    assert_eq!(
        module.def().unwrap().content,
        "export interface Configuration {\n  token?: string;\n}\n"
    );
}

// Channel tests

#[test]
fn build_channels___lays_out_messages_and_tags() {
    let def = definition(json!({
        "channels": {
            "issue": {
                "messages": {
                    "text": {"schema": {"properties": {"text": {"type": "string"}}}},
                    "image": {"schema": {"properties": {"url": {"type": "string"}}}}
                },
                "message": {"tags": {"id": {"title": "Message id"}}},
                "conversation": {"tags": {"id": {}, "threadId": {"description": "Thread"}}}
            }
        }
    }));

    let module = build_channels(&pool(), &def.channels).unwrap().unwrap();

    assert_eq!(
        paths(&module),
        vec![
            "channel/index",
            "channel/issue/messages/text",
            "channel/issue/messages/image",
            "channel/issue/message-tags",
            "channel/issue/conversation-tags",
        ]
    );
    assert_eq!(
        content(&module, "channel/issue/message-tags"),
        "export interface ChannelIssueMessageTags {\n  /** Message id */\n  id?: string;\n}\n"
    );
    let index = content(&module, "channel/index");
    assert!(index.contains("export type ChannelIssueMessages = {\n  text: issue_messages_text.ChannelIssueMessagesText;\n  image: issue_messages_image.ChannelIssueMessagesImage;\n};"));
    assert!(index.contains("  messages: ChannelIssueMessages;\n"));
    assert!(index.contains("  messageTags: issue_messageTags.ChannelIssueMessageTags;\n"));
}

#[test]
fn build_channels___message_schema_error___points_into_messages() {
    let def = definition(json!({
        "channels": {"issue": {"messages": {"text": {"schema": {"type": "date"}}}}}
    }));

    let result = build_channels(&pool(), &def.channels);

    match result {
        Err(GenerationError::Schema { path, item, .. }) => {
            assert_eq!(item, "issue");
            assert_eq!(path, "/messages/text/schema/type");
        }
        other => panic!("expected schema error, got {:?}", other),
    }
}

// Secret tests

#[test]
fn build_secrets___empty___returns_none() {
    assert!(build_secrets(&OrderedMap::new()).is_none());
}

#[test]
fn build_secrets___declares_record_and_name_union() {
    let def = definition(json!({
        "secrets": {
            "API_KEY": {"description": "Vendor key"},
            "WEBHOOK_SECRET": {"optional": true}
        }
    }));

    let module = build_secrets(&def.secrets).unwrap();

    assert_eq!(module.def().unwrap().path, "secrets/index");
    assert_eq!(
        module.def().unwrap().content,
        "export interface Secrets {\n  /** Vendor key */\n  API_KEY: string;\n  WEBHOOK_SECRET?: string;\n}\n\n\
         export type SecretName = 'API_KEY' | 'WEBHOOK_SECRET';\n"
    );
}

#[test]
fn build_secrets___single_secret___name_is_literal() {
    let secrets = OrderedMap::new().with("TOKEN", SecretDefinition::default());

    let module = build_secrets(&secrets).unwrap();

    assert!(module.def().unwrap().content.contains("export type SecretName = 'TOKEN';"));
}

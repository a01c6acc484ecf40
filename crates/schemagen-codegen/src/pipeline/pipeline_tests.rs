#![allow(non_snake_case)]

use super::*;
use serde_json::json;
use test_case::test_case;

fn leaf(path: &str, export_name: &str, content: &str) -> Module {
    Module::leaf(ModuleDef::new(path, export_name, content))
}

fn definition(value: serde_json::Value) -> Definition {
    Definition::from_json_str(&value.to_string()).unwrap()
}

fn generator() -> Generator {
    Generator::new(GeneratorConfig::new().with_workers(2).with_header("// generated")).unwrap()
}

// preflight tests

#[test]
fn preflight___valid_definition___passes() {
    let def = definition(json!({
        "actions": {"createIssue": {"input": {"schema": {}}, "output": {"schema": {}}}},
        "secrets": {"API_KEY": {}}
    }));

    assert!(preflight(&def).is_ok());
}

#[test_case("apiKey")]
#[test_case("Api_Key")]
#[test_case("API-KEY")]
fn preflight___bad_secret_name___returns_config_validation(name: &str) {
    let def = definition(json!({"secrets": {name: {}}}));

    let result = preflight(&def);

    match result {
        Err(GenerationError::ConfigValidation { identifier, .. }) => assert_eq!(identifier, name),
        other => panic!("expected config validation error, got {:?}", other),
    }
}

#[test_case(json!({"actions": {"2fast": {"input": {"schema": {}}, "output": {"schema": {}}}}}), "actions.2fast")]
#[test_case(json!({"events": {"issue created": {"schema": {}}}}), "events.issue created")]
#[test_case(json!({"entities": {"": {"schema": {}}}}), "entities.")]
#[test_case(json!({"channels": {"chat": {"messages": {"a.b": {"schema": {}}}}}}), "channels.chat.messages.a.b")]
fn preflight___bad_item_key___names_the_key(doc: serde_json::Value, expected: &str) {
    let result = preflight(&definition(doc));

    match result {
        Err(GenerationError::ConfigValidation { identifier, .. }) => assert_eq!(identifier, expected),
        other => panic!("expected config validation error, got {:?}", other),
    }
}

#[test]
fn generate___bad_secret___fails_before_translation() {
    // The schema is malformed too; the secret error must win.
    let def = definition(json!({
        "events": {"ping": {"schema": {"type": "date"}}},
        "secrets": {"lowercase": {}}
    }));

    let result = generator().generate(&def);

    assert!(matches!(result, Err(GenerationError::ConfigValidation { .. })));
}

// Registry tests

#[test]
fn Registry___register_new_path___returns_true() {
    let mut registry = Registry::new();

    assert!(registry.register("a/index", "x", "first").unwrap());
    assert!(registry.register("b/index", "x", "second").unwrap());
}

#[test]
fn Registry___register_identical___returns_false() {
    let mut registry = Registry::new();
    registry.register("a", "same", "first").unwrap();

    assert!(!registry.register("a", "same", "second").unwrap());
}

#[test]
fn Registry___register_different_content___returns_collision() {
    let mut registry = Registry::new();
    registry.register("a", "one", "first").unwrap();

    let result = registry.register("a", "two", "second");

    assert_eq!(
        result,
        Err(GenerationError::NamingCollision {
            name: "a".into(),
            first: "first".into(),
            second: "second".into(),
        })
    );
}

// flatten tests

#[test]
fn flatten___orders_parent_before_children() {
    let root = Module::barrel(
        "",
        "Root",
        vec![Module::barrel("b", "Bs", vec![leaf("x", "BX", "bx")]), leaf("a", "A", "a")],
    );

    let artifacts = flatten(&root, "").unwrap();

    let paths: Vec<&str> = artifacts.iter().map(|a| a.path.as_str()).collect();
    assert_eq!(paths, vec!["index", "b/index", "b/x", "a"]);
}

#[test]
fn flatten___prepends_header() {
    let root = leaf("only", "Only", "export type Only = string;\n");

    let artifacts = flatten(&root, "// generated").unwrap();

    assert_eq!(
        artifacts[0].content,
        "// generated\n\nexport type Only = string;\n"
    );
}

#[test]
fn flatten___identical_duplicate_path___is_dropped() {
    let shared = leaf("shared", "Shared", "same");
    let root = Module::composite(
        "Root",
        vec![
            Module::composite("First", vec![shared.clone()], None),
            Module::composite("Second", vec![shared], None),
        ],
        None,
    );

    let artifacts = flatten(&root, "").unwrap();

    assert_eq!(artifacts.len(), 1);
}

#[test]
fn flatten___conflicting_duplicate_path___returns_collision_with_origins() {
    let root = Module::composite(
        "Root",
        vec![
            Module::composite("First", vec![leaf("shared", "Shared", "one")], None),
            Module::composite("Second", vec![leaf("shared", "Shared", "two")], None),
        ],
        None,
    );

    let result = flatten(&root, "");

    assert_eq!(
        result,
        Err(GenerationError::NamingCollision {
            name: "shared".into(),
            first: "root.first.shared".into(),
            second: "root.second.shared".into(),
        })
    );
}

#[test]
fn flatten___siblings_sharing_export_name___returns_collision() {
    let root = Module::composite(
        "Actions",
        vec![
            Module::composite("ActionCreateIssue", vec![], None).rename("createIssue"),
            Module::composite("ActionCreateIssue", vec![], None).rename("CreateIssue"),
        ],
        None,
    );

    let result = flatten(&root, "");

    assert_eq!(
        result,
        Err(GenerationError::NamingCollision {
            name: "ActionCreateIssue".into(),
            first: "actions.createIssue".into(),
            second: "actions.CreateIssue".into(),
        })
    );
}

#[test]
fn flatten___siblings_sharing_key___returns_collision() {
    let root = Module::composite(
        "Root",
        vec![leaf("a", "A", "").with_key("same"), leaf("b", "B", "").with_key("same")],
        None,
    );

    let result = flatten(&root, "");

    assert_eq!(
        result,
        Err(GenerationError::NamingCollision {
            name: "same".into(),
            first: "root.same (A)".into(),
            second: "root.same (B)".into(),
        })
    );
}

#[test]
fn flatten___nested_inline_symbol_clash___returns_collision() {
    let issue = Module::composite(
        "ChannelIssue",
        vec![Module::composite("ChannelIssueMessages", vec![], None).rename("messages")],
        None,
    )
    .rename("issue");
    let issue_messages = Module::composite("ChannelIssueMessages", vec![], None).rename("issueMessages");
    let root = Module::index("channel", "Channels", vec![issue, issue_messages]);

    let result = flatten(&root, "");

    assert_eq!(
        result,
        Err(GenerationError::NamingCollision {
            name: "ChannelIssueMessages".into(),
            first: "channels.issue.messages".into(),
            second: "channels.issueMessages".into(),
        })
    );
}

#[test]
fn flatten___star_exported_children_sharing_symbol___returns_collision() {
    let settings = Module::leaf(
        ModuleDef::new("settings/index", "Settings", "").with_exports(["SettingsOauth"]),
    );
    let profiles = Module::barrel(
        "profiles",
        "Profiles",
        vec![Module::composite("SettingsOauth", vec![], None).rename("oauth")],
    );
    let root = Module::barrel("", "Root", vec![settings, profiles]);

    let result = flatten(&root, "");

    assert_eq!(
        result,
        Err(GenerationError::NamingCollision {
            name: "SettingsOauth".into(),
            first: "root.settings".into(),
            second: "root.profiles".into(),
        })
    );
}

#[test]
fn flatten___child_export_matching_barrel_aggregate___returns_collision() {
    let child = Module::leaf(ModuleDef::new("child", "Child", "").with_exports(["Root"]));
    let root = Module::barrel("", "Root", vec![child]);

    let result = flatten(&root, "");

    assert_eq!(
        result,
        Err(GenerationError::NamingCollision {
            name: "Root".into(),
            first: "root".into(),
            second: "root.child".into(),
        })
    );
}

#[test]
fn flatten___symbols_only_imported___do_not_collide() {
    // Files below inline composites are imported under an alias, never re-exported.
    let first = Module::composite(
        "First",
        vec![Module::leaf(ModuleDef::new("first/schema", "Schema", "a"))],
        None,
    )
    .rename("first");
    let second = Module::composite(
        "Second",
        vec![Module::leaf(ModuleDef::new("second/schema", "Schema", "b"))],
        None,
    )
    .rename("second");
    let root = Module::barrel("", "Root", vec![first, second]);

    let artifacts = flatten(&root, "").unwrap();

    assert_eq!(artifacts.len(), 3);
}

#[test]
fn Generator___configuration_field_clashing_with_configurations_item___returns_collision() {
    let def = definition(json!({
        "configuration": {"schema": {"properties": {"oauth": {"properties": {"a": {"type": "string"}}}}}},
        "configurations": {"oauth": {"schema": {"properties": {"b": {"type": "string"}}}}}
    }));

    let result = generator().generate(&def);

    assert_eq!(
        result,
        Err(GenerationError::NamingCollision {
            name: "ConfigurationOauth".into(),
            first: "integration.configuration".into(),
            second: "integration.configurations".into(),
        })
    );
}

// Generator tests

#[test]
fn Generator___new___keeps_config() {
    let generator = generator();

    assert_eq!(generator.config().header, "// generated");
    assert_eq!(generator.config().workers, Some(2));
}

#[test]
fn Generator___empty_definition___yields_no_artifacts() {
    let artifacts = generator().generate(&Definition::new("empty")).unwrap();

    assert!(artifacts.is_empty());
}

#[test]
fn Generator___build___orders_sections_fixed() {
    let def = definition(json!({
        "secrets": {"TOKEN": {}},
        "entities": {"issue": {"schema": {}}},
        "events": {"ping": {"schema": {}}},
        "configuration": {"schema": {}},
        "actions": {"run": {"input": {"schema": {}}, "output": {"schema": {}}}}
    }));

    let root = generator().build(&def).unwrap().unwrap();

    let keys: Vec<&str> = root.children().iter().map(Module::key).collect();
    assert_eq!(keys, vec!["configuration", "actions", "events", "entities", "secrets"]);
    assert_eq!(root.export_name(), ROOT_EXPORT);
}

#[test]
fn Generator___top_index___reexports_sections() {
    let def = definition(json!({
        "events": {"ping": {"schema": {}}},
        "secrets": {"TOKEN": {}}
    }));

    let artifacts = generator().generate(&def).unwrap();

    let index = artifacts.iter().find(|a| a.path == "index").unwrap();
    assert_eq!(
        index.content,
        "// generated\n\n\
         import * as event from './event';\n\
         import * as secrets from './secrets';\n\
         \n\
         export * from './event';\n\
         export * from './secrets';\n\
         \n\
         export type Integration = {\n  \
           events: event.Events;\n  \
           secrets: secrets.Secrets;\n\
         };\n"
    );
}

#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn GeneratorConfig___default___has_expected_values() {
    let config = GeneratorConfig::default();

    assert!(config.workers.is_none());
    assert_eq!(config.log_level, "info");
    assert_eq!(config.file_extension, "ts");
    assert!(config.header.starts_with("//"));
}

#[test]
fn GeneratorConfig___from_json_empty___returns_default() {
    let config = GeneratorConfig::from_json(b"").unwrap();

    assert_eq!(config, GeneratorConfig::default());
}

#[test]
fn GeneratorConfig___from_json_partial___keeps_other_defaults() {
    let config = GeneratorConfig::from_json(br#"{"workers": 3}"#).unwrap();

    assert_eq!(config.workers, Some(3));
    assert_eq!(config.file_extension, "ts");
}

#[test]
fn GeneratorConfig___from_json_invalid___returns_error() {
    let result = GeneratorConfig::from_json(b"{not json");

    assert!(result.is_err());
}

#[test_case(r#"{"log_level": "debug"}"#, LogLevel::Debug)]
#[test_case(r#"{"log_level": "WARN"}"#, LogLevel::Warn)]
#[test_case(r#"{"log_level": "nonsense"}"#, LogLevel::Info)]
#[test_case(r#"{}"#, LogLevel::Info)]
fn GeneratorConfig___level___parses_log_level(json: &str, expected: LogLevel) {
    let config = GeneratorConfig::from_json(json.as_bytes()).unwrap();

    assert_eq!(config.level(), expected);
}

#[test_case(Some(4), 4)]
#[test_case(Some(1), 1)]
#[test_case(Some(0), 1)]
fn GeneratorConfig___worker_count___is_never_zero(workers: Option<usize>, expected: usize) {
    let config = GeneratorConfig {
        workers,
        ..GeneratorConfig::default()
    };

    assert_eq!(config.worker_count(), expected);
}

#[test]
fn GeneratorConfig___worker_count_unset___uses_available_parallelism() {
    let config = GeneratorConfig::default();

    assert!(config.worker_count() >= 1);
}

#[test]
fn GeneratorConfig___builder_chain___combines_options() {
    let config = GeneratorConfig::new()
        .with_workers(2)
        .with_log_level("trace")
        .with_file_extension("d.ts")
        .with_header("// custom");

    assert_eq!(config.workers, Some(2));
    assert_eq!(config.level(), LogLevel::Trace);
    assert_eq!(config.file_extension, "d.ts");
    assert_eq!(config.header, "// custom");
}

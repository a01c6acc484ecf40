#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case(LogLevel::Trace, LevelFilter::TRACE)]
#[test_case(LogLevel::Debug, LevelFilter::DEBUG)]
#[test_case(LogLevel::Info, LevelFilter::INFO)]
#[test_case(LogLevel::Warn, LevelFilter::WARN)]
#[test_case(LogLevel::Error, LevelFilter::ERROR)]
#[test_case(LogLevel::Off, LevelFilter::OFF)]
fn level_filter___maps_each_level(level: LogLevel, expected: LevelFilter) {
    assert_eq!(level_filter(level), expected);
}

#[test]
fn init_logging___second_call___is_noop_and_keeps_first_level() {
    // Either this test or another one in the binary installs the subscriber first.
    init_logging(LogLevel::Warn);

    let installed_again = init_logging(LogLevel::Trace);

    assert!(!installed_again);
    assert!(ReloadHandle::global().is_initialized());
}

#[test]
fn init_logging___then_reload___changes_level() {
    init_logging(LogLevel::Info);

    ReloadHandle::global().reload_level(LogLevel::Error).unwrap();

    assert_eq!(
        ReloadHandle::global().current_level(),
        Some(LevelFilter::ERROR)
    );
}

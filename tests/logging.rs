// tests/logging.rs

use initorder::cli::LogLevel;
use initorder::logging::build_filter;
use tracing_subscriber::filter::LevelFilter;

#[test]
fn cli_level_wins_over_environment() {
    let filter = build_filter(Some(LogLevel::Warn), Some("trace")).unwrap();
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
}

#[test]
fn unset_or_blank_environment_defaults_to_info() {
    let unset = build_filter(None, None).unwrap();
    assert_eq!(unset.max_level_hint(), Some(LevelFilter::INFO));

    let blank = build_filter(None, Some("  ")).unwrap();
    assert_eq!(blank.max_level_hint(), Some(LevelFilter::INFO));
}

#[test]
fn per_module_directives_are_honoured() {
    let filter = build_filter(None, Some("warn,initorder::dag=trace")).unwrap();
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    assert!(filter.to_string().contains("initorder::dag=trace"));
}

#[test]
fn malformed_directive_is_reported() {
    let err = build_filter(None, Some("initorder=loud")).unwrap_err();
    assert!(err.to_string().contains("INITORDER_LOG"));
}

//! Config loading: TOML with partial sections must fall back to defaults.

use std::path::PathBuf;

use auditmon_core::config::{AuditmonConfig, InterestConfig, RecorderConfig};
use auditmon_core::errors::{AuditmonError, InterestError};
use auditmon_core::observability::init_tracing;

// ═══════════════════════════════════════════════════════════════════════════
// Defaults
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn empty_toml_yields_defaults() {
    let config = AuditmonConfig::from_toml("").unwrap();
    assert_eq!(config.interest, InterestConfig::default());
    assert!(config.recorder.journal_path.is_none());
    assert_eq!(config.recorder.default_origin, "manual");
    assert_eq!(config.recorder.default_stop_reason, "stop");
    assert_eq!(config.observability.log_level, "info");
    assert!(!config.observability.json);
}

#[test]
fn interest_defaults_match_model_constants() {
    let interest = InterestConfig::default();
    assert!((interest.decay_rate - 0.1).abs() < f64::EPSILON);
    assert!((interest.interest_increase - 1.0).abs() < f64::EPSILON);
    assert!((interest.interest_threshold + 10.0).abs() < f64::EPSILON);
}

// ═══════════════════════════════════════════════════════════════════════════
// Partial sections
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn partial_interest_section_keeps_other_defaults() {
    let config = AuditmonConfig::from_toml(
        r#"
        [interest]
        decay_rate = 0.0
        "#,
    )
    .unwrap();
    assert_eq!(config.interest.decay_rate, 0.0);
    assert_eq!(config.interest.interest_increase, 1.0);
    assert_eq!(config.interest.interest_threshold, -10.0);
}

#[test]
fn recorder_section_sets_journal_path() {
    let config = AuditmonConfig::from_toml(
        r#"
        [recorder]
        journal_path = "/tmp/audit/journal.csv"
        default_origin = "editor"
        "#,
    )
    .unwrap();
    assert_eq!(
        config.recorder.journal_path,
        Some(PathBuf::from("/tmp/audit/journal.csv"))
    );
    assert_eq!(config.recorder.default_origin, "editor");
    assert_eq!(
        config.recorder.default_stop_reason,
        RecorderConfig::default().default_stop_reason
    );
}

#[test]
fn wrong_type_is_a_parse_error() {
    let result = AuditmonConfig::from_toml(
        r#"
        [interest]
        decay_rate = "fast"
        "#,
    );
    assert!(matches!(result, Err(AuditmonError::Config(_))));
}

#[test]
fn out_of_domain_interest_parameters_are_rejected() {
    let result = AuditmonConfig::from_toml(
        r#"
        [interest]
        interest_threshold = 2.5
        "#,
    );
    assert!(matches!(
        result,
        Err(AuditmonError::Interest(InterestError::InvalidParameter {
            name: "interest_threshold",
            ..
        }))
    ));
}

#[test]
fn config_round_trips_through_json() {
    let mut config = AuditmonConfig::default();
    config.interest.decay_rate = 0.25;
    config.observability.json = true;

    let json = serde_json::to_string(&config).unwrap();
    let back: AuditmonConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.interest.decay_rate, 0.25);
    assert!(back.observability.json);
}

// ═══════════════════════════════════════════════════════════════════════════
// Tracing bootstrap
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn init_tracing_is_idempotent() {
    let config = AuditmonConfig::default();
    let _first = init_tracing(&config.observability);
    // A second install must not panic; it reports that one already exists.
    assert!(!init_tracing(&config.observability));
}

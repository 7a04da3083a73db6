//! # Configuration Tests
//!
//! Defaults, JSON deserialization, file loading, and validation.

use std::io::Write;

use tomsim_core::common::ConfigError;
use tomsim_core::config::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.general.trace_pipeline);
    assert_eq!(config.general.max_cycles, None);
    assert_eq!(config.branch.predictor, BranchPredictorKind::TwoBitSaturating);
}

#[test]
fn test_tomasulo_defaults() {
    let t = TomasuloConfig::default();
    assert_eq!(t.fetch_queue_size, 10);
    assert_eq!(t.int_reservation, 4);
    assert_eq!(t.fp_reservation, 2);
    assert_eq!(t.int_units, 2);
    assert_eq!(t.fp_units, 1);
    assert_eq!(t.int_latency, 4);
    assert_eq!(t.fp_latency, 9);
}

#[test]
fn test_branch_defaults() {
    let b = BranchConfig::default();
    assert_eq!(b.two_bit.entries, 4096);
    assert_eq!(b.two_level.bht_entries, 512);
    assert_eq!(b.two_level.history_bits, 6);
    assert_eq!(b.two_level.pht_count, 8);
    assert_eq!(b.perceptron.entries, 256);
    assert_eq!(b.perceptron.history_length, 32);
    assert_eq!(b.perceptron.threshold, 100);
}

#[test]
fn test_empty_json_is_default() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.tomasulo.fp_latency, 9);
    assert!(config.validate().is_ok());
}

#[test]
fn test_predictor_kebab_alias() {
    let config = Config::from_json(r#"{ "branch": { "predictor": "two-level" } }"#).unwrap();
    assert_eq!(config.branch.predictor, BranchPredictorKind::TwoLevel);
}

#[test]
fn test_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{ "general": { "max_cycles": 500, "trace_pipeline": true } }"#)
        .unwrap();
    let config = Config::from_path(file.path()).unwrap();
    assert_eq!(config.general.max_cycles, Some(500));
    assert!(config.general.trace_pipeline);
}

#[test]
fn test_unknown_predictor_rejected() {
    assert!(matches!(
        Config::from_json(r#"{ "branch": { "predictor": "Tage" } }"#),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_zero_capacity_rejected() {
    let mut config = Config::default();
    config.tomasulo.fp_reservation = 0;
    assert!(matches!(config.validate(), Err(ConfigError::ZeroCapacity { .. })));
}

#[test]
fn test_zero_latency_rejected() {
    let mut config = Config::default();
    config.tomasulo.int_latency = 0;
    assert!(matches!(config.validate(), Err(ConfigError::ZeroLatency { .. })));
}

#[test]
fn test_non_power_of_two_table_rejected() {
    let mut config = Config::default();
    config.branch.two_bit.entries = 1000;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::TableSize { size: 1000, .. })
    ));
}

#[test]
fn test_perceptron_history_bounds() {
    let mut config = Config::default();
    config.branch.perceptron.history_length = 65;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::HistoryLength { length: 65, max: 64, .. })
    ));
}

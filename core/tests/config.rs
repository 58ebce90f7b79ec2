//! Segmentation config loading.

use rfm_core::config::{RfmOrder, SegmentationConfig, TieBreak};
use std::path::PathBuf;

fn write_temp(name: &str, body: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("rfm-config-{}-{name}.json", std::process::id()));
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn defaults_match_reporting_conventions() {
    let config = SegmentationConfig::default();
    assert_eq!(config.tie_break, TieBreak::CustomerIdAscending);
    assert_eq!(config.report.rfm_order, RfmOrder::MonetaryDescending);
    assert_eq!(config.report.preview_rows, 50);
}

#[test]
fn shipped_config_file_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/segmentation.json");
    let config = SegmentationConfig::load(path).expect("data/segmentation.json");
    assert_eq!(config, SegmentationConfig::default());
}

#[test]
fn partial_config_falls_back_to_defaults() {
    let path = write_temp("partial", r#"{ "tie_break": "customer_id_descending" }"#);
    let config = SegmentationConfig::load(path.to_str().unwrap()).unwrap();

    assert_eq!(config.tie_break, TieBreak::CustomerIdDescending);
    assert_eq!(config.report.preview_rows, 50);
    let _ = std::fs::remove_file(path);
}

#[test]
fn unknown_keys_are_rejected() {
    let path = write_temp("unknown", r#"{ "tie_brake": "customer_id_ascending" }"#);
    let err = SegmentationConfig::load(path.to_str().unwrap()).unwrap_err();

    assert!(err.to_string().contains("Invalid segmentation config"), "got: {err}");
    let _ = std::fs::remove_file(path);
}

#[test]
fn missing_file_names_the_path() {
    let err = SegmentationConfig::load("/nonexistent/segmentation.json").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/segmentation.json"), "got: {err}");
}

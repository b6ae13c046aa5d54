use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use remediation_due::cli::commands::compute_with_config;
use remediation_due::cli::config::{CommandName, RunConfig};
use remediation_due::config::{load_config, AppConfig};
use remediation_due::core::types::{OutputFormat, ReferenceSource, Surface};

fn run_config(record: &str, fields: &[(&str, &str)]) -> RunConfig {
    RunConfig {
        command: CommandName::Compute,
        config_path: None,
        format: OutputFormat::Json,
        surface: None,
        record: Some(PathBuf::from(record)),
        fields: fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

#[test]
fn shipped_config_matches_defaults() {
    let cfg = load_config(Some(Path::new("config/remediation-due.toml"))).unwrap();
    assert_eq!(cfg, AppConfig::default());
}

#[test]
fn computes_from_record_file() {
    let due = compute_with_config(
        &run_config("fixtures/record-moderate.json", &[]),
        &AppConfig::default(),
    )
    .unwrap();
    assert_eq!(due.source, ReferenceSource::DateFirstFound);
    assert_eq!(due.date, NaiveDate::from_ymd_opt(2024, 4, 15));
}

#[test]
fn field_override_changes_rating() {
    let due = compute_with_config(
        &run_config(
            "fixtures/record-moderate.json",
            &[("Mirror of finding register.Risk Rating - UNSW", "Low")],
        ),
        &AppConfig::default(),
    )
    .unwrap();
    assert_eq!(due.date, NaiveDate::from_ymd_opt(2024, 5, 15));
}

#[test]
fn create_date_only_record() {
    let due = compute_with_config(
        &run_config("fixtures/record-create-date-only.json", &[]),
        &AppConfig::default(),
    )
    .unwrap();
    assert_eq!(due.source, ReferenceSource::CreateDate);
    assert_eq!(due.date, NaiveDate::from_ymd_opt(2024, 1, 3));
}

#[test]
fn surface_override_is_honoured() {
    std::env::set_var("REMEDIATION_DUE_FIXED_DATE", "2025-06-30");
    let mut cfg = run_config(
        "fixtures/record-moderate.json",
        &[("Mirror of finding register.Risk Rating - UNSW", "Unrated")],
    );
    cfg.surface = Some(Surface::Template);
    let due = compute_with_config(&cfg, &AppConfig::default()).unwrap();
    assert_eq!(due.date, NaiveDate::from_ymd_opt(2025, 6, 30));
}

#[test]
fn missing_record_file_is_an_error() {
    let cfg = run_config("fixtures/does-not-exist.json", &[]);
    assert!(compute_with_config(&cfg, &AppConfig::default()).is_err());
}

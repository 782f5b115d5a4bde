// tests/integration_tests.rs
use resume_screen::form::validate_weights;
use resume_screen::models::ResumeResult;
use resume_screen::render::{Listing, build_listing};
use resume_screen::{ClientConfig, JobForm, JobSpec, ScreenError};
use std::path::PathBuf;
use std::time::Duration;

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("resume-screen-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_job_spec_file_feeds_the_form() {
    let path = scratch_file(
        "job.toml",
        r#"
job_title = "Data Engineer"
description = "Batch pipelines, Spark, Airflow"
years_needed = "4"

[weights]
quality = 20
experience = 40
years = 30
location = 10
"#,
    );

    let spec = JobSpec::from_path(&path).unwrap();
    let mut form = JobForm::from_spec(&spec);
    let submission = form.to_submission();

    assert_eq!(submission.job_title.as_deref(), Some("Data Engineer"));
    assert_eq!(submission.years_needed.as_deref(), Some("4"));
    assert!(validate_weights(&submission.weights).is_ok());

    form.set("weight_location", "20");
    assert!(matches!(
        validate_weights(&form.weights()),
        Err(ScreenError::Validation(_))
    ));
}

#[test]
fn test_client_config_file() {
    let path = scratch_file(
        "config.toml",
        r#"
api_base = "http://screening.local:8000"
submit_timeout_secs = 120
list_limit = 50
"#,
    );

    let config = ClientConfig::load(Some(path.as_path())).unwrap();
    assert_eq!(config.api_base, "http://screening.local:8000");
    assert_eq!(config.submit_timeout, Duration::from_secs(120));
    assert_eq!(config.fetch_timeout, Duration::from_secs(10));
    assert_eq!(config.list_limit, Some(50));
}

#[test]
fn test_unknown_config_keys_are_rejected() {
    let path = scratch_file("typo.toml", "api_bsae = \"http://x\"\n");
    assert!(matches!(
        ClientConfig::load(Some(path.as_path())),
        Err(ScreenError::TomlParse(_))
    ));
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let missing = std::env::temp_dir().join("resume-screen-does-not-exist.toml");
    assert!(matches!(
        ClientConfig::load(Some(missing.as_path())),
        Err(ScreenError::FileRead(_))
    ));
}

#[test]
fn test_listing_text_rendering() {
    let resumes: Vec<ResumeResult> = serde_json::from_str(
        r#"[
            {"id": "0f0f0f0f-aaaa", "filename": "a.pdf", "score": 55,
             "reason": "Good fit\n\nRemote ok\nSenior\nKnows Kafka"},
            {"id": "1e1e1e1e-bbbb", "filename": "b.pdf", "score": 77.77,
             "path": "uploads/b.pdf", "job_title": "Data Engineer"}
        ]"#,
    )
    .unwrap();

    let listing = build_listing(Some(resumes.as_slice()), |p| Some(format!("http://h/download/{p}")));
    let text = listing.to_string();

    let first = text.find("Resume #1e1e1e1e").unwrap();
    let second = text.find("Resume #0f0f0f0f").unwrap();
    assert!(first < second);
    assert!(text.contains("Score: 77.8"));
    assert!(text.contains("Good fit\n    Remote ok\n    Senior..."));
    assert!(!text.contains("Knows Kafka"));
    assert!(text.contains("Path: N/A"));

    assert_eq!(build_listing(None, |_| None), Listing::Empty);
}

//! Report rendering

use muntinkit::{run_job, Config, Job, JobReport, Layout, Opening};
use tempfile::TempDir;

fn grid_report() -> JobReport {
    let job = Job::new("Report test", Opening::new(1200.0, 800.0)).with_layout(Layout::Grid {
        rows: 2,
        cols: 3,
        horizontal_master: false,
    });
    run_job(&job, &Config::default()).unwrap()
}

#[test]
fn test_json_report_round_trip() {
    let report = grid_report();
    let json = report.to_json().unwrap();
    assert!(json.contains("\"generated_at\""));
    assert!(json.contains("\"cut_list\""));
    assert!(!json.contains("\"mount_marks\""));

    let parsed: JobReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report);
}

#[test]
fn test_summary_sections() {
    let summary = grid_report().summary();
    assert!(summary.starts_with("Report test\n"));
    assert!(summary.contains("Opening: 1200.0 x 800.0 mm, grid layout (5 bars)"));
    assert!(summary.contains("Cut list:"));
    assert!(summary.contains("Stock: 1 bar(s)"));
    assert!(summary.contains("Assembly order:"));
    assert!(!summary.contains("Warnings:"));
}

#[test]
fn test_saved_job_reloads() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("job.json");

    let mut job = Job::new("Saved", Opening::new(900.0, 900.0)).with_layout(Layout::Web { rays: 6 });
    job.preset = Some("diamond".to_string());
    job.save(&path).unwrap();

    assert_eq!(Job::load(&path).unwrap(), job);
}

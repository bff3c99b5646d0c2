//! Job files through the whole pipeline

use muntinkit::{
    run_job, Config, CutItem, DiagonalLine, Job, JobError, LayoutSource, Opening, Pattern,
};
use tempfile::TempDir;

fn write_job(dir: &TempDir, name: &str, json: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, json).expect("Failed to write job file");
    path
}

#[test]
fn test_generated_grid_job() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_job(
        &temp_dir,
        "grid.json",
        r#"{
            "name": "Kitchen sash",
            "opening": { "width": 1200.0, "height": 800.0 },
            "layout": { "layout": "grid", "rows": 2, "cols": 2 }
        }"#,
    );

    let job = Job::load(&path).expect("Failed to load job");
    let report = run_job(&job, &Config::default()).unwrap();

    assert_eq!(report.source, LayoutSource::Generated("grid".to_string()));
    assert_eq!(
        report.cut_list,
        vec![
            CutItem::new(798.0, 90.0, 90.0, 1),
            CutItem::new(585.0, 90.0, 90.0, 2)
        ]
    );
    assert_eq!(report.packing.bars_used, 1);
    assert_eq!(report.packing.cut_count(), 3);
    assert_eq!(report.assembly.len(), 3);
    assert_eq!(report.assembly[0].bar_id, 1);
    assert_eq!(report.assembly[0].description, "Vertical");
    assert!(report.warnings.is_empty());
}

#[test]
fn test_explicit_bars_with_oversized_piece() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_job(
        &temp_dir,
        "wide.json",
        r#"{
            "name": "Shopfront",
            "opening": { "width": 8000.0, "height": 1000.0 },
            "bars": [
                { "id": 1, "start": { "x": 0.0, "y": 500.0 }, "end": { "x": 8000.0, "y": 500.0 } }
            ]
        }"#,
    );

    let job = Job::load(&path).unwrap();
    let report = run_job(&job, &Config::default()).unwrap();

    assert_eq!(report.source, LayoutSource::Bars);
    assert_eq!(report.cut_list, vec![CutItem::new(7998.0, 90.0, 90.0, 1)]);
    assert_eq!(report.packing.bars_used, 1);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("7998.0 mm"));
    assert!(report.warnings[0].contains("6000 mm"));
}

#[test]
fn test_angular_job_marks_every_piece() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_job(
        &temp_dir,
        "diagonals.json",
        r#"{
            "name": "Crossed diagonals",
            "opening": { "width": 1000.0, "height": 1000.0 },
            "patterns": [
                { "type": "diagonal", "angle_deg": 45.0, "offset_mm": 0.0, "continuous": true },
                { "type": "diagonal", "angle_deg": 135.0, "offset_mm": 1000.0 }
            ]
        }"#,
    );

    let job = Job::load(&path).unwrap();
    let report = run_job(&job, &Config::default()).unwrap();

    assert_eq!(report.source, LayoutSource::Angular);
    assert!(!report.bars.is_empty());
    assert_eq!(report.mount_marks.len(), report.bars.len());
    assert_eq!(report.assembly.len(), report.bars.len());
    let pieces: usize = report.cut_list.iter().map(|i| i.count).sum();
    assert_eq!(pieces, report.bars.len());
    assert_eq!(report.packing.cut_count(), pieces);
}

#[test]
fn test_angular_job_with_bars_two_gaps_apart() {
    let diagonal = |angle_deg: f64, offset_mm: f64| {
        Pattern::Diagonal(DiagonalLine {
            angle_deg,
            offset_mm,
            continuous: false,
        })
    };

    // Verticals 28 mm apart close the horizontal piece between them exactly
    for k in 0..200 {
        let offset = 50.0 + 0.373 * k as f64;
        let mut job = Job::new("Close verticals", Opening::new(1000.0, 1000.0));
        job.patterns = vec![
            diagonal(90.0, offset),
            diagonal(90.0, offset + 28.0),
            diagonal(0.0, 500.0),
        ];

        let report = run_job(&job, &Config::default())
            .unwrap_or_else(|e| panic!("offset {offset}: {e}"));
        assert_eq!(report.bars.len(), 4, "offset {offset}");
        assert_eq!(report.mount_marks.len(), 4);
        assert!(report.cut_list.iter().all(|item| item.length > 0.0));
    }
}

#[test]
fn test_absurd_sash_count_is_an_error() {
    let mut job = Job::new("Too many sashes", Opening::new(1200.0, 800.0));
    job.layout = Some(muntinkit::Layout::Grid {
        rows: 2,
        cols: 2,
        horizontal_master: false,
    });
    job.sash_count = Some(usize::MAX);

    let err = run_job(&job, &Config::default()).unwrap_err();
    assert!(matches!(err, JobError::CamTools(_)));
}

#[test]
fn test_diamond_layout_uses_quadrant_order() {
    let job: Job = serde_json::from_str(
        r#"{ "opening": { "width": 1000.0, "height": 800.0 }, "layout": { "layout": "diamond" } }"#,
    )
    .unwrap();
    let report = run_job(&job, &Config::default()).unwrap();

    let names: Vec<&str> = report.assembly.iter().map(|s| s.description.as_str()).collect();
    assert_eq!(names, vec!["Top-Right", "Bottom-Right", "Bottom-Left", "Top-Left"]);
    assert!(report.assembly[0].position_label.starts_with("Start from center"));
}

#[test]
fn test_config_file_changes_packing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        "[stock]\nstock_length_mm = 2000.0\nkerf_mm = 0.0\nsash_count = 2\n",
    )
    .unwrap();
    let config = Config::load_from_file(&config_path).unwrap();

    let job: Job = serde_json::from_str(
        r#"{
            "opening": { "width": 1200.0, "height": 800.0 },
            "layout": { "layout": "grid", "rows": 2, "cols": 2 }
        }"#,
    )
    .unwrap();
    let report = run_job(&job, &config).unwrap();

    // 798 + 798 | 585 + 585 + 585 | 585
    assert_eq!(report.packing.cut_count(), 6);
    assert_eq!(report.packing.bars_used, 3);
    assert_eq!(report.packing.bars[1].cuts.len(), 3);
    assert!(report.packing.bars.iter().all(|b| !b.is_oversized()));
}

#[test]
fn test_bad_job_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let path = write_job(&temp_dir, "broken.json", "{ \"opening\": ");
    assert!(matches!(Job::load(&path), Err(JobError::Json(_))));

    let path = temp_dir.path().join("missing.json");
    assert!(matches!(Job::load(&path), Err(JobError::Io(_))));

    let path = write_job(
        &temp_dir,
        "zero.json",
        r#"{
            "opening": { "width": 1000.0, "height": 1000.0 },
            "bars": [ { "id": 7, "start": { "x": 5.0, "y": 5.0 }, "end": { "x": 5.0, "y": 5.0 } } ]
        }"#,
    );
    let job = Job::load(&path).unwrap();
    let err = run_job(&job, &Config::default()).unwrap_err();
    assert!(err.to_string().contains("Bar 7"));
}

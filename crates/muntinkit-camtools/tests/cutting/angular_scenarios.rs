//! Angular layouts resolved through crossings

use muntinkit_camtools::{
    compute_angular_cut_list, AngularParams, ArchPattern, DiagonalLine, FreeformBar, Joint,
    Pattern, SpiderPattern,
};
use muntinkit_core::{Point, Rect};

fn diagonal(angle_deg: f64, offset_mm: f64, continuous: bool) -> Pattern {
    Pattern::Diagonal(DiagonalLine {
        angle_deg,
        offset_mm,
        continuous,
    })
}

#[test]
fn test_explicit_continuity_overrides_vertical() {
    let patterns = vec![diagonal(90.0, 500.0, false), diagonal(0.0, 500.0, true)];
    let result = compute_angular_cut_list(
        &patterns,
        Rect::from_size(1000.0, 1000.0),
        &AngularParams::default(),
    )
    .unwrap();

    // The marked horizontal runs through, the vertical is split
    let vertical_pieces = result.segments.iter().filter(|s| s.source == 0).count();
    let horizontal_pieces = result.segments.iter().filter(|s| s.source == 1).count();
    assert_eq!(vertical_pieces, 2);
    assert_eq!(horizontal_pieces, 1);
}

#[test]
fn test_crossing_diagonals_get_miter_angles() {
    let rect = Rect::from_size(1000.0, 1000.0);
    let patterns = vec![
        Pattern::Freeform(FreeformBar {
            start: Point::new(0.0, 0.0),
            end: Point::new(1000.0, 1000.0),
            continuous: true,
        }),
        Pattern::Freeform(FreeformBar {
            start: Point::new(0.0, 1000.0),
            end: Point::new(1000.0, 0.0),
            continuous: false,
        }),
    ];
    let result = compute_angular_cut_list(&patterns, rect, &AngularParams::default()).unwrap();

    assert_eq!(result.segments.len(), 3);
    let half = &result.segments[1];
    assert_eq!(half.start_joint, Joint::Frame);
    assert_eq!(half.end_joint, Joint::Crossing { segment: 0 });

    // 45° at the frame, 90° against the through diagonal
    let halves: Vec<_> = result
        .cut_items
        .iter()
        .filter(|item| item.count == 2)
        .collect();
    assert_eq!(halves.len(), 1);
    assert_eq!(halves[0].angle_start, 45.0);
    assert_eq!(halves[0].angle_end, 90.0);
    let expected = 500.0 * 2f64.sqrt() - 14.0 - 1.0;
    assert!((halves[0].length - expected).abs() < 0.051);
}

#[test]
fn test_spider_hub_is_cleared() {
    let rect = Rect::new(90.0, 90.0, 910.0, 910.0);
    let patterns = vec![Pattern::Spider(SpiderPattern {
        center: None,
        arm_count: 4,
        start_angle_deg: 0.0,
        ring_count: 0,
        ring_spacing_mm: 0.0,
    })];
    let result = compute_angular_cut_list(&patterns, rect, &AngularParams::default()).unwrap();

    // The near-vertical arms (90° and 270°) run through the hub
    for source in [1, 3] {
        let arm: Vec<_> = result.segments.iter().filter(|s| s.source == source).collect();
        assert_eq!(arm.len(), 1);
        assert!((arm[0].length() - 410.0).abs() < 1e-9);
        assert_eq!(arm[0].start_joint, Joint::Free);
    }
    // The horizontal arms are pulled back from the hub
    for source in [0, 2] {
        let arm: Vec<_> = result.segments.iter().filter(|s| s.source == source).collect();
        assert_eq!(arm.len(), 1);
        assert!((arm[0].length() - 396.0).abs() < 1e-9, "{:?}", arm[0]);
        assert_eq!(arm[0].start_joint, Joint::Crossing { segment: 3 });
        assert_eq!(arm[0].end_joint, Joint::Frame);
    }
}

#[test]
fn test_arch_chords_stay_inside() {
    let rect = Rect::from_size(1000.0, 600.0);
    let patterns = vec![Pattern::Arch(ArchPattern {
        division_count: 6,
        ..ArchPattern::with_radius(400.0)
    })];
    let result = compute_angular_cut_list(&patterns, rect, &AngularParams::default()).unwrap();
    assert_eq!(result.segments.len(), 6);
    for mark in &result.mount_marks {
        assert!(mark.midpoint.x >= 0.0 && mark.midpoint.x <= 1000.0);
        assert!(mark.midpoint.y >= 0.0 && mark.midpoint.y <= 600.0);
    }
}

#[test]
fn test_saw_correction_applies_to_every_piece() {
    let params = AngularParams {
        saw_correction: 0.5,
        ..AngularParams::default()
    };
    let patterns = vec![diagonal(90.0, 500.0, false)];
    let result =
        compute_angular_cut_list(&patterns, Rect::from_size(1000.0, 1000.0), &params).unwrap();
    assert_eq!(result.cut_items[0].length, 998.5);
}

#[test]
fn test_mount_marks_relative_to_usable_area() {
    let rect = Rect::new(100.0, 50.0, 1100.0, 850.0);
    let patterns = vec![diagonal(90.0, 500.0, false)];
    let result = compute_angular_cut_list(&patterns, rect, &AngularParams::default()).unwrap();
    assert_eq!(result.mount_marks.len(), 1);
    let mid = result.mount_marks[0].midpoint;
    assert!((mid.x - 500.0).abs() < 1e-9);
    assert!((mid.y - 400.0).abs() < 1e-9);
    assert_eq!(result.mount_marks[0].label, "X=500.0, Y=400.0");
}

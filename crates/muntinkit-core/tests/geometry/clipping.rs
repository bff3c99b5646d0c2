use muntinkit_core::geometry::{clip_line, clip_ray, clip_segment, Point, Rect};

#[test]
fn test_vertical_line_spans_full_height() {
    let rect = Rect::from_size(1200.0, 800.0);
    let line = clip_line(Point::new(600.0, 0.0), Point::new(0.0, 1.0), &rect).unwrap();
    assert!((line.length() - 800.0).abs() < 1e-9);
    assert!((line.p1.y - 0.0).abs() < 1e-9);
    assert!((line.p2.y - 800.0).abs() < 1e-9);
}

#[test]
fn test_line_direction_is_preserved() {
    let rect = Rect::from_size(100.0, 100.0);
    let line = clip_line(Point::new(50.0, 50.0), Point::new(-1.0, 0.0), &rect).unwrap();
    // The clipped segment runs in the direction of travel
    assert!(line.p1.x > line.p2.x);
}

#[test]
fn test_ray_pointing_away_is_rejected() {
    let rect = Rect::from_size(100.0, 100.0);
    assert!(clip_ray(Point::new(150.0, 50.0), Point::new(1.0, 0.0), &rect).is_none());
}

#[test]
fn test_segment_on_edge_is_kept() {
    let rect = Rect::from_size(100.0, 100.0);
    let line = clip_segment(Point::new(0.0, 0.0), Point::new(100.0, 0.0), &rect).unwrap();
    assert!((line.length() - 100.0).abs() < 1e-9);
}

#[test]
fn test_corner_touch_is_rejected() {
    // A line grazing a single corner has no usable length
    let rect = Rect::from_size(100.0, 100.0);
    assert!(clip_line(Point::new(0.0, 200.0), Point::new(1.0, -1.0), &rect).is_none());
}

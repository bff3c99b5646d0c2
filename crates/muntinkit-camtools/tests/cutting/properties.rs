//! Invariants of the cut-length calculation and aggregation

use muntinkit_camtools::{aggregate_cuts, calculate_segment, compute_cut_list, CutListParams, CutResult};
use muntinkit_core::{Bar, Line, Point};
use proptest::prelude::*;

fn point() -> impl Strategy<Value = Point> {
    (-500.0f64..1500.0, -500.0f64..1500.0).prop_map(|(x, y)| Point::new(x, y))
}

fn grid_bars(cols: usize, rows: usize) -> Vec<Bar> {
    let (w, h) = (1200.0, 900.0);
    let mut bars = Vec::new();
    for i in 1..cols {
        let x = w / cols as f64 * i as f64;
        bars.push(Bar::new(bars.len() + 1, Point::new(x, 0.0), Point::new(x, h), 26.0));
    }
    for j in 1..rows {
        let y = h / rows as f64 * j as f64;
        for i in 0..cols {
            let x1 = w / cols as f64 * i as f64;
            let x2 = w / cols as f64 * (i + 1) as f64;
            bars.push(Bar::new(bars.len() + 1, Point::new(x1, y), Point::new(x2, y), 26.0));
        }
    }
    bars
}

proptest! {
    #[test]
    fn final_length_is_never_negative(
        a in point(), b in point(), s1 in point(), s2 in point(), e1 in point(), e2 in point(),
        face_width in 0.0f64..80.0, c1 in 0.0f64..50.0, c2 in 0.0f64..50.0,
    ) {
        prop_assume!(a.distance_to(&b) > 1e-6);
        let bar = Bar::new(1, a, b, face_width);
        let r = calculate_segment(&bar, &Line::new(s1, s2), &Line::new(e1, e2), c1, c2);
        prop_assert!(r.final_length >= 0.0);
        prop_assert!((0.0..=90.0 + 1e-9).contains(&r.start_angle));
        prop_assert!((0.0..=90.0 + 1e-9).contains(&r.end_angle));
    }

    #[test]
    fn square_cuts_subtract_only_clearances(
        x in 10.0f64..990.0, y1 in 0.0f64..400.0, y2 in 500.0f64..1000.0,
        c1 in 0.0f64..20.0, c2 in 0.0f64..20.0, face_width in 1.0f64..60.0,
    ) {
        let bar = Bar::new(1, Point::new(x, y1), Point::new(x, y2), face_width);
        let top = Line::new(Point::new(0.0, y1), Point::new(1000.0, y1));
        let bottom = Line::new(Point::new(0.0, y2), Point::new(1000.0, y2));
        let r = calculate_segment(&bar, &top, &bottom, c1, c2);
        let expected = ((y2 - y1) - c1 - c2).max(0.0);
        prop_assert!((r.final_length - expected).abs() < 1e-9);
    }

    #[test]
    fn mirrored_angles_aggregate_together(len in 1.0f64..3000.0, a in 0.0f64..90.0, b in 0.0f64..90.0) {
        let cut = |s, e| CutResult {
            final_length: len,
            start_angle: s,
            end_angle: e,
            trimmed_start: Point::ZERO,
            trimmed_end: Point::ZERO,
        };
        let items = aggregate_cuts(&[cut(a, b), cut(b, a)]);
        prop_assert_eq!(items.len(), 1);
        prop_assert_eq!(items[0].count, 2);
        prop_assert!(items[0].angle_start <= items[0].angle_end);
    }

    #[test]
    fn permuting_bars_keeps_the_multiset(
        cols in 1usize..5, rows in 1usize..5,
        shuffle in proptest::collection::vec(any::<usize>(), 32),
    ) {
        let bars = grid_bars(cols, rows);
        let mut permuted = bars.clone();
        for (i, s) in shuffle.iter().enumerate().take(permuted.len()) {
            let j = s % permuted.len();
            permuted.swap(i, j);
        }

        let params = CutListParams::default();
        let mut original = compute_cut_list(&bars, 1200.0, 900.0, &params).unwrap();
        let mut shuffled = compute_cut_list(&permuted, 1200.0, 900.0, &params).unwrap();
        let key = |i: &muntinkit_camtools::CutItem| (
            (i.length * 10.0).round() as i64,
            (i.angle_start * 10.0).round() as i64,
            (i.angle_end * 10.0).round() as i64,
        );
        original.sort_by_key(key);
        shuffled.sort_by_key(key);
        prop_assert_eq!(original, shuffled);
    }

    #[test]
    fn cut_list_is_deterministic(cols in 1usize..6, rows in 1usize..6) {
        let bars = grid_bars(cols, rows);
        let params = CutListParams::default();
        let first = compute_cut_list(&bars, 1200.0, 900.0, &params).unwrap();
        let second = compute_cut_list(&bars, 1200.0, 900.0, &params).unwrap();
        prop_assert_eq!(first, second);
    }
}

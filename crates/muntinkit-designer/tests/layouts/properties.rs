//! Invariants shared by every generator

use muntinkit_core::Bar;
use muntinkit_designer::{grid, grid_horizontal_master, sunburst, trapezoid, web, Layout};
use proptest::prelude::*;

const EPS: f64 = 1e-6;

fn inside(bar: &Bar, width: f64, height: f64) -> bool {
    [bar.start, bar.end].iter().all(|p| {
        p.x >= -EPS && p.x <= width + EPS && p.y >= -EPS && p.y <= height + EPS
    })
}

fn sequential(bars: &[Bar]) -> bool {
    bars.iter().enumerate().all(|(i, b)| b.id == i + 1)
}

proptest! {
    #[test]
    fn grid_bar_count_and_bounds(
        width in 100.0f64..3000.0, height in 100.0f64..3000.0,
        rows in 1usize..8, cols in 1usize..8,
    ) {
        let bars = grid(width, height, rows, cols, 26.0).unwrap();
        prop_assert_eq!(bars.len(), (cols - 1) + (rows - 1) * cols);
        prop_assert!(sequential(&bars));
        prop_assert!(bars.iter().all(|b| inside(b, width, height)));

        let transposed = grid_horizontal_master(width, height, rows, cols, 26.0).unwrap();
        prop_assert_eq!(transposed.len(), (rows - 1) + (cols - 1) * rows);
    }

    #[test]
    fn rays_stay_inside_the_opening(
        width in 100.0f64..3000.0, height in 100.0f64..3000.0, rays in 1usize..24,
    ) {
        for bars in [
            sunburst(width, height, 26.0, rays).unwrap(),
            web(width, height, 26.0, rays).unwrap(),
        ] {
            prop_assert!(sequential(&bars));
            prop_assert!(bars.iter().all(|b| inside(b, width, height)));
            prop_assert!(bars.iter().all(|b| b.length() > 0.0));
        }
    }

    #[test]
    fn trapezoid_verticals_meet_both_edges(
        verticals in 1usize..10, top_scale in 0.05f64..=1.0,
    ) {
        let bars = trapezoid(1000.0, 800.0, 26.0, verticals, top_scale).unwrap();
        prop_assert_eq!(bars.len(), verticals + 1);
        for bar in &bars[..verticals] {
            prop_assert!(bar.start.y.abs() < EPS);
            prop_assert!((bar.end.y - 800.0).abs() < EPS);
        }
    }

    #[test]
    fn every_layout_is_valid_input(width in 200.0f64..2500.0, height in 200.0f64..2500.0) {
        let layouts = [
            Layout::Grid { rows: 3, cols: 4, horizontal_master: false },
            Layout::Cross,
            Layout::Diamond,
            Layout::Sunburst { rays: 5 },
            Layout::Web { rays: 8 },
            Layout::Gothic,
            Layout::Trapezoid { verticals: 3, top_scale: 0.6 },
        ];
        for layout in &layouts {
            let bars = layout.generate(width, height, 26.0).unwrap();
            prop_assert!(muntinkit_core::validate_bars(&bars).is_ok(), "{}", layout.name());
        }
    }
}

//! Generated layouts run through the cutting tools

use muntinkit_camtools::{compute_cut_list, sequence_assembly, CutItem, CutListParams};
use muntinkit_designer::{diamond, grid, grid_horizontal_master, GlassDimensions, Layout};

#[test]
fn test_grid_three_by_three_cut_list() {
    let bars = grid(1000.0, 1000.0, 3, 3, 26.0).unwrap();
    let items = compute_cut_list(&bars, 1000.0, 1000.0, &CutListParams::default()).unwrap();
    assert_eq!(
        items,
        vec![
            CutItem::new(998.0, 90.0, 90.0, 2),
            CutItem::new(318.3, 90.0, 90.0, 4),
            CutItem::new(305.3, 90.0, 90.0, 2)
        ]
    );
}

#[test]
fn test_horizontal_master_is_the_transpose() {
    let bars = grid_horizontal_master(1000.0, 1000.0, 3, 3, 26.0).unwrap();
    let items = compute_cut_list(&bars, 1000.0, 1000.0, &CutListParams::default()).unwrap();
    let counts: Vec<(f64, usize)> = items.iter().map(|i| (i.length, i.count)).collect();
    assert_eq!(counts, vec![(998.0, 2), (318.3, 4), (305.3, 2)]);
}

#[test]
fn test_glass_opening_feeds_grid() {
    let glass = GlassDimensions::from_frame(1300.0, 900.0, 30.0, 20.0);
    let bars = grid(glass.width, glass.height, 2, 2, 26.0).unwrap();
    let items = compute_cut_list(&bars, glass.width, glass.height, &CutListParams::default()).unwrap();
    assert_eq!(
        items,
        vec![
            CutItem::new(798.0, 90.0, 90.0, 1),
            CutItem::new(585.0, 90.0, 90.0, 2)
        ]
    );
}

#[test]
fn test_diamond_assembly_uses_preset() {
    let layout = Layout::Diamond;
    let bars = diamond(1000.0, 800.0, 26.0).unwrap();
    let steps = sequence_assembly(&bars, 1000.0, 800.0, layout.assembly_preset()).unwrap();
    let order: Vec<usize> = steps.iter().map(|s| s.bar_id).collect();
    assert_eq!(order, vec![1, 2, 3, 4]);
    assert_eq!(steps[0].description, "Top-Right");
}

#[test]
fn test_layout_from_job_json() {
    let layout: Layout =
        serde_json::from_str(r#"{"layout": "trapezoid", "verticals": 5}"#).unwrap();
    assert_eq!(
        layout,
        Layout::Trapezoid {
            verticals: 5,
            top_scale: 0.6
        }
    );

    let layout: Layout = serde_json::from_str(r#"{"layout": "grid", "rows": 2, "cols": 4}"#).unwrap();
    let bars = layout.generate(1200.0, 800.0, 26.0).unwrap();
    assert_eq!(bars.len(), 3 + 4);
}

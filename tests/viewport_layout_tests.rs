use stock_chart::core::{
    BarLayout, RecenterTarget, ScaleLevel, ViewportAnchor, VisibleRange, ZoomPivot,
    resolve_visible_range,
};

const CANVAS_WIDTH: f64 = 800.0;

fn default_scale() -> ScaleLevel {
    ScaleLevel::clamped(4)
}

fn resolved_layout(anchor: &mut ViewportAnchor, scale: ScaleLevel, count: usize) -> BarLayout {
    let range = resolve_visible_range(anchor, scale, count).expect("non-empty store");
    BarLayout::build(anchor, range, scale)
}

#[test]
fn three_bars_fit_and_first_bar_resolves_from_its_middle() {
    let scale = default_scale();
    let mut anchor = ViewportAnchor::new(CANVAS_WIDTH, scale);

    let range = resolve_visible_range(&mut anchor, scale, 3).expect("range");
    assert_eq!(range, VisibleRange::new(0, 2));
    assert_eq!(anchor.bar_index(), Some(2));

    let layout = BarLayout::build(&anchor, range, scale);
    assert_eq!(layout.len(), 3);
    let first = layout.positions()[0];
    assert_eq!(first.index, 0);
    assert!((first.left - 770.0).abs() <= 1e-9);
    assert!((first.middle - 774.5).abs() <= 1e-9);
    assert_eq!(layout.locate(first.middle).map(|bar| bar.index), Some(0));
}

#[test]
fn empty_store_leaves_anchor_unresolved() {
    let scale = default_scale();
    let mut anchor = ViewportAnchor::new(CANVAS_WIDTH, scale);
    assert_eq!(resolve_visible_range(&mut anchor, scale, 0), None);
    assert!(!anchor.is_anchored());
}

#[test]
fn long_series_fills_canvas_with_whole_cells() {
    let scale = default_scale();
    let mut anchor = ViewportAnchor::new(CANVAS_WIDTH, scale);
    let range = resolve_visible_range(&mut anchor, scale, 200).expect("range");

    assert_eq!(range, VisibleRange::new(120, 199));
    assert_eq!(range.bar_count(), 80);
}

#[test]
fn stale_anchor_index_is_pulled_back_to_newest_bar() {
    let scale = default_scale();
    let mut anchor = ViewportAnchor::new(CANVAS_WIDTH, scale);
    anchor.recenter(
        RecenterTarget::Bar {
            index: 50,
            center: 400.0,
        },
        scale,
    );

    let range = resolve_visible_range(&mut anchor, scale, 10).expect("range");
    assert_eq!(anchor.bar_index(), Some(9));
    assert_eq!(range.right_most_bar_index, 9);
}

#[test]
fn recentered_anchor_splits_range_around_itself() {
    let scale = default_scale();
    let mut anchor = ViewportAnchor::new(CANVAS_WIDTH, scale);
    anchor.recenter(
        RecenterTarget::Bar {
            index: 50,
            center: 400.0,
        },
        scale,
    );
    assert_eq!(anchor.left_boundary(), 395.0);
    assert_eq!(anchor.right_boundary(), 405.0);

    let range = resolve_visible_range(&mut anchor, scale, 100).expect("range");
    assert_eq!(range, VisibleRange::new(10, 90));
}

#[test]
fn layout_cells_are_contiguous_and_anchor_cell_is_exact() {
    let scale = default_scale();
    let mut anchor = ViewportAnchor::new(CANVAS_WIDTH, scale);
    anchor.recenter(
        RecenterTarget::Bar {
            index: 50,
            center: 400.0,
        },
        scale,
    );
    let layout = resolved_layout(&mut anchor, scale, 100);

    for pair in layout.positions().windows(2) {
        assert_eq!(pair[0].index + 1, pair[1].index);
        assert!((pair[0].right - pair[1].left).abs() <= 1e-9);
    }
    let anchored = layout
        .positions()
        .iter()
        .find(|bar| bar.index == 50)
        .expect("anchor bar laid out");
    assert_eq!(anchored.left, anchor.left_boundary());
    assert_eq!(anchored.right, anchor.right_boundary());
}

#[test]
fn locate_misses_unfilled_margin_and_canvas_edge() {
    let scale = default_scale();
    let mut anchor = ViewportAnchor::new(CANVAS_WIDTH, scale);
    let layout = resolved_layout(&mut anchor, scale, 3);

    assert!(layout.locate(100.0).is_none());
    assert!(layout.locate(769.9).is_none());
    assert_eq!(layout.locate(770.0).map(|bar| bar.index), Some(0));
    assert_eq!(layout.locate(799.9).map(|bar| bar.index), Some(2));
    assert!(layout.locate(800.0).is_none());
}

#[test]
fn pan_with_focused_bar_moves_that_bar_by_delta() {
    let scale = default_scale();
    let mut anchor = ViewportAnchor::new(CANVAS_WIDTH, scale);
    let layout = resolved_layout(&mut anchor, scale, 200);
    let focused = *layout.locate(400.5).expect("bar under pointer");
    assert_eq!(focused.index, 160);

    anchor.pan(25.0, Some(&focused), scale);
    assert_eq!(anchor.bar_index(), Some(160));
    assert_eq!(anchor.left_boundary(), focused.left + 25.0);

    let layout = resolved_layout(&mut anchor, scale, 200);
    assert_eq!(
        layout.locate(focused.middle + 25.0).map(|bar| bar.index),
        Some(160)
    );
}

#[test]
fn pan_without_focus_shifts_anchor_and_saturates_at_edges() {
    let scale = default_scale();
    let mut anchor = ViewportAnchor::new(CANVAS_WIDTH, scale);
    resolve_visible_range(&mut anchor, scale, 200);

    anchor.pan(-100.0, None, scale);
    assert_eq!(anchor.middle(), 695.0);
    assert_eq!(anchor.bar_index(), Some(199));

    anchor.pan(500.0, None, scale);
    assert_eq!(anchor.middle(), 795.0);
    assert_eq!(anchor.right_boundary(), CANVAS_WIDTH);

    anchor.pan(-5_000.0, None, scale);
    assert_eq!(anchor.left_boundary(), 0.0);
    assert_eq!(anchor.middle(), 5.0);
}

#[test]
fn zoom_pivots_follow_pointer_anchor_or_right_edge() {
    let scale = default_scale();
    let wide = ScaleLevel::MAX;
    let recentered = |anchor: &mut ViewportAnchor| {
        anchor.recenter(
            RecenterTarget::Bar {
                index: 50,
                center: 400.0,
            },
            scale,
        );
    };

    let mut anchor = ViewportAnchor::new(CANVAS_WIDTH, scale);
    recentered(&mut anchor);
    anchor.zoom(wide, ZoomPivot::Anchor);
    assert_eq!(anchor.middle(), 400.0);
    assert_eq!(anchor.left_boundary(), 382.0);
    assert_eq!(anchor.right_boundary(), 418.0);
    assert_eq!(anchor.bar_index(), Some(50));

    let mut anchor = ViewportAnchor::new(CANVAS_WIDTH, scale);
    recentered(&mut anchor);
    anchor.zoom(wide, ZoomPivot::RightEdge);
    assert_eq!(anchor.left_boundary(), 764.0);
    assert_eq!(anchor.right_boundary(), CANVAS_WIDTH);
    assert_eq!(anchor.bar_index(), Some(50));

    let mut anchor = ViewportAnchor::new(CANVAS_WIDTH, scale);
    recentered(&mut anchor);
    let layout = resolved_layout(&mut anchor, scale, 100);
    let focused = *layout.locate(300.0).expect("bar under pointer");
    anchor.zoom(wide, ZoomPivot::Bar(focused));
    assert_eq!(anchor.bar_index(), Some(focused.index));
    assert_eq!(anchor.middle(), (focused.middle + 0.5).floor());
}

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use stock_chart::api::{ChartEngine, ChartEngineConfig};
use stock_chart::core::{
    BarLayout, PointerPosition, Quote, QuoteStore, RecenterTarget, ScaleLevel, Tick,
    ViewportAnchor, resolve_visible_range,
};
use stock_chart::render::NullRenderer;

fn quotes(count: usize) -> Vec<Quote> {
    let timestamp = Utc
        .timestamp_opt(1_700_000_000, 0)
        .single()
        .expect("valid timestamp");
    (0..count)
        .map(|i| {
            let open = 100.0 + ((i * 7) % 23) as f64;
            let close = if i % 3 == 0 { open - 1.25 } else { open + 0.75 };
            Quote::new(
                open,
                open.max(close) + 0.5,
                open.min(close) - 0.5,
                close,
                timestamp,
            )
            .expect("valid quote")
        })
        .collect()
}

fn engine_with_quotes(count: usize, level: i64) -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::default().with_initial_scale(ScaleLevel::clamped(level));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_quotes(quotes(count)).expect("set quotes");
    engine
}

proptest! {
    #[test]
    fn every_laid_out_bar_resolves_from_its_middle(
        count in 1usize..600,
        level in 0i64..14,
        center in 0.0f64..800.0,
        anchor_ratio in 0.0f64..1.0
    ) {
        let scale = ScaleLevel::clamped(level);
        let mut anchor = ViewportAnchor::new(800.0, scale);
        let index = ((count - 1) as f64 * anchor_ratio) as usize;
        anchor.recenter(RecenterTarget::Bar { index, center: center.round() }, scale);

        let range = resolve_visible_range(&mut anchor, scale, count).expect("range");
        let layout = BarLayout::build(&anchor, range, scale);
        prop_assert_eq!(layout.len(), range.bar_count());

        for bar in layout.positions() {
            prop_assert_eq!(layout.locate(bar.middle).map(|hit| hit.index), Some(bar.index));
            prop_assert_eq!(layout.locate(bar.left).map(|hit| hit.index), Some(bar.index));
        }
        let first = layout.positions()[0];
        let last = layout.positions()[layout.len() - 1];
        prop_assert!(layout.locate(first.left - 0.25).is_none());
        prop_assert!(layout.locate(last.right).is_none());
    }

    #[test]
    fn visible_range_stays_inside_store(
        count in 1usize..500,
        level in 0i64..14,
        deltas in prop::collection::vec(-400.0f64..400.0, 0..8),
        pointer_x in 0.0f64..800.0
    ) {
        let mut engine = engine_with_quotes(count, level);
        for (step, delta) in deltas.into_iter().enumerate() {
            let pointer = (step % 2 == 0).then(|| PointerPosition::new(pointer_x, 10.0));
            engine.pan(delta, pointer).expect("pan");

            let range = engine.current_visible_range().expect("range");
            prop_assert!(range.left_most_bar_index <= range.right_most_bar_index);
            prop_assert!(range.right_most_bar_index < count);

            let anchor = engine.anchor();
            prop_assert!(anchor.left_boundary() >= 0.0);
            prop_assert!(anchor.right_boundary() <= 800.0);
            prop_assert!(anchor.left_boundary() <= anchor.middle());
            prop_assert!(anchor.middle() <= anchor.right_boundary());
        }
    }

    #[test]
    fn zoom_keeps_hovered_bar_under_cursor(
        from_level in 0i64..14,
        to_level in 0i64..14,
        pointer_x in 40.0f64..760.0
    ) {
        let mut engine = engine_with_quotes(500, from_level);
        let pointer = PointerPosition::new(pointer_x, 100.0);
        let hovered = engine.locate_bar_at(pointer_x).expect("canvas is filled");

        engine.zoom_to(to_level, Some(pointer)).expect("zoom");

        prop_assert_eq!(
            engine.locate_bar_at(hovered.middle).map(|bar| bar.index),
            Some(hovered.index)
        );
    }

    #[test]
    fn unfocused_pans_compose(
        start in 200.0f64..600.0,
        d1 in -150.0f64..150.0,
        d2 in -150.0f64..150.0
    ) {
        let scale = ScaleLevel::default();
        let target = RecenterTarget::Bar { index: 100, center: start };

        let mut twice = ViewportAnchor::new(800.0, scale);
        twice.recenter(target, scale);
        twice.pan(d1, None, scale);
        twice.pan(d2, None, scale);

        let mut once = ViewportAnchor::new(800.0, scale);
        once.recenter(target, scale);
        once.pan(d1 + d2, None, scale);

        prop_assert!((twice.middle() - once.middle()).abs() <= 1e-9);
        prop_assert!((twice.left_boundary() - once.left_boundary()).abs() <= 1e-9);
        prop_assert_eq!(twice.bar_index(), once.bar_index());
    }

    #[test]
    fn merged_ticks_stay_inside_bar_extremes(
        values in prop::collection::vec(-1_000.0f64..1_000.0, 1..32)
    ) {
        let mut store = QuoteStore::new();
        store.set_all(quotes(3));
        for value in values {
            store.merge_tick(Tick::price(value), None).expect("merge");
            let last = *store.last().expect("last quote");
            prop_assert!(last.high >= value);
            prop_assert!(last.low <= value);
            prop_assert_eq!(last.close, value);
            prop_assert!(last.high >= last.low);
        }
    }
}

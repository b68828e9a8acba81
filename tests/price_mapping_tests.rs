use approx::{assert_abs_diff_eq, assert_relative_eq};
use chrono::{TimeZone, Utc};
use stock_chart::ChartError;
use stock_chart::core::{
    BarLayout, PriceMapping, Quote, ScaleLevel, ViewportAnchor, Viewport, VisibleRange,
    project_candles, resolve_visible_range,
};

fn quote(open: f64, high: f64, low: f64, close: f64) -> Quote {
    let timestamp = Utc
        .timestamp_opt(1_700_000_000, 0)
        .single()
        .expect("valid timestamp");
    Quote::new(open, high, low, close, timestamp).expect("valid quote")
}

fn scenario_quotes() -> Vec<Quote> {
    vec![
        quote(10.0, 12.0, 9.0, 11.0),
        quote(11.0, 13.0, 10.0, 12.0),
        quote(12.0, 14.0, 11.0, 13.0),
    ]
}

#[test]
fn padding_is_symmetric_around_visible_extremes() {
    let mapping = PriceMapping::from_visible(
        &scenario_quotes(),
        VisibleRange::new(0, 2),
        Viewport::new(800, 550),
        0.1,
    )
    .expect("mapping");

    assert_relative_eq!(mapping.top_value(), 14.5);
    assert_relative_eq!(mapping.bottom_value(), 8.5);
    assert_relative_eq!(mapping.pixels_per_unit(), 550.0 / 6.0);
    assert_abs_diff_eq!(mapping.price_to_pixel(14.5), 0.0);
    assert_abs_diff_eq!(mapping.price_to_pixel(8.5), 550.0, epsilon = 1e-9);
    assert_abs_diff_eq!(mapping.pixel_to_price(275.0), 11.5, epsilon = 1e-9);
}

#[test]
fn extremes_only_consider_visible_bars() {
    let mut quotes = scenario_quotes();
    quotes.insert(0, quote(100.0, 200.0, 50.0, 150.0));

    let mapping = PriceMapping::from_visible(
        &quotes,
        VisibleRange::new(1, 3),
        Viewport::new(800, 550),
        0.1,
    )
    .expect("mapping");
    assert_relative_eq!(mapping.top_value(), 14.5);
}

#[test]
fn flat_range_keeps_finite_scale() {
    let quotes = vec![quote(42.0, 42.0, 42.0, 42.0); 5];
    let mapping = PriceMapping::from_visible(
        &quotes,
        VisibleRange::new(0, 4),
        Viewport::new(800, 550),
        0.1,
    )
    .expect("mapping");

    assert!(mapping.pixels_per_unit().is_finite());
    assert!(mapping.top_value() > 42.0);
    assert!(mapping.bottom_value() < 42.0);
    assert_abs_diff_eq!(mapping.price_to_pixel(42.0), 275.0, epsilon = 1e-6);
}

#[test]
fn out_of_bounds_range_is_rejected() {
    let err = PriceMapping::from_visible(
        &scenario_quotes(),
        VisibleRange::new(0, 5),
        Viewport::new(800, 550),
        0.1,
    )
    .expect_err("range exceeds store");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn grid_levels_step_down_from_top_and_stop_above_bottom() {
    let mapping = PriceMapping::from_visible(
        &scenario_quotes(),
        VisibleRange::new(0, 2),
        Viewport::new(800, 550),
        0.1,
    )
    .expect("mapping");
    let levels = mapping.grid_levels(40.0);

    assert_eq!(levels.len(), 13);
    assert_abs_diff_eq!(levels[0].price, 14.5 - 240.0 / 550.0, epsilon = 1e-9);
    assert_abs_diff_eq!(levels[0].y, 40.0, epsilon = 0.5 + 1e-9);
    for level in &levels {
        assert!(level.price - mapping.bottom_value() > 0.001);
        assert_eq!(level.y.fract(), 0.5);
    }
}

#[test]
fn projected_candles_classify_direction_and_nest_body_in_wick() {
    let scale = ScaleLevel::clamped(4);
    let mut quotes = scenario_quotes();
    quotes.push(quote(13.0, 13.5, 11.5, 12.0));
    let mut anchor = ViewportAnchor::new(800.0, scale);
    let range = resolve_visible_range(&mut anchor, scale, quotes.len()).expect("range");
    let layout = BarLayout::build(&anchor, range, scale);
    let mapping =
        PriceMapping::from_visible(&quotes, range, Viewport::new(800, 550), 0.1).expect("mapping");

    let candles = project_candles(&quotes, &layout, &mapping, scale);
    assert_eq!(candles.len(), 4);
    assert!(candles[..3].iter().all(|candle| candle.is_bullish));
    assert!(!candles[3].is_bullish);

    let body = scale.body();
    for (candle, position) in candles.iter().zip(layout.positions()) {
        assert_eq!(candle.index, position.index);
        assert_relative_eq!(candle.body_left, position.left + body.left);
        assert_relative_eq!(candle.wick_x, position.left + body.wick_offset);
        assert_relative_eq!(candle.body_width, body.width);
        assert!(candle.wick_top <= candle.body_top);
        assert!(candle.body_bottom() <= candle.wick_bottom + 1e-9);
    }

    let bearish = candles[3];
    assert_abs_diff_eq!(bearish.body_top, mapping.price_to_pixel(13.0), epsilon = 1e-9);
    assert_abs_diff_eq!(
        bearish.body_height,
        mapping.pixels_per_unit(),
        epsilon = 1e-9
    );
}

#[test]
fn huge_finite_extremes_keep_mapping_finite() {
    let quotes = vec![quote(1.0, 1.7e308, 0.0, 1.0), quote(1.0, 2.0, 0.5, 1.5)];
    let mapping = PriceMapping::from_visible(
        &quotes,
        VisibleRange::new(0, 1),
        Viewport::new(800, 550),
        0.1,
    )
    .expect("mapping");

    assert!(mapping.top_value().is_finite());
    assert!(mapping.bottom_value().is_finite());
    assert!(mapping.pixels_per_unit() > 0.0);
    assert!(mapping.price_to_pixel(1.0).is_finite());
    assert!(mapping.price_to_pixel(1.7e308) >= 0.0);
    assert!(mapping.price_to_pixel(0.0) <= 550.0);
    assert!(
        mapping
            .grid_levels(40.0)
            .iter()
            .all(|level| level.price.is_finite() && level.y.is_finite())
    );
}

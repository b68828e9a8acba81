use serde::{Deserialize, Serialize};

use crate::core::{BarLayout, Quote, ScaleLevel, Viewport, VisibleRange};
use crate::error::{ChartError, ChartResult};

/// Extra price range added above the highest high, as a fraction of the spread.
pub const DEFAULT_PRICE_PADDING_RATIO: f64 = 0.1;

/// Spread used when every visible price is equal, relative to the price level.
const FLAT_SPREAD_RATIO: f64 = 0.01;
/// Absolute floor for the flat-range spread (prices at or near zero).
const MIN_PRICE_SPREAD: f64 = 1e-6;
/// Grid lines stop once they are this close to the bottom value.
const GRID_BOTTOM_EPSILON: f64 = 0.001;

/// Linear price-to-pixel mapping for one frame.
///
/// Y grows downward: `top_value` maps to `0` and `bottom_value` to the canvas
/// height. Recomputed whenever the visible range, scale or prices change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceMapping {
    top_value: f64,
    bottom_value: f64,
    pixels_per_unit: f64,
    height_px: f64,
}

impl PriceMapping {
    /// Scans the visible bars for their extremes and pads them symmetrically.
    pub fn from_visible(
        quotes: &[Quote],
        range: VisibleRange,
        viewport: Viewport,
        padding_ratio: f64,
    ) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if !padding_ratio.is_finite() || padding_ratio < 0.0 {
            return Err(ChartError::InvalidData(
                "price padding ratio must be finite and >= 0".to_owned(),
            ));
        }
        let visible = quotes
            .get(range.left_most_bar_index..=range.right_most_bar_index)
            .ok_or_else(|| {
                ChartError::InvalidData(format!(
                    "visible range {}..={} exceeds {} quotes",
                    range.left_most_bar_index,
                    range.right_most_bar_index,
                    quotes.len()
                ))
            })?;
        if visible.is_empty() {
            return Err(ChartError::InvalidData(
                "price mapping needs at least one visible quote".to_owned(),
            ));
        }

        let (min_low, max_high) = visible.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min_low, max_high), quote| (min_low.min(quote.low), max_high.max(quote.high)),
        );

        Ok(Self::from_extremes(
            min_low,
            max_high,
            viewport.height_px(),
            padding_ratio,
        ))
    }

    fn from_extremes(min_low: f64, max_high: f64, height_px: f64, padding_ratio: f64) -> Self {
        // Spans are kept as halves so extremes near `f64::MAX` stay finite.
        let half_spread = max_high * 0.5 - min_low * 0.5;
        let (top_value, bottom_value) = if half_spread > 0.0 {
            let padding = half_spread * padding_ratio * 2.0;
            (max_high + padding, min_low - padding)
        } else {
            let half = (max_high.abs() * FLAT_SPREAD_RATIO).max(MIN_PRICE_SPREAD)
                * (0.5 + padding_ratio);
            (max_high + half, max_high - half)
        };
        let top_value = top_value.min(f64::MAX);
        let bottom_value = bottom_value.max(f64::MIN);
        let half_span = (top_value * 0.5 - bottom_value * 0.5).max(MIN_PRICE_SPREAD * 0.5);

        Self {
            top_value,
            bottom_value,
            pixels_per_unit: height_px * 0.5 / half_span,
            height_px,
        }
    }

    #[must_use]
    pub fn top_value(&self) -> f64 {
        self.top_value
    }

    #[must_use]
    pub fn bottom_value(&self) -> f64 {
        self.bottom_value
    }

    #[must_use]
    pub fn pixels_per_unit(&self) -> f64 {
        self.pixels_per_unit
    }

    #[must_use]
    pub fn height_px(&self) -> f64 {
        self.height_px
    }

    #[must_use]
    pub fn price_to_pixel(&self, price: f64) -> f64 {
        (self.top_value * 0.5 - price * 0.5) * (self.pixels_per_unit * 2.0)
    }

    #[must_use]
    pub fn pixel_to_price(&self, y: f64) -> f64 {
        ((self.top_value * 0.5 - y * 0.5 / self.pixels_per_unit) * 2.0).clamp(f64::MIN, f64::MAX)
    }

    /// Horizontal grid levels every `step_px` pixels below the top edge.
    #[must_use]
    pub fn grid_levels(&self, step_px: f64) -> Vec<PriceGridLevel> {
        if !step_px.is_finite() || step_px <= 0.0 {
            return Vec::new();
        }
        let half_step = step_px * 0.5 / self.pixels_per_unit;
        let half_bottom = self.bottom_value * 0.5;
        let max_levels = (self.height_px / step_px).ceil() as usize + 1;

        let mut levels = Vec::new();
        let mut half_price = self.top_value * 0.5 - half_step;
        while half_price - half_bottom > GRID_BOTTOM_EPSILON * 0.5 && levels.len() < max_levels {
            let price = half_price * 2.0;
            levels.push(PriceGridLevel {
                price,
                y: self.price_to_pixel(price).floor() + 0.5,
            });
            half_price -= half_step;
        }
        levels
    }
}

/// One horizontal grid line and the price it labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceGridLevel {
    pub price: f64,
    pub y: f64,
}

/// Candle geometry in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleGeometry {
    pub index: usize,
    pub body_left: f64,
    pub body_width: f64,
    pub body_top: f64,
    pub body_height: f64,
    pub wick_x: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub is_bullish: bool,
}

impl CandleGeometry {
    #[must_use]
    pub fn body_bottom(&self) -> f64 {
        self.body_top + self.body_height
    }
}

/// Projects every laid-out bar into candle geometry.
///
/// Pure: the output depends only on the arguments.
#[must_use]
pub fn project_candles(
    quotes: &[Quote],
    layout: &BarLayout,
    mapping: &PriceMapping,
    scale: ScaleLevel,
) -> Vec<CandleGeometry> {
    let body = scale.body();
    layout
        .positions()
        .iter()
        .filter_map(|position| {
            let quote = quotes.get(position.index)?;
            let is_bullish = quote.is_bullish();
            let (body_high, body_low) = if is_bullish {
                (quote.close, quote.open)
            } else {
                (quote.open, quote.close)
            };

            Some(CandleGeometry {
                index: position.index,
                body_left: position.left + body.left,
                body_width: body.width,
                body_top: mapping.price_to_pixel(body_high),
                body_height: mapping.price_to_pixel(body_low) - mapping.price_to_pixel(body_high),
                wick_x: position.left + body.wick_offset,
                wick_top: mapping.price_to_pixel(quote.high),
                wick_bottom: mapping.price_to_pixel(quote.low),
                is_bullish,
            })
        })
        .collect()
}

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Colors and font sizes used when building a render frame.
///
/// Defaults follow the light scheme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Body fill of candles with `close >= open`.
    pub bullish_bar_color: Color,
    /// Body fill of candles with `open > close`.
    pub bearish_bar_color: Color,
    pub bar_border_color: Color,
    pub grid_line_color: Color,
    pub axis_stroke_color: Color,
    pub axis_text_color: Color,
    pub symbol_text_color: Color,
    pub symbol_font_size_px: f64,
    pub price_axis_font_size_px: f64,
    pub time_axis_font_size_px: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            bullish_bar_color: Color::rgb8(0x55, 0x97, 0x6E),
            bearish_bar_color: Color::rgb8(0xCE, 0x3D, 0x2F),
            bar_border_color: Color::rgb8(0x33, 0x33, 0x33),
            grid_line_color: Color::rgb8(0xEE, 0xEE, 0xEE),
            axis_stroke_color: Color::rgb8(0xEE, 0xEE, 0xEE),
            axis_text_color: Color::rgb8(0x33, 0x33, 0x33),
            symbol_text_color: Color::rgb8(0x33, 0x33, 0x33),
            symbol_font_size_px: 16.0,
            price_axis_font_size_px: 14.0,
            time_axis_font_size_px: 12.0,
        }
    }
}

impl RenderStyle {
    /// Body color for a candle of the given direction.
    #[must_use]
    pub fn bar_color(&self, is_bullish: bool) -> Color {
        if is_bullish {
            self.bullish_bar_color
        } else {
            self.bearish_bar_color
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        for color in [
            self.bullish_bar_color,
            self.bearish_bar_color,
            self.bar_border_color,
            self.grid_line_color,
            self.axis_stroke_color,
            self.axis_text_color,
            self.symbol_text_color,
        ] {
            color.validate()?;
        }
        for (name, size) in [
            ("symbol", self.symbol_font_size_px),
            ("price axis", self.price_axis_font_size_px),
            ("time axis", self.time_axis_font_size_px),
        ] {
            if !size.is_finite() || size <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} font size must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_PRICE_PADDING_RATIO, ScaleLevel, Viewport, max_cell_width};
use crate::error::{ChartError, ChartResult};

use super::RenderStyle;

/// Public chart session bootstrap configuration.
///
/// Serializable so hosts can persist chart setup as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    /// Plot canvas size, excluding the price and time axis panels.
    pub viewport: Viewport,
    #[serde(default)]
    pub initial_scale: ScaleLevel,
    /// Drawn at the top-left of the canvas when not empty.
    #[serde(default)]
    pub symbol_name: String,
    #[serde(default = "default_price_padding_ratio")]
    pub price_padding_ratio: f64,
    #[serde(default = "default_price_grid_step_px")]
    pub price_grid_step_px: f64,
    #[serde(default = "default_time_label_step_px")]
    pub time_label_step_px: f64,
    #[serde(default = "default_price_axis_width_px")]
    pub price_axis_width_px: u32,
    #[serde(default = "default_time_axis_height_px")]
    pub time_axis_height_px: u32,
    #[serde(default = "default_price_decimals")]
    pub price_decimals: u8,
    /// `chrono` strftime pattern for time axis labels (UTC).
    #[serde(default = "default_time_label_format")]
    pub time_label_format: String,
    #[serde(default)]
    pub render_style: RenderStyle,
}

impl Default for ChartEngineConfig {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl ChartEngineConfig {
    /// Creates a config with default axes and styling.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            initial_scale: ScaleLevel::default(),
            symbol_name: String::new(),
            price_padding_ratio: default_price_padding_ratio(),
            price_grid_step_px: default_price_grid_step_px(),
            time_label_step_px: default_time_label_step_px(),
            price_axis_width_px: default_price_axis_width_px(),
            time_axis_height_px: default_time_axis_height_px(),
            price_decimals: default_price_decimals(),
            time_label_format: default_time_label_format(),
            render_style: RenderStyle::default(),
        }
    }

    #[must_use]
    pub fn with_initial_scale(mut self, scale: ScaleLevel) -> Self {
        self.initial_scale = scale;
        self
    }

    #[must_use]
    pub fn with_symbol_name(mut self, symbol_name: impl Into<String>) -> Self {
        self.symbol_name = symbol_name.into();
        self
    }

    #[must_use]
    pub fn with_price_padding_ratio(mut self, ratio: f64) -> Self {
        self.price_padding_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_price_grid_step_px(mut self, step_px: f64) -> Self {
        self.price_grid_step_px = step_px;
        self
    }

    #[must_use]
    pub fn with_time_label_step_px(mut self, step_px: f64) -> Self {
        self.time_label_step_px = step_px;
        self
    }

    #[must_use]
    pub fn with_axis_panels(mut self, price_axis_width_px: u32, time_axis_height_px: u32) -> Self {
        self.price_axis_width_px = price_axis_width_px;
        self.time_axis_height_px = time_axis_height_px;
        self
    }

    #[must_use]
    pub fn with_price_decimals(mut self, decimals: u8) -> Self {
        self.price_decimals = decimals;
        self
    }

    #[must_use]
    pub fn with_time_label_format(mut self, format: impl Into<String>) -> Self {
        self.time_label_format = format.into();
        self
    }

    #[must_use]
    pub fn with_render_style(mut self, style: RenderStyle) -> Self {
        self.render_style = style;
        self
    }

    /// Full drawing surface: canvas plus price axis (right) and time axis (below).
    #[must_use]
    pub fn surface(&self) -> Viewport {
        Viewport::new(
            self.viewport.width.saturating_add(self.price_axis_width_px),
            self.viewport.height.saturating_add(self.time_axis_height_px),
        )
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() || self.viewport.width_px() < max_cell_width() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.price_padding_ratio.is_finite() || self.price_padding_ratio < 0.0 {
            return Err(ChartError::InvalidData(
                "price padding ratio must be finite and >= 0".to_owned(),
            ));
        }
        for (name, step) in [
            ("price grid step", self.price_grid_step_px),
            ("time label step", self.time_label_step_px),
        ] {
            if !step.is_finite() || step <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if StrftimeItems::new(&self.time_label_format).any(|item| matches!(item, Item::Error)) {
            return Err(ChartError::InvalidData(format!(
                "time label format `{}` is not a valid strftime pattern",
                self.time_label_format
            )));
        }
        self.render_style.validate()
    }
}

fn default_price_padding_ratio() -> f64 {
    DEFAULT_PRICE_PADDING_RATIO
}

fn default_price_grid_step_px() -> f64 {
    40.0
}

fn default_time_label_step_px() -> f64 {
    80.0
}

fn default_price_axis_width_px() -> u32 {
    60
}

fn default_time_axis_height_px() -> u32 {
    95
}

fn default_price_decimals() -> u8 {
    4
}

fn default_time_label_format() -> String {
    "%d.%m.%Y %H:%M".to_owned()
}

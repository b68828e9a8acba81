use std::f64::consts::FRAC_PI_2;
use std::fmt::Write as _;

use crate::core::{BarLayout, PriceMapping, project_candles};
use crate::render::{LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive};

use super::ChartEngine;

const AXIS_TICK_LENGTH_PX: f64 = 3.0;
const AXIS_TEXT_INDENT_PX: f64 = 5.0;
const TIME_LABEL_OFFSET_PX: f64 = 4.0;
const SYMBOL_OFFSET_PX: f64 = 5.0;
const STROKE_WIDTH_PX: f64 = 1.0;

impl<R: Renderer> ChartEngine<R> {
    /// Materializes one frame from the laid-out bars and price mapping.
    ///
    /// The plot canvas sits at the origin; the price axis occupies the strip
    /// right of it and the time axis the strip below it.
    pub(super) fn build_render_frame(
        &self,
        layout: &BarLayout,
        mapping: &PriceMapping,
    ) -> RenderFrame {
        let mut frame = RenderFrame::new(self.config.surface());
        self.append_price_grid_primitives(&mut frame, mapping);
        self.append_candle_primitives(&mut frame, layout, mapping);
        self.append_time_axis_primitives(&mut frame, layout);
        self.append_symbol_primitive(&mut frame);
        frame
    }

    fn append_price_grid_primitives(&self, frame: &mut RenderFrame, mapping: &PriceMapping) {
        let style = self.config.render_style;
        let canvas_width = self.config.viewport.width_px();
        let decimals = usize::from(self.config.price_decimals);

        for level in mapping.grid_levels(self.config.price_grid_step_px) {
            frame.lines.push(LinePrimitive::new(
                0.0,
                level.y,
                canvas_width,
                level.y,
                STROKE_WIDTH_PX,
                style.grid_line_color,
            ));
            frame.lines.push(LinePrimitive::new(
                canvas_width,
                level.y,
                canvas_width + AXIS_TICK_LENGTH_PX,
                level.y,
                STROKE_WIDTH_PX,
                style.axis_stroke_color,
            ));
            frame.texts.push(TextPrimitive::new(
                format!("{:.decimals$}", level.price),
                canvas_width + AXIS_TEXT_INDENT_PX,
                level.y,
                style.price_axis_font_size_px,
                style.axis_text_color,
                TextHAlign::Left,
            ));
        }
    }

    fn append_candle_primitives(
        &self,
        frame: &mut RenderFrame,
        layout: &BarLayout,
        mapping: &PriceMapping,
    ) {
        let style = self.config.render_style;
        for candle in project_candles(self.quotes.all(), layout, mapping, self.scale) {
            frame.rects.push(
                RectPrimitive::filled(
                    candle.body_left,
                    candle.body_top,
                    candle.body_width,
                    candle.body_height,
                    style.bar_color(candle.is_bullish),
                )
                .with_stroke(style.bar_border_color, STROKE_WIDTH_PX),
            );

            // Wicks run outside the body only; zero-length segments are skipped.
            if candle.wick_top < candle.body_top {
                frame.lines.push(LinePrimitive::new(
                    candle.wick_x,
                    candle.wick_top,
                    candle.wick_x,
                    candle.body_top,
                    STROKE_WIDTH_PX,
                    style.bar_border_color,
                ));
            }
            if candle.wick_bottom > candle.body_bottom() {
                frame.lines.push(LinePrimitive::new(
                    candle.wick_x,
                    candle.body_bottom(),
                    candle.wick_x,
                    candle.wick_bottom,
                    STROKE_WIDTH_PX,
                    style.bar_border_color,
                ));
            }
        }
    }

    /// Labels every `step`-th laid-out bar, starting at the pivot slot
    /// `step - first_index % step` so labels stay attached to the same bars
    /// while panning.
    fn append_time_axis_primitives(&self, frame: &mut RenderFrame, layout: &BarLayout) {
        let positions = layout.positions();
        let Some(first) = positions.first() else {
            return;
        };
        let style = self.config.render_style;
        let canvas_height = self.config.viewport.height_px();
        let cell_width = self.scale.cell().width;
        let step = ((self.config.time_label_step_px / cell_width).floor() as usize).max(1);
        let pivot = step - first.index % step;

        for bar in positions.iter().skip(pivot).step_by(step) {
            let Some(quote) = self.quotes.get(bar.index) else {
                continue;
            };
            frame.lines.push(LinePrimitive::new(
                bar.middle,
                canvas_height,
                bar.middle,
                canvas_height + AXIS_TICK_LENGTH_PX,
                STROKE_WIDTH_PX,
                style.axis_stroke_color,
            ));

            let mut label = String::new();
            if write!(
                label,
                "{}",
                quote.timestamp.format(&self.config.time_label_format)
            )
            .is_err()
                || label.is_empty()
            {
                continue;
            }
            frame.texts.push(
                TextPrimitive::new(
                    label,
                    bar.middle + TIME_LABEL_OFFSET_PX,
                    canvas_height + AXIS_TEXT_INDENT_PX,
                    style.time_axis_font_size_px,
                    style.axis_text_color,
                    TextHAlign::Right,
                )
                .rotated(-FRAC_PI_2),
            );
        }
    }

    fn append_symbol_primitive(&self, frame: &mut RenderFrame) {
        if self.config.symbol_name.is_empty() {
            return;
        }
        let style = self.config.render_style;
        frame.texts.push(TextPrimitive::new(
            self.config.symbol_name.clone(),
            SYMBOL_OFFSET_PX,
            style.symbol_font_size_px + SYMBOL_OFFSET_PX,
            style.symbol_font_size_px,
            style.symbol_text_color,
            TextHAlign::Left,
        ));
    }
}

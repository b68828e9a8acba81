use tracing::trace;

use crate::core::PointerPosition;
use crate::core::primitives::pixel_center;
use crate::error::{ChartError, ChartResult};
use crate::extensions::PluginEvent;
use crate::interaction::{CrosshairState, DragStep, HoveredBar};
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    /// Tracks the pointer, pans while dragging and publishes the crosshair.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<()> {
        validate_pointer(x, y)?;
        if let Some(step) = self.interaction.on_pointer_move(x, y) {
            self.apply_drag_step(step, y)?;
        }
        let crosshair = self.crosshair_at(x, y);
        self.emit_plugin_event(PluginEvent::PointerMoved(crosshair));
        Ok(())
    }

    pub fn pan_start(&mut self, x: f64, y: f64) -> ChartResult<()> {
        validate_pointer(x, y)?;
        self.interaction.on_pan_start(x, y);
        trace!(x, y, "pan start");
        Ok(())
    }

    /// Ends a drag, applying any movement since the last pointer sample.
    pub fn pan_end(&mut self, x: f64, y: f64) -> ChartResult<()> {
        validate_pointer(x, y)?;
        if let Some(step) = self.interaction.on_pan_end(x, y) {
            self.apply_drag_step(step, y)?;
        }
        trace!(x, y, "pan end");
        Ok(())
    }

    /// Forgets the pointer and ends any drag in progress.
    pub fn pointer_leave(&mut self) {
        self.interaction.on_pointer_leave();
        trace!("pointer leave");
    }

    /// Wheel zoom: scrolling up (negative delta) zooms in one level,
    /// scrolling down zooms out. A zero delta is ignored.
    pub fn wheel(&mut self, delta_y: f64) -> ChartResult<()> {
        if !delta_y.is_finite() {
            return Err(ChartError::InvalidData(
                "wheel delta must be finite".to_owned(),
            ));
        }
        if delta_y < 0.0 {
            self.zoom_in()
        } else if delta_y > 0.0 {
            self.zoom_out()
        } else {
            Ok(())
        }
    }

    /// Crosshair snapshot for a pointer at `(x, y)` in the last frame.
    #[must_use]
    pub fn crosshair_at(&self, x: f64, y: f64) -> CrosshairState {
        let covered = self.locate_bar_at(x);
        let bar = covered.and_then(|position| {
            self.quotes.get(position.index).map(|quote| HoveredBar {
                index: position.index,
                quote: *quote,
            })
        });

        CrosshairState {
            x: pixel_center(covered.map_or(x, |position| position.middle)),
            y: pixel_center(y),
            price: self.frame.price_mapping.map(|mapping| mapping.pixel_to_price(y)),
            bar,
        }
    }

    // The bar under the previous drag sample is the one being dragged.
    fn apply_drag_step(&mut self, step: DragStep, y: f64) -> ChartResult<()> {
        self.pan(step.delta, Some(PointerPosition::new(step.from_x, y)))
    }
}

fn validate_pointer(x: f64, y: f64) -> ChartResult<()> {
    if !x.is_finite() || !y.is_finite() {
        return Err(ChartError::InvalidData(
            "pointer position must be finite".to_owned(),
        ));
    }
    Ok(())
}

use tracing::{debug, trace};

use crate::core::{PointerPosition, RecenterTarget, ScaleLevel, ZoomPivot};
use crate::error::{ChartError, ChartResult};
use crate::extensions::PluginEvent;
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    /// Pans the chart by `delta_px` and redraws.
    ///
    /// When `pointer` covers a bar in the last frame, that bar follows the
    /// pointer exactly; otherwise the anchor cell shifts by `delta_px`.
    /// A no-op on an empty quote store.
    pub fn pan(&mut self, delta_px: f64, pointer: Option<PointerPosition>) -> ChartResult<()> {
        if !delta_px.is_finite() {
            return Err(ChartError::InvalidData(
                "pan delta must be finite".to_owned(),
            ));
        }
        if self.quotes.is_empty() {
            return Ok(());
        }

        let focused = pointer.and_then(|pointer| self.locate_bar_at(pointer.x));
        self.anchor.pan(delta_px, focused.as_ref(), self.scale);
        trace!(
            delta_px,
            focused_index = ?focused.map(|bar| bar.index),
            "pan"
        );
        self.redraw()
    }

    /// Switches to scale `level`, clamped to the table bounds, and redraws.
    ///
    /// With a pointer over a bar that bar keeps its pixel centre; with a
    /// pointer over empty space the anchor keeps its centre; without a
    /// pointer the anchor is flushed to the right edge. Nothing happens when
    /// the clamped level equals the current one.
    pub fn zoom_to(&mut self, level: i64, pointer: Option<PointerPosition>) -> ChartResult<()> {
        let new_scale = ScaleLevel::clamped(level);
        if new_scale == self.scale {
            trace!(level, scale = self.scale.index(), "zoom saturated");
            return Ok(());
        }

        let pivot = match pointer {
            Some(pointer) => self
                .locate_bar_at(pointer.x)
                .map_or(ZoomPivot::Anchor, ZoomPivot::Bar),
            None => ZoomPivot::RightEdge,
        };
        debug!(
            from = self.scale.index(),
            to = new_scale.index(),
            ?pivot,
            "zoom"
        );
        self.scale = new_scale;
        self.emit_plugin_event(PluginEvent::ZoomChanged { scale: new_scale });
        self.anchor.zoom(new_scale, pivot);
        self.redraw()
    }

    /// Zooms by `delta` levels around the last tracked pointer.
    pub fn zoom_by(&mut self, delta: i64) -> ChartResult<()> {
        let level = i64::from(u8::from(self.scale)).saturating_add(delta);
        self.zoom_to(level, self.interaction.pointer())
    }

    pub fn zoom_in(&mut self) -> ChartResult<()> {
        self.zoom_by(1)
    }

    pub fn zoom_out(&mut self) -> ChartResult<()> {
        self.zoom_by(-1)
    }

    /// Moves the anchor cell directly and redraws.
    ///
    /// A bar target beyond the newest bar is pulled back on resolve.
    pub fn recenter(&mut self, target: RecenterTarget) -> ChartResult<()> {
        if let RecenterTarget::Bar { center, .. } | RecenterTarget::Current { center } = target {
            if !center.is_finite() {
                return Err(ChartError::InvalidData(
                    "recenter position must be finite".to_owned(),
                ));
            }
        }
        self.anchor.recenter(target, self.scale);
        trace!(?target, "recenter");
        self.redraw()
    }
}

use serde::{Deserialize, Serialize};

use crate::core::primitives::round_half_up;
use crate::core::{BarPosition, ScaleLevel};

/// Where the anchor cell should land after a re-centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RecenterTarget {
    /// Anchor bar `index` with its cell centred on pixel `center`.
    Bar { index: usize, center: f64 },
    /// Keep the current bar and move its cell centre to `center`.
    Current { center: f64 },
    /// Keep the current bar and flush its cell against the right canvas edge.
    RightEdge,
}

/// Pivot used when the scale level changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ZoomPivot {
    /// A pointer covers this bar: its pixel centre stays fixed.
    Bar(BarPosition),
    /// A pointer is present but covers no bar: the anchor centre stays fixed.
    Anchor,
    /// Programmatic zoom: show the most recent bars.
    RightEdge,
}

/// The chart "gravity point": a one-cell pixel window and the bar pinned to it.
///
/// Every frame is laid out outward from this cell. `bar_index == None` means
/// the anchor follows the most recent bar on the next resolve.
///
/// Invariants kept by [`ViewportAnchor::update`]:
/// `0 <= left <= middle <= right <= canvas_width` and, whenever the canvas
/// is at least one cell wide, `right - left == cell width`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportAnchor {
    left_boundary: f64,
    right_boundary: f64,
    middle: f64,
    bar_index: Option<usize>,
    canvas_width: f64,
}

impl ViewportAnchor {
    /// Creates an unanchored cell flush with the right edge of the canvas.
    #[must_use]
    pub fn new(canvas_width: f64, scale: ScaleLevel) -> Self {
        let cell = scale.cell();
        let left_boundary = (canvas_width - cell.width).max(0.0);
        Self {
            left_boundary,
            right_boundary: canvas_width,
            middle: canvas_width - cell.middle,
            bar_index: None,
            canvas_width,
        }
    }

    #[must_use]
    pub fn left_boundary(&self) -> f64 {
        self.left_boundary
    }

    #[must_use]
    pub fn right_boundary(&self) -> f64 {
        self.right_boundary
    }

    #[must_use]
    pub fn middle(&self) -> f64 {
        self.middle
    }

    #[must_use]
    pub fn bar_index(&self) -> Option<usize> {
        self.bar_index
    }

    #[must_use]
    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    #[must_use]
    pub fn is_anchored(&self) -> bool {
        self.bar_index.is_some()
    }

    /// Returns the anchored bar, pinning the newest bar first when unanchored.
    ///
    /// A stale index beyond `last_index` (after a shorter bulk replace) is
    /// pulled back to `last_index`.
    pub fn resolve_bar_index(&mut self, last_index: usize) -> usize {
        let index = self.bar_index.map_or(last_index, |index| index.min(last_index));
        self.bar_index = Some(index);
        index
    }

    /// Single state-transition primitive.
    ///
    /// The centre is clamped so the anchor cell stays inside the canvas and
    /// the window moves with it; boundaries are then clamped to the canvas.
    pub fn update(
        &mut self,
        left: f64,
        right: f64,
        index: Option<usize>,
        middle: f64,
        scale: ScaleLevel,
    ) {
        let cell = scale.cell();
        let clamped_middle = if self.canvas_width >= cell.width {
            middle.clamp(cell.middle, self.canvas_width - cell.middle)
        } else {
            cell.middle
        };
        let shift = clamped_middle - middle;

        self.left_boundary = (left + shift).max(0.0);
        self.right_boundary = (right + shift).min(self.canvas_width);
        self.middle = clamped_middle;
        self.bar_index = index;
    }

    /// Moves the anchor cell to `target` under the geometry of `scale`.
    pub fn recenter(&mut self, target: RecenterTarget, scale: ScaleLevel) {
        let cell = scale.cell();
        match target {
            RecenterTarget::Bar { index, center } => {
                let left = center - cell.middle;
                self.update(left, left + cell.width, Some(index), center, scale);
            }
            RecenterTarget::Current { center } => {
                let left = center - cell.middle;
                self.update(left, left + cell.width, self.bar_index, center, scale);
            }
            RecenterTarget::RightEdge => {
                let left = self.canvas_width - cell.width;
                self.update(
                    left,
                    left + cell.width,
                    self.bar_index,
                    left + cell.middle,
                    scale,
                );
            }
        }
    }

    /// Pans by `delta` pixels.
    ///
    /// With a bar under the pointer the anchor jumps to that bar so it tracks
    /// the pointer exactly; otherwise the current anchor cell shifts.
    pub fn pan(&mut self, delta: f64, focused: Option<&BarPosition>, scale: ScaleLevel) {
        let target = match focused {
            Some(bar) => RecenterTarget::Bar {
                index: bar.index,
                center: round_half_up(bar.middle + delta),
            },
            None => RecenterTarget::Current {
                center: self.middle + delta,
            },
        };
        self.recenter(target, scale);
    }

    /// Re-anchors for `new_scale` around `pivot`.
    pub fn zoom(&mut self, new_scale: ScaleLevel, pivot: ZoomPivot) {
        let target = match pivot {
            ZoomPivot::Bar(bar) => RecenterTarget::Bar {
                index: bar.index,
                center: round_half_up(bar.middle),
            },
            ZoomPivot::Anchor => RecenterTarget::Current {
                center: self.middle,
            },
            ZoomPivot::RightEdge => RecenterTarget::RightEdge,
        };
        self.recenter(target, new_scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_anchor_is_flush_right_and_unanchored() {
        let anchor = ViewportAnchor::new(800.0, ScaleLevel::clamped(4));
        assert_eq!(anchor.left_boundary(), 790.0);
        assert_eq!(anchor.right_boundary(), 800.0);
        assert_eq!(anchor.middle(), 795.0);
        assert!(!anchor.is_anchored());
    }

    #[test]
    fn update_keeps_cell_inside_canvas() {
        let scale = ScaleLevel::clamped(4);
        let mut anchor = ViewportAnchor::new(800.0, scale);
        anchor.update(-30.0, -20.0, Some(3), -25.0, scale);
        assert_eq!(anchor.left_boundary(), 0.0);
        assert_eq!(anchor.right_boundary(), 10.0);
        assert_eq!(anchor.middle(), 5.0);
        assert_eq!(anchor.bar_index(), Some(3));

        anchor.update(900.0, 910.0, Some(3), 905.0, scale);
        assert_eq!(anchor.left_boundary(), 790.0);
        assert_eq!(anchor.right_boundary(), 800.0);
    }

    #[test]
    fn resolve_pins_newest_bar_and_pulls_back_stale_index() {
        let mut anchor = ViewportAnchor::new(800.0, ScaleLevel::default());
        assert_eq!(anchor.resolve_bar_index(9), 9);
        assert_eq!(anchor.resolve_bar_index(4), 4);
        assert_eq!(anchor.bar_index(), Some(4));
    }
}

use serde::{Deserialize, Serialize};

use crate::core::{PointerPosition, Quote};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Panning,
}

/// Bar covered by the pointer, with a copy of its quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoveredBar {
    pub index: usize,
    pub quote: Quote,
}

/// Pointer snapshot published to tooltip and axis collaborators.
///
/// Coordinates are snapped to pixel centres; `x` follows the covered bar's
/// wick when there is one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrosshairState {
    pub x: f64,
    pub y: f64,
    /// Price at the pointer's raw y, if a frame has been mapped.
    pub price: Option<f64>,
    pub bar: Option<HoveredBar>,
}

/// Horizontal drag movement since the previous pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragStep {
    /// Pointer x before this step; the content under it is being dragged.
    pub from_x: f64,
    pub delta: f64,
}

/// Pointer and drag bookkeeping for one chart session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    mode: InteractionMode,
    pointer: Option<PointerPosition>,
    drag_x: f64,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            pointer: None,
            drag_x: 0.0,
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    /// Last pointer position over the canvas; `None` after the pointer left.
    #[must_use]
    pub fn pointer(self) -> Option<PointerPosition> {
        self.pointer
    }

    /// Records the pointer and returns the drag step while panning.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> Option<DragStep> {
        self.pointer = Some(PointerPosition::new(x, y));
        if self.mode != InteractionMode::Panning {
            return None;
        }
        let step = DragStep {
            from_x: self.drag_x,
            delta: x - self.drag_x,
        };
        self.drag_x = x;
        Some(step)
    }

    pub fn on_pan_start(&mut self, x: f64, y: f64) {
        self.pointer = Some(PointerPosition::new(x, y));
        self.mode = InteractionMode::Panning;
        self.drag_x = x;
    }

    /// Ends a drag and returns any movement not yet applied.
    pub fn on_pan_end(&mut self, x: f64, y: f64) -> Option<DragStep> {
        let step = self.on_pointer_move(x, y);
        self.mode = InteractionMode::Idle;
        step.filter(|step| step.delta != 0.0)
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer = None;
        self.mode = InteractionMode::Idle;
    }
}

use serde::{Deserialize, Serialize};

use crate::core::{ScaleLevel, ViewportAnchor};

/// Inclusive interval of bar indices laid out for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleRange {
    pub left_most_bar_index: usize,
    pub right_most_bar_index: usize,
}

impl VisibleRange {
    #[must_use]
    pub fn new(left_most_bar_index: usize, right_most_bar_index: usize) -> Self {
        Self {
            left_most_bar_index: left_most_bar_index.min(right_most_bar_index),
            right_most_bar_index: left_most_bar_index.max(right_most_bar_index),
        }
    }

    #[must_use]
    pub fn bar_count(self) -> usize {
        self.right_most_bar_index.saturating_sub(self.left_most_bar_index) + 1
    }

    #[must_use]
    pub fn contains(self, index: usize) -> bool {
        self.indices().contains(&index)
    }

    #[must_use]
    pub fn indices(self) -> std::ops::RangeInclusive<usize> {
        self.left_most_bar_index..=self.right_most_bar_index
    }
}

/// Resolves which bars must be laid out so the canvas is filled.
///
/// Pins the anchor to the newest bar when unanchored. Returns `None` for an
/// empty store. Both bounds are rounded outward to whole cells and clamped
/// to `[0, count - 1]`.
pub fn resolve_visible_range(
    anchor: &mut ViewportAnchor,
    scale: ScaleLevel,
    count: usize,
) -> Option<VisibleRange> {
    let last_index = count.checked_sub(1)?;
    let cell_width = scale.cell().width;
    let anchor_index = anchor.resolve_bar_index(last_index);

    let space_right = anchor.canvas_width() - anchor.right_boundary();
    let cells_right = whole_cells(space_right, cell_width);
    let cells_left = whole_cells(anchor.left_boundary(), cell_width);

    Some(VisibleRange {
        left_most_bar_index: anchor_index.saturating_sub(cells_left),
        right_most_bar_index: anchor_index.saturating_add(cells_right).min(last_index),
    })
}

fn whole_cells(space_px: f64, cell_width: f64) -> usize {
    let cells = (space_px / cell_width).ceil();
    if cells.is_finite() && cells > 0.0 {
        cells as usize
    } else {
        0
    }
}

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::core::{ScaleLevel, ViewportAnchor, VisibleRange};

/// Pixel cell of one visible bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarPosition {
    pub left: f64,
    /// Wick centreline, shifted half a pixel for crisp 1px strokes.
    pub middle: f64,
    pub right: f64,
    pub index: usize,
}

impl BarPosition {
    fn in_cell(left: f64, index: usize, scale: ScaleLevel) -> Self {
        let cell = scale.cell();
        Self {
            left,
            middle: left + cell.middle - 0.5,
            right: left + cell.width,
            index,
        }
    }

    /// Orders this cell relative to pixel `x`; cells are half-open `[left, right)`.
    fn cmp_to_pixel(&self, x: f64) -> Ordering {
        if self.left > x {
            Ordering::Greater
        } else if self.right <= x {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }
}

/// Pixel-ordered cells for every bar of a visible range.
///
/// Rebuilt from scratch on each frame; never patched incrementally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BarLayout {
    positions: Vec<BarPosition>,
}

impl BarLayout {
    /// Lays out `range` outward from the anchor cell in both directions.
    ///
    /// Returns an empty layout when the anchor is unresolved or outside `range`.
    #[must_use]
    pub fn build(anchor: &ViewportAnchor, range: VisibleRange, scale: ScaleLevel) -> Self {
        let Some(anchor_index) = anchor.bar_index().filter(|index| range.contains(*index)) else {
            return Self::default();
        };
        let cell_width = scale.cell().width;
        let mut positions = Vec::with_capacity(range.bar_count());

        let mut left = anchor.left_boundary();
        for index in (range.left_most_bar_index..anchor_index).rev() {
            left -= cell_width;
            positions.push(BarPosition::in_cell(left, index, scale));
        }
        positions.reverse();

        positions.push(BarPosition::in_cell(
            anchor.left_boundary(),
            anchor_index,
            scale,
        ));

        let mut left = anchor.right_boundary();
        for index in anchor_index + 1..=range.right_most_bar_index {
            positions.push(BarPosition::in_cell(left, index, scale));
            left += cell_width;
        }

        Self { positions }
    }

    /// Finds the bar whose cell covers pixel `x` in `O(log n)`.
    #[must_use]
    pub fn locate(&self, x: f64) -> Option<&BarPosition> {
        if !x.is_finite() {
            return None;
        }
        self.positions
            .binary_search_by(|position| position.cmp_to_pixel(x))
            .ok()
            .map(|slot| &self.positions[slot])
    }

    #[must_use]
    pub fn positions(&self) -> &[BarPosition] {
        &self.positions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

use serde::{Deserialize, Serialize};

/// Number of discrete zoom levels.
pub const SCALE_LEVEL_COUNT: usize = 14;

/// Level used by a freshly created chart.
pub const DEFAULT_SCALE_LEVEL: ScaleLevel = ScaleLevel(4);

// (cell width, cell middle) per level.
const CELL_TABLE: [(f64, f64); SCALE_LEVEL_COUNT] = [
    (2.0, 1.0),
    (4.0, 2.0),
    (6.0, 3.0),
    (8.0, 4.0),
    (10.0, 5.0),
    (14.0, 7.0),
    (16.0, 8.0),
    (20.0, 10.0),
    (22.0, 11.0),
    (24.0, 12.0),
    (28.0, 14.0),
    (30.0, 15.0),
    (34.0, 17.0),
    (36.0, 18.0),
];

// (body left offset, wick centreline offset, body width) per level.
const BODY_TABLE: [(f64, f64, f64); SCALE_LEVEL_COUNT] = [
    (0.5, 0.5, 1.0),
    (0.5, 1.5, 2.0),
    (1.5, 2.5, 2.0),
    (1.5, 3.5, 4.0),
    (1.5, 4.5, 6.0),
    (2.5, 6.5, 8.0),
    (2.5, 7.5, 10.0),
    (3.5, 9.5, 12.0),
    (3.5, 10.5, 14.0),
    (3.5, 11.5, 16.0),
    (4.5, 13.5, 18.0),
    (4.5, 14.5, 20.0),
    (5.5, 16.5, 22.0),
    (5.5, 17.5, 24.0),
];

/// Zoom level in `0..SCALE_LEVEL_COUNT`. Higher levels mean wider bar cells.
///
/// The inner value is private so every instance is in range; use
/// [`ScaleLevel::clamped`] to build one from untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct ScaleLevel(u8);

impl ScaleLevel {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self((SCALE_LEVEL_COUNT - 1) as u8);

    /// Saturates out-of-range requests to the nearest bound.
    #[must_use]
    pub fn clamped(level: i64) -> Self {
        Self(level.clamp(0, Self::MAX.0 as i64) as u8)
    }

    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Level `delta` steps away, saturating at the bounds.
    #[must_use]
    pub fn offset(self, delta: i64) -> Self {
        Self::clamped(i64::from(self.0).saturating_add(delta))
    }

    #[must_use]
    pub fn cell(self) -> CellMetrics {
        let (width, middle) = CELL_TABLE[self.index()];
        CellMetrics { width, middle }
    }

    #[must_use]
    pub fn body(self) -> BodyMetrics {
        let (left, wick_offset, width) = BODY_TABLE[self.index()];
        BodyMetrics {
            left,
            wick_offset,
            width,
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..SCALE_LEVEL_COUNT as u8).map(Self)
    }
}

impl Default for ScaleLevel {
    fn default() -> Self {
        DEFAULT_SCALE_LEVEL
    }
}

impl From<i64> for ScaleLevel {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<ScaleLevel> for u8 {
    fn from(value: ScaleLevel) -> Self {
        value.0
    }
}

/// Pixel slot reserved for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellMetrics {
    pub width: f64,
    /// Offset from the cell's left edge to its vertical centreline.
    pub middle: f64,
}

/// Candle body placement inside a cell, used only by rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyMetrics {
    pub left: f64,
    pub wick_offset: f64,
    pub width: f64,
}

/// Widest cell across all levels; the canvas must be at least this wide.
#[must_use]
pub fn max_cell_width() -> f64 {
    ScaleLevel::MAX.cell().width
}

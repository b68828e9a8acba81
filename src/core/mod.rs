pub mod anchor;
pub mod layout;
pub mod price_mapping;
pub mod primitives;
pub mod quote;
pub mod quote_store;
pub mod scale_table;
pub mod types;
pub mod windowing;

pub use anchor::{RecenterTarget, ViewportAnchor, ZoomPivot};
pub use layout::{BarLayout, BarPosition};
pub use price_mapping::{
    CandleGeometry, DEFAULT_PRICE_PADDING_RATIO, PriceGridLevel, PriceMapping, project_candles,
};
pub use quote::{Quote, QuoteInput, Tick, TimestampInput};
pub use quote_store::{QuoteChange, QuoteStore};
pub use scale_table::{
    BodyMetrics, CellMetrics, DEFAULT_SCALE_LEVEL, SCALE_LEVEL_COUNT, ScaleLevel, max_cell_width,
};
pub use types::{PointerPosition, Viewport};
pub use windowing::{VisibleRange, resolve_visible_range};

//! stock-chart-rs: candlestick chart viewport and coordinate-mapping engine.
//!
//! The crate keeps a movable, zoomable window over an append-only OHLC
//! series, maps between bar index, pixel and price under that window, and
//! resolves pointer positions back to bars. Drawing is delegated to a
//! backend-agnostic [`render::Renderer`].

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};

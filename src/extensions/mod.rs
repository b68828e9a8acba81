//! Collaborator hooks live here.
//!
//! Keep them observational; the chart session stays the only writer of
//! viewport state.

pub mod plugins;

pub use plugins::{ChartPlugin, EventChannel, PluginContext, PluginEvent};

mod data_controller;
mod engine;
mod engine_config;
mod interaction_coordinator;
mod json_contract;
mod plugin_dispatch;
mod plugin_registry;
mod render_frame_builder;
mod render_style;
mod viewport_controller;

pub use engine::ChartEngine;
pub use engine_config::ChartEngineConfig;
pub use json_contract::{ENGINE_CONFIG_JSON_SCHEMA_V1, EngineConfigJsonContractV1};
pub use render_style::RenderStyle;

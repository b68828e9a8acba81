use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::ChartEngineConfig;

pub const ENGINE_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Versioned envelope around a serialized [`ChartEngineConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: ChartEngineConfig,
}

impl ChartEngineConfig {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = EngineConfigJsonContractV1 {
            schema_version: ENGINE_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize config contract v1: {e}"))
        })
    }

    /// Parses either a bare config or a versioned contract, then validates it.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config = match serde_json::from_str::<ChartEngineConfig>(input) {
            Ok(config) => config,
            Err(_) => {
                let payload: EngineConfigJsonContractV1 =
                    serde_json::from_str(input).map_err(|e| {
                        ChartError::InvalidData(format!("failed to parse config json payload: {e}"))
                    })?;
                if payload.schema_version != ENGINE_CONFIG_JSON_SCHEMA_V1 {
                    return Err(ChartError::InvalidData(format!(
                        "unsupported config schema version: {}",
                        payload.schema_version
                    )));
                }
                payload.config
            }
        };
        config.validate()?;
        Ok(config)
    }
}

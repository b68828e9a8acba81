use smallvec::SmallVec;
use tracing::warn;

use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartPlugin;
use crate::render::Renderer;

use super::ChartEngine;
use super::engine::PluginEntry;

impl<R: Renderer> ChartEngine<R> {
    /// Registers a plugin with unique identifier.
    ///
    /// Channel subscriptions are read once, at registration.
    pub fn register_plugin(&mut self, plugin: Box<dyn ChartPlugin>) -> ChartResult<()> {
        let plugin_id = plugin.id().to_owned();
        if plugin_id.is_empty() {
            warn!("rejecting plugin with empty id");
            return Err(ChartError::InvalidData(
                "plugin id must not be empty".to_owned(),
            ));
        }
        if self.plugins.contains_key(&plugin_id) {
            warn!(plugin_id = %plugin_id, "rejecting duplicate plugin registration");
            return Err(ChartError::InvalidData(format!(
                "plugin with id `{plugin_id}` is already registered"
            )));
        }
        let mut channels: SmallVec<[_; 4]> = SmallVec::new();
        for channel in plugin.channels() {
            if !channels.contains(channel) {
                channels.push(*channel);
            }
        }
        self.plugins
            .insert(plugin_id, PluginEntry { plugin, channels });
        Ok(())
    }

    /// Unregisters a plugin by id. Returns `true` when removed.
    pub fn unregister_plugin(&mut self, plugin_id: &str) -> bool {
        self.plugins.shift_remove(plugin_id).is_some()
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn has_plugin(&self, plugin_id: &str) -> bool {
        self.plugins.contains_key(plugin_id)
    }
}

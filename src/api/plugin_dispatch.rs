use tracing::trace;

use crate::extensions::{PluginContext, PluginEvent};
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            viewport: self.config.viewport,
            scale: self.scale,
            visible_range: self.frame.visible_range,
            quote_count: self.quotes.count(),
            interaction_mode: self.interaction.mode(),
        }
    }

    /// Delivers `event` synchronously, in registration order, to every
    /// plugin subscribed to its channel.
    pub(super) fn emit_plugin_event(&mut self, event: PluginEvent) {
        let channel = event.channel();
        let context = self.plugin_context();
        for (plugin_id, entry) in &mut self.plugins {
            if !entry.channels.contains(&channel) {
                continue;
            }
            trace!(plugin_id = plugin_id.as_str(), ?channel, "dispatch plugin event");
            entry.plugin.on_event(&event, context);
        }
    }
}

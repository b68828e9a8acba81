use serde::{Deserialize, Serialize};

use crate::core::{QuoteChange, ScaleLevel, Viewport, VisibleRange};
use crate::interaction::{CrosshairState, InteractionMode};

/// Notification channel a plugin can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventChannel {
    PointerMoved,
    RedrawRequested,
    ZoomChanged,
    QuoteArrived,
}

impl EventChannel {
    pub const ALL: [Self; 4] = [
        Self::PointerMoved,
        Self::RedrawRequested,
        Self::ZoomChanged,
        Self::QuoteArrived,
    ];
}

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    pub scale: ScaleLevel,
    pub visible_range: Option<VisibleRange>,
    pub quote_count: usize,
    pub interaction_mode: InteractionMode,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    PointerMoved(CrosshairState),
    /// A frame was recomputed and handed to the renderer.
    RedrawRequested { visible_range: VisibleRange },
    ZoomChanged { scale: ScaleLevel },
    QuoteArrived { change: QuoteChange, count: usize },
}

impl PluginEvent {
    #[must_use]
    pub fn channel(&self) -> EventChannel {
        match self {
            Self::PointerMoved(_) => EventChannel::PointerMoved,
            Self::RedrawRequested { .. } => EventChannel::RedrawRequested,
            Self::ZoomChanged { .. } => EventChannel::ZoomChanged,
            Self::QuoteArrived { .. } => EventChannel::QuoteArrived,
        }
    }
}

/// Subscriber hook for tooltips, date axes and other collaborators.
///
/// Plugins observe events and read engine context without mutating the
/// chart session.
pub trait ChartPlugin {
    fn id(&self) -> &str;

    /// Channels this plugin wants; all of them by default.
    fn channels(&self) -> &[EventChannel] {
        &EventChannel::ALL
    }

    fn on_event(&mut self, event: &PluginEvent, context: PluginContext);
}

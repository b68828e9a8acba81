use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{
    BarLayout, BarPosition, CandleGeometry, PointerPosition, PriceMapping, QuoteStore, ScaleLevel,
    ViewportAnchor, Viewport, VisibleRange, project_candles, resolve_visible_range,
};
use crate::error::ChartResult;
use crate::extensions::{ChartPlugin, EventChannel, PluginEvent};
use crate::interaction::{InteractionMode, InteractionState};
use crate::render::Renderer;

use super::ChartEngineConfig;

/// Products of the last redraw, read by pointer resolution and accessors.
#[derive(Debug, Clone, Default, PartialEq)]
pub(super) struct FrameState {
    pub(super) visible_range: Option<VisibleRange>,
    pub(super) layout: BarLayout,
    pub(super) price_mapping: Option<PriceMapping>,
}

pub(super) struct PluginEntry {
    pub(super) plugin: Box<dyn ChartPlugin>,
    pub(super) channels: SmallVec<[EventChannel; 4]>,
}

/// One chart session: quote store, camera state and renderer.
///
/// The [`ViewportAnchor`] is owned exclusively by the session and changes
/// only through pan, zoom and visible-range resolution. Every operation runs
/// to completion before the next one is observed.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartEngineConfig,
    pub(super) quotes: QuoteStore,
    pub(super) scale: ScaleLevel,
    pub(super) anchor: ViewportAnchor,
    pub(super) frame: FrameState,
    pub(super) interaction: InteractionState,
    pub(super) plugins: IndexMap<String, PluginEntry>,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        config.validate()?;
        let scale = config.initial_scale;
        let anchor = ViewportAnchor::new(config.viewport.width_px(), scale);

        Ok(Self {
            renderer,
            config,
            quotes: QuoteStore::new(),
            scale,
            anchor,
            frame: FrameState::default(),
            interaction: InteractionState::default(),
            plugins: IndexMap::new(),
        })
    }

    /// Recomputes visible range, layout and price mapping, then renders.
    ///
    /// Skipped entirely for an empty quote store. Idempotent: repeating it
    /// without new input produces an identical frame.
    pub fn redraw(&mut self) -> ChartResult<()> {
        let Some(range) = resolve_visible_range(&mut self.anchor, self.scale, self.quotes.count())
        else {
            trace!("skipping redraw of empty quote store");
            self.frame = FrameState::default();
            return Ok(());
        };

        let layout = BarLayout::build(&self.anchor, range, self.scale);
        let mapping = PriceMapping::from_visible(
            self.quotes.all(),
            range,
            self.config.viewport,
            self.config.price_padding_ratio,
        )?;
        let frame = self.build_render_frame(&layout, &mapping);
        self.frame = FrameState {
            visible_range: Some(range),
            layout,
            price_mapping: Some(mapping),
        };
        self.renderer.render(&frame)?;
        trace!(
            left_most = range.left_most_bar_index,
            right_most = range.right_most_bar_index,
            scale = self.scale.index(),
            "redraw"
        );
        self.emit_plugin_event(PluginEvent::RedrawRequested {
            visible_range: range,
        });
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    #[must_use]
    pub fn quotes(&self) -> &QuoteStore {
        &self.quotes
    }

    #[must_use]
    pub fn scale(&self) -> ScaleLevel {
        self.scale
    }

    #[must_use]
    pub fn anchor(&self) -> &ViewportAnchor {
        &self.anchor
    }

    /// Visible range resolved by the last redraw.
    #[must_use]
    pub fn current_visible_range(&self) -> Option<VisibleRange> {
        self.frame.visible_range
    }

    #[must_use]
    pub fn layout(&self) -> &BarLayout {
        &self.frame.layout
    }

    #[must_use]
    pub fn price_mapping(&self) -> Option<PriceMapping> {
        self.frame.price_mapping
    }

    /// Bar whose cell covers pixel `x` in the last laid-out frame.
    #[must_use]
    pub fn locate_bar_at(&self, x: f64) -> Option<BarPosition> {
        self.frame.layout.locate(x).copied()
    }

    /// Candle geometry of the last laid-out frame.
    #[must_use]
    pub fn visible_candles(&self) -> Vec<CandleGeometry> {
        match self.frame.price_mapping {
            Some(mapping) => project_candles(
                self.quotes.all(),
                &self.frame.layout,
                &mapping,
                self.scale,
            ),
            None => Vec::new(),
        }
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    #[must_use]
    pub fn pointer(&self) -> Option<PointerPosition> {
        self.interaction.pointer()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

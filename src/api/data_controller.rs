use tracing::{debug, trace, warn};

use crate::core::{Quote, QuoteChange, QuoteInput, Tick};
use crate::error::ChartResult;
use crate::extensions::PluginEvent;
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    /// Replaces the quote series from raw records or tuples, then redraws.
    ///
    /// Every timestamp is normalised first; one bad element rejects the
    /// whole batch and leaves the store untouched.
    pub fn set_data(&mut self, bars: Vec<QuoteInput>) -> ChartResult<()> {
        self.set_data_with(|| bars)
    }

    /// Like [`ChartEngine::set_data`], pulling the records from `supplier`.
    pub fn set_data_with<F, I>(&mut self, supplier: F) -> ChartResult<()>
    where
        F: FnOnce() -> I,
        I: IntoIterator<Item = QuoteInput>,
    {
        let quotes = supplier()
            .into_iter()
            .map(Quote::from_input)
            .collect::<ChartResult<Vec<_>>>()?;
        self.set_quotes(quotes)
    }

    /// Replaces the quote series with already-normalised quotes.
    ///
    /// The anchor is kept; a stale anchor index is pulled back to the newest
    /// bar on the next resolve. If the redraw fails, the previous series,
    /// anchor and frame are restored before the error is returned.
    pub fn set_quotes(&mut self, quotes: Vec<Quote>) -> ChartResult<()> {
        let previous_quotes = std::mem::take(&mut self.quotes);
        let previous_anchor = self.anchor;
        let previous_frame = self.frame.clone();

        let change = self.quotes.set_all(quotes);
        let count = self.quotes.count();
        debug!(count, "set quotes");
        self.emit_quote_arrived(change);
        if let Err(err) = self.redraw() {
            warn!(count, error = %err, "redraw failed, restoring previous quotes");
            self.quotes = previous_quotes;
            self.anchor = previous_anchor;
            self.frame = previous_frame;
            return Err(err);
        }
        Ok(())
    }

    /// Opens a new flat bar at `tick.value`.
    ///
    /// When the newest bar was the rightmost one on screen, the chart scrolls
    /// one cell left to bring the new bar into view; otherwise nothing is
    /// redrawn.
    pub fn append_tick(&mut self, tick: Tick) -> ChartResult<()> {
        let change = self.quotes.append(tick)?;
        let count = self.quotes.count();
        trace!(count, value = tick.value, "append tick");
        self.emit_quote_arrived(change);

        match self.frame.visible_range {
            Some(range) if range.right_most_bar_index + 2 == count => {
                let cell_width = self.scale.cell().width;
                self.anchor.pan(-cell_width, None, self.scale);
                self.redraw()
            }
            Some(_) => Ok(()),
            None => self.redraw(),
        }
    }

    /// Merges `tick.value` into bar `index` (the newest bar when `None`) and
    /// redraws.
    ///
    /// An explicit out-of-range index is a caller bug and is reported rather
    /// than clamped. A tick for an empty store without an index is ignored.
    pub fn merge_tick(&mut self, tick: Tick, index: Option<usize>) -> ChartResult<()> {
        let Some(change) = self.quotes.merge_tick(tick, index)? else {
            trace!(value = tick.value, "ignoring tick for empty quote store");
            return Ok(());
        };
        trace!(value = tick.value, ?index, "merge tick");
        self.emit_quote_arrived(change);
        self.redraw()
    }

    fn emit_quote_arrived(&mut self, change: QuoteChange) {
        let count = self.quotes.count();
        self.emit_plugin_event(PluginEvent::QuoteArrived { change, count });
    }
}

use serde::{Deserialize, Serialize};

use crate::core::{Quote, Tick};
use crate::error::{ChartError, ChartResult};

/// Kind of mutation applied to the quote store, forwarded to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteChange {
    /// The whole sequence was replaced.
    Replaced,
    /// A new bar was appended.
    NewBar,
    /// An existing bar absorbed a tick.
    Updated,
}

/// Ordered, append-only OHLC container.
///
/// Indices are stable: once appended, index `i` always names the same bar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteStore {
    quotes: Vec<Quote>,
}

impl QuoteStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_all(&mut self, quotes: Vec<Quote>) -> QuoteChange {
        self.quotes = quotes;
        QuoteChange::Replaced
    }

    /// Opens a new flat bar at `tick.value`.
    pub fn append(&mut self, tick: Tick) -> ChartResult<QuoteChange> {
        let timestamp = tick.timestamp.ok_or_else(|| {
            ChartError::InvalidTimestamp("a new bar requires a tick timestamp".to_owned())
        })?;
        self.quotes.push(Quote::flat(tick.value, timestamp)?);
        Ok(QuoteChange::NewBar)
    }

    /// Merges `tick.value` into the bar at `index`, or the last bar when `None`.
    ///
    /// Returns `Ok(None)` when the store is empty and no index was given.
    pub fn merge_tick(
        &mut self,
        tick: Tick,
        index: Option<usize>,
    ) -> ChartResult<Option<QuoteChange>> {
        if !tick.value.is_finite() {
            return Err(ChartError::InvalidData(
                "tick value must be finite".to_owned(),
            ));
        }

        let len = self.quotes.len();
        let target = match index {
            Some(index) => self
                .quotes
                .get_mut(index)
                .ok_or(ChartError::IndexOutOfRange { index, len })?,
            None => match self.quotes.last_mut() {
                Some(last) => last,
                None => return Ok(None),
            },
        };
        target.merge(tick.value);
        Ok(Some(QuoteChange::Updated))
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.quotes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Quote> {
        self.quotes.last()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Quote> {
        self.quotes.get(index)
    }

    #[must_use]
    pub fn all(&self) -> &[Quote] {
        &self.quotes
    }
}

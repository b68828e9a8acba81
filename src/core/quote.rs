use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{decimal_to_f64, parse_datetime_text, unix_millis_to_datetime};
use crate::error::{ChartError, ChartResult};

/// One OHLC price bar.
///
/// `low <= open, close <= high` is not checked on construction; it is kept
/// incrementally by tick merges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub timestamp: DateTime<Utc>,
}

impl Quote {
    /// Builds a quote, rejecting non-finite prices.
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        timestamp: DateTime<Utc>,
    ) -> ChartResult<Self> {
        if !open.is_finite() || !high.is_finite() || !low.is_finite() || !close.is_finite() {
            return Err(ChartError::InvalidData(
                "quote prices must be finite".to_owned(),
            ));
        }

        Ok(Self {
            open,
            high,
            low,
            close,
            timestamp,
        })
    }

    /// Builds a quote where all four prices equal `value`.
    pub fn flat(value: f64, timestamp: DateTime<Utc>) -> ChartResult<Self> {
        Self::new(value, value, value, value, timestamp)
    }

    pub fn from_decimal_time(
        timestamp: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> ChartResult<Self> {
        Self::new(
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
            timestamp,
        )
    }

    /// Normalizes a raw record or tuple into a quote.
    pub fn from_input(input: QuoteInput) -> ChartResult<Self> {
        let (open, high, low, close, timestamp) = match input {
            QuoteInput::Record {
                open,
                high,
                low,
                close,
                timestamp,
            } => (open, high, low, close, timestamp),
            QuoteInput::Tuple(open, high, low, close, timestamp) => {
                (open, high, low, close, timestamp)
            }
        };
        Self::new(open, high, low, close, timestamp.to_datetime()?)
    }

    /// Returns `true` when close price is greater than or equal to open price.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    /// Folds a live price into this bar.
    pub fn merge(&mut self, value: f64) {
        if value > self.high {
            self.high = value;
        }
        if value < self.low {
            self.low = value;
        }
        self.close = value;
    }
}

/// Raw timestamp as supplied by a quote source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimestampInput {
    /// Milliseconds since the Unix epoch.
    Millis(i64),
    Text(String),
}

impl TimestampInput {
    pub fn to_datetime(&self) -> ChartResult<DateTime<Utc>> {
        match self {
            Self::Millis(millis) => unix_millis_to_datetime(*millis),
            Self::Text(text) => parse_datetime_text(text),
        }
    }
}

impl From<DateTime<Utc>> for TimestampInput {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Millis(value.timestamp_millis())
    }
}

/// Raw quote accepted on bulk load, either as a keyed record or as an
/// `[open, high, low, close, timestamp]` tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuoteInput {
    Record {
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        timestamp: TimestampInput,
    },
    Tuple(f64, f64, f64, f64, TimestampInput),
}

impl QuoteInput {
    #[must_use]
    pub fn record(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        timestamp: impl Into<TimestampInput>,
    ) -> Self {
        Self::Record {
            open,
            high,
            low,
            close,
            timestamp: timestamp.into(),
        }
    }
}

/// Live price update.
///
/// A timestamp is required to open a new bar and ignored when merging into
/// an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Tick {
    #[must_use]
    pub fn new(value: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            value,
            timestamp: Some(timestamp),
        }
    }

    #[must_use]
    pub fn price(value: f64) -> Self {
        Self {
            value,
            timestamp: None,
        }
    }
}

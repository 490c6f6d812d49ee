#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Trend analytics for summary display.
//!
//! Pure, synchronous derivations over time-ordered count series: the
//! headline percentage delta shown next to summary tiles, and reshaping of
//! the raw trend endpoint payload into chart-ready series.

pub mod series;
pub mod trend;

pub use series::{TrendDataset, TrendSeries, reshape_trend_payload};
pub use trend::{TrendDelta, percent_change, trend};

use thiserror::Error;

/// Errors that can occur while parsing backend payloads.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The payload was not valid JSON at all.
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses the raw trend endpoint payload into chart-ready series.
///
/// Strict on JSON syntax, tolerant on shape: see
/// [`reshape_trend_payload`].
///
/// # Errors
///
/// Returns [`PayloadError`] if `json` is not valid JSON text.
pub fn parse_trend_payload(json: &str) -> Result<TrendSeries, PayloadError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    Ok(reshape_trend_payload(&value))
}

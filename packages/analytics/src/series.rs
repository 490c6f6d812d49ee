//! Reshapes the raw trend endpoint payload into chart-ready series.
//!
//! The backend sends either a chart-ready `{labels, datasets}` object (used
//! as-is by the rendering layer, not handled here) or a raw
//! `{trends: [...]}` list where each entry carries a period label and
//! counts, either nested under `crime_types` or as flat numeric fields.

use chrono::NaiveDate;
use serde::Serialize;

/// Chart-ready trend data: one label per period, one dataset per series.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSeries {
    /// Period labels, in display order.
    pub labels: Vec<String>,
    /// One dataset per crime type or numeric field.
    pub datasets: Vec<TrendDataset>,
}

/// A single series of counts aligned to [`TrendSeries::labels`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendDataset {
    /// Dataset label.
    pub label: String,
    /// Counts, one per period label; periods without data are 0.
    pub data: Vec<u64>,
}

struct TrendPoint {
    label: String,
    date: Option<NaiveDate>,
    counts: Vec<(String, u64)>,
}

/// Reshapes a raw trend payload into chart-ready series.
///
/// Periods are ordered chronologically when every period label parses as a
/// date (`%Y-%m-%d`, `%Y-%m`, or `%Y`), otherwise left in source order.
/// Dataset order is first-encountered order across entries; a dataset
/// missing from some period gets a 0 there. A non-array `trends` field is
/// treated as empty with a logged warning.
#[must_use]
pub fn reshape_trend_payload(value: &serde_json::Value) -> TrendSeries {
    let entries = match value.get("trends") {
        Some(serde_json::Value::Array(items)) => items.as_slice(),
        Some(_) => {
            log::warn!("Expected a list in `trends`; treating as empty");
            &[]
        }
        None => {
            log::warn!("Trend payload has no `trends` field; treating as empty");
            &[]
        }
    };

    let mut points: Vec<TrendPoint> = entries.iter().filter_map(parse_entry).collect();

    if points.iter().all(|point| point.date.is_some()) {
        points.sort_by_key(|point| point.date);
    }

    let labels: Vec<String> = points.iter().map(|point| point.label.clone()).collect();

    // Dataset labels in first-encountered order
    let mut dataset_labels: Vec<String> = Vec::new();
    for point in &points {
        for (label, _) in &point.counts {
            if !dataset_labels.contains(label) {
                dataset_labels.push(label.clone());
            }
        }
    }

    let datasets = dataset_labels
        .into_iter()
        .map(|label| {
            let data = points
                .iter()
                .map(|point| {
                    point
                        .counts
                        .iter()
                        .find(|(name, _)| *name == label)
                        .map_or(0, |(_, count)| *count)
                })
                .collect();
            TrendDataset { label, data }
        })
        .collect();

    TrendSeries { labels, datasets }
}

fn parse_entry(entry: &serde_json::Value) -> Option<TrendPoint> {
    let label = period_label(entry)?;
    let date = parse_period(&label);

    let counts = entry.get("crime_types").map_or_else(
        || flat_counts(entry),
        |types| match types {
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|item| {
                    let name = item.get("name")?.as_str()?.to_uppercase();
                    let count = count_value(item.get("count")?)?;
                    Some((name, count))
                })
                .collect(),
            _ => {
                log::warn!("Expected a list in `crime_types`; treating as empty");
                Vec::new()
            }
        },
    );

    Some(TrendPoint {
        label,
        date,
        counts,
    })
}

fn period_label(entry: &serde_json::Value) -> Option<String> {
    let period = entry.get("period").or_else(|| entry.get("date"))?;
    match period {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => {
            log::warn!("Skipping trend entry with unusable period");
            None
        }
    }
}

/// Extracts counts from flat numeric fields, skipping the period fields.
fn flat_counts(entry: &serde_json::Value) -> Vec<(String, u64)> {
    entry.as_object().map_or_else(Vec::new, |object| {
        object
            .iter()
            .filter(|(key, _)| key.as_str() != "period" && key.as_str() != "date")
            .filter_map(|(key, value)| Some((key.clone(), count_value(value)?)))
            .collect()
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count_value(value: &serde_json::Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
}

fn parse_period(label: &str) -> Option<NaiveDate> {
    let label = label.trim();
    NaiveDate::parse_from_str(label, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{label}-01"), "%Y-%m-%d"))
        .or_else(|_| NaiveDate::parse_from_str(&format!("{label}-01-01"), "%Y-%m-%d"))
        .ok()
}

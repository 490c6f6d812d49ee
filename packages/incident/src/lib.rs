#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Incident normalization pipeline.
//!
//! Turns raw backend incident payloads into [`NormalizedIncident`] records:
//! coordinate resolution ([`coords`]), crime type classification
//! ([`classify`]), and tolerant parsing of the paginated list endpoint.
//! Every function here is synchronous and pure; parse entry points are the
//! only place a `Result` appears, and only for invalid JSON text.

pub mod classify;
pub mod coords;

use crime_lens_crime_models::is_violent_label;
use crime_lens_incident_models::{IncidentPage, NormalizedIncident, RawIncident};
use thiserror::Error;

/// Errors that can occur while parsing backend payloads.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The payload was not valid JSON at all.
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Normalizes a raw incident into the canonical shape.
///
/// Composes coordinate resolution and classification. The violent flag uses
/// the backend's explicit flag when present, otherwise the violent color
/// class of the resolved label.
#[must_use]
pub fn normalize(incident: RawIncident) -> NormalizedIncident {
    let coordinates = coords::extract_coordinates(&incident);
    let crime_type = classify::classify(&incident);
    let is_violent = incident
        .is_violent
        .unwrap_or_else(|| is_violent_label(&crime_type));

    let id = incident.id.as_ref().map_or_else(
        || incident.case_number.clone().unwrap_or_default(),
        ToString::to_string,
    );

    NormalizedIncident {
        id,
        case_number: incident.case_number,
        crime_type,
        latitude: coordinates.latitude,
        longitude: coordinates.longitude,
        date: incident.date,
        time: incident.time,
        description: incident.description,
        block_address: incident.block_address,
        district: incident.district,
        is_violent,
        property_loss: incident.property_loss,
    }
}

/// Parses a page of the paginated incident list endpoint.
///
/// Strict on JSON syntax, tolerant on shape: see [`page_from_value`].
///
/// # Errors
///
/// Returns [`PayloadError`] if `json` is not valid JSON text.
pub fn parse_incident_page(json: &str) -> Result<IncidentPage, PayloadError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    Ok(page_from_value(&value))
}

/// Extracts an [`IncidentPage`] from an already-parsed JSON value.
///
/// Tolerates the shapes the backend has sent historically:
///
/// - `{ "results": [...], "next": url-or-null }` (the documented envelope)
/// - a bare array of records
///
/// A non-array `results` is treated as an empty page and logged; individual
/// records that fail to deserialize are skipped with a warning rather than
/// aborting the page.
#[must_use]
pub fn page_from_value(value: &serde_json::Value) -> IncidentPage {
    let next = value
        .get("next")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned);

    let results = match (value.as_array(), value.get("results")) {
        (Some(items), _) => collect_records(items),
        (None, Some(serde_json::Value::Array(items))) => collect_records(items),
        (None, Some(other)) => {
            log::warn!(
                "Expected incident list in `results`, got {}; treating as empty",
                json_type_name(other)
            );
            Vec::new()
        }
        (None, None) => {
            log::warn!("Incident page has no `results` field; treating as empty");
            Vec::new()
        }
    };

    IncidentPage { results, next }
}

/// Parses and normalizes a page in one step.
///
/// # Errors
///
/// Returns [`PayloadError`] if `json` is not valid JSON text.
pub fn parse_normalized_page(
    json: &str,
) -> Result<(Vec<NormalizedIncident>, Option<String>), PayloadError> {
    let page = parse_incident_page(json)?;
    let next = page.next;
    Ok((page.results.into_iter().map(normalize).collect(), next))
}

fn collect_records(items: &[serde_json::Value]) -> Vec<RawIncident> {
    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(incident) => Some(incident),
            Err(e) => {
                log::warn!("Skipping malformed incident record: {e}");
                None
            }
        })
        .collect()
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

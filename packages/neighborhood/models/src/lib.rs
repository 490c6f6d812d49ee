#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! District and neighborhood crime summary payload types.
//!
//! The backend's hierarchical summary endpoint returns a fixed-depth
//! two-level tree (districts containing neighborhoods, each wrapping a
//! `crime_summary` object). The flat [`NeighborhoodSummary`] is what the
//! map rendering layer consumes.

use serde::{Deserialize, Deserializer, Serialize};

/// The hierarchical summary payload: districts containing neighborhoods.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DistrictTree {
    /// All districts, in source order.
    pub districts: Vec<District>,
}

/// A district node in the summary tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct District {
    /// District name.
    pub name: Option<String>,
    /// Neighborhoods in this district, in source order.
    #[serde(default)]
    pub neighborhoods: Vec<Neighborhood>,
}

/// A neighborhood node wrapping its crime summary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Neighborhood {
    /// Neighborhood identifier (string or integer in the payload).
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    /// Neighborhood name.
    pub name: String,
    /// Pre-aggregated crime counts for this neighborhood.
    pub crime_summary: CrimeSummary,
}

/// Pre-aggregated crime counts for a neighborhood, as sent by the backend.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CrimeSummary {
    /// Total incident count.
    #[serde(default)]
    pub total_count: u64,
    /// Violent incident count; never exceeds `total_count`.
    #[serde(default)]
    pub violent_count: u64,
    /// Neighborhood centroid for map placement.
    pub centroid: Option<Centroid>,
    /// Per-category counts. The categories may be pre-filtered, so their
    /// sum need not equal `total_count`.
    #[serde(default)]
    pub categories: Vec<CategoryCount>,
}

/// A neighborhood centroid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
}

/// Count of incidents for a single category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// Category name as sent by the backend (any casing).
    pub name: String,
    /// Number of incidents.
    pub count: u64,
}

/// A flattened per-neighborhood summary, ready for map rendering and
/// client-side re-filtering by crime type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborhoodSummary {
    /// Neighborhood identifier.
    pub neighborhood_id: String,
    /// Neighborhood name.
    pub neighborhood_name: String,
    /// Name of the containing district.
    pub district_name: Option<String>,
    /// Total incident count.
    pub total_count: u64,
    /// Violent incident count.
    pub violent_count: u64,
    /// Centroid for map placement.
    pub centroid: Option<Centroid>,
    /// Per-category counts, in source order.
    pub categories: Vec<CategoryCount>,
}

/// Deserializes an identifier the backend sends as a string or an integer.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(i64),
    }

    Ok(
        match Option::<TextOrNumber>::deserialize(deserializer)? {
            Some(TextOrNumber::Text(s)) => s,
            Some(TextOrNumber::Number(n)) => n.to_string(),
            None => String::new(),
        },
    )
}

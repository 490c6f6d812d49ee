#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Neighborhood summary flattening and crime type filtering.
//!
//! The backend's hierarchical summary endpoint nests neighborhoods inside
//! districts; map rendering wants a flat list. Depth is fixed at two, so
//! flattening is a plain double iteration. Re-filtering by selected crime
//! types is a separate pure operation over the flattened list, recomputed
//! on every filter change.

use crime_lens_crime_models::is_violent_label;
use crime_lens_neighborhood_models::{
    CategoryCount, District, DistrictTree, Neighborhood, NeighborhoodSummary,
};
use thiserror::Error;

/// Errors that can occur while parsing backend payloads.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The payload was not valid JSON at all.
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Flattens the district tree into per-neighborhood summaries.
///
/// Source order is preserved: districts in payload order, neighborhoods in
/// payload order within each district.
#[must_use]
pub fn flatten(tree: &DistrictTree) -> Vec<NeighborhoodSummary> {
    let mut summaries = Vec::new();

    for district in &tree.districts {
        for neighborhood in &district.neighborhoods {
            summaries.push(NeighborhoodSummary {
                neighborhood_id: neighborhood.id.clone(),
                neighborhood_name: neighborhood.name.clone(),
                district_name: district.name.clone(),
                total_count: neighborhood.crime_summary.total_count,
                violent_count: neighborhood.crime_summary.violent_count,
                centroid: neighborhood.crime_summary.centroid,
                categories: neighborhood.crime_summary.categories.clone(),
            });
        }
    }

    summaries
}

/// Re-filters neighborhood summaries by selected crime types.
///
/// For each summary, retains only categories whose uppercased name is in
/// `selected_types` (all categories when the selection is empty), then
/// recomputes `total_count` as the sum of retained counts and
/// `violent_count` as the sum of retained counts in the violent color
/// class. Summaries whose recomputed total is zero are dropped.
///
/// Filtering by the full set of types present in a summary reproduces its
/// totals, provided the backend totals agree with the category sums.
#[must_use]
pub fn filter_by_types(
    summaries: &[NeighborhoodSummary],
    selected_types: &[String],
) -> Vec<NeighborhoodSummary> {
    let selected: Vec<String> = selected_types
        .iter()
        .map(|name| name.to_uppercase())
        .collect();

    summaries
        .iter()
        .filter_map(|summary| {
            let categories: Vec<CategoryCount> = summary
                .categories
                .iter()
                .filter(|category| {
                    selected.is_empty() || selected.contains(&category.name.to_uppercase())
                })
                .cloned()
                .collect();

            let total_count: u64 = categories.iter().map(|category| category.count).sum();
            if total_count == 0 {
                return None;
            }

            let violent_count = categories
                .iter()
                .filter(|category| is_violent_label(&category.name.to_uppercase()))
                .map(|category| category.count)
                .sum();

            Some(NeighborhoodSummary {
                total_count,
                violent_count,
                categories,
                ..summary.clone()
            })
        })
        .collect()
}

/// Parses the hierarchical summary endpoint payload into flat summaries.
///
/// Strict on JSON syntax, tolerant on shape: see [`tree_from_value`].
///
/// # Errors
///
/// Returns [`PayloadError`] if `json` is not valid JSON text.
pub fn parse_district_tree(json: &str) -> Result<Vec<NeighborhoodSummary>, PayloadError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    Ok(flatten(&tree_from_value(&value)))
}

/// Extracts a [`DistrictTree`] from an already-parsed JSON value.
///
/// A non-array `districts` or `neighborhoods` field is treated as empty
/// with a logged warning; individual neighborhood records that fail to
/// deserialize are skipped with a warning rather than aborting the tree.
#[must_use]
pub fn tree_from_value(value: &serde_json::Value) -> DistrictTree {
    let districts = node_list(value, "districts")
        .iter()
        .map(|district| District {
            name: district
                .get("name")
                .and_then(serde_json::Value::as_str)
                .map(ToOwned::to_owned),
            neighborhoods: node_list(district, "neighborhoods")
                .iter()
                .filter_map(|node| {
                    match serde_json::from_value::<Neighborhood>(node.clone()) {
                        Ok(neighborhood) => Some(neighborhood),
                        Err(e) => {
                            log::warn!("Skipping malformed neighborhood record: {e}");
                            None
                        }
                    }
                })
                .collect(),
        })
        .collect();

    DistrictTree { districts }
}

fn node_list<'a>(value: &'a serde_json::Value, key: &str) -> &'a [serde_json::Value] {
    match value.get(key) {
        Some(serde_json::Value::Array(items)) => items,
        Some(_) => {
            log::warn!("Expected a list in `{key}`; treating as empty");
            &[]
        }
        None => &[],
    }
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Cluster marker summarization.
//!
//! The mapping layer groups spatially close incidents into clusters at the
//! current zoom level; this crate derives what a cluster marker displays:
//! per-type counts, the dominant type and its color, and a proportional
//! pie wedge layout for mixed clusters. Summaries are ephemeral, recomputed
//! on every cluster-render event, and pure functions of their input.

use crime_lens_crime_models::{CrimeType, marker_color_for_label};
use crime_lens_incident_models::NormalizedIncident;
use serde::Serialize;

/// Occurrence count for a single crime type within a cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCount {
    /// Uppercase crime type label.
    pub crime_type: String,
    /// Number of incidents with this label.
    pub count: u64,
}

/// One wedge of a cluster marker's proportional color wheel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieWedge {
    /// Uppercase crime type label.
    pub crime_type: String,
    /// Marker color for this label.
    pub color: String,
    /// Starting angle in degrees, measured from 0.
    pub start_angle: f64,
    /// Angular extent in degrees.
    pub sweep_angle: f64,
}

/// Display summary for a cluster marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSummary {
    /// Number of incidents in the cluster.
    pub size: u64,
    /// Per-type counts in first-encountered order.
    pub type_counts: Vec<TypeCount>,
    /// Label with the highest count; first-encountered wins on ties.
    pub dominant_type: String,
    /// Marker color for the dominant type.
    pub dominant_color: String,
    /// Proportional wedge layout; empty unless the cluster holds more than
    /// one distinct label.
    pub wedges: Vec<PieWedge>,
}

/// Summarizes a cluster of incidents for marker display.
///
/// Tallies per-label counts in first-encountered order, picks the dominant
/// label with a strictly-greater comparison (so the first-seen label wins
/// ties), and lays out pie wedges when more than one distinct label is
/// present. An empty cluster yields a degenerate summary with no counts
/// and no wedges rather than dividing by zero.
#[must_use]
pub fn summarize_cluster(incidents: &[NormalizedIncident]) -> ClusterSummary {
    let mut type_counts: Vec<TypeCount> = Vec::new();
    for incident in incidents {
        match type_counts
            .iter_mut()
            .find(|entry| entry.crime_type == incident.crime_type)
        {
            Some(entry) => entry.count += 1,
            None => type_counts.push(TypeCount {
                crime_type: incident.crime_type.clone(),
                count: 1,
            }),
        }
    }

    let size = incidents.len() as u64;

    let mut dominant_type = CrimeType::Other.to_string();
    let mut dominant_count = 0;
    for entry in &type_counts {
        if entry.count > dominant_count {
            dominant_count = entry.count;
            dominant_type = entry.crime_type.clone();
        }
    }

    let dominant_color = marker_color_for_label(&dominant_type).to_owned();
    let wedges = layout_wedges(&type_counts, size);

    ClusterSummary {
        size,
        type_counts,
        dominant_type,
        dominant_color,
        wedges,
    }
}

/// Lays out proportional pie wedges in count-table order starting at 0°.
///
/// Wedge geometry is a pure function of the counts and their order, so the
/// same cluster always renders identically (visual regression stability).
#[allow(clippy::cast_precision_loss)]
fn layout_wedges(type_counts: &[TypeCount], size: u64) -> Vec<PieWedge> {
    if type_counts.len() < 2 || size == 0 {
        return Vec::new();
    }

    let total = size as f64;
    let mut start_angle = 0.0;

    type_counts
        .iter()
        .map(|entry| {
            let sweep_angle = (entry.count as f64 / total) * 360.0;
            let wedge = PieWedge {
                crime_type: entry.crime_type.clone(),
                color: marker_color_for_label(&entry.crime_type).to_owned(),
                start_angle,
                sweep_angle,
            };
            start_angle += sweep_angle;
            wedge
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crime_lens_crime_models::{FALLBACK_COLOR, VIOLENT_COLOR};

    fn incident(crime_type: &str) -> NormalizedIncident {
        NormalizedIncident {
            id: String::new(),
            case_number: None,
            crime_type: crime_type.to_owned(),
            latitude: Some(-1.3),
            longitude: Some(36.8),
            date: None,
            time: None,
            description: None,
            block_address: None,
            district: None,
            is_violent: false,
            property_loss: None,
        }
    }

    #[test]
    fn tallies_in_first_encountered_order() {
        let cluster = [
            incident("THEFT"),
            incident("ROBBERY"),
            incident("THEFT"),
            incident("ROBBERY"),
        ];

        let summary = summarize_cluster(&cluster);
        assert_eq!(summary.size, 4);
        assert_eq!(summary.type_counts[0].crime_type, "THEFT");
        assert_eq!(summary.type_counts[0].count, 2);
        assert_eq!(summary.type_counts[1].crime_type, "ROBBERY");
        assert_eq!(summary.type_counts[1].count, 2);
    }

    #[test]
    fn dominant_tie_breaks_to_first_seen() {
        let cluster = [
            incident("THEFT"),
            incident("ROBBERY"),
            incident("THEFT"),
            incident("ROBBERY"),
        ];

        let summary = summarize_cluster(&cluster);
        assert_eq!(summary.dominant_type, "THEFT");
    }

    #[test]
    fn dominant_color_from_palette_with_fallback() {
        let robberies = [incident("ROBBERY"), incident("ROBBERY")];
        assert_eq!(summarize_cluster(&robberies).dominant_color, VIOLENT_COLOR);

        // THEFT is an explicit backend label outside the canonical taxonomy
        let thefts = [incident("THEFT")];
        assert_eq!(summarize_cluster(&thefts).dominant_color, FALLBACK_COLOR);
    }

    #[test]
    fn wedge_angles_sum_to_full_circle() {
        let cluster = [
            incident("STEALING"),
            incident("STEALING"),
            incident("BREAKINGS"),
            incident("HOMICIDE"),
            incident("TRAFFIC"),
            incident("TRAFFIC"),
            incident("TRAFFIC"),
        ];

        let summary = summarize_cluster(&cluster);
        let total: f64 = summary.wedges.iter().map(|w| w.sweep_angle).sum();
        assert!((total - 360.0).abs() < 1e-6, "wedges sum to {total}");

        // Contiguous layout starting at 0
        let mut expected_start = 0.0;
        for wedge in &summary.wedges {
            assert!((wedge.start_angle - expected_start).abs() < 1e-6);
            expected_start += wedge.sweep_angle;
        }
    }

    #[test]
    fn single_type_cluster_has_no_wedges() {
        let cluster = [incident("STEALING"), incident("STEALING")];
        let summary = summarize_cluster(&cluster);
        assert!(summary.wedges.is_empty());
        assert_eq!(summary.dominant_type, "STEALING");
    }

    #[test]
    fn empty_cluster_degenerates_safely() {
        let summary = summarize_cluster(&[]);
        assert_eq!(summary.size, 0);
        assert!(summary.type_counts.is_empty());
        assert!(summary.wedges.is_empty());
        assert_eq!(summary.dominant_type, "OTHER");
        assert_eq!(summary.dominant_color, FALLBACK_COLOR);
    }

    #[test]
    fn end_to_end_normalize_then_summarize() {
        let (incidents, _) = crime_lens_incident::parse_normalized_page(
            r#"{
                "results": [
                    {"id": 1, "location": {"y": -1.3, "x": 36.8}, "category": {"name": "theft"}},
                    {"id": 2, "latitude": -1.31, "longitude": 36.81, "description": "burglary at night"}
                ],
                "next": null
            }"#,
        )
        .unwrap();

        assert_eq!(incidents.len(), 2);
        assert!(incidents.iter().all(NormalizedIncident::is_mappable));
        assert_eq!(incidents[0].crime_type, "THEFT");
        assert_eq!(incidents[1].crime_type, "BREAKINGS");

        let summary = summarize_cluster(&incidents);
        assert_eq!(summary.size, 2);
        assert_eq!(summary.type_counts.len(), 2);
        assert_eq!(summary.type_counts[0].count, 1);
        assert_eq!(summary.type_counts[1].count, 1);
        assert_eq!(summary.dominant_type, "THEFT");
        assert_eq!(summary.wedges.len(), 2);
    }
}

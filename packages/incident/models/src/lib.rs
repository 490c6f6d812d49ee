#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Raw backend incident payload types and the normalized incident format.
//!
//! The backend reports incidents in several historical shapes. Everything
//! here is deserialization-tolerant: unrecognized location shapes, missing
//! fields, and string-encoded numbers all deserialize successfully and are
//! resolved (or dropped) downstream rather than failing the whole payload.

use serde::{Deserialize, Serialize};

/// An incident identifier, which the backend sends as either a string or an
/// integer depending on the data source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IncidentId {
    /// String identifier (e.g. `"OB/2024/0113"`).
    Text(String),
    /// Integer identifier.
    Number(i64),
}

impl std::fmt::Display for IncidentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// The location shapes the backend has been observed to send.
///
/// Variant order is the coordinate resolution priority: an object carrying
/// both an `x`/`y` pair and a `latitude`/`longitude` pair resolves as
/// [`Xy`](Self::Xy). Shapes that match none of the known layouts land in
/// [`Other`](Self::Other) and fall through to the incident's top-level
/// coordinate fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawLocation {
    /// Point-style shape where `x` is longitude and `y` is latitude.
    Xy {
        /// Longitude.
        x: f64,
        /// Latitude.
        y: f64,
    },
    /// Explicit latitude/longitude pair.
    LatLon {
        /// Latitude.
        latitude: f64,
        /// Longitude.
        longitude: f64,
    },
    /// `GeoJSON`-style coordinate pair, ordered `[longitude, latitude]`.
    GeoJsonPair {
        /// Coordinates in `GeoJSON` order.
        coordinates: Vec<f64>,
    },
    /// Anything else; never an error, resolved to "no coordinates".
    Other(serde_json::Value),
}

/// A crime category as sent by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawCategory {
    /// Category name; free-form, any casing.
    pub name: Option<String>,
}

/// A raw crime incident record as received from the backend.
///
/// All fields are optional so that a sparse record never fails to
/// deserialize; resolution and filtering happen during normalization.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RawIncident {
    /// Unique identifier.
    pub id: Option<IncidentId>,
    /// Police case number.
    pub case_number: Option<String>,
    /// Location in one of the known shapes.
    pub location: Option<RawLocation>,
    /// Explicit crime category.
    pub category: Option<RawCategory>,
    /// Free-text description.
    pub description: Option<String>,
    /// Date string as sent by the backend.
    pub date: Option<String>,
    /// Time string as sent by the backend.
    pub time: Option<String>,
    /// Generalized block-level address (never a precise street address).
    pub block_address: Option<String>,
    /// Reporting district name.
    pub district: Option<String>,
    /// Top-level latitude, used when `location` doesn't resolve.
    #[serde(default, deserialize_with = "lossy_number::deserialize")]
    pub latitude: Option<f64>,
    /// Top-level longitude, used when `location` doesn't resolve.
    #[serde(default, deserialize_with = "lossy_number::deserialize")]
    pub longitude: Option<f64>,
    /// Whether the incident is flagged violent.
    pub is_violent: Option<bool>,
    /// Property loss amount; the backend sends this as a numeric string.
    #[serde(default, deserialize_with = "lossy_number::deserialize")]
    pub property_loss: Option<f64>,
}

impl RawIncident {
    /// Returns a display label for this incident, for log messages.
    #[must_use]
    pub fn id_label(&self) -> String {
        self.id
            .as_ref()
            .map_or_else(|| "<no id>".to_owned(), ToString::to_string)
    }
}

/// A page of incidents from the paginated list endpoint.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IncidentPage {
    /// Incident records on this page.
    pub results: Vec<RawIncident>,
    /// URL of the next page, if any.
    pub next: Option<String>,
}

/// A resolved latitude/longitude pair.
///
/// Either field being `None` signals "unmappable"; consumers must exclude
/// such incidents from spatial rendering rather than defaulting to (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Coordinates {
    /// Latitude (WGS84).
    pub latitude: Option<f64>,
    /// Longitude (WGS84).
    pub longitude: Option<f64>,
}

impl Coordinates {
    /// Returns `true` if both coordinates resolved.
    #[must_use]
    pub const fn is_mappable(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// A crime incident normalized to the canonical shape.
///
/// `crime_type` is an uppercase label. Explicit backend categories pass
/// through uppercased verbatim (an open set); labels inferred from the
/// description come from the fixed taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedIncident {
    /// Unique identifier.
    pub id: String,
    /// Police case number.
    pub case_number: Option<String>,
    /// Uppercase crime type label.
    pub crime_type: String,
    /// Latitude; `None` when unresolvable.
    pub latitude: Option<f64>,
    /// Longitude; `None` when unresolvable.
    pub longitude: Option<f64>,
    /// Date string as sent by the backend.
    pub date: Option<String>,
    /// Time string as sent by the backend.
    pub time: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Generalized block-level address.
    pub block_address: Option<String>,
    /// Reporting district name.
    pub district: Option<String>,
    /// Whether the incident counts as violent.
    pub is_violent: bool,
    /// Property loss amount.
    pub property_loss: Option<f64>,
}

impl NormalizedIncident {
    /// Returns `true` if this incident can be placed on a map.
    #[must_use]
    pub const fn is_mappable(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// Deserializes a field that the backend sends as a number, a numeric
/// string, or garbage. Non-numeric values become `None` rather than errors.
pub mod lossy_number {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
        Other(serde_json::Value),
    }

    /// Deserializes an `Option<f64>` from a number or numeric string.
    ///
    /// # Errors
    ///
    /// Never fails; unparseable values deserialize as `None`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(
            match Option::<NumberOrText>::deserialize(deserializer)? {
                Some(NumberOrText::Number(n)) => Some(n),
                Some(NumberOrText::Text(s)) => s.trim().parse().ok(),
                Some(NumberOrText::Other(_)) | None => None,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_xy_wins_over_latlon_fields() {
        // Both shapes present in one object: the x/y pair takes priority.
        let location: RawLocation = serde_json::from_str(
            r#"{"x": 36.8, "y": -1.3, "latitude": 9.9, "longitude": 9.9}"#,
        )
        .unwrap();
        assert_eq!(location, RawLocation::Xy { x: 36.8, y: -1.3 });
    }

    #[test]
    fn location_latlon_shape() {
        let location: RawLocation =
            serde_json::from_str(r#"{"latitude": -1.3, "longitude": 36.8}"#).unwrap();
        assert_eq!(
            location,
            RawLocation::LatLon {
                latitude: -1.3,
                longitude: 36.8
            }
        );
    }

    #[test]
    fn location_geojson_shape() {
        let location: RawLocation =
            serde_json::from_str(r#"{"type": "Point", "coordinates": [36.8, -1.3]}"#).unwrap();
        assert_eq!(
            location,
            RawLocation::GeoJsonPair {
                coordinates: vec![36.8, -1.3]
            }
        );
    }

    #[test]
    fn unrecognized_location_never_fails() {
        let location: RawLocation =
            serde_json::from_str(r#"{"x": "not-a-number", "y": -1.3}"#).unwrap();
        assert!(matches!(location, RawLocation::Other(_)));
    }

    #[test]
    fn incident_id_string_or_number() {
        let text: IncidentId = serde_json::from_str(r#""OB/2024/0113""#).unwrap();
        assert_eq!(text.to_string(), "OB/2024/0113");

        let number: IncidentId = serde_json::from_str("42").unwrap();
        assert_eq!(number.to_string(), "42");
    }

    #[test]
    fn property_loss_numeric_string() {
        let incident: RawIncident =
            serde_json::from_str(r#"{"property_loss": "15000.50"}"#).unwrap();
        assert_eq!(incident.property_loss, Some(15000.50));

        let incident: RawIncident = serde_json::from_str(r#"{"property_loss": 200}"#).unwrap();
        assert_eq!(incident.property_loss, Some(200.0));

        let incident: RawIncident =
            serde_json::from_str(r#"{"property_loss": "unknown"}"#).unwrap();
        assert_eq!(incident.property_loss, None);
    }

    #[test]
    fn sparse_record_deserializes() {
        let incident: RawIncident = serde_json::from_str("{}").unwrap();
        assert_eq!(incident.id, None);
        assert_eq!(incident.location, None);
        assert_eq!(incident.id_label(), "<no id>");
    }
}

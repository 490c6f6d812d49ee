//! Coordinate resolution for raw incident records.
//!
//! The backend has sent locations in three shapes over time; the untagged
//! [`RawLocation`] sum type sniffs the shape once at the deserialization
//! boundary, and this module resolves it to a single canonical
//! [`Coordinates`] pair.

use crime_lens_incident_models::{Coordinates, RawIncident, RawLocation};

/// Resolves an incident's coordinates.
///
/// Resolution order, first match wins:
///
/// 1. `location.y`/`location.x` (y=latitude, x=longitude)
/// 2. `location.latitude`/`location.longitude`
/// 3. `location.coordinates` as a `GeoJSON` `[longitude, latitude]` pair
/// 4. top-level `latitude`/`longitude` fields, each filling any
///    still-missing value independently
///
/// Never fails: an unresolvable location yields `None` fields and a logged
/// warning. Callers must exclude unmappable incidents from spatial views
/// while keeping them in tabular ones.
#[must_use]
pub fn extract_coordinates(incident: &RawIncident) -> Coordinates {
    let (mut latitude, mut longitude) = match &incident.location {
        Some(RawLocation::Xy { x, y }) => (Some(*y), Some(*x)),
        Some(RawLocation::LatLon {
            latitude,
            longitude,
        }) => (Some(*latitude), Some(*longitude)),
        // GeoJSON convention orders coordinates [longitude, latitude]
        Some(RawLocation::GeoJsonPair { coordinates }) if coordinates.len() >= 2 => {
            (Some(coordinates[1]), Some(coordinates[0]))
        }
        _ => (None, None),
    };

    if latitude.is_none() {
        latitude = incident.latitude;
    }
    if longitude.is_none() {
        longitude = incident.longitude;
    }

    if latitude.is_none() || longitude.is_none() {
        log::warn!(
            "No resolvable coordinates for incident {}; excluding from spatial views",
            incident.id_label()
        );
    }

    Coordinates {
        latitude,
        longitude,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident_with(location: Option<RawLocation>) -> RawIncident {
        RawIncident {
            location,
            ..RawIncident::default()
        }
    }

    #[test]
    fn xy_shape_wins_over_top_level_fields() {
        let incident = RawIncident {
            location: Some(RawLocation::Xy { x: 36.8, y: -1.3 }),
            latitude: Some(9.9),
            longitude: Some(9.9),
            ..RawIncident::default()
        };

        let coords = extract_coordinates(&incident);
        assert_eq!(coords.latitude, Some(-1.3));
        assert_eq!(coords.longitude, Some(36.8));
    }

    #[test]
    fn latlon_shape_used_directly() {
        let incident = incident_with(Some(RawLocation::LatLon {
            latitude: -1.3,
            longitude: 36.8,
        }));

        let coords = extract_coordinates(&incident);
        assert_eq!(coords.latitude, Some(-1.3));
        assert_eq!(coords.longitude, Some(36.8));
    }

    #[test]
    fn geojson_pair_swapped() {
        let incident = incident_with(Some(RawLocation::GeoJsonPair {
            coordinates: vec![36.8, -1.3],
        }));

        let coords = extract_coordinates(&incident);
        assert_eq!(coords.latitude, Some(-1.3));
        assert_eq!(coords.longitude, Some(36.8));
    }

    #[test]
    fn short_geojson_pair_falls_through_to_top_level() {
        let incident = RawIncident {
            location: Some(RawLocation::GeoJsonPair {
                coordinates: vec![36.8],
            }),
            latitude: Some(-1.31),
            longitude: Some(36.81),
            ..RawIncident::default()
        };

        let coords = extract_coordinates(&incident);
        assert_eq!(coords.latitude, Some(-1.31));
        assert_eq!(coords.longitude, Some(36.81));
    }

    #[test]
    fn top_level_fields_fill_independently() {
        let incident = RawIncident {
            latitude: Some(-1.31),
            ..RawIncident::default()
        };

        let coords = extract_coordinates(&incident);
        assert_eq!(coords.latitude, Some(-1.31));
        assert_eq!(coords.longitude, None);
        assert!(!coords.is_mappable());
    }

    #[test]
    fn unresolvable_yields_none_not_zero() {
        let coords = extract_coordinates(&incident_with(None));
        assert_eq!(coords.latitude, None);
        assert_eq!(coords.longitude, None);
    }
}

//! Crime type classification for raw incident records.
//!
//! An explicit backend category always wins and passes through uppercased
//! verbatim. Without one, the free-text description is tested against an
//! ordered keyword rule table.

use crime_lens_crime_models::CrimeType;
use crime_lens_incident_models::RawIncident;

/// Ordered keyword inference rules, evaluated in sequence with first match
/// winning. This is a priority list, not a set: a description containing
/// both "robbery" and "theft" classifies as ROBBERY because it is tested
/// first.
const KEYWORD_RULES: &[(&[&str], CrimeType)] = &[
    (&["homicide", "murder"], CrimeType::Homicide),
    (&["robbery"], CrimeType::Robbery),
    (&["theft", "stealing"], CrimeType::Stealing),
    (&["breaking", "burglary"], CrimeType::Breakings),
    (&["drug", "narcotic"], CrimeType::DangerousDrugs),
    (&["traffic"], CrimeType::Traffic),
    (&["corruption"], CrimeType::Corruption),
    (&["damage"], CrimeType::CriminalDamage),
    (&["economic"], CrimeType::Economic),
    (&["violent"], CrimeType::Violent),
];

/// Resolves the uppercase crime type label for a raw incident.
///
/// 1. A present, non-empty `category.name` is uppercased and returned
///    verbatim (labels outside the canonical taxonomy are allowed through).
/// 2. Otherwise the lowercased description is tested against
///    [`KEYWORD_RULES`].
/// 3. Otherwise `"OTHER"`.
///
/// Total: always produces a label, never an error.
#[must_use]
pub fn classify(incident: &RawIncident) -> String {
    if let Some(name) = incident
        .category
        .as_ref()
        .and_then(|category| category.name.as_deref())
    {
        let name = name.trim();
        if !name.is_empty() {
            return name.to_uppercase();
        }
    }

    if let Some(description) = incident.description.as_deref() {
        let lower = description.to_lowercase();
        for (keywords, crime_type) in KEYWORD_RULES {
            if contains_any(&lower, keywords) {
                return crime_type.to_string();
            }
        }
    }

    CrimeType::Other.to_string()
}

/// Checks if `haystack` contains any of the given `needles`.
fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

// crates/reviewlink-core/src/model.rs

//! # Place Model
//!
//! Raw provider hits ([`PlaceCandidate`]) and the normalized record handed to
//! callers ([`PlaceRecord`]).

use serde::{Deserialize, Serialize};

/// Shown in place of a missing display name or address.
pub const NOT_AVAILABLE: &str = "N/A";

/// Public page where a customer can leave a review for a place.
pub const REVIEW_URL_BASE: &str = "https://search.google.com/local/writereview?placeid=";

/// Fields requested from the provider for both search and lookup.
pub const DEFAULT_FIELDS: &[PlaceField] = &[
    PlaceField::Id,
    PlaceField::DisplayName,
    PlaceField::FormattedAddress,
];

/// Maximum number of hits requested from a text search.
pub const MAX_SEARCH_RESULTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaceField {
    Id,
    DisplayName,
    FormattedAddress,
}

impl PlaceField {
    /// Field name as the provider spells it.
    pub fn wire_name(self) -> &'static str {
        match self {
            PlaceField::Id => "id",
            PlaceField::DisplayName => "displayName",
            PlaceField::FormattedAddress => "formattedAddress",
        }
    }
}

/// A hit as returned by a provider, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceCandidate {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
}

impl PlaceCandidate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            formatted_address: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn at(mut self, address: impl Into<String>) -> Self {
        self.formatted_address = Some(address.into());
        self
    }
}

/// Canonical place handed back to the caller.
///
/// Fields are private; a record is built once by the resolver and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRecord {
    id: String,
    display_name: String,
    formatted_address: String,
}

impl PlaceRecord {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn formatted_address(&self) -> &str {
        &self.formatted_address
    }

    /// Link to the place's public "write a review" page.
    pub fn review_url(&self) -> String {
        review_url(&self.id)
    }
}

impl From<PlaceCandidate> for PlaceRecord {
    fn from(c: PlaceCandidate) -> Self {
        Self {
            id: c.id,
            display_name: or_not_available(c.display_name),
            formatted_address: or_not_available(c.formatted_address),
        }
    }
}

fn or_not_available(v: Option<String>) -> String {
    match v {
        Some(s) if !s.trim().is_empty() => s,
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Builds the review link for a provider place id.
pub fn review_url(place_id: &str) -> String {
    format!("{REVIEW_URL_BASE}{}", place_id.trim())
}

/// Result of classifying a text search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmbiguityOutcome {
    Unique(PlaceRecord),
    AmbiguousDifferentNames,
    AmbiguousSameNameMultipleLocations { name: String, count: usize },
    NoResults,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_become_sentinel() {
        let record = PlaceRecord::from(PlaceCandidate::new("abc").named("  "));
        assert_eq!(record.id(), "abc");
        assert_eq!(record.display_name(), NOT_AVAILABLE);
        assert_eq!(record.formatted_address(), NOT_AVAILABLE);
    }

    #[test]
    fn review_url_uses_place_id() {
        let record = PlaceRecord::from(
            PlaceCandidate::new("ChIJN1t_tDeuEmsRUsoyG83frY4")
                .named("Google Sydney")
                .at("48 Pirrama Rd, Pyrmont NSW 2009, Australia"),
        );
        assert_eq!(
            record.review_url(),
            "https://search.google.com/local/writereview?placeid=ChIJN1t_tDeuEmsRUsoyG83frY4"
        );
    }

    #[test]
    fn record_serializes_camel_case() {
        let record = PlaceRecord::from(PlaceCandidate::new("x").named("Joe's Pizza"));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["displayName"], "Joe's Pizza");
        assert_eq!(json["formattedAddress"], NOT_AVAILABLE);
    }
}

// crates/reviewlink-core/src/resolver.rs

//! # Place Resolver
//!
//! Turns a pasted link, a bare id or a business name into one
//! [`PlaceRecord`].
//!
//! An id parameter always wins and is looked up directly. Anything else goes
//! through text search and [`classify`], which refuses to guess between
//! different businesses or between many branches of one chain.

use crate::error::{Error, Result};
use crate::model::{AmbiguityOutcome, PlaceCandidate, PlaceRecord};
use crate::provider::{LookupRequest, PlacesProvider, SearchRequest};
use crate::text::{extract_place_id, search_text};
use tracing::debug;

/// Same-named hits up to this count are accepted as one place.
pub const SAME_NAME_TOLERANCE: usize = 2;

pub struct PlaceResolver<P> {
    provider: P,
}

impl<P: PlacesProvider> PlaceResolver<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub async fn resolve(&self, input: &str) -> Result<PlaceRecord> {
        if input.trim().is_empty() {
            return Err(Error::InvalidInput("enter a place link, id or name".into()));
        }

        if let Some(id) = extract_place_id(input) {
            debug!(id, "resolving by place id");
            let candidate = self.provider.lookup_by_id(LookupRequest::new(id)).await?;
            return Ok(candidate.into());
        }

        let query = search_text(input);
        debug!(query = %query, "resolving by text search");
        let hits = self.provider.text_search(SearchRequest::new(query)).await?;

        match classify(hits) {
            AmbiguityOutcome::Unique(record) => Ok(record),
            AmbiguityOutcome::NoResults => Err(Error::NoResults),
            AmbiguityOutcome::AmbiguousDifferentNames => Err(Error::AmbiguousDifferentNames),
            AmbiguityOutcome::AmbiguousSameNameMultipleLocations { name, count } => {
                Err(Error::AmbiguousSameNameMultipleLocations { name, count })
            }
        }
    }
}

/// Decides whether a text search picked out one place.
///
/// Checked in order: no hits; a single hit; any name differing from the
/// first hit's; more than [`SAME_NAME_TOLERANCE`] same-named hits. Two
/// same-named hits resolve to the first one.
pub fn classify(hits: Vec<PlaceCandidate>) -> AmbiguityOutcome {
    let count = hits.len();
    let Some(first) = hits.first() else {
        return AmbiguityOutcome::NoResults;
    };
    if count == 1 {
        return AmbiguityOutcome::Unique(first.clone().into());
    }

    let first_name = shown_name(first);
    if hits[1..].iter().any(|h| shown_name(h) != first_name) {
        return AmbiguityOutcome::AmbiguousDifferentNames;
    }

    if count > SAME_NAME_TOLERANCE {
        let record = PlaceRecord::from(first.clone());
        return AmbiguityOutcome::AmbiguousSameNameMultipleLocations {
            name: record.display_name().to_string(),
            count,
        };
    }

    AmbiguityOutcome::Unique(first.clone().into())
}

/// The name as it will be displayed: blank and missing both mean "no name".
fn shown_name(hit: &PlaceCandidate) -> Option<&str> {
    hit.display_name.as_deref().filter(|n| !n.trim().is_empty())
}

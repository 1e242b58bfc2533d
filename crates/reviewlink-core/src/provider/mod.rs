// crates/reviewlink-core/src/provider/mod.rs

use crate::error::Result;
use crate::model::{PlaceCandidate, PlaceField, DEFAULT_FIELDS, MAX_SEARCH_RESULTS};
use std::future::Future;
use std::pin::Pin;

#[cfg(feature = "http")]
pub mod google;

pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub fields: Vec<PlaceField>,
    pub max_results: usize,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            fields: DEFAULT_FIELDS.to_vec(),
            max_results: MAX_SEARCH_RESULTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub id: String,
    pub fields: Vec<PlaceField>,
}

impl LookupRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: DEFAULT_FIELDS.to_vec(),
        }
    }
}

/// A place data service that can search by text and look up by id.
///
/// Futures are not required to be `Send`: the browser implementation wraps
/// JS promises.
pub trait PlacesProvider {
    /// Free text search, returning at most `max_results` hits in provider
    /// order.
    fn text_search(&self, request: SearchRequest) -> ProviderFuture<'_, Vec<PlaceCandidate>>;

    /// Direct lookup of one place by its provider id.
    fn lookup_by_id(&self, request: LookupRequest) -> ProviderFuture<'_, PlaceCandidate>;
}

impl<P: PlacesProvider + ?Sized> PlacesProvider for Box<P> {
    fn text_search(&self, request: SearchRequest) -> ProviderFuture<'_, Vec<PlaceCandidate>> {
        (**self).text_search(request)
    }

    fn lookup_by_id(&self, request: LookupRequest) -> ProviderFuture<'_, PlaceCandidate> {
        (**self).lookup_by_id(request)
    }
}

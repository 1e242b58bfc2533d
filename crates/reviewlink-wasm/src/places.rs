// crates/reviewlink-wasm/src/places.rs

//! Places provider backed by the maps JS library loaded on the page.

use reviewlink_core::provider::ProviderFuture;
use reviewlink_core::{
    Error, LookupRequest, PlaceCandidate, PlaceField, PlacesProvider, SearchRequest,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::js_message;

#[wasm_bindgen(inline_js = "
function __reviewlink_places() {
    const places = globalThis.google && google.maps && google.maps.places;
    if (!places) {
        throw new Error('the maps library is not loaded');
    }
    return places;
}

function __reviewlink_plain(place) {
    return {
        id: place.id,
        displayName: place.displayName ?? null,
        formattedAddress: place.formattedAddress ?? null,
    };
}

export async function reviewlink_search_text(query, fields, maxResults) {
    const { places } = await __reviewlink_places().Place.searchByText({
        textQuery: query,
        fields,
        maxResultCount: maxResults,
    });
    return (places || []).map(__reviewlink_plain);
}

export async function reviewlink_fetch_place(id, fields) {
    const place = new (__reviewlink_places().Place)({ id });
    await place.fetchFields({ fields });
    return __reviewlink_plain(place);
}
")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn reviewlink_search_text(
        query: &str,
        fields: js_sys::Array,
        max_results: u32,
    ) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch)]
    fn reviewlink_fetch_place(id: &str, fields: js_sys::Array) -> Result<js_sys::Promise, JsValue>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JsPlaces;

fn field_array(fields: &[PlaceField]) -> js_sys::Array {
    fields
        .iter()
        .map(|f| JsValue::from_str(f.wire_name()))
        .collect()
}

/// Rejections from the library (bad key, quota, ...) become provider errors
/// carrying the library's own message.
async fn settle(promise: Result<js_sys::Promise, JsValue>) -> Result<JsValue, Error> {
    let promise = promise.map_err(|e| Error::Provider(js_message(&e)))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| Error::Provider(js_message(&e)))
}

impl PlacesProvider for JsPlaces {
    fn text_search(&self, request: SearchRequest) -> ProviderFuture<'_, Vec<PlaceCandidate>> {
        Box::pin(async move {
            let max = u32::try_from(request.max_results).unwrap_or(u32::MAX);
            let value = settle(reviewlink_search_text(
                &request.query,
                field_array(&request.fields),
                max,
            ))
            .await?;
            serde_wasm_bindgen::from_value(value).map_err(|e| Error::Decode(e.to_string()))
        })
    }

    fn lookup_by_id(&self, request: LookupRequest) -> ProviderFuture<'_, PlaceCandidate> {
        Box::pin(async move {
            let value =
                settle(reviewlink_fetch_place(&request.id, field_array(&request.fields))).await?;
            serde_wasm_bindgen::from_value(value).map_err(|e| Error::Decode(e.to_string()))
        })
    }
}

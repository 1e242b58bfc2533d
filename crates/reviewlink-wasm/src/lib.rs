//! reviewlink-wasm — WebAssembly bindings for reviewlink-core
//!
//! This crate runs the review-link page logic in the browser: it loads the
//! maps script once per page, resolves what the user pasted into a single
//! place, and remembers the API key and last place in `localStorage`.
//!
//! What it provides
//! ----------------
//! - Automatic initialization on module load (via `#[wasm_bindgen(start)]`)
//! - `ensure_loaded(apiKey)` — single-flight script load with a 10 s timeout
//! - `resolve_place(input)` — `{ id, name, address, reviewUrl }`
//! - `review_url(placeId)`, `extract_place_id(input)`
//! - `saved_api_key()`, `save_api_key(key)`, `last_place()`, `load_state()`
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { ensure_loaded, resolve_place, saved_api_key } from 'reviewlink-wasm';
//!
//! async function lookup(input) {
//!   await init();
//!   await ensure_loaded(saved_api_key());
//!   try {
//!     const place = await resolve_place(input);
//!     console.log(place.name, place.reviewUrl);
//!   } catch (e) {
//!     // e.kind: "ambiguous_same_name", "timeout", ...
//!     console.warn(e.kind, e.message);
//!   }
//! }
//! ```
//!
//! Notes
//! -----
//! - Rejections are JS `Error`s with a user-facing `message` and a `kind`.
//! - `resolve_place` stores the resolved place as the last place.

use js_sys::Reflect;
use reviewlink_core::loader::ScriptLoader;
use reviewlink_core::store::{KeyValueStore, KEY_API_KEY};
use reviewlink_core::{Error, LoadPhase, PlaceRecord, PlaceResolver};
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

mod host;
mod places;
mod storage;

pub use host::{BrowserHost, BrowserTimer};
pub use places::JsPlaces;
pub use storage::LocalStore;

thread_local! {
    // One loader per page; the browser main thread is the only thread.
    static LOADER: ScriptLoader<BrowserHost, BrowserTimer> =
        ScriptLoader::new(BrowserHost::default(), BrowserTimer);
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    web_sys::console::log_1(&"reviewlink WASM module ready".into());
}

/* --------------------------------------------------------------------------
   Script loading
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub async fn ensure_loaded(api_key: String) -> Result<(), JsValue> {
    let pending = LOADER.with(|loader| loader.ensure_loaded(&api_key));
    pending.await.map_err(to_js_error)
}

/// `"unloaded"`, `"loading"`, `"loaded"` or `"failed"`.
#[wasm_bindgen]
pub fn load_state() -> String {
    let phase = LOADER.with(|loader| loader.state());
    match phase {
        LoadPhase::Unloaded => "unloaded",
        LoadPhase::Loading => "loading",
        LoadPhase::Loaded => "loaded",
        LoadPhase::Failed(_) => "failed",
    }
    .to_string()
}

/* --------------------------------------------------------------------------
   Place resolution
-------------------------------------------------------------------------- */

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlaceView<'a> {
    id: &'a str,
    name: &'a str,
    address: &'a str,
    review_url: String,
}

impl<'a> From<&'a PlaceRecord> for PlaceView<'a> {
    fn from(p: &'a PlaceRecord) -> Self {
        Self {
            id: p.id(),
            name: p.display_name(),
            address: p.formatted_address(),
            review_url: p.review_url(),
        }
    }
}

#[wasm_bindgen]
pub async fn resolve_place(input: String) -> Result<JsValue, JsValue> {
    let resolver = PlaceResolver::new(JsPlaces);
    let place = resolver.resolve(&input).await.map_err(to_js_error)?;

    match LocalStore::open().and_then(|mut store| store.save_last_place(&place)) {
        Ok(()) => {}
        Err(e) => tracing::warn!(error = %e, "could not remember the last place"),
    }

    to_value(&PlaceView::from(&place)).map_err(JsValue::from)
}

#[wasm_bindgen]
pub fn review_url(place_id: &str) -> String {
    reviewlink_core::review_url(place_id)
}

#[wasm_bindgen]
pub fn extract_place_id(input: &str) -> Option<String> {
    reviewlink_core::text::extract_place_id(input).map(str::to_string)
}

/* --------------------------------------------------------------------------
   Persistence
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub fn saved_api_key() -> Option<String> {
    LocalStore::open().ok().and_then(|store| store.api_key())
}

#[wasm_bindgen]
pub fn save_api_key(key: &str) -> Result<(), JsValue> {
    let key = key.trim();
    if key.is_empty() {
        return Err(to_js_error(Error::InvalidInput("API key is empty".into())));
    }
    let mut store = LocalStore::open().map_err(to_js_error)?;
    store.set(KEY_API_KEY, key).map_err(to_js_error)
}

/// The last resolved place, or `null`.
#[wasm_bindgen]
pub fn last_place() -> JsValue {
    LocalStore::open()
        .ok()
        .and_then(|store| store.last_place())
        .and_then(|place| to_value(&PlaceView::from(&place)).ok())
        .unwrap_or(JsValue::NULL)
}

/* --------------------------------------------------------------------------
   Helpers
-------------------------------------------------------------------------- */

fn to_js_error(e: Error) -> JsValue {
    let err = js_sys::Error::new(&e.to_string());
    let _ = Reflect::set(&err, &"kind".into(), &e.kind().into());
    err.into()
}

/// Best readable text for a thrown JS value.
pub(crate) fn js_message(v: &JsValue) -> String {
    if let Some(err) = v.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    v.as_string().unwrap_or_else(|| format!("{v:?}"))
}

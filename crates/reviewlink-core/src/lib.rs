// crates/reviewlink-core/src/lib.rs

//! reviewlink-core — find a business and link to its review page.
//!
//! Two pieces do the work:
//! - [`ScriptLoader`] loads the maps script once and shares the in-flight
//!   load with every caller.
//! - [`PlaceResolver`] turns a pasted link, a place id or a business name
//!   into one [`PlaceRecord`], refusing ambiguous searches with a typed
//!   [`Error`].
//!
//! ```rust,no_run
//! # #[cfg(feature = "http")]
//! # async fn demo() -> reviewlink_core::Result<()> {
//! use reviewlink_core::prelude::*;
//!
//! let resolver = PlaceResolver::new(GooglePlaces::new("AIza...")?);
//! let place = resolver.resolve("Joe's Pizza, Carmine St").await?;
//! println!("{} -> {}", place.display_name(), place.review_url());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;
pub mod model;
pub mod prelude;
pub mod provider;
pub mod resolver;
pub mod store;
pub mod text;

// Re-exports
pub use crate::error::{Error, Result};
pub use crate::loader::{LoadFuture, LoadPhase, ScriptHost, ScriptLoader, Timer};
pub use crate::model::{
    review_url, AmbiguityOutcome, PlaceCandidate, PlaceField, PlaceRecord, NOT_AVAILABLE,
};
pub use crate::provider::{LookupRequest, PlacesProvider, SearchRequest};
pub use crate::resolver::{classify, PlaceResolver};
pub use crate::store::{KeyValueStore, MemoryStore};

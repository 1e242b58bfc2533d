// crates/reviewlink-core/src/prelude.rs
pub use crate::error::{Error, Result};
pub use crate::loader::{LoadPhase, ReadyHook, ScriptHost, ScriptLoader, ScriptRequest, Timer};
pub use crate::model::{review_url, PlaceCandidate, PlaceRecord};
#[cfg(feature = "http")]
pub use crate::provider::google::GooglePlaces;
pub use crate::provider::PlacesProvider;
pub use crate::resolver::PlaceResolver;
pub use crate::store::KeyValueStore;

//! reviewlink-rs — workspace umbrella crate.
//!
//! Re-exports `reviewlink-core` so the demos under `demos/` can be run from
//! the workspace root (`cargo run --example resolve_place -- "Joe's Pizza"`).
pub use reviewlink_core::*;

//! reviewlink-cli
//! ==============
//!
//! Command-line interface for `reviewlink-core`.
//!
//! The binary (`reviewlink`) is the primary deliverable. The library target
//! holds the on-disk [`FileStore`] so it can be tested and reused.
//!
//! Quick start
//! -----------
//!
//! ```text
//! reviewlink set-key AIza...
//! reviewlink resolve "https://maps.google.com/maps/place/Joe's+Pizza/@40.73,-74.00,17z"
//! reviewlink link ChIJN1t_tDeuEmsRUsoyG83frY4
//! reviewlink last
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod file_store;

pub use file_store::FileStore;

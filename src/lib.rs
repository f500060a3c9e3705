//! geonames-rs
//!
//! Workspace umbrella crate. Re-exports [`geonames_core`] so the demos can use
//! a single import path.

pub use geonames_core::*;

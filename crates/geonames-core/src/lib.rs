// crates/geonames-core/src/lib.rs

//! # geonames-core
//!
//! In-memory city gazetteer built from GeoNames dumps (`cities1000.txt`).
//!
//! Two queries are served by [`GeoIndex`]:
//! - substring search over name, ascii name and alternate names, restricted
//!   to real cities (`PPL`, `PPLC`, `PPLA`);
//! - k-nearest cities around a named city, globally or inside one country.
//!
//! Distances are planar on raw latitude/longitude degrees. Results near the
//! antimeridian or the poles are approximate.
//!
//! ```rust
//! use geonames_core::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let index = GeoIndex::init(vec![
//!         CityRecord::new("Paris", 48.8566, 2.3522, "PPLC", "FR"),
//!         CityRecord::new("Versailles", 48.8049, 2.1204, "PPLA2", "FR"),
//!         CityRecord::new("Orléans", 47.9029, 1.9093, "PPLA", "FR"),
//!     ])?;
//!
//!     let hits = index.nearest_cities("paris", 2, None)?;
//!     assert_eq!(hits[0].name, "Versailles");
//!     assert_eq!(hits[1].name, "Orléans");
//!     Ok(())
//! }
//! ```

pub mod common;
pub mod config;
pub mod country;
pub mod error;
pub mod geoindex; // The query facade
pub mod loader; // The public loader
pub mod model;
pub mod spatial;
pub mod store;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::common::DbStats;
pub use crate::config::LoadOptions;
pub use crate::country::CountryIndexCache;
pub use crate::error::{GeoError, Result};
pub use crate::geoindex::GeoIndex;
pub use crate::model::{CityHit, CityRecord, Coordinate, FeatureCode, RecordId};
pub use crate::spatial::{Neighbor, SpatialIndex};
pub use crate::store::RecordStore;
// Export the Search Trait (Crucial for users!)
pub use crate::traits::{CitySearch, NameMatch};
pub use crate::text::fold_key;

/// Common types and traits for applications and examples.
pub mod prelude {
    pub use crate::config::LoadOptions;
    pub use crate::error::{GeoError, Result};
    pub use crate::geoindex::GeoIndex;
    pub use crate::model::{CityHit, CityRecord, Coordinate, FeatureCode};
    pub use crate::traits::{CitySearch, NameMatch};
}

// crates/geonames-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the Physical Layer (I/O, Decompression) and delegates to the
//! GeoNames parser or the binary snapshot reader.

use crate::config::{default_data_dir, default_dataset_filename, LoadOptions};
use crate::error::Result;
use crate::geoindex::GeoIndex;
use crate::model::CityRecord;
use std::path::{Path, PathBuf};

pub mod cache;
pub mod common_io;
pub mod geonames;

pub use cache::{load_cached, load_snapshot, save_snapshot};
pub use common_io::open_stream;
pub use geonames::parse_geonames;

/// Reads a dump (plain or `.gz`) into records, honouring `options`
/// (filters and snapshot cache).
pub fn load_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Vec<CityRecord>> {
    load_cached(path.as_ref(), options)
}

impl GeoIndex {
    /// **Standard Loader:** parses a GeoNames dump and builds the index.
    pub fn load_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        let records = load_from_path(path, options)?;
        GeoIndex::init(records)
    }

    /// Loads `<crate>/data/cities1000.txt` with default options.
    pub fn load_default() -> Result<Self> {
        Self::load_from_path(Self::default_dataset_path(), &LoadOptions::default())
    }

    pub fn default_dataset_path() -> PathBuf {
        default_data_dir().join(default_dataset_filename())
    }
}

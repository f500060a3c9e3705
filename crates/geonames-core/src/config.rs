// crates/geonames-core/src/config.rs

//! Load-time configuration and dataset location defaults.

use crate::model::CityRecord;
use std::path::PathBuf;

/// Where the GeoNames dump can be downloaded (zip archive holding `cities1000.txt`).
pub const DATA_SOURCE_URL: &str = "https://download.geonames.org/export/dump/cities1000.zip";

/// File extension appended to the dump name for the binary record snapshot.
#[cfg(not(feature = "compact"))]
pub const SNAPSHOT_SUFFIX: &str = "records.bin";
#[cfg(feature = "compact")]
pub const SNAPSHOT_SUFFIX: &str = "records.bin.gz";

/// Options applied while turning a dump into records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Keep only these ISO2 country codes (case-insensitive). `None` keeps all.
    pub country_filter: Option<Vec<String>>,
    /// Drop places whose population is known and below this value.
    pub min_population: Option<u64>,
    /// Read and refresh the binary snapshot next to the dump.
    pub use_cache: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            country_filter: None,
            min_population: None,
            use_cache: true,
        }
    }
}

impl LoadOptions {
    /// Restricts loading to the given ISO2 codes. Blank entries are ignored;
    /// an empty list disables the filter.
    pub fn with_countries<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let codes: Vec<String> = codes
            .into_iter()
            .map(|c| c.as_ref().trim().to_ascii_uppercase())
            .filter(|c| !c.is_empty())
            .collect();
        self.country_filter = (!codes.is_empty()).then_some(codes);
        self
    }

    pub fn with_min_population(mut self, min_population: u64) -> Self {
        self.min_population = Some(min_population);
        self
    }

    pub fn without_cache(mut self) -> Self {
        self.use_cache = false;
        self
    }

    /// Whether `record` passes the country and population filters.
    pub fn keeps(&self, record: &CityRecord) -> bool {
        let country_ok = self.country_filter.as_ref().map_or(true, |codes| {
            codes
                .iter()
                .any(|c| c.eq_ignore_ascii_case(&record.country_code))
        });
        let population_ok = match (self.min_population, record.population) {
            (Some(min), Some(population)) => population >= min,
            _ => true,
        };
        country_ok && population_ok
    }

    /// True when no filter is active.
    pub fn keeps_everything(&self) -> bool {
        self.country_filter.is_none() && self.min_population.is_none()
    }
}

/// Directory holding the bundled dataset (`<crate>/data`).
pub fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

pub fn default_dataset_filename() -> &'static str {
    "cities1000.txt"
}

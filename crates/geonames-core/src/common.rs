// crates/geonames-core/src/common.rs
use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for the loaded gazetteer.
///
/// Returned by [`CitySearch::stats`](crate::CitySearch::stats). Counts reflect
/// the in-memory store after any filtering applied at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    pub records: usize,
    /// Records with a `PPL`, `PPLC` or `PPLA` feature code.
    pub true_cities: usize,
    pub countries: usize,
    /// Records whose coordinate was already taken by an earlier record.
    pub coordinate_collisions: usize,
    /// Country indices built so far.
    pub cached_countries: usize,
}

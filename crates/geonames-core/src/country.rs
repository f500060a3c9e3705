// crates/geonames-core/src/country.rs

//! Lazily built per-country spatial indices.
//!
//! # Thread Safety
//!
//! - Key-level access via `DashMap` (per-shard locks, held only while the
//!   entry's cell is fetched)
//! - Build-level exclusion via `OnceCell`: concurrent first callers for one
//!   country wait on a single build, other countries proceed independently

use crate::spatial::SpatialIndex;
use crate::store::RecordStore;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

type Slot = Arc<OnceCell<Arc<SpatialIndex>>>;

/// Country code → spatial index over that country's cities.
///
/// Entries are created on first request and never evicted; the dataset is
/// static so they cannot go stale. Countries without cities cache an empty
/// index, so repeated lookups do not rescan the store.
#[derive(Debug, Default)]
pub struct CountryIndexCache {
    entries: DashMap<String, Slot>,
    builds: AtomicUsize,
}

impl CountryIndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index for `country_code`, building it from `store` on
    /// first use. Codes are matched case-insensitively.
    pub fn get_or_build(&self, country_code: &str, store: &RecordStore) -> Arc<SpatialIndex> {
        let key = normalize_code(country_code);
        let slot: Slot = Arc::clone(&self.entries.entry(key.clone()).or_default());

        let index = slot.get_or_init(|| {
            let (coordinates, records) = store.country_entries(&key);
            let index = SpatialIndex::from_entries(coordinates.into_iter().zip(records));
            self.builds.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(country = %key, cities = index.len(), "built country index");
            Arc::new(index)
        });
        Arc::clone(index)
    }

    /// Cached index for `country_code`, without building.
    pub fn get(&self, country_code: &str) -> Option<Arc<SpatialIndex>> {
        let slot = Arc::clone(self.entries.get(&normalize_code(country_code))?.value());
        slot.get().cloned()
    }

    /// Number of countries with a built index.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total builds performed since creation.
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    /// Drops every cached index.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

fn normalize_code(country_code: &str) -> String {
    country_code.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CityRecord, Coordinate};
    use std::sync::Barrier;

    fn store() -> RecordStore {
        RecordStore::load(vec![
            CityRecord::new("Paris", 48.8566, 2.3522, "PPLC", "FR"),
            CityRecord::new("Berlin", 52.524, 13.410, "PPLC", "DE"),
            CityRecord::new("Lyon", 45.748, 4.847, "PPLA", "FR"),
            CityRecord::new("Hamburg", 53.551, 9.993, "PPLA", "DE"),
        ])
        .unwrap()
    }

    #[test]
    fn builds_once_per_country() {
        let store = store();
        let cache = CountryIndexCache::new();

        let first = cache.get_or_build("fr", &store);
        let second = cache.get_or_build("FR", &store);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.builds(), 1);
        assert_eq!(first.coordinates(), second.coordinates());

        assert_eq!(first.len(), 2);
        assert_eq!(first.record_id(0), Some(0));
        assert_eq!(first.record_id(1), Some(2));
    }

    #[test]
    fn unknown_country_caches_empty_index() {
        let store = store();
        let cache = CountryIndexCache::new();

        let zz = cache.get_or_build("ZZ", &store);
        assert!(zz.is_empty());
        assert!(zz.query(Coordinate::new(0.0, 0.0), 3).is_empty());

        cache.get_or_build("zz", &store);
        assert_eq!(cache.builds(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn get_does_not_build() {
        let store = store();
        let cache = CountryIndexCache::new();
        assert!(cache.get("DE").is_none());
        assert!(cache.is_empty());

        cache.get_or_build("DE", &store);
        assert_eq!(cache.get("de").map(|i| i.len()), Some(2));

        cache.clear();
        assert!(cache.get("DE").is_none());
    }

    #[test]
    fn concurrent_first_access_builds_once() {
        let store = store();
        let cache = CountryIndexCache::new();
        let threads = 8;
        let barrier = Barrier::new(threads);

        let indices: Vec<Arc<SpatialIndex>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..threads)
                .map(|i| {
                    let (cache, store, barrier) = (&cache, &store, &barrier);
                    s.spawn(move || {
                        barrier.wait();
                        let code = if i % 2 == 0 { "de" } else { "DE" };
                        cache.get_or_build(code, store)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(cache.builds(), 1);
        assert!(indices.iter().all(|i| Arc::ptr_eq(i, &indices[0])));
    }
}

// crates/geonames-core/src/geoindex.rs

//! `GeoIndex`, the owned gazetteer: record store, global spatial index and
//! per-country index cache behind the two queries of [`CitySearch`].
//!
//! Built once by [`GeoIndex::init`] and shared read-only afterwards (wrap it
//! in an `Arc` to hand it to several threads). Only the country cache mutates
//! after construction, and it does so under its own per-key guarantee.

use crate::common::DbStats;
use crate::country::CountryIndexCache;
use crate::error::{GeoError, Result};
use crate::model::{CityHit, CityRecord, Coordinate, RecordId};
use crate::spatial::{Neighbor, SpatialIndex};
use crate::store::RecordStore;
use crate::text::{fold_key, is_true_city};
use crate::traits::CitySearch;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug)]
pub struct GeoIndex {
    store: RecordStore,
    global: Arc<SpatialIndex>,
    countries: CountryIndexCache,
}

impl GeoIndex {
    /// Validates `records` and builds the global index over all of them.
    pub fn init<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = CityRecord>,
    {
        let store = RecordStore::load(records)?;
        Ok(Self::new(store))
    }

    /// Builds the global index over an already loaded store.
    pub fn new(store: RecordStore) -> Self {
        let now = Instant::now();
        let global = SpatialIndex::from_entries(
            store
                .all()
                .iter()
                .enumerate()
                .map(|(id, record)| (record.coordinate, id)),
        );
        tracing::info!(
            points = global.len(),
            elapsed_ms = now.elapsed().as_millis() as u64,
            "built global spatial index"
        );

        Self {
            store,
            global: Arc::new(global),
            countries: CountryIndexCache::new(),
        }
    }

    /// Releases the index and its cached country indices.
    pub fn teardown(self) {
        let cached = self.countries.len();
        self.countries.clear();
        tracing::info!(
            records = self.store.len(),
            cached_countries = cached,
            "geo index torn down"
        );
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn global_index(&self) -> &SpatialIndex {
        &self.global
    }

    pub fn country_cache(&self) -> &CountryIndexCache {
        &self.countries
    }

    /// First record in load order whose name, ascii name or any alternate
    /// name contains `city_name` (case-insensitive).
    ///
    /// This is first-match, not best-match: "Paris" resolves to whichever
    /// record containing "paris" was loaded first.
    pub fn resolve_city(&self, city_name: &str) -> Option<(RecordId, &CityRecord)> {
        let folded = fold_key(city_name.trim());
        if folded.is_empty() {
            return None;
        }
        self.resolve_folded(&folded)
    }

    fn resolve_folded(&self, folded: &str) -> Option<(RecordId, &CityRecord)> {
        self.store.matching(folded).next()
    }

    /// The `k` cities closest to `point`, optionally inside one country.
    pub fn nearest_to(
        &self,
        point: Coordinate,
        k: usize,
        country_code: Option<&str>,
    ) -> Result<Vec<CityHit>> {
        check_k(k)?;
        let index = self.candidates(country_code)?;
        Ok(self.hits(index.query(point, k), None, k))
    }

    /// Global index, or the cached index of `country_code`.
    fn candidates(&self, country_code: Option<&str>) -> Result<Arc<SpatialIndex>> {
        let country = country_code.map(str::trim).filter(|c| !c.is_empty());
        let index = match country {
            Some(code) => self.countries.get_or_build(code, &self.store),
            None => Arc::clone(&self.global),
        };
        if index.is_empty() {
            return Err(no_candidates(country_code));
        }
        Ok(index)
    }

    /// Maps neighbours to hits through their record ids, keeping distance order.
    fn hits(&self, neighbors: Vec<Neighbor>, exclude: Option<RecordId>, k: usize) -> Vec<CityHit> {
        neighbors
            .into_iter()
            .filter(|n| Some(n.record) != exclude)
            .take(k)
            .filter_map(|n| self.store.get(n.record))
            .map(CityRecord::hit)
            .collect()
    }
}

impl CitySearch for GeoIndex {
    fn stats(&self) -> DbStats {
        DbStats {
            records: self.store.len(),
            true_cities: self.store.all().iter().filter(|r| is_true_city(r)).count(),
            countries: self.store.country_counts().len(),
            coordinate_collisions: self.store.coordinate_collisions(),
            cached_countries: self.countries.len(),
        }
    }

    fn search_by_name(&self, keyword: &str) -> Result<Vec<CityHit>> {
        let folded = folded_keyword(keyword)?;
        let hits: Vec<CityHit> = self
            .store
            .matching(&folded)
            .filter(|(_, record)| is_true_city(record))
            .map(|(_, record)| record.hit())
            .collect();
        tracing::debug!(keyword, hits = hits.len(), "search by name");
        Ok(hits)
    }

    fn nearest_cities(
        &self,
        city_name: &str,
        k: usize,
        country_code: Option<&str>,
    ) -> Result<Vec<CityHit>> {
        check_k(k)?;
        let folded = folded_keyword(city_name)?;
        let (origin_id, origin) = self
            .resolve_folded(&folded)
            .ok_or_else(|| GeoError::CityNotFound(city_name.trim().to_string()))?;
        let index = self.candidates(country_code)?;

        tracing::debug!(
            city = %origin.name,
            at = %origin.coordinate,
            k,
            country = country_code.unwrap_or("*"),
            "nearest cities"
        );

        // One extra neighbour covers the origin, which is dropped.
        let neighbors = index.query(origin.coordinate, k.saturating_add(1));
        let hits = self.hits(neighbors, Some(origin_id), k);
        if hits.is_empty() {
            // The origin was the only point in scope.
            return Err(no_candidates(country_code));
        }
        Ok(hits)
    }
}

fn no_candidates(country_code: Option<&str>) -> GeoError {
    GeoError::NoCandidates {
        country: country_code
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_ascii_uppercase),
    }
}

fn folded_keyword(keyword: &str) -> Result<String> {
    let folded = fold_key(keyword.trim());
    if folded.is_empty() {
        return Err(GeoError::InvalidQuery("empty keyword".into()));
    }
    Ok(folded)
}

fn check_k(k: usize) -> Result<()> {
    if k == 0 {
        return Err(GeoError::InvalidQuery("k must be positive".into()));
    }
    Ok(())
}

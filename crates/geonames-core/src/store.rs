// crates/geonames-core/src/store.rs
use crate::error::{GeoError, Result};
use crate::model::{CityRecord, CoordKey, Coordinate, RecordId};
use crate::text::fold_key;
use crate::traits::NameMatch;
use std::collections::{BTreeMap, HashMap};

/// Owner of every loaded [`CityRecord`].
///
/// Populated once by [`RecordStore::load`] and read-only afterwards, so it can
/// be shared between threads without locking.
#[derive(Clone, Debug, Default)]
pub struct RecordStore {
    records: Vec<CityRecord>,
    /// Lower-cased name, ascii name and alternate names, per record.
    name_keys: Vec<Box<[String]>>,
    by_coordinate: HashMap<CoordKey, RecordId>,
    collisions: usize,
}

impl RecordStore {
    /// Validates and stores `records` in the given order.
    ///
    /// Fails on the first record with an empty name / ascii name or a
    /// non-finite or out-of-range coordinate. Nothing is exposed on failure.
    ///
    /// Distinct records sharing a coordinate make [`RecordStore::by_coordinate`]
    /// lossy: the last one loaded wins.
    pub fn load<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = CityRecord>,
    {
        let records: Vec<CityRecord> = records.into_iter().collect();
        for (index, record) in records.iter().enumerate() {
            validate(index, record)?;
        }

        let mut by_coordinate = HashMap::with_capacity(records.len());
        let mut collisions = 0usize;
        for (id, record) in records.iter().enumerate() {
            if by_coordinate.insert(record.coordinate.key(), id).is_some() {
                collisions += 1;
            }
        }

        let name_keys: Vec<Box<[String]>> = records
            .iter()
            .map(|record| {
                std::iter::once(record.name_str())
                    .chain(record.alias_strs())
                    .map(fold_key)
                    .collect::<Box<[String]>>()
            })
            .collect();

        if collisions > 0 {
            tracing::warn!(
                collisions,
                "duplicate coordinates; coordinate lookup keeps the last record"
            );
        }
        tracing::info!(records = records.len(), "record store loaded");

        Ok(Self {
            records,
            name_keys,
            by_coordinate,
            collisions,
        })
    }

    /// All records in load order.
    pub fn all(&self) -> &[CityRecord] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&CityRecord> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose name, ascii name or any alternate name contains
    /// `folded_keyword` (already passed through [`fold_key`]), in load order.
    pub fn matching<'a, 'k>(
        &'a self,
        folded_keyword: &'k str,
    ) -> impl Iterator<Item = (RecordId, &'a CityRecord)> + use<'a, 'k> {
        self.records
            .iter()
            .zip(&self.name_keys)
            .enumerate()
            .filter(move |(_, (_, keys))| keys.iter().any(|k| k.contains(folded_keyword)))
            .map(|(id, (record, _))| (id, record))
    }

    /// Record stored at exactly this coordinate.
    pub fn by_coordinate(&self, lat: f64, lng: f64) -> Option<&CityRecord> {
        let id = self.by_coordinate.get(&Coordinate::new(lat, lng).key())?;
        self.records.get(*id)
    }

    /// Coordinates of every record of one country (ASCII case-insensitive),
    /// in load order.
    pub fn filter_by_country(&self, country_code: &str) -> Vec<Coordinate> {
        self.country_records(country_code)
            .map(|(_, record)| record.coordinate)
            .collect()
    }

    /// Like [`RecordStore::filter_by_country`], carrying each coordinate's record id.
    pub fn country_entries(&self, country_code: &str) -> (Vec<Coordinate>, Vec<RecordId>) {
        self.country_records(country_code)
            .map(|(id, record)| (record.coordinate, id))
            .unzip()
    }

    /// All coordinates in load order.
    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.records.iter().map(|r| r.coordinate).collect()
    }

    /// Number of records that overwrote an earlier record's coordinate.
    pub fn coordinate_collisions(&self) -> usize {
        self.collisions
    }

    /// Record count per upper-cased country code, sorted by code.
    pub fn country_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts
                .entry(record.country_code.to_ascii_uppercase())
                .or_insert(0) += 1;
        }
        counts
    }

    /// Distinct upper-cased country codes, sorted.
    pub fn country_codes(&self) -> Vec<String> {
        self.country_counts().into_keys().collect()
    }

    fn country_records<'a>(
        &'a self,
        country_code: &'a str,
    ) -> impl Iterator<Item = (RecordId, &'a CityRecord)> + 'a {
        let code = country_code.trim();
        self.records
            .iter()
            .enumerate()
            .filter(move |(_, r)| r.country_code.eq_ignore_ascii_case(code))
    }
}

fn validate(index: usize, record: &CityRecord) -> Result<()> {
    let invalid = |reason: &str| GeoError::InvalidRecord {
        index,
        reason: reason.to_string(),
    };

    if record.name.trim().is_empty() {
        return Err(invalid("empty name"));
    }
    if record.ascii_name.trim().is_empty() {
        return Err(invalid("empty ascii name"));
    }
    let Coordinate { lat, lng } = record.coordinate;
    if !lat.is_finite() || !lng.is_finite() {
        return Err(invalid("non-finite coordinate"));
    }
    if !record.coordinate.is_valid() {
        return Err(GeoError::InvalidRecord {
            index,
            reason: format!("coordinate {} out of range", record.coordinate),
        });
    }
    Ok(())
}

// crates/geonames-core/src/loader/cache.rs

//! Binary snapshot of parsed records, stored next to the dump.
//!
//! Only records are cached. Spatial indices are always rebuilt in memory.

use super::common_io;
use super::geonames::parse_geonames;
use crate::config::{LoadOptions, SNAPSHOT_SUFFIX};
use crate::error::{GeoError, Result};
use crate::model::CityRecord;
use bincode::Options;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::{write::GzEncoder, Compression};

/// Bumped whenever [`CityRecord`]'s layout changes.
const SNAPSHOT_VERSION: u32 = 1;

/// 256MB limit to prevent malicious data bombs.
const SNAPSHOT_LIMIT: u64 = 256 * 1024 * 1024;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    records: &'a [CityRecord],
}

#[derive(Deserialize)]
struct Snapshot {
    version: u32,
    records: Vec<CityRecord>,
}

fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(SNAPSHOT_LIMIT)
        .allow_trailing_bytes()
}

/// Writes `records` to `path`; gzipped when the path ends in `.gz`.
pub fn save_snapshot(path: &Path, records: &[CityRecord]) -> Result<()> {
    let snapshot = SnapshotRef {
        version: SNAPSHOT_VERSION,
        records,
    };
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    if common_io::is_gzip(path) {
        #[cfg(feature = "compact")]
        {
            let mut encoder = GzEncoder::new(writer, Compression::default());
            bincode_options().serialize_into(&mut encoder, &snapshot)?;
            encoder.finish()?.flush()?;
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(GeoError::InvalidData(
                "Gzip requested but 'compact' disabled".into(),
            ));
        }
    } else {
        let mut writer = writer;
        bincode_options().serialize_into(&mut writer, &snapshot)?;
        writer.flush()?;
    }

    tracing::debug!(path = %path.display(), records = records.len(), "wrote record snapshot");
    Ok(())
}

/// Reads a snapshot written by [`save_snapshot`].
pub fn load_snapshot(path: &Path) -> Result<Vec<CityRecord>> {
    let reader = common_io::open_stream(path)?;
    let snapshot: Snapshot = bincode_options().deserialize_from(reader)?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(GeoError::InvalidData(format!(
            "snapshot version {} (expected {SNAPSHOT_VERSION})",
            snapshot.version
        )));
    }
    Ok(snapshot.records)
}

/// **Smart Load:** reuses the snapshot next to `source` when it is fresh,
/// otherwise parses the dump and rewrites the snapshot (best effort).
///
/// The snapshot always holds the unfiltered dump; `options` filters are
/// applied afterwards.
pub fn load_cached(source: &Path, options: &LoadOptions) -> Result<Vec<CityRecord>> {
    if !options.use_cache {
        let reader = common_io::open_stream(source)?;
        return parse_geonames(reader, options);
    }

    let cache_path = common_io::get_cache_path(source, SNAPSHOT_SUFFIX);

    // 1. Check Cache
    if is_cache_fresh(source, &cache_path) {
        match load_snapshot(&cache_path) {
            Ok(records) => {
                tracing::info!(path = %cache_path.display(), "using record snapshot");
                return Ok(filter(records, options));
            }
            Err(e) => tracing::warn!(error = %e, "ignoring unreadable record snapshot"),
        }
    }

    // 2. Build
    let reader = common_io::open_stream(source)?;
    let records = parse_geonames(reader, &LoadOptions::default())?;

    // 3. Cache
    if let Err(e) = save_snapshot(&cache_path, &records) {
        tracing::warn!(path = %cache_path.display(), error = %e, "could not write record snapshot");
    }

    Ok(filter(records, options))
}

fn filter(records: Vec<CityRecord>, options: &LoadOptions) -> Vec<CityRecord> {
    if options.keeps_everything() {
        return records;
    }
    records.into_iter().filter(|r| options.keeps(r)).collect()
}

fn is_cache_fresh(source: &Path, cache_path: &Path) -> bool {
    let cache_time = match fs::metadata(cache_path).and_then(|m| m.modified()) {
        Ok(t) => t,
        Err(_) => return false,
    };
    match fs::metadata(source).and_then(|m| m.modified()) {
        Ok(source_time) => source_time <= cache_time,
        Err(_) => false,
    }
}

// crates/geonames-core/src/loader/geonames.rs

//! Parser for the GeoNames `cities*.txt` dumps.
//!
//! The main 'geoname' table has the following fields (tab separated, no header):
//!
//! ```text
//!  0 geonameid       integer id of record in geonames database
//!  1 name            name of geographical point (utf8)
//!  2 asciiname       name of geographical point in plain ascii characters
//!  3 alternatenames  comma separated
//!  4 latitude        decimal degrees (wgs84)
//!  5 longitude       decimal degrees (wgs84)
//!  6 feature class   char(1)
//!  7 feature code    varchar(10)
//!  8 country code    ISO-3166 2-letter country code
//!  9 cc2 .. 13 admin4 code
//! 14 population      bigint
//! 15 elevation, 16 dem
//! 17 timezone        iana timezone id
//! 18 modification date
//! ```

use crate::config::LoadOptions;
use crate::error::{GeoError, Result};
use crate::model::{CityRecord, Coordinate, FeatureCode};
use std::io::Read;
use std::time::Instant;

/// Rows shorter than this cannot carry a country code.
const MIN_COLUMNS: usize = 9;

mod col {
    pub const GEONAME_ID: usize = 0;
    pub const NAME: usize = 1;
    pub const ASCII_NAME: usize = 2;
    pub const ALT_NAMES: usize = 3;
    pub const LATITUDE: usize = 4;
    pub const LONGITUDE: usize = 5;
    pub const FEATURE_CODE: usize = 7;
    pub const COUNTRY_CODE: usize = 8;
    pub const POPULATION: usize = 14;
    pub const TIMEZONE: usize = 17;
}

/// Parses every row of a dump, keeping the records accepted by `options`.
///
/// Fails with [`GeoError::InvalidRecord`] (`index` = 1-based line) on a row
/// with too few columns or an unparsable coordinate.
pub fn parse_geonames<R: Read>(reader: R, options: &LoadOptions) -> Result<Vec<CityRecord>> {
    let now = Instant::now();

    // GeoNames names contain bare quotes; quoting must stay off.
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .quoting(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (n, row) in rdr.records().enumerate() {
        let row = row?;
        let line = row.position().map_or(n + 1, |p| p.line() as usize);
        let record = parse_row(line, &row)?;
        if options.keeps(&record) {
            records.push(record);
        } else {
            skipped += 1;
        }
    }

    tracing::info!(
        records = records.len(),
        skipped,
        elapsed_ms = now.elapsed().as_millis() as u64,
        "parsed geonames dump"
    );
    Ok(records)
}

fn parse_row(line: usize, row: &csv::StringRecord) -> Result<CityRecord> {
    if row.len() < MIN_COLUMNS {
        return Err(GeoError::InvalidRecord {
            index: line,
            reason: format!(
                "expected at least {MIN_COLUMNS} columns, found {}",
                row.len()
            ),
        });
    }
    let field = |i: usize| row.get(i).map(str::trim).unwrap_or("");

    let name = field(col::NAME).to_string();
    let ascii_name = match field(col::ASCII_NAME) {
        "" => deunicode::deunicode(&name),
        ascii => ascii.to_string(),
    };
    let alt_names = split_alt_names(field(col::ALT_NAMES));
    let lat = parse_degrees(line, "latitude", field(col::LATITUDE))?;
    let lng = parse_degrees(line, "longitude", field(col::LONGITUDE))?;

    Ok(CityRecord {
        name,
        ascii_name,
        alt_names,
        coordinate: Coordinate::new(lat, lng),
        feature_code: FeatureCode::parse(field(col::FEATURE_CODE)),
        country_code: field(col::COUNTRY_CODE).to_string(),
        geoname_id: field(col::GEONAME_ID).parse().ok(),
        // The dump writes 0 when the population is unknown.
        population: field(col::POPULATION).parse().ok().filter(|&p: &u64| p > 0),
        timezone: Some(field(col::TIMEZONE))
            .filter(|tz| !tz.is_empty())
            .map(str::to_string),
    })
}

/// Alternate names are comma separated in the dump; pipes are accepted too.
fn split_alt_names(raw: &str) -> Vec<String> {
    raw.split([',', '|'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_degrees(line: usize, what: &str, raw: &str) -> Result<f64> {
    raw.parse::<f64>().map_err(|e| GeoError::InvalidRecord {
        index: line,
        reason: format!("bad {what} {raw:?}: {e}"),
    })
}

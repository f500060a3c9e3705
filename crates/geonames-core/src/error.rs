// crates/geonames-core/src/error.rs
use thiserror::Error;

/// Errors produced while loading the gazetteer or answering a query.
///
/// Query errors ([`GeoError::CityNotFound`], [`GeoError::NoCandidates`],
/// [`GeoError::InvalidQuery`]) are terminal for that single call and leave the
/// index untouched. An empty search result is not an error.
#[derive(Debug, Error)]
pub enum GeoError {
    /// A record failed validation (or a dump row failed to parse).
    /// `index` is the record position, or the 1-based line for dump rows.
    #[error("invalid record #{index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// No record name, ascii name or alternate name contains the keyword.
    #[error("city not found: {0}")]
    CityNotFound(String),

    /// The index selected for a nearest-cities query holds no points, or
    /// none besides the city the query started from.
    #[error("no candidate cities in {}", scope_label(.country))]
    NoCandidates { country: Option<String> },

    /// The query itself is malformed (blank keyword, `k == 0`).
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Bincode(#[from] bincode::Error),
}

fn scope_label(country: &Option<String>) -> String {
    match country {
        Some(code) => format!("country {code}"),
        None => "the global index".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, GeoError>;

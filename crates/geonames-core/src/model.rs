// crates/geonames-core/src/model.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a record inside the [`RecordStore`](crate::RecordStore), in load order.
pub type RecordId = usize;

/// A latitude/longitude pair in decimal degrees (WGS84 as shipped by GeoNames).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components finite and inside `[-90, 90]` / `[-180, 180]`.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Squared planar distance on raw degrees.
    #[inline]
    pub fn distance_sq(&self, other: &Coordinate) -> f64 {
        let dlat = self.lat - other.lat;
        let dlng = self.lng - other.lng;
        dlat * dlat + dlng * dlng
    }

    /// Planar distance on raw degrees. Not a geodesic distance.
    #[inline]
    pub fn distance(&self, other: &Coordinate) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Component along a k-d tree axis: 0 = latitude, anything else = longitude.
    #[inline]
    pub(crate) fn axis(&self, axis: usize) -> f64 {
        if axis == 0 {
            self.lat
        } else {
            self.lng
        }
    }

    /// Hashable key; `-0.0` and `0.0` map to the same key.
    pub(crate) fn key(&self) -> CoordKey {
        CoordKey((self.lat + 0.0).to_bits(), (self.lng + 0.0).to_bits())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CoordKey(u64, u64);

/// GeoNames feature code of a place.
///
/// Only the three populated-place codes below count as real cities; all
/// other codes (sections of cities, second-order admin seats, districts...)
/// are kept verbatim in [`FeatureCode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureCode {
    /// `PPL`
    PopulatedPlace,
    /// `PPLC`
    CapitalPopulatedPlace,
    /// `PPLA`
    AdminSeatPopulatedPlace,
    Other(String),
}

impl FeatureCode {
    /// Parses a GeoNames code (`PPL`, `PPLC`, `PPLA`) or its descriptive
    /// spelling (`populated-place`, ...). Case-insensitive.
    pub fn parse(code: &str) -> Self {
        let code = code.trim();
        let is = |short: &str, long: &str| {
            code.eq_ignore_ascii_case(short) || code.eq_ignore_ascii_case(long)
        };

        if is("PPL", "populated-place") {
            Self::PopulatedPlace
        } else if is("PPLC", "capital-populated-place") {
            Self::CapitalPopulatedPlace
        } else if is("PPLA", "admin-seat-populated-place") {
            Self::AdminSeatPopulatedPlace
        } else {
            Self::Other(code.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::PopulatedPlace => "PPL",
            Self::CapitalPopulatedPlace => "PPLC",
            Self::AdminSeatPopulatedPlace => "PPLA",
            Self::Other(code) => code,
        }
    }

    /// True for the populated-place codes that denote an actual city.
    pub fn is_city(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for FeatureCode {
    fn from(code: &str) -> Self {
        Self::parse(code)
    }
}

impl From<String> for FeatureCode {
    fn from(code: String) -> Self {
        Self::parse(&code)
    }
}

impl fmt::Display for FeatureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One gazetteer row. Immutable once loaded into the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub name: String,
    pub ascii_name: String,
    /// Alternate names in dump order.
    pub alt_names: Vec<String>,
    pub coordinate: Coordinate,
    pub feature_code: FeatureCode,
    /// ISO-3166 alpha-2 code as found in the dump.
    pub country_code: String,

    pub geoname_id: Option<u32>,
    pub population: Option<u64>,
    pub timezone: Option<String>,
}

impl CityRecord {
    /// Builds a record; the ascii name is transliterated from `name`.
    pub fn new(
        name: impl Into<String>,
        lat: f64,
        lng: f64,
        feature_code: impl Into<FeatureCode>,
        country_code: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let ascii_name = deunicode::deunicode(&name);
        Self {
            name,
            ascii_name,
            alt_names: Vec::new(),
            coordinate: Coordinate::new(lat, lng),
            feature_code: feature_code.into(),
            country_code: country_code.into(),
            geoname_id: None,
            population: None,
            timezone: None,
        }
    }

    pub fn with_ascii_name(mut self, ascii_name: impl Into<String>) -> Self {
        self.ascii_name = ascii_name.into();
        self
    }

    pub fn with_alt_names<I, S>(mut self, alt_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alt_names = alt_names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_geoname_id(mut self, id: u32) -> Self {
        self.geoname_id = Some(id);
        self
    }

    pub fn with_population(mut self, population: u64) -> Self {
        self.population = Some(population);
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.coordinate.lat
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.coordinate.lng
    }

    /// The plain result record handed to callers.
    pub fn hit(&self) -> CityHit {
        CityHit {
            name: self.name.clone(),
            country_code: self.country_code.clone(),
        }
    }
}

/// Result item of both queries.
///
/// Serialises as `{"city": ..., "country_code": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CityHit {
    #[serde(rename = "city")]
    pub name: String,
    pub country_code: String,
}

impl fmt::Display for CityHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.country_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_codes_parse_both_spellings() {
        assert_eq!(FeatureCode::parse("PPL"), FeatureCode::PopulatedPlace);
        assert_eq!(FeatureCode::parse("pplc"), FeatureCode::CapitalPopulatedPlace);
        assert_eq!(
            FeatureCode::parse("admin-seat-populated-place"),
            FeatureCode::AdminSeatPopulatedPlace
        );
        assert_eq!(FeatureCode::parse("PPLX"), FeatureCode::Other("PPLX".into()));
        assert!(!FeatureCode::parse("PPLA2").is_city());
        assert_eq!(FeatureCode::parse("district").as_str(), "district");
    }

    #[test]
    fn coordinate_validity() {
        assert!(Coordinate::new(90.0, -180.0).is_valid());
        assert!(!Coordinate::new(90.5, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::NAN).is_valid());
        assert!(!Coordinate::new(f64::INFINITY, 0.0).is_valid());
    }

    #[test]
    fn signed_zero_shares_a_key() {
        assert_eq!(
            Coordinate::new(0.0, -0.0).key(),
            Coordinate::new(-0.0, 0.0).key()
        );
    }

    #[test]
    fn new_record_transliterates_ascii_name() {
        let r = CityRecord::new("Łódź", 51.77, 19.45, "PPLA", "PL");
        assert_eq!(r.ascii_name, "Lodz");
        assert_eq!(r.hit().to_string(), "Łódź (PL)");
    }
}

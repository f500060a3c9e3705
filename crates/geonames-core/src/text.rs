// crates/geonames-core/src/text.rs

//! Keyword matching over city names.

use crate::model::CityRecord;
use crate::traits::NameMatch;

/// GeoNames feature codes that denote an actual city rather than a
/// district, suburb or other subdivision.
pub const TRUE_CITY_CODES: [&str; 3] = ["PPL", "PPLC", "PPLA"];

/// Case-folded key used for every name comparison.
///
/// Unicode lowercasing only; scripts are never transliterated, so a Latin
/// keyword cannot match a name written in another script.
///
/// ```rust
/// use geonames_core::fold_key;
///
/// assert_eq!(fold_key("SÃO PAULO"), "são paulo");
/// assert_eq!(fold_key("東京"), "東京");
/// ```
pub fn fold_key(s: &str) -> String {
    s.to_lowercase()
}

/// True if `keyword` (lower-cased) is a substring of the record's name,
/// ascii name or any alternate name (all lower-cased).
pub fn matches(keyword: &str, record: &CityRecord) -> bool {
    matches_folded(&fold_key(keyword), record)
}

/// Same as [`matches`] with a keyword already passed through [`fold_key`].
#[inline]
pub fn matches_folded(folded_keyword: &str, record: &CityRecord) -> bool {
    record.contains_folded(folded_keyword)
}

/// True iff the record's feature code is one of [`TRUE_CITY_CODES`].
#[inline]
pub fn is_true_city(record: &CityRecord) -> bool {
    record.feature_code.is_city()
}

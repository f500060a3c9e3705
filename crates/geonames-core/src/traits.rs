// crates/geonames-core/src/traits.rs
use crate::common::DbStats;
use crate::error::Result;
use crate::model::{CityHit, CityRecord};
use crate::text::fold_key;

/// Iterator over borrowed name variants.
/// Box<dyn ...> keeps implementors free to chain whatever fields they carry.
pub type NamesIter<'a> = Box<dyn Iterator<Item = &'a str> + 'a>;

/// Name-based matching helpers for types that expose a canonical display name.
///
/// This trait centralizes case-insensitive comparisons based on
/// [`fold_key`]. Implementors provide a `&str` view of
/// their canonical name via [`NameMatch::name_str`] and, optionally, further
/// spellings via [`NameMatch::alias_strs`].
///
/// # Examples
/// ```rust
/// use geonames_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("Łódź").is_named("ŁÓDŹ"));
/// assert!(Place("Zürich").name_contains("züri"));
/// assert!(!Place("Zürich").name_contains("zuri"));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    /// Further spellings searched by [`NameMatch::name_contains`].
    fn alias_strs(&self) -> NamesIter<'_> {
        Box::new(std::iter::empty())
    }

    /// Case-insensitive name comparison.
    #[inline]
    fn is_named(&self, q: &str) -> bool {
        fold_key(self.name_str()) == fold_key(q)
    }

    /// Case-insensitive substring match over the canonical name and every
    /// alias.
    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        self.contains_folded(&fold_key(q))
    }

    /// Substring match with a query already passed through [`fold_key`].
    fn contains_folded(&self, folded: &str) -> bool {
        fold_key(self.name_str()).contains(folded)
            || self.alias_strs().any(|alias| fold_key(alias).contains(folded))
    }
}

impl NameMatch for CityRecord {
    fn name_str(&self) -> &str {
        &self.name
    }

    fn alias_strs(&self) -> NamesIter<'_> {
        Box::new(
            std::iter::once(self.ascii_name.as_str())
                .chain(self.alt_names.iter().map(String::as_str)),
        )
    }
}

/// The two gazetteer queries.
pub trait CitySearch {
    fn stats(&self) -> DbStats;

    /// All real cities whose name, ascii name or alternate name contains
    /// `keyword`, in load order.
    ///
    /// An empty vector means "no matches"; a blank keyword is an
    /// [`InvalidQuery`](crate::GeoError::InvalidQuery) error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geonames_core::prelude::*;
    ///
    /// let index = GeoIndex::init(vec![
    ///     CityRecord::new("Springfield", 39.80, -89.64, "PPLA", "US"),
    ///     CityRecord::new("Springfield Heights", 39.81, -89.60, "PPLX", "US"),
    /// ]).unwrap();
    ///
    /// let hits = index.search_by_name("springfield").unwrap();
    /// assert_eq!(hits.len(), 1);
    /// assert_eq!(hits[0].name, "Springfield");
    /// ```
    fn search_by_name(&self, keyword: &str) -> Result<Vec<CityHit>>;

    /// The `k` cities closest to the first city matching `city_name`,
    /// optionally restricted to one country, nearest first.
    ///
    /// Resolution takes the *first* record in load order whose names contain
    /// `city_name`, not the best match. The resolved city itself is not part
    /// of the answer. `k` beyond the available points is clamped; a scope
    /// holding no city besides the resolved one is
    /// [`NoCandidates`](crate::GeoError::NoCandidates).
    fn nearest_cities(
        &self,
        city_name: &str,
        k: usize,
        country_code: Option<&str>,
    ) -> Result<Vec<CityHit>>;
}

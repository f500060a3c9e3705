//! Error handling example for geonames-rs
//!
//! This example demonstrates the query errors and how to tell them apart.

use geonames_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== geonames-rs Error Handling Example ===\n");

    // Example 1: Handling load errors
    println!("--- Example 1: Loading a dump that does not exist ---");
    let opts = LoadOptions::default().without_cache();
    match GeoIndex::load_from_path("/no/such/cities1000.txt", &opts) {
        Ok(index) => println!("✓ Loaded {} records", index.stats().records),
        Err(e) => println!("✗ {e}"),
    }
    println!();

    // Example 2: Invalid records are rejected up front
    println!("--- Example 2: Record with an impossible latitude ---");
    let bad = vec![CityRecord::new("Nowhere", 123.0, 0.0, "PPL", "XX")];
    match GeoIndex::init(bad) {
        Ok(_) => println!("  unexpectedly accepted"),
        Err(GeoError::InvalidRecord { index, reason }) => {
            println!("  record #{index} rejected: {reason}")
        }
        Err(e) => return Err(e),
    }
    println!();

    let index = GeoIndex::init(vec![
        CityRecord::new("Paris", 48.8566, 2.3522, "PPLC", "FR"),
        CityRecord::new("Lyon", 45.7640, 4.8357, "PPLA", "FR"),
    ])?;

    // Example 3: Query errors
    println!("--- Example 3: Query errors ---");
    let attempts: [(&str, usize, Option<&str>); 4] = [
        ("Atlantis", 3, None),
        ("Paris", 3, Some("ZZ")),
        ("Paris", 0, None),
        ("   ", 3, None),
    ];
    for (city, k, country) in attempts {
        match index.nearest_cities(city, k, country) {
            Ok(hits) => println!("  {city:?}: {} hits", hits.len()),
            Err(GeoError::CityNotFound(name)) => println!("  unknown city: {name}"),
            Err(GeoError::NoCandidates { country }) => {
                println!("  no candidates for {country:?}")
            }
            Err(GeoError::InvalidQuery(why)) => println!("  invalid query: {why}"),
            Err(e) => return Err(e),
        }
    }
    println!();

    // Example 4: An empty search is not an error
    println!("--- Example 4: Search without matches ---");
    let hits = index.search_by_name("atlantis")?;
    println!("  {} hits", hits.len());

    Ok(())
}

//! Basic usage example for geonames-rs
//!
//! This example demonstrates how to:
//! - Parse a (tiny, inline) GeoNames dump
//! - Build the index
//! - Search cities by name
//! - Ask for the nearest cities, globally and per country

use geonames_rs::loader::parse_geonames;
use geonames_rs::prelude::*;

const DUMP: &str = "\
2988507\tParis\tParis\tLutece,Parigi,Paříž\t48.85341\t2.3488\tP\tPPLC\tFR\t\t11\t75\t751\t75056\t2138551\t\t42\tEurope/Paris\t2024-01-01
2977824\tSaint-Denis\tSaint-Denis\t\t48.93564\t2.35387\tP\tPPLA3\tFR\t\t11\t93\t932\t93066\t111135\t\t32\tEurope/Paris\t2024-01-01
2969679\tVersailles\tVersailles\t\t48.80359\t2.13424\tP\tPPLA2\tFR\t\t11\t78\t786\t78646\t85416\t\t132\tEurope/Paris\t2024-01-01
2989317\tOrleans\tOrleans\tOrléans\t47.90289\t1.90389\tP\tPPLA\tFR\t\t24\t45\t453\t45234\t116238\t\t100\tEurope/Paris\t2024-01-01
2800866\tBrussels\tBrussels\tBruxelles,Brussel\t50.85045\t4.34878\tP\tPPLC\tBE\t\tBRU\t\t\t\t1019022\t\t28\tEurope/Brussels\t2024-01-01
2796491\tGent\tGent\tGand,Ghent\t51.05\t3.71667\tP\tPPLA2\tBE\t\tVLG\tVOV\t44\t44021\t231493\t\t10\tEurope/Brussels\t2024-01-01
4250542\tSpringfield\tSpringfield\t\t39.80172\t-89.64371\tP\tPPLA\tUS\t\tIL\t167\t\t\t114394\t\t179\tAmerica/Chicago\t2024-01-01
4409896\tSpringfield\tSpringfield\t\t37.21533\t-93.29824\tP\tPPLA2\tUS\t\tMO\t077\t\t\t169176\t\t396\tAmerica/Chicago\t2024-01-01
";

fn main() -> Result<()> {
    println!("=== geonames-rs Basic Usage Example ===\n");

    println!("Parsing inline dump...");
    let records = parse_geonames(DUMP.as_bytes(), &LoadOptions::default())?;
    let index = GeoIndex::init(records)?;
    let stats = index.stats();
    println!(
        "✓ {} records ({} true cities) in {} countries\n",
        stats.records, stats.true_cities, stats.countries
    );

    // Example 1: substring search, districts and admin seats filtered out
    println!("--- Example 1: Cities containing 'springfield' ---");
    for hit in index.search_by_name("springfield")? {
        println!("- {hit}");
    }
    println!();

    // Example 2: alternate names match too, in any letter case
    println!("--- Example 2: Cities known as 'orléans' ---");
    for hit in index.search_by_name("orléans")? {
        println!("- {hit}");
    }
    println!();

    // Example 3: nearest cities anywhere
    println!("--- Example 3: 3 nearest cities to Paris ---");
    for (i, hit) in index.nearest_cities("Paris", 3, None)?.iter().enumerate() {
        println!("{}. {hit}", i + 1);
    }
    println!();

    // Example 4: nearest cities inside another country
    println!("--- Example 4: nearest Belgian cities to Paris ---");
    for hit in index.nearest_cities("Paris", 2, Some("BE"))? {
        println!("- {hit}");
    }

    index.teardown();
    Ok(())
}

//! geonames-cli: command-line interface for geonames-core
//!
//! Loads a GeoNames dump and answers the two gazetteer queries from the
//! terminal: substring search over true cities, and the k nearest cities to
//! a named city (optionally restricted to one country).
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ geonames stats
//!
//! - Search cities by substring
//!   $ geonames cities springfield
//!
//! - Nearest cities, globally or inside one country
//!   $ geonames nearest paris -k 3
//!   $ geonames nearest paris -k 3 --country BE
//!
//! - Restrict loading to some countries, print JSON
//!   $ geonames --filter=FR,BE --json nearest lyon
//!
//! Data source
//! -----------
//!
//! By default the CLI reads `data/cities1000.txt` inside `geonames-core` and
//! caches a binary snapshot of the parsed records next to it. Use
//! `--input <path>` for another dump and `--no-cache` to bypass the snapshot.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use geonames_core::config::DATA_SOURCE_URL;
use geonames_core::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct CountryRow<'a> {
    country_code: &'a str,
    records: usize,
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    // Determine input file (default dump inside geonames-core)
    let input_path = args
        .input
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(GeoIndex::default_dataset_path);

    let mut options = LoadOptions::default();
    if let Some(codes) = args.countries() {
        options = options.with_countries(codes);
    }
    if let Some(min) = args.min_population {
        options = options.with_min_population(min);
    }
    if args.no_cache {
        options = options.without_cache();
    }

    let index = GeoIndex::load_from_path(&input_path, &options)
        .with_context(|| {
            format!(
                "loading {} (GeoNames dumps: {DATA_SOURCE_URL})",
                input_path.display()
            )
        })?;
    tracing::info!(path = %input_path.display(), records = index.store().len(), "index ready");

    match &args.command {
        Commands::Stats => {
            let stats = index.stats();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Gazetteer statistics:");
                println!("  Records: {}", stats.records);
                println!("  True cities: {}", stats.true_cities);
                println!("  Countries: {}", stats.countries);
                println!("  Coordinate collisions: {}", stats.coordinate_collisions);
            }
        }

        Commands::Countries => {
            let counts = index.store().country_counts();
            if args.json {
                let rows: Vec<CountryRow> = counts
                    .iter()
                    .map(|(code, n)| CountryRow {
                        country_code: code,
                        records: *n,
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for (code, n) in &counts {
                    println!("{code}: {n}");
                }
            }
        }

        Commands::Cities { query } => {
            let hits = index.search_by_name(query)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else if hits.is_empty() {
                println!("No cities found matching: {query}");
            } else {
                for hit in &hits {
                    println!("{hit}");
                }
            }
        }

        Commands::Nearest { city, k, country } => {
            let hits = index.nearest_cities(city, *k, country.as_deref())?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                for (rank, hit) in hits.iter().enumerate() {
                    println!("{:>3}. {hit}", rank + 1);
                }
            }
        }
    }

    index.teardown();
    Ok(())
}

/// RUST_LOG wins; otherwise `-v` raises the default `warn` level.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

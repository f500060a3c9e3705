use clap::{Parser, Subcommand};

/// CLI arguments for geonames-cli
#[derive(Debug, Parser)]
#[command(
    name = "geonames",
    version,
    about = "CLI for searching and nearest-city queries over a GeoNames dump"
)]
pub struct CliArgs {
    /// Path to the GeoNames dump (.txt or .txt.gz; default: data/cities1000.txt)
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<String>,

    /// Optional comma-separated list of ISO2 country codes to load (e.g. DE,CH,AT)
    #[arg(short = 'f', long = "filter", global = true)]
    pub filter: Option<String>,

    /// Skip rows below this population
    #[arg(long = "min-population", global = true)]
    pub min_population: Option<u64>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Neither read nor write the record snapshot next to the dump
    #[arg(long = "no-cache", global = true)]
    pub no_cache: bool,

    /// More log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl CliArgs {
    /// `--filter` split into trimmed, non-empty codes.
    pub fn countries(&self) -> Option<Vec<String>> {
        self.filter.as_ref().map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|x| !x.is_empty())
                .map(str::to_string)
                .collect()
        })
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the loaded records
    Stats,

    /// List country codes with their record counts
    Countries,

    /// Search for true cities (PPL, PPLC, PPLA) whose name contains a substring
    Cities {
        /// Substring to search (case-insensitive)
        query: String,
    },

    /// The closest cities to the first city matching a name
    Nearest {
        /// Substring identifying the origin city
        city: String,

        /// Number of neighbours to return
        #[arg(short = 'k', long = "count", default_value_t = 5)]
        k: usize,

        /// Restrict candidates to one ISO2 country code
        #[arg(short = 'c', long = "country")]
        country: Option<String>,
    },
}

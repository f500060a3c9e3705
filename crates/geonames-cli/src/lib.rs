//! geonames-cli
//! ============
//!
//! Terminal front end for `geonames-core`: point it at a GeoNames
//! `cities*.txt` dump (plain or gzipped) and ask for cities by name or for
//! the cities closest to a given one.
//!
//! The crate ships the `geonames-cli` binary; this library target only
//! carries the docs.
//!
//! Getting a dump
//! --------------
//!
//! Fetch `cities1000.zip` from <https://download.geonames.org/export/dump/>
//! and unzip it. The first run parses the dump and leaves a
//! `*.records.bin(.gz)` snapshot beside it, which later runs load instead.
//!
//! Commands
//! --------
//!
//! ```text
//! geonames-cli -i cities1000.txt stats          # records, real cities, countries
//! geonames-cli -i cities1000.txt countries      # records per country code
//! geonames-cli cities "new york"                # PPL/PPLC/PPLA names containing the text
//! geonames-cli nearest lyon -k 10 -c CH         # 10 Swiss cities closest to Lyon
//! geonames-cli --json --filter FR,BE nearest lille
//! ```
//!
//! Set `RUST_LOG` or pass `-v`/`-vv` to see load and index timings on stderr.
#![cfg_attr(docsrs, feature(doc_cfg))]

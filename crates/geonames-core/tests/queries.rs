use geonames_core::prelude::*;
use std::sync::Arc;
use std::thread;

fn france() -> Vec<CityRecord> {
    vec![
        CityRecord::new("Paris", 48.8566, 2.3522, "PPLC", "FR"),
        CityRecord::new("Saint-Denis", 48.9362, 2.3574, "PPL", "FR"),
        CityRecord::new("Versailles", 48.8049, 2.1204, "PPLA2", "FR"),
        CityRecord::new("Orléans", 47.9029, 1.9093, "PPLA", "FR"),
    ]
}

fn names(hits: &[CityHit]) -> Vec<&str> {
    hits.iter().map(|h| h.name.as_str()).collect()
}

#[test]
fn search_keeps_only_true_cities() {
    let index = GeoIndex::init(vec![
        CityRecord::new("Springfield", 39.80, -89.64, "PPL", "US"),
        CityRecord::new("Springfield Heights", 39.81, -89.60, "district", "US"),
    ])
    .unwrap();

    let hits = index.search_by_name("spring").unwrap();
    assert_eq!(
        hits,
        vec![CityHit {
            name: "Springfield".into(),
            country_code: "US".into()
        }]
    );
}

#[test]
fn search_is_case_insensitive_and_covers_ascii_names() {
    let index = GeoIndex::init(france()).unwrap();
    assert_eq!(names(&index.search_by_name("ORLEANS").unwrap()), ["Orléans"]);
    assert_eq!(names(&index.search_by_name("orléans").unwrap()), ["Orléans"]);
}

#[test]
fn search_matches_alternate_names() {
    let index = GeoIndex::init(vec![
        CityRecord::new("München", 48.137, 11.575, "PPLA", "DE").with_alt_names(["Munich", "Monaco di Baviera"]),
        CityRecord::new("Monaco", 43.731, 7.420, "PPLC", "MC"),
    ])
    .unwrap();

    assert_eq!(names(&index.search_by_name("munich").unwrap()), ["München"]);
    assert_eq!(
        names(&index.search_by_name("monaco").unwrap()),
        ["München", "Monaco"]
    );
}

#[test]
fn nearest_to_paris() {
    let index = GeoIndex::init(france()).unwrap();
    let hits = index.nearest_cities("Paris", 3, None).unwrap();
    assert_eq!(names(&hits), ["Saint-Denis", "Versailles", "Orléans"]);
    assert!(hits.iter().all(|h| h.country_code == "FR"));
}

#[test]
fn nearest_is_clamped_to_available_cities() {
    let index = GeoIndex::init(france()).unwrap();
    let hits = index.nearest_cities("Paris", 50, None).unwrap();
    assert_eq!(hits.len(), 3);
}

#[test]
fn nearest_unknown_city() {
    let index = GeoIndex::init(france()).unwrap();
    match index.nearest_cities("Atlantis", 3, None) {
        Err(GeoError::CityNotFound(name)) => assert_eq!(name, "Atlantis"),
        other => panic!("expected CityNotFound, got {other:?}"),
    }
}

#[test]
fn nearest_in_country_without_cities() {
    let index = GeoIndex::init(france()).unwrap();
    match index.nearest_cities("Paris", 3, Some("ZZ")) {
        Err(GeoError::NoCandidates { country }) => assert_eq!(country.as_deref(), Some("ZZ")),
        other => panic!("expected NoCandidates, got {other:?}"),
    }
    // The empty index is cached like any other.
    assert!(index.nearest_cities("Paris", 3, Some("zz")).is_err());
    assert_eq!(index.country_cache().builds(), 1);
}

#[test]
fn latin_keyword_does_not_match_cjk_alt_name() {
    let index = GeoIndex::init(vec![
        CityRecord::new("Tokyo", 35.6895, 139.6917, "PPLC", "JP").with_alt_names(["東京"]),
    ])
    .unwrap();

    assert!(index.search_by_name("jing").unwrap().is_empty());
    match index.nearest_cities("dong", 3, None) {
        Err(GeoError::CityNotFound(name)) => assert_eq!(name, "dong"),
        other => panic!("expected CityNotFound, got {other:?}"),
    }
}

#[test]
fn only_city_of_a_country_has_no_neighbours_there() {
    let mut records = france();
    records.push(CityRecord::new("Brussels", 50.8503, 4.3517, "PPLC", "BE"));
    let index = GeoIndex::init(records).unwrap();

    match index.nearest_cities("Brussels", 3, Some("BE")) {
        Err(GeoError::NoCandidates { country }) => assert_eq!(country.as_deref(), Some("BE")),
        other => panic!("expected NoCandidates, got {other:?}"),
    }
    // Globally the French cities are still there.
    assert_eq!(index.nearest_cities("Brussels", 3, None).unwrap().len(), 3);
}

#[test]
fn empty_index() {
    let index = GeoIndex::init(Vec::new()).unwrap();
    assert!(index.search_by_name("paris").unwrap().is_empty());
    assert!(matches!(
        index.nearest_cities("Paris", 3, None),
        Err(GeoError::CityNotFound(_))
    ));
    assert!(matches!(
        index.nearest_to(Coordinate::new(0.0, 0.0), 3, None),
        Err(GeoError::NoCandidates { country: None })
    ));
}

#[test]
fn positions_round_trip_to_records() {
    let index = GeoIndex::init(france()).unwrap();
    let store = index.store();
    let global = index.global_index();

    for neighbor in global.query(Coordinate::new(48.0, 2.0), global.len()) {
        let coordinate = global.coordinate(neighbor.position).unwrap();
        let record = store.by_coordinate(coordinate.lat, coordinate.lng).unwrap();
        assert_eq!(record, store.get(neighbor.record).unwrap());
    }
}

#[test]
fn invalid_records_are_rejected() {
    let err = GeoIndex::init(vec![
        CityRecord::new("Paris", 48.8566, 2.3522, "PPLC", "FR"),
        CityRecord::new("Bad", f64::NAN, 0.0, "PPL", "FR"),
    ])
    .unwrap_err();
    assert!(matches!(err, GeoError::InvalidRecord { index: 1, .. }));

    let err = GeoIndex::init(vec![CityRecord::new("", 0.0, 0.0, "PPL", "FR")]).unwrap_err();
    assert!(matches!(err, GeoError::InvalidRecord { index: 0, .. }));
}

#[test]
fn country_index_is_built_once_under_contention() {
    let index = Arc::new(GeoIndex::init(france()).unwrap());

    thread::scope(|s| {
        for _ in 0..8 {
            let index = Arc::clone(&index);
            s.spawn(move || {
                let hits = index.nearest_cities("Versailles", 2, Some("fr")).unwrap();
                assert_eq!(names(&hits), ["Paris", "Saint-Denis"]);
            });
        }
    });

    assert_eq!(index.country_cache().builds(), 1);
    assert_eq!(index.stats().cached_countries, 1);
}

#[test]
fn hits_serialise_with_city_key() {
    let hit = CityHit {
        name: "Paris".into(),
        country_code: "FR".into(),
    };
    let json = serde_json::to_value(&hit).unwrap();
    assert_eq!(json, serde_json::json!({"city": "Paris", "country_code": "FR"}));
}

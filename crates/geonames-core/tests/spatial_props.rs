use geonames_core::{Coordinate, SpatialIndex};
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (-90.0..=90.0_f64, -180.0..=180.0_f64).prop_map(|(lat, lng)| Coordinate::new(lat, lng))
}

/// Exhaustive reference: positions sorted by (distance, position).
fn brute_force(points: &[Coordinate], query: Coordinate, k: usize) -> Vec<usize> {
    let mut ranked: Vec<(f64, usize)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (query.distance_sq(p), i))
        .collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    ranked.into_iter().take(k).map(|(_, i)| i).collect()
}

proptest! {
    #[test]
    fn matches_brute_force(
        points in prop::collection::vec(coordinate(), 0..300),
        query in coordinate(),
        k in 0usize..40,
    ) {
        let index = SpatialIndex::build(points.clone());
        let found: Vec<usize> = index.query(query, k).iter().map(|n| n.position).collect();
        prop_assert_eq!(found, brute_force(&points, query, k));
    }

    #[test]
    fn result_size_and_order(
        points in prop::collection::vec(coordinate(), 1..200),
        query in coordinate(),
        k in 1usize..500,
    ) {
        let index = SpatialIndex::build(points.clone());
        let found = index.query(query, k);
        prop_assert_eq!(found.len(), k.min(points.len()));
        for pair in found.windows(2) {
            prop_assert!(pair[0].distance <= pair[1].distance);
        }
        for n in &found {
            prop_assert_eq!(index.coordinate(n.position), Some(points[n.position]));
        }
    }

    #[test]
    fn clustered_points_with_duplicates(
        base in prop::collection::vec((-2i32..=2, -2i32..=2), 1..120),
        k in 1usize..30,
    ) {
        // Few distinct values force many ties and duplicate coordinates.
        let points: Vec<Coordinate> = base
            .iter()
            .map(|&(a, b)| Coordinate::new(a as f64, b as f64))
            .collect();
        let query = Coordinate::new(0.25, -0.5);
        let index = SpatialIndex::build(points.clone());
        let found: Vec<usize> = index.query(query, k).iter().map(|n| n.position).collect();
        prop_assert_eq!(found, brute_force(&points, query, k));
    }
}

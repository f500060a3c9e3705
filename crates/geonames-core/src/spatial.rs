// crates/geonames-core/src/spatial.rs

//! Static 2-D k-d tree over (latitude, longitude) points.
//!
//! Nodes live in a flat array. Leaves own a range of the `order` permutation
//! and hold at most [`LEAF_SIZE`] points, so an index over fewer points is a
//! single leaf scanned linearly.
//!
//! Distances are planar Euclidean on raw degrees, not great-circle distances.

use crate::model::{Coordinate, RecordId};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Maximum number of points in a leaf node before we split.
const LEAF_SIZE: usize = 16;

/// One k-nearest-neighbour result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Planar distance to the query point, in degrees.
    pub distance: f64,
    /// Zero-based offset into the coordinate sequence the index was built from.
    pub position: usize,
    /// Record the coordinate belongs to (equals `position` for [`SpatialIndex::build`]).
    pub record: RecordId,
}

#[derive(Debug, Clone)]
enum Node {
    /// Interior node: split axis (0 = lat, 1 = lng), split value, children.
    Split {
        axis: usize,
        value: f64,
        left: usize,
        right: usize,
    },
    /// Leaf node: range [start..end) into `order`.
    Leaf { start: usize, end: usize },
}

/// Read-only nearest-neighbour index over a snapshot of coordinates.
#[derive(Debug, Clone, Default)]
pub struct SpatialIndex {
    coordinates: Vec<Coordinate>,
    records: Vec<RecordId>,
    /// Positions permuted into tree layout.
    order: Vec<usize>,
    nodes: Vec<Node>,
}

impl SpatialIndex {
    /// Builds an index whose record ids are the coordinate positions.
    ///
    /// An empty input yields a valid index that answers every query with
    /// an empty result.
    pub fn build(coordinates: Vec<Coordinate>) -> Self {
        let records = (0..coordinates.len()).collect();
        Self::assemble(coordinates, records)
    }

    /// Builds an index from `(coordinate, record id)` pairs; positions follow
    /// iteration order.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Coordinate, RecordId)>,
    {
        let (coordinates, records) = entries.into_iter().unzip();
        Self::assemble(coordinates, records)
    }

    fn assemble(coordinates: Vec<Coordinate>, records: Vec<RecordId>) -> Self {
        let mut index = SpatialIndex {
            order: (0..coordinates.len()).collect(),
            coordinates,
            records,
            nodes: Vec::new(),
        };
        if !index.coordinates.is_empty() {
            let mut order = std::mem::take(&mut index.order);
            let end = order.len();
            index.build_recursive(&mut order, 0, end);
            index.order = order;
        }
        index
    }

    fn build_recursive(&mut self, order: &mut [usize], start: usize, end: usize) -> usize {
        let count = end - start;

        if count <= LEAF_SIZE {
            let node_idx = self.nodes.len();
            self.nodes.push(Node::Leaf { start, end });
            return node_idx;
        }

        let axis = self.pick_split_axis(&order[start..end]);
        let median = count / 2;
        let coords = &self.coordinates;
        order[start..end].select_nth_unstable_by(median, |&a, &b| {
            coords[a]
                .axis(axis)
                .total_cmp(&coords[b].axis(axis))
                .then(a.cmp(&b))
        });
        let median_pos = start + median;
        let value = self.coordinates[order[median_pos]].axis(axis);

        // Placeholder, patched once both children exist.
        let node_idx = self.nodes.len();
        self.nodes.push(Node::Leaf { start: 0, end: 0 });

        let left = self.build_recursive(order, start, median_pos);
        let right = self.build_recursive(order, median_pos, end);

        self.nodes[node_idx] = Node::Split {
            axis,
            value,
            left,
            right,
        };
        node_idx
    }

    fn pick_split_axis(&self, positions: &[usize]) -> usize {
        let spread = |axis: usize| {
            let (lo, hi) = positions.iter().fold(
                (f64::INFINITY, f64::NEG_INFINITY),
                |(lo, hi), &p| {
                    let v = self.coordinates[p].axis(axis);
                    (lo.min(v), hi.max(v))
                },
            );
            hi - lo
        };
        if spread(1) > spread(0) {
            1
        } else {
            0
        }
    }

    /// The `k` points closest to `point`, nearest first.
    ///
    /// Returns `min(k, len)` neighbours ordered by ascending distance; equal
    /// distances are ordered by ascending position. `k == 0` and an empty
    /// index both give an empty vector.
    pub fn query(&self, point: Coordinate, k: usize) -> Vec<Neighbor> {
        if k == 0 || self.nodes.is_empty() {
            return Vec::new();
        }
        let k = k.min(self.len());

        let mut heap = BinaryHeap::with_capacity(k + 1);
        self.search(0, &point, k, &mut heap);

        let mut found = heap.into_vec();
        found.sort_unstable();
        found
            .into_iter()
            .map(|c| Neighbor {
                distance: c.dist_sq.sqrt(),
                position: c.position,
                record: self.records[c.position],
            })
            .collect()
    }

    /// The single closest point.
    pub fn nearest(&self, point: Coordinate) -> Option<Neighbor> {
        self.query(point, 1).into_iter().next()
    }

    fn search(
        &self,
        node_idx: usize,
        point: &Coordinate,
        k: usize,
        heap: &mut BinaryHeap<Candidate>,
    ) {
        match self.nodes[node_idx] {
            Node::Leaf { start, end } => {
                for &position in &self.order[start..end] {
                    let candidate = Candidate {
                        dist_sq: point.distance_sq(&self.coordinates[position]),
                        position,
                    };
                    if heap.len() < k {
                        heap.push(candidate);
                    } else if let Some(mut worst) = heap.peek_mut() {
                        if candidate < *worst {
                            *worst = candidate;
                        }
                    }
                }
            }
            Node::Split {
                axis,
                value,
                left,
                right,
            } => {
                let diff = point.axis(axis) - value;
                let (near, far) = if diff <= 0.0 {
                    (left, right)
                } else {
                    (right, left)
                };

                self.search(near, point, k, heap);

                // Ties on the plane must still be visited: a lower position
                // at equal distance can live on the far side.
                let worst = match heap.peek() {
                    Some(w) if heap.len() == k => w.dist_sq,
                    _ => f64::INFINITY,
                };
                if diff * diff <= worst {
                    self.search(far, point, k, heap);
                }
            }
        }
    }

    /// Coordinate stored at `position` (build order).
    pub fn coordinate(&self, position: usize) -> Option<Coordinate> {
        self.coordinates.get(position).copied()
    }

    /// Record id stored at `position`.
    pub fn record_id(&self, position: usize) -> Option<RecordId> {
        self.records.get(position).copied()
    }

    /// The backing coordinate snapshot, in build order.
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// Number of points in the index.
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

/// Heap entry ordered by `(dist_sq, position)`; the max-heap top is the
/// current worst of the k best.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    dist_sq: f64,
    position: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist_sq
            .total_cmp(&other.dist_sq)
            .then(self.position.cmp(&other.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn brute_force(points: &[Coordinate], query: Coordinate, k: usize) -> Vec<(f64, usize)> {
        let mut all: Vec<(f64, usize)> = points
            .iter()
            .enumerate()
            .map(|(i, p)| (query.distance_sq(p), i))
            .collect();
        all.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        all.truncate(k);
        all.into_iter().map(|(d, i)| (d.sqrt(), i)).collect()
    }

    fn coordinate() -> impl Strategy<Value = Coordinate> {
        (-90.0..=90.0_f64, -180.0..=180.0_f64).prop_map(|(lat, lng)| Coordinate::new(lat, lng))
    }

    #[test]
    fn empty_index() {
        let index = SpatialIndex::build(vec![]);
        assert!(index.is_empty());
        assert!(index.query(Coordinate::new(0.0, 0.0), 5).is_empty());
        assert!(index.nearest(Coordinate::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn zero_k_is_empty() {
        let index = SpatialIndex::build(vec![Coordinate::new(1.0, 1.0)]);
        assert!(index.query(Coordinate::new(0.0, 0.0), 0).is_empty());
    }

    #[test]
    fn clamps_k_to_size() {
        let points = (0..7).map(|i| Coordinate::new(i as f64, -(i as f64))).collect();
        let index = SpatialIndex::build(points);
        assert_eq!(index.query(Coordinate::new(0.0, 0.0), 50).len(), 7);
    }

    #[test]
    fn ascending_distance_with_positions() {
        let points = vec![
            Coordinate::new(0.0, 3.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(0.0, 2.0),
        ];
        let index = SpatialIndex::build(points);
        let hits = index.query(Coordinate::new(0.0, 0.0), 3);
        let positions: Vec<_> = hits.iter().map(|n| n.position).collect();
        assert_eq!(positions, [1, 2, 0]);
        assert_eq!(hits[0].distance, 1.0);
    }

    #[test]
    fn ties_break_by_position() {
        // 40 identical points force splits through equal values.
        let points = vec![Coordinate::new(10.0, 10.0); 40];
        let index = SpatialIndex::build(points);
        let hits = index.query(Coordinate::new(10.0, 10.0), 5);
        let positions: Vec<_> = hits.iter().map(|n| n.position).collect();
        assert_eq!(positions, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn carries_record_ids() {
        let index = SpatialIndex::from_entries(vec![
            (Coordinate::new(10.0, 20.0), 100),
            (Coordinate::new(30.0, 40.0), 200),
            (Coordinate::new(50.0, 60.0), 300),
        ]);

        let hit = index.nearest(Coordinate::new(31.0, 41.0)).unwrap();
        assert_eq!(hit.position, 1);
        assert_eq!(hit.record, 200);
        assert_eq!(index.coordinate(1), Some(Coordinate::new(30.0, 40.0)));
        assert_eq!(index.record_id(2), Some(300));
        assert_eq!(index.coordinate(3), None);
    }

    proptest! {
        #[test]
        fn symmetric_ties_break_by_position(
            background in prop::collection::vec(coordinate(), 0..100),
        ) {
            let origin = Coordinate::new(0.0, 0.0);
            let mut points: Vec<Coordinate> = background
                .into_iter()
                .filter(|p| p.distance(&origin) > 1.0)
                .collect();
            let base = points.len();
            points.push(Coordinate::new(0.5, 0.0));
            points.push(Coordinate::new(-0.5, 0.0));
            points.push(Coordinate::new(0.0, 0.5));
            let index = SpatialIndex::build(points);
            let positions: Vec<_> = index.query(origin, 3).iter().map(|n| n.position).collect();
            prop_assert_eq!(positions, vec![base, base + 1, base + 2]);
        }

        #[test]
        fn matches_brute_force(
            points in prop::collection::vec(coordinate(), 1..600),
            query in coordinate(),
            k in 1usize..25,
        ) {
            let index = SpatialIndex::build(points.clone());
            let got: Vec<(f64, usize)> = index
                .query(query, k)
                .into_iter()
                .map(|n| (n.distance, n.position))
                .collect();
            prop_assert_eq!(got, brute_force(&points, query, k));
        }

        #[test]
        fn every_point_finds_itself(points in prop::collection::vec(coordinate(), 1..300)) {
            let index = SpatialIndex::build(points.clone());
            for (i, p) in points.iter().enumerate() {
                let hit = index.nearest(*p).unwrap();
                prop_assert_eq!(hit.distance, 0.0);
                prop_assert_eq!(points[hit.position], *p);
                prop_assert!(hit.position <= i);
            }
        }
    }
}

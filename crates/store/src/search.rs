//! Exact nearest-neighbor ranking.
//!
//! Brute-force scan with a bounded top-K structure: every stored vector
//! is compared against the query, and a max-heap of size `k` keeps the
//! best candidates seen so far, with the current worst at the top. This
//! avoids sorting the whole collection: O(N * D + N * log K) for N
//! records of dimensionality D.
//!
//! Ranking is deterministic: ascending distance, ties broken by
//! ascending id. Distances between validated (finite) vectors are
//! compared with `total_cmp`, so the ordering is total even if a sum
//! overflows to infinity.
//!
//! The scan is the whole index. An approximate structure could replace
//! it behind the same contract without changing callers.

use crate::collection::StoredRecord;
use lattice_core::{DistanceMetric, VectorMatch};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A scored record during the scan.
///
/// Ordered by (distance, id) ascending, so the maximum element is the
/// worst candidate: farthest, or at equal distance the one with the
/// greater id. That makes `BinaryHeap::peek` the eviction candidate.
struct Candidate<'a> {
    distance: f32,
    id: &'a str,
    metadata: Option<&'a lattice_core::Value>,
}

impl PartialEq for Candidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.distance.total_cmp(&other.distance) == Ordering::Equal && self.id == other.id
    }
}

impl Eq for Candidate<'_> {}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.id.cmp(other.id))
    }
}

/// Rank all records against `query` and return the best `k` matches.
///
/// The caller has already validated `k > 0`, the query shape, and the
/// dimensionality invariant.
pub(crate) fn top_k<'a, I>(
    records: I,
    query: &[f32],
    k: usize,
    metric: DistanceMetric,
) -> Vec<VectorMatch>
where
    I: Iterator<Item = (&'a String, &'a StoredRecord)>,
{
    let mut heap: BinaryHeap<Candidate<'_>> = BinaryHeap::with_capacity(k + 1);

    for (id, stored) in records {
        let candidate = Candidate {
            distance: distance(metric, query, &stored.vector),
            id: id.as_str(),
            metadata: stored.metadata.as_ref(),
        };

        if heap.len() < k {
            heap.push(candidate);
        } else if let Some(worst) = heap.peek() {
            if candidate < *worst {
                heap.pop();
                heap.push(candidate);
            }
        }
    }

    heap.into_sorted_vec()
        .into_iter()
        .map(|c| VectorMatch::new(c.id, c.distance, c.metadata.cloned()))
        .collect()
}

/// Distance between two equal-length vectors on the metric's scale
/// (lower = closer).
pub fn distance(metric: DistanceMetric, a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    match metric {
        DistanceMetric::Euclidean => l2_distance(a, b),
        DistanceMetric::Cosine => cosine_distance(a, b),
        DistanceMetric::DotProduct => -dot(a, b),
    }
}

fn l2_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum::<f32>()
        .sqrt()
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Cosine distance, `1 - cosine_similarity`.
///
/// A zero vector has no direction; its distance to anything is fixed at
/// 1.0 (the distance of orthogonal vectors) rather than dividing by zero.
fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let norm_product = dot(a, a).sqrt() * dot(b, b).sqrt();
    if norm_product == 0.0 {
        return 1.0;
    }
    1.0 - dot(a, b) / norm_product
}

//! A single collection of vector records.
//!
//! A collection owns the dimensionality invariant: every vector it holds
//! has the same length. The dimensionality is fixed either explicitly at
//! creation time or by the first inserted record, and enforced for every
//! insert and query thereafter.
//!
//! Records live in an `IndexMap` keyed by id, so listing preserves
//! insertion order while id lookup stays O(1). An overwrite keeps the
//! record's original position; a delete shifts later records down so the
//! remaining order is unchanged.

use crate::search;
use indexmap::IndexMap;
use lattice_core::{
    CollectionInfo, DistanceMetric, Value, VectorError, VectorMatch, VectorRecord, VectorResult,
};
use std::time::{SystemTime, UNIX_EPOCH};

/// Stored vector data, without the id (the id is the map key).
#[derive(Debug, Clone)]
pub(crate) struct StoredRecord {
    pub(crate) vector: Vec<f32>,
    pub(crate) metadata: Option<Value>,
}

/// A named set of records sharing one dimensionality.
#[derive(Debug)]
pub struct Collection {
    name: String,
    metric: DistanceMetric,
    /// Established dimensionality. `None` until the first insert for
    /// collections created without an explicit dimension.
    dimension: Option<usize>,
    records: IndexMap<String, StoredRecord>,
    created_at: u64,
}

impl Collection {
    /// Create a collection whose dimensionality is set by the first insert.
    pub fn new(name: impl Into<String>, metric: DistanceMetric) -> Self {
        Collection {
            name: name.into(),
            metric,
            dimension: None,
            records: IndexMap::new(),
            created_at: now_micros(),
        }
    }

    /// Create a collection with an explicit dimensionality.
    ///
    /// The caller validates that `dimension` is non-zero.
    pub fn with_dimension(
        name: impl Into<String>,
        dimension: usize,
        metric: DistanceMetric,
    ) -> Self {
        Collection {
            name: name.into(),
            metric,
            dimension: Some(dimension),
            records: IndexMap::new(),
            created_at: now_micros(),
        }
    }

    /// Collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Distance metric this collection ranks with.
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Established dimensionality, if any record has arrived or the
    /// collection was created with one.
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check if a record exists.
    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Snapshot of the collection's configuration and size.
    pub fn info(&self) -> CollectionInfo {
        CollectionInfo {
            name: self.name.clone(),
            dimension: self.dimension,
            metric: self.metric,
            count: self.records.len(),
            created_at: self.created_at,
        }
    }

    /// Insert or overwrite a record (upsert semantics).
    ///
    /// Fails with `InvalidVector` when the vector is empty or contains a
    /// non-finite element, and with `DimensionMismatch` when the length
    /// disagrees with the established dimensionality. A failed insert
    /// leaves the collection unchanged.
    pub fn insert(
        &mut self,
        id: impl Into<String>,
        vector: Vec<f32>,
        metadata: Option<Value>,
    ) -> VectorResult<VectorRecord> {
        validate_vector(&vector)?;

        match self.dimension {
            Some(expected) if vector.len() != expected => {
                return Err(VectorError::DimensionMismatch {
                    expected,
                    actual: vector.len(),
                });
            }
            Some(_) => {}
            None => self.dimension = Some(vector.len()),
        }

        let id = id.into();
        let record = VectorRecord::new(id.clone(), vector.clone(), metadata.clone());
        self.records.insert(id, StoredRecord { vector, metadata });
        Ok(record)
    }

    /// Get a record by id.
    pub fn get(&self, id: &str) -> VectorResult<VectorRecord> {
        self.records
            .get(id)
            .map(|stored| VectorRecord::new(id, stored.vector.clone(), stored.metadata.clone()))
            .ok_or_else(|| VectorError::NotFound { id: id.to_string() })
    }

    /// List records in insertion order.
    ///
    /// `offset` skips that many records from the front; `limit` caps the
    /// result length. Neither changes the ordering.
    pub fn list(&self, offset: usize, limit: Option<usize>) -> Vec<VectorRecord> {
        self.records
            .iter()
            .skip(offset)
            .take(limit.unwrap_or(usize::MAX))
            .map(|(id, stored)| {
                VectorRecord::new(id.clone(), stored.vector.clone(), stored.metadata.clone())
            })
            .collect()
    }

    /// Delete a record by id.
    ///
    /// Returns whether a record existed and was removed. Never fails on a
    /// missing id. Uses a shifting removal so the insertion order of the
    /// remaining records is preserved.
    pub fn delete(&mut self, id: &str) -> bool {
        self.records.shift_remove(id).is_some()
    }

    /// Search for the `k` records closest to `query`.
    ///
    /// Results are sorted by ascending distance, ties broken by ascending
    /// id. Returns at most `min(k, len)` matches; an empty collection
    /// yields an empty result, never an error. Fails with
    /// `InvalidArgument` when `k == 0`, `InvalidVector` for a malformed
    /// query, and `DimensionMismatch` when the query length disagrees
    /// with the established dimensionality.
    pub fn search(&self, query: &[f32], k: usize) -> VectorResult<Vec<VectorMatch>> {
        if k == 0 {
            return Err(VectorError::invalid_argument("k must be positive"));
        }
        validate_vector(query)?;

        if let Some(expected) = self.dimension {
            if query.len() != expected {
                return Err(VectorError::DimensionMismatch {
                    expected,
                    actual: query.len(),
                });
            }
        }

        Ok(search::top_k(self.records.iter(), query, k, self.metric))
    }
}

/// Reject empty vectors and non-finite elements.
pub(crate) fn validate_vector(vector: &[f32]) -> VectorResult<()> {
    if vector.is_empty() {
        return Err(VectorError::invalid_vector("vector must not be empty"));
    }
    if let Some(pos) = vector.iter().position(|v| !v.is_finite()) {
        return Err(VectorError::invalid_vector(format!(
            "non-finite element at index {}",
            pos
        )));
    }
    Ok(())
}

/// Current time in microseconds since Unix epoch.
fn now_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection() -> Collection {
        Collection::new("test", DistanceMetric::Euclidean)
    }

    // ========================================
    // Upsert
    // ========================================

    #[test]
    fn test_insert_returns_stored_record() {
        let mut c = collection();
        let record = c.insert("a", vec![1.0, 2.0], None).unwrap();

        assert_eq!(record.id, "a");
        assert_eq!(record.vector, vec![1.0, 2.0]);
        assert_eq!(c.len(), 1);
        assert_eq!(c.dimension(), Some(2));
    }

    #[test]
    fn test_upsert_overwrites_not_duplicates() {
        let mut c = collection();
        c.insert("a", vec![1.0, 2.0, 3.0], None).unwrap();
        c.insert("a", vec![9.0, 9.0, 9.0], None).unwrap();

        assert_eq!(c.len(), 1);
        assert_eq!(c.get("a").unwrap().vector, vec![9.0, 9.0, 9.0]);
    }

    #[test]
    fn test_upsert_idempotence() {
        let mut c = collection();
        let meta: Value = [("k".to_string(), Value::Int(1))].into_iter().collect();

        let first = c.insert("a", vec![1.0], Some(meta.clone())).unwrap();
        let second = c.insert("a", vec![1.0], Some(meta)).unwrap();

        assert_eq!(first, second);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_overwrite_keeps_insertion_position() {
        let mut c = collection();
        c.insert("a", vec![1.0], None).unwrap();
        c.insert("b", vec![2.0], None).unwrap();
        c.insert("a", vec![3.0], None).unwrap();

        let ids: Vec<String> = c.list(0, None).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    // ========================================
    // Dimension invariant
    // ========================================

    #[test]
    fn test_dimension_set_by_first_insert_then_enforced() {
        let mut c = collection();
        c.insert("a", vec![0.0, 0.0, 0.0], None).unwrap();

        let result = c.insert("b", vec![1.0, 2.0], None);
        assert_eq!(
            result,
            Err(VectorError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        );

        // Rejected insert leaves the collection unchanged.
        assert_eq!(c.len(), 1);
        assert!(!c.contains("b"));
    }

    #[test]
    fn test_explicit_dimension_enforced_from_creation() {
        let mut c = Collection::with_dimension("test", 4, DistanceMetric::Euclidean);
        assert_eq!(c.dimension(), Some(4));

        let result = c.insert("a", vec![1.0], None);
        assert!(matches!(
            result,
            Err(VectorError::DimensionMismatch {
                expected: 4,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_non_finite_vector_rejected() {
        let mut c = collection();

        let result = c.insert("a", vec![1.0, f32::NAN], None);
        assert!(matches!(result, Err(VectorError::InvalidVector { .. })));

        let result = c.insert("a", vec![f32::INFINITY], None);
        assert!(matches!(result, Err(VectorError::InvalidVector { .. })));

        assert!(c.is_empty());
        // A rejected vector must not establish the dimensionality either.
        assert_eq!(c.dimension(), None);
    }

    #[test]
    fn test_empty_vector_rejected() {
        let mut c = collection();
        let result = c.insert("a", vec![], None);
        assert!(matches!(result, Err(VectorError::InvalidVector { .. })));
    }

    // ========================================
    // Get / list
    // ========================================

    #[test]
    fn test_get_missing_is_not_found() {
        let c = collection();
        assert_eq!(
            c.get("ghost"),
            Err(VectorError::NotFound {
                id: "ghost".to_string()
            })
        );
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let mut c = collection();
        for id in ["c", "a", "b"] {
            c.insert(id, vec![1.0], None).unwrap();
        }

        let ids: Vec<String> = c.list(0, None).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_list_offset_and_limit() {
        let mut c = collection();
        for id in ["a", "b", "c", "d"] {
            c.insert(id, vec![1.0], None).unwrap();
        }

        let ids: Vec<String> = c.list(1, Some(2)).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["b", "c"]);

        assert!(c.list(10, None).is_empty());
    }

    #[test]
    fn test_list_empty_collection() {
        let c = collection();
        assert!(c.list(0, None).is_empty());
    }

    // ========================================
    // Delete
    // ========================================

    #[test]
    fn test_delete_idempotence() {
        let mut c = collection();
        c.insert("a", vec![1.0], None).unwrap();

        assert!(c.delete("a"));
        assert!(!c.delete("a"));
        assert!(!c.delete("never-existed"));
        assert!(c.is_empty());
    }

    #[test]
    fn test_delete_preserves_remaining_order() {
        let mut c = collection();
        for id in ["a", "b", "c"] {
            c.insert(id, vec![1.0], None).unwrap();
        }
        c.delete("b");

        let ids: Vec<String> = c.list(0, None).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_deleted_record_not_searchable() {
        let mut c = collection();
        c.insert("a", vec![0.0, 0.0], None).unwrap();
        c.insert("b", vec![1.0, 0.0], None).unwrap();
        c.delete("a");

        let matches = c.search(&[0.0, 0.0], 10).unwrap();
        let ids: Vec<String> = matches.into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["b"]);
    }

    // ========================================
    // Search plumbing (ranking itself is covered in search.rs)
    // ========================================

    #[test]
    fn test_search_zero_k_rejected() {
        let mut c = collection();
        c.insert("a", vec![1.0], None).unwrap();

        let result = c.search(&[1.0], 0);
        assert!(matches!(result, Err(VectorError::InvalidArgument { .. })));
    }

    #[test]
    fn test_search_dimension_mismatch() {
        let mut c = collection();
        c.insert("a", vec![1.0, 2.0], None).unwrap();

        let result = c.search(&[1.0], 5);
        assert!(matches!(
            result,
            Err(VectorError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_search_empty_collection_is_empty_result() {
        let c = collection();
        assert!(c.search(&[1.0, 2.0], 3).unwrap().is_empty());
    }

    #[test]
    fn test_search_non_finite_query_rejected() {
        let mut c = collection();
        c.insert("a", vec![1.0], None).unwrap();

        let result = c.search(&[f32::NAN], 1);
        assert!(matches!(result, Err(VectorError::InvalidVector { .. })));
    }

    #[test]
    fn test_info() {
        let mut c = collection();
        c.insert("a", vec![1.0, 2.0], None).unwrap();

        let info = c.info();
        assert_eq!(info.name, "test");
        assert_eq!(info.dimension, Some(2));
        assert_eq!(info.metric, DistanceMetric::Euclidean);
        assert_eq!(info.count, 1);
    }
}

//! Shared multi-collection vector store.
//!
//! ## Design
//!
//! `VectorStore` is a cloneable handle over the collection map. It holds:
//! - `Arc<RwLock<BTreeMap<String, Collection>>>` for the collections
//! - `Arc<StoreOptions>` for store-wide configuration
//!
//! The `BTreeMap` keeps collection listings deterministic. There is no
//! ambient singleton: every consumer receives a handle, so tests can run
//! independent stores side by side.
//!
//! ## Concurrency
//!
//! Readers (get, list, search, count) take the read lock and run
//! concurrently with each other. Writers (insert, delete, create, drop)
//! take the write lock and are mutually exclusive with readers and each
//! other, so a search never observes a half-applied upsert or delete.
//! Every operation is synchronous and bounded by collection size; the
//! lock is never held across I/O.

use crate::collection::{validate_vector, Collection};
use lattice_core::{
    CollectionInfo, DistanceMetric, Value, VectorError, VectorMatch, VectorRecord, VectorResult,
};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Store-wide configuration.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Collection used when a request names none.
    pub default_collection: String,
    /// Metric assigned to lazily created collections.
    pub default_metric: DistanceMetric,
    /// Upper bound on accepted dimensionality.
    pub max_dimension: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        StoreOptions {
            default_collection: "vectors".to_string(),
            default_metric: DistanceMetric::default(),
            max_dimension: 8192,
        }
    }
}

impl StoreOptions {
    /// Set the default collection name.
    pub fn default_collection(mut self, name: impl Into<String>) -> Self {
        self.default_collection = name.into();
        self
    }

    /// Set the metric for lazily created collections.
    pub fn default_metric(mut self, metric: DistanceMetric) -> Self {
        self.default_metric = metric;
        self
    }

    /// Set the maximum accepted dimensionality.
    pub fn max_dimension(mut self, max: usize) -> Self {
        self.max_dimension = max;
        self
    }
}

/// Thread-safe handle to a set of named collections.
#[derive(Clone)]
pub struct VectorStore {
    collections: Arc<RwLock<BTreeMap<String, Collection>>>,
    options: Arc<StoreOptions>,
}

impl Default for VectorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorStore {
    /// Create a store with default options.
    pub fn new() -> Self {
        Self::with_options(StoreOptions::default())
    }

    /// Create a store with explicit options.
    pub fn with_options(options: StoreOptions) -> Self {
        VectorStore {
            collections: Arc::new(RwLock::new(BTreeMap::new())),
            options: Arc::new(options),
        }
    }

    /// Store-wide configuration.
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    // ========================================================================
    // Collection management
    // ========================================================================

    /// Create a collection with an explicit dimensionality.
    ///
    /// Recreating an existing collection replaces it, records included.
    ///
    /// # Errors
    /// `InvalidArgument` if `dimension` is zero or above the configured
    /// maximum.
    pub fn create_collection(
        &self,
        name: &str,
        dimension: usize,
        metric: DistanceMetric,
    ) -> VectorResult<CollectionInfo> {
        self.check_dimension_bound(dimension)?;

        let collection = Collection::with_dimension(name, dimension, metric);
        let info = collection.info();

        let mut collections = self.collections.write();
        let replaced = collections.insert(name.to_string(), collection).is_some();
        drop(collections);

        info!(collection = name, dimension, replaced, "created collection");
        Ok(info)
    }

    /// Drop a collection and all its records.
    ///
    /// Returns whether the collection existed. Idempotent.
    pub fn drop_collection(&self, name: &str) -> bool {
        let existed = self.collections.write().remove(name).is_some();
        if existed {
            info!(collection = name, "dropped collection");
        }
        existed
    }

    /// List all collections, sorted by name.
    pub fn list_collections(&self) -> Vec<CollectionInfo> {
        self.collections
            .read()
            .values()
            .map(Collection::info)
            .collect()
    }

    /// Check if a collection exists.
    pub fn collection_exists(&self, name: &str) -> bool {
        self.collections.read().contains_key(name)
    }

    /// Get a collection's info, if it exists.
    pub fn collection_info(&self, name: &str) -> Option<CollectionInfo> {
        self.collections.read().get(name).map(Collection::info)
    }

    /// Number of records in a collection. Zero if the collection is absent.
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map(Collection::len)
            .unwrap_or(0)
    }

    // ========================================================================
    // Record operations
    // ========================================================================

    /// Insert or overwrite a record (upsert semantics).
    ///
    /// The collection is created lazily when absent, taking its
    /// dimensionality from this first vector and the store's default
    /// metric. The vector is validated before the collection is touched,
    /// so a rejected insert creates nothing and changes nothing.
    pub fn upsert(
        &self,
        collection: &str,
        id: &str,
        vector: Vec<f32>,
        metadata: Option<Value>,
    ) -> VectorResult<VectorRecord> {
        validate_vector(&vector)?;
        self.check_dimension_bound(vector.len())?;

        let mut collections = self.collections.write();
        let target = collections
            .entry(collection.to_string())
            .or_insert_with(|| Collection::new(collection, self.options.default_metric));
        let record = target.insert(id, vector, metadata)?;
        drop(collections);

        debug!(collection, id, "upserted vector");
        Ok(record)
    }

    /// Get a record by id.
    ///
    /// A missing collection reads as a missing record.
    pub fn get(&self, collection: &str, id: &str) -> VectorResult<VectorRecord> {
        match self.collections.read().get(collection) {
            Some(c) => c.get(id),
            None => Err(VectorError::NotFound { id: id.to_string() }),
        }
    }

    /// List records in insertion order.
    ///
    /// An absent or empty collection yields an empty list.
    pub fn list(&self, collection: &str, offset: usize, limit: Option<usize>) -> Vec<VectorRecord> {
        self.collections
            .read()
            .get(collection)
            .map(|c| c.list(offset, limit))
            .unwrap_or_default()
    }

    /// Delete a record by id.
    ///
    /// Returns whether a record existed and was removed. Idempotent; a
    /// missing collection reads as a missing record.
    pub fn delete(&self, collection: &str, id: &str) -> bool {
        let deleted = self
            .collections
            .write()
            .get_mut(collection)
            .map(|c| c.delete(id))
            .unwrap_or(false);
        if deleted {
            debug!(collection, id, "deleted vector");
        }
        deleted
    }

    /// Search a collection for the `k` records closest to `query`.
    ///
    /// An absent collection yields an empty result after the same
    /// argument validation a present one would apply.
    pub fn search(
        &self,
        collection: &str,
        query: &[f32],
        k: usize,
    ) -> VectorResult<Vec<VectorMatch>> {
        let collections = self.collections.read();
        let matches = match collections.get(collection) {
            Some(c) => c.search(query, k)?,
            None => {
                if k == 0 {
                    return Err(VectorError::invalid_argument("k must be positive"));
                }
                validate_vector(query)?;
                Vec::new()
            }
        };
        drop(collections);

        debug!(collection, k, found = matches.len(), "searched vectors");
        Ok(matches)
    }

    fn check_dimension_bound(&self, dimension: usize) -> VectorResult<()> {
        if dimension == 0 {
            return Err(VectorError::invalid_argument("dimension must be positive"));
        }
        if dimension > self.options.max_dimension {
            return Err(VectorError::invalid_argument(format!(
                "dimension {} exceeds maximum {}",
                dimension, self.options.max_dimension
            )));
        }
        Ok(())
    }
}

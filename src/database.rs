//! Main entry point.
//!
//! `Lattice` bundles a store handle with a router and exposes the common
//! operations against the default collection. It is cheap to clone and
//! safe to share across threads; clones see the same data.

use lattice_api::Router;
use lattice_core::{
    CollectionInfo, DistanceMetric, Value, VectorMatch, VectorRecord, VectorResult,
};
use lattice_store::{StoreOptions, VectorStore};

/// An in-process vector database.
///
/// Convenience methods target the default collection; reach for
/// [`Lattice::router`] when a request names its own collection.
#[derive(Clone)]
pub struct Lattice {
    router: Router,
}

impl Default for Lattice {
    fn default() -> Self {
        Self::new()
    }
}

impl Lattice {
    /// Create a database with default options.
    pub fn new() -> Self {
        Self::with_options(StoreOptions::default())
    }

    /// Create a database with explicit options.
    pub fn with_options(options: StoreOptions) -> Self {
        Lattice {
            router: Router::new(VectorStore::with_options(options)),
        }
    }

    /// The request router (full protocol surface).
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// The underlying store handle.
    pub fn store(&self) -> &VectorStore {
        self.router.store()
    }

    // ========================================================================
    // Default-collection operations
    // ========================================================================

    /// Insert or overwrite a vector record (upsert).
    pub fn add_vector(
        &self,
        id: &str,
        vector: Vec<f32>,
        metadata: Option<Value>,
    ) -> VectorResult<VectorRecord> {
        self.router.add_vector(None, id, vector, metadata)
    }

    /// Get a record by id.
    pub fn get_vector(&self, id: &str) -> VectorResult<VectorRecord> {
        self.router.read_resource(None, id)
    }

    /// List records in insertion order.
    pub fn list_vectors(&self) -> VectorResult<Vec<VectorRecord>> {
        self.router.list_resources(None, 0, None)
    }

    /// Delete a record by id. Returns whether anything was removed.
    pub fn delete_vector(&self, id: &str) -> VectorResult<bool> {
        self.router.delete_vector(None, id)
    }

    /// Rank stored vectors against `query`, best first.
    pub fn search(&self, query: &[f32], k: usize) -> VectorResult<Vec<VectorMatch>> {
        self.router.search_vectors(None, query, k as i64)
    }

    // ========================================================================
    // Collection management
    // ========================================================================

    /// Create a collection with an explicit dimensionality.
    pub fn create_collection(
        &self,
        name: &str,
        dimension: usize,
        metric: DistanceMetric,
    ) -> VectorResult<CollectionInfo> {
        self.router.create_collection(name, dimension, metric)
    }

    /// Drop a collection. Returns whether it existed.
    pub fn drop_collection(&self, name: &str) -> VectorResult<bool> {
        self.router.drop_collection(name)
    }

    /// List all collections, sorted by name.
    pub fn list_collections(&self) -> Vec<CollectionInfo> {
        self.router.list_collections()
    }
}

//! Request validation and dispatch.
//!
//! The router sits between the transport and the store. It owns three
//! jobs:
//!
//! 1. Validate request shape before anything touches the store: ids and
//!    collection names are well-formed, vectors are non-empty and
//!    all-finite, limits are positive.
//! 2. Dispatch to the store or the search path.
//! 3. Translate domain errors into the stable wire surface. Nothing
//!    internal leaks; nothing is silently swallowed.
//!
//! Mutating endpoints are idempotent under retry: `add_vector` upserts,
//! `delete_vector` and `drop_collection` report whether anything was
//! removed. The read endpoints are side-effect free.

use crate::protocol::{Request, Response};
use lattice_core::{
    CollectionInfo, DistanceMetric, Value, VectorError, VectorMatch, VectorRecord, VectorResult,
};
use lattice_store::VectorStore;
use tracing::warn;

/// Validates, dispatches, and shapes responses for a [`VectorStore`].
#[derive(Clone)]
pub struct Router {
    store: VectorStore,
}

impl Router {
    /// Create a router over a store handle.
    pub fn new(store: VectorStore) -> Self {
        Router { store }
    }

    /// The underlying store handle.
    pub fn store(&self) -> &VectorStore {
        &self.store
    }

    /// Route a decoded request and shape the outcome for the wire.
    pub fn dispatch(&self, request: Request) -> Response {
        let result = match request {
            Request::CreateCollection {
                name,
                dimension,
                metric,
            } => self
                .create_collection(&name, dimension, metric)
                .map(Response::Collection),
            Request::DropCollection { name } => {
                self.drop_collection(&name).map(Response::Deleted)
            }
            Request::ListCollections => Ok(Response::Collections(self.list_collections())),
            Request::AddVector {
                collection,
                id,
                vector,
                metadata,
            } => self
                .add_vector(collection.as_deref(), &id, vector, metadata)
                .map(Response::Record),
            Request::SearchVectors {
                collection,
                query_vector,
                limit,
            } => self
                .search_vectors(collection.as_deref(), &query_vector, limit)
                .map(Response::Matches),
            Request::ListResources {
                collection,
                offset,
                limit,
            } => self
                .list_resources(collection.as_deref(), offset, limit)
                .map(Response::Records),
            Request::ReadResource { collection, id } => self
                .read_resource(collection.as_deref(), &id)
                .map(Response::Record),
            Request::DeleteVector { collection, id } => self
                .delete_vector(collection.as_deref(), &id)
                .map(Response::Deleted),
        };

        result.unwrap_or_else(|err| {
            warn!(code = err.code(), %err, "request rejected");
            Response::Error(err.to_wire())
        })
    }

    // ========================================================================
    // Tool endpoints
    // ========================================================================

    /// Insert or overwrite a vector record (upsert).
    pub fn add_vector(
        &self,
        collection: Option<&str>,
        id: &str,
        vector: Vec<f32>,
        metadata: Option<Value>,
    ) -> VectorResult<VectorRecord> {
        let collection = self.resolve_collection(collection)?;
        validate_id(id)?;
        validate_query_shape(&vector)?;
        self.store.upsert(&collection, id, vector, metadata)
    }

    /// Rank stored vectors against a query, best first.
    pub fn search_vectors(
        &self,
        collection: Option<&str>,
        query_vector: &[f32],
        limit: i64,
    ) -> VectorResult<Vec<VectorMatch>> {
        let collection = self.resolve_collection(collection)?;
        let k = validate_limit(limit)?;
        validate_query_shape(query_vector)?;
        self.store.search(&collection, query_vector, k)
    }

    /// Delete a record. Returns whether anything was removed.
    pub fn delete_vector(&self, collection: Option<&str>, id: &str) -> VectorResult<bool> {
        let collection = self.resolve_collection(collection)?;
        validate_id(id)?;
        Ok(self.store.delete(&collection, id))
    }

    // ========================================================================
    // Resource endpoints
    // ========================================================================

    /// List records in insertion order.
    pub fn list_resources(
        &self,
        collection: Option<&str>,
        offset: usize,
        limit: Option<usize>,
    ) -> VectorResult<Vec<VectorRecord>> {
        let collection = self.resolve_collection(collection)?;
        Ok(self.store.list(&collection, offset, limit))
    }

    /// Read a single record by id.
    pub fn read_resource(&self, collection: Option<&str>, id: &str) -> VectorResult<VectorRecord> {
        let collection = self.resolve_collection(collection)?;
        validate_id(id)?;
        self.store.get(&collection, id)
    }

    // ========================================================================
    // Collection endpoints
    // ========================================================================

    /// Create a collection with an explicit dimensionality.
    ///
    /// Recreating an existing collection replaces it.
    pub fn create_collection(
        &self,
        name: &str,
        dimension: usize,
        metric: DistanceMetric,
    ) -> VectorResult<CollectionInfo> {
        validate_collection_name(name)?;
        self.store.create_collection(name, dimension, metric)
    }

    /// Drop a collection. Returns whether it existed.
    pub fn drop_collection(&self, name: &str) -> VectorResult<bool> {
        validate_collection_name(name)?;
        Ok(self.store.drop_collection(name))
    }

    /// List all collections, sorted by name.
    pub fn list_collections(&self) -> Vec<CollectionInfo> {
        self.store.list_collections()
    }

    fn resolve_collection(&self, collection: Option<&str>) -> VectorResult<String> {
        match collection {
            Some(name) => {
                validate_collection_name(name)?;
                Ok(name.to_string())
            }
            None => Ok(self.store.options().default_collection.clone()),
        }
    }
}

/// Record ids must be non-empty.
fn validate_id(id: &str) -> VectorResult<()> {
    if id.is_empty() {
        return Err(VectorError::invalid_argument("id must not be empty"));
    }
    Ok(())
}

/// Collection names must be non-empty, without path separators, and not
/// start with `_` (reserved).
fn validate_collection_name(name: &str) -> VectorResult<()> {
    if name.is_empty() {
        return Err(VectorError::invalid_argument(
            "collection name must not be empty",
        ));
    }
    if name.starts_with('_') {
        return Err(VectorError::invalid_argument(format!(
            "collection name '{}' is reserved",
            name
        )));
    }
    if name.contains('/') {
        return Err(VectorError::invalid_argument(format!(
            "collection name '{}' must not contain '/'",
            name
        )));
    }
    Ok(())
}

/// Vectors crossing the protocol boundary must be non-empty sequences of
/// finite numbers. The store enforces the same rule; checking here keeps
/// malformed payloads out of the lock entirely.
fn validate_query_shape(vector: &[f32]) -> VectorResult<()> {
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

/// Search limits must be positive.
fn validate_limit(limit: i64) -> VectorResult<usize> {
    if limit <= 0 {
        return Err(VectorError::invalid_argument(format!(
            "limit must be positive, got {}",
            limit
        )));
    }
    Ok(limit as usize)
}

//! Request and response protocol types.
//!
//! The transport layer decodes client payloads into [`Request`] and
//! encodes [`Response`] back out; both are plain serde types with no
//! framing assumptions. Requests are internally tagged by operation:
//!
//! ```json
//! {"op": "add_vector", "id": "doc-1", "vector": [0.1, 0.2]}
//! {"op": "search_vectors", "query_vector": [0.1, 0.2], "limit": 5}
//! ```
//!
//! `collection` may be omitted anywhere it appears; the router then
//! targets its configured default collection. `limit` is carried as a
//! signed integer so a non-positive value reaches validation instead of
//! failing to decode.

use lattice_core::{CollectionInfo, DistanceMetric, Value, VectorMatch, VectorRecord, WireError};
use serde::{Deserialize, Serialize};

/// Default number of search results when the request names no limit.
pub const DEFAULT_SEARCH_LIMIT: i64 = 10;

fn default_search_limit() -> i64 {
    DEFAULT_SEARCH_LIMIT
}

/// A decoded client request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Create a collection with an explicit dimensionality.
    /// Recreating an existing collection replaces it.
    CreateCollection {
        /// Collection name.
        name: String,
        /// Dimensionality every vector must have.
        dimension: usize,
        /// Distance metric; defaults to Euclidean.
        #[serde(default)]
        metric: DistanceMetric,
    },

    /// Drop a collection and all its records.
    DropCollection {
        /// Collection name.
        name: String,
    },

    /// List all collections.
    ListCollections,

    /// Insert or overwrite a vector record.
    AddVector {
        /// Target collection; default collection when omitted.
        #[serde(default)]
        collection: Option<String>,
        /// Record id, unique within the collection.
        id: String,
        /// The embedding vector.
        vector: Vec<f32>,
        /// Optional metadata bag.
        #[serde(default)]
        metadata: Option<Value>,
    },

    /// Rank stored vectors against a query.
    SearchVectors {
        /// Target collection; default collection when omitted.
        #[serde(default)]
        collection: Option<String>,
        /// The query vector.
        query_vector: Vec<f32>,
        /// Maximum number of results; defaults to 10, must be positive.
        #[serde(default = "default_search_limit")]
        limit: i64,
    },

    /// List records in insertion order.
    ListResources {
        /// Target collection; default collection when omitted.
        #[serde(default)]
        collection: Option<String>,
        /// Records to skip from the front.
        #[serde(default)]
        offset: usize,
        /// Cap on the number of records returned.
        #[serde(default)]
        limit: Option<usize>,
    },

    /// Read a single record by id.
    ReadResource {
        /// Target collection; default collection when omitted.
        #[serde(default)]
        collection: Option<String>,
        /// Record id.
        id: String,
    },

    /// Delete a record by id.
    DeleteVector {
        /// Target collection; default collection when omitted.
        #[serde(default)]
        collection: Option<String>,
        /// Record id.
        id: String,
    },
}

/// The routed result of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Response {
    /// A single record (add_vector, read_resource).
    Record(VectorRecord),
    /// Records in insertion order (list_resources).
    Records(Vec<VectorRecord>),
    /// Ranked matches (search_vectors).
    Matches(Vec<VectorMatch>),
    /// A single collection (create_collection).
    Collection(CollectionInfo),
    /// All collections, sorted by name (list_collections).
    Collections(Vec<CollectionInfo>),
    /// Whether a delete or drop removed anything.
    Deleted(bool),
    /// A rejected or failed request.
    Error(WireError),
}

impl Response {
    /// Check if this response carries an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error(_))
    }
}

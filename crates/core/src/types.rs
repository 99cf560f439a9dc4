//! Record, match, and collection types.
//!
//! These types define what the store holds and what search returns.
//! Distance computation itself lives in the store crate; this module only
//! fixes the metric contract.

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Distance metric for similarity ranking.
///
/// Every metric is expressed on a distance scale where **lower = closer**,
/// so search results are uniformly sorted ascending:
///
/// - `Euclidean`: L2 distance. Range `[0, inf)`.
/// - `Cosine`: cosine distance, `1 - cosine_similarity`. Range `[0, 2]`.
/// - `DotProduct`: negated inner product. Unbounded; assumes vectors are
///   normalized by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Euclidean (L2) distance.
    #[default]
    Euclidean,
    /// Cosine distance (1 - cosine similarity).
    Cosine,
    /// Negated dot product.
    DotProduct,
}

impl DistanceMetric {
    /// Human-readable name for display.
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::DotProduct => "dot_product",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "euclidean" | "l2" => Some(DistanceMetric::Euclidean),
            "cosine" => Some(DistanceMetric::Cosine),
            "dot_product" | "dot" | "inner_product" => Some(DistanceMetric::DotProduct),
            _ => None,
        }
    }
}

/// A stored vector with its id and metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Unique id within the collection.
    pub id: String,

    /// The embedding vector.
    pub vector: Vec<f32>,

    /// Optional metadata bag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl VectorRecord {
    /// Create a new record.
    pub fn new(id: impl Into<String>, vector: Vec<f32>, metadata: Option<Value>) -> Self {
        VectorRecord {
            id: id.into(),
            vector,
            metadata,
        }
    }

    /// Dimensionality of the stored vector.
    pub fn dimension(&self) -> usize {
        self.vector.len()
    }
}

/// A single search result.
///
/// `score` is on the collection metric's distance scale (lower = closer);
/// result lists are sorted by ascending score, ties broken by ascending id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorMatch {
    /// Id of the matched record.
    pub id: String,

    /// Distance between the query and the matched vector.
    pub score: f32,

    /// Metadata of the matched record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl VectorMatch {
    /// Create a new match.
    pub fn new(id: impl Into<String>, score: f32, metadata: Option<Value>) -> Self {
        VectorMatch {
            id: id.into(),
            score,
            metadata,
        }
    }
}

/// Snapshot of a collection's configuration and size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    /// Collection name.
    pub name: String,

    /// Established dimensionality. `None` until the first record arrives
    /// for collections created lazily without an explicit dimension.
    pub dimension: Option<usize>,

    /// Distance metric the collection ranks with.
    pub metric: DistanceMetric,

    /// Current record count.
    pub count: usize,

    /// Creation timestamp (microseconds since Unix epoch).
    pub created_at: u64,
}

//! Core types for the Lattice vector store.
//!
//! This crate holds the value model, the record and collection types,
//! the domain error taxonomy, and the wire error surface. It has no
//! storage or search logic of its own.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod types;
pub mod value;
pub mod wire;

pub use error::{VectorError, VectorResult};
pub use types::{CollectionInfo, DistanceMetric, VectorMatch, VectorRecord};
pub use value::Value;
pub use wire::WireError;

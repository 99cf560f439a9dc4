//! # Lattice
//!
//! In-process vector store with exact nearest-neighbor search.
//!
//! Lattice holds vector records (id, embedding, metadata) in named
//! collections and ranks them against a query by brute-force scan with a
//! bounded top-K. Everything is in memory and synchronous; indexing,
//! persistence, and transport are deliberately out of scope.
//!
//! ## Quick Start
//!
//! ```
//! use latticedb::prelude::*;
//!
//! let db = Lattice::new();
//!
//! db.add_vector("a", vec![0.0, 0.0], None)?;
//! db.add_vector("b", vec![1.0, 0.0], None)?;
//!
//! let matches = db.search(&[0.1, 0.0], 2)?;
//! assert_eq!(matches[0].id, "a");
//! # Ok::<(), latticedb::Error>(())
//! ```
//!
//! ## Layers
//!
//! - [`lattice_core`] - value model, record types, error taxonomy
//! - [`lattice_store`] - collections, the dimension invariant, search
//! - [`lattice_api`] - request protocol, validation, error shaping
//!
//! The [`Lattice`] facade wires the layers together over one store
//! handle. For protocol-level access (decoded client requests), use
//! [`Router`] directly.

#![warn(missing_docs)]

mod database;

pub mod prelude;

pub use database::Lattice;

// Re-export the protocol surface
pub use lattice_api::{Request, Response, Router, DEFAULT_SEARCH_LIMIT};

// Re-export core types
pub use lattice_core::{
    CollectionInfo, DistanceMetric, Value, VectorError as Error, VectorMatch, VectorRecord,
    VectorResult as Result, WireError,
};

// Re-export the store layer
pub use lattice_store::{StoreOptions, VectorStore};

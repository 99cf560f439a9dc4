//! Convenient imports.
//!
//! ```
//! use latticedb::prelude::*;
//!
//! let db = Lattice::new();
//! # let _ = db;
//! ```

pub use crate::{
    CollectionInfo, DistanceMetric, Error, Lattice, Request, Response, Result, Router,
    StoreOptions, Value, VectorMatch, VectorRecord, VectorStore, WireError,
};

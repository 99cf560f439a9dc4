//! Request routing and protocol types.
//!
//! The transport layer (out of scope here) hands decoded [`Request`]
//! values to a [`Router`], which validates, dispatches to the store, and
//! shapes the outcome as a [`Response`] whose errors use the frozen wire
//! codes.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod protocol;
pub mod router;

pub use protocol::{Request, Response, DEFAULT_SEARCH_LIMIT};
pub use router::Router;

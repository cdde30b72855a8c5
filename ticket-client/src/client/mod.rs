//! Transport module - HTTP clients behind one trait.
//!
//! `NetworkHttpClient` talks to the order service over the network;
//! `OneshotHttpClient` drives an in-process axum router.

pub mod http;
#[cfg(any(test, feature = "in-process"))]
pub mod http_oneshot;

// Re-export main types
pub use http::{BinaryResponse, HttpClient, NetworkHttpClient, QueryPairs};
#[cfg(any(test, feature = "in-process"))]
pub use http_oneshot::OneshotHttpClient;

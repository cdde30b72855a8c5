//! Ticket Client - order service client and session store
//!
//! - [`OrderApi`] / [`RemoteOrderApi`]: one method per order service endpoint
//! - [`OrderStore`]: session state (list, pagination, filter, details,
//!   statistics, exports) driven by those calls
//! - [`HttpClient`]: transport seam, over the network or in-process

pub mod api;
pub mod client;
pub mod config;
pub mod download;
pub mod error;
pub mod store;

pub use api::{ExportKind, ExportPayload, OrderApi, RemoteOrderApi};
pub use client::{HttpClient, NetworkHttpClient};
#[cfg(any(test, feature = "in-process"))]
pub use client::OneshotHttpClient;
pub use config::ClientConfig;
pub use download::{DirectorySink, DownloadSink};
pub use error::{ClientError, ClientResult};
pub use store::{OperationFamily, OrderStore, SessionState};

// Re-export shared types for convenience
pub use shared;

//! Shared types for the order ticket client
//!
//! Wire-level data model exchanged with the order service: orders,
//! statistics, search filters and pagination envelopes.

pub mod error;
pub mod models;
pub mod query;

// Re-exports
pub use error::ParseStatusError;
pub use models::{Order, OrderCreate, OrderStatistics, OrderStatus};
pub use query::{DEFAULT_PAGE_SIZE, Page, PageRequest, SearchField, SearchFilter};
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};

//! Data models
//!
//! Mirrors the JSON the order service emits. Field names are camelCase on
//! the wire; ids are `i64` and assigned server-side.

pub mod order;
pub mod statistics;

// Re-exports
pub use order::*;
pub use statistics::*;

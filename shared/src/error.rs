//! Parse errors for shared types

use thiserror::Error;

/// Returned when a string is not one of the known order status names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0}")]
pub struct ParseStatusError(pub String);

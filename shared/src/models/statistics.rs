//! Order statistics

use serde::{Deserialize, Serialize};

/// Aggregate order counts, keyed by a fixed set of labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatistics {
    pub total_orders: u64,
    pub pending_orders: u64,
    pub processing_orders: u64,
    pub delivered_orders: u64,
    pub cancelled_orders: u64,
}

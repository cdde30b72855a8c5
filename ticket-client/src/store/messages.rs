//! User-facing failure messages, one per operation

pub const FETCH_ORDERS_FAILED: &str = "Failed to fetch orders";
pub const SEARCH_ORDERS_FAILED: &str = "Failed to search orders";
pub const FETCH_ORDER_FAILED: &str = "Failed to fetch order details";
pub const ORDER_NOT_FOUND: &str = "Order not found";
pub const FETCH_STATISTICS_FAILED: &str = "Failed to fetch statistics";
pub const CREATE_ORDER_FAILED: &str = "Failed to create order";
pub const UPDATE_ORDER_FAILED: &str = "Failed to update order";
pub const DELETE_ORDER_FAILED: &str = "Failed to delete order";
pub const EXPORT_PREVIEW_FAILED: &str = "Failed to load export preview";
pub const EXPORT_INVOICE_FAILED: &str = "Failed to export invoice";
pub const EXPORT_INVOICES_FAILED: &str = "Failed to export invoices";
pub const EXPORT_ORDERS_FAILED: &str = "Failed to export orders";
pub const NOTHING_TO_EXPORT: &str = "No orders to export";
pub const SAVE_EXPORT_FAILED: &str = "Failed to save export";

//! Remote access interface
//!
//! [`OrderApi`] maps each logical operation to exactly one round trip
//! against the order service. It holds no state; [`RemoteOrderApi`] is the
//! implementation over any [`HttpClient`](crate::client::HttpClient).

mod export;
mod remote;

pub use export::{ExportKind, ExportPayload};
pub use remote::RemoteOrderApi;

use async_trait::async_trait;
use shared::{Order, OrderCreate, OrderStatistics, OrderStatus, Page, PageRequest, SearchFilter};

use crate::ClientResult;

/// Order service operations
#[async_trait]
pub trait OrderApi: Send + Sync {
    /// All orders, one page
    async fn list(&self, page: PageRequest) -> ClientResult<Page<Order>>;

    /// Filtered orders; filter fields are sent verbatim, empty strings included
    async fn search(&self, filter: &SearchFilter, page: PageRequest) -> ClientResult<Page<Order>>;

    async fn get_by_id(&self, id: i64) -> ClientResult<Order>;

    async fn get_by_number(&self, order_number: &str) -> ClientResult<Order>;

    async fn list_by_customer(&self, customer_name: &str, page: PageRequest) -> ClientResult<Page<Order>>;

    async fn list_by_status(&self, status: OrderStatus, page: PageRequest) -> ClientResult<Page<Order>>;

    async fn list_recent(&self, page: PageRequest) -> ClientResult<Page<Order>>;

    async fn statistics(&self) -> ClientResult<OrderStatistics>;

    /// Create an order; the server assigns id and timestamps
    async fn create(&self, order: &OrderCreate) -> ClientResult<Order>;

    async fn update(&self, id: i64, order: &Order) -> ClientResult<Order>;

    async fn delete(&self, id: i64) -> ClientResult<()>;

    /// Unpaginated preview of what an export would contain (server-bounded)
    async fn export_preview(&self, filter: &SearchFilter) -> ClientResult<Vec<Order>>;

    /// Single-order invoice document
    async fn export_invoice(&self, id: i64) -> ClientResult<ExportPayload>;

    /// Invoice documents for every order matching `filter`
    async fn export_invoices_batch(&self, filter: &SearchFilter) -> ClientResult<ExportPayload>;

    /// Spreadsheet of every order matching `filter`
    async fn export_spreadsheet(&self, filter: &SearchFilter) -> ClientResult<ExportPayload>;
}

//! `OrderApi` over an HTTP transport

use async_trait::async_trait;
use shared::{Order, OrderCreate, OrderStatistics, OrderStatus, Page, PageRequest, SearchFilter};
use urlencoding::encode;

use super::export::{ExportKind, ExportPayload};
use super::OrderApi;
use crate::client::{HttpClient, NetworkHttpClient};
use crate::{ClientConfig, ClientResult};

/// Order service client
///
/// Stateless: every method is one request through `H`.
#[derive(Debug, Clone)]
pub struct RemoteOrderApi<H: HttpClient = NetworkHttpClient> {
    http: H,
}

impl RemoteOrderApi<NetworkHttpClient> {
    /// Network client for the configured base URL
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(NetworkHttpClient::new(config)?))
    }
}

impl<H: HttpClient> RemoteOrderApi<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    async fn get_page(&self, path: &str, mut query: Vec<(&'static str, String)>, page: PageRequest) -> ClientResult<Page<Order>> {
        query.extend(page.query_pairs());
        self.http.get(path, &query).await
    }

    async fn export(&self, kind: ExportKind, path: &str, filter: &SearchFilter) -> ClientResult<ExportPayload> {
        let response = self.http.get_bytes(path, &filter.query_pairs()).await?;
        let payload = ExportPayload::from_response(kind, response);
        tracing::debug!(path, bytes = payload.len(), filename = %payload.filename, "export received");
        Ok(payload)
    }
}

#[async_trait]
impl<H: HttpClient> OrderApi for RemoteOrderApi<H> {
    async fn list(&self, page: PageRequest) -> ClientResult<Page<Order>> {
        self.get_page("/orders", Vec::new(), page).await
    }

    async fn search(&self, filter: &SearchFilter, page: PageRequest) -> ClientResult<Page<Order>> {
        self.get_page("/orders/search", filter.query_pairs(), page).await
    }

    async fn get_by_id(&self, id: i64) -> ClientResult<Order> {
        self.http.get(&format!("/orders/{}", id), &[]).await
    }

    async fn get_by_number(&self, order_number: &str) -> ClientResult<Order> {
        self.http
            .get(&format!("/orders/number/{}", encode(order_number)), &[])
            .await
    }

    async fn list_by_customer(&self, customer_name: &str, page: PageRequest) -> ClientResult<Page<Order>> {
        let query = vec![("customerName", customer_name.to_string())];
        self.get_page("/orders/customer", query, page).await
    }

    async fn list_by_status(&self, status: OrderStatus, page: PageRequest) -> ClientResult<Page<Order>> {
        self.get_page(&format!("/orders/status/{}", status.as_str()), Vec::new(), page)
            .await
    }

    async fn list_recent(&self, page: PageRequest) -> ClientResult<Page<Order>> {
        self.get_page("/orders/recent", Vec::new(), page).await
    }

    async fn statistics(&self) -> ClientResult<OrderStatistics> {
        self.http.get("/orders/statistics", &[]).await
    }

    async fn create(&self, order: &OrderCreate) -> ClientResult<Order> {
        self.http.post("/orders", order).await
    }

    async fn update(&self, id: i64, order: &Order) -> ClientResult<Order> {
        self.http.put(&format!("/orders/{}", id), order).await
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("/orders/{}", id)).await
    }

    async fn export_preview(&self, filter: &SearchFilter) -> ClientResult<Vec<Order>> {
        self.http.get("/export/preview", &filter.query_pairs()).await
    }

    async fn export_invoice(&self, id: i64) -> ClientResult<ExportPayload> {
        let path = format!("/export/invoice/pdf/{}", id);
        let response = self.http.get_bytes(&path, &[]).await?;
        Ok(ExportPayload::from_response(ExportKind::Invoice { order_id: id }, response))
    }

    async fn export_invoices_batch(&self, filter: &SearchFilter) -> ClientResult<ExportPayload> {
        self.export(ExportKind::InvoiceBatch, "/export/invoice/pdf/batch", filter)
            .await
    }

    async fn export_spreadsheet(&self, filter: &SearchFilter) -> ClientResult<ExportPayload> {
        self.export(ExportKind::Spreadsheet, "/export/excel", filter).await
    }
}

// ticket-client/tests/support/mod.rs
// Scripted order service and in-memory sink shared by the store tests

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Notify;

use ticket_client::shared::{
    Decimal, Order, OrderCreate, OrderStatistics, OrderStatus, Page, PageRequest, SearchFilter,
};
use ticket_client::{ClientError, ClientResult, DownloadSink, ExportPayload, OrderApi};

/// One received call, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(PageRequest),
    Search(SearchFilter, PageRequest),
    GetById(i64),
    GetByNumber(String),
    ListByCustomer(String, PageRequest),
    ListByStatus(OrderStatus, PageRequest),
    ListRecent(PageRequest),
    Statistics,
    Create(String),
    Update(i64),
    Delete(i64),
    ExportPreview(SearchFilter),
    ExportInvoice(i64),
    ExportInvoicesBatch(SearchFilter),
    ExportSpreadsheet(SearchFilter),
}

pub fn order(id: i64, status: OrderStatus) -> Order {
    Order {
        id: Some(id),
        order_number: format!("ORD-{:04}", id),
        customer_name: if id % 2 == 0 { "Alice".into() } else { "Bob".into() },
        customer_email: None,
        customer_phone: None,
        total_amount: Decimal::new(1000 + id, 2),
        status,
        order_date: NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .unwrap(),
        description: None,
        product_details: None,
        created_at: None,
        updated_at: None,
    }
}

/// `count` orders with ids 1..=count; every third one is CONFIRMED
pub fn seed(count: i64) -> Vec<Order> {
    (1..=count)
        .map(|id| {
            let status = if id % 3 == 0 {
                OrderStatus::Confirmed
            } else {
                OrderStatus::Pending
            };
            order(id, status)
        })
        .collect()
}

fn matches(order: &Order, filter: &SearchFilter) -> bool {
    fn field(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|v| !v.is_empty())
    }

    field(&filter.order_number).is_none_or(|n| order.order_number == n)
        && field(&filter.customer_name).is_none_or(|n| order.customer_name.contains(n))
        && field(&filter.status).is_none_or(|s| order.status.as_str() == s)
}

fn paginate(orders: Vec<Order>, request: PageRequest) -> Page<Order> {
    let total = orders.len() as u64;
    let content = orders
        .into_iter()
        .skip((request.page * request.size) as usize)
        .take(request.size as usize)
        .collect();
    Page::new(content, request, total)
}

/// In-memory order service
///
/// Operations named in `fail` answer with a server error. A held gate
/// blocks the matching request until it is released.
#[derive(Default)]
pub struct FakeOrderApi {
    orders: Mutex<Vec<Order>>,
    calls: Mutex<Vec<Call>>,
    failing: Mutex<HashSet<&'static str>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    export_bytes: Mutex<Vec<u8>>,
    next_id: Mutex<i64>,
}

impl FakeOrderApi {
    pub fn with_orders(orders: Vec<Order>) -> Self {
        let next_id = orders.iter().filter_map(|o| o.id).max().unwrap_or(0) + 1;
        Self {
            orders: Mutex::new(orders),
            export_bytes: Mutex::new(b"PK\x03\x04".to_vec()),
            next_id: Mutex::new(next_id),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    pub fn recover(&self, operation: &'static str) {
        self.failing.lock().unwrap().remove(operation);
    }

    pub fn set_export_bytes(&self, bytes: &[u8]) {
        *self.export_bytes.lock().unwrap() = bytes.to_vec();
    }

    /// Block requests for `key` ("page:N" or "order:ID") until released
    pub fn hold(&self, key: &str) {
        self.gates
            .lock()
            .unwrap()
            .insert(key.to_string(), Arc::new(Notify::new()));
    }

    pub fn release(&self, key: &str) {
        if let Some(gate) = self.gates.lock().unwrap().remove(key) {
            gate.notify_one();
        }
    }

    async fn enter(&self, call: Call, operation: &'static str, gate: Option<String>) -> ClientResult<()> {
        self.calls.lock().unwrap().push(call);

        let gate = gate.and_then(|key| self.gates.lock().unwrap().get(&key).cloned());
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.failing.lock().unwrap().contains(operation) {
            return Err(ClientError::Server {
                status: 500,
                message: format!("{} unavailable", operation),
            });
        }
        Ok(())
    }

    fn filtered(&self, filter: &SearchFilter) -> Vec<Order> {
        self.orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| matches(o, filter))
            .cloned()
            .collect()
    }

    fn export_payload(&self, filename: &str) -> ExportPayload {
        ExportPayload {
            bytes: self.export_bytes.lock().unwrap().clone(),
            filename: filename.to_string(),
            content_type: None,
        }
    }
}

#[async_trait]
impl OrderApi for FakeOrderApi {
    async fn list(&self, page: PageRequest) -> ClientResult<Page<Order>> {
        self.enter(Call::List(page), "list", Some(format!("page:{}", page.page)))
            .await?;
        Ok(paginate(self.orders.lock().unwrap().clone(), page))
    }

    async fn search(&self, filter: &SearchFilter, page: PageRequest) -> ClientResult<Page<Order>> {
        self.enter(
            Call::Search(filter.clone(), page),
            "search",
            Some(format!("page:{}", page.page)),
        )
        .await?;
        Ok(paginate(self.filtered(filter), page))
    }

    async fn get_by_id(&self, id: i64) -> ClientResult<Order> {
        self.enter(Call::GetById(id), "get_by_id", Some(format!("order:{}", id)))
            .await?;
        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == Some(id))
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("Order not found with id: {}", id)))
    }

    async fn get_by_number(&self, order_number: &str) -> ClientResult<Order> {
        self.enter(Call::GetByNumber(order_number.to_string()), "get_by_number", None)
            .await?;
        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.order_number == order_number)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("Order not found: {}", order_number)))
    }

    async fn list_by_customer(&self, customer_name: &str, page: PageRequest) -> ClientResult<Page<Order>> {
        self.enter(
            Call::ListByCustomer(customer_name.to_string(), page),
            "list_by_customer",
            None,
        )
        .await?;
        let filter = SearchFilter::default().with_customer_name(customer_name);
        Ok(paginate(self.filtered(&filter), page))
    }

    async fn list_by_status(&self, status: OrderStatus, page: PageRequest) -> ClientResult<Page<Order>> {
        self.enter(Call::ListByStatus(status, page), "list_by_status", None)
            .await?;
        let filter = SearchFilter::default().with_status(status);
        Ok(paginate(self.filtered(&filter), page))
    }

    async fn list_recent(&self, page: PageRequest) -> ClientResult<Page<Order>> {
        self.enter(Call::ListRecent(page), "list_recent", None).await?;
        let mut orders = self.orders.lock().unwrap().clone();
        orders.reverse();
        Ok(paginate(orders, page))
    }

    async fn statistics(&self) -> ClientResult<OrderStatistics> {
        self.enter(Call::Statistics, "statistics", None).await?;
        let orders = self.orders.lock().unwrap();
        let count = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count() as u64;
        Ok(OrderStatistics {
            total_orders: orders.len() as u64,
            pending_orders: count(OrderStatus::Pending),
            processing_orders: count(OrderStatus::Processing),
            delivered_orders: count(OrderStatus::Delivered),
            cancelled_orders: count(OrderStatus::Cancelled),
        })
    }

    async fn create(&self, order: &OrderCreate) -> ClientResult<Order> {
        self.enter(Call::Create(order.order_number.clone()), "create", None)
            .await?;
        let id = {
            let mut next_id = self.next_id.lock().unwrap();
            let id = *next_id;
            *next_id += 1;
            id
        };
        let created = Order {
            id: Some(id),
            order_number: order.order_number.clone(),
            customer_name: order.customer_name.clone(),
            customer_email: order.customer_email.clone(),
            customer_phone: order.customer_phone.clone(),
            total_amount: order.total_amount,
            status: order.status,
            order_date: order.order_date,
            description: order.description.clone(),
            product_details: order.product_details.clone(),
            created_at: Some(order.order_date),
            updated_at: Some(order.order_date),
        };
        self.orders.lock().unwrap().insert(0, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, order: &Order) -> ClientResult<Order> {
        self.enter(Call::Update(id), "update", None).await?;
        let mut orders = self.orders.lock().unwrap();
        let slot = orders
            .iter_mut()
            .find(|o| o.id == Some(id))
            .ok_or_else(|| ClientError::NotFound(format!("Order not found with id: {}", id)))?;
        *slot = Order {
            id: Some(id),
            ..order.clone()
        };
        Ok(slot.clone())
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        self.enter(Call::Delete(id), "delete", None).await?;
        let mut orders = self.orders.lock().unwrap();
        let before = orders.len();
        orders.retain(|o| o.id != Some(id));
        if orders.len() == before {
            return Err(ClientError::NotFound(format!("Order not found with id: {}", id)));
        }
        Ok(())
    }

    async fn export_preview(&self, filter: &SearchFilter) -> ClientResult<Vec<Order>> {
        self.enter(Call::ExportPreview(filter.clone()), "export_preview", None)
            .await?;
        Ok(self.filtered(filter).into_iter().take(10).collect())
    }

    async fn export_invoice(&self, id: i64) -> ClientResult<ExportPayload> {
        self.enter(Call::ExportInvoice(id), "export_invoice", None).await?;
        Ok(self.export_payload(&format!("invoice_{}.pdf", id)))
    }

    async fn export_invoices_batch(&self, filter: &SearchFilter) -> ClientResult<ExportPayload> {
        self.enter(
            Call::ExportInvoicesBatch(filter.clone()),
            "export_invoices_batch",
            None,
        )
        .await?;
        Ok(self.export_payload("batch_invoices.pdf"))
    }

    async fn export_spreadsheet(&self, filter: &SearchFilter) -> ClientResult<ExportPayload> {
        self.enter(
            Call::ExportSpreadsheet(filter.clone()),
            "export_spreadsheet",
            None,
        )
        .await?;
        Ok(self.export_payload("orders_export.xlsx"))
    }
}

/// Collects saved payloads; can be told to fail
#[derive(Clone, Default)]
pub struct MemorySink {
    saved: Arc<Mutex<Vec<ExportPayload>>>,
    broken: Arc<Mutex<bool>>,
}

impl MemorySink {
    pub fn saved(&self) -> Vec<ExportPayload> {
        self.saved.lock().unwrap().clone()
    }

    pub fn break_disk(&self) {
        *self.broken.lock().unwrap() = true;
    }
}

#[async_trait]
impl DownloadSink for MemorySink {
    async fn save(&self, payload: &ExportPayload) -> ClientResult<()> {
        if *self.broken.lock().unwrap() {
            return Err(ClientError::Io(std::io::Error::other("disk full")));
        }
        self.saved.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

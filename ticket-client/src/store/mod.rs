//! Order session store
//!
//! [`OrderStore`] owns the UI state of one order-management session and
//! pairs every [`OrderApi`] call with a deterministic state transition:
//!
//! 1. mark loading, clear the previous error, take a ticket
//! 2. call the order service (no lock is held while waiting)
//! 3. on success apply the result; mutations also refresh the list
//! 4. on failure record the operation's message, leave data untouched
//! 5. settle the ticket; loading ends once nothing is in flight
//!
//! Results of list, detail and statistics requests are applied only if no
//! newer request of the same family was started meanwhile, so a slow
//! response never overwrites a newer one.
//!
//! Page and page-size changes re-issue a search while the active filter
//! constrains anything, and a plain list otherwise. The choice is made
//! anew on every call.

mod ledger;
pub mod messages;
mod state;

pub use ledger::OperationFamily;
pub use state::SessionState;

use std::sync::Arc;

use shared::{Order, OrderCreate, OrderStatistics, PageRequest, SearchFilter};
use tokio::sync::RwLock;

use crate::api::{ExportPayload, OrderApi};
use crate::download::DownloadSink;
use crate::{ClientError, ClientResult};
use ledger::{RequestLedger, Ticket};

struct Inner {
    state: SessionState,
    ledger: RequestLedger,
}

/// Failure cause plus the message shown to the user
type Failure = (&'static str, ClientError);

/// State container for one order-management session
pub struct OrderStore<A: OrderApi> {
    api: A,
    sink: Arc<dyn DownloadSink>,
    inner: RwLock<Inner>,
}

impl<A: OrderApi> OrderStore<A> {
    pub fn new(api: A, sink: impl DownloadSink + 'static) -> Self {
        Self::with_sink(api, Arc::new(sink))
    }

    pub fn with_sink(api: A, sink: Arc<dyn DownloadSink>) -> Self {
        Self {
            api,
            sink,
            inner: RwLock::new(Inner {
                state: SessionState::default(),
                ledger: RequestLedger::default(),
            }),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> SessionState {
        self.inner.read().await.state.clone()
    }

    pub async fn active_filter(&self) -> SearchFilter {
        self.inner.read().await.state.active_filter.clone()
    }

    /// Whether a request of `family` is still pending
    pub async fn is_in_flight(&self, family: OperationFamily) -> bool {
        self.inner.read().await.ledger.in_flight(family) > 0
    }

    // ========== Local state ==========

    /// Merge `patch` into the active filter; does not fetch
    pub async fn update_search_params(&self, patch: SearchFilter) {
        self.inner.write().await.state.merge_filter(patch);
    }

    /// Reset every filter field to an empty string; does not fetch
    pub async fn clear_search_params(&self) {
        self.inner.write().await.state.reset_filter();
    }

    pub async fn set_current_order(&self, order: Option<Order>) {
        self.inner.write().await.state.current_order = order;
    }

    pub async fn clear_error(&self) {
        self.inner.write().await.state.error = None;
    }

    // ========== Lists ==========

    /// Plain list at `request`
    pub async fn fetch_orders(&self, request: PageRequest) -> bool {
        let ticket = self.begin(OperationFamily::List).await;
        let result = self.api.list(request).await;
        self.settle(ticket, result, messages::FETCH_ORDERS_FAILED, |state, page| {
            state.apply_page(page)
        })
        .await
        .is_some()
    }

    /// Search with the active filter at the current page and size
    pub async fn search_orders(&self) -> bool {
        let (filter, request) = {
            let inner = self.inner.read().await;
            (inner.state.active_filter.clone(), inner.state.page_request())
        };
        self.search_at(filter, request, false).await
    }

    /// Search with explicit parameters; on success `filter` becomes the
    /// active filter together with the returned page, unless the filter was
    /// edited locally while the request was in flight.
    pub async fn search_orders_with(&self, filter: SearchFilter, request: PageRequest) -> bool {
        self.search_at(filter, request, true).await
    }

    /// Move to `page`, keeping the current page size
    pub async fn change_page(&self, page: u32) -> bool {
        let (filter, size) = {
            let inner = self.inner.read().await;
            (inner.state.active_filter.clone(), inner.state.page_size)
        };
        self.load(filter, PageRequest::new(page, size)).await
    }

    /// Switch page size; always restarts from the first page
    pub async fn change_page_size(&self, size: u32) -> bool {
        let filter = self.active_filter().await;
        self.load(filter, PageRequest::first(size)).await
    }

    /// Reload the current page
    pub async fn refresh(&self) -> bool {
        let (filter, request) = {
            let inner = self.inner.read().await;
            (inner.state.active_filter.clone(), inner.state.page_request())
        };
        self.load(filter, request).await
    }

    async fn load(&self, filter: SearchFilter, request: PageRequest) -> bool {
        if filter.is_active() {
            self.search_at(filter, request, false).await
        } else {
            self.fetch_orders(request).await
        }
    }

    async fn search_at(&self, filter: SearchFilter, request: PageRequest, adopt_filter: bool) -> bool {
        let (ticket, revision) = self.start(OperationFamily::List).await;
        let result = self.api.search(&filter, request).await;
        self.settle(ticket, result, messages::SEARCH_ORDERS_FAILED, move |state, page| {
            state.apply_page(page);
            if !adopt_filter {
                return;
            }
            if state.filter_revision() == revision {
                state.active_filter = filter;
            } else {
                tracing::debug!(seq = ticket.seq, "filter edited during search, keeping local edits");
            }
        })
        .await
        .is_some()
    }

    // ========== Details ==========

    pub async fn fetch_order_by_id(&self, id: i64) -> Option<Order> {
        let ticket = self.begin(OperationFamily::Detail).await;
        let result = self.api.get_by_id(id).await;
        self.settle(ticket, result, messages::FETCH_ORDER_FAILED, |state, order| {
            state.current_order = Some(order.clone())
        })
        .await
    }

    pub async fn fetch_order_by_number(&self, order_number: &str) -> Option<Order> {
        let ticket = self.begin(OperationFamily::Detail).await;
        let result = self.api.get_by_number(order_number).await;
        self.settle(ticket, result, messages::ORDER_NOT_FOUND, |state, order| {
            state.current_order = Some(order.clone())
        })
        .await
    }

    pub async fn fetch_statistics(&self) -> Option<OrderStatistics> {
        let ticket = self.begin(OperationFamily::Statistics).await;
        let result = self.api.statistics().await;
        self.settle(ticket, result, messages::FETCH_STATISTICS_FAILED, |state, stats| {
            state.statistics = Some(*stats)
        })
        .await
    }

    // ========== Mutations ==========

    pub async fn create_order(&self, order: &OrderCreate) -> Option<Order> {
        let ticket = self.begin(OperationFamily::Mutate).await;
        let result = self.api.create(order).await;
        if let Ok(created) = &result {
            tracing::info!(id = ?created.id, order_number = %created.order_number, "order created");
        }
        self.finish_mutation(ticket, result, messages::CREATE_ORDER_FAILED)
            .await
    }

    pub async fn update_order(&self, id: i64, order: &Order) -> Option<Order> {
        let ticket = self.begin(OperationFamily::Mutate).await;
        let result = self.api.update(id, order).await;
        if result.is_ok() {
            tracing::info!(id, "order updated");
        }
        self.finish_mutation(ticket, result, messages::UPDATE_ORDER_FAILED)
            .await
    }

    pub async fn delete_order(&self, id: i64) -> bool {
        let ticket = self.begin(OperationFamily::Mutate).await;
        let result = self.api.delete(id).await;
        if result.is_ok() {
            tracing::info!(id, "order deleted");
        }
        self.finish_mutation(ticket, result, messages::DELETE_ORDER_FAILED)
            .await
            .is_some()
    }

    /// The service is the source of truth: a successful mutation reloads
    /// the visible list before the mutation settles.
    async fn finish_mutation<T>(&self, ticket: Ticket, result: ClientResult<T>, failure: &'static str) -> Option<T> {
        if result.is_ok() {
            self.refresh().await;
        }
        self.settle(ticket, result, failure, |_, _| {}).await
    }

    // ========== Exports ==========

    /// Orders an export with `filter` would contain
    pub async fn export_preview(&self, filter: &SearchFilter) -> Option<Vec<Order>> {
        let ticket = self.begin(OperationFamily::Export).await;
        let result = self.api.export_preview(filter).await;
        self.settle(ticket, result, messages::EXPORT_PREVIEW_FAILED, |_, _| {})
            .await
    }

    pub async fn export_invoice(&self, id: i64) -> bool {
        let ticket = self.begin(OperationFamily::Export).await;
        let result = self.api.export_invoice(id).await;
        self.deliver(ticket, result, messages::EXPORT_INVOICE_FAILED).await
    }

    pub async fn export_invoices_batch(&self, filter: &SearchFilter) -> bool {
        let ticket = self.begin(OperationFamily::Export).await;
        let result = self.api.export_invoices_batch(filter).await;
        self.deliver(ticket, result, messages::EXPORT_INVOICES_FAILED).await
    }

    pub async fn export_spreadsheet(&self, filter: &SearchFilter) -> bool {
        let ticket = self.begin(OperationFamily::Export).await;
        let result = self.api.export_spreadsheet(filter).await;
        self.deliver(ticket, result, messages::EXPORT_ORDERS_FAILED).await
    }

    /// Hand a fetched export to the sink
    async fn deliver(&self, ticket: Ticket, result: ClientResult<ExportPayload>, failure: &'static str) -> bool {
        let outcome = match result {
            Err(err) => Err((failure, err)),
            Ok(payload) if payload.is_empty() => Err((
                messages::NOTHING_TO_EXPORT,
                ClientError::NotFound("export matched no orders".into()),
            )),
            Ok(payload) => match self.sink.save(&payload).await {
                Ok(()) => {
                    tracing::info!(filename = %payload.filename, bytes = payload.len(), "export delivered");
                    Ok(())
                }
                Err(err) => Err((messages::SAVE_EXPORT_FAILED, err)),
            },
        };
        self.settle_outcome(ticket, outcome, |_, _| {}).await.is_some()
    }

    // ========== Operation lifecycle ==========

    async fn begin(&self, family: OperationFamily) -> Ticket {
        self.start(family).await.0
    }

    /// Issue a ticket; also returns the filter revision it was issued under
    async fn start(&self, family: OperationFamily) -> (Ticket, u64) {
        let mut inner = self.inner.write().await;
        let ticket = inner.ledger.issue(family);
        inner.state.loading = true;
        inner.state.error = None;
        tracing::debug!(?family, seq = ticket.seq, "operation started");
        (ticket, inner.state.filter_revision())
    }

    async fn settle<T>(
        &self,
        ticket: Ticket,
        result: ClientResult<T>,
        failure: &'static str,
        apply: impl FnOnce(&mut SessionState, &T),
    ) -> Option<T> {
        self.settle_outcome(ticket, result.map_err(|err| (failure, err)), apply)
            .await
    }

    async fn settle_outcome<T>(
        &self,
        ticket: Ticket,
        outcome: Result<T, Failure>,
        apply: impl FnOnce(&mut SessionState, &T),
    ) -> Option<T> {
        let mut inner = self.inner.write().await;
        let current = inner.ledger.settle(ticket);
        if !current {
            tracing::debug!(family = ?ticket.family, seq = ticket.seq, "discarding stale result");
        }

        let value = match outcome {
            Ok(value) => {
                if current {
                    apply(&mut inner.state, &value);
                }
                Some(value)
            }
            Err((message, err)) => {
                tracing::warn!(family = ?ticket.family, error = %err, "{}", message);
                if current {
                    inner.state.error = Some(message.to_string());
                }
                None
            }
        };

        inner.state.loading = !inner.ledger.is_idle();
        value
    }
}

impl<A: OrderApi> std::fmt::Debug for OrderStore<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderStore").finish_non_exhaustive()
    }
}

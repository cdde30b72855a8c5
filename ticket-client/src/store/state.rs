//! Session state

use shared::{DEFAULT_PAGE_SIZE, Order, OrderStatistics, Page, PageRequest, SearchFilter};

/// UI-facing view of one order session
///
/// Obtained as a snapshot from [`OrderStore::snapshot`](super::OrderStore::snapshot);
/// editing a snapshot does not affect the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Content of the last applied page
    pub orders: Vec<Order>,
    pub current_order: Option<Order>,
    pub statistics: Option<OrderStatistics>,
    /// True while any request of any family is pending; one family
    /// settling does not clear it while another is still in flight
    pub loading: bool,
    /// Message of the last failed operation, cleared when the next one starts
    pub error: Option<String>,
    /// `number` of the last applied page
    pub current_page: u32,
    /// `size` of the last applied page
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub active_filter: SearchFilter,
    /// Bumped by every local filter edit
    filter_revision: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            orders: Vec::new(),
            current_order: None,
            statistics: None,
            loading: false,
            error: None,
            current_page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            total_elements: 0,
            total_pages: 0,
            active_filter: SearchFilter::cleared(),
            filter_revision: 0,
        }
    }
}

impl SessionState {
    /// Replace list content and pagination metadata from one page
    pub(crate) fn apply_page(&mut self, page: &Page<Order>) {
        self.orders = page.content.clone();
        self.total_elements = page.total_elements;
        self.total_pages = page.total_pages;
        self.current_page = page.number;
        self.page_size = page.size;
    }

    pub(crate) fn filter_revision(&self) -> u64 {
        self.filter_revision
    }

    pub(crate) fn merge_filter(&mut self, patch: SearchFilter) {
        self.active_filter.merge(patch);
        self.filter_revision += 1;
    }

    pub(crate) fn reset_filter(&mut self) {
        self.active_filter = SearchFilter::cleared();
        self.filter_revision += 1;
    }

    /// Position the next refresh re-requests
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.current_page, self.page_size)
    }

    pub fn has_orders(&self) -> bool {
        !self.orders.is_empty()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn filter_active(&self) -> bool {
        self.active_filter.is_active()
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page.saturating_add(1) < self.total_pages
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 0
    }
}

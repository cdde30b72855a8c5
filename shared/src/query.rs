//! Query types
//!
//! Search filters, page requests and the pagination envelope returned by
//! list-shaped endpoints.

use serde::{Deserialize, Serialize};

use crate::models::OrderStatus;

/// Page size used until the first page is applied
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// The five filterable order fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    OrderNumber,
    CustomerName,
    Status,
    StartDate,
    EndDate,
}

impl SearchField {
    pub const ALL: [SearchField; 5] = [
        SearchField::OrderNumber,
        SearchField::CustomerName,
        SearchField::Status,
        SearchField::StartDate,
        SearchField::EndDate,
    ];

    /// Query parameter name on the wire
    pub fn param_name(&self) -> &'static str {
        match self {
            SearchField::OrderNumber => "orderNumber",
            SearchField::CustomerName => "customerName",
            SearchField::Status => "status",
            SearchField::StartDate => "startDate",
            SearchField::EndDate => "endDate",
        }
    }
}

/// Sparse search filter over orders
///
/// `None` and `Some("")` both mean "no constraint". Values are passed to
/// the server verbatim; the server decides how to treat empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl SearchFilter {
    /// Filter with every field present and empty
    pub fn cleared() -> Self {
        Self {
            order_number: Some(String::new()),
            customer_name: Some(String::new()),
            status: Some(String::new()),
            start_date: Some(String::new()),
            end_date: Some(String::new()),
        }
    }

    pub fn get(&self, field: SearchField) -> Option<&str> {
        match field {
            SearchField::OrderNumber => self.order_number.as_deref(),
            SearchField::CustomerName => self.customer_name.as_deref(),
            SearchField::Status => self.status.as_deref(),
            SearchField::StartDate => self.start_date.as_deref(),
            SearchField::EndDate => self.end_date.as_deref(),
        }
    }

    pub fn set(&mut self, field: SearchField, value: Option<String>) {
        let slot = match field {
            SearchField::OrderNumber => &mut self.order_number,
            SearchField::CustomerName => &mut self.customer_name,
            SearchField::Status => &mut self.status,
            SearchField::StartDate => &mut self.start_date,
            SearchField::EndDate => &mut self.end_date,
        };
        *slot = value;
    }

    /// Whether any field constrains the result set
    pub fn is_active(&self) -> bool {
        SearchField::ALL
            .iter()
            .any(|field| self.get(*field).is_some_and(|value| !value.is_empty()))
    }

    /// Shallow merge: present fields of `patch` overwrite, absent ones keep
    /// the current value.
    pub fn merge(&mut self, patch: SearchFilter) {
        let SearchFilter {
            order_number,
            customer_name,
            status,
            start_date,
            end_date,
        } = patch;

        for (field, value) in [
            (SearchField::OrderNumber, order_number),
            (SearchField::CustomerName, customer_name),
            (SearchField::Status, status),
            (SearchField::StartDate, start_date),
            (SearchField::EndDate, end_date),
        ] {
            if value.is_some() {
                self.set(field, value);
            }
        }
    }

    /// Present fields as query parameters, empty strings included
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        SearchField::ALL
            .iter()
            .filter_map(|field| {
                self.get(*field)
                    .map(|value| (field.param_name(), value.to_string()))
            })
            .collect()
    }

    pub fn with_order_number(mut self, order_number: impl Into<String>) -> Self {
        self.order_number = Some(order_number.into());
        self
    }

    pub fn with_customer_name(mut self, customer_name: impl Into<String>) -> Self {
        self.customer_name = Some(customer_name.into());
        self
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status.as_str().to_string());
        self
    }

    /// Lower bound on order date, ISO-8601 date-time
    pub fn with_start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    /// Upper bound on order date, ISO-8601 date-time
    pub fn with_end_date(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }
}

/// Zero-based page index plus page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    /// `size` is clamped to at least 1; bounds beyond that belong to the server.
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.max(1),
        }
    }

    pub fn first(size: u32) -> Self {
        Self::new(0, size)
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![("page", self.page.to_string()), ("size", self.size.to_string())]
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// Pagination envelope
///
/// Extra keys the server adds (`pageable`, `sort`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub size: u32,
    /// Zero-based page index
    pub number: u32,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub empty: bool,
}

impl<T> Page<T> {
    /// Build an envelope for `content` at the given position
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let size = request.size.max(1);
        let total_pages = u32::try_from(total_elements.div_ceil(u64::from(size))).unwrap_or(u32::MAX);
        let empty = content.is_empty();

        Self {
            content,
            total_elements,
            total_pages,
            size,
            number: request.page,
            first: request.page == 0,
            last: request.page.saturating_add(1) >= total_pages,
            empty,
        }
    }

    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.number, self.size)
    }
}

//! Export payloads
//!
//! Export bodies are opaque bytes. Only the suggested filename is derived
//! here, from `Content-Disposition` or a per-kind fallback.

use chrono::{Local, NaiveDateTime};

use crate::client::BinaryResponse;

/// Which export endpoint produced a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Invoice { order_id: i64 },
    InvoiceBatch,
    Spreadsheet,
}

impl ExportKind {
    /// Name used when the server does not suggest one
    pub fn fallback_filename(&self, at: NaiveDateTime) -> String {
        let stamp = at.format("%Y%m%d_%H%M%S");
        match self {
            ExportKind::Invoice { order_id } => format!("invoice_{}.pdf", order_id),
            ExportKind::InvoiceBatch => format!("batch_invoices_{}.pdf", stamp),
            ExportKind::Spreadsheet => format!("orders_export_{}.xlsx", stamp),
        }
    }
}

/// Binary export plus its suggested filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: Option<String>,
}

impl ExportPayload {
    pub(crate) fn from_response(kind: ExportKind, response: BinaryResponse) -> Self {
        let filename = response
            .content_disposition
            .as_deref()
            .and_then(disposition_filename)
            .unwrap_or_else(|| kind.fallback_filename(Local::now().naive_local()));

        Self {
            bytes: response.bytes,
            filename,
            content_type: response.content_type,
        }
    }

    /// True when the server had nothing to export (204 No Content)
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

/// Extract `filename` from a Content-Disposition value
///
/// Handles quoted and bare values; `filename*` (RFC 5987) is not decoded.
fn disposition_filename(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| {
            let (key, value) = part.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("filename")
                .then(|| value.trim().trim_matches('"').to_string())
        })
        .filter(|name| !name.is_empty())
}

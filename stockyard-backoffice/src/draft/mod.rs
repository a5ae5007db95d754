//! Order drafting - local persistence of in-progress orders
//!
//! A draft is the not-yet-submitted state of an order being composed:
//! header fields, the selected counterparty and the line items. Drafts are
//! mirrored to the local [`store::DraftStore`] after each debounced quiet
//! period so a restart does not lose work, and cleared when the order is
//! accepted by the backend.

pub mod controller;
pub mod debounce;
pub mod items;
pub mod store;

use items::LineItems;
use serde::{Deserialize, Serialize};
use shared::models::Supplier;
use thiserror::Error;

/// Draft-level errors (line-item validation, lifecycle misuse)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Item {0} is already in the order")]
    DuplicateItem(i64),

    #[error("{0}")]
    InvalidItem(String),

    /// Purchase drafts take a supplier, sales drafts a customer
    #[error("Counterparty does not match the order kind")]
    CounterpartyMismatch,

    #[error("Order has already been submitted")]
    AlreadySubmitted,
}

/// The party on the other side of the order
///
/// A supplier reference for purchase orders, a free-text customer name for
/// sales orders. Not owned by the draft - suppliers come from the picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Counterparty {
    Supplier(Supplier),
    Customer(String),
}

impl Counterparty {
    /// Display label for the form
    pub fn label(&self) -> &str {
        match self {
            Self::Supplier(s) => &s.name,
            Self::Customer(name) => name,
        }
    }

    pub fn supplier_id(&self) -> Option<i64> {
        match self {
            Self::Supplier(s) => Some(s.id),
            Self::Customer(_) => None,
        }
    }
}

/// Order header fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderHeader {
    /// RFC 3339 timestamp
    pub order_date: String,
    pub delivery_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OrderHeader {
    /// Fresh header with both dates defaulting to now
    pub fn seeded_now() -> Self {
        let now = shared::util::now_rfc3339();
        Self {
            order_date: now.clone(),
            delivery_date: now,
            notes: None,
        }
    }
}

/// The in-progress order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub header: OrderHeader,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<Counterparty>,
    pub items: LineItems,
}

impl OrderDraft {
    /// Fresh draft with seeded defaults
    pub fn seeded() -> Self {
        Self {
            header: OrderHeader::seeded_now(),
            counterparty: None,
            items: LineItems::default(),
        }
    }

    /// Canonical snapshot used for change detection
    ///
    /// Two drafts with equal snapshots are the same state; the controller
    /// compares snapshots to decide whether a store write is needed.
    pub fn snapshot(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

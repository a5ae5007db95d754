//! Purchase and sales order models
//!
//! Purchase order items reference a [`super::Product`]; sales order items
//! reference an [`super::Inventory`] record, since only stocked goods can be
//! sold. Both flavors share the same status lifecycle.

use serde::{Deserialize, Serialize};

/// Order status lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

/// Order flavor - selects the counterparty shape and the draft storage key
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OrderKind {
    Purchase,
    Sales,
}

impl OrderKind {
    /// Storage key for the locally persisted draft of this order kind
    pub fn storage_key(&self) -> &'static str {
        match self {
            Self::Purchase => "purchase_order_draft",
            Self::Sales => "sales_order_draft",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Sales => "sales",
        }
    }
}

impl std::fmt::Display for OrderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Purchase Orders
// ============================================================================

/// Purchase order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: i64,
    pub supplier_id: i64,
    /// RFC 3339 timestamp
    pub order_date: String,
    pub delivery_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_date: Option<String>,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    /// User who placed the order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordered_by: Option<i64>,
    /// User who booked the goods in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_by: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub items: Vec<PurchaseOrderItem>,
}

/// Purchase order line row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
}

/// Purchase order line input (no identity before submission)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderItemInput {
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
}

/// Create purchase order payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderCreate {
    pub supplier_id: i64,
    pub order_date: String,
    pub delivery_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub items: Vec<PurchaseOrderItemInput>,
}

// ============================================================================
// Sales Orders
// ============================================================================

/// Sales order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrder {
    pub id: i64,
    /// Customer name (free text, no customer registry)
    pub customer: String,
    pub order_date: String,
    pub delivery_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_date: Option<String>,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub items: Vec<SalesOrderItem>,
}

/// Sales order line row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrderItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub inventory_id: i64,
    pub quantity: i32,
    pub unit_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
}

/// Sales order line input (no identity before submission)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrderItemInput {
    pub inventory_id: i64,
    pub quantity: i32,
    pub unit_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
}

/// Create sales order payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrderCreate {
    pub customer: String,
    pub order_date: String,
    pub delivery_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub items: Vec<SalesOrderItemInput>,
}

// ============================================================================
// Generic order creation
// ============================================================================

/// Order creation payload, parametrized by order kind
///
/// The draft controller builds one of these from the current draft; the
/// order service routes it to the matching endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrderCreate {
    Purchase(PurchaseOrderCreate),
    Sales(SalesOrderCreate),
}

impl OrderCreate {
    pub fn kind(&self) -> OrderKind {
        match self {
            Self::Purchase(_) => OrderKind::Purchase,
            Self::Sales(_) => OrderKind::Sales,
        }
    }

    /// Number of line items in the payload
    pub fn item_count(&self) -> usize {
        match self {
            Self::Purchase(p) => p.items.len(),
            Self::Sales(s) => s.items.len(),
        }
    }
}

/// Status transition payload (mark received / completed / cancelled)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_by: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_format() {
        let json = serde_json::to_string(&OrderStatus::Pending).unwrap();
        assert_eq!(json, "\"PENDING\"");

        let status: OrderStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(status, OrderStatus::Cancelled);
    }

    #[test]
    fn test_storage_keys_do_not_collide() {
        assert_ne!(
            OrderKind::Purchase.storage_key(),
            OrderKind::Sales.storage_key()
        );
    }

    #[test]
    fn test_order_create_kind() {
        let create = OrderCreate::Sales(SalesOrderCreate {
            customer: "Acme".to_string(),
            order_date: "2026-02-01T10:00:00Z".to_string(),
            delivery_date: "2026-02-03T10:00:00Z".to_string(),
            notes: None,
            items: vec![SalesOrderItemInput {
                inventory_id: 7,
                quantity: 2,
                unit_price: 4.5,
                discount: None,
            }],
        });
        assert_eq!(create.kind(), OrderKind::Sales);
        assert_eq!(create.item_count(), 1);
    }
}

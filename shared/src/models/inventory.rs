//! Inventory Model

use serde::{Deserialize, Serialize};

/// Inventory record - stock on hand for one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub id: i64,
    /// Product reference
    pub product_id: i64,
    /// Display name snapshot (denormalized from the product)
    pub name: String,
    pub quantity: i32,
    /// Last movement timestamp (Unix millis)
    pub updated_at: i64,
}

/// Inventory movement, produced by received purchase orders and
/// completed sales orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryTransaction {
    pub id: i64,
    pub inventory_id: i64,
    /// Signed quantity change (positive = stock in, negative = stock out)
    pub change: i32,
    /// Source document reference, e.g. "purchase:42" or "sales:17"
    pub source: String,
    pub created_at: i64,
}

//! Picker collaborator traits
//!
//! Modal selection UIs live outside the core; the controller only sees a
//! value or a cancellation. Item pickers receive the references already in
//! the draft so chosen entries cannot collide with existing lines.

use crate::draft::Counterparty;
use crate::draft::items::LineItem;
use async_trait::async_trait;

/// Quantity a picked line starts with when the user leaves it untouched
pub const DEFAULT_QUANTITY: i32 = 1;

/// Unit price a picked line starts with when the user leaves it untouched
pub const DEFAULT_UNIT_PRICE: f64 = 10.0;

/// Counterparty chooser (supplier panel / customer field)
#[async_trait]
pub trait CounterpartyPicker: Send + Sync {
    /// Present the chooser; `None` means the user cancelled
    async fn pick(&self) -> Option<Counterparty>;
}

/// Line-item chooser (product / inventory modal)
#[async_trait]
pub trait LineItemPicker: Send + Sync {
    /// Present the chooser with `exclude` filtered out of the selection;
    /// `None` means the user cancelled
    async fn pick(&self, exclude: &[i64]) -> Option<LineItem>;
}

//! Line-item collection
//!
//! An ordered list of order lines with a derived total. Each line references
//! a product (purchase orders) or an inventory record (sales orders) by id;
//! one reference can appear at most once per draft.

use super::DraftError;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i32 = 9999;
/// Maximum allowed unit price
pub const MAX_UNIT_PRICE: f64 = 1_000_000.0;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// One order line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product id (purchase) or inventory id (sales)
    pub item_id: i64,
    /// Display name snapshot from the picker
    pub name: String,
    pub quantity: i32,
    pub unit_price: f64,
    /// Informational discount, tracked per line for reporting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
}

impl LineItem {
    pub fn new(item_id: i64, name: impl Into<String>, quantity: i32, unit_price: f64) -> Self {
        Self {
            item_id,
            name: name.into(),
            quantity,
            unit_price,
            discount: None,
        }
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = Some(discount);
        self
    }
}

/// Ordered line-item collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItems {
    items: Vec<LineItem>,
}

impl LineItems {
    /// Validate and append a line
    ///
    /// Rejects a reference that is already present - the picker also filters
    /// known references out of the selection, but the collection does not
    /// rely on that.
    pub fn add(&mut self, item: LineItem) -> Result<(), DraftError> {
        validate_line_item(&item)?;
        if self.contains(item.item_id) {
            return Err(DraftError::DuplicateItem(item.item_id));
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove a line by reference; returns whether it was present
    pub fn remove(&mut self, item_id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.item_id != item_id);
        self.items.len() != before
    }

    pub fn contains(&self, item_id: i64) -> bool {
        self.items.iter().any(|i| i.item_id == item_id)
    }

    /// References already in the collection, in insertion order
    pub fn ids(&self) -> Vec<i64> {
        self.items.iter().map(|i| i.item_id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Order total: sum of `quantity * unit_price` over all lines
    ///
    /// Per-line discounts do not participate; they are carried for
    /// display and reporting only.
    pub fn total(&self) -> f64 {
        let total: Decimal = self
            .items
            .iter()
            .map(|i| to_decimal(i.unit_price) * Decimal::from(i.quantity))
            .sum();
        to_f64(total)
    }
}

/// Convert f64 to Decimal for calculation
#[inline]
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Validate a line before it enters the collection
fn validate_line_item(item: &LineItem) -> Result<(), DraftError> {
    if !item.unit_price.is_finite() {
        return Err(DraftError::InvalidItem(format!(
            "unit price must be a finite number, got {}",
            item.unit_price
        )));
    }
    if item.unit_price < 0.0 {
        return Err(DraftError::InvalidItem(format!(
            "unit price must be non-negative, got {}",
            item.unit_price
        )));
    }
    if item.unit_price > MAX_UNIT_PRICE {
        return Err(DraftError::InvalidItem(format!(
            "unit price exceeds maximum allowed ({MAX_UNIT_PRICE}), got {}",
            item.unit_price
        )));
    }

    if item.quantity <= 0 {
        return Err(DraftError::InvalidItem(format!(
            "quantity must be positive, got {}",
            item.quantity
        )));
    }
    if item.quantity > MAX_QUANTITY {
        return Err(DraftError::InvalidItem(format!(
            "quantity exceeds maximum allowed ({MAX_QUANTITY}), got {}",
            item.quantity
        )));
    }

    if let Some(d) = item.discount {
        if !d.is_finite() || d < 0.0 {
            return Err(DraftError::InvalidItem(format!(
                "discount must be non-negative, got {d}"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total() {
        let mut items = LineItems::default();
        items.add(LineItem::new(1, "Hinge", 2, 10.0)).unwrap();
        items.add(LineItem::new(2, "Latch", 1, 5.0)).unwrap();

        assert_eq!(items.total(), 25.0);
    }

    #[test]
    fn test_total_ignores_discount() {
        let mut items = LineItems::default();
        items
            .add(LineItem::new(1, "Hinge", 2, 10.0).with_discount(3.0))
            .unwrap();

        assert_eq!(items.total(), 20.0);
    }

    #[test]
    fn test_total_precision() {
        // 0.1 + 0.2 style accumulation must not drift
        let mut items = LineItems::default();
        for id in 0..100 {
            items.add(LineItem::new(id, "Washer", 1, 0.01)).unwrap();
        }
        assert_eq!(items.total(), 1.0);
    }

    #[test]
    fn test_duplicate_reference_rejected() {
        let mut items = LineItems::default();
        items.add(LineItem::new(7, "Hinge", 1, 2.0)).unwrap();

        let err = items.add(LineItem::new(7, "Hinge", 3, 2.0)).unwrap_err();
        assert_eq!(err, DraftError::DuplicateItem(7));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_remove_by_reference() {
        let mut items = LineItems::default();
        items.add(LineItem::new(1, "Hinge", 1, 2.0)).unwrap();
        items.add(LineItem::new(2, "Latch", 1, 3.0)).unwrap();

        assert!(items.remove(1));
        assert!(!items.remove(1));
        assert_eq!(items.ids(), vec![2]);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut items = LineItems::default();
        items.add(LineItem::new(3, "c", 1, 1.0)).unwrap();
        items.add(LineItem::new(1, "a", 1, 1.0)).unwrap();
        items.add(LineItem::new(2, "b", 1, 1.0)).unwrap();

        assert_eq!(items.ids(), vec![3, 1, 2]);
    }

    #[test]
    fn test_invalid_lines_rejected() {
        let mut items = LineItems::default();

        assert!(items.add(LineItem::new(1, "x", 0, 1.0)).is_err());
        assert!(items.add(LineItem::new(1, "x", -2, 1.0)).is_err());
        assert!(items.add(LineItem::new(1, "x", 1, -1.0)).is_err());
        assert!(items.add(LineItem::new(1, "x", 1, f64::NAN)).is_err());
        assert!(
            items
                .add(LineItem::new(1, "x", 1, MAX_UNIT_PRICE + 1.0))
                .is_err()
        );
        assert!(
            items
                .add(LineItem::new(1, "x", MAX_QUANTITY + 1, 1.0))
                .is_err()
        );
        assert!(
            items
                .add(LineItem::new(1, "x", 1, 1.0).with_discount(-0.5))
                .is_err()
        );
        assert!(items.is_empty());
    }
}

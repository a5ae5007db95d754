//! Input validation helpers
//!
//! Client-side checks mirror what the backend enforces so most rejections
//! are caught before a request is made. Field names match the submitted
//! payload so messages land on the right form field.

use crate::draft::{Counterparty, OrderDraft};
use shared::error::FieldError;
use shared::models::OrderKind;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: supplier, category, product, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Customer names on sales orders
pub const MIN_CUSTOMER_LEN: usize = 2;

/// Notes and descriptions
pub const MAX_NOTE_LEN: usize = 500;

// ── Draft validation ────────────────────────────────────────────────

/// Validate a draft ahead of submission
///
/// Returns one entry per failing field; an empty vec means the draft is
/// submittable.
pub fn validate_order_draft(kind: OrderKind, draft: &OrderDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();

    match (kind, &draft.counterparty) {
        (OrderKind::Purchase, Some(Counterparty::Supplier(_))) => {}
        (OrderKind::Purchase, _) => {
            errors.push(FieldError::new("supplier_id", "Supplier must be selected."));
        }
        (OrderKind::Sales, Some(Counterparty::Customer(name)))
            if name.trim().len() >= MIN_CUSTOMER_LEN => {}
        (OrderKind::Sales, _) => {
            errors.push(FieldError::new(
                "customer",
                format!("Customer must be at least {MIN_CUSTOMER_LEN} characters."),
            ));
        }
    }

    if draft.header.order_date.trim().is_empty() {
        errors.push(FieldError::new("order_date", "Order date is required."));
    }
    if draft.header.delivery_date.trim().is_empty() {
        errors.push(FieldError::new("delivery_date", "Delivery date is required."));
    }
    if let Some(notes) = &draft.header.notes
        && notes.len() > MAX_NOTE_LEN
    {
        errors.push(FieldError::new(
            "notes",
            format!("Notes are too long ({} chars, max {MAX_NOTE_LEN}).", notes.len()),
        ));
    }

    if draft.items.is_empty() {
        errors.push(FieldError::new("items", "At least one item must be added."));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::items::LineItem;
    use shared::models::Supplier;

    fn supplier() -> Supplier {
        Supplier {
            id: 3,
            name: "Ironworks Ltd".to_string(),
            address: "1 Forge Way".to_string(),
            contact: None,
            phone: "555-0100".to_string(),
            email: None,
            is_active: true,
        }
    }

    fn valid_purchase_draft() -> OrderDraft {
        let mut draft = OrderDraft::seeded();
        draft.counterparty = Some(Counterparty::Supplier(supplier()));
        draft
            .items
            .add(LineItem::new(1, "Hinge", 2, 10.0))
            .unwrap();
        draft
    }

    #[test]
    fn test_valid_draft_passes() {
        let draft = valid_purchase_draft();
        assert!(validate_order_draft(OrderKind::Purchase, &draft).is_empty());
    }

    #[test]
    fn test_missing_supplier_flagged() {
        let mut draft = valid_purchase_draft();
        draft.counterparty = None;

        let errors = validate_order_draft(OrderKind::Purchase, &draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "supplier_id");
    }

    #[test]
    fn test_short_customer_flagged() {
        let mut draft = OrderDraft::seeded();
        draft.counterparty = Some(Counterparty::Customer("A".to_string()));
        draft
            .items
            .add(LineItem::new(1, "Hinge", 2, 10.0))
            .unwrap();

        let errors = validate_order_draft(OrderKind::Sales, &draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "customer");
    }

    #[test]
    fn test_empty_items_flagged() {
        let mut draft = valid_purchase_draft();
        draft.items = Default::default();

        let errors = validate_order_draft(OrderKind::Purchase, &draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "items");
    }

    #[test]
    fn test_blank_dates_flagged() {
        let mut draft = valid_purchase_draft();
        draft.header.order_date = String::new();
        draft.header.delivery_date = "  ".to_string();

        let fields: Vec<_> = validate_order_draft(OrderKind::Purchase, &draft)
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert!(fields.contains(&"order_date".to_string()));
        assert!(fields.contains(&"delivery_date".to_string()));
    }

    #[test]
    fn test_overlong_notes_flagged() {
        let mut draft = valid_purchase_draft();
        draft.header.notes = Some("x".repeat(MAX_NOTE_LEN + 1));

        let errors = validate_order_draft(OrderKind::Purchase, &draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "notes");
    }
}

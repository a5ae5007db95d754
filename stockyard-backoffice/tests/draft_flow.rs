//! End-to-end draft flows: edit, debounce, persist, restart, submit.
//!
//! redb allows one open database per file, so each scenario opens the store
//! once and hands clones to controllers; "restart" scenarios drop every
//! handle before reopening the file.

use async_trait::async_trait;
use shared::error::{ErrorCode, FieldError};
use shared::models::{OrderCreate, OrderKind, Supplier};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use stockyard_backoffice::pickers::{
    CounterpartyPicker, DEFAULT_QUANTITY, DEFAULT_UNIT_PRICE, LineItemPicker,
};
use stockyard_backoffice::{
    Counterparty, DraftError, DraftPhase, DraftStore, LineItem, OrderDraftController, SaveOutcome,
    SubmitError,
};
use stockyard_client::{ClientError, ClientResult, OrderCreator};

const QUIET: Duration = Duration::from_millis(500);

// ============================================================================
// Test doubles
// ============================================================================

enum Behavior {
    Succeed(i64),
    RejectField(&'static str, &'static str),
    FailTransport,
}

struct MockOrderService {
    behavior: Behavior,
    calls: AtomicUsize,
    last_payload: Mutex<Option<OrderCreate>>,
}

impl MockOrderService {
    fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_payload: Mutex::new(None),
        }
    }
}

#[async_trait]
impl OrderCreator for MockOrderService {
    async fn create(&self, order: OrderCreate) -> ClientResult<i64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_payload.lock().unwrap() = Some(order);
        match self.behavior {
            Behavior::Succeed(id) => Ok(id),
            Behavior::RejectField(field, message) => Err(ClientError::Api {
                code: ErrorCode::ValidationFailed,
                message: "Validation failed".to_string(),
                errors: vec![FieldError::new(field, message)],
            }),
            Behavior::FailTransport => Err(ClientError::Api {
                code: ErrorCode::InternalError,
                message: "upstream unavailable".to_string(),
                errors: Vec::new(),
            }),
        }
    }
}

struct FixedCounterpartyPicker(Counterparty);

#[async_trait]
impl CounterpartyPicker for FixedCounterpartyPicker {
    async fn pick(&self) -> Option<Counterparty> {
        Some(self.0.clone())
    }
}

/// Yields the first candidate not present in the exclusion list
struct CandidateItemPicker {
    candidates: Vec<(i64, &'static str)>,
}

#[async_trait]
impl LineItemPicker for CandidateItemPicker {
    async fn pick(&self, exclude: &[i64]) -> Option<LineItem> {
        self.candidates
            .iter()
            .find(|(id, _)| !exclude.contains(id))
            .map(|(id, name)| LineItem::new(*id, *name, DEFAULT_QUANTITY, DEFAULT_UNIT_PRICE))
    }
}

struct CancellingPicker;

#[async_trait]
impl LineItemPicker for CancellingPicker {
    async fn pick(&self, _exclude: &[i64]) -> Option<LineItem> {
        None
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn supplier() -> Supplier {
    Supplier {
        id: 3,
        name: "Ironworks Ltd".to_string(),
        address: "1 Forge Way".to_string(),
        contact: Some("J. Smith".to_string()),
        phone: "555-0100".to_string(),
        email: Some("orders@ironworks.example".to_string()),
        is_active: true,
    }
}

fn open_store(dir: &tempfile::TempDir) -> DraftStore {
    DraftStore::open(dir.path().join("drafts.redb")).unwrap()
}

fn open(store: &DraftStore, kind: OrderKind) -> OrderDraftController {
    OrderDraftController::open(store.clone(), kind, QUIET).unwrap()
}

async fn composed_purchase(store: &DraftStore) -> OrderDraftController {
    let mut controller = open(store, OrderKind::Purchase);
    controller
        .set_counterparty(Some(Counterparty::Supplier(supplier())))
        .unwrap();
    controller
        .add_item(LineItem::new(1, "Door hinge", 2, 10.0))
        .unwrap();
    controller
        .add_item(LineItem::new(2, "Gate latch", 1, 5.0))
        .unwrap();
    assert_eq!(
        controller.autosave().await.unwrap(),
        Some(SaveOutcome::Saved)
    );
    controller
}

// ============================================================================
// Flows
// ============================================================================

#[tokio::test(start_paused = true)]
async fn edits_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = open_store(&dir);
        let controller = composed_purchase(&store).await;
        assert_eq!(controller.phase(), DraftPhase::Persisted);
        assert_eq!(controller.total(), 25.0);
    }

    // New session over the same data directory.
    let store = open_store(&dir);
    let controller = open(&store, OrderKind::Purchase);
    assert_eq!(controller.phase(), DraftPhase::Persisted);
    assert_eq!(controller.draft().items.len(), 2);
    assert_eq!(controller.total(), 25.0);
    assert_eq!(
        controller.draft().counterparty.as_ref().map(|c| c.label()),
        Some("Ironworks Ltd")
    );
}

#[tokio::test(start_paused = true)]
async fn purchase_and_sales_drafts_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);

    let _purchase = composed_purchase(&store).await;

    let mut sales = open(&store, OrderKind::Sales);
    assert_eq!(sales.phase(), DraftPhase::Empty);
    sales
        .set_counterparty(Some(Counterparty::Customer("Acme Fabrication".to_string())))
        .unwrap();
    sales
        .add_item(LineItem::new(11, "Angle bracket", 6, 1.5))
        .unwrap();
    sales.autosave().await.unwrap();

    // The purchase draft is untouched by sales activity.
    let purchase = open(&store, OrderKind::Purchase);
    assert_eq!(purchase.draft().items.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn successful_submit_clears_the_draft() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    let mut controller = composed_purchase(&store).await;

    let service = MockOrderService::new(Behavior::Succeed(42));
    let order_id = controller.submit(&service).await.unwrap();

    assert_eq!(order_id, 42);
    assert_eq!(controller.phase(), DraftPhase::Submitted);
    assert_eq!(service.calls.load(Ordering::SeqCst), 1);

    // The payload carried the composed lines.
    let payload = service.last_payload.lock().unwrap().take().unwrap();
    match payload {
        OrderCreate::Purchase(p) => {
            assert_eq!(p.supplier_id, 3);
            assert_eq!(p.items.len(), 2);
            assert_eq!(p.items[0].product_id, 1);
        }
        OrderCreate::Sales(_) => panic!("expected a purchase payload"),
    }

    // No draft remains for that order kind.
    assert!(
        store
            .load(OrderKind::Purchase.storage_key())
            .unwrap()
            .is_none()
    );

    // The controller is terminal.
    assert_eq!(
        controller.set_notes(Some("too late".to_string())),
        Err(DraftError::AlreadySubmitted)
    );
    assert!(matches!(
        controller.submit(&service).await,
        Err(SubmitError::AlreadySubmitted)
    ));
}

#[tokio::test(start_paused = true)]
async fn rejected_submit_keeps_the_draft_intact() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    let mut controller = composed_purchase(&store).await;

    let service = MockOrderService::new(Behavior::RejectField("supplier_id", "required"));
    let err = controller.submit(&service).await.unwrap_err();

    match err {
        SubmitError::Rejected { errors } => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "supplier_id");
            assert_eq!(errors[0].message, "required");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
    assert_eq!(controller.form_errors().len(), 1);

    // Draft still loadable with all prior items intact.
    let reopened = open(&store, OrderKind::Purchase);
    assert_eq!(reopened.draft().items.len(), 2);
    assert_eq!(reopened.total(), 25.0);
}

#[tokio::test(start_paused = true)]
async fn transport_failure_is_generic_and_preserves_the_draft() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    let mut controller = composed_purchase(&store).await;

    let service = MockOrderService::new(Behavior::FailTransport);
    let err = controller.submit(&service).await.unwrap_err();

    assert!(matches!(err, SubmitError::Failed(_)));
    assert!(err.field_errors().is_empty());
    assert_ne!(controller.phase(), DraftPhase::Submitted);

    // Manual resubmit works once the backend recovers.
    let recovered = MockOrderService::new(Behavior::Succeed(7));
    assert_eq!(controller.submit(&recovered).await.unwrap(), 7);
}

#[tokio::test(start_paused = true)]
async fn pickers_apply_selection_and_exclusion() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    let mut controller = open(&store, OrderKind::Purchase);

    let counterparty_picker = FixedCounterpartyPicker(Counterparty::Supplier(supplier()));
    assert!(
        controller
            .pick_counterparty(&counterparty_picker)
            .await
            .unwrap()
    );

    let item_picker = CandidateItemPicker {
        candidates: vec![(1, "Door hinge"), (2, "Gate latch")],
    };
    assert!(controller.pick_item(&item_picker).await.unwrap());
    assert!(controller.pick_item(&item_picker).await.unwrap());
    // Both candidates are now excluded; the picker finds nothing.
    assert!(!controller.pick_item(&item_picker).await.unwrap());
    assert_eq!(controller.draft().items.ids(), vec![1, 2]);

    // Picked lines carry the picker defaults.
    let first = controller.draft().items.iter().next().unwrap();
    assert_eq!(first.quantity, DEFAULT_QUANTITY);
    assert_eq!(first.unit_price, DEFAULT_UNIT_PRICE);

    // Cancelling changes nothing.
    assert!(!controller.pick_item(&CancellingPicker).await.unwrap());
    assert_eq!(controller.draft().items.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn stabilized_state_reconstructs_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    let mut controller = open(&store, OrderKind::Sales);

    controller
        .set_counterparty(Some(Counterparty::Customer("Acme Fabrication".to_string())))
        .unwrap();
    controller
        .set_notes(Some("deliver to dock 4".to_string()))
        .unwrap();
    controller
        .add_item(LineItem::new(11, "Angle bracket", 6, 1.5).with_discount(0.5))
        .unwrap();
    controller.autosave().await.unwrap();

    let snapshot_before = controller.draft().clone();

    let reopened = open(&store, OrderKind::Sales);
    assert_eq!(reopened.draft(), &snapshot_before);
    // Discount is carried but does not change the total.
    assert_eq!(reopened.total(), 9.0);
}

//! Order draft controller
//!
//! Ties the draft store, the debounced watch and the line-item collection
//! together behind one state machine:
//!
//! ```text
//! open()
//!   ├─ stored draft found ──────────► Persisted
//!   └─ nothing stored (seed) ──────► Empty
//! Empty/Persisted ── any edit ─────► Dirty
//! Dirty ── stabilized snapshot ────► Persisted   (write only if changed)
//! Persisted ── successful submit ──► Submitted   (one-way, draft cleared)
//! ```
//!
//! A failed submit - client-side validation, backend rejection or transport
//! failure - leaves the phase and the stored draft untouched so nothing the
//! user typed is lost.

use super::debounce::{DebounceInput, DebouncedWatch};
use super::items::LineItem;
use super::store::{DraftStore, DraftStoreResult};
use super::{Counterparty, DraftError, OrderDraft};
use crate::pickers::{CounterpartyPicker, LineItemPicker};
use crate::validation::validate_order_draft;
use shared::error::FieldError;
use shared::models::{
    OrderCreate, OrderKind, PurchaseOrderCreate, PurchaseOrderItemInput, SalesOrderCreate,
    SalesOrderItemInput,
};
use std::time::Duration;
use stockyard_client::{ClientError, OrderCreator};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Controller lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftPhase {
    /// No stored draft, defaults shown
    Empty,
    /// In-memory state differs from the last persisted snapshot
    Dirty,
    /// In-memory state equals the last persisted snapshot
    Persisted,
    /// Order accepted by the backend; terminal
    Submitted,
}

/// Result of reconciling one stabilized snapshot with the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The snapshot differed and was written
    Saved,
    /// The snapshot matched the last write; nothing stored
    Unchanged,
}

/// Submission failure
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Client-side validation failed; the backend was not called
    #[error("order validation failed")]
    Invalid { errors: Vec<FieldError> },

    /// The backend rejected the payload with field-level errors
    #[error("order rejected by the backend")]
    Rejected { errors: Vec<FieldError> },

    /// This controller already submitted its order
    #[error("Order has already been submitted")]
    AlreadySubmitted,

    /// Transport failure or a backend error without field detail
    #[error(transparent)]
    Failed(#[from] ClientError),
}

impl SubmitError {
    /// Field-level errors to map onto the form, if any
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Invalid { errors } | Self::Rejected { errors } => errors,
            _ => &[],
        }
    }
}

/// Generic draft controller, parametrized by order kind
///
/// One instance drives one order form for its lifetime. All mutation goes
/// through the setter methods so every change lands in the debounced watch.
pub struct OrderDraftController {
    kind: OrderKind,
    store: DraftStore,
    draft: OrderDraft,
    phase: DraftPhase,
    /// Canonical snapshot of the last store write (or hydration)
    last_saved: Option<String>,
    /// Field errors from the last failed submit, cleared on edit
    form_errors: Vec<FieldError>,
    input: DebounceInput<String>,
    stabilized: mpsc::UnboundedReceiver<String>,
    cancel: CancellationToken,
}

impl OrderDraftController {
    /// Open a controller for `kind`, hydrating from the store when a draft
    /// is present and seeding defaults otherwise
    pub fn open(store: DraftStore, kind: OrderKind, quiet: Duration) -> DraftStoreResult<Self> {
        let (draft, phase, last_saved) = match store.load(kind.storage_key())? {
            Some(draft) => {
                tracing::info!(kind = %kind, items = draft.items.len(), "Draft restored");
                let snapshot = draft.snapshot();
                (draft, DraftPhase::Persisted, Some(snapshot))
            }
            None => (OrderDraft::seeded(), DraftPhase::Empty, None),
        };

        let cancel = CancellationToken::new();
        let (input, stabilized) = DebouncedWatch::spawn(quiet, cancel.clone());

        Ok(Self {
            kind,
            store,
            draft,
            phase,
            last_saved,
            form_errors: Vec::new(),
            input,
            stabilized,
            cancel,
        })
    }

    pub fn kind(&self) -> OrderKind {
        self.kind
    }

    pub fn phase(&self) -> DraftPhase {
        self.phase
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    /// Field errors from the last failed submit
    pub fn form_errors(&self) -> &[FieldError] {
        &self.form_errors
    }

    /// Current order total
    pub fn total(&self) -> f64 {
        self.draft.items.total()
    }

    // ========================================================================
    // Edits
    // ========================================================================

    fn ensure_editable(&self) -> Result<(), DraftError> {
        if self.phase == DraftPhase::Submitted {
            return Err(DraftError::AlreadySubmitted);
        }
        Ok(())
    }

    /// Register a mutation: mark dirty and feed the watch
    fn touch(&mut self) {
        self.phase = DraftPhase::Dirty;
        self.form_errors.clear();
        self.input.update(self.draft.snapshot());
    }

    pub fn set_order_date(&mut self, date: impl Into<String>) -> Result<(), DraftError> {
        self.ensure_editable()?;
        self.draft.header.order_date = date.into();
        self.touch();
        Ok(())
    }

    pub fn set_delivery_date(&mut self, date: impl Into<String>) -> Result<(), DraftError> {
        self.ensure_editable()?;
        self.draft.header.delivery_date = date.into();
        self.touch();
        Ok(())
    }

    pub fn set_notes(&mut self, notes: Option<String>) -> Result<(), DraftError> {
        self.ensure_editable()?;
        self.draft.header.notes = notes;
        self.touch();
        Ok(())
    }

    /// Set or clear the counterparty
    ///
    /// The flavor must match the order kind: suppliers on purchase drafts,
    /// customers on sales drafts.
    pub fn set_counterparty(
        &mut self,
        counterparty: Option<Counterparty>,
    ) -> Result<(), DraftError> {
        self.ensure_editable()?;
        if let Some(cp) = &counterparty {
            let flavor_matches = matches!(
                (self.kind, cp),
                (OrderKind::Purchase, Counterparty::Supplier(_))
                    | (OrderKind::Sales, Counterparty::Customer(_))
            );
            if !flavor_matches {
                return Err(DraftError::CounterpartyMismatch);
            }
        }
        self.draft.counterparty = counterparty;
        self.touch();
        Ok(())
    }

    pub fn add_item(&mut self, item: LineItem) -> Result<(), DraftError> {
        self.ensure_editable()?;
        self.draft.items.add(item)?;
        self.touch();
        Ok(())
    }

    /// Remove a line by reference; returns whether it was present
    pub fn remove_item(&mut self, item_id: i64) -> Result<bool, DraftError> {
        self.ensure_editable()?;
        let removed = self.draft.items.remove(item_id);
        if removed {
            self.touch();
        }
        Ok(removed)
    }

    /// Run the counterparty picker and apply the selection
    ///
    /// Returns whether a selection was made (false = cancelled).
    pub async fn pick_counterparty<P>(&mut self, picker: &P) -> Result<bool, DraftError>
    where
        P: CounterpartyPicker + ?Sized,
    {
        self.ensure_editable()?;
        match picker.pick().await {
            Some(counterparty) => {
                self.set_counterparty(Some(counterparty))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Run the item picker, excluding references already in the draft
    ///
    /// Returns whether a selection was made (false = cancelled).
    pub async fn pick_item<P>(&mut self, picker: &P) -> Result<bool, DraftError>
    where
        P: LineItemPicker + ?Sized,
    {
        self.ensure_editable()?;
        let exclude = self.draft.items.ids();
        match picker.pick(&exclude).await {
            Some(item) => {
                self.add_item(item)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Await the next stabilized snapshot and reconcile it with the store
    ///
    /// Returns `None` once the watch has stopped (teardown or submission).
    pub async fn autosave(&mut self) -> DraftStoreResult<Option<SaveOutcome>> {
        if self.phase == DraftPhase::Submitted {
            return Ok(None);
        }
        let Some(snapshot) = self.stabilized.recv().await else {
            return Ok(None);
        };
        self.commit(snapshot).map(Some)
    }

    /// Reconcile one stabilized snapshot: write only when it differs from
    /// the last persisted one
    fn commit(&mut self, snapshot: String) -> DraftStoreResult<SaveOutcome> {
        // An edit arriving after this emission has its own emission pending;
        // in that case the controller stays Dirty.
        let in_sync = snapshot == self.draft.snapshot();

        let outcome = if self.last_saved.as_deref() == Some(snapshot.as_str()) {
            // Typed and undone within the window: nothing to write.
            SaveOutcome::Unchanged
        } else {
            // Persist the state the snapshot was taken from, not whatever
            // the draft has mutated to since.
            let draft: OrderDraft = serde_json::from_str(&snapshot)?;
            self.store.save(self.kind.storage_key(), &draft)?;
            self.last_saved = Some(snapshot);
            SaveOutcome::Saved
        };

        if in_sync {
            self.phase = DraftPhase::Persisted;
        }
        Ok(outcome)
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Validate and submit the draft through the order-creation collaborator
    ///
    /// On success the stored draft is cleared and the controller becomes
    /// terminal. On any failure the draft - in memory and in the store -
    /// stays exactly as it was.
    pub async fn submit<S>(&mut self, service: &S) -> Result<i64, SubmitError>
    where
        S: OrderCreator + ?Sized,
    {
        if self.phase == DraftPhase::Submitted {
            return Err(SubmitError::AlreadySubmitted);
        }

        let errors = validate_order_draft(self.kind, &self.draft);
        if !errors.is_empty() {
            self.form_errors = errors.clone();
            return Err(SubmitError::Invalid { errors });
        }

        let payload = self.build_payload()?;
        match service.create(payload).await {
            Ok(order_id) => {
                // The order exists on the backend now; a failed local clear
                // must not mask that.
                if let Err(e) = self.store.clear(self.kind.storage_key()) {
                    tracing::error!(kind = %self.kind, error = %e, "Failed to clear submitted draft");
                }
                self.phase = DraftPhase::Submitted;
                self.cancel.cancel();
                tracing::info!(kind = %self.kind, order_id, "Order submitted, draft cleared");
                Ok(order_id)
            }
            Err(err) => {
                let field_errors = err.field_errors();
                if !field_errors.is_empty() {
                    self.form_errors = field_errors.to_vec();
                    tracing::debug!(kind = %self.kind, errors = field_errors.len(), "Order rejected with field errors");
                    Err(SubmitError::Rejected {
                        errors: self.form_errors.clone(),
                    })
                } else {
                    tracing::warn!(kind = %self.kind, error = %err, "Order submission failed");
                    Err(SubmitError::Failed(err))
                }
            }
        }
    }

    fn build_payload(&self) -> Result<OrderCreate, SubmitError> {
        let header = &self.draft.header;
        match (self.kind, &self.draft.counterparty) {
            (OrderKind::Purchase, Some(Counterparty::Supplier(supplier))) => {
                Ok(OrderCreate::Purchase(PurchaseOrderCreate {
                    supplier_id: supplier.id,
                    order_date: header.order_date.clone(),
                    delivery_date: header.delivery_date.clone(),
                    notes: header.notes.clone(),
                    items: self
                        .draft
                        .items
                        .iter()
                        .map(|i| PurchaseOrderItemInput {
                            product_id: i.item_id,
                            quantity: i.quantity,
                            unit_price: i.unit_price,
                            discount: i.discount,
                        })
                        .collect(),
                }))
            }
            (OrderKind::Sales, Some(Counterparty::Customer(customer))) => {
                Ok(OrderCreate::Sales(SalesOrderCreate {
                    customer: customer.clone(),
                    order_date: header.order_date.clone(),
                    delivery_date: header.delivery_date.clone(),
                    notes: header.notes.clone(),
                    items: self
                        .draft
                        .items
                        .iter()
                        .map(|i| SalesOrderItemInput {
                            inventory_id: i.item_id,
                            quantity: i.quantity,
                            unit_price: i.unit_price,
                            discount: i.discount,
                        })
                        .collect(),
                }))
            }
            _ => Err(SubmitError::Invalid {
                errors: validate_order_draft(self.kind, &self.draft),
            }),
        }
    }
}

impl Drop for OrderDraftController {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for OrderDraftController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderDraftController")
            .field("kind", &self.kind)
            .field("phase", &self.phase)
            .field("items", &self.draft.items.len())
            .finish()
    }
}

//! redb-based local draft store
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `drafts` | storage key | JSON-serialized `OrderDraft` | One draft per order kind |
//!
//! Corrupt stored bytes are treated as an absent draft: the caller falls
//! back to seeded defaults and the next stabilized change overwrites the
//! bad entry. Only real storage failures surface as errors.

use super::OrderDraft;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for drafts: key = order-kind storage key, value = JSON-serialized OrderDraft
const DRAFTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("drafts");

/// Storage errors
#[derive(Debug, Error)]
pub enum DraftStoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type DraftStoreResult<T> = Result<T, DraftStoreError>;

/// Draft storage backed by redb
#[derive(Clone)]
pub struct DraftStore {
    db: Arc<Database>,
}

impl DraftStore {
    /// Open (or create) the draft database at `path`
    pub fn open(path: impl AsRef<Path>) -> DraftStoreResult<Self> {
        let db = Database::create(path)?;

        // Create the table up front so the first load sees an empty table
        // instead of a missing one.
        let txn = db.begin_write()?;
        txn.open_table(DRAFTS_TABLE)?;
        txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Serialize `draft` and store it under `key`, overwriting any prior value
    pub fn save(&self, key: &str, draft: &OrderDraft) -> DraftStoreResult<()> {
        let bytes = serde_json::to_vec(draft)?;
        self.save_raw(key, &bytes)?;
        tracing::debug!(key = %key, "Draft persisted");
        Ok(())
    }

    /// Load the draft stored under `key`
    ///
    /// Returns `None` when the key is absent or the stored bytes do not
    /// deserialize; corruption is logged and never propagated.
    pub fn load(&self, key: &str) -> DraftStoreResult<Option<OrderDraft>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(DRAFTS_TABLE)?;
        let Some(guard) = table.get(key)? else {
            return Ok(None);
        };

        match serde_json::from_slice(guard.value()) {
            Ok(draft) => Ok(Some(draft)),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Stored draft is corrupt, treating as absent");
                Ok(None)
            }
        }
    }

    /// Remove the draft stored under `key`
    pub fn clear(&self, key: &str) -> DraftStoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(DRAFTS_TABLE)?;
            table.remove(key)?;
        }
        txn.commit()?;
        tracing::debug!(key = %key, "Draft cleared");
        Ok(())
    }

    fn save_raw(&self, key: &str, bytes: &[u8]) -> DraftStoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(DRAFTS_TABLE)?;
            table.insert(key, bytes)?;
        }
        txn.commit()?;
        Ok(())
    }
}

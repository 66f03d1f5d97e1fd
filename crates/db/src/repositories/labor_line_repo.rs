//! Repository for labor line records.
//!
//! Every write is conditional:
//!
//! | Operation     | Condition                          |
//! |---------------|------------------------------------|
//! | `create`      | no item at the key                 |
//! | `update`      | item exists and is not tombstoned  |
//! | `soft_delete` | item exists and is not tombstoned  |
//!
//! Reads never surface tombstoned records.

use laborlines_core::labor_line::{sort_key_prefix, LaborLine, LaborLineKey};

use crate::codec;
use crate::error::DbError;
use crate::store::{ItemKey, ItemStore, WriteCondition};

/// Provides create/read/update/soft-delete/list for labor lines.
pub struct LaborLineRepo;

impl LaborLineRepo {
    /// Insert a new record. Fails with [`DbError::ConditionFailed`] if any
    /// item, live or tombstoned, already occupies its key.
    pub async fn create(store: &dyn ItemStore, line: &LaborLine) -> Result<(), DbError> {
        store
            .put_item(codec::encode(line), WriteCondition::NotExists)
            .await
    }

    /// Find a live record by key. Absent and tombstoned records are `None`.
    pub async fn find_by_key(
        store: &dyn ItemStore,
        key: &LaborLineKey,
    ) -> Result<Option<LaborLine>, DbError> {
        let item_key = ItemKey::new(key.account_id.as_str(), key.sort_key());
        let Some(item) = store.get_item(&item_key).await? else {
            return Ok(None);
        };
        let line = codec::decode(&item)?;
        if line.is_deleted() {
            return Ok(None);
        }
        Ok(Some(line))
    }

    /// Replace a live record, keeping its original `created_at`.
    ///
    /// `line.created_at` is overwritten with the stored value before the
    /// write. Fails with [`DbError::NotFound`] if the record is absent or
    /// tombstoned, and with [`DbError::ConditionFailed`] if it was
    /// tombstoned between the lookup and the write.
    pub async fn update(store: &dyn ItemStore, line: &mut LaborLine) -> Result<(), DbError> {
        let existing = Self::find_by_key(store, &line.key())
            .await?
            .ok_or(DbError::NotFound)?;

        line.created_at = existing.created_at;
        line.deleted_at = None;

        store
            .put_item(codec::encode(line), WriteCondition::ExistsAndNotDeleted)
            .await
    }

    /// Tombstone a live record and return it as written.
    ///
    /// Fails with [`DbError::NotFound`] if the record is absent or already
    /// tombstoned, and with [`DbError::ConditionFailed`] if a concurrent
    /// delete won the race.
    pub async fn soft_delete(
        store: &dyn ItemStore,
        key: &LaborLineKey,
    ) -> Result<LaborLine, DbError> {
        let mut line = Self::find_by_key(store, key)
            .await?
            .ok_or(DbError::NotFound)?;

        line.soft_delete();

        store
            .put_item(codec::encode(&line), WriteCondition::ExistsAndNotDeleted)
            .await?;
        Ok(line)
    }

    /// List live records for an account, optionally restricted to one task,
    /// in sort key order.
    pub async fn list(
        store: &dyn ItemStore,
        account_id: &str,
        task_id: Option<&str>,
    ) -> Result<Vec<LaborLine>, DbError> {
        let prefix = task_id.map(sort_key_prefix);
        let items = store.query(account_id, prefix.as_deref()).await?;

        let mut lines = Vec::with_capacity(items.len());
        for item in &items {
            let line = codec::decode(item)?;
            if !line.is_deleted() {
                lines.push(line);
            }
        }
        Ok(lines)
    }
}

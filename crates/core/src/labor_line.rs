//! Labor line record model.
//!
//! A labor line belongs to an account and a task. Its storage location is
//! derived from `(account_id, task_id, labor_line_id)`: the partition key is
//! the account id and the sort key is `{task_id}#{labor_line_id}`. Records
//! are never hard-deleted; a present `deleted_at` marks a tombstone.

use serde::{Deserialize, Serialize};

use crate::types::{now_epoch_seconds, EpochSeconds, LaborLineId};

/// Separator between task id and labor line id in the sort key.
pub const KEY_SEPARATOR: char = '#';

/// Entity name used in not-found errors and log fields.
pub const ENTITY_NAME: &str = "LaborLine";

/// Build the sort key `{task_id}#{labor_line_id}`.
pub fn sort_key(task_id: &str, labor_line_id: &str) -> String {
    format!("{task_id}{KEY_SEPARATOR}{labor_line_id}")
}

/// Prefix shared by every sort key under one task.
pub fn sort_key_prefix(task_id: &str) -> String {
    format!("{task_id}{KEY_SEPARATOR}")
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// A maintenance labor line attached to a work order task.
///
/// Serialized in camelCase to match the GraphQL schema. The derived storage
/// keys are not part of the serialized form; use [`LaborLine::partition_key`]
/// and [`LaborLine::sort_key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborLine {
    pub labor_line_id: LaborLineId,
    #[serde(default)]
    pub contact_id: String,
    pub account_id: String,
    pub task_id: String,
    #[serde(rename = "partId", default, skip_serializing_if = "Vec::is_empty")]
    pub part_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    pub created_at: EpochSeconds,
    pub updated_at: EpochSeconds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<EpochSeconds>,
}

impl LaborLine {
    /// Build a new record from create input with a fresh UUIDv4 id.
    ///
    /// `created_at` and `updated_at` are both set to now.
    pub fn new(input: CreateLaborLine) -> Self {
        let now = now_epoch_seconds();
        Self {
            labor_line_id: uuid::Uuid::new_v4().to_string(),
            contact_id: input.contact_id.unwrap_or_default(),
            account_id: input.account_id,
            task_id: input.task_id,
            part_ids: input.part_ids.unwrap_or_default(),
            notes: input.notes.unwrap_or_default(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// True when the record has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Tombstone the record: stamps both `deleted_at` and `updated_at`.
    pub fn soft_delete(&mut self) {
        let now = now_epoch_seconds();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    /// Partition key (the account id).
    pub fn partition_key(&self) -> &str {
        &self.account_id
    }

    /// Sort key, `{task_id}#{labor_line_id}`.
    pub fn sort_key(&self) -> String {
        sort_key(&self.task_id, &self.labor_line_id)
    }

    /// The lookup key addressing this record.
    pub fn key(&self) -> LaborLineKey {
        LaborLineKey {
            account_id: self.account_id.clone(),
            task_id: self.task_id.clone(),
            labor_line_id: self.labor_line_id.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Input for `createLaborLine`.
///
/// Identifier fields default to empty so that missing values reach the
/// validator and are reported as missing required properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateLaborLine {
    #[serde(default)]
    pub contact_id: Option<String>,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub task_id: String,
    #[serde(rename = "partId", alias = "partIds", default)]
    pub part_ids: Option<Vec<String>>,
    #[serde(default)]
    pub notes: Option<Vec<String>>,
}

/// Input for `updateLaborLine`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateLaborLine {
    #[serde(alias = "id", default)]
    pub labor_line_id: String,
    #[serde(default)]
    pub contact_id: Option<String>,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub task_id: String,
    #[serde(rename = "partId", alias = "partIds", default)]
    pub part_ids: Option<Vec<String>>,
    #[serde(default)]
    pub notes: Option<Vec<String>>,
}

impl UpdateLaborLine {
    /// Convert into the record to be written.
    ///
    /// `updated_at` is set to now. `created_at` is left at zero: the
    /// persistence layer copies it from the stored record.
    pub fn into_labor_line(self) -> LaborLine {
        LaborLine {
            labor_line_id: self.labor_line_id,
            contact_id: self.contact_id.unwrap_or_default(),
            account_id: self.account_id,
            task_id: self.task_id,
            part_ids: self.part_ids.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
            created_at: 0,
            updated_at: now_epoch_seconds(),
            deleted_at: None,
        }
    }

    /// The lookup key addressed by this update.
    pub fn key(&self) -> LaborLineKey {
        LaborLineKey {
            account_id: self.account_id.clone(),
            task_id: self.task_id.clone(),
            labor_line_id: self.labor_line_id.clone(),
        }
    }
}

/// Input for `getLaborLine` and `deleteLaborLine`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LaborLineKey {
    pub account_id: String,
    pub task_id: String,
    #[serde(alias = "id")]
    pub labor_line_id: String,
}

impl LaborLineKey {
    /// Sort key, `{task_id}#{labor_line_id}`.
    pub fn sort_key(&self) -> String {
        sort_key(&self.task_id, &self.labor_line_id)
    }
}

/// Input for `listLaborLines`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListLaborLines {
    pub account_id: String,
    #[serde(default)]
    pub task_id: Option<String>,
}

impl ListLaborLines {
    /// The task filter, treating an empty string as no filter.
    pub fn task_filter(&self) -> Option<&str> {
        self.task_id.as_deref().filter(|t| !t.is_empty())
    }
}

//! The item store abstraction.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;

use crate::error::DbError;

/// A stored item in the store's native attribute representation.
pub type Item = HashMap<String, AttributeValue>;

/// Partition key attribute name.
pub const PARTITION_KEY: &str = "PK";

/// Sort key attribute name.
pub const SORT_KEY: &str = "SK";

/// Tombstone attribute checked by [`WriteCondition::ExistsAndNotDeleted`].
pub const DELETED_AT: &str = "deletedAt";

/// Primary key of an item. Orders by partition, then sort key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub partition: String,
    pub sort: String,
}

impl ItemKey {
    pub fn new(partition: impl Into<String>, sort: impl Into<String>) -> Self {
        Self {
            partition: partition.into(),
            sort: sort.into(),
        }
    }

    /// Read the primary key attributes of an item.
    pub fn of_item(item: &Item) -> Result<Self, DbError> {
        Ok(Self::new(
            string_attr(item, PARTITION_KEY)?,
            string_attr(item, SORT_KEY)?,
        ))
    }
}

fn string_attr(item: &Item, name: &str) -> Result<String, DbError> {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| DbError::Codec(format!("missing string attribute {name}")))
}

/// Precondition attached to a put.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteCondition {
    /// No item exists at the key.
    NotExists,
    /// An item exists at the key and is not tombstoned.
    ExistsAndNotDeleted,
}

impl WriteCondition {
    /// DynamoDB condition expression for this precondition.
    pub fn expression(self) -> &'static str {
        match self {
            Self::NotExists => "attribute_not_exists(PK) AND attribute_not_exists(SK)",
            Self::ExistsAndNotDeleted => {
                "attribute_exists(PK) AND attribute_exists(SK) AND attribute_not_exists(deletedAt)"
            }
        }
    }

    /// Evaluate the precondition against the item currently stored at the key.
    pub fn is_satisfied_by(self, existing: Option<&Item>) -> bool {
        match (self, existing) {
            (Self::NotExists, existing) => existing.is_none(),
            (Self::ExistsAndNotDeleted, Some(item)) => !item.contains_key(DELETED_AT),
            (Self::ExistsAndNotDeleted, None) => false,
        }
    }
}

/// Keyed point operations and range queries over a sorted-key table.
///
/// Implementations must apply a put and its [`WriteCondition`] atomically.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Write `item`, replacing any existing item at its key, if `condition`
    /// holds. Fails with [`DbError::ConditionFailed`] otherwise.
    async fn put_item(&self, item: Item, condition: WriteCondition) -> Result<(), DbError>;

    /// Fetch the item at `key`, tombstoned or not.
    async fn get_item(&self, key: &ItemKey) -> Result<Option<Item>, DbError>;

    /// Fetch every item in `partition`, optionally restricted to sort keys
    /// starting with `sort_prefix`, in sort key order.
    async fn query(&self, partition: &str, sort_prefix: Option<&str>)
        -> Result<Vec<Item>, DbError>;

    /// Check that the backing table is reachable.
    async fn health_check(&self) -> Result<(), DbError>;
}

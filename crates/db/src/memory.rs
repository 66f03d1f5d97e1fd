//! In-memory sorted item store.
//!
//! Backs tests and the local resolver harness. Items are kept in a
//! `BTreeMap` ordered by `(PK, SK)`, matching DynamoDB's query order within
//! a partition. A single mutex serializes writes so each conditional put is
//! atomic.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::DbError;
use crate::store::{Item, ItemKey, ItemStore, WriteCondition};

#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    items: Mutex<BTreeMap<ItemKey, Item>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items, tombstones included.
    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn put_item(&self, item: Item, condition: WriteCondition) -> Result<(), DbError> {
        let key = ItemKey::of_item(&item)?;
        let mut items = self.items.lock().await;
        if !condition.is_satisfied_by(items.get(&key)) {
            tracing::debug!(
                partition = %key.partition,
                sort = %key.sort,
                condition = condition.expression(),
                "Conditional put rejected",
            );
            return Err(DbError::ConditionFailed);
        }
        items.insert(key, item);
        Ok(())
    }

    async fn get_item(&self, key: &ItemKey) -> Result<Option<Item>, DbError> {
        Ok(self.items.lock().await.get(key).cloned())
    }

    async fn query(
        &self,
        partition: &str,
        sort_prefix: Option<&str>,
    ) -> Result<Vec<Item>, DbError> {
        let prefix = sort_prefix.unwrap_or_default();
        let start = ItemKey::new(partition, prefix);
        let items = self.items.lock().await;
        Ok(items
            .range(start..)
            .take_while(|(key, _)| key.partition == partition && key.sort.starts_with(prefix))
            .map(|(_, item)| item.clone())
            .collect())
    }

    async fn health_check(&self) -> Result<(), DbError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use aws_sdk_dynamodb::types::AttributeValue;

    use crate::store::{DELETED_AT, PARTITION_KEY, SORT_KEY};

    fn item(partition: &str, sort: &str) -> Item {
        let mut item = Item::new();
        item.insert(PARTITION_KEY.into(), AttributeValue::S(partition.into()));
        item.insert(SORT_KEY.into(), AttributeValue::S(sort.into()));
        item
    }

    fn sort_keys(items: &[Item]) -> Vec<String> {
        items
            .iter()
            .map(|i| i[SORT_KEY].as_s().unwrap().clone())
            .collect()
    }

    #[tokio::test]
    async fn put_not_exists_rejects_existing_key() {
        let store = InMemoryItemStore::new();
        store
            .put_item(item("a", "t#1"), WriteCondition::NotExists)
            .await
            .unwrap();

        let mut replacement = item("a", "t#1");
        replacement.insert("marker".into(), AttributeValue::Bool(true));
        let result = store.put_item(replacement, WriteCondition::NotExists).await;

        assert_matches!(result, Err(DbError::ConditionFailed));
        let stored = store
            .get_item(&ItemKey::new("a", "t#1"))
            .await
            .unwrap()
            .unwrap();
        assert!(!stored.contains_key("marker"));
    }

    #[tokio::test]
    async fn put_exists_and_not_deleted_rejects_tombstone() {
        let store = InMemoryItemStore::new();
        let mut tombstone = item("a", "t#1");
        tombstone.insert(DELETED_AT.into(), AttributeValue::N("10".into()));
        store
            .put_item(tombstone, WriteCondition::NotExists)
            .await
            .unwrap();

        let result = store
            .put_item(item("a", "t#1"), WriteCondition::ExistsAndNotDeleted)
            .await;
        assert_matches!(result, Err(DbError::ConditionFailed));
    }

    #[tokio::test]
    async fn put_without_keys_is_a_codec_error() {
        let store = InMemoryItemStore::new();
        let result = store.put_item(Item::new(), WriteCondition::NotExists).await;
        assert_matches!(result, Err(DbError::Codec(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn query_scopes_to_partition_and_prefix() {
        let store = InMemoryItemStore::new();
        for (p, s) in [
            ("a", "t1#2"),
            ("a", "t1#1"),
            ("a", "t2#1"),
            ("a", "t10#1"),
            ("b", "t1#1"),
        ] {
            store.put_item(item(p, s), WriteCondition::NotExists).await.unwrap();
        }
        assert_eq!(store.len().await, 5);

        let all = store.query("a", None).await.unwrap();
        assert_eq!(sort_keys(&all), vec!["t1#1", "t1#2", "t10#1", "t2#1"]);

        let task = store.query("a", Some("t1#")).await.unwrap();
        assert_eq!(sort_keys(&task), vec!["t1#1", "t1#2"]);

        let none = store.query("c", None).await.unwrap();
        assert!(none.is_empty());
    }
}

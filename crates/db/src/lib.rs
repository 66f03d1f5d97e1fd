//! Persistence layer for labor lines.
//!
//! Records live in a single sorted-key table: partition key `PK` is the
//! account id and sort key `SK` is `{taskId}#{laborLineId}`. The
//! [`store::ItemStore`] trait abstracts the table so the repository runs
//! against DynamoDB in production and an in-memory store in tests.

pub mod codec;
pub mod dynamo;
pub mod error;
pub mod memory;
pub mod repositories;
pub mod store;

use std::sync::Arc;

pub use error::DbError;
pub use store::ItemStore;

/// Shared handle to the item store, cloned into request handlers.
pub type DbStore = Arc<dyn ItemStore>;

/// Create a DynamoDB-backed store for the given table.
///
/// `endpoint_url` overrides the AWS endpoint (e.g. DynamoDB Local).
pub async fn create_dynamo_store(table_name: &str, endpoint_url: Option<&str>) -> DbStore {
    Arc::new(dynamo::DynamoItemStore::connect(table_name, endpoint_url).await)
}

/// Create an empty in-memory store.
pub fn create_memory_store() -> DbStore {
    Arc::new(memory::InMemoryItemStore::new())
}

/// Verify the store is reachable.
pub async fn health_check(store: &dyn ItemStore) -> Result<(), DbError> {
    store.health_check().await
}

use std::sync::Arc;

use laborlines_core::validation::LaborLineValidator;
use laborlines_db::DbStore;

use crate::config::{ServiceConfig, StoreConfig};
use crate::dispatcher::{DispatchOptions, LaborLineDispatcher};

/// Shared application state available to all harness route handlers.
///
/// Cloned per request; every field is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<LaborLineDispatcher>,
}

impl AppState {
    pub fn new(dispatcher: LaborLineDispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }

    pub fn store(&self) -> &DbStore {
        self.dispatcher.store()
    }
}

/// Open the configured store.
pub async fn build_store(config: &ServiceConfig) -> DbStore {
    match &config.store {
        StoreConfig::DynamoDb {
            table_name,
            endpoint_url,
        } => laborlines_db::create_dynamo_store(table_name, endpoint_url.as_deref()).await,
        StoreConfig::Memory => {
            tracing::warn!("Using in-memory store; data is lost on exit");
            laborlines_db::create_memory_store()
        }
    }
}

/// Build a dispatcher with the production validator over the configured store.
pub async fn build_dispatcher(config: &ServiceConfig) -> LaborLineDispatcher {
    let store = build_store(config).await;
    LaborLineDispatcher::new(
        store,
        Arc::new(LaborLineValidator::new()),
        DispatchOptions {
            surface_conflict_errors: config.surface_conflict_errors,
        },
    )
}

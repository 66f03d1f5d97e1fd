//! Routes resolver events to the labor line handlers.

use std::sync::Arc;

use laborlines_core::validation::InputValidator;
use laborlines_db::DbStore;
use serde::Serialize;
use serde_json::Value;
use tracing::Instrument;

use crate::error::{AppError, AppResult};
use crate::event::ResolverEvent;
use crate::handlers::labor_lines;
use crate::response::ResolverResponse;

/// Operations served by this resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
    Get,
    List,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Create,
        Operation::Update,
        Operation::Delete,
        Operation::Get,
        Operation::List,
    ];

    /// GraphQL field name routed to this operation.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Create => "createLaborLine",
            Self::Update => "updateLaborLine",
            Self::Delete => "deleteLaborLine",
            Self::Get => "getLaborLine",
            Self::List => "listLaborLines",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.field_name() == name)
    }
}

/// Runtime switches for the dispatcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Report conditional-check failures as `ConflictError`.
    pub surface_conflict_errors: bool,
}

/// Entry point for every resolver invocation.
///
/// Holds the store and validator handles built once at startup. `handle`
/// always returns an envelope; no failure escapes as an `Err`.
pub struct LaborLineDispatcher {
    store: DbStore,
    validator: Arc<dyn InputValidator>,
    options: DispatchOptions,
}

impl LaborLineDispatcher {
    pub fn new(
        store: DbStore,
        validator: Arc<dyn InputValidator>,
        options: DispatchOptions,
    ) -> Self {
        Self {
            store,
            validator,
            options,
        }
    }

    pub fn store(&self) -> &DbStore {
        &self.store
    }

    pub async fn handle(&self, event: &ResolverEvent) -> ResolverResponse {
        let field_name = event.operation_name();
        let span = tracing::info_span!(
            "resolve",
            type_name = event.parent_type_name(),
            field_name
        );

        async {
            tracing::info!("Handling resolver event");
            let result = match Operation::from_field_name(field_name) {
                Some(op) => self.route(op, event).await,
                None => Err(AppError::Unsupported(field_name.to_string())),
            };

            match result {
                Ok(data) => ResolverResponse::data(data),
                Err(err) => {
                    let error = err.into_resolver_error(self.options.surface_conflict_errors);
                    tracing::info!(error_type = %error.error_type, "Resolver event failed");
                    ResolverResponse::error(error)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn route(&self, op: Operation, event: &ResolverEvent) -> AppResult<Value> {
        let store = self.store.as_ref();
        let validator = self.validator.as_ref();
        match op {
            Operation::Create => to_data(labor_lines::create(store, validator, event).await?),
            Operation::Update => to_data(labor_lines::update(store, validator, event).await?),
            Operation::Delete => to_data(labor_lines::delete(store, event).await?),
            Operation::Get => to_data(labor_lines::get(store, event).await?),
            Operation::List => to_data(labor_lines::list(store, event).await?),
        }
    }
}

fn to_data<T: Serialize>(value: T) -> AppResult<Value> {
    serde_json::to_value(value).map_err(|e| AppError::Internal(e.to_string()))
}

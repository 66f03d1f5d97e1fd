//! Lambda invocation handling.
//!
//! A missing table name does not stop the runtime: the handler starts in a
//! misconfigured state and answers every invocation with a
//! `ConfigurationError` envelope.

use crate::config::{ConfigError, ServiceConfig};
use crate::dispatcher::LaborLineDispatcher;
use crate::error::AppError;
use crate::event::ResolverEvent;
use crate::response::ResolverResponse;
use crate::state;

pub enum ResolverHandler {
    Ready(LaborLineDispatcher),
    Misconfigured(ConfigError),
}

impl ResolverHandler {
    /// Build the handler from the process environment.
    pub async fn from_env() -> Self {
        Self::from_config(ServiceConfig::from_env()).await
    }

    pub async fn from_config(config: Result<ServiceConfig, ConfigError>) -> Self {
        match config {
            Ok(config) => {
                tracing::info!(store = ?config.store, "Loaded resolver configuration");
                Self::Ready(state::build_dispatcher(&config).await)
            }
            Err(err) => {
                tracing::error!(error = %err, "Resolver configuration invalid");
                Self::Misconfigured(err)
            }
        }
    }

    pub async fn handle(&self, event: &ResolverEvent) -> ResolverResponse {
        match self {
            Self::Ready(dispatcher) => dispatcher.handle(event).await,
            Self::Misconfigured(err) => ResolverResponse::error(
                AppError::Config(err.clone()).into_resolver_error(false),
            ),
        }
    }
}

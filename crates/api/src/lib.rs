//! Labor lines resolver service library.
//!
//! Exposes the building blocks (config, state, resolver event and response
//! types, the operation dispatcher, and the local HTTP harness router) so
//! both binaries and the integration tests can use them.

pub mod app;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod handlers;
pub mod lambda;
pub mod response;
pub mod routes;
pub mod state;
pub mod telemetry;

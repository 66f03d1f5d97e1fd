//! Handlers for the five labor line operations.
//!
//! Each handler decodes the `input` argument, validates writes, and runs
//! the repository call. Errors carry the attempted action so the envelope
//! message names it.

use laborlines_core::error::CoreError;
use laborlines_core::labor_line::{
    CreateLaborLine, LaborLine, LaborLineKey, ListLaborLines, UpdateLaborLine, ENTITY_NAME,
};
use laborlines_core::validation::InputValidator;
use laborlines_db::repositories::LaborLineRepo;
use laborlines_db::ItemStore;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::event::ResolverEvent;

/// Message returned by a successful delete.
pub const DELETE_MESSAGE: &str = "labor line deleted successfully";

/// Payload returned by `deleteLaborLine`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteResult {
    pub success: bool,
    pub message: &'static str,
}

fn not_found(key: &LaborLineKey) -> AppError {
    CoreError::NotFound {
        entity: ENTITY_NAME,
        id: key.labor_line_id.clone(),
    }
    .into()
}

/// `createLaborLine`: validate, assign an id, insert.
pub async fn create(
    store: &dyn ItemStore,
    validator: &dyn InputValidator,
    event: &ResolverEvent,
) -> AppResult<LaborLine> {
    let input: CreateLaborLine = event.input()?;
    validator.validate_create(&input)?;

    let line = LaborLine::new(input);
    LaborLineRepo::create(store, &line)
        .await
        .map_err(AppError::store("create"))?;

    tracing::info!(
        labor_line_id = %line.labor_line_id,
        account_id = %line.account_id,
        task_id = %line.task_id,
        "Labor line created"
    );
    Ok(line)
}

/// `updateLaborLine`: validate, replace the live record, return the
/// persisted state.
pub async fn update(
    store: &dyn ItemStore,
    validator: &dyn InputValidator,
    event: &ResolverEvent,
) -> AppResult<LaborLine> {
    let input: UpdateLaborLine = event.input()?;
    validator.validate_update(&input)?;

    let key = input.key();
    let mut line = input.into_labor_line();
    LaborLineRepo::update(store, &mut line)
        .await
        .map_err(AppError::store("update"))?;

    let updated = LaborLineRepo::find_by_key(store, &key)
        .await
        .map_err(AppError::store("retrieve updated"))?
        .ok_or_else(|| not_found(&key))?;

    tracing::info!(labor_line_id = %updated.labor_line_id, "Labor line updated");
    Ok(updated)
}

/// `deleteLaborLine`: tombstone the live record.
pub async fn delete(store: &dyn ItemStore, event: &ResolverEvent) -> AppResult<DeleteResult> {
    let key: LaborLineKey = event.input()?;
    LaborLineRepo::soft_delete(store, &key)
        .await
        .map_err(AppError::store("delete"))?;

    tracing::info!(labor_line_id = %key.labor_line_id, "Labor line deleted");
    Ok(DeleteResult {
        success: true,
        message: DELETE_MESSAGE,
    })
}

/// `getLaborLine`: fetch one live record.
pub async fn get(store: &dyn ItemStore, event: &ResolverEvent) -> AppResult<LaborLine> {
    let key: LaborLineKey = event.input()?;
    LaborLineRepo::find_by_key(store, &key)
        .await
        .map_err(AppError::store("get"))?
        .ok_or_else(|| not_found(&key))
}

/// `listLaborLines`: live records for an account, optionally one task.
pub async fn list(store: &dyn ItemStore, event: &ResolverEvent) -> AppResult<Vec<LaborLine>> {
    let input: ListLaborLines = event.input()?;
    let lines = LaborLineRepo::list(store, &input.account_id, input.task_filter())
        .await
        .map_err(AppError::store("list"))?;

    tracing::debug!(
        account_id = %input.account_id,
        task_id = ?input.task_filter(),
        count = lines.len(),
        "Labor lines listed"
    );
    Ok(lines)
}

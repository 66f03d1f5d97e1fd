//! Conversion between [`LaborLine`] records and stored items.
//!
//! Lists are stored as `L` of `S`, timestamps as `N`. Empty lists and an
//! absent `deletedAt` are omitted. `PK` and `SK` are always written from the
//! record's derived key.

use aws_sdk_dynamodb::types::AttributeValue;
use laborlines_core::labor_line::LaborLine;

use crate::error::DbError;
use crate::store::{Item, DELETED_AT, PARTITION_KEY, SORT_KEY};

pub const LABOR_LINE_ID: &str = "laborLineId";
pub const CONTACT_ID: &str = "contactId";
pub const ACCOUNT_ID: &str = "accountId";
pub const TASK_ID: &str = "taskId";
pub const PART_ID: &str = "partId";
pub const NOTES: &str = "notes";
pub const CREATED_AT: &str = "createdAt";
pub const UPDATED_AT: &str = "updatedAt";

/// Encode a record as a stored item.
pub fn encode(line: &LaborLine) -> Item {
    let mut item = Item::new();
    item.insert(LABOR_LINE_ID.into(), s(&line.labor_line_id));
    item.insert(CONTACT_ID.into(), s(&line.contact_id));
    item.insert(ACCOUNT_ID.into(), s(&line.account_id));
    item.insert(TASK_ID.into(), s(&line.task_id));
    if !line.part_ids.is_empty() {
        item.insert(PART_ID.into(), string_list(&line.part_ids));
    }
    if !line.notes.is_empty() {
        item.insert(NOTES.into(), string_list(&line.notes));
    }
    item.insert(CREATED_AT.into(), n(line.created_at));
    item.insert(UPDATED_AT.into(), n(line.updated_at));
    if let Some(deleted_at) = line.deleted_at {
        item.insert(DELETED_AT.into(), n(deleted_at));
    }
    item.insert(PARTITION_KEY.into(), s(line.partition_key()));
    item.insert(SORT_KEY.into(), AttributeValue::S(line.sort_key()));
    item
}

/// Decode a stored item into a record.
///
/// Missing optional attributes decode to their empty values; missing
/// identifiers or timestamps are errors.
pub fn decode(item: &Item) -> Result<LaborLine, DbError> {
    Ok(LaborLine {
        labor_line_id: required_string(item, LABOR_LINE_ID)?,
        contact_id: optional_string(item, CONTACT_ID)?.unwrap_or_default(),
        account_id: required_string(item, ACCOUNT_ID)?,
        task_id: required_string(item, TASK_ID)?,
        part_ids: optional_string_list(item, PART_ID)?,
        notes: optional_string_list(item, NOTES)?,
        created_at: required_number(item, CREATED_AT)?,
        updated_at: required_number(item, UPDATED_AT)?,
        deleted_at: optional_number(item, DELETED_AT)?,
    })
}

fn s(value: &str) -> AttributeValue {
    AttributeValue::S(value.to_string())
}

fn n(value: i64) -> AttributeValue {
    AttributeValue::N(value.to_string())
}

fn string_list(values: &[String]) -> AttributeValue {
    AttributeValue::L(values.iter().map(|v| s(v)).collect())
}

fn optional_string(item: &Item, name: &str) -> Result<Option<String>, DbError> {
    match item.get(name) {
        None | Some(AttributeValue::Null(_)) => Ok(None),
        Some(AttributeValue::S(value)) => Ok(Some(value.clone())),
        Some(other) => Err(type_mismatch(name, "S", other)),
    }
}

fn required_string(item: &Item, name: &str) -> Result<String, DbError> {
    optional_string(item, name)?.ok_or_else(|| missing(name))
}

fn optional_number(item: &Item, name: &str) -> Result<Option<i64>, DbError> {
    match item.get(name) {
        None | Some(AttributeValue::Null(_)) => Ok(None),
        Some(AttributeValue::N(value)) => value
            .parse()
            .map(Some)
            .map_err(|e| DbError::Codec(format!("attribute {name} is not an integer: {e}"))),
        Some(other) => Err(type_mismatch(name, "N", other)),
    }
}

fn required_number(item: &Item, name: &str) -> Result<i64, DbError> {
    optional_number(item, name)?.ok_or_else(|| missing(name))
}

/// Accepts both `L` of `S` and `SS`; items written by other tooling may
/// use string sets.
fn optional_string_list(item: &Item, name: &str) -> Result<Vec<String>, DbError> {
    match item.get(name) {
        None | Some(AttributeValue::Null(_)) => Ok(Vec::new()),
        Some(AttributeValue::Ss(values)) => Ok(values.clone()),
        Some(AttributeValue::L(values)) => values
            .iter()
            .enumerate()
            .map(|(i, v)| match v {
                AttributeValue::S(value) => Ok(value.clone()),
                other => Err(type_mismatch(&format!("{name}[{i}]"), "S", other)),
            })
            .collect(),
        Some(other) => Err(type_mismatch(name, "L", other)),
    }
}

fn missing(name: &str) -> DbError {
    DbError::Codec(format!("missing attribute {name}"))
}

fn type_mismatch(name: &str, expected: &str, actual: &AttributeValue) -> DbError {
    DbError::Codec(format!(
        "attribute {name} has unexpected type (expected {expected}, got {actual:?})"
    ))
}

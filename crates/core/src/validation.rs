//! Labor line input validation.
//!
//! Validation runs in two passes over a candidate document (a JSON object
//! shaped like the stored record):
//!
//! 1. Identifier format. `laborLineId`, `accountId`, `taskId` and every
//!    `partId` element must parse as UUIDs. The first bad value aborts.
//! 2. Schema. Required properties, allowed properties, canonical UUID form
//!    (hyphenated, 36 characters), unique part ids and note lengths. Every
//!    violation is collected and reported together.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::{Map, Value};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;
use crate::labor_line::{CreateLaborLine, UpdateLaborLine};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum length of a single note, in characters.
pub const MIN_NOTE_LENGTH: usize = 1;

/// Maximum length of a single note, in characters.
pub const MAX_NOTE_LENGTH: usize = 1000;

pub const FIELD_LABOR_LINE_ID: &str = "laborLineId";
pub const FIELD_ACCOUNT_ID: &str = "accountId";
pub const FIELD_TASK_ID: &str = "taskId";
pub const FIELD_PART_ID: &str = "partId";
pub const FIELD_NOTES: &str = "notes";

/// Scalar identifier fields, checked in this order.
const IDENTIFIER_FIELDS: &[&str] = &[FIELD_LABOR_LINE_ID, FIELD_ACCOUNT_ID, FIELD_TASK_ID];

/// Every property the schema allows.
const ALLOWED_PROPERTIES: &[&str] = &[
    FIELD_LABOR_LINE_ID,
    FIELD_ACCOUNT_ID,
    FIELD_TASK_ID,
    FIELD_PART_ID,
    FIELD_NOTES,
];

// ---------------------------------------------------------------------------
// Validator seam
// ---------------------------------------------------------------------------

/// Validates mutation inputs before they reach storage.
pub trait InputValidator: Send + Sync {
    /// Validate a create input. The identifier is not caller-supplied, so a
    /// placeholder is used for the schema pass.
    fn validate_create(&self, input: &CreateLaborLine) -> Result<(), CoreError>;

    /// Validate an update input, including its caller-supplied identifier.
    fn validate_update(&self, input: &UpdateLaborLine) -> Result<(), CoreError>;
}

/// Schema-backed validator for labor line inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaborLineValidator;

impl LaborLineValidator {
    pub fn new() -> Self {
        Self
    }

    /// Run both validation passes over a candidate document.
    pub fn validate_document(&self, document: &Map<String, Value>) -> Result<(), CoreError> {
        validate_identifiers(document)?;
        validate_schema(document)
    }
}

impl InputValidator for LaborLineValidator {
    fn validate_create(&self, input: &CreateLaborLine) -> Result<(), CoreError> {
        let placeholder = uuid::Uuid::new_v4().to_string();
        self.validate_document(&create_document(input, &placeholder))
    }

    fn validate_update(&self, input: &UpdateLaborLine) -> Result<(), CoreError> {
        self.validate_document(&update_document(input))
    }
}

// ---------------------------------------------------------------------------
// Candidate documents
// ---------------------------------------------------------------------------

/// Build the candidate document for a create input.
///
/// `placeholder_id` stands in for the server-assigned identifier.
pub fn create_document(input: &CreateLaborLine, placeholder_id: &str) -> Map<String, Value> {
    build_document(
        placeholder_id,
        &input.account_id,
        &input.task_id,
        input.part_ids.as_deref(),
        input.notes.as_deref(),
    )
}

/// Build the candidate document for an update input.
pub fn update_document(input: &UpdateLaborLine) -> Map<String, Value> {
    build_document(
        &input.labor_line_id,
        &input.account_id,
        &input.task_id,
        input.part_ids.as_deref(),
        input.notes.as_deref(),
    )
}

/// Empty identifiers are left out so the schema pass reports them as missing.
fn build_document(
    labor_line_id: &str,
    account_id: &str,
    task_id: &str,
    part_ids: Option<&[String]>,
    notes: Option<&[String]>,
) -> Map<String, Value> {
    let mut document = Map::new();
    for (field, value) in [
        (FIELD_LABOR_LINE_ID, labor_line_id),
        (FIELD_ACCOUNT_ID, account_id),
        (FIELD_TASK_ID, task_id),
    ] {
        if !value.is_empty() {
            document.insert(field.to_string(), Value::String(value.to_string()));
        }
    }
    if let Some(part_ids) = part_ids {
        document.insert(FIELD_PART_ID.to_string(), string_array(part_ids));
    }
    if let Some(notes) = notes {
        document.insert(FIELD_NOTES.to_string(), string_array(notes));
    }
    document
}

fn string_array(values: &[String]) -> Value {
    Value::Array(values.iter().cloned().map(Value::String).collect())
}

// ---------------------------------------------------------------------------
// Pass 1: identifier format
// ---------------------------------------------------------------------------

/// Check identifier formats, stopping at the first failure.
///
/// Absent fields and non-string values are left to the schema pass.
pub fn validate_identifiers(document: &Map<String, Value>) -> Result<(), CoreError> {
    for field in IDENTIFIER_FIELDS {
        if let Some(Value::String(value)) = document.get(*field) {
            if uuid::Uuid::parse_str(value).is_err() {
                return Err(CoreError::Validation(format!(
                    "invalid UUID format for field {field}: {value}"
                )));
            }
        }
    }

    if let Some(Value::Array(parts)) = document.get(FIELD_PART_ID) {
        for (i, part) in parts.iter().enumerate() {
            if let Value::String(value) = part {
                if uuid::Uuid::parse_str(value).is_err() {
                    return Err(CoreError::Validation(format!(
                        "invalid UUID format for {FIELD_PART_ID}[{i}]: {value}"
                    )));
                }
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Pass 2: schema
// ---------------------------------------------------------------------------

/// Typed view of the candidate document used by the schema pass.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct LaborLineDocument {
    #[validate(required(message = "laborLineId is required"))]
    labor_line_id: Option<String>,
    #[validate(required(message = "accountId is required"))]
    account_id: Option<String>,
    #[validate(required(message = "taskId is required"))]
    task_id: Option<String>,
    #[serde(rename = "partId")]
    #[validate(custom(function = "validate_unique_part_ids"))]
    part_ids: Option<Vec<String>>,
    #[validate(custom(function = "validate_note_lengths"))]
    notes: Option<Vec<String>>,
}

/// Check the document against the schema, collecting every violation.
pub fn validate_schema(document: &Map<String, Value>) -> Result<(), CoreError> {
    let mut violations: Vec<String> = document
        .keys()
        .filter(|key| !ALLOWED_PROPERTIES.contains(&key.as_str()))
        .map(|key| format!("additional property {key} is not allowed"))
        .collect();
    violations.extend(format_violations(document));

    match serde_json::from_value::<LaborLineDocument>(Value::Object(document.clone())) {
        Ok(typed) => {
            if let Err(errors) = typed.validate() {
                violations.extend(violation_messages(&errors));
            }
        }
        Err(e) => violations.push(format!("document does not match schema: {e}")),
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("[{}]", violations.join("; "))))
    }
}

/// Identifiers that are not in canonical hyphenated form.
///
/// `Uuid::parse_str` also accepts simple, braced and URN forms; those would
/// address a different partition or sort key than the canonical spelling.
fn format_violations(document: &Map<String, Value>) -> Vec<String> {
    let mut violations = Vec::new();
    for field in IDENTIFIER_FIELDS {
        if let Some(Value::String(value)) = document.get(*field) {
            if !is_canonical_uuid(value) {
                violations.push(format!("{field} must be a hyphenated UUID: {value}"));
            }
        }
    }
    if let Some(Value::Array(parts)) = document.get(FIELD_PART_ID) {
        for (i, part) in parts.iter().enumerate() {
            if let Value::String(value) = part {
                if !is_canonical_uuid(value) {
                    violations.push(format!(
                        "{FIELD_PART_ID}[{i}] must be a hyphenated UUID: {value}"
                    ));
                }
            }
        }
    }
    violations
}

/// True for `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` in either case.
fn is_canonical_uuid(value: &str) -> bool {
    value.len() == 36
        && value
            .char_indices()
            .all(|(i, c)| match i {
                8 | 13 | 18 | 23 => c == '-',
                _ => c.is_ascii_hexdigit(),
            })
        && uuid::Uuid::parse_str(value).is_ok()
}

/// Flatten `validator` errors into sorted, human-readable messages.
fn violation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{field}: {}", e.code),
                })
                .collect::<Vec<_>>()
        })
        .collect();
    messages.sort();
    messages
}

#[allow(clippy::ptr_arg)]
fn validate_unique_part_ids(part_ids: &Vec<String>) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    let duplicates: Vec<usize> = part_ids
        .iter()
        .enumerate()
        .filter(|(_, part)| !seen.insert(part.as_str()))
        .map(|(i, _)| i)
        .collect();

    if duplicates.is_empty() {
        return Ok(());
    }
    let indices: Vec<String> = duplicates.iter().map(|i| format!("{FIELD_PART_ID}[{i}]")).collect();
    Err(ValidationError::new("unique_items").with_message(
        format!(
            "{FIELD_PART_ID} must contain unique items (duplicates at {})",
            indices.join(", ")
        )
        .into(),
    ))
}

#[allow(clippy::ptr_arg)]
fn validate_note_lengths(notes: &Vec<String>) -> Result<(), ValidationError> {
    let offending: Vec<String> = notes
        .iter()
        .enumerate()
        .filter(|(_, note)| {
            let len = note.chars().count();
            !(MIN_NOTE_LENGTH..=MAX_NOTE_LENGTH).contains(&len)
        })
        .map(|(i, _)| format!("{FIELD_NOTES}[{i}]"))
        .collect();

    if offending.is_empty() {
        return Ok(());
    }
    Err(ValidationError::new("length").with_message(
        format!(
            "{} must be between {MIN_NOTE_LENGTH} and {MAX_NOTE_LENGTH} characters",
            offending.join(", ")
        )
        .into(),
    ))
}

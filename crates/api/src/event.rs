//! Inbound resolver event.
//!
//! Mirrors the AppSync direct Lambda resolver payload. Every field defaults
//! when absent or `null` so a sparse event still routes and produces an
//! envelope instead of failing to parse.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;

/// Name of the argument carrying the operation input.
pub const INPUT_ARGUMENT: &str = "input";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolverEvent {
    pub type_name: Option<String>,
    pub field_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub arguments: Map<String, Value>,
    pub identity: Option<Value>,
    pub source: Option<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub request: ResolverRequest,
    #[serde(deserialize_with = "null_as_default")]
    pub info: ResolverInfo,
    pub prev: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolverRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub headers: HashMap<String, String>,
    pub domain_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolverInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub field_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub parent_type_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub variables: Map<String, Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub selection_set_list: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ResolverEvent {
    /// Build an event for `field_name` with the given `input` argument.
    pub fn new(parent_type_name: &str, field_name: &str, input: Value) -> Self {
        let mut arguments = Map::new();
        arguments.insert(INPUT_ARGUMENT.to_string(), input);
        Self {
            type_name: Some(parent_type_name.to_string()),
            field_name: Some(field_name.to_string()),
            arguments,
            info: ResolverInfo {
                field_name: field_name.to_string(),
                parent_type_name: parent_type_name.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Operation to route on: `info.fieldName`, else the top-level `fieldName`.
    pub fn operation_name(&self) -> &str {
        if !self.info.field_name.is_empty() {
            return &self.info.field_name;
        }
        self.field_name.as_deref().unwrap_or_default()
    }

    /// `info.parentTypeName`, else the top-level `typeName`.
    pub fn parent_type_name(&self) -> &str {
        if !self.info.parent_type_name.is_empty() {
            return &self.info.parent_type_name;
        }
        self.type_name.as_deref().unwrap_or_default()
    }

    /// Decode the `input` argument into `T`.
    ///
    /// The argument must be a JSON object; it is then decoded strictly into
    /// the typed input. A missing or `null` argument and any decode failure
    /// are [`AppError::BadInput`].
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, AppError> {
        let raw = match self.arguments.get(INPUT_ARGUMENT) {
            None | Some(Value::Null) => {
                return Err(AppError::BadInput(format!(
                    "missing {INPUT_ARGUMENT} argument"
                )))
            }
            Some(raw) => raw,
        };
        let Value::Object(map) = raw else {
            return Err(AppError::BadInput(format!(
                "{INPUT_ARGUMENT} must be an object"
            )));
        };
        serde_json::from_value(Value::Object(map.clone()))
            .map_err(|e| AppError::BadInput(e.to_string()))
    }
}

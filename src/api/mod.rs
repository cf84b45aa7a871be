//! REST API module.
//!
//! Handlers return `Result<_, AppError>` and never build error responses
//! themselves; [`AppError`]'s `IntoResponse` impl renders every failure.

mod contacts;

pub use contacts::*;

use axum::{extract::rejection::JsonRejection, Json};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::schemas::Schema;

/// Unwrap a JSON body and check it against `schema`, returning the validated
/// object (with schema defaults applied).
fn validate_body(
    body: Result<Json<Value>, JsonRejection>,
    schema: &Schema,
) -> Result<Map<String, Value>, AppError> {
    let Json(payload) = body?;
    schema.validate(&payload).map_err(AppError::Validation)
}

/// Turn a validated object into a typed request.
fn into_request<T: DeserializeOwned>(validated: Map<String, Value>) -> Result<T, AppError> {
    Ok(serde_json::from_value(Value::Object(validated))?)
}

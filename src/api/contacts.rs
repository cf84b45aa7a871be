//! Contact API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use super::{into_request, validate_body};
use crate::db::ContactStore;
use crate::errors::AppError;
use crate::models::{Contact, ContactSummary, CreateContactRequest, UpdateContactRequest};
use crate::schemas::{require_any_field, CREATE_CONTACT, UPDATE_CONTACT};
use crate::AppState;

/// GET /api/contacts - List all contacts.
pub async fn list_contacts<S: ContactStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<ContactSummary>>, AppError> {
    let contacts = state.store.list().await?;
    Ok(Json(contacts))
}

/// GET /api/contacts/{id} - Get a single contact.
pub async fn get_contact<S: ContactStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, AppError> {
    let contact = state
        .store
        .get_by_id(&id)
        .await?
        .ok_or_else(|| contact_not_found(&id))?;
    Ok(Json(contact))
}

/// POST /api/contacts - Create a new contact.
pub async fn create_contact<S: ContactStore>(
    State(state): State<AppState<S>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Contact>), AppError> {
    let validated = validate_body(body, &CREATE_CONTACT)?;
    let request: CreateContactRequest = into_request(validated)?;

    let contact = state.store.create(&request).await?;
    tracing::info!("Created contact {}", contact.id);

    Ok((StatusCode::CREATED, Json(contact)))
}

/// PUT /api/contacts/{id} - Update a contact.
pub async fn update_contact<S: ContactStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Contact>, AppError> {
    let request = update_request(body)?;

    let contact = state
        .store
        .update_by_id(&id, &request)
        .await?
        .ok_or_else(|| contact_not_found(&id))?;
    Ok(Json(contact))
}

/// PATCH /api/contacts/{id}/favorite - Set the favorite flag.
///
/// Accepts the same body as a full update, so any contact field can change
/// through this route.
pub async fn update_favorite<S: ContactStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Contact>, AppError> {
    let request = update_request(body)?;

    let contact = state
        .store
        .update_by_id(&id, &request)
        .await?
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;
    Ok(Json(contact))
}

/// DELETE /api/contacts/{id} - Delete a contact.
pub async fn delete_contact<S: ContactStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, AppError> {
    let contact = state
        .store
        .delete_by_id(&id)
        .await?
        .ok_or_else(|| contact_not_found(&id))?;
    tracing::info!("Deleted contact {}", contact.id);

    Ok(Json(contact))
}

/// Validate an update body. `{}` passes the schema but is still refused.
fn update_request(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<UpdateContactRequest, AppError> {
    let validated = validate_body(body, &UPDATE_CONTACT)?;
    require_any_field(&validated).map_err(AppError::Validation)?;
    into_request(validated)
}

fn contact_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Contact with id={} not found", id))
}

//! Path id guard.
//!
//! Runs before every handler on an `{id}` route and rejects ids that cannot
//! belong to a stored contact, so malformed ids never reach the store.

use axum::{
    extract::{Path, Request},
    middleware::Next,
    response::Response,
};

use crate::errors::AppError;
use crate::models::is_valid_contact_id;

/// Middleware rejecting requests whose `{id}` segment is not a contact id.
pub async fn is_valid_id(
    Path(id): Path<String>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    check_id(&id)?;
    Ok(next.run(request).await)
}

fn check_id(id: &str) -> Result<(), AppError> {
    if !is_valid_contact_id(id) {
        tracing::debug!("Rejected malformed contact id {:?}", id);
        return Err(AppError::BadRequest(format!("{} is not valid id", id)));
    }
    Ok(())
}

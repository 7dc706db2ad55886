//! Contact-form API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{ApiResult, MessageResponse};
use crate::errors::AppError;
use crate::models::{Contact, CreateContactRequest, UpdateContactRequest};
use crate::AppState;

/// POST /api/contact - Create a contact submission.
///
/// The validation error names every missing required field at once.
pub async fn create_contact(
    State(state): State<AppState>,
    Json(request): Json<CreateContactRequest>,
) -> ApiResult<Json<Contact>> {
    let missing = request.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let contact = state.repo.create_contact(&request).await?;
    Ok(Json(contact))
}

/// GET /api/contact - List all contacts.
pub async fn list_contacts(State(state): State<AppState>) -> ApiResult<Json<Vec<Contact>>> {
    let contacts = state.repo.list_contacts().await?;
    Ok(Json(contacts))
}

/// POST /api/contact/:id - Overwrite all editable fields of a contact.
/// Empty values are accepted; there is no re-validation on update.
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateContactRequest>,
) -> ApiResult<Json<Contact>> {
    let contact = state.repo.update_contact(&id, &request).await?;
    Ok(Json(contact))
}

/// DELETE /api/contact/delete/:id - Delete a contact.
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.repo.delete_contact(&id).await?;
    Ok(Json(MessageResponse::new("Contact deleted successfully")))
}

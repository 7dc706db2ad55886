//! Admin API endpoints, including the credential-check login route.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use subtle::ConstantTimeEq;

use super::{ApiResult, MessageResponse};
use crate::errors::AppError;
use crate::models::{Admin, CreateAdminRequest, LoginRequest, LoginResponse, UpdateAdminRequest};
use crate::AppState;

/// POST /api/admins - Create a new admin.
///
/// The username-uniqueness check is read-then-write; the schema's UNIQUE
/// index backstops a lost race.
pub async fn create_admin(
    State(state): State<AppState>,
    Json(request): Json<CreateAdminRequest>,
) -> ApiResult<(StatusCode, Json<Admin>)> {
    if request.name.trim().is_empty()
        || request.username.trim().is_empty()
        || request.password.trim().is_empty()
    {
        return Err(AppError::Validation(
            "name, username and password are required".to_string(),
        ));
    }

    if state
        .repo
        .find_admin_by_username(&request.username)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Username already exists".to_string()));
    }

    let admin = state.repo.create_admin(&request).await?;
    Ok((StatusCode::CREATED, Json(admin)))
}

/// GET /api/admins - List all admins. Password fields are served as stored.
pub async fn list_admins(State(state): State<AppState>) -> ApiResult<Json<Vec<Admin>>> {
    let admins = state.repo.list_admins().await?;
    Ok(Json(admins))
}

/// POST /api/admins/edit/:id - Overwrite all four fields of an admin.
pub async fn update_admin(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateAdminRequest>,
) -> ApiResult<Json<Admin>> {
    // Conflict only when the username belongs to a different admin.
    if let Some(existing) = state.repo.find_admin_by_username(&request.username).await? {
        if existing.id != id {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }
    }

    let admin = state.repo.update_admin(&id, &request).await?;
    Ok(Json(admin))
}

/// DELETE /api/admins/delete/:id - Delete an admin.
pub async fn delete_admin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.repo.delete_admin(&id).await?;
    Ok(Json(MessageResponse::new("Admin deleted successfully")))
}

/// POST /api/login - Check credentials.
///
/// Exact, case-sensitive comparison of the stored plaintext password,
/// executed in constant time. No session or token is issued.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let admin = state
        .repo
        .find_admin_by_username(&request.username)
        .await?
        .ok_or_else(|| AppError::NotFound("Admin not found".to_string()))?;

    let matches: bool = admin
        .password
        .as_bytes()
        .ct_eq(request.password.as_bytes())
        .into();

    if !matches {
        return Err(AppError::Unauthorized("Incorrect password".to_string()));
    }

    Ok(Json(LoginResponse { success: true }))
}

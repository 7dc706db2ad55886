//! Team roster API endpoints.
//!
//! Uploaded photos are matched to members positionally: a part named
//! `image<i>` belongs to the member at index `i` of the `members` JSON part.

use std::collections::HashMap;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};

use super::{ApiResult, MessageResponse};
use crate::errors::AppError;
use crate::models::{Member, MemberInput, Team};
use crate::storage::StoredFile;
use crate::AppState;

/// A drained team multipart request: title, raw members JSON, and the
/// member-index → stored-upload map built once per request. Parts whose name
/// does not parse as `image<usize>` carry no file for any member and are
/// ignored.
struct TeamRequest {
    title: String,
    members: Vec<MemberInput>,
    files: HashMap<usize, StoredFile>,
}

async fn read_team_request(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<TeamRequest, AppError> {
    let mut title = String::new();
    let mut members_json = None;
    let mut files = HashMap::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "title" => title = field.text().await?,
            "members" => members_json = Some(field.text().await?),
            other => {
                let Some(index) = other
                    .strip_prefix("image")
                    .and_then(|i| i.parse::<usize>().ok())
                else {
                    continue;
                };

                let file_name = field.file_name().unwrap_or("image").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await?;
                let stored = state.uploads.store(&file_name, &mime_type, &data).await?;
                files.insert(index, stored);
            }
        }
    }

    let members_json =
        members_json.ok_or_else(|| AppError::Validation("members is required".to_string()))?;
    let members: Vec<MemberInput> = serde_json::from_str(&members_json)?;

    Ok(TeamRequest {
        title,
        members,
        files,
    })
}

/// POST /api/team - Create a roster group. A member with no matching upload
/// gets an empty image path.
pub async fn create_team(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<Team>)> {
    let request = read_team_request(&state, multipart).await?;

    let members: Vec<Member> = request
        .members
        .iter()
        .enumerate()
        .map(|(i, m)| Member {
            name: m.name.clone(),
            subtitle: m.subtitle.clone(),
            image_path: request
                .files
                .get(&i)
                .map(|f| f.path.clone())
                .unwrap_or_default(),
        })
        .collect();

    let team = state.repo.create_team(&request.title, &members).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

/// GET /api/team - List all roster groups.
pub async fn list_teams(State(state): State<AppState>) -> ApiResult<Json<Vec<Team>>> {
    let teams = state.repo.list_teams().await?;
    Ok(Json(teams))
}

/// PUT /api/team/:id - Fully replace a roster group. A member with no
/// matching upload keeps the image path submitted in the request body.
pub async fn update_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> ApiResult<Json<Team>> {
    let request = read_team_request(&state, multipart).await?;

    let members: Vec<Member> = request
        .members
        .iter()
        .enumerate()
        .map(|(i, m)| Member {
            name: m.name.clone(),
            subtitle: m.subtitle.clone(),
            image_path: request
                .files
                .get(&i)
                .map(|f| f.path.clone())
                .unwrap_or_else(|| m.image_path.clone().unwrap_or_default()),
        })
        .collect();

    let team = state
        .repo
        .update_team(&id, &request.title, &members)
        .await?
        .ok_or_else(|| AppError::NotFound("Team not found".to_string()))?;

    Ok(Json(team))
}

/// DELETE /api/team/:id - Delete a roster group. Deleting an id with no
/// matching record is a no-op success.
pub async fn delete_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.repo.delete_team(&id).await?;
    Ok(Json(MessageResponse::new("Deleted successfully")))
}

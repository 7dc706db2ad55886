//! Event API endpoints.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};

use super::{ApiResult, MessageResponse};
use crate::errors::AppError;
use crate::models::{Event, NewEvent};
use crate::AppState;

/// POST /api/events - Create a new event with its image.
///
/// The multipart request is drained into a typed draft before any store
/// access. The image part is required; without it the request fails with a
/// controlled 400.
pub async fn create_event(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<Event>)> {
    let mut draft = NewEvent::default();
    let mut image = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "image" => {
                let file_name = field.file_name().unwrap_or("image").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await?;
                image = Some(state.uploads.store(&file_name, &mime_type, &data).await?);
            }
            "teamSize" => {
                let text = field.text().await?;
                if !text.trim().is_empty() {
                    draft.team_size = Some(text.trim().parse().map_err(|_| {
                        AppError::Validation("teamSize must be a number".to_string())
                    })?);
                }
            }
            other => {
                let text = field.text().await?;
                match other {
                    "schedule" => draft.schedule = Some(text),
                    "venue" => draft.venue = Some(text),
                    "title" => draft.title = Some(text),
                    "type" => draft.event_type = Some(text),
                    "fee" => draft.fee = Some(text),
                    "description" => draft.description = Some(text),
                    "community" => draft.community = Some(text),
                    "registerLink" => draft.register_link = Some(text),
                    "paymentName" => draft.payment_name = Some(text),
                    "prize" => draft.prize = Some(text),
                    "duration" => draft.duration = Some(text),
                    _ => {}
                }
            }
        }
    }

    let image =
        image.ok_or_else(|| AppError::Validation("Image file is required".to_string()))?;
    draft.image_path = image.path;
    draft.image_mime_type = image.mime_type;

    let event = state.repo.create_event(&draft).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/events - List all events.
pub async fn list_events(State(state): State<AppState>) -> ApiResult<Json<Vec<Event>>> {
    let events = state.repo.list_events().await?;
    Ok(Json(events))
}

/// DELETE /api/events/delete/:id - Delete an event and its image blob.
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    // Format check runs before any store access.
    if uuid::Uuid::parse_str(&id).is_err() {
        return Err(AppError::Validation("Invalid ID".to_string()));
    }

    let event = state
        .repo
        .get_event(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    state.repo.delete_event(&id).await?;

    // Blob removal is best-effort; the record is already gone.
    if let Err(e) = state.uploads.remove(&event.image_path).await {
        tracing::warn!("Failed to remove event image {}: {}", event.image_path, e);
    }

    Ok(Json(MessageResponse::new("Event deleted successfully")))
}

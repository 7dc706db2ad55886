//! System-data (site configuration) API endpoints.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};

use super::ApiResult;
use crate::models::{SystemData, SystemDataInput};
use crate::AppState;

/// POST /system-data - Create or fully replace the singleton record.
///
/// JSON-encoded string parts are parsed into typed values before the write;
/// malformed JSON fails with 400. An absent part keeps its default value,
/// and an absent logo/video file leaves the stored path empty — callers must
/// resend the entire configuration on every write.
pub async fn upsert_system_data(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<SystemData>)> {
    let mut input = SystemDataInput::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "socialMediaLinks" => {
                input.social_media_links = serde_json::from_str(&field.text().await?)?;
            }
            "milestones" => {
                input.milestones = serde_json::from_str(&field.text().await?)?;
            }
            "officeDetails" => {
                input.office_details = serde_json::from_str(&field.text().await?)?;
            }
            "logoName" => {
                input.logo.name = field.text().await?;
            }
            "logo" => {
                let file_name = field.file_name().unwrap_or("logo").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await?;
                let stored = state.uploads.store(&file_name, &mime_type, &data).await?;
                input.logo.image_path = stored.path;
            }
            "video" => {
                let file_name = field.file_name().unwrap_or("video").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await?;
                let stored = state.uploads.store(&file_name, &mime_type, &data).await?;
                input.promo_video_path = stored.path;
            }
            _ => {}
        }
    }

    let (data, created) = state.repo.upsert_system_data(&input).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(data)))
}

/// GET /system-data - Fetch the singleton record, or `null` if it was never
/// created.
pub async fn get_system_data(
    State(state): State<AppState>,
) -> ApiResult<Json<Option<SystemData>>> {
    let data = state.repo.get_system_data().await?;
    Ok(Json(data))
}

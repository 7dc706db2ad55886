//! Event model.

use serde::{Deserialize, Serialize};

/// A community event with one associated image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub register_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prize: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_size: Option<i64>,
    /// Relative path of the stored image, forward slashes only.
    /// Set at creation and never mutated.
    pub image_path: String,
    pub image_mime_type: String,
}

/// Validated input for creating a new event, assembled from the multipart
/// request before any store access.
#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    pub schedule: Option<String>,
    pub venue: Option<String>,
    pub title: Option<String>,
    pub event_type: Option<String>,
    pub fee: Option<String>,
    pub description: Option<String>,
    pub community: Option<String>,
    pub register_link: Option<String>,
    pub payment_name: Option<String>,
    pub prize: Option<String>,
    pub duration: Option<String>,
    pub team_size: Option<i64>,
    pub image_path: String,
    pub image_mime_type: String,
}

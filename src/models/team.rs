//! Team roster ("designation") model.

use serde::{Deserialize, Serialize};

/// A member of a designation. Members have no lifecycle of their own; they
/// are stored inline in their parent team and deleted with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub name: String,
    pub subtitle: String,
    pub image_path: String,
}

/// A named group of members, e.g. "Founder" or "Core Team".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub title: String,
    pub members: Vec<Member>,
}

/// One member descriptor as sent in the `members` JSON part of a team
/// request. `imagePath` carries the previously stored path on updates, so a
/// member whose photo was not re-uploaded keeps it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInput {
    pub name: String,
    pub subtitle: String,
    #[serde(default)]
    pub image_path: Option<String>,
}

//! Site-wide configuration ("system data") model.
//!
//! At most one SystemData record ever exists; every write is a full replace.

use serde::{Deserialize, Serialize};

/// Social media links shown in the site footer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

/// A milestone counter, e.g. `{"title": "Users", "value": "100+"}`.
/// Owned by SystemData, ordered, no uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub title: String,
    pub value: String,
}

/// Site logo asset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logo {
    pub name: String,
    pub image_path: String,
}

/// Office contact details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeDetails {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub email: String,
}

/// The singleton site configuration record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemData {
    pub social_media_links: SocialMediaLinks,
    pub milestones: Vec<Milestone>,
    pub logo: Logo,
    pub office_details: OfficeDetails,
    pub promo_video_path: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Validated input for the system-data upsert, assembled from the multipart
/// request. Absent file parts leave the corresponding path empty, which
/// wipes any previously stored asset path on overwrite.
#[derive(Debug, Clone, Default)]
pub struct SystemDataInput {
    pub social_media_links: SocialMediaLinks,
    pub milestones: Vec<Milestone>,
    pub logo: Logo,
    pub office_details: OfficeDetails,
    pub promo_video_path: String,
}

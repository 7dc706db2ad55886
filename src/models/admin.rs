//! Administrator account model.

use serde::{Deserialize, Serialize};

/// Role of an administrator account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    Superadmin,
    Moderator,
    Viewer,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Superadmin => "superadmin",
            AdminRole::Moderator => "moderator",
            AdminRole::Viewer => "viewer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "superadmin" => Some(AdminRole::Superadmin),
            "moderator" => Some(AdminRole::Moderator),
            "viewer" => Some(AdminRole::Viewer),
            _ => None,
        }
    }
}

impl Default for AdminRole {
    fn default() -> Self {
        AdminRole::Moderator
    }
}

/// An administrator account.
///
/// The password is stored and served as the plaintext string supplied at
/// creation. This matches the stored-data contract of the existing system
/// and is a known security gap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: String,
    pub name: String,
    pub username: String,
    pub role: AdminRole,
    pub password: String,
}

/// Request body for creating a new admin.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub role: AdminRole,
    pub password: String,
}

/// Request body for updating an existing admin. All four fields are
/// overwritten unconditionally.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminRequest {
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub role: AdminRole,
    pub password: String,
}

/// Request body for the login endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response body for a successful login. No session or token is issued.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [AdminRole::Superadmin, AdminRole::Moderator, AdminRole::Viewer] {
            assert_eq!(AdminRole::from_str(role.as_str()), Some(role));
        }
        assert_eq!(AdminRole::from_str("root"), None);
    }

    #[test]
    fn test_role_defaults_to_moderator() {
        let req: CreateAdminRequest = serde_json::from_str(
            r#"{"name":"A","username":"a","password":"pw"}"#,
        )
        .unwrap();
        assert_eq!(req.role, AdminRole::Moderator);
    }
}

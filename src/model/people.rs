//! Administrative accounts and staff directory entries.

use serde::{Deserialize, Serialize};

/// Role defining what an account may do in the admin area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    /// Full access, including user management and settings
    Admin,
    /// Can manage content but not accounts
    Editor,
    Guest,
}

/// Administrative account.
///
/// `password` is only present in the users bucket; the session copy is
/// always written without it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub full_name: String,
    pub role: UserRole,
    #[serde(default)]
    pub email: String,
}

impl User {
    /// Copy of this user with the secret removed.
    pub fn without_secret(&self) -> User {
        User {
            password: None,
            ..self.clone()
        }
    }

    /// Whether `identifier` names this account.
    ///
    /// Username comparison is exact; email comparison ignores case.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        if self.username == identifier {
            return true;
        }
        !self.email.is_empty() && self.email.to_lowercase() == identifier.to_lowercase()
    }

    pub fn can_manage_users(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn can_edit_content(&self) -> bool {
        matches!(self.role, UserRole::Admin | UserRole::Editor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    #[serde(default)]
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_date: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub order: i64,
}

//! Wire types for the user-management endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    #[serde(alias = "user")]
    Basic,
    Admin,
}

impl UserRole {
    pub fn is_admin(self) -> bool {
        self == Self::Admin
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Admin => "Admin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UserStatus {
    #[default]
    #[serde(rename = "live", alias = "active")]
    Active,
    #[serde(rename = "deactivated", alias = "inactive")]
    Inactive,
}

impl UserStatus {
    pub fn is_active(self) -> bool {
        self == Self::Active
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

/// A signed-up user as listed by the backend. Email is the mutation key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
}

impl User {
    pub fn new(email: impl Into<String>, role: UserRole, status: UserStatus) -> Self {
        Self {
            id: None,
            email: email.into(),
            role,
            status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitedUser {
    pub email: String,
}

/// Body of every single-user mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserByEmail {
    pub user_email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkAddRequest {
    pub emails: Vec<String>,
}

fn one_page() -> u32 {
    1
}

/// `GET /manage/users` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub accepted: Vec<User>,
    #[serde(default)]
    pub invited: Vec<InvitedUser>,
    #[serde(default = "one_page")]
    pub accepted_pages: u32,
}

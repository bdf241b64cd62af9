use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::authz::Role;

/// Public directory entry, safe to hand back over the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    #[schema(example = "Priya Nair")]
    pub name: String,
    #[schema(example = "priya.nair@orgscope.dev")]
    pub email: String,
    /// None when the directory record carries no recognized role.
    pub role: Option<Role>,
    #[schema(example = "Pune")]
    pub center: Option<String>,
    #[schema(example = "Software")]
    pub department: Option<String>,
    pub reports_to: Option<Uuid>,
}

/// Internal directory record. Carries the credential hash and never leaves
/// the process.
#[derive(Debug, Clone)]
pub struct DirectoryUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Option<Role>,
    pub center: Option<String>,
    pub department: Option<String>,
    pub reports_to: Option<Uuid>,
}

impl From<&DirectoryUser> for User {
    fn from(value: &DirectoryUser) -> Self {
        User {
            id: value.id,
            name: value.name.clone(),
            email: value.email.clone(),
            role: value.role,
            center: value.center.clone(),
            department: value.department.clone(),
            reports_to: value.reports_to,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "priya.nair@orgscope.dev")]
    pub email: String,
    #[schema(example = "Portal#2024")]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

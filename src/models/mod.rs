// teamflow-service/src/models/mod.rs
use actix_web::{HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

// Invitation module
pub mod invitations;
pub use invitations::*;

// Activity log module
pub mod activity;
pub use activity::*;

// Team models
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub is_deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// The owner is not stored on the team: it is the single OWNER membership.
// This is the wire shape with the derived ownerId filled in.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TeamView {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub is_deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Roles are a closed set; ordering is MEMBER < ADMIN < OWNER.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TeamRole {
    #[serde(rename = "MEMBER")]
    Member = 0,
    #[serde(rename = "ADMIN")]
    Admin = 1,
    #[serde(rename = "OWNER")]
    Owner = 2,
}

impl TeamRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamRole::Member => "MEMBER",
            TeamRole::Admin => "ADMIN",
            TeamRole::Owner => "OWNER",
        }
    }
}

impl fmt::Display for TeamRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub team_id: String,
    pub role: TeamRole,
    pub joined_at: DateTime<Utc>,
}

// Member list entry with the user resolved through identity lookup
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: UserSummary,
    pub role: TeamRole,
    pub joined_at: DateTime<Utc>,
}

// Entry of GET /teams/my-teams: the caller's membership with its team embedded
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MyTeamView {
    #[serde(rename = "_id")]
    pub id: String,
    pub team_id: TeamView,
    pub user_role: TeamRole,
    pub joined_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TeamData {
    pub name: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRoleRequest {
    pub user_id: String,
    pub new_role: TeamRole,
}

#[derive(Deserialize, Debug)]
pub struct ActivityQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

// User models for authentication
#[derive(Deserialize, Debug)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UserCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: String,
    pub profile_image: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

// What the API exposes about a user; the password hash never leaves storage.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl User {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            profile_image: self.profile_image.clone(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummary,
}

// JWT claims structure for authentication
#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub email: String,
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued at
}

// Custom error types
#[derive(Debug, Display)]
pub enum ServiceError {
    #[display(fmt = "Internal Server Error")]
    InternalServerError,
    #[display(fmt = "Validation: {}", _0)]
    Validation(String),
    #[display(fmt = "Unauthorized")]
    Unauthorized,
    #[display(fmt = "Forbidden")]
    Forbidden,
    #[display(fmt = "Not Found")]
    NotFound,
    #[display(fmt = "Conflict: {}", _0)]
    Conflict(String),
    #[display(fmt = "Gone: {}", _0)]
    Gone(String),
}

impl std::error::Error for ServiceError {}

// The client surfaces err.response.data.message, so every error body
// carries a message field.
impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::InternalServerError => HttpResponse::InternalServerError()
                .json(json!({ "message": "Internal server error" })),
            ServiceError::Validation(ref message) => {
                HttpResponse::BadRequest().json(json!({ "message": message }))
            }
            ServiceError::Unauthorized => {
                HttpResponse::Unauthorized().json(json!({ "message": "Unauthorized" }))
            }
            ServiceError::Forbidden => HttpResponse::Forbidden().json(json!({
                "message": "Forbidden: You don't have permission to perform this action"
            })),
            ServiceError::NotFound => {
                HttpResponse::NotFound().json(json!({ "message": "Not found" }))
            }
            ServiceError::Conflict(ref message) => {
                HttpResponse::Conflict().json(json!({ "message": message }))
            }
            ServiceError::Gone(ref message) => {
                HttpResponse::Gone().json(json!({ "message": message }))
            }
        }
    }
}

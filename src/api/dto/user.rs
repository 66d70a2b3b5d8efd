//! User-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::User;
use crate::services::{CreateUser, UserPatch};

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for `POST /user`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255, message = "Username must be 1-255 characters"))]
    #[schema(example = "user1", max_length = 255)]
    pub username: String,
    #[validate(length(min = 1, max = 255, message = "First name must be 1-255 characters"))]
    #[schema(example = "John", max_length = 255)]
    pub first_name: String,
    #[validate(length(min = 1, max = 255, message = "Last name must be 1-255 characters"))]
    #[schema(example = "Doe", max_length = 255)]
    pub last_name: String,
    #[validate(
        email(message = "Invalid email format"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    #[schema(format = "email", example = "john.doe@example.com", max_length = 255)]
    pub email: String,
    #[validate(length(min = 1, max = 255, message = "Password must be 1-255 characters"))]
    #[schema(format = "password", example = "password", max_length = 255)]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 64, message = "Phone must be at most 64 characters"))]
    #[schema(example = "1234567890", max_length = 64)]
    pub phone: String,
    #[serde(default)]
    #[schema(example = 1)]
    pub user_status: i32,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            username: req.username,
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
            phone: req.phone,
            user_status: req.user_status,
        }
    }
}

/// Request body for `PATCH /user/{username}`; omitted fields are left as is.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255, message = "First name must be 1-255 characters"))]
    #[schema(max_length = 255)]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Last name must be 1-255 characters"))]
    #[schema(max_length = 255)]
    pub last_name: Option<String>,
    #[validate(
        email(message = "Invalid email format"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    #[schema(format = "email", max_length = 255)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Password must be 1-255 characters"))]
    #[schema(format = "password", max_length = 255)]
    pub password: Option<String>,
    #[validate(length(max = 64, message = "Phone must be at most 64 characters"))]
    #[schema(max_length = 64)]
    pub phone: Option<String>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
            phone: req.phone,
        }
    }
}

/// Query string for `GET /user/login`.
#[derive(Debug, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct LoginQuery {
    /// The user name for login
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// The password for login in clear text
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Full user record minus the password hash.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub user_status: i32,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: jiff::Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            user_status: user.user_status,
            created_at: user.created_at.to_jiff(),
            updated_at: user.updated_at.to_jiff(),
        }
    }
}

/// Public profile returned by lookup and update.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserProfileResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub username: String,
    pub email: String,
    /// HS256 JWT; no route currently requires it
    pub access_token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Logged out successfully")]
    pub message: String,
}

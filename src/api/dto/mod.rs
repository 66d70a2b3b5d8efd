//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `user` - account requests and redacted user views
//! - `video` - videos with their notes
//! - `health` - health probe bodies
//! - `error` - the common error body

mod error;
mod health;
mod user;
mod video;

pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use user::{
    CreateUserRequest, LoginQuery, LoginResponse, MessageResponse, UpdateUserRequest,
    UserProfileResponse, UserResponse,
};
pub use video::{CreateVideoRequest, NoteInput, NoteResponse, VideoListQuery, VideoResponse};

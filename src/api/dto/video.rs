//! Video and note DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppResult;
use crate::models::{Note, VideoWithNotes};
use crate::services::{CreateVideo, NoteDraft};
use crate::utils::validate::{parse_uuid, validate_uuid};

/// One note in a `POST /videos` body.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct NoteInput {
    /// Position in the video, e.g. `00:01:30`. Not parsed.
    #[validate(length(max = 64, message = "Timestamp must be at most 64 characters"))]
    #[schema(example = "00:01:30", max_length = 64)]
    pub timestamp: String,
    #[schema(example = "Ownership moves the value")]
    pub note: String,
}

impl From<NoteInput> for NoteDraft {
    fn from(input: NoteInput) -> Self {
        Self {
            timestamp: input.timestamp,
            note: input.note,
        }
    }
}

/// Request body for `POST /videos`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    #[validate(custom(function = "validate_uuid"))]
    #[schema(format = "uuid")]
    pub user_id: String,
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    #[schema(max_length = 255)]
    pub title: String,
    pub description: String,
    #[validate(length(max = 255, message = "Subject must be at most 255 characters"))]
    #[schema(max_length = 255)]
    pub subject: String,
    #[serde(default)]
    #[validate(nested)]
    pub notes: Vec<NoteInput>,
}

impl CreateVideoRequest {
    /// Converts into the service input; `user_id` has already passed
    /// `validate_uuid` but is parsed again rather than trusted.
    pub fn into_input(self) -> AppResult<CreateVideo> {
        Ok(CreateVideo {
            user_id: parse_uuid(&self.user_id)?,
            title: self.title,
            description: self.description,
            subject: self.subject,
            notes: self.notes.into_iter().map(NoteDraft::from).collect(),
        })
    }
}

/// Query string for `GET /videos`.
#[derive(Debug, Deserialize, IntoParams, Validate)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct VideoListQuery {
    /// Owner whose videos are listed
    #[validate(custom(function = "validate_uuid"))]
    pub user_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub id: Uuid,
    pub video_id: Uuid,
    pub timestamp: String,
    pub note: String,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            video_id: note.video_id,
            timestamp: note.timestamp,
            note: note.note,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    pub video_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub subject: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
    pub notes: Vec<NoteResponse>,
}

impl From<VideoWithNotes> for VideoResponse {
    fn from(VideoWithNotes { video, notes }: VideoWithNotes) -> Self {
        Self {
            video_id: video.video_id,
            user_id: video.user_id,
            title: video.title,
            description: video.description,
            subject: video.subject,
            created_at: video.created_at.to_jiff(),
            notes: notes.into_iter().map(NoteResponse::from).collect(),
        }
    }
}

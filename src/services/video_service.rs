//! Video service: creation with notes, lookup by id or owner, deletion.

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{NewNote, NewVideo, VideoWithNotes};
use crate::repositories::{UserRepository, VideoRepository};

/// One note supplied when creating a video.
#[derive(Debug, Clone)]
pub struct NoteDraft {
    /// Free-form position marker, e.g. `"00:01:30"`; not parsed.
    pub timestamp: String,
    pub note: String,
}

#[derive(Debug, Clone)]
pub struct CreateVideo {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub subject: String,
    pub notes: Vec<NoteDraft>,
}

impl CreateVideo {
    /// Splits the input into insert rows, assigning fresh ids and keeping
    /// the notes in the order they were given.
    pub fn into_rows(self, video_id: Uuid) -> (NewVideo, Vec<NewNote>) {
        let notes = self
            .notes
            .into_iter()
            .enumerate()
            .map(|(position, draft)| NewNote {
                id: Uuid::new_v4(),
                video_id,
                position: position as i32,
                timestamp: draft.timestamp,
                note: draft.note,
            })
            .collect();

        let video = NewVideo {
            video_id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            subject: self.subject,
        };

        (video, notes)
    }
}

#[derive(Clone)]
pub struct VideoService {
    videos: VideoRepository,
    users: UserRepository,
}

impl VideoService {
    pub fn new(videos: VideoRepository, users: UserRepository) -> Self {
        Self { videos, users }
    }

    /// Creates a video and its notes in one transaction.
    ///
    /// Fails with `NotFound` if the owner does not exist, including when it
    /// is deleted between the check and the insert.
    pub async fn create_video(&self, input: CreateVideo) -> AppResult<VideoWithNotes> {
        let owner = input.user_id;
        if !self.users.exists(owner).await? {
            return Err(AppError::not_found("user", "id", owner));
        }

        let (video, notes) = input.into_rows(Uuid::new_v4());
        let created = self
            .videos
            .create_with_notes(video, notes)
            .await
            .map_err(|e| missing_owner(e, owner))?;

        tracing::info!(
            video_id = %created.video.video_id,
            user_id = %created.video.user_id,
            note_count = created.notes.len(),
            "Video created"
        );
        Ok(created)
    }

    /// All videos owned by `user_id`; an unknown owner yields an empty list.
    pub async fn find_all_by_user(&self, user_id: Uuid) -> AppResult<Vec<VideoWithNotes>> {
        self.videos.find_by_user(user_id).await
    }

    /// The video with `video_id`, or `None`.
    pub async fn find_one(&self, video_id: Uuid) -> AppResult<Option<VideoWithNotes>> {
        self.videos.find_by_id(video_id).await
    }

    /// Deletes a video; its notes are removed with it.
    pub async fn delete_video(&self, video_id: Uuid) -> AppResult<()> {
        let affected = self.videos.delete(video_id).await?;
        if affected == 0 {
            return Err(AppError::not_found("video", "videoId", video_id));
        }

        tracing::info!(video_id = %video_id, "Video deleted");
        Ok(())
    }
}

/// The owner foreign key failing means the user is gone.
fn missing_owner(err: AppError, owner: Uuid) -> AppError {
    match err {
        AppError::Validation { field, .. } if field == "user_id" => {
            AppError::not_found("user", "id", owner)
        }
        other => other,
    }
}

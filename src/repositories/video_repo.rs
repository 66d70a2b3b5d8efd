//! Video repository for async database operations.
//!
//! Videos and their notes are written together in a single transaction and
//! read back together, notes ordered by `position`.

use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewNote, NewVideo, Note, Video, VideoWithNotes};

/// Video repository holding an async connection pool.
#[derive(Clone)]
pub struct VideoRepository {
    pool: AsyncDbPool,
}

impl VideoRepository {
    /// Creates a new VideoRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Inserts a video and all of its notes atomically.
    ///
    /// If any note insert fails the video insert is rolled back as well, so
    /// readers never observe a video without its notes.
    pub async fn create_with_notes(
        &self,
        new_video: NewVideo,
        new_notes: Vec<NewNote>,
    ) -> Result<VideoWithNotes, AppError> {
        use crate::schema::{notes, videos};
        let mut conn = self.pool.get().await?;

        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                let video = diesel::insert_into(videos::table)
                    .values(&new_video)
                    .returning(Video::as_returning())
                    .get_result(conn)
                    .await?;

                let mut inserted = if new_notes.is_empty() {
                    Vec::new()
                } else {
                    diesel::insert_into(notes::table)
                        .values(&new_notes)
                        .returning(Note::as_returning())
                        .get_results(conn)
                        .await?
                };
                inserted.sort_by_key(|n| n.position);

                Ok(VideoWithNotes {
                    video,
                    notes: inserted,
                })
            }
            .scope_boxed()
        })
        .await
    }

    /// Finds a video by id together with its notes.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<VideoWithNotes>, AppError> {
        use crate::schema::{notes, videos};
        let mut conn = self.pool.get().await?;

        let video = videos::table
            .filter(videos::video_id.eq(id))
            .select(Video::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        let Some(video) = video else {
            return Ok(None);
        };

        let video_notes = Note::belonging_to(&video)
            .select(Note::as_select())
            .order(notes::position.asc())
            .load(&mut conn)
            .await?;

        Ok(Some(VideoWithNotes {
            video,
            notes: video_notes,
        }))
    }

    /// Lists every video owned by `owner`, oldest first, each with its notes.
    pub async fn find_by_user(&self, owner: Uuid) -> Result<Vec<VideoWithNotes>, AppError> {
        use crate::schema::{notes, videos};
        let mut conn = self.pool.get().await?;

        let owned: Vec<Video> = videos::table
            .filter(videos::user_id.eq(owner))
            .select(Video::as_select())
            .order((videos::created_at.asc(), videos::video_id.asc()))
            .load(&mut conn)
            .await?;

        if owned.is_empty() {
            return Ok(Vec::new());
        }

        let all_notes: Vec<Note> = Note::belonging_to(&owned)
            .select(Note::as_select())
            .order(notes::position.asc())
            .load(&mut conn)
            .await?;

        Ok(all_notes
            .grouped_by(&owned)
            .into_iter()
            .zip(owned)
            .map(|(notes, video)| VideoWithNotes { video, notes })
            .collect())
    }

    /// Deletes a video; its notes are removed by `ON DELETE CASCADE`.
    ///
    /// Returns the number of affected rows (0 or 1).
    pub async fn delete(&self, id: Uuid) -> Result<usize, AppError> {
        use crate::schema::videos::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(videos.filter(video_id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}

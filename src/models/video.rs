//! Video and note models for database operations.
//!
//! A video owns its notes through `notes.video_id`; both rows are written in
//! one transaction by the video repository.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

/// Video query model for SELECT operations
#[derive(Debug, Queryable, Selectable, Identifiable, Clone)]
#[diesel(table_name = crate::schema::videos)]
#[diesel(primary_key(video_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Video {
    pub video_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub subject: String,
    pub created_at: Timestamp,
}

/// NewVideo insert model for INSERT operations
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::videos)]
pub struct NewVideo {
    pub video_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub subject: String,
}

/// Note query model, always loaded in `position` order
#[derive(Debug, Queryable, Selectable, Identifiable, Associations, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::notes)]
#[diesel(belongs_to(Video, foreign_key = video_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Note {
    pub id: Uuid,
    pub video_id: Uuid,
    pub position: i32,
    pub timestamp: String,
    pub note: String,
}

/// NewNote insert model for bulk INSERT operations
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::notes)]
pub struct NewNote {
    pub id: Uuid,
    pub video_id: Uuid,
    pub position: i32,
    pub timestamp: String,
    pub note: String,
}

/// A video together with its notes.
#[derive(Debug, Clone)]
pub struct VideoWithNotes {
    pub video: Video,
    pub notes: Vec<Note>,
}

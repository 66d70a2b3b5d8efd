//! Repository layer for data access operations.
//!
//! Provides async CRUD operations for users, videos and notes.

mod user_repo;
mod video_repo;

pub use user_repo::UserRepository;
pub use video_repo::VideoRepository;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub users: UserRepository,
    pub videos: VideoRepository,
}

impl Repositories {
    /// Creates a new Repositories instance with all repositories initialized.
    ///
    /// # Arguments
    /// * `pool` - The async database connection pool
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            videos: VideoRepository::new(pool),
        }
    }
}

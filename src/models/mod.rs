mod user;
mod video;

pub use user::{NewUser, UpdateUser, User};
pub use video::{NewNote, NewVideo, Note, Video, VideoWithNotes};

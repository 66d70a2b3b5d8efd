use utoipa::OpenApi;

pub const USER_TAG: &str = "User";
pub const VIDEO_TAG: &str = "Video";
pub const HEALTH_TAG: &str = "Health";

/// Base document; paths are contributed by the handler routers.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vidnote",
        description = "User accounts and timestamped notes on videos",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::api::dto::NoteInput,
            crate::api::dto::NoteResponse,
        )
    ),
    tags(
        (name = USER_TAG, description = "User accounts and credential checks"),
        (name = VIDEO_TAG, description = "Videos and their notes"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

//! Video handlers. Notes are created and returned together with their video.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::VIDEO_TAG;
use crate::api::dto::{CreateVideoRequest, ErrorResponse, VideoListQuery, VideoResponse};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery, parse_uuid};

/// Creates the video routes
///
/// # Routes
/// - `POST /videos` - Create a video with its notes
/// - `GET /videos?userId=` - List a user's videos
/// - `GET|DELETE /videos/{videoId}` - Read or delete one video
pub fn video_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_video, list_videos))
        .routes(routes!(get_video, delete_video))
}

/// POST /videos - Create a video and its notes atomically
#[utoipa::path(
    post,
    path = "/videos",
    tag = VIDEO_TAG,
    request_body = CreateVideoRequest,
    responses(
        (status = 201, description = "Video created", body = VideoResponse),
        (status = 400, description = "Invalid input or userId", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn create_video(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateVideoRequest>,
) -> AppResult<(StatusCode, Json<VideoResponse>)> {
    let created = state
        .services
        .videos
        .create_video(payload.into_input()?)
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// GET /videos?userId= - Videos owned by a user
#[utoipa::path(
    get,
    path = "/videos",
    tag = VIDEO_TAG,
    params(VideoListQuery),
    responses(
        (status = 200, description = "Videos owned by the user", body = Vec<VideoResponse>),
        (status = 400, description = "Missing or malformed userId", body = ErrorResponse)
    )
)]
async fn list_videos(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<VideoListQuery>,
) -> AppResult<Json<Vec<VideoResponse>>> {
    let user_id = parse_uuid(&query.user_id)?;
    let videos = state.services.videos.find_all_by_user(user_id).await?;
    Ok(Json(videos.into_iter().map(VideoResponse::from).collect()))
}

/// GET /videos/{videoId} - One video with its notes
#[utoipa::path(
    get,
    path = "/videos/{videoId}",
    tag = VIDEO_TAG,
    params(("videoId" = String, Path, description = "Video identifier (UUID)")),
    responses(
        (status = 200, description = "Video found", body = VideoResponse),
        (status = 400, description = "Not a valid id", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse)
    )
)]
async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> AppResult<Json<VideoResponse>> {
    let id = parse_uuid(&video_id)?;
    let video = state
        .services
        .videos
        .find_one(id)
        .await?
        .ok_or_else(|| AppError::not_found("video", "videoId", id))?;
    Ok(Json(video.into()))
}

/// DELETE /videos/{videoId} - Delete a video and its notes
#[utoipa::path(
    delete,
    path = "/videos/{videoId}",
    tag = VIDEO_TAG,
    params(("videoId" = String, Path, description = "Video identifier (UUID)")),
    responses(
        (status = 204, description = "Video deleted"),
        (status = 400, description = "Not a valid id", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse)
    )
)]
async fn delete_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_uuid(&video_id)?;
    state.services.videos.delete_video(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

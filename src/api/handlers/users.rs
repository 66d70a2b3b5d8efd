//! User account handlers: signup, login/logout, lookup, update and delete.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::USER_TAG;
use crate::api::dto::{
    CreateUserRequest, ErrorResponse, LoginQuery, LoginResponse, MessageResponse,
    UpdateUserRequest, UserProfileResponse, UserResponse,
};
use crate::error::AppResult;
use crate::services::UserService;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

/// Creates the user routes
///
/// # Routes
/// - `POST /user` - Create a user
/// - `GET /user/login` - Check credentials and issue an access token
/// - `GET /user/logout` - Acknowledge logout
/// - `GET|PATCH|DELETE /user/{username}` - Read, update or delete one user
pub fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_user))
        .routes(routes!(login))
        .routes(routes!(logout))
        .routes(routes!(get_user, update_user, delete_user))
}

/// POST /user - Create user
#[utoipa::path(
    post,
    path = "/user",
    tag = USER_TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Username or email already exists", body = ErrorResponse)
    )
)]
async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.services.users.create_user(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /user/login - Logs user into the system
#[utoipa::path(
    get,
    path = "/user/login",
    tag = USER_TAG,
    params(LoginQuery),
    responses(
        (status = 200, description = "Credentials accepted", body = LoginResponse),
        (status = 400, description = "Missing username or password", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
async fn login(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<LoginQuery>,
) -> AppResult<Json<LoginResponse>> {
    let (user, access_token) = state
        .services
        .users
        .verify_credentials(&query.username, &query.password, &state.jwt_config)
        .await?;

    Ok(Json(LoginResponse {
        username: user.username,
        email: user.email,
        access_token,
    }))
}

/// GET /user/logout - Logs out current logged in user session
#[utoipa::path(
    get,
    path = "/user/logout",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    )
)]
async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: UserService::LOGOUT_MESSAGE.to_string(),
    })
}

/// GET /user/{username} - Get user by user name
#[utoipa::path(
    get,
    path = "/user/{username}",
    tag = USER_TAG,
    params(("username" = String, Path, description = "The name that needs to be fetched")),
    responses(
        (status = 200, description = "User found", body = UserProfileResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<UserProfileResponse>> {
    let user = state.services.users.get_by_username(&username).await?;
    Ok(Json(user.into()))
}

/// PATCH /user/{username} - Update user
#[utoipa::path(
    patch,
    path = "/user/{username}",
    tag = USER_TAG,
    params(("username" = String, Path, description = "Name of the user to update")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserProfileResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse)
    )
)]
async fn update_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserProfileResponse>> {
    let user = state
        .services
        .users
        .update_user(&username, payload.into())
        .await?;
    Ok(Json(user.into()))
}

/// DELETE /user/{username} - Delete user
#[utoipa::path(
    delete,
    path = "/user/{username}",
    tag = USER_TAG,
    params(("username" = String, Path, description = "The name that needs to be deleted")),
    responses(
        (status = 200, description = "User deleted", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users.delete_user(&username).await?;
    Ok(Json(user.into()))
}

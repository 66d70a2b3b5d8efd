//! User service for business logic operations.
//!
//! Owns the account rules: unique username and email, hashing on every
//! password write, and credential verification for login.

use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, UpdateUser, User};
use crate::repositories::UserRepository;
use crate::utils::jwt::generate_access_token;
use crate::utils::password::{hash_password, verify_password};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Signup input with the password still in plaintext.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub user_status: i32,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
}

/// User service for handling user-related business logic.
///
/// Since `UserRepository` uses `Arc` internally via the connection pool,
/// cloning is cheap.
#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    /// Logout is stateless; there is no server-side session to end.
    pub const LOGOUT_MESSAGE: &'static str = "Logged out successfully";

    /// Creates a new UserService with the given repository.
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// Registers a new account.
    ///
    /// Fails with `Duplicate` when the username or the email is taken. A
    /// concurrent signup that slips past these checks hits the unique
    /// constraints and fails the same way.
    pub async fn create_user(&self, input: CreateUser) -> AppResult<User> {
        if self.repo.find_by_username(&input.username).await?.is_some() {
            return Err(AppError::duplicate("user", "username", &input.username));
        }
        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::duplicate("user", "email", &input.email));
        }

        let new_user = NewUser {
            id: Uuid::new_v4(),
            username: input.username,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password: hash_password(&input.password)?,
            phone: input.phone,
            user_status: input.user_status,
        };

        let user = self.repo.create(new_user).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Gets a user by their username, or `NotFound`.
    pub async fn get_by_username(&self, username: &str) -> AppResult<User> {
        self.repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found("user", "username", username))
    }

    /// Checks a username/password pair and issues an access token.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the
    /// caller: both are `Unauthorized`.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
        jwt: &JwtConfig,
    ) -> AppResult<(User, String)> {
        let Some(user) = self.repo.find_by_username(username).await? else {
            tracing::warn!(username = %username, "Login failed: unknown user");
            return Err(AppError::Unauthorized {
                message: INVALID_CREDENTIALS.to_string(),
            });
        };

        if !verify_password(password, &user.password)? {
            tracing::warn!(username = %username, "Login failed: password mismatch");
            return Err(AppError::Unauthorized {
                message: INVALID_CREDENTIALS.to_string(),
            });
        }

        let token = generate_access_token(
            user.id,
            user.email.clone(),
            user.username.clone(),
            &jwt.secret,
            jwt.access_token_expiration,
        )?;

        tracing::info!(user_id = %user.id, username = %user.username, "User logged in");
        Ok((user, token))
    }

    /// Overwrites the provided fields of the user with `username`.
    ///
    /// A new password is hashed before it is stored. An empty patch returns
    /// the current record unchanged.
    pub async fn update_user(&self, username: &str, patch: UserPatch) -> AppResult<User> {
        let current = self.get_by_username(username).await?;

        let changes = UpdateUser {
            first_name: patch.first_name,
            last_name: patch.last_name,
            email: patch.email,
            password: patch.password.as_deref().map(hash_password).transpose()?,
            phone: patch.phone,
        };

        if changes.is_empty() {
            return Ok(current);
        }

        let updated = self
            .repo
            .update_by_username(username, changes)
            .await?
            .ok_or_else(|| AppError::not_found("user", "username", username))?;

        tracing::info!(user_id = %updated.id, username = %updated.username, "User updated");
        Ok(updated)
    }

    /// Deletes the user with `username` and returns the removed record.
    pub async fn delete_user(&self, username: &str) -> AppResult<User> {
        let deleted = self
            .repo
            .delete_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found("user", "username", username))?;

        tracing::info!(user_id = %deleted.id, username = %deleted.username, "User deleted");
        Ok(deleted)
    }
}

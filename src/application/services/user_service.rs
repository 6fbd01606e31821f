//! User Service
//!
//! Registration and user lookups. Every representation carries
//! `is_subscribed` relative to the viewer.

use std::collections::HashSet;
use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::Utc;

use crate::application::dto::{RegisterRequest, RegisteredUserResponse, UserResponse};
use crate::domain::{Page, PageRequest, RelationRepository, User, UserRepository};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::validate_request;

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new account
    async fn register(&self, request: RegisterRequest) -> Result<RegisteredUserResponse, AppError>;

    /// Get a user by ID
    async fn get_user(&self, viewer: Option<i64>, user_id: i64) -> Result<UserResponse, AppError>;

    /// List users ordered by username
    async fn list_users(
        &self,
        viewer: Option<i64>,
        page: PageRequest,
    ) -> Result<Page<UserResponse>, AppError>;

    /// The authenticated user's own profile
    async fn me(&self, user_id: i64) -> Result<UserResponse, AppError>;
}

/// UserService implementation
pub struct UserServiceImpl {
    users: Arc<dyn UserRepository>,
    subscriptions: Arc<dyn RelationRepository>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl UserServiceImpl {
    pub fn new(
        users: Arc<dyn UserRepository>,
        subscriptions: Arc<dyn RelationRepository>,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            users,
            subscriptions,
            id_generator,
        }
    }

    /// Hash a password using Argon2id
    fn hash_password(password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn register(&self, request: RegisterRequest) -> Result<RegisteredUserResponse, AppError> {
        validate_request(&request)?;

        let email = request.email.trim().to_lowercase();

        if self.users.email_exists(&email).await? {
            return Err(AppError::AlreadyExists("Email already registered".into()));
        }
        if self.users.username_exists(&request.username).await? {
            return Err(AppError::AlreadyExists("Username already taken".into()));
        }

        let user = User {
            id: self.id_generator.generate(),
            email,
            username: request.username,
            first_name: request.first_name,
            last_name: request.last_name,
            password_hash: Self::hash_password(&request.password)?,
            is_admin: false,
            created_at: Utc::now(),
        };

        let user = self.users.create(&user).await?;
        tracing::info!(user_id = user.id, username = %user.username, "User registered");

        Ok(RegisteredUserResponse::from(user))
    }

    async fn get_user(&self, viewer: Option<i64>, user_id: i64) -> Result<UserResponse, AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", user_id)))?;

        let is_subscribed = match viewer {
            Some(viewer_id) if viewer_id != user_id => {
                self.subscriptions.exists(viewer_id, user_id).await?
            }
            _ => false,
        };

        Ok(UserResponse::from_user(user, is_subscribed))
    }

    async fn list_users(
        &self,
        viewer: Option<i64>,
        page: PageRequest,
    ) -> Result<Page<UserResponse>, AppError> {
        let users = self.users.list(page).await?;

        let followed: HashSet<i64> = match viewer {
            Some(viewer_id) => {
                let ids: Vec<i64> = users.items.iter().map(|u| u.id).collect();
                self.subscriptions
                    .filter_existing(viewer_id, &ids)
                    .await?
                    .into_iter()
                    .collect()
            }
            None => HashSet::new(),
        };

        Ok(users.map(|user| {
            let is_subscribed = followed.contains(&user.id);
            UserResponse::from_user(user, is_subscribed)
        }))
    }

    async fn me(&self, user_id: i64) -> Result<UserResponse, AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotAuthenticated("User no longer exists".into()))?;

        Ok(UserResponse::from_user(user, false))
    }
}

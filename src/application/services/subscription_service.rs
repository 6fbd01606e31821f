//! Subscription Service
//!
//! Follow / unfollow authors and list the authors a user follows together
//! with a preview of their recipes.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::dto::{RecipeShortResponse, SubscriptionResponse, UserResponse};
use crate::domain::{Page, PageRequest, RecipeRepository, RelationRepository, User, UserRepository};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Subscription service trait
#[async_trait]
pub trait SubscriptionService: Send + Sync {
    /// Follow an author
    async fn subscribe(
        &self,
        follower_id: i64,
        author_id: i64,
        recipes_limit: Option<i64>,
    ) -> Result<SubscriptionResponse, AppError>;

    /// Stop following an author
    async fn unsubscribe(&self, follower_id: i64, author_id: i64) -> Result<(), AppError>;

    /// Authors followed by `follower_id`, ordered by username
    async fn list_subscriptions(
        &self,
        follower_id: i64,
        page: PageRequest,
        recipes_limit: Option<i64>,
    ) -> Result<Page<SubscriptionResponse>, AppError>;
}

/// SubscriptionService implementation
pub struct SubscriptionServiceImpl {
    subscriptions: Arc<dyn RelationRepository>,
    users: Arc<dyn UserRepository>,
    recipes: Arc<dyn RecipeRepository>,
}

impl SubscriptionServiceImpl {
    pub fn new(
        subscriptions: Arc<dyn RelationRepository>,
        users: Arc<dyn UserRepository>,
        recipes: Arc<dyn RecipeRepository>,
    ) -> Self {
        Self {
            subscriptions,
            users,
            recipes,
        }
    }

    /// Followed author with their newest recipes and recipe count.
    async fn entry(
        &self,
        author: User,
        recipes_limit: Option<i64>,
    ) -> Result<SubscriptionResponse, AppError> {
        let recipes = self
            .recipes
            .list_by_author(author.id, recipes_limit)
            .await?
            .into_iter()
            .map(RecipeShortResponse::from)
            .collect();
        let recipes_count = self.recipes.count_by_author(author.id).await?;

        Ok(SubscriptionResponse {
            user: UserResponse::from_user(author, true),
            recipes,
            recipes_count,
        })
    }
}

#[async_trait]
impl SubscriptionService for SubscriptionServiceImpl {
    async fn subscribe(
        &self,
        follower_id: i64,
        author_id: i64,
        recipes_limit: Option<i64>,
    ) -> Result<SubscriptionResponse, AppError> {
        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", author_id)))?;

        if follower_id == author_id {
            return Err(AppError::InvalidOperation(
                "You cannot subscribe to yourself".into(),
            ));
        }

        if self.subscriptions.exists(follower_id, author_id).await? {
            return Err(AppError::AlreadyExists(
                "Already subscribed to this author".into(),
            ));
        }

        self.subscriptions.add(follower_id, author_id).await?;
        metrics::record_relation_change("subscriptions", "add");
        tracing::debug!(follower_id, author_id, "Subscribed");

        self.entry(author, recipes_limit).await
    }

    async fn unsubscribe(&self, follower_id: i64, author_id: i64) -> Result<(), AppError> {
        if !self.users.exists(author_id).await? {
            return Err(AppError::NotFound(format!(
                "User with id {} not found",
                author_id
            )));
        }

        self.subscriptions
            .remove(follower_id, author_id)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => {
                    AppError::NotFound("Not subscribed to this author".into())
                }
                other => other,
            })?;
        metrics::record_relation_change("subscriptions", "remove");
        tracing::debug!(follower_id, author_id, "Unsubscribed");

        Ok(())
    }

    async fn list_subscriptions(
        &self,
        follower_id: i64,
        page: PageRequest,
        recipes_limit: Option<i64>,
    ) -> Result<Page<SubscriptionResponse>, AppError> {
        let authors = self.users.list_followed_by(follower_id, page).await?;

        let mut entries = Vec::with_capacity(authors.items.len());
        for author in authors.items {
            entries.push(self.entry(author, recipes_limit).await?);
        }

        Ok(Page::new(entries, authors.total, authors.request))
    }
}

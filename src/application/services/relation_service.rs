//! Recipe Relation Service
//!
//! Add/remove toggles for the user -> recipe relations (favorites and the
//! shopping cart). One implementation serves both; the injected
//! [`RelationRepository`] decides which relation is changed.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::dto::RecipeShortResponse;
use crate::domain::{RecipeRepository, RelationRepository};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Recipe relation service trait
#[async_trait]
pub trait RecipeRelationService: Send + Sync {
    /// Add a recipe to the user's set
    async fn add(&self, user_id: i64, recipe_id: i64) -> Result<RecipeShortResponse, AppError>;

    /// Remove a recipe from the user's set
    async fn remove(&self, user_id: i64, recipe_id: i64) -> Result<(), AppError>;
}

/// RecipeRelationService implementation
pub struct RecipeRelationServiceImpl {
    relation: Arc<dyn RelationRepository>,
    recipes: Arc<dyn RecipeRepository>,
}

impl RecipeRelationServiceImpl {
    pub fn new(relation: Arc<dyn RelationRepository>, recipes: Arc<dyn RecipeRepository>) -> Self {
        Self { relation, recipes }
    }
}

#[async_trait]
impl RecipeRelationService for RecipeRelationServiceImpl {
    async fn add(&self, user_id: i64, recipe_id: i64) -> Result<RecipeShortResponse, AppError> {
        let kind = self.relation.kind();

        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Recipe with id {} not found", recipe_id)))?;

        if self.relation.exists(user_id, recipe_id).await? {
            return Err(AppError::AlreadyExists(format!(
                "Recipe is already in {}",
                kind
            )));
        }

        self.relation.add(user_id, recipe_id).await?;
        metrics::record_relation_change(kind.table(), "add");
        tracing::debug!(user_id, recipe_id, relation = %kind, "Relation added");

        Ok(RecipeShortResponse::from(recipe.summary()))
    }

    async fn remove(&self, user_id: i64, recipe_id: i64) -> Result<(), AppError> {
        let kind = self.relation.kind();

        if !self.recipes.exists(recipe_id).await? {
            return Err(AppError::NotFound(format!(
                "Recipe with id {} not found",
                recipe_id
            )));
        }

        self.relation.remove(user_id, recipe_id).await.map_err(|e| match e {
            AppError::NotFound(_) => AppError::NotFound(format!("Recipe is not in {}", kind)),
            other => other,
        })?;
        metrics::record_relation_change(kind.table(), "remove");
        tracing::debug!(user_id, recipe_id, relation = %kind, "Relation removed");

        Ok(())
    }
}

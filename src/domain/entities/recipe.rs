//! Recipe entity and repository trait.
//!
//! Maps to the `recipes` table plus its `recipe_tags` and
//! `recipe_ingredients` link tables.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Tag, User};
use crate::domain::services::IngredientLine;
use crate::domain::value_objects::{Page, PageRequest};
use crate::shared::error::AppError;

/// Smallest accepted ingredient amount.
pub const MIN_AMOUNT: i32 = 1;
/// Largest accepted ingredient amount.
pub const MAX_AMOUNT: i32 = 32_000;
/// Shortest accepted cooking time, in minutes.
pub const MIN_COOKING_TIME: i32 = 1;
/// Longest accepted cooking time, in minutes.
pub const MAX_COOKING_TIME: i32 = 32_000;
/// Maximum recipe name length.
pub const MAX_RECIPE_NAME_LENGTH: u64 = 200;

/// A published recipe with its tags and ingredient lines.
///
/// Maps to the `recipes` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - author_id: BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE
/// - name: VARCHAR(200) NOT NULL CHECK (name <> '')
/// - image: TEXT NOT NULL
/// - text: TEXT NOT NULL
/// - cooking_time: INTEGER NOT NULL CHECK (cooking_time BETWEEN 1 AND 32000)
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub author_id: i64,
    pub name: String,
    /// Opaque image reference (data URL or media path)
    pub image: String,
    pub text: String,
    /// Cooking time in minutes
    pub cooking_time: i32,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredient>,
}

impl Recipe {
    /// Authors and administrators may edit or delete a recipe.
    pub fn can_be_modified_by(&self, user: &User) -> bool {
        user.is_admin || user.id == self.author_id
    }

    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id,
            name: self.name.clone(),
            image: self.image.clone(),
            cooking_time: self.cooking_time,
        }
    }
}

/// One ingredient line of a recipe, joined with the catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub ingredient_id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Short recipe representation used in previews and toggle responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

/// Requested amount of a catalog ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientAmount {
    pub ingredient_id: i64,
    pub amount: i32,
}

/// Writable recipe fields, shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub tag_ids: Vec<i64>,
    pub ingredients: Vec<IngredientAmount>,
}

impl RecipeDraft {
    /// Enforce the recipe invariants that do not need storage access.
    pub fn check(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("name", "This field may not be blank"));
        }
        if self.text.trim().is_empty() {
            return Err(AppError::validation("text", "This field may not be blank"));
        }
        if self.image.trim().is_empty() {
            return Err(AppError::validation("image", "An image is required"));
        }
        if !(MIN_COOKING_TIME..=MAX_COOKING_TIME).contains(&self.cooking_time) {
            return Err(AppError::validation(
                "cooking_time",
                format!(
                    "Cooking time must be between {} and {} minutes",
                    MIN_COOKING_TIME, MAX_COOKING_TIME
                ),
            ));
        }

        if self.tag_ids.is_empty() {
            return Err(AppError::validation("tags", "At least one tag is required"));
        }
        if has_duplicates(self.tag_ids.iter().copied()) {
            return Err(AppError::validation("tags", "Tags must not repeat"));
        }

        if self.ingredients.is_empty() {
            return Err(AppError::validation(
                "ingredients",
                "At least one ingredient is required",
            ));
        }
        if has_duplicates(self.ingredients.iter().map(|i| i.ingredient_id)) {
            return Err(AppError::validation("ingredients", "Ingredients must not repeat"));
        }
        for line in &self.ingredients {
            if line.amount < MIN_AMOUNT {
                return Err(AppError::InvalidOperation(format!(
                    "Amount of ingredient {} must be positive",
                    line.ingredient_id
                )));
            }
            if line.amount > MAX_AMOUNT {
                return Err(AppError::validation(
                    "ingredients",
                    format!("Amount must not exceed {}", MAX_AMOUNT),
                ));
            }
        }

        Ok(())
    }
}

fn has_duplicates<I: IntoIterator<Item = i64>>(ids: I) -> bool {
    let mut seen = HashSet::new();
    ids.into_iter().any(|id| !seen.insert(id))
}

/// Listing filter. Empty fields do not restrict the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub author_id: Option<i64>,
    /// Matches recipes carrying any of these tag slugs
    pub tag_slugs: Vec<String>,
    /// Only recipes favorited by this user
    pub favorited_by: Option<i64>,
    /// Only recipes in this user's shopping cart
    pub in_cart_of: Option<i64>,
}

/// Repository trait for Recipe data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Persist a new recipe with its tags and ingredient lines atomically.
    async fn create(&self, id: i64, author_id: i64, draft: &RecipeDraft) -> Result<Recipe, AppError>;

    /// Replace the recipe fields, tags and ingredient lines atomically.
    async fn update(&self, id: i64, draft: &RecipeDraft) -> Result<Recipe, AppError>;

    /// Delete a recipe; links, favorites and cart entries cascade.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Find a recipe by ID with tags and ingredients loaded.
    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, AppError>;

    /// Check whether a recipe exists.
    async fn exists(&self, id: i64) -> Result<bool, AppError>;

    /// Filtered listing, newest first.
    async fn list(&self, filter: &RecipeFilter, page: PageRequest) -> Result<Page<Recipe>, AppError>;

    /// An author's recipes, newest first, optionally capped.
    async fn list_by_author(
        &self,
        author_id: i64,
        limit: Option<i64>,
    ) -> Result<Vec<RecipeSummary>, AppError>;

    /// Number of recipes written by an author.
    async fn count_by_author(&self, author_id: i64) -> Result<i64, AppError>;

    /// Every ingredient line of every recipe in the user's shopping cart.
    async fn cart_ingredient_lines(&self, user_id: i64) -> Result<Vec<IngredientLine>, AppError>;
}

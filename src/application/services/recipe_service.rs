//! Recipe Service
//!
//! Recipe CRUD, filtering and the per-viewer flags (`is_favorited`,
//! `is_in_shopping_cart`, author `is_subscribed`) of every representation.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::dto::{is_truthy, RecipeListQuery, RecipeRequest, RecipeResponse, UserResponse};
use crate::domain::{
    IngredientRepository, Page, PageRequest, Recipe, RecipeDraft, RecipeFilter, RecipeRepository,
    RelationRepository, TagRepository, User, UserRepository,
};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::validate_request;

/// Recipe service trait
#[async_trait]
pub trait RecipeService: Send + Sync {
    /// Publish a new recipe authored by `author_id`
    async fn create_recipe(
        &self,
        author_id: i64,
        request: RecipeRequest,
    ) -> Result<RecipeResponse, AppError>;

    /// Replace a recipe; only its author or an administrator may do so
    async fn update_recipe(
        &self,
        actor_id: i64,
        recipe_id: i64,
        request: RecipeRequest,
    ) -> Result<RecipeResponse, AppError>;

    /// Delete a recipe; only its author or an administrator may do so
    async fn delete_recipe(&self, actor_id: i64, recipe_id: i64) -> Result<(), AppError>;

    /// Get a recipe as seen by `viewer`
    async fn get_recipe(&self, viewer: Option<i64>, recipe_id: i64)
        -> Result<RecipeResponse, AppError>;

    /// Filtered listing, newest first
    async fn list_recipes(
        &self,
        viewer: Option<i64>,
        query: RecipeListQuery,
        page: PageRequest,
    ) -> Result<Page<RecipeResponse>, AppError>;
}

/// RecipeService implementation
pub struct RecipeServiceImpl {
    recipes: Arc<dyn RecipeRepository>,
    users: Arc<dyn UserRepository>,
    ingredients: Arc<dyn IngredientRepository>,
    tags: Arc<dyn TagRepository>,
    favorites: Arc<dyn RelationRepository>,
    shopping_cart: Arc<dyn RelationRepository>,
    subscriptions: Arc<dyn RelationRepository>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl RecipeServiceImpl {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        recipes: Arc<dyn RecipeRepository>,
        users: Arc<dyn UserRepository>,
        ingredients: Arc<dyn IngredientRepository>,
        tags: Arc<dyn TagRepository>,
        favorites: Arc<dyn RelationRepository>,
        shopping_cart: Arc<dyn RelationRepository>,
        subscriptions: Arc<dyn RelationRepository>,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            recipes,
            users,
            ingredients,
            tags,
            favorites,
            shopping_cart,
            subscriptions,
            id_generator,
        }
    }

    async fn load_actor(&self, actor_id: i64) -> Result<User, AppError> {
        self.users
            .find_by_id(actor_id)
            .await?
            .ok_or_else(|| AppError::NotAuthenticated("User no longer exists".into()))
    }

    async fn load_recipe(&self, recipe_id: i64) -> Result<Recipe, AppError> {
        self.recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Recipe with id {} not found", recipe_id)))
    }

    /// Validate a payload into a draft whose catalog references all exist.
    async fn prepare_draft(&self, request: RecipeRequest) -> Result<RecipeDraft, AppError> {
        validate_request(&request)?;

        let draft = RecipeDraft::from(request);
        draft.check()?;

        let ingredient_ids: Vec<i64> = draft.ingredients.iter().map(|i| i.ingredient_id).collect();
        let known: HashSet<i64> = self
            .ingredients
            .find_many(&ingredient_ids)
            .await?
            .into_iter()
            .map(|i| i.id)
            .collect();
        if let Some(missing) = ingredient_ids.iter().find(|id| !known.contains(id)) {
            return Err(AppError::validation(
                "ingredients",
                format!("Ingredient with id {} does not exist", missing),
            ));
        }

        let known: HashSet<i64> = self
            .tags
            .find_many(&draft.tag_ids)
            .await?
            .into_iter()
            .map(|t| t.id)
            .collect();
        if let Some(missing) = draft.tag_ids.iter().find(|id| !known.contains(id)) {
            return Err(AppError::validation(
                "tags",
                format!("Tag with id {} does not exist", missing),
            ));
        }

        Ok(draft)
    }

    /// Build representations for `viewer`, batching all flag lookups.
    async fn represent(
        &self,
        viewer: Option<i64>,
        recipes: Vec<Recipe>,
    ) -> Result<Vec<RecipeResponse>, AppError> {
        if recipes.is_empty() {
            return Ok(Vec::new());
        }

        let recipe_ids: Vec<i64> = recipes.iter().map(|r| r.id).collect();
        let mut author_ids: Vec<i64> = recipes.iter().map(|r| r.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors: HashMap<i64, User> = self
            .users
            .find_many(&author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let (followed, favorited, in_cart) = match viewer {
            Some(viewer_id) => (
                to_set(self.subscriptions.filter_existing(viewer_id, &author_ids).await?),
                to_set(self.favorites.filter_existing(viewer_id, &recipe_ids).await?),
                to_set(self.shopping_cart.filter_existing(viewer_id, &recipe_ids).await?),
            ),
            None => Default::default(),
        };

        recipes
            .into_iter()
            .map(|recipe| {
                let author = authors.get(&recipe.author_id).cloned().ok_or_else(|| {
                    AppError::Internal(format!("Author {} of recipe {} missing", recipe.author_id, recipe.id))
                })?;
                let author = UserResponse::from_user(author, followed.contains(&recipe.author_id));
                let is_favorited = favorited.contains(&recipe.id);
                let is_in_shopping_cart = in_cart.contains(&recipe.id);
                Ok(RecipeResponse::build(recipe, author, is_favorited, is_in_shopping_cart))
            })
            .collect()
    }

    async fn represent_one(&self, viewer: Option<i64>, recipe: Recipe) -> Result<RecipeResponse, AppError> {
        self.represent(viewer, vec![recipe])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal("Recipe representation missing".into()))
    }
}

fn to_set(ids: Vec<i64>) -> HashSet<i64> {
    ids.into_iter().collect()
}

/// Translate query parameters into a repository filter.
fn build_filter(viewer: Option<i64>, query: &RecipeListQuery) -> Result<RecipeFilter, AppError> {
    let author_id = match query.author.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<i64>()
                .map_err(|_| AppError::validation("author", "Author must be a user id"))?,
        ),
    };

    let flag = |raw: &Option<String>| viewer.filter(|_| is_truthy(raw.as_deref()));

    Ok(RecipeFilter {
        author_id,
        tag_slugs: query
            .tags
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        favorited_by: flag(&query.is_favorited),
        in_cart_of: flag(&query.is_in_shopping_cart),
    })
}

#[async_trait]
impl RecipeService for RecipeServiceImpl {
    async fn create_recipe(
        &self,
        author_id: i64,
        request: RecipeRequest,
    ) -> Result<RecipeResponse, AppError> {
        let author = self.load_actor(author_id).await?;
        let draft = self.prepare_draft(request).await?;

        let recipe = self
            .recipes
            .create(self.id_generator.generate(), author.id, &draft)
            .await?;

        tracing::info!(recipe_id = recipe.id, author_id = author.id, "Recipe created");

        self.represent_one(Some(author.id), recipe).await
    }

    async fn update_recipe(
        &self,
        actor_id: i64,
        recipe_id: i64,
        request: RecipeRequest,
    ) -> Result<RecipeResponse, AppError> {
        let actor = self.load_actor(actor_id).await?;
        let existing = self.load_recipe(recipe_id).await?;

        if !existing.can_be_modified_by(&actor) {
            return Err(AppError::Forbidden(
                "Only the author can change this recipe".into(),
            ));
        }

        let draft = self.prepare_draft(request).await?;
        let recipe = self.recipes.update(recipe_id, &draft).await?;

        tracing::info!(recipe_id, actor_id, "Recipe updated");

        self.represent_one(Some(actor.id), recipe).await
    }

    async fn delete_recipe(&self, actor_id: i64, recipe_id: i64) -> Result<(), AppError> {
        let actor = self.load_actor(actor_id).await?;
        let existing = self.load_recipe(recipe_id).await?;

        if !existing.can_be_modified_by(&actor) {
            return Err(AppError::Forbidden(
                "Only the author can delete this recipe".into(),
            ));
        }

        self.recipes.delete(recipe_id).await?;

        tracing::info!(recipe_id, actor_id, "Recipe deleted");

        Ok(())
    }

    async fn get_recipe(
        &self,
        viewer: Option<i64>,
        recipe_id: i64,
    ) -> Result<RecipeResponse, AppError> {
        let recipe = self.load_recipe(recipe_id).await?;
        self.represent_one(viewer, recipe).await
    }

    async fn list_recipes(
        &self,
        viewer: Option<i64>,
        query: RecipeListQuery,
        page: PageRequest,
    ) -> Result<Page<RecipeResponse>, AppError> {
        let filter = build_filter(viewer, &query)?;
        let recipes = self.recipes.list(&filter, page).await?;

        let total = recipes.total;
        let request = recipes.request;
        let items = self.represent(viewer, recipes.items).await?;

        Ok(Page::new(items, total, request))
    }
}

//! Recipe Handlers
//!
//! Recipe CRUD plus the favorite and shopping cart toggles nested under a
//! recipe.

use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::{
    PaginatedResponse, RecipeListQuery, RecipeRequest, RecipeResponse, RecipeShortResponse,
};
use crate::application::services::{
    RecipeRelationService, RecipeRelationServiceImpl, RecipeService, RecipeServiceImpl,
};
use crate::domain::RelationKind;
use crate::presentation::http::extractors::{JsonBody, MaybeAuthUser, PathId, QueryParams};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn recipe_service(state: &AppState) -> RecipeServiceImpl {
    let repos = &state.repos;
    RecipeServiceImpl::new(
        repos.recipes.clone(),
        repos.users.clone(),
        repos.ingredients.clone(),
        repos.tags.clone(),
        repos.favorites.clone(),
        repos.shopping_cart.clone(),
        repos.subscriptions.clone(),
        state.snowflake.clone(),
    )
}

fn relation_service(state: &AppState, kind: RelationKind) -> RecipeRelationServiceImpl {
    RecipeRelationServiceImpl::new(state.repos.relation(kind), state.repos.recipes.clone())
}

/// List recipes, newest first
pub async fn list_recipes(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    OriginalUri(uri): OriginalUri,
    QueryParams(query): QueryParams<RecipeListQuery>,
) -> Result<Json<PaginatedResponse<RecipeResponse>>, AppError> {
    let page = state.page_request(&query.page_query());

    let recipes = recipe_service(&state)
        .list_recipes(viewer.user_id(), query, page)
        .await?;

    Ok(Json(PaginatedResponse::from_page(recipes, &uri)))
}

/// Publish a recipe
pub async fn create_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(body): JsonBody<RecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), AppError> {
    let recipe = recipe_service(&state)
        .create_recipe(auth.user_id, body)
        .await?;

    Ok((StatusCode::CREATED, Json(recipe)))
}

/// Get recipe by ID
pub async fn get_recipe(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    PathId(recipe_id): PathId,
) -> Result<Json<RecipeResponse>, AppError> {
    let recipe = recipe_service(&state)
        .get_recipe(viewer.user_id(), recipe_id)
        .await?;

    Ok(Json(recipe))
}

/// Replace a recipe's content
pub async fn update_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(recipe_id): PathId,
    JsonBody(body): JsonBody<RecipeRequest>,
) -> Result<Json<RecipeResponse>, AppError> {
    let recipe = recipe_service(&state)
        .update_recipe(auth.user_id, recipe_id, body)
        .await?;

    Ok(Json(recipe))
}

/// Delete a recipe
pub async fn delete_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(recipe_id): PathId,
) -> Result<StatusCode, AppError> {
    recipe_service(&state)
        .delete_recipe(auth.user_id, recipe_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(recipe_id): PathId,
) -> Result<(StatusCode, Json<RecipeShortResponse>), AppError> {
    let recipe = relation_service(&state, RelationKind::Favorite)
        .add(auth.user_id, recipe_id)
        .await?;

    Ok((StatusCode::CREATED, Json(recipe)))
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(recipe_id): PathId,
) -> Result<StatusCode, AppError> {
    relation_service(&state, RelationKind::Favorite)
        .remove(auth.user_id, recipe_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_to_shopping_cart(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(recipe_id): PathId,
) -> Result<(StatusCode, Json<RecipeShortResponse>), AppError> {
    let recipe = relation_service(&state, RelationKind::ShoppingCart)
        .add(auth.user_id, recipe_id)
        .await?;

    Ok((StatusCode::CREATED, Json(recipe)))
}

pub async fn remove_from_shopping_cart(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(recipe_id): PathId,
) -> Result<StatusCode, AppError> {
    relation_service(&state, RelationKind::ShoppingCart)
        .remove(auth.user_id, recipe_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

//! Ingredient and Tag Handlers
//!
//! Read-only, unpaginated.

use axum::{extract::State, Json};

use crate::application::dto::{IngredientQuery, IngredientResponse, TagResponse};
use crate::application::services::{CatalogService, CatalogServiceImpl};
use crate::presentation::http::extractors::{PathId, QueryParams};
use crate::shared::error::AppError;
use crate::startup::AppState;

fn catalog_service(state: &AppState) -> CatalogServiceImpl {
    CatalogServiceImpl::new(state.repos.ingredients.clone(), state.repos.tags.clone())
}

/// List ingredients, optionally by name prefix
pub async fn list_ingredients(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<IngredientQuery>,
) -> Result<Json<Vec<IngredientResponse>>, AppError> {
    let ingredients = catalog_service(&state).list_ingredients(query.name).await?;
    Ok(Json(ingredients))
}

pub async fn get_ingredient(
    State(state): State<AppState>,
    PathId(ingredient_id): PathId,
) -> Result<Json<IngredientResponse>, AppError> {
    let ingredient = catalog_service(&state).get_ingredient(ingredient_id).await?;
    Ok(Json(ingredient))
}

pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<TagResponse>>, AppError> {
    let tags = catalog_service(&state).list_tags().await?;
    Ok(Json(tags))
}

pub async fn get_tag(
    State(state): State<AppState>,
    PathId(tag_id): PathId,
) -> Result<Json<TagResponse>, AppError> {
    let tag = catalog_service(&state).get_tag(tag_id).await?;
    Ok(Json(tag))
}

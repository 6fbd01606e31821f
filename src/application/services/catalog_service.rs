//! Catalog Service
//!
//! Read access to ingredients and tags, plus the bulk loader that seeds both
//! tables from JSON files.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::application::dto::{IngredientResponse, TagResponse};
use crate::domain::{IngredientRepository, NewIngredient, NewTag, TagRepository};
use crate::shared::error::AppError;

/// Catalog service trait
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Ingredients ordered by name, optionally filtered by a name prefix
    async fn list_ingredients(&self, name: Option<String>)
        -> Result<Vec<IngredientResponse>, AppError>;

    async fn get_ingredient(&self, id: i64) -> Result<IngredientResponse, AppError>;

    /// All tags ordered by name
    async fn list_tags(&self) -> Result<Vec<TagResponse>, AppError>;

    async fn get_tag(&self, id: i64) -> Result<TagResponse, AppError>;

    /// Insert ingredients that are not stored yet; returns the inserted count
    async fn load_ingredients(&self, records: Vec<NewIngredient>) -> Result<u64, AppError>;

    /// Insert tags that are not stored yet; returns the inserted count
    async fn load_tags(&self, records: Vec<NewTag>) -> Result<u64, AppError>;
}

/// CatalogService implementation
pub struct CatalogServiceImpl {
    ingredients: Arc<dyn IngredientRepository>,
    tags: Arc<dyn TagRepository>,
}

impl CatalogServiceImpl {
    pub fn new(ingredients: Arc<dyn IngredientRepository>, tags: Arc<dyn TagRepository>) -> Self {
        Self { ingredients, tags }
    }
}

/// Read a JSON array of catalog records.
pub async fn read_catalog_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>, AppError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::Internal(format!("Cannot read {}: {}", path.display(), e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| AppError::Internal(format!("Invalid catalog file {}: {}", path.display(), e)))
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn list_ingredients(
        &self,
        name: Option<String>,
    ) -> Result<Vec<IngredientResponse>, AppError> {
        let prefix = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());

        Ok(self
            .ingredients
            .list(prefix)
            .await?
            .into_iter()
            .map(IngredientResponse::from)
            .collect())
    }

    async fn get_ingredient(&self, id: i64) -> Result<IngredientResponse, AppError> {
        self.ingredients
            .find_by_id(id)
            .await?
            .map(IngredientResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("Ingredient with id {} not found", id)))
    }

    async fn list_tags(&self) -> Result<Vec<TagResponse>, AppError> {
        Ok(self
            .tags
            .list()
            .await?
            .into_iter()
            .map(TagResponse::from)
            .collect())
    }

    async fn get_tag(&self, id: i64) -> Result<TagResponse, AppError> {
        self.tags
            .find_by_id(id)
            .await?
            .map(TagResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("Tag with id {} not found", id)))
    }

    async fn load_ingredients(&self, records: Vec<NewIngredient>) -> Result<u64, AppError> {
        let total = records.len();
        let valid: Vec<NewIngredient> = records
            .into_iter()
            .filter(|r| !r.name.trim().is_empty() && !r.measurement_unit.trim().is_empty())
            .collect();
        if valid.len() < total {
            tracing::warn!(skipped = total - valid.len(), "Skipping blank ingredient records");
        }

        let inserted = self.ingredients.insert_missing(&valid).await?;
        tracing::info!(inserted, total, "Ingredient catalog loaded");
        Ok(inserted)
    }

    async fn load_tags(&self, records: Vec<NewTag>) -> Result<u64, AppError> {
        let total = records.len();
        let valid: Vec<NewTag> = records
            .into_iter()
            .filter(|t| {
                let ok = !t.name.trim().is_empty() && !t.slug.trim().is_empty() && t.has_valid_color();
                if !ok {
                    tracing::warn!(name = %t.name, color = %t.color, "Skipping invalid tag record");
                }
                ok
            })
            .collect();

        let inserted = self.tags.insert_missing(&valid).await?;
        tracing::info!(inserted, total, "Tag catalog loaded");
        Ok(inserted)
    }
}

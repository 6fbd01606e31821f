//! Ingredient entity and repository trait.
//!
//! Maps to the `ingredients` table. Ingredients are reference data: they are
//! bulk loaded and never edited through the API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// An ingredient identified by its (name, measurement unit) pair.
///
/// Maps to the `ingredients` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - name: VARCHAR(200) NOT NULL
/// - measurement_unit: VARCHAR(200) NOT NULL
/// - UNIQUE (name, measurement_unit)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

/// Catalog record as it appears in the bulk-load file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIngredient {
    pub name: String,
    pub measurement_unit: String,
}

/// Repository trait for Ingredient data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// List ingredients ordered by name, optionally restricted to names
    /// starting with `name_prefix` (case-insensitive).
    async fn list(&self, name_prefix: Option<String>) -> Result<Vec<Ingredient>, AppError>;

    /// Find an ingredient by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Ingredient>, AppError>;

    /// Fetch several ingredients at once; missing IDs are skipped.
    async fn find_many(&self, ids: &[i64]) -> Result<Vec<Ingredient>, AppError>;

    /// Insert catalog records whose (name, unit) pair is not stored yet.
    ///
    /// Returns the number of inserted rows.
    async fn insert_missing(&self, ingredients: &[NewIngredient]) -> Result<u64, AppError>;
}

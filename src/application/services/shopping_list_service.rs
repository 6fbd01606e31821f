//! Shopping List Service
//!
//! Builds the consolidated shopping list for a user's cart.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{RecipeRepository, ShoppingList};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// File name offered to clients downloading the list.
pub const SHOPPING_LIST_FILENAME: &str = "shopping_list.txt";

/// Shopping list service trait
#[async_trait]
pub trait ShoppingListService: Send + Sync {
    /// Aggregate every ingredient line of the recipes in the user's cart
    async fn shopping_list(&self, user_id: i64) -> Result<ShoppingList, AppError>;
}

/// ShoppingListService implementation
pub struct ShoppingListServiceImpl {
    recipes: Arc<dyn RecipeRepository>,
}

impl ShoppingListServiceImpl {
    pub fn new(recipes: Arc<dyn RecipeRepository>) -> Self {
        Self { recipes }
    }
}

#[async_trait]
impl ShoppingListService for ShoppingListServiceImpl {
    async fn shopping_list(&self, user_id: i64) -> Result<ShoppingList, AppError> {
        let lines = self.recipes.cart_ingredient_lines(user_id).await?;
        let line_count = lines.len();

        let list = ShoppingList::aggregate(lines);

        metrics::record_shopping_list_export(list.len());
        tracing::info!(
            user_id,
            lines = line_count,
            items = list.len(),
            "Shopping list generated"
        );

        Ok(list)
    }
}

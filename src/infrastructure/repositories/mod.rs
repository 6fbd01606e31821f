//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! ## Available Repositories
//!
//! - **PgUserRepository** - User accounts and subscription listings
//! - **PgIngredientRepository** / **PgTagRepository** - Reference catalog
//! - **PgRecipeRepository** - Recipes with tag links and ingredient lines
//! - **PgRelationRepository** - Favorites, shopping cart and subscriptions
//!
//! [`Repositories`] bundles one instance of each behind trait objects so the
//! application state does not depend on the storage backend.

pub mod catalog_repository;
pub mod recipe_repository;
pub mod relation_repository;
pub mod user_repository;

use std::sync::Arc;

use sqlx::PgPool;

use crate::domain::{
    IngredientRepository, RecipeRepository, RelationKind, RelationRepository, TagRepository,
    UserRepository,
};

pub use catalog_repository::{PgIngredientRepository, PgTagRepository};
pub use recipe_repository::PgRecipeRepository;
pub use relation_repository::PgRelationRepository;
pub use user_repository::PgUserRepository;

/// Every repository the services need.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub ingredients: Arc<dyn IngredientRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub recipes: Arc<dyn RecipeRepository>,
    pub favorites: Arc<dyn RelationRepository>,
    pub shopping_cart: Arc<dyn RelationRepository>,
    pub subscriptions: Arc<dyn RelationRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            ingredients: Arc::new(PgIngredientRepository::new(pool.clone())),
            tags: Arc::new(PgTagRepository::new(pool.clone())),
            recipes: Arc::new(PgRecipeRepository::new(pool.clone())),
            favorites: Arc::new(PgRelationRepository::new(pool.clone(), RelationKind::Favorite)),
            shopping_cart: Arc::new(PgRelationRepository::new(
                pool.clone(),
                RelationKind::ShoppingCart,
            )),
            subscriptions: Arc::new(PgRelationRepository::new(pool, RelationKind::Subscription)),
        }
    }

    /// Repository for a relation kind.
    pub fn relation(&self, kind: RelationKind) -> Arc<dyn RelationRepository> {
        match kind {
            RelationKind::Favorite => self.favorites.clone(),
            RelationKind::ShoppingCart => self.shopping_cart.clone(),
            RelationKind::Subscription => self.subscriptions.clone(),
        }
    }
}

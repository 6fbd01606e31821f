//! # Domain Entities
//!
//! Core domain entities representing the main business objects of the
//! recipe service. All entities map directly to their database tables.
//!
//! ## Core Entities
//!
//! - **User**: Registered account, author of recipes
//! - **Recipe**: Published recipe with tags and ingredient lines
//! - **Ingredient**: Catalog entry, unique (name, measurement unit) pair
//! - **Tag**: Categorical label used for filtering
//!
//! ## Relations
//!
//! - **Favorite**, **ShoppingCart**, **Subscription**: (owner, target) pairs
//!   sharing the [`RelationRepository`] contract
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod ingredient;
mod recipe;
mod relation;
mod tag;
mod user;

pub use ingredient::{Ingredient, IngredientRepository, NewIngredient};
pub use recipe::{
    IngredientAmount, Recipe, RecipeDraft, RecipeFilter, RecipeIngredient, RecipeRepository,
    RecipeSummary, MAX_AMOUNT, MAX_COOKING_TIME, MAX_RECIPE_NAME_LENGTH, MIN_AMOUNT,
    MIN_COOKING_TIME,
};
pub use relation::{RelationKind, RelationRepository};
pub use tag::{NewTag, Tag, TagRepository};
pub use user::{is_valid_username, User, UserRepository, MAX_EMAIL_LENGTH, MAX_NAME_LENGTH};

#[cfg(test)]
pub use ingredient::MockIngredientRepository;
#[cfg(test)]
pub use recipe::MockRecipeRepository;
#[cfg(test)]
pub use relation::MockRelationRepository;
#[cfg(test)]
pub use tag::MockTagRepository;
#[cfg(test)]
pub use user::MockUserRepository;

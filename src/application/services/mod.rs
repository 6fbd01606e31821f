//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **UserService**: Registration and user lookups
//! - **RecipeService**: Recipe CRUD and filtered listings
//! - **RecipeRelationService**: Favorite and shopping cart toggles
//! - **SubscriptionService**: Following authors
//! - **ShoppingListService**: Cart consolidation for download
//! - **CatalogService**: Ingredients, tags and their bulk loader

pub mod catalog_service;
pub mod recipe_service;
pub mod relation_service;
pub mod shopping_list_service;
pub mod subscription_service;
pub mod user_service;

pub use catalog_service::{read_catalog_file, CatalogService, CatalogServiceImpl};
pub use recipe_service::{RecipeService, RecipeServiceImpl};
pub use relation_service::{RecipeRelationService, RecipeRelationServiceImpl};
pub use shopping_list_service::{
    ShoppingListService, ShoppingListServiceImpl, SHOPPING_LIST_FILENAME,
};
pub use subscription_service::{SubscriptionService, SubscriptionServiceImpl};
pub use user_service::{UserService, UserServiceImpl};

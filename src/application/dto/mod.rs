//! Data Transfer Objects
//!
//! DTOs for API request/response serialization.

pub mod request;
pub mod response;

pub use request::{
    is_truthy, IngredientQuery, PageQuery, RecipeIngredientRequest, RecipeListQuery,
    RecipeRequest, RegisterRequest, SubscriptionsQuery,
};
pub use response::{
    IngredientResponse, PaginatedResponse, RecipeIngredientResponse, RecipeResponse,
    RecipeShortResponse, RegisteredUserResponse, SubscriptionResponse,
    TagResponse, UserResponse,
};

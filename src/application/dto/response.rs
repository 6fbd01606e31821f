//! Response DTOs
//!
//! Data structures for API response bodies.
//!
//! Snowflake IDs (users, recipes) are serialized as strings; catalog IDs
//! (ingredients, tags) are plain integers.

use axum::http::Uri;
use serde::Serialize;

use crate::domain::{
    Ingredient, Page, Recipe, RecipeIngredient, RecipeSummary, Tag, User,
};

/// Newly registered user
#[derive(Debug, Serialize)]
pub struct RegisteredUserResponse {
    pub email: String,
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for RegisteredUserResponse {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            id: user.id.to_string(),
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// User as seen by a viewer
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub email: String,
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

impl UserResponse {
    pub fn from_user(user: User, is_subscribed: bool) -> Self {
        Self {
            email: user.email,
            id: user.id.to_string(),
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            is_subscribed,
        }
    }
}

/// Tag response
#[derive(Debug, Clone, Serialize)]
pub struct TagResponse {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub slug: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            color: tag.color,
            slug: tag.slug,
        }
    }
}

/// Ingredient response
#[derive(Debug, Clone, Serialize)]
pub struct IngredientResponse {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            measurement_unit: ingredient.measurement_unit,
        }
    }
}

/// Ingredient line inside a recipe
#[derive(Debug, Clone, Serialize)]
pub struct RecipeIngredientResponse {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl From<RecipeIngredient> for RecipeIngredientResponse {
    fn from(line: RecipeIngredient) -> Self {
        Self {
            id: line.ingredient_id,
            name: line.name,
            measurement_unit: line.measurement_unit,
            amount: line.amount,
        }
    }
}

/// Full recipe representation
#[derive(Debug, Clone, Serialize)]
pub struct RecipeResponse {
    pub id: String,
    pub tags: Vec<TagResponse>,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub created_at: String,
}

impl RecipeResponse {
    pub fn build(
        recipe: Recipe,
        author: UserResponse,
        is_favorited: bool,
        is_in_shopping_cart: bool,
    ) -> Self {
        Self {
            id: recipe.id.to_string(),
            tags: recipe.tags.into_iter().map(TagResponse::from).collect(),
            author,
            ingredients: recipe
                .ingredients
                .into_iter()
                .map(RecipeIngredientResponse::from)
                .collect(),
            is_favorited,
            is_in_shopping_cart,
            name: recipe.name,
            image: recipe.image,
            text: recipe.text,
            cooking_time: recipe.cooking_time,
            created_at: recipe.created_at.to_rfc3339(),
        }
    }
}

/// Short recipe representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeShortResponse {
    pub id: String,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<RecipeSummary> for RecipeShortResponse {
    fn from(summary: RecipeSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            name: summary.name,
            image: summary.image,
            cooking_time: summary.cooking_time,
        }
    }
}

/// Followed author with a preview of their recipes
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub recipes: Vec<RecipeShortResponse>,
    pub recipes_count: i64,
}

/// Page-number pagination envelope
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    /// Wrap a page, deriving `next`/`previous` links from the request URI.
    pub fn from_page(page: Page<T>, uri: &Uri) -> Self {
        let next = page
            .has_next()
            .then(|| page_link(uri, page.request.page + 1));
        let previous = page
            .has_previous()
            .then(|| page_link(uri, page.request.page - 1));

        Self {
            count: page.total,
            next,
            previous,
            results: page.items,
        }
    }
}

/// `uri` with its `page` parameter replaced; page 1 drops the parameter.
fn page_link(uri: &Uri, page: u32) -> String {
    let page_param = format!("page={}", page);
    let mut params: Vec<&str> = uri
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|p| !p.is_empty() && *p != "page" && !p.starts_with("page="))
        .collect();

    if page > 1 {
        params.push(&page_param);
    }

    if params.is_empty() {
        uri.path().to_string()
    } else {
        format!("{}?{}", uri.path(), params.join("&"))
    }
}

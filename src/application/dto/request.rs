//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::{
    is_valid_username, IngredientAmount, RecipeDraft, MAX_AMOUNT, MAX_COOKING_TIME,
    MAX_EMAIL_LENGTH, MAX_NAME_LENGTH, MAX_RECIPE_NAME_LENGTH, MIN_COOKING_TIME,
};

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        email(message = "Invalid email format"),
        length(max = MAX_EMAIL_LENGTH, message = "Email must be at most 254 characters")
    )]
    pub email: String,

    #[validate(
        length(min = 1, max = MAX_NAME_LENGTH, message = "Username must be 1-150 characters"),
        custom(function = "validate_username")
    )]
    pub username: String,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "First name must be 1-150 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Last name must be 1-150 characters"))]
    pub last_name: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if is_valid_username(username) {
        Ok(())
    } else {
        let mut error = ValidationError::new("username");
        error.message = Some(
            "Letters and digits, optionally separated by single '_', '.' or '-'".into(),
        );
        Err(error)
    }
}

/// One `{id, amount}` entry of a recipe payload
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct RecipeIngredientRequest {
    pub id: i64,

    // The lower bound is a business rule checked by the domain.
    #[validate(range(max = MAX_AMOUNT, message = "Amount must not exceed 32000"))]
    pub amount: i32,
}

/// Create / update recipe request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeRequest {
    #[validate(
        length(min = 1, message = "At least one ingredient is required"),
        nested
    )]
    pub ingredients: Vec<RecipeIngredientRequest>,

    #[validate(length(min = 1, message = "At least one tag is required"))]
    pub tags: Vec<i64>,

    #[validate(length(min = 1, message = "An image is required"))]
    pub image: String,

    #[validate(length(min = 1, max = MAX_RECIPE_NAME_LENGTH, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: String,

    #[validate(range(
        min = MIN_COOKING_TIME,
        max = MAX_COOKING_TIME,
        message = "Cooking time must be between 1 and 32000 minutes"
    ))]
    pub cooking_time: i32,
}

impl From<RecipeRequest> for RecipeDraft {
    fn from(request: RecipeRequest) -> Self {
        Self {
            name: request.name,
            image: request.image,
            text: request.text,
            cooking_time: request.cooking_time,
            tag_ids: request.tags,
            ingredients: request
                .ingredients
                .into_iter()
                .map(|line| IngredientAmount {
                    ingredient_id: line.id,
                    amount: line.amount,
                })
                .collect(),
        }
    }
}

/// Page-number pagination parameters
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Recipe list query parameters
///
/// `tags` may repeat: `?tags=breakfast&tags=lunch`.
#[derive(Debug, Default, Deserialize)]
pub struct RecipeListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_favorited: Option<String>,
    pub is_in_shopping_cart: Option<String>,
}

impl RecipeListQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Subscriptions list query parameters
#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Cap on embedded recipes; ignored unless a non-negative integer
    pub recipes_limit: Option<String>,
}

impl SubscriptionsQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            limit: self.limit,
        }
    }

    pub fn recipes_limit(&self) -> Option<i64> {
        self.recipes_limit
            .as_deref()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| *v >= 0)
    }
}

/// Ingredient search query
#[derive(Debug, Default, Deserialize)]
pub struct IngredientQuery {
    /// Case-insensitive name prefix
    pub name: Option<String>,
}

/// Interpret a `1`/`true` style query flag.
pub fn is_truthy(flag: Option<&str>) -> bool {
    matches!(
        flag.map(|f| f.trim().to_ascii_lowercase()).as_deref(),
        Some("1") | Some("true")
    )
}

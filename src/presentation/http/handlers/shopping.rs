//! Shopping List Download

use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
};

use crate::application::services::{
    ShoppingListService, ShoppingListServiceImpl, SHOPPING_LIST_FILENAME,
};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Download the consolidated ingredient list of the caller's cart as a
/// plain-text attachment.
pub async fn download_shopping_cart(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let list = ShoppingListServiceImpl::new(state.repos.recipes.clone())
        .shopping_list(auth.user_id)
        .await?;

    let headers = [
        (CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
        (
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", SHOPPING_LIST_FILENAME),
        ),
    ];

    Ok((headers, list.render_text()))
}

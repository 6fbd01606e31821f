//! User Handlers
//!
//! Registration, profiles and subscriptions.

use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::{
    PageQuery, PaginatedResponse, RegisterRequest, RegisteredUserResponse, SubscriptionResponse,
    SubscriptionsQuery, UserResponse,
};
use crate::application::services::{
    SubscriptionService, SubscriptionServiceImpl, UserService, UserServiceImpl,
};
use crate::presentation::http::extractors::{JsonBody, MaybeAuthUser, PathId, QueryParams};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn user_service(state: &AppState) -> UserServiceImpl {
    UserServiceImpl::new(
        state.repos.users.clone(),
        state.repos.subscriptions.clone(),
        state.snowflake.clone(),
    )
}

fn subscription_service(state: &AppState) -> SubscriptionServiceImpl {
    SubscriptionServiceImpl::new(
        state.repos.subscriptions.clone(),
        state.repos.users.clone(),
        state.repos.recipes.clone(),
    )
}

/// Register a new account
pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisteredUserResponse>), AppError> {
    let user = user_service(&state).register(body).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// List users ordered by username
pub async fn list_users(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    OriginalUri(uri): OriginalUri,
    QueryParams(query): QueryParams<PageQuery>,
) -> Result<Json<PaginatedResponse<UserResponse>>, AppError> {
    let page = state.page_request(&query);
    let users = user_service(&state)
        .list_users(viewer.user_id(), page)
        .await?;

    Ok(Json(PaginatedResponse::from_page(users, &uri)))
}

/// Get user by ID
pub async fn get_user(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    PathId(user_id): PathId,
) -> Result<Json<UserResponse>, AppError> {
    let user = user_service(&state)
        .get_user(viewer.user_id(), user_id)
        .await?;

    Ok(Json(user))
}

/// Get current user
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = user_service(&state).me(auth.user_id).await?;
    Ok(Json(user))
}

/// Authors the caller follows, with a preview of their recipes
pub async fn list_subscriptions(
    State(state): State<AppState>,
    auth: AuthUser,
    OriginalUri(uri): OriginalUri,
    QueryParams(query): QueryParams<SubscriptionsQuery>,
) -> Result<Json<PaginatedResponse<SubscriptionResponse>>, AppError> {
    let page = state.page_request(&query.page_query());
    let subscriptions = subscription_service(&state)
        .list_subscriptions(auth.user_id, page, query.recipes_limit())
        .await?;

    Ok(Json(PaginatedResponse::from_page(subscriptions, &uri)))
}

/// Follow an author
pub async fn subscribe(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(author_id): PathId,
    QueryParams(query): QueryParams<SubscriptionsQuery>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), AppError> {
    let entry = subscription_service(&state)
        .subscribe(auth.user_id, author_id, query.recipes_limit())
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// Stop following an author
pub async fn unsubscribe(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(author_id): PathId,
) -> Result<StatusCode, AppError> {
    subscription_service(&state)
        .unsubscribe(auth.user_id, author_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

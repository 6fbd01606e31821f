//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::presentation::middleware::{
    authenticate, create_cors_layer, create_trace_layer, track_metrics,
};
use crate::startup::AppState;

/// Create the main application router with its middleware stack
pub fn create_router(state: AppState) -> Router {
    let cors = create_cors_layer(&state.settings.cors);

    Router::new()
        .nest("/api", api_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(handlers::health::metrics_handler))
        .layer(middleware::from_fn(track_metrics))
        .layer(create_trace_layer())
        .layer(cors)
        .with_state(state)
}

/// Resource routes. Every request passes through `authenticate`; handlers
/// decide whether a caller is required.
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/recipes", recipe_routes())
        .nest("/users", user_routes())
        .nest("/ingredients", ingredient_routes())
        .nest("/tags", tag_routes())
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}

fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::recipe::list_recipes).post(handlers::recipe::create_recipe),
        )
        .route(
            "/download_shopping_cart",
            get(handlers::shopping::download_shopping_cart),
        )
        .route(
            "/{id}",
            get(handlers::recipe::get_recipe)
                .patch(handlers::recipe::update_recipe)
                .delete(handlers::recipe::delete_recipe),
        )
        .route(
            "/{id}/favorite",
            post(handlers::recipe::add_favorite).delete(handlers::recipe::remove_favorite),
        )
        .route(
            "/{id}/shopping_cart",
            post(handlers::recipe::add_to_shopping_cart)
                .delete(handlers::recipe::remove_from_shopping_cart),
        )
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::user::list_users).post(handlers::user::register),
        )
        .route("/me", get(handlers::user::me))
        .route("/subscriptions", get(handlers::user::list_subscriptions))
        .route("/{id}", get(handlers::user::get_user))
        .route(
            "/{id}/subscribe",
            post(handlers::user::subscribe).delete(handlers::user::unsubscribe),
        )
}

fn ingredient_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::catalog::list_ingredients))
        .route("/{id}", get(handlers::catalog::get_ingredient))
}

fn tag_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::catalog::list_tags))
        .route("/{id}", get(handlers::catalog::get_tag))
}

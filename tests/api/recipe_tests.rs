//! Recipe API Tests

use axum::http::StatusCode;
use foodgram::domain::RelationKind;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{sign, TestApp, JWT_SECRET};

#[tokio::test]
async fn test_create_recipe_returns_full_representation() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice");
    let token = app.token_for(alice);

    let response = app
        .post(
            "/api/recipes",
            Some(&token),
            Some(app.recipe_payload("Pancakes", &[("flour", "g", 200), ("egg", "pcs", 2)])),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let recipe = response.json();
    assert_eq!(recipe["name"], "Pancakes");
    assert_eq!(recipe["cooking_time"], 15);
    assert_eq!(recipe["author"]["id"], alice.to_string());
    assert_eq!(recipe["author"]["is_subscribed"], false);
    assert_eq!(recipe["is_favorited"], false);
    assert_eq!(recipe["is_in_shopping_cart"], false);
    assert_eq!(recipe["tags"][0]["slug"], "breakfast");

    let ingredients = recipe["ingredients"].as_array().unwrap();
    assert_eq!(ingredients.len(), 2);
    assert_eq!(ingredients[0]["name"], "egg");
    assert_eq!(ingredients[0]["amount"], 2);
    assert_eq!(ingredients[1]["measurement_unit"], "g");
}

#[tokio::test]
async fn test_anonymous_user_cannot_create_recipe() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/recipes",
            None,
            Some(app.recipe_payload("Soup", &[("milk", "ml", 300)])),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.store.recipe_count(), 0);
}

#[tokio::test]
async fn test_invalid_token_is_rejected_even_on_public_routes() {
    let app = TestApp::new().await;
    let expired = sign("1", -3600, JWT_SECRET);

    let response = app.get("/api/recipes", Some(&expired)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let garbage = app.get("/api/recipes", Some("not-a-jwt")).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_zero_cooking_time_is_validation_error() {
    let app = TestApp::new().await;
    let token = app.token_for(app.create_user("alice"));
    let mut payload = app.recipe_payload("Toast", &[("flour", "g", 50)]);
    payload["cooking_time"] = json!(0);

    let response = app.post("/api/recipes", Some(&token), Some(payload)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let body = response.json();
    assert_eq!(body["errors"][0]["field"], "cooking_time");
}

#[tokio::test]
async fn test_zero_amount_is_rejected() {
    let app = TestApp::new().await;
    let token = app.token_for(app.create_user("alice"));

    let response = app
        .post(
            "/api/recipes",
            Some(&token),
            Some(app.recipe_payload("Toast", &[("flour", "g", 0)])),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.recipe_count(), 0);
}

#[tokio::test]
async fn test_unknown_ingredient_is_validation_error() {
    let app = TestApp::new().await;
    let token = app.token_for(app.create_user("alice"));
    let mut payload = app.recipe_payload("Toast", &[("flour", "g", 50)]);
    payload["ingredients"] = json!([{ "id": 987654, "amount": 1 }]);

    let response = app.post("/api/recipes", Some(&token), Some(payload)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["errors"][0]["field"], "ingredients");
}

#[tokio::test]
async fn test_duplicate_tags_are_rejected() {
    let app = TestApp::new().await;
    let token = app.token_for(app.create_user("alice"));
    let tag = app.store.tag_id("lunch");
    let mut payload = app.recipe_payload("Toast", &[("flour", "g", 50)]);
    payload["tags"] = json!([tag, tag]);

    let response = app.post("/api/recipes", Some(&token), Some(payload)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["errors"][0]["field"], "tags");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = TestApp::new().await;
    let token = app.token_for(app.create_user("alice"));

    let response = app
        .post("/api/recipes", Some(&token), Some(json!({ "name": "No fields" })))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["code"], 10006);
}

#[tokio::test]
async fn test_get_recipe_and_missing_recipe() {
    let app = TestApp::new().await;
    let token = app.token_for(app.create_user("alice"));
    let id = app.create_recipe(&token, "Omelette", &[("egg", "pcs", 3)]).await;

    let response = app.get(&format!("/api/recipes/{id}"), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["id"], id);

    let missing = app.get("/api/recipes/123", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_replaces_ingredients() {
    let app = TestApp::new().await;
    let token = app.token_for(app.create_user("alice"));
    let id = app.create_recipe(&token, "Omelette", &[("egg", "pcs", 3)]).await;

    let response = app
        .patch(
            &format!("/api/recipes/{id}"),
            Some(&token),
            app.recipe_payload("Sweet omelette", &[("egg", "pcs", 2), ("sugar", "g", 10)]),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let recipe = response.json();
    assert_eq!(recipe["name"], "Sweet omelette");
    assert_eq!(recipe["ingredients"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_non_author_cannot_update_or_delete() {
    let app = TestApp::new().await;
    let alice = app.token_for(app.create_user("alice"));
    let bob = app.token_for(app.create_user("bob"));
    let id = app.create_recipe(&alice, "Omelette", &[("egg", "pcs", 3)]).await;

    let update = app
        .patch(
            &format!("/api/recipes/{id}"),
            Some(&bob),
            app.recipe_payload("Stolen", &[("egg", "pcs", 1)]),
        )
        .await;
    assert_eq!(update.status, StatusCode::FORBIDDEN);

    let delete = app.delete(&format!("/api/recipes/{id}"), Some(&bob)).await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);
    assert_eq!(app.store.recipe_count(), 1);
}

#[tokio::test]
async fn test_admin_can_delete_any_recipe() {
    let app = TestApp::new().await;
    let alice = app.token_for(app.create_user("alice"));
    let admin = app.token_for(app.create_admin("root"));
    let id = app.create_recipe(&alice, "Omelette", &[("egg", "pcs", 3)]).await;

    let response = app.delete(&format!("/api/recipes/{id}"), Some(&admin)).await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(app.store.recipe_count(), 0);
}

#[tokio::test]
async fn test_deleting_recipe_removes_it_from_carts_and_favorites() {
    let app = TestApp::new().await;
    let alice_id = app.create_user("alice");
    let alice = app.token_for(alice_id);
    let bob_id = app.create_user("bob");
    let bob = app.token_for(bob_id);
    let id = app.create_recipe(&alice, "Omelette", &[("egg", "pcs", 3)]).await;

    app.post(&format!("/api/recipes/{id}/shopping_cart"), Some(&bob), None)
        .await;
    app.post(&format!("/api/recipes/{id}/favorite"), Some(&bob), None)
        .await;
    assert_eq!(app.store.relation_count(RelationKind::ShoppingCart), 1);

    let response = app.delete(&format!("/api/recipes/{id}"), Some(&alice)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    assert_eq!(app.store.relation_count(RelationKind::ShoppingCart), 0);
    assert_eq!(app.store.relation_count(RelationKind::Favorite), 0);

    let download = app
        .get("/api/recipes/download_shopping_cart", Some(&bob))
        .await;
    assert_eq!(download.text(), "");
}

#[tokio::test]
async fn test_list_is_newest_first_and_paginated() {
    let app = TestApp::new().await;
    let token = app.token_for(app.create_user("alice"));
    for name in ["First", "Second", "Third"] {
        app.create_recipe(&token, name, &[("egg", "pcs", 1)]).await;
    }

    let response = app.get("/api/recipes?limit=2", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let page = response.json();
    assert_eq!(page["count"], 3);
    assert_eq!(page["results"][0]["name"], "Third");
    assert_eq!(page["results"][1]["name"], "Second");
    assert_eq!(page["next"], "/api/recipes?limit=2&page=2");
    assert!(page["previous"].is_null());

    let second = app.get("/api/recipes?limit=2&page=2", None).await.json();
    assert_eq!(second["results"].as_array().unwrap().len(), 1);
    assert_eq!(second["results"][0]["name"], "First");
    assert!(second["next"].is_null());
    assert_eq!(second["previous"], "/api/recipes?limit=2");
}

#[tokio::test]
async fn test_filter_by_author_and_tags() {
    let app = TestApp::new().await;
    let alice_id = app.create_user("alice");
    let alice = app.token_for(alice_id);
    let bob = app.token_for(app.create_user("bob"));

    app.create_recipe(&alice, "Alice breakfast", &[("egg", "pcs", 1)])
        .await;
    let mut lunch = app.recipe_payload("Bob lunch", &[("flour", "g", 100)]);
    lunch["tags"] = json!([app.store.tag_id("lunch")]);
    app.post("/api/recipes", Some(&bob), Some(lunch)).await;

    let by_author = app
        .get(&format!("/api/recipes?author={alice_id}"), None)
        .await
        .json();
    assert_eq!(by_author["count"], 1);
    assert_eq!(by_author["results"][0]["name"], "Alice breakfast");

    let by_tag = app.get("/api/recipes?tags=lunch", None).await.json();
    assert_eq!(by_tag["count"], 1);
    assert_eq!(by_tag["results"][0]["name"], "Bob lunch");

    let any_tag = app
        .get("/api/recipes?tags=lunch&tags=breakfast", None)
        .await
        .json();
    assert_eq!(any_tag["count"], 2);
}

#[tokio::test]
async fn test_favorite_filter_is_ignored_for_anonymous_viewers() {
    let app = TestApp::new().await;
    let alice = app.token_for(app.create_user("alice"));
    let id = app.create_recipe(&alice, "Omelette", &[("egg", "pcs", 3)]).await;
    app.create_recipe(&alice, "Toast", &[("flour", "g", 30)]).await;
    app.post(&format!("/api/recipes/{id}/favorite"), Some(&alice), None)
        .await;

    let mine = app
        .get("/api/recipes?is_favorited=1", Some(&alice))
        .await
        .json();
    assert_eq!(mine["count"], 1);
    assert_eq!(mine["results"][0]["is_favorited"], true);

    let anonymous = app.get("/api/recipes?is_favorited=1", None).await.json();
    assert_eq!(anonymous["count"], 2);
}

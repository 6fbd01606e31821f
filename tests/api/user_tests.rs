//! User and Subscription API Tests

use axum::http::StatusCode;
use foodgram::domain::RelationKind;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::TestApp;

fn registration(username: &str, email: &str) -> serde_json::Value {
    json!({
        "email": email,
        "username": username,
        "first_name": "Ada",
        "last_name": "Lovelace",
        "password": "correct-horse-battery",
    })
}

#[tokio::test]
async fn test_register_then_fetch_own_profile() {
    let app = TestApp::new().await;

    let response = app
        .post("/api/users", None, Some(registration("ada", "Ada@Example.com")))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let user = response.json();
    assert_eq!(user["username"], "ada");
    assert_eq!(user["email"], "ada@example.com");
    assert!(user.get("password").is_none());

    let id: i64 = user["id"].as_str().unwrap().parse().unwrap();
    let me = app.get("/api/users/me", Some(&app.token_for(id))).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.json()["username"], "ada");
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = TestApp::new().await;
    app.post("/api/users", None, Some(registration("ada", "ada@example.com")))
        .await;

    let response = app
        .post("/api/users", None, Some(registration("ada2", "ADA@example.com")))
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_invalid_registration_lists_field_errors() {
    let app = TestApp::new().await;
    let mut payload = registration("bad name!", "not-an-email");
    payload["password"] = json!("short");

    let response = app.post("/api/users", None, Some(payload)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let fields: Vec<String> = response.json()["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_string())
        .collect();
    assert!(fields.contains(&"email".to_string()));
    assert!(fields.contains(&"username".to_string()));
    assert!(fields.contains(&"password".to_string()));
}

#[tokio::test]
async fn test_me_requires_authentication() {
    let app = TestApp::new().await;

    let response = app.get("/api/users/me", None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_users_ordered_by_username() {
    let app = TestApp::new().await;
    for name in ["carol", "alice", "bob"] {
        app.create_user(name);
    }

    let page = app.get("/api/users?limit=2", None).await.json();

    assert_eq!(page["count"], 3);
    assert_eq!(page["results"][0]["username"], "alice");
    assert_eq!(page["results"][1]["username"], "bob");
    assert_eq!(page["next"], "/api/users?limit=2&page=2");
}

#[tokio::test]
async fn test_subscribe_to_self_is_rejected() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice");

    let response = app
        .post(
            &format!("/api/users/{alice}/subscribe"),
            Some(&app.token_for(alice)),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["code"], 10005);
    assert_eq!(app.store.relation_count(RelationKind::Subscription), 0);
}

#[tokio::test]
async fn test_subscribe_returns_author_with_recipes() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice");
    let alice_token = app.token_for(alice);
    let bob_token = app.token_for(app.create_user("bob"));
    for name in ["One", "Two", "Three"] {
        app.create_recipe(&alice_token, name, &[("egg", "pcs", 1)])
            .await;
    }

    let response = app
        .post(
            &format!("/api/users/{alice}/subscribe?recipes_limit=2"),
            Some(&bob_token),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let entry = response.json();
    assert_eq!(entry["username"], "alice");
    assert_eq!(entry["is_subscribed"], true);
    assert_eq!(entry["recipes_count"], 3);
    let recipes = entry["recipes"].as_array().unwrap();
    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0]["name"], "Three");

    let profile = app
        .get(&format!("/api/users/{alice}"), Some(&bob_token))
        .await
        .json();
    assert_eq!(profile["is_subscribed"], true);
}

#[tokio::test]
async fn test_subscribe_twice_conflicts() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice");
    let bob_token = app.token_for(app.create_user("bob"));
    let uri = format!("/api/users/{alice}/subscribe");

    assert_eq!(app.post(&uri, Some(&bob_token), None).await.status, StatusCode::CREATED);
    assert_eq!(app.post(&uri, Some(&bob_token), None).await.status, StatusCode::CONFLICT);
    assert_eq!(app.store.relation_count(RelationKind::Subscription), 1);
}

#[tokio::test]
async fn test_subscribe_to_missing_user_is_not_found() {
    let app = TestApp::new().await;
    let token = app.token_for(app.create_user("bob"));

    let response = app.post("/api/users/777/subscribe", Some(&token), None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_subscriptions_list_honours_recipes_limit() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice");
    let carol = app.create_user("carol");
    let bob_token = app.token_for(app.create_user("bob"));
    let alice_token = app.token_for(alice);
    for name in ["One", "Two"] {
        app.create_recipe(&alice_token, name, &[("egg", "pcs", 1)])
            .await;
    }
    for author in [carol, alice] {
        app.post(&format!("/api/users/{author}/subscribe"), Some(&bob_token), None)
            .await;
    }

    let limited = app
        .get("/api/users/subscriptions?recipes_limit=1", Some(&bob_token))
        .await;
    assert_eq!(limited.status, StatusCode::OK);
    let page = limited.json();
    assert_eq!(page["count"], 2);
    assert_eq!(page["results"][0]["username"], "alice");
    assert_eq!(page["results"][0]["recipes"].as_array().unwrap().len(), 1);
    assert_eq!(page["results"][0]["recipes_count"], 2);
    assert_eq!(page["results"][1]["username"], "carol");
    assert_eq!(page["results"][1]["recipes_count"], 0);

    let ignored = app
        .get("/api/users/subscriptions?recipes_limit=abc", Some(&bob_token))
        .await
        .json();
    assert_eq!(ignored["results"][0]["recipes"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unsubscribe_then_again_is_not_found() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice");
    let bob_token = app.token_for(app.create_user("bob"));
    let uri = format!("/api/users/{alice}/subscribe");
    app.post(&uri, Some(&bob_token), None).await;

    assert_eq!(app.delete(&uri, Some(&bob_token)).await.status, StatusCode::NO_CONTENT);
    assert_eq!(app.delete(&uri, Some(&bob_token)).await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.store.relation_count(RelationKind::Subscription), 0);
}

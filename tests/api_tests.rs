//! API integration tests
//!
//! These run against a live server started separately with a fresh data
//! directory:
//!
//! ```sh
//! PELAGOS_DATA_DIR=$(mktemp -d) cargo run &
//! cargo test -- --ignored
//! ```

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn client() -> Client {
    // Cookie store keeps the session across requests.
    Client::builder().cookie_store(true).build().unwrap()
}

fn unique_name(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    format!("{prefix}_{nanos}")
}

/// Register and log in a fresh user, returning its username
async fn login_fresh_user(client: &Client) -> String {
    let username = unique_name("user");
    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "username": username,
            "password": "secret1",
            "password_confirm": "secret1"
        }))
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "username": username, "password": "secret1" }))
        .send()
        .await
        .expect("Failed to send login request");
    assert!(response.status().is_success());

    username
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let response = client()
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_register_login_scenario() {
    let client = client();
    let username = unique_name("alice");

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "username": username,
            "password": "secret1",
            "password_confirm": "secret1"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // Registering the same username again conflicts.
    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "username": username,
            "password": "secret1",
            "password_confirm": "secret1"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Wrong password: generic 401.
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "username": username, "password": "wrong" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);

    // Correct credentials log in and bind the session.
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "username": username, "password": "secret1" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], username.as_str());
}

#[tokio::test]
#[ignore]
async fn test_guestbook_requires_login() {
    let response = client()
        .post(format!("{}/guestbook", BASE_URL))
        .json(&json!({ "body": "hello" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_guestbook_post_and_recent_order() {
    let client = client();
    login_fresh_user(&client).await;

    for body in ["first", "second"] {
        let response = client
            .post(format!("{}/guestbook", BASE_URL))
            .json(&json!({ "body": body }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201);
    }

    // Blank bodies are rejected.
    let response = client
        .post(format!("{}/guestbook", BASE_URL))
        .json(&json!({ "body": "   " }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let response = client
        .get(format!("{}/guestbook?limit=2", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let messages = body.as_array().expect("expected array");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["body"], "second");
    assert_eq!(messages[1]["body"], "first");
}

#[tokio::test]
#[ignore]
async fn test_favorites_are_idempotent() {
    let client = client();
    login_fresh_user(&client).await;

    for _ in 0..2 {
        let response = client
            .put(format!("{}/favorites/orcinus_orca", BASE_URL))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success());
    }

    let response = client
        .get(format!("{}/favorites", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let ids = body["ids"].as_array().expect("expected ids array");
    let orcas = ids.iter().filter(|v| *v == "orcinus_orca").count();
    assert_eq!(orcas, 1);

    let response = client
        .delete(format!("{}/favorites/orcinus_orca", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_search_hit_feeds_weekly_stats() {
    let client = client();

    // Plain detail view: no tally.
    let response = client
        .get(format!("{}/species/orcinus_orca", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Arrival from search counts.
    let response = client
        .get(format!("{}/species/orcinus_orca?from=search", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["total_searches"].as_u64().unwrap() >= 1);
    assert!(body["week_id"].as_str().unwrap().contains("-W"));
    let top = body["top"].as_array().expect("expected top array");
    assert!(top.iter().any(|r| r["id"] == "orcinus_orca"));
}

#[tokio::test]
#[ignore]
async fn test_visit_counted_once_per_session() {
    let client = client();

    let response = client
        .get(format!("{}/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let before: Value = response.json().await.expect("Failed to parse response");
    let count = before["visitor_count"].as_u64().unwrap();

    // Same session: further requests do not re-count.
    for _ in 0..3 {
        client
            .get(format!("{}/stats", BASE_URL))
            .send()
            .await
            .expect("Failed to send request");
    }
    let response = client
        .get(format!("{}/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let after: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(after["visitor_count"].as_u64().unwrap(), count);
}

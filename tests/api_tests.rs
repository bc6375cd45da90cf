//! API integration tests.
//!
//! These run against a live server with a scratch database:
//! `cargo run` in one terminal, then `cargo test -- --ignored`.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

async fn create_author(client: &Client, first: &str, last: &str) -> Value {
    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({ "first_name": first, "last_name": last }))
        .send()
        .await
        .expect("Failed to create author");
    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse author")
}

async fn create_book(client: &Client, title: &str, author_id: Option<i64>) -> Value {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": title,
            "summary": "<p>Test summary</p>",
            "author_id": author_id,
        }))
        .send()
        .await
        .expect("Failed to create book");
    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse book")
}

async fn create_instance(client: &Client, book_id: i64) -> Value {
    let response = client
        .post(format!("{}/book-instances", BASE_URL))
        .json(&json!({ "book_id": book_id }))
        .send()
        .await
        .expect("Failed to create book instance");
    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse instance")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
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
async fn test_new_instance_defaults_to_managed() {
    let client = Client::new();
    let book = create_book(&client, "Defaults", None).await;
    let instance = create_instance(&client, book["id"].as_i64().unwrap()).await;

    assert_eq!(instance["status"], "m");
    assert!(instance["unique_id"].is_string());
    assert!(instance["due_back"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_instance_unique_id_is_immutable() {
    let client = Client::new();
    let book = create_book(&client, "Immutable", None).await;
    let instance = create_instance(&client, book["id"].as_i64().unwrap()).await;
    let unique_id = instance["unique_id"].as_str().unwrap().to_string();

    let response = client
        .put(format!(
            "{}/book-instances/{}",
            BASE_URL,
            instance["id"].as_i64().unwrap()
        ))
        .json(&json!({ "status": "a" }))
        .send()
        .await
        .expect("Failed to update instance");
    assert!(response.status().is_success());

    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["status"], "a");
    assert_eq!(updated["unique_id"].as_str().unwrap(), unique_id);
}

#[tokio::test]
#[ignore]
async fn test_deleting_author_keeps_books() {
    let client = Client::new();
    let author = create_author(&client, "Orphan", "Maker").await;
    let author_id = author["id"].as_i64().unwrap();
    let book = create_book(&client, "Orphaned Book", Some(author_id)).await;
    let book_id = book["id"].as_i64().unwrap();

    let response = client
        .delete(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to delete author");
    assert_eq!(response.status(), 204);

    // the book survives with its author cleared
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to fetch book");
    assert!(response.status().is_success());

    let body: Value = response.json().await.unwrap();
    assert!(body["author_id"].is_null());
    assert_eq!(body["title"], "Orphaned Book");
}

#[tokio::test]
#[ignore]
async fn test_deleting_book_removes_instances() {
    let client = Client::new();
    let book = create_book(&client, "Doomed Book", None).await;
    let book_id = book["id"].as_i64().unwrap();
    let instance = create_instance(&client, book_id).await;
    let instance_id = instance["id"].as_i64().unwrap();

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to delete book");
    assert_eq!(response.status(), 204);

    // a copy cannot outlive its title
    let response = client
        .get(format!("{}/book-instances/{}", BASE_URL, instance_id))
        .send()
        .await
        .expect("Failed to fetch instance");
    assert_eq!(response.status(), 404);
}

async fn register_user(client: &Client, username: &str, email: &str) -> i64 {
    let response = client
        .post(format!("{}/register", BASE_URL))
        .form(&[
            ("username", username),
            ("email", email),
            ("password", "secret123"),
            ("password2", "secret123"),
        ])
        .send()
        .await
        .expect("Failed to register user");
    assert!(response.status().is_success());

    let users: Value = client
        .get(format!("{}/users", BASE_URL))
        .send()
        .await
        .expect("Failed to list users")
        .json()
        .await
        .unwrap();
    users
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["username"] == username)
        .expect("registered user not listed")["id"]
        .as_i64()
        .unwrap()
}

#[tokio::test]
#[ignore]
async fn test_deleting_book_removes_reviews() {
    let client = Client::new();
    let book = create_book(&client, "Reviewed Book", None).await;
    let book_id = book["id"].as_i64().unwrap();
    let reader_id = register_user(&client, "it_reviewer", "it_reviewer@example.com").await;

    let response = client
        .post(format!("{}/reviews", BASE_URL))
        .json(&json!({
            "book_id": book_id,
            "reader_id": reader_id,
            "content": "Great read."
        }))
        .send()
        .await
        .expect("Failed to create review");
    assert_eq!(response.status(), 201);

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to delete book");
    assert_eq!(response.status(), 204);

    let reviews: Value = client
        .get(format!("{}/reviews", BASE_URL))
        .send()
        .await
        .expect("Failed to list reviews")
        .json()
        .await
        .unwrap();
    assert!(reviews
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["book_id"].as_i64() != Some(book_id)));
}

#[tokio::test]
#[ignore]
async fn test_deleting_user_clears_reader_on_copies() {
    let client = Client::new();
    let book = create_book(&client, "Held Book", None).await;
    let instance = create_instance(&client, book["id"].as_i64().unwrap()).await;
    let instance_id = instance["id"].as_i64().unwrap();
    let reader_id = register_user(&client, "it_holder", "it_holder@example.com").await;

    let response = client
        .put(format!("{}/book-instances/{}", BASE_URL, instance_id))
        .json(&json!({ "status": "t", "reader_id": reader_id }))
        .send()
        .await
        .expect("Failed to assign reader");
    assert!(response.status().is_success());

    let response = client
        .delete(format!("{}/users/{}", BASE_URL, reader_id))
        .send()
        .await
        .expect("Failed to delete user");
    assert_eq!(response.status(), 204);

    // the copy survives with its reader cleared
    let copy: Value = client
        .get(format!("{}/book-instances/{}", BASE_URL, instance_id))
        .send()
        .await
        .expect("Failed to fetch instance")
        .json()
        .await
        .unwrap();
    assert!(copy["reader_id"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_registration_success() {
    let client = Client::new();

    let response = client
        .post(format!("{}/register", BASE_URL))
        .form(&[
            ("username", "it_newuser"),
            ("email", "it_new@example.com"),
            ("password", "secret123"),
            ("password2", "secret123"),
        ])
        .send()
        .await
        .expect("Failed to send registration");

    assert!(response.status().is_success());

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
}

#[tokio::test]
#[ignore]
async fn test_registration_duplicate_username() {
    let client = Client::new();

    for _ in 0..2 {
        let response = client
            .post(format!("{}/register", BASE_URL))
            .form(&[
                ("username", "it_duplicate"),
                ("email", "it_duplicate@example.com"),
                ("password", "secret123"),
                ("password2", "secret123"),
            ])
            .send()
            .await
            .expect("Failed to send registration");

        if response.status() == 400 {
            let body: Value = response.json().await.unwrap();
            assert_eq!(body["success"], false);
            let messages = body["messages"].as_array().unwrap();
            assert!(messages
                .iter()
                .any(|m| m.as_str().unwrap().contains("username already exists")));
            return;
        }
    }
    panic!("second registration with the same username was accepted");
}

#[tokio::test]
#[ignore]
async fn test_registration_collects_all_failures() {
    let client = Client::new();

    let response = client
        .post(format!("{}/register", BASE_URL))
        .form(&[
            ("username", ""),
            ("email", ""),
            ("password", "a"),
            ("password2", "b"),
        ])
        .send()
        .await
        .expect("Failed to send registration");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["messages"].as_array().unwrap().len(), 3);
}

#[tokio::test]
#[ignore]
async fn test_stats_counts() {
    let client = Client::new();
    let book = create_book(&client, "Counted", None).await;
    create_instance(&client, book["id"].as_i64().unwrap()).await;

    let response = client
        .get(format!("{}/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to fetch stats");
    assert!(response.status().is_success());

    let body: Value = response.json().await.unwrap();
    assert!(body["books"].as_i64().unwrap() >= 1);
    assert!(body["book_instances"].as_i64().unwrap() >= 1);
    assert!(body["authors"].is_i64());
    assert!(body["genres"].is_i64());
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_returning_copy_clears_reader_and_due_date() {
    let client = Client::new();
    let book = create_book(&client, "Returnable", None).await;
    let instance = create_instance(&client, book["id"].as_i64().unwrap()).await;
    let instance_id = instance["id"].as_i64().unwrap();
    let reader_id = register_user(&client, "it_returner", "it_returner@example.com").await;

    let response = client
        .put(format!("{}/book-instances/{}", BASE_URL, instance_id))
        .json(&json!({
            "status": "t",
            "reader_id": reader_id,
            "due_back": "2026-09-30"
        }))
        .send()
        .await
        .expect("Failed to loan copy");
    assert!(response.status().is_success());

    // returning: the update omits reader and due date, which clears both
    let response = client
        .put(format!("{}/book-instances/{}", BASE_URL, instance_id))
        .json(&json!({ "status": "a" }))
        .send()
        .await
        .expect("Failed to return copy");
    assert!(response.status().is_success());

    let copy: Value = response.json().await.unwrap();
    assert_eq!(copy["status"], "a");
    assert!(copy["reader_id"].is_null());
    assert!(copy["due_back"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_book_update_can_clear_author() {
    let client = Client::new();
    let author = create_author(&client, "Detach", "Able").await;
    let book = create_book(&client, "Detachable", Some(author["id"].as_i64().unwrap())).await;
    let book_id = book["id"].as_i64().unwrap();

    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({ "author_id": null }))
        .send()
        .await
        .expect("Failed to update book");
    assert!(response.status().is_success());

    let updated: Value = response.json().await.unwrap();
    assert!(updated["author_id"].is_null());
    assert_eq!(updated["title"], "Detachable");
}

#[tokio::test]
#[ignore]
async fn test_genre_name_must_not_be_blank() {
    let client = Client::new();

    for name in ["", "   "] {
        let response = client
            .post(format!("{}/genres", BASE_URL))
            .json(&json!({ "name": name }))
            .send()
            .await
            .expect("Failed to send genre");
        assert_eq!(response.status(), 400);
    }
}

#[tokio::test]
#[ignore]
async fn test_book_isbn_too_long_is_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Overlong ISBN",
            "summary": "<p>Test summary</p>",
            "isbn": "97860946616625"
        }))
        .send()
        .await
        .expect("Failed to send book");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_book_update_rejects_blank_title() {
    let client = Client::new();
    let book = create_book(&client, "Keeps Its Title", None).await;
    let book_id = book["id"].as_i64().unwrap();

    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({ "title": "" }))
        .send()
        .await
        .expect("Failed to update book");
    assert_eq!(response.status(), 400);

    let body: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to fetch book")
        .json()
        .await
        .unwrap();
    assert_eq!(body["title"], "Keeps Its Title");
}

#[tokio::test]
#[ignore]
async fn test_instance_listing_filters_by_status() {
    let client = Client::new();
    let book = create_book(&client, "Filterable", None).await;
    let instance = create_instance(&client, book["id"].as_i64().unwrap()).await;

    client
        .put(format!(
            "{}/book-instances/{}",
            BASE_URL,
            instance["id"].as_i64().unwrap()
        ))
        .json(&json!({ "status": "r" }))
        .send()
        .await
        .expect("Failed to update instance");

    let response = client
        .get(format!("{}/book-instances?status=r", BASE_URL))
        .send()
        .await
        .expect("Failed to list instances");
    assert!(response.status().is_success());

    let body: Value = response.json().await.unwrap();
    for item in body["items"].as_array().unwrap() {
        assert_eq!(item["status"], "r");
    }
}

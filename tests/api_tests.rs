//! API integration tests
//!
//! These run against a live server; the admin account is created from
//! configuration on the server's first run.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get an authenticated client
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "login": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

fn unique_serial(prefix: &str) -> String {
    format!(
        "{}-{}",
        prefix,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    )
}

async fn create_inspector(client: &Client, token: &str) -> i64 {
    let response = client
        .post(format!("{}/inspectors", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": "Test Inspector" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No inspector ID")
}

async fn create_equipment(client: &Client, token: &str, serial: &str) -> i64 {
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "serial_number": serial,
            "model": "Latitude 5420",
            "equipment_type": 0
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["is_available"], true);
    assert_eq!(body["condition"], "New");
    body["id"].as_i64().expect("No equipment ID")
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
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "login": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "login": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_admin_creates_user_who_can_login() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let login = unique_serial("user");
    let response = client
        .post(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "login": login,
            "password": "s3cret",
            "name": "Test Manager",
            "role": "manager"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["login"], login.as_str());
    assert!(body["password_hash"].is_null());

    // The new account can log in
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "login": login, "password": "s3cret" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    let manager_token = body["token"].as_str().expect("No token").to_string();
    assert_eq!(body["role"], "manager");

    // But it is not an admin, so creating users is forbidden
    let response = client
        .post(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", manager_token))
        .json(&json!({
            "login": unique_serial("user"),
            "password": "s3cret",
            "name": "Another",
            "role": "viewer"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_create_equipment_rejects_blank_serial() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "serial_number": "   ",
            "model": "Latitude 5420",
            "equipment_type": 0
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_assign_and_return_cycle() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let inspector_id = create_inspector(&client, &token).await;
    let serial = unique_serial("SN-CYCLE");
    let equipment_id = create_equipment(&client, &token, &serial).await;

    // Assign
    let response = client
        .post(format!("{}/equipment/{}/assign", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "inspector_id": inspector_id, "condition": "Good" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // Equipment is now out
    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["equipment"]["is_available"], false);
    assert!(body["open_assignment"].is_object());

    // Assigning again is a state error
    let response = client
        .post(format!("{}/equipment/{}/assign", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "inspector_id": inspector_id, "condition": "Good" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);

    // Return
    let response = client
        .post(format!("{}/equipment/{}/return", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "condition": "Fair", "notes": "minor scuffing" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["return_condition"], "Fair");
    assert!(body["returned_date"].is_string());

    // Equipment is available again with the return condition
    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["equipment"]["is_available"], true);
    assert_eq!(body["equipment"]["condition"], "Fair");

    // History records the full cycle in order
    let response = client
        .get(format!("{}/equipment/{}/history", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let events: Vec<i64> = body
        .as_array()
        .expect("History should be an array")
        .iter()
        .map(|e| e["event_type"].as_i64().unwrap())
        .collect();
    assert_eq!(events, vec![0, 1, 2]); // Created, Assigned, Returned
}

#[tokio::test]
#[ignore]
async fn test_return_without_assignment_fails() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let serial = unique_serial("SN-NORET");
    let equipment_id = create_equipment(&client, &token, &serial).await;

    let response = client
        .post(format!("{}/equipment/{}/return", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "condition": "Fair" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);
}

#[tokio::test]
#[ignore]
async fn test_archive_history_entry_twice_fails() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let serial = unique_serial("SN-ARCH");
    let equipment_id = create_equipment(&client, &token, &serial).await;

    let response = client
        .get(format!("{}/equipment/{}/history", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let entry_id = body[0]["id"].as_i64().expect("No history entry");

    let response = client
        .post(format!("{}/history/{}/archive", BASE_URL, entry_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["archived"], true);
    assert_eq!(body["validation_status"], 1);

    // Second archive fails, and so does a note append
    let response = client
        .post(format!("{}/history/{}/archive", BASE_URL, entry_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);

    let response = client
        .post(format!("{}/history/{}/notes", BASE_URL, entry_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "notes": "late note" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);
}

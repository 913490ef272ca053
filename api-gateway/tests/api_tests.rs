mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

async fn body_of(response: reqwest::Response) -> serde_json::Value {
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
async fn test_full_credential_and_record_lifecycle() {
    let app = TestApp::spawn().await;
    let credentials = json!({"username": "alice", "password": "secret123"});

    let response = app
        .post("/api/register")
        .json(&credentials)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .post("/api/login")
        .json(&credentials)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let token = body_of(response).await["data"]["token"]
        .as_str()
        .expect("Missing token")
        .to_string();

    let response = app
        .get("/api/records")
        .header("Authorization", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_of(response).await["data"]["records"], json!([]));

    let response = app
        .post("/api/records")
        .header("Authorization", &token)
        .json(&json!({"name": "Inception", "genre": "SciFi", "year": 2010}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .get("/api/records")
        .header("Authorization", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let records = body_of(response).await["data"]["records"].clone();
    let records = records.as_array().expect("records must be a list");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "Inception");
    assert_eq!(records[0]["genre"], "SciFi");
    assert_eq!(records[0]["year"], 2010);

    let response = app
        .delete("/api/records")
        .header("Authorization", &token)
        .json(&json!({"name": "Inception", "year": 2010}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .get("/api/records")
        .header("Authorization", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(body_of(response).await["data"]["records"], json!([]));

    let response = app
        .delete("/api/records")
        .header("Authorization", &token)
        .json(&json!({"name": "Inception", "year": 2010}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_registration_relayed() {
    let app = TestApp::spawn().await;
    let credentials = json!({"username": "alice", "password": "secret123"});

    let first = app
        .post("/api/register")
        .json(&credentials)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .post("/api/register")
        .json(&credentials)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_of(second).await["data"]["kind"], "duplicate_username");
}

#[tokio::test]
async fn test_protected_probe_relays_identity() {
    let app = TestApp::spawn().await;
    let credentials = json!({"username": "alice", "password": "secret123"});

    app.post("/api/register")
        .json(&credentials)
        .send()
        .await
        .expect("Failed to execute request");
    let response = app
        .post("/api/login")
        .json(&credentials)
        .send()
        .await
        .expect("Failed to execute request");
    let token = body_of(response).await["data"]["token"]
        .as_str()
        .expect("Missing token")
        .to_string();

    let response = app
        .get("/api/protected")
        .header("Authorization", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json")));
    assert_eq!(body_of(response).await["data"]["user_id"], 1);

    let response = app
        .get("/api/protected")
        .header("Authorization", "forged.token.value")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_of(response).await["data"]["kind"], "invalid_token");
}

#[tokio::test]
async fn test_missing_token_rejected_before_forwarding() {
    // Nothing listens upstream: a forwarded call would yield 502.
    let app = TestApp::spawn_with_authority(&common::dead_url().await).await;

    for request in [
        app.get("/api/protected"),
        app.get("/api/records"),
        app.post("/api/records")
            .json(&json!({"name": "Inception", "genre": "SciFi", "year": 2010})),
        app.delete("/api/records")
            .json(&json!({"name": "Inception", "year": 2010})),
    ] {
        let response = request.send().await.expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_of(response).await["data"]["kind"], "missing_token");
    }
}

#[tokio::test]
async fn test_unreachable_authority() {
    let app = TestApp::spawn_with_authority(&common::dead_url().await).await;

    let response = app
        .post("/api/login")
        .json(&json!({"username": "alice", "password": "secret123"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_of(response).await;
    assert_eq!(body["status_code"], 502);
    assert_eq!(body["data"]["kind"], "upstream_unreachable");

    let response = app
        .get("/api/testauth")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_testauth_reports_authority_health() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/testauth")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_of(response).await["data"]["message"],
        "Database connected."
    );
}

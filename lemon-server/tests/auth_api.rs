//! Registration, login, logout, profile and the authentication gate

mod common;

use common::TestApp;
use http::{Method, StatusCode};
use serde_json::{Value, json};

fn registration(username: &str) -> Value {
    json!({
        "username": username,
        "email": format!("{username}@littlelemon.com"),
        "first_name": "Mario",
        "password": "lemon-pass-42",
        "password_confirm": "lemon-pass-42",
    })
}

async fn register(app: &TestApp, body: Value) -> (StatusCode, Value) {
    app.send(Method::POST, "/api/auth/register", None, Some(body)).await
}

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new().await;
    let (status, body) = app.send(Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn register_returns_working_token() {
    let app = TestApp::new().await;
    let (status, body) = register(&app, registration("mario")).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["username"], "mario");
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(token.len(), 40);

    let (status, profile) = app
        .send(Method::GET, "/api/auth/profile", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["username"], "mario");
    assert_eq!(profile["first_name"], "Mario");
    assert_eq!(profile["groups"], json!([]));
    assert_eq!(profile["is_active"], true);
}

#[tokio::test]
async fn register_rejects_bad_input() {
    let app = TestApp::new().await;
    register(&app, registration("mario")).await;

    let (status, body) = register(&app, registration("mario")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1007);

    let mut mismatch = registration("sofia");
    mismatch["password_confirm"] = json!("something-else");
    let (status, body) = register(&app, mismatch).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1005);

    let mut numeric = registration("tilly");
    numeric["password"] = json!("12345678901");
    numeric["password_confirm"] = json!("12345678901");
    let (status, body) = register(&app, numeric).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1006);

    let mut email = registration("adrian");
    email["email"] = json!("not-an-email");
    let (status, _) = register(&app, email).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = register(&app, json!({"username": "x"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_rotates_token() {
    let app = TestApp::new().await;
    let (_, registered) = register(&app, registration("mario")).await;
    let first = registered["token"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"username": "mario", "password": "lemon-pass-42"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Login successful");
    let second = body["token"].as_str().unwrap().to_string();
    assert_ne!(first, second);

    let (status, _) = app
        .send(Method::GET, "/api/auth/profile", Some(&first), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app
        .send(Method::GET, "/api/auth/profile", Some(&second), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn login_with_bad_credentials_is_401() {
    let app = TestApp::new().await;
    register(&app, registration("mario")).await;

    for body in [
        json!({"username": "mario", "password": "wrong-password"}),
        json!({"username": "nobody", "password": "lemon-pass-42"}),
    ] {
        let (status, body) = app
            .send(Method::POST, "/api/auth/login", None, Some(body))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], 1002);
    }

    let (status, _) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"username": "mario"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn protected_routes_need_a_valid_token() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/api/menu/", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let (status, _) = app
        .send(Method::GET, "/api/menu/", Some("0123456789abcdef0123456789abcdef01234567"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn inactive_user_is_rejected() {
    let app = TestApp::new().await;
    let user = app.user("ghost").await;
    lemon_server::db::repository::user::set_active(&app.state.pool, user.id, false)
        .await
        .unwrap();

    let (status, body) = app.get("/api/auth/profile", &user).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1004);
}

#[tokio::test]
async fn logout_invalidates_token() {
    let app = TestApp::new().await;
    let user = app.user("mario").await;

    let (status, body) = app
        .send(Method::POST, "/api/auth/logout", Some(&user.token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successfully logged out");

    let (status, _) = app.get("/api/auth/profile", &user).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_update_changes_writable_fields_only() {
    let app = TestApp::new().await;
    let user = app.manager("adrian").await;

    let (status, body) = app
        .patch(
            "/api/auth/profile",
            &user,
            json!({"email": "chef@littlelemon.com", "last_name": "Gomez", "username": "root"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["email"], "chef@littlelemon.com");
    assert_eq!(body["last_name"], "Gomez");
    assert_eq!(body["username"], "adrian");
    assert_eq!(body["groups"], json!([{"name": "Manager"}]));

    let (status, _) = app
        .put("/api/auth/profile", &user, json!({"email": "broken"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = TestApp::new().await;
    let user = app.user("mario").await;
    let request = http::Request::builder()
        .uri("/api/auth/profile")
        .header(http::header::AUTHORIZATION, format!("Bearer {}", user.token))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.state.oneshot(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

//! Shared helpers for the API integration tests
//!
//! Every test gets its own database (in-memory unless it needs several
//! connections) and drives the fully layered router through
//! `ServerState::oneshot`.

#![allow(dead_code)]

use std::path::Path;

use axum::body::Body;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use lemon_server::auth::token;
use lemon_server::db::repository::user::NewUser;
use lemon_server::db::repository::{token as token_repo, user as user_repo};
use lemon_server::{Config, ServerState};
use serde_json::Value;
use shared::models::{DELIVERY_CREW_GROUP, MANAGER_GROUP};

#[derive(Clone)]
pub struct TestApp {
    pub state: ServerState,
}

/// A user with a live token
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: i64,
    pub username: String,
    pub token: String,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(Config::with_overrides(":memory:", 0)).await
    }

    pub async fn with_config(config: Config) -> Self {
        let state = ServerState::in_memory(config)
            .await
            .expect("in-memory database");
        Self { state }
    }

    /// SQLite file at `path` behind a pool of `max_connections`
    pub async fn on_disk(path: &Path, max_connections: u32) -> Self {
        let mut config = Config::with_overrides(path.to_string_lossy().into_owned(), 0);
        config.database_max_connections = max_connections;
        let state = ServerState::initialize(&config)
            .await
            .expect("file database");
        Self { state }
    }

    /// Insert a user directly and give them a token (no password login)
    pub async fn user(&self, username: &str) -> TestUser {
        self.insert_user(username, false).await
    }

    /// A staff account outside every group
    pub async fn admin(&self, username: &str) -> TestUser {
        self.insert_user(username, true).await
    }

    async fn insert_user(&self, username: &str, is_staff: bool) -> TestUser {
        let user = user_repo::create(
            &self.state.pool,
            NewUser {
                username: username.to_string(),
                email: format!("{username}@littlelemon.com"),
                first_name: String::new(),
                last_name: String::new(),
                password_hash: "!unusable".to_string(),
                is_staff,
            },
        )
        .await
        .expect("create user");

        let key = token::generate_key();
        token_repo::replace(&self.state.pool, user.id, &token::hash_key(&key))
            .await
            .expect("store token");

        TestUser {
            id: user.id,
            username: user.username,
            token: key,
        }
    }

    pub async fn manager(&self, username: &str) -> TestUser {
        let user = self.user(username).await;
        user_repo::add_to_group(&self.state.pool, user.id, MANAGER_GROUP)
            .await
            .expect("join Manager");
        user
    }

    pub async fn crew(&self, username: &str) -> TestUser {
        let user = self.user(username).await;
        user_repo::add_to_group(&self.state.pool, user.id, DELIVERY_CREW_GROUP)
            .await
            .expect("join Delivery crew");
        user
    }

    /// Send a request and decode the JSON body (`Value::Null` when empty)
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(http::header::AUTHORIZATION, format!("Token {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.state.oneshot(request).await;
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, user: &TestUser) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(&user.token), None).await
    }

    pub async fn post(&self, uri: &str, user: &TestUser, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(&user.token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, user: &TestUser, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(&user.token), Some(body)).await
    }

    pub async fn patch(&self, uri: &str, user: &TestUser, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, Some(&user.token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, user: &TestUser) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, Some(&user.token), None).await
    }

    /// Create a category through the API, returning its id
    pub async fn category(&self, manager: &TestUser, slug: &str, title: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/category",
                manager,
                serde_json::json!({"slug": slug, "title": title}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().expect("category id")
    }

    /// Create a menu item through the API, returning its id
    pub async fn menu_item(&self, manager: &TestUser, name: &str, price: &str, category: i64) -> i64 {
        let (status, body) = self
            .post(
                "/api/menu/",
                manager,
                serde_json::json!({"name": name, "price": price, "category_id": category}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().expect("menu item id")
    }

    /// Put one line in the user's cart
    pub async fn fill_cart(&self, user: &TestUser, menuitem: i64, quantity: i64) {
        let (status, body) = self
            .post(
                "/api/cart/menu-items",
                user,
                serde_json::json!({"menuitem": menuitem, "quantity": quantity}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
    }

    /// Checkout, returning the new order id
    pub async fn checkout(&self, user: &TestUser) -> i64 {
        let (status, body) = self
            .send(Method::POST, "/api/orders", Some(&user.token), None)
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["order_id"].as_i64().expect("order id")
    }
}

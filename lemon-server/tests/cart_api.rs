//! Single-line cart

mod common;

use common::TestApp;
use http::StatusCode;
use serde_json::json;

async fn menu(app: &TestApp) -> i64 {
    let manager = app.manager("adrian").await;
    let mains = app.category(&manager, "mains", "Mains").await;
    app.menu_item(&manager, "Lemon Chicken", "12.50", mains).await
}

#[tokio::test]
async fn add_then_read_cart() {
    let app = TestApp::new().await;
    let item = menu(&app).await;
    let mario = app.user("mario").await;

    let (status, body) = app
        .post("/api/cart/menu-items", &mario, json!({"menuitem": item, "quantity": 2}))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["message"], "Cart is created.");

    let (status, cart) = app.get("/api/cart/menu-items", &mario).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["user"]["username"], "mario");
    assert_eq!(cart["menuitem"]["id"], item);
    assert_eq!(cart["quantity"], 2);
    assert_eq!(cart["unit_price"], "12.50");
    assert_eq!(cart["price"], "25.00");
}

#[tokio::test]
async fn second_line_is_rejected() {
    let app = TestApp::new().await;
    let item = menu(&app).await;
    let mario = app.user("mario").await;
    app.fill_cart(&mario, item, 1).await;

    let (status, body) = app
        .post("/api/cart/menu-items/", &mario, json!({"menuitem": item, "quantity": 3}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4003);

    let (_, cart) = app.get("/api/cart/menu-items", &mario).await;
    assert_eq!(cart["quantity"], 1);
}

#[tokio::test]
async fn existing_cart_wins_over_unknown_item() {
    let app = TestApp::new().await;
    let item = menu(&app).await;
    let mario = app.user("mario").await;
    app.fill_cart(&mario, item, 1).await;

    let (status, body) = app
        .post("/api/cart/menu-items", &mario, json!({"menuitem": 4242, "quantity": 1}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4003);

    let (_, cart) = app.get("/api/cart/menu-items", &mario).await;
    assert_eq!(cart["menuitem"]["id"], item);
}

#[tokio::test]
async fn carts_are_private() {
    let app = TestApp::new().await;
    let item = menu(&app).await;
    let mario = app.user("mario").await;
    let luigi = app.user("luigi").await;
    app.fill_cart(&mario, item, 1).await;

    let (status, body) = app.get("/api/cart/menu-items", &luigi).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4002);

    // a second user still gets a cart of their own
    app.fill_cart(&luigi, item, 4).await;
    let (_, cart) = app.get("/api/cart/menu-items", &mario).await;
    assert_eq!(cart["quantity"], 1);
}

#[tokio::test]
async fn clearing_twice_is_404() {
    let app = TestApp::new().await;
    let item = menu(&app).await;
    let mario = app.user("mario").await;
    app.fill_cart(&mario, item, 1).await;

    let (status, body) = app.delete("/api/cart/menu-items", &mario).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, serde_json::Value::Null);

    let (status, body) = app.delete("/api/cart/menu-items", &mario).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);

    app.fill_cart(&mario, item, 2).await;
}

#[tokio::test]
async fn bad_lines_are_rejected() {
    let app = TestApp::new().await;
    let item = menu(&app).await;
    let mario = app.user("mario").await;

    for quantity in [0, -3] {
        let (status, body) = app
            .post("/api/cart/menu-items", &mario, json!({"menuitem": item, "quantity": quantity}))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 4004);
    }

    let (status, body) = app
        .post("/api/cart/menu-items", &mario, json!({"menuitem": 999, "quantity": 1}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3101);

    let (status, _) = app
        .post("/api/cart/menu-items", &mario, json!({"quantity": 1}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cart_keeps_price_snapshot() {
    let app = TestApp::new().await;
    let manager = app.manager("adrian").await;
    let mains = app.category(&manager, "mains", "Mains").await;
    let item = app.menu_item(&manager, "Pasta", "10.00", mains).await;
    let mario = app.user("mario").await;
    app.fill_cart(&mario, item, 3).await;

    let (status, _) = app
        .patch(&format!("/api/menu/{item}"), &manager, json!({"price": "11.00"}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, cart) = app.get("/api/cart/menu-items", &mario).await;
    assert_eq!(cart["unit_price"], "10.00");
    assert_eq!(cart["price"], "30.00");
    assert_eq!(cart["menuitem"]["price"], "11.00");
}

//! Categories and menu items

mod common;

use common::TestApp;
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn category_writes_are_manager_only() {
    let app = TestApp::new().await;
    let manager = app.manager("adrian").await;
    let customer = app.user("mario").await;

    let (status, body) = app
        .post("/api/category", &customer, json!({"slug": "mains", "title": "Mains"}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2002);

    let id = app.category(&manager, "mains", "Mains").await;
    let (status, list) = app.get("/api/category", &customer).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([{"id": id, "slug": "mains", "title": "Mains"}]));

    let (status, _) = app.delete(&format!("/api/category/{id}"), &customer).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn category_updates_answer_reset_content() {
    let app = TestApp::new().await;
    let manager = app.manager("adrian").await;
    let id = app.category(&manager, "mains", "Mains").await;

    let (status, body) = app
        .patch(&format!("/api/category/{id}"), &manager, json!({"title": "Main courses"}))
        .await;
    assert_eq!(status, StatusCode::RESET_CONTENT);
    assert_eq!(body["title"], "Main courses");
    assert_eq!(body["slug"], "mains");

    let (status, body) = app
        .put(
            &format!("/api/category/{id}"),
            &manager,
            json!({"slug": "main-courses", "title": "Main courses"}),
        )
        .await;
    assert_eq!(status, StatusCode::RESET_CONTENT);
    assert_eq!(body["slug"], "main-courses");

    let (status, _) = app
        .put(&format!("/api/category/{id}"), &manager, json!({"slug": "bad slug!", "title": "x"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(&format!("/api/category/{id}"), &manager, json!({"slug": "x", "title": "x"}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn referenced_category_cannot_be_deleted() {
    let app = TestApp::new().await;
    let manager = app.manager("adrian").await;
    let mains = app.category(&manager, "mains", "Mains").await;
    let item = app.menu_item(&manager, "Lemon Chicken", "12.50", mains).await;

    let (status, body) = app.delete(&format!("/api/category/{mains}"), &manager).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 3002);

    let (status, _) = app.get(&format!("/api/category/{mains}"), &manager).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.delete(&format!("/api/menu/{item}"), &manager).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.delete(&format!("/api/category/{mains}"), &manager).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = app.get(&format!("/api/category/{mains}"), &manager).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3001);
}

#[tokio::test]
async fn menu_item_defaults_and_validation() {
    let app = TestApp::new().await;
    let manager = app.manager("adrian").await;
    let mains = app.category(&manager, "mains", "Mains").await;

    let (status, item) = app
        .post(
            "/api/menu/",
            &manager,
            json!({"name": "Greek Salad", "price": "8.5", "category_id": mains}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{item}");
    assert_eq!(item["price"], "8.50");
    assert_eq!(item["description"], "No description available");
    assert_eq!(item["featured"], false);
    assert_eq!(item["category"]["title"], "Mains");

    for bad in [
        json!({"name": "Soup", "price": "-1", "category_id": mains}),
        json!({"name": "Soup", "price": "1.005", "category_id": mains}),
        json!({"name": "Soup", "price": "10000", "category_id": mains}),
        json!({"name": "Soup", "price": "abc", "category_id": mains}),
        json!({"name": "Soup", "price": "4.00", "category_id": 999}),
        json!({"name": "", "price": "4.00", "category_id": mains}),
    ] {
        let (status, body) = app.post("/api/menu/", &manager, bad.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{bad} -> {body}");
    }

    for price in ["-1", "1.005", "10000"] {
        let (_, body) = app
            .post(
                "/api/menu/",
                &manager,
                json!({"name": "Soup", "price": price, "category_id": mains}),
            )
            .await;
        assert_eq!(body["code"], 3102, "{price} -> {body}");
        assert_eq!(body["details"]["field"], "price");
    }
}

#[tokio::test]
async fn menu_item_update_and_customer_gate() {
    let app = TestApp::new().await;
    let manager = app.manager("adrian").await;
    let customer = app.user("mario").await;
    let mains = app.category(&manager, "mains", "Mains").await;
    let id = app.menu_item(&manager, "Pasta", "14.00", mains).await;

    let (status, body) = app
        .patch(&format!("/api/menu/{id}"), &manager, json!({"price": "15.25", "featured": true}))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["price"], "15.25");
    assert_eq!(body["featured"], true);
    assert_eq!(body["name"], "Pasta");

    let (status, _) = app
        .patch(&format!("/api/menu/{id}"), &customer, json!({"price": "1.00"}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.get(&format!("/api/menu/{id}"), &customer).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], "15.25");

    let (status, body) = app.get("/api/menu/4242", &customer).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3101);
}

#[tokio::test]
async fn menu_list_filters_orders_and_pages() {
    let app = TestApp::new().await;
    let manager = app.manager("adrian").await;
    let customer = app.user("mario").await;
    let starters = app.category(&manager, "starters", "Starters").await;
    let mains = app.category(&manager, "mains", "Mains").await;
    app.menu_item(&manager, "Bruschetta", "5.00", starters).await;
    app.menu_item(&manager, "Greek Salad", "8.25", starters).await;
    app.menu_item(&manager, "Lemon Chicken", "12.50", mains).await;
    app.menu_item(&manager, "Pasta", "14.00", mains).await;

    let names = |body: &serde_json::Value| -> Vec<String> {
        body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["name"].as_str().unwrap().to_string())
            .collect()
    };

    let (status, body) = app.get("/api/menu/", &customer).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), ["Bruschetta", "Greek Salad", "Lemon Chicken", "Pasta"]);
    assert_eq!(body["pagination"]["total"], 4);

    let (_, body) = app.get("/api/menu/?category=Mains&ordering=-price", &customer).await;
    assert_eq!(names(&body), ["Pasta", "Lemon Chicken"]);

    let (_, body) = app.get(&format!("/api/menu/?category={starters}"), &customer).await;
    assert_eq!(body["pagination"]["total"], 2);

    let (_, body) = app.get("/api/menu/?to_price=12.50", &customer).await;
    assert_eq!(names(&body), ["Bruschetta", "Greek Salad", "Lemon Chicken"]);

    let (status, body) = app
        .get("/api/menu/?to_price=79228162514264337593543950335", &customer)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 4);

    let (_, body) = app.get("/api/menu/?search=lemon", &customer).await;
    assert_eq!(names(&body), ["Lemon Chicken"]);

    let (_, body) = app.get("/api/menu/?perpage=3&page=2", &customer).await;
    assert_eq!(names(&body), ["Pasta"]);
    assert_eq!(body["pagination"]["total_pages"], 2);

    let (status, body) = app.get("/api/menu/?perpage=3&page=9", &customer).await;
    assert_eq!(status, StatusCode::OK);
    assert!(names(&body).is_empty());

    let (status, _) = app.get("/api/menu/?ordering=password", &customer).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = app.get("/api/menu/?perpage=zero", &customer).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

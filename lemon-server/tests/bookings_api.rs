//! Table reservations

mod common;

use common::{TestApp, TestUser};
use http::StatusCode;
use lemon_server::Config;
use serde_json::{Value, json};

fn booking(name: &str, date: &str, time: &str, guests: i64) -> Value {
    json!({
        "customer_name": name,
        "email": "guest@littlelemon.com",
        "phone": "+1 312 555 0100",
        "date": date,
        "time": time,
        "number_of_guests": guests,
    })
}

async fn book(app: &TestApp, user: &TestUser, body: Value) -> i64 {
    let (status, created) = app.post("/api/bookings/", user, body).await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    created["id"].as_i64().expect("booking id")
}

fn names(body: &Value) -> Vec<String> {
    body["items"]
        .as_array()
        .expect("items")
        .iter()
        .map(|b| b["customer_name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn customer_books_under_own_name() {
    let app = TestApp::new().await;
    let mario = app.user("mario").await;

    let (status, body) = app
        .post("/api/bookings", &mario, booking("Someone Else", "2026-12-24", "19:30", 4))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["customer_name"], "mario");
    assert_eq!(body["time"], "19:30:00");
    assert_eq!(body["date"], "2026-12-24");
    assert!(body.get("owner_id").is_none());
    assert!(body["created_at"].is_string());

    let manager = app.manager("adrian").await;
    let (_, body) = app
        .post("/api/bookings", &manager, booking("Walk-in Party", "2026-12-24", "20:00", 6))
        .await;
    assert_eq!(body["customer_name"], "Walk-in Party");
}

#[tokio::test]
async fn invalid_bookings_are_rejected() {
    let app = TestApp::new().await;
    let mario = app.user("mario").await;

    let (status, body) = app
        .post("/api/bookings", &mario, booking("", "2026-12-24", "19:30", 0))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6002);

    let (status, _) = app
        .post("/api/bookings", &mario, booking("", "2026-12-24", "7pm", 2))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post("/api/bookings", &mario, booking("", "24/12/2026", "19:30", 2))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut bad_email = booking("", "2026-12-24", "19:30", 2);
    bad_email["email"] = json!("not-an-email");
    let (status, _) = app.post("/api/bookings", &mario, bad_email).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut long_phone = booking("", "2026-12-24", "19:30", 2);
    long_phone["phone"] = json!("0".repeat(21));
    let (status, _) = app.post("/api/bookings", &mario, long_phone).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_is_scoped_and_filtered() {
    let app = TestApp::new().await;
    let mario = app.user("mario").await;
    let luigi = app.user("luigi").await;
    let manager = app.manager("adrian").await;
    book(&app, &mario, booking("", "2026-12-24", "20:00", 2)).await;
    book(&app, &mario, booking("", "2026-12-24", "18:00", 5)).await;
    book(&app, &luigi, booking("", "2026-12-23", "21:00", 2)).await;

    let (status, body) = app.get("/api/bookings", &mario).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), ["mario", "mario"]);
    assert_eq!(body["items"][0]["time"], "18:00:00");

    let (_, body) = app.get("/api/bookings", &manager).await;
    assert_eq!(names(&body), ["luigi", "mario", "mario"]);
    assert_eq!(body["pagination"]["total"], 3);

    let (_, body) = app.get("/api/bookings?number_of_guests=2", &manager).await;
    assert_eq!(body["pagination"]["total"], 2);

    let (_, body) = app.get("/api/bookings?date=2026-12-23", &manager).await;
    assert_eq!(names(&body), ["luigi"]);

    let (_, body) = app.get("/api/bookings?search=lui&ordering=-number_of_guests", &manager).await;
    assert_eq!(names(&body), ["luigi"]);

    let (_, body) = app.get("/api/bookings?page_size=1&page=3", &manager).await;
    assert_eq!(names(&body), ["mario"]);
    assert_eq!(body["pagination"]["total_pages"], 3);

    let (status, _) = app.get("/api/bookings?date=tomorrow", &manager).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn other_peoples_bookings_are_off_limits() {
    let app = TestApp::new().await;
    let mario = app.user("mario").await;
    let luigi = app.user("luigi").await;
    let manager = app.manager("adrian").await;
    let id = book(&app, &mario, booking("", "2026-12-24", "20:00", 2)).await;
    let uri = format!("/api/bookings/{id}");

    let (status, body) = app.get(&uri, &luigi).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2006);
    let (status, _) = app.patch(&uri, &luigi, json!({"number_of_guests": 9})).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.delete(&uri, &luigi).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get(&uri, &manager).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get("/api/bookings/777", &mario).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6001);
}

#[tokio::test]
async fn owner_updates_and_deletes() {
    let app = TestApp::new().await;
    let mario = app.user("mario").await;
    let id = book(&app, &mario, booking("", "2026-12-24", "20:00", 2)).await;
    let uri = format!("/api/bookings/{id}");
    let (_, before) = app.get(&uri, &mario).await;

    let (status, body) = app
        .patch(&uri, &mario, json!({"number_of_guests": 3, "time": "20:15"}))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["number_of_guests"], 3);
    assert_eq!(body["time"], "20:15:00");
    assert_eq!(body["email"], "guest@littlelemon.com");
    assert_eq!(body["created_at"], before["created_at"]);

    let (status, _) = app.patch(&uri, &mario, json!({"number_of_guests": 0})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // a blank name on PUT keeps the stored one
    let (status, body) = app
        .put(&uri, &mario, booking("", "2026-12-31", "21:00", 8))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["customer_name"], "mario");
    assert_eq!(body["date"], "2026-12-31");

    let (status, _) = app.delete(&uri, &mario).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.get(&uri, &mario).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn strict_ownership_also_checks_the_creator() {
    let mut config = Config::with_overrides(":memory:", 0);
    config.booking_strict_ownership = true;
    let app = TestApp::with_config(config).await;
    let manager = app.manager("adrian").await;
    let mario = app.user("mario").await;

    // made by a manager under mario's name
    let id = book(&app, &manager, booking("mario", "2026-12-24", "20:00", 2)).await;
    let (status, _) = app.get(&format!("/api/bookings/{id}"), &mario).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (_, body) = app.get("/api/bookings", &mario).await;
    assert_eq!(body["pagination"]["total"], 0);

    let own = book(&app, &mario, booking("", "2026-12-25", "20:00", 2)).await;
    let (status, _) = app.get(&format!("/api/bookings/{own}"), &mario).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn name_match_is_enough_by_default() {
    let app = TestApp::new().await;
    let manager = app.manager("adrian").await;
    let mario = app.user("mario").await;

    let id = book(&app, &manager, booking("mario", "2026-12-24", "20:00", 2)).await;
    let (status, _) = app.get(&format!("/api/bookings/{id}"), &mario).await;
    assert_eq!(status, StatusCode::OK);
}

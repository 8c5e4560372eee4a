//! Integration tests for the notification tiers and access derivation.

mod helpers;

use http::StatusCode;

use helpers::TestApp;
use itqan_entity::user::UserRole;

#[tokio::test]
async fn test_mark_all_read_covers_durable_tier() {
    let app = TestApp::new().await;
    let email = TestApp::unique_email("notif");
    let user = app
        .create_user(&email, "tr4ctor-beam-ostrich!", UserRole::Student)
        .await;
    let token = app.login(&email, "tr4ctor-beam-ostrich!", "STUDENT").await;

    for i in 0..3 {
        sqlx::query("INSERT INTO notifications (user_id, message) VALUES ($1, $2)")
            .bind(user)
            .bind(format!("message {i}"))
            .execute(&app.db_pool)
            .await
            .unwrap();
    }

    let count = app
        .request("GET", "/api/notifications/unread-count", None, Some(&token))
        .await;
    assert_eq!(count.status, StatusCode::OK);
    assert_eq!(count.body["data"], 3);

    let mark = app
        .request("PUT", "/api/notifications/read-all", None, Some(&token))
        .await;
    assert_eq!(mark.status, StatusCode::OK);

    let count = app
        .request("GET", "/api/notifications/unread-count", None, Some(&token))
        .await;
    assert_eq!(count.body["data"], 0);
}

#[tokio::test]
async fn test_clear_empties_notifications() {
    let app = TestApp::new().await;
    let email = TestApp::unique_email("clear");
    let user = app
        .create_user(&email, "tr4ctor-beam-ostrich!", UserRole::Student)
        .await;
    let token = app.login(&email, "tr4ctor-beam-ostrich!", "STUDENT").await;

    sqlx::query("INSERT INTO notifications (user_id, message) VALUES ($1, 'hello')")
        .bind(user)
        .execute(&app.db_pool)
        .await
        .unwrap();

    let clear = app
        .request("DELETE", "/api/notifications", None, Some(&token))
        .await;
    assert_eq!(clear.status, StatusCode::OK);

    let list = app
        .request("GET", "/api/notifications", None, Some(&token))
        .await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_access_derivation_from_enrollment_table() {
    let app = TestApp::new().await;
    let email = TestApp::unique_email("access");
    let user = app
        .create_user(&email, "tr4ctor-beam-ostrich!", UserRole::Student)
        .await;
    let token = app.login(&email, "tr4ctor-beam-ostrich!", "STUDENT").await;
    let course = app.create_course("Database Architecture").await;

    let check = app
        .request(
            "GET",
            &format!("/api/courses/{course}/access"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(check.status, StatusCode::OK);
    assert_eq!(check.body["data"]["has_access"], false);

    sqlx::query("INSERT INTO enrollments (user_id, course_id) VALUES ($1, $2)")
        .bind(user)
        .bind(course)
        .execute(&app.db_pool)
        .await
        .unwrap();

    let check = app
        .request(
            "GET",
            &format!("/api/courses/{course}/access"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(check.body["data"]["has_access"], true);
}

#[tokio::test]
async fn test_admin_role_bypasses_enrollment() {
    let app = TestApp::new().await;
    let email = TestApp::unique_email("adminaccess");
    app.create_user(&email, "tr4ctor-beam-ostrich!", UserRole::Admin)
        .await;
    let token = app.login(&email, "tr4ctor-beam-ostrich!", "ADMIN").await;
    let course = app.create_course("FullStack Mastery").await;

    let check = app
        .request(
            "GET",
            &format!("/api/courses/{course}/access"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(check.body["data"]["has_access"], true);
}

#[tokio::test]
async fn test_fresh_enrollment_read_overrides_cache() {
    let app = TestApp::new().await;
    let email = TestApp::unique_email("fresh");
    let user = app
        .create_user(&email, "tr4ctor-beam-ostrich!", UserRole::Student)
        .await;
    let token = app.login(&email, "tr4ctor-beam-ostrich!", "STUDENT").await;
    let course = app.create_course("UI/UX Principles").await;

    // Prime the cache with the empty list.
    let initial = app
        .request("GET", "/api/enrollments/mine", None, Some(&token))
        .await;
    assert_eq!(initial.body["data"].as_array().unwrap().len(), 0);

    // Grant enrollment out-of-band; the fresh read must see it even if
    // the cached copy is stale.
    sqlx::query("INSERT INTO enrollments (user_id, course_id) VALUES ($1, $2)")
        .bind(user)
        .bind(course)
        .execute(&app.db_pool)
        .await
        .unwrap();

    let fresh = app
        .request("GET", "/api/enrollments/mine?fresh=true", None, Some(&token))
        .await;
    assert_eq!(fresh.body["data"].as_array().unwrap().len(), 1);
}

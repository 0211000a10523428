//! HTTP-level integration tests for the `/api/v1/people` JSON resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, count_rows, delete, get, post_json};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_person_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/people",
        serde_json::json!({
            "first_name": "John",
            "last_name": "Doe",
            "phone": "800-234-4567"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["data"]["id"].is_number());
    assert_eq!(json["data"]["phone_numbers"][0]["number"], "800-234-4567");
    assert_eq!(count_rows(&pool, "people").await, 6);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_missing_fields_returns_validation_error(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/people",
        serde_json::json!({ "first_name": "John", "phone": "800-234-456" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let details = json["details"].as_array().unwrap();
    assert_eq!(details.len(), 2);
    assert_eq!(details[0]["message"], "Last name was not provided.");
    assert_eq!(details[1]["message"], "Phone number was not in a valid format.");
    assert_eq!(count_rows(&pool, "people").await, 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_people(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/people").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_person_phone_count_matches_rows(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/people/-2").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let (expected,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM phone_numbers WHERE person_id = -2")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(
        json["data"]["phone_numbers"].as_array().unwrap().len() as i64,
        expected
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_nonexistent_person_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/people/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_person_with_phones_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = delete(app, "/api/v1/people/-3").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(count_rows(&pool, "people").await, 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_person_returns_204(pool: PgPool) {
    sqlx::query("DELETE FROM phone_numbers WHERE person_id = -3")
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, "/api/v1/people/-3").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Subsequent GET should 404.
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/people/-3").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_nonexistent_person_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = delete(app, "/api/v1/people/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

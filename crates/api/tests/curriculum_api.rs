//! HTTP-level tests for the curriculum hierarchy, activities, exercises and
//! multilingual views.
//!
//! Need `DATABASE_URL`; run with `cargo test -p kalvi-api -- --ignored`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, editor_token, get_auth, learner_token, post_json_auth, put_json_auth,
};
use serde_json::json;
use sqlx::PgPool;

async fn create_level(pool: &PgPool, body: serde_json::Value) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/levels", body, &editor_token()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn create_lesson(pool: &PgPool, level_id: i64) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/levels/{level_id}/lessons"),
        json!({"nameEn": "Colours", "name_ta": "நிறங்கள்"}),
        &editor_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn create_activity(pool: &PgPool, lesson_id: i64, body: serde_json::Value) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/lessons/{lesson_id}/activities"),
        body,
        &editor_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Levels and lessons
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
#[ignore]
async fn test_level_names_resolve_by_language(pool: PgPool) {
    let id = create_level(
        &pool,
        json!({"Name_en": "Beginner", "name_ta": "ஆரம்பம்"}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/levels/{id}?lang=ta"), &learner_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["display_name"], "ஆரம்பம்");

    // Sinhala is missing and falls back to English.
    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/levels/{id}?lang=si"), &learner_token()).await;
    assert_eq!(body_json(response).await["display_name"], "Beginner");
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore]
async fn test_levels_list_in_sequence_order(pool: PgPool) {
    create_level(&pool, json!({"name_en": "Second", "sequence_order": 2})).await;
    create_level(&pool, json!({"name_en": "First", "sequence_order": 1})).await;

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/v1/levels", &learner_token()).await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["display_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["First", "Second"]);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore]
async fn test_update_cannot_blank_every_name(pool: PgPool) {
    let id = create_level(&pool, json!({"name_en": "Only English"})).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/levels/{id}"),
        json!({"name_en": ""}),
        &editor_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/levels/{id}"), &learner_token()).await;
    assert_eq!(body_json(response).await["name_en"], "Only English");
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore]
async fn test_lessons_under_missing_level_return_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/levels/999999/lessons", &learner_token()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/levels/999999/lessons",
        json!({"name_en": "Orphan"}),
        &editor_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore]
async fn test_delete_level_removes_its_lessons(pool: PgPool) {
    let level_id = create_level(&pool, json!({"name_en": "Temp"})).await;
    let lesson_id = create_lesson(&pool, level_id).await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/levels/{level_id}"), &editor_token()).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response =
        get_auth(app, &format!("/api/v1/lessons/{lesson_id}"), &learner_token()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore]
async fn test_duplicate_main_activity_name_conflicts(pool: PgPool) {
    let body = json!({"name_en": "Listening"});
    let app = common::build_test_app(pool.clone());
    let response =
        post_json_auth(app, "/api/v1/main-activities", body.clone(), &editor_token()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/v1/main-activities", body, &editor_token()).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Activities
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
#[ignore]
async fn test_activity_without_content_gets_template(pool: PgPool) {
    let level_id = create_level(&pool, json!({"name_en": "L1"})).await;
    let lesson_id = create_lesson(&pool, level_id).await;
    let id = create_activity(
        &pool,
        lesson_id,
        json!({"activityTypeId": 6, "title_en": "True or false"}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/activities/{id}"), &learner_token()).await;
    let json = body_json(response).await;
    assert!(json["content_json"]["statements"].is_array());

    let app = common::build_test_app(pool);
    let response =
        get_auth(app, &format!("/api/v1/activities/{id}/render"), &learner_token()).await;
    let json = body_json(response).await;
    assert_eq!(json["status"], "mounted");
    assert_eq!(json["code"], "true_false");
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore]
async fn test_activity_type_change_revalidates_content(pool: PgPool) {
    let level_id = create_level(&pool, json!({"name_en": "L1"})).await;
    let lesson_id = create_lesson(&pool, level_id).await;
    let id = create_activity(&pool, lesson_id, json!({"activityTypeId": 6})).await;

    // True/false statements are not a valid MCQ.
    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/activities/{id}"),
        json!({"activityTypeId": 3}),
        &editor_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/activities/{id}"),
        json!({"title_si": "සත්‍ය හෝ අසත්‍ය"}),
        &editor_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["activity_type_id"], 6);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore]
async fn test_type_change_is_refused_when_exercises_do_not_fit(pool: PgPool) {
    let level_id = create_level(&pool, json!({"name_en": "L1"})).await;
    let lesson_id = create_lesson(&pool, level_id).await;
    let id = create_activity(&pool, lesson_id, json!({"activityTypeId": 3})).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/activities/{id}/exercises"),
        json!({"content_json": {
            "question": "Which is red?",
            "choices": [
                {"id": 1, "text": "Apple", "isCorrect": true},
                {"id": 2, "text": "Sky"}
            ]
        }}),
        &editor_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Text MCQ to picture MCQ keeps the same shape.
    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/activities/{id}"),
        json!({"activityTypeId": 4}),
        &editor_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The activity content fits true/false, the stored MCQ exercise does not.
    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/activities/{id}"),
        json!({
            "activityTypeId": 6,
            "contentJson": {"statements": [{"id": 1, "text": "Sky is blue", "isTrue": true}]}
        }),
        &editor_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let message = body_json(response).await["error"].to_string();
    assert!(message.contains("Exercise"), "{message}");

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/activities/{id}"), &learner_token()).await;
    assert_eq!(body_json(response).await["activity_type_id"], 4);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore]
async fn test_activities_list_in_order_with_multilingual_view(pool: PgPool) {
    let level_id = create_level(&pool, json!({"name_en": "L1"})).await;
    let lesson_id = create_lesson(&pool, level_id).await;
    create_activity(&pool, lesson_id, json!({"activityTypeId": 1, "title_en": "A"})).await;
    create_activity(&pool, lesson_id, json!({"activityTypeId": 17, "titleTa": "ஆ"})).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(
        get_auth(
            app,
            &format!("/api/v1/lessons/{lesson_id}/activities"),
            &learner_token(),
        )
        .await,
    )
    .await;
    let orders: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["sequence_order"].as_i64().unwrap())
        .collect();
    assert_eq!(orders, [1, 2]);

    let app = common::build_test_app(pool);
    let json = body_json(
        get_auth(
            app,
            &format!("/api/v1/multilingual/activities?lesson_id={lesson_id}"),
            &learner_token(),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"][0]["title"]["en"], "A");
    assert_eq!(json["data"][1]["title"]["ta"], "ஆ");
}

// ---------------------------------------------------------------------------
// Exercises
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
#[ignore]
async fn test_replace_exercises_is_all_or_nothing(pool: PgPool) {
    let level_id = create_level(&pool, json!({"name_en": "L1"})).await;
    let lesson_id = create_lesson(&pool, level_id).await;
    let activity_id = create_activity(&pool, lesson_id, json!({"activityTypeId": 6})).await;
    let uri = format!("/api/v1/activities/{activity_id}/exercises");

    let statement = |text: &str| json!({"statements": [{"id": 1, "text": text, "isTrue": true}]});

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &uri,
        json!([statement("one"), statement("two")]),
        &editor_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);

    // The second draft breaks the schema; nothing changes.
    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &uri,
        json!([statement("three"), {"statements": "nope"}]),
        &editor_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, &uri, &learner_token()).await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["content_json"]["statements"][0]["text"], "one");
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore]
async fn test_exercise_content_is_checked_against_parent_type(pool: PgPool) {
    let level_id = create_level(&pool, json!({"name_en": "L1"})).await;
    let lesson_id = create_lesson(&pool, level_id).await;
    let activity_id = create_activity(&pool, lesson_id, json!({"activityTypeId": 6})).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/activities/{activity_id}/exercises"),
        json!({"content_json": {"choices": []}}),
        &editor_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

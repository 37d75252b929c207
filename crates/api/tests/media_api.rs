//! HTTP-level tests for media uploads that reach the database.
//!
//! Need `DATABASE_URL`; run with `cargo test -p kalvi-api -- --ignored`.

mod common;

use std::io::Cursor;

use axum::http::StatusCode;
use common::{body_json, editor_token, get_auth, learner_token, post_file_auth};
use sqlx::PgPool;

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::RgbImage::new(width, height)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore]
async fn test_upload_image_stores_file_and_dimensions(pool: PgPool) {
    let media_root = tempfile::tempdir().unwrap();

    let app = common::build_test_app_with_media(pool.clone(), media_root.path());
    let response = post_file_auth(
        app,
        "/api/v1/media",
        "../Apple Picture.PNG",
        &png(12, 8),
        &editor_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["kind"], "image");
    assert_eq!(json["original_name"], "Apple Picture.PNG");
    assert_eq!(json["width"], 12);
    assert_eq!(json["height"], 8);

    let stored_path = json["stored_path"].as_str().unwrap();
    assert!(stored_path.starts_with("images/"));
    assert!(media_root.path().join(stored_path).is_file());

    let id = json["id"].as_i64().unwrap();
    let app = common::build_test_app_with_media(pool, media_root.path());
    let response = get_auth(app, &format!("/api/v1/media/{id}"), &learner_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["stored_path"], stored_path);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore]
async fn test_upload_audio_has_no_dimensions(pool: PgPool) {
    let media_root = tempfile::tempdir().unwrap();
    let app = common::build_test_app_with_media(pool, media_root.path());
    let response =
        post_file_auth(app, "/api/v1/media", "song.mp3", b"ID3 fake", &editor_token()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["kind"], "audio");
    assert!(json["width"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore]
async fn test_missing_media_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/media/424242", &learner_token()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

//! Repository tests for the curriculum hierarchy against a real database.
//!
//! Need `DATABASE_URL`; run with `cargo test -p kalvi-db -- --ignored`.

use kalvi_db::models::activity::{CreateActivity, UpdateActivity};
use kalvi_db::models::exercise::CreateExercise;
use kalvi_db::models::lesson::CreateLesson;
use kalvi_db::models::level::{CreateLevel, UpdateLevel};
use kalvi_db::models::main_activity::CreateMainActivity;
use kalvi_db::repositories::{
    ActivityRepo, ExerciseRepo, LessonRepo, LevelRepo, MainActivityRepo,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_level(name: &str) -> CreateLevel {
    CreateLevel {
        name_en: Some(name.to_string()),
        ..CreateLevel::default()
    }
}

fn new_lesson(level_id: i64, name: &str) -> CreateLesson {
    CreateLesson {
        level_id,
        name_en: Some(name.to_string()),
        ..CreateLesson::default()
    }
}

fn new_activity(lesson_id: i64, content: serde_json::Value) -> CreateActivity {
    CreateActivity {
        lesson_id,
        activity_type_id: 6,
        title_en: Some("True or false".to_string()),
        content_json: Some(content),
        ..CreateActivity::default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_health_check(pool: PgPool) {
    kalvi_db::health_check(&pool).await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_sequence_order_appends(pool: PgPool) {
    let first = LevelRepo::create(&pool, &new_level("One")).await.unwrap();
    let second = LevelRepo::create(&pool, &new_level("Two")).await.unwrap();
    assert_eq!(first.sequence_order, 1);
    assert_eq!(second.sequence_order, 2);

    let lesson_a = LessonRepo::create(&pool, &new_lesson(second.id, "A")).await.unwrap();
    let lesson_b = LessonRepo::create(&pool, &new_lesson(second.id, "B")).await.unwrap();
    let other = LessonRepo::create(&pool, &new_lesson(first.id, "X")).await.unwrap();
    assert_eq!(lesson_a.sequence_order, 1);
    assert_eq!(lesson_b.sequence_order, 2);
    assert_eq!(other.sequence_order, 1);

    let listed = LessonRepo::list_by_level(&pool, second.id).await.unwrap();
    let names: Vec<_> = listed.iter().map(|l| l.name_en.as_deref()).collect();
    assert_eq!(names, vec![Some("A"), Some("B")]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_update_applies_only_present_fields(pool: PgPool) {
    let level = LevelRepo::create(
        &pool,
        &CreateLevel {
            name_ta: Some("நிலை".to_string()),
            name_en: Some("Level".to_string()),
            ..CreateLevel::default()
        },
    )
    .await
    .unwrap();

    let updated = LevelRepo::update(
        &pool,
        level.id,
        &UpdateLevel {
            name_en: Some("Beginner".to_string()),
            ..UpdateLevel::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.name_en.as_deref(), Some("Beginner"));
    assert_eq!(updated.name_ta.as_deref(), Some("நிலை"));

    let missing = LevelRepo::update(&pool, level.id + 1000, &UpdateLevel::default())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_cascade_delete_level(pool: PgPool) {
    let level = LevelRepo::create(&pool, &new_level("Cascade")).await.unwrap();
    let lesson = LessonRepo::create(&pool, &new_lesson(level.id, "L")).await.unwrap();
    let activity = ActivityRepo::create(&pool, &new_activity(lesson.id, json!({})))
        .await
        .unwrap();
    let exercise = ExerciseRepo::create(
        &pool,
        &CreateExercise {
            activity_id: activity.id,
            content_json: json!({"statements": []}),
            sequence_order: None,
        },
    )
    .await
    .unwrap();

    assert!(LevelRepo::delete(&pool, level.id).await.unwrap());
    assert!(LessonRepo::find_by_id(&pool, lesson.id).await.unwrap().is_none());
    assert!(ActivityRepo::find_by_id(&pool, activity.id).await.unwrap().is_none());
    assert!(ExerciseRepo::find_by_id(&pool, exercise.id).await.unwrap().is_none());
    assert!(!LevelRepo::delete(&pool, level.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_activity_content_round_trips(pool: PgPool) {
    let level = LevelRepo::create(&pool, &new_level("L")).await.unwrap();
    let lesson = LessonRepo::create(&pool, &new_lesson(level.id, "L1")).await.unwrap();
    let content = json!({"statements": [{"id": 1, "text": "Sky is blue", "isTrue": true}]});
    let activity = ActivityRepo::create(&pool, &new_activity(lesson.id, content.clone()))
        .await
        .unwrap();
    assert_eq!(activity.content_json, content);
    assert_eq!(activity.activity_type_id, 6);

    let retitled = ActivityRepo::update(
        &pool,
        activity.id,
        &UpdateActivity {
            title_si: Some("සත්‍ය හෝ අසත්‍ය".to_string()),
            ..UpdateActivity::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(retitled.content_json, content);
    assert_eq!(retitled.title_en.as_deref(), Some("True or false"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_missing_content_defaults_to_empty_object(pool: PgPool) {
    let level = LevelRepo::create(&pool, &new_level("L")).await.unwrap();
    let lesson = LessonRepo::create(&pool, &new_lesson(level.id, "L1")).await.unwrap();
    let activity = ActivityRepo::create(
        &pool,
        &CreateActivity {
            lesson_id: lesson.id,
            activity_type_id: 1,
            ..CreateActivity::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(activity.content_json, json!({}));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_main_activity_delete_ungroups_activities(pool: PgPool) {
    let group = MainActivityRepo::create(
        &pool,
        &CreateMainActivity {
            name_en: Some("Listening".to_string()),
            ..CreateMainActivity::default()
        },
    )
    .await
    .unwrap();
    let level = LevelRepo::create(&pool, &new_level("L")).await.unwrap();
    let lesson = LessonRepo::create(&pool, &new_lesson(level.id, "L1")).await.unwrap();
    let activity = ActivityRepo::create(
        &pool,
        &CreateActivity {
            main_activity_id: Some(group.id),
            ..new_activity(lesson.id, json!({}))
        },
    )
    .await
    .unwrap();

    assert!(MainActivityRepo::delete(&pool, group.id).await.unwrap());
    let activity = ActivityRepo::find_by_id(&pool, activity.id).await.unwrap().unwrap();
    assert_eq!(activity.main_activity_id, None);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_duplicate_main_activity_name_is_rejected(pool: PgPool) {
    let input = CreateMainActivity {
        name_en: Some("Writing".to_string()),
        ..CreateMainActivity::default()
    };
    MainActivityRepo::create(&pool, &input).await.unwrap();
    let err = MainActivityRepo::create(&pool, &input).await.unwrap_err();
    let db_err = err.as_database_error().unwrap();
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_main_activities_name_en"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_replace_all_exercises(pool: PgPool) {
    let level = LevelRepo::create(&pool, &new_level("L")).await.unwrap();
    let lesson = LessonRepo::create(&pool, &new_lesson(level.id, "L1")).await.unwrap();
    let activity = ActivityRepo::create(&pool, &new_activity(lesson.id, json!({})))
        .await
        .unwrap();
    for n in 0..3 {
        ExerciseRepo::create(
            &pool,
            &CreateExercise {
                activity_id: activity.id,
                content_json: json!({"n": n}),
                sequence_order: None,
            },
        )
        .await
        .unwrap();
    }

    let replaced = ExerciseRepo::replace_all(&pool, activity.id, &[json!({"a": 1}), json!({"b": 2})])
        .await
        .unwrap();
    assert_eq!(replaced.len(), 2);

    let listed = ExerciseRepo::list_by_activity(&pool, activity.id).await.unwrap();
    let contents: Vec<_> = listed.iter().map(|e| e.content_json.clone()).collect();
    assert_eq!(contents, vec![json!({"a": 1}), json!({"b": 2})]);
    let orders: Vec<_> = listed.iter().map(|e| e.sequence_order).collect();
    assert_eq!(orders, vec![1, 2]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_lesson_requires_existing_level(pool: PgPool) {
    let err = LessonRepo::create(&pool, &new_lesson(424242, "Orphan"))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().unwrap();
    assert_eq!(db_err.code().as_deref(), Some("23503"));
}

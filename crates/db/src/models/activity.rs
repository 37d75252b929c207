//! Activity entity model and DTOs.

use kalvi_core::language::MultilingualText;
use kalvi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{multilingual, DisplayName};

/// A row from the `activities` table.
///
/// `content_json` has been validated against the schema of
/// `activity_type_id` before it was stored.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    pub lesson_id: DbId,
    pub main_activity_id: Option<DbId>,
    pub activity_type_id: i32,
    pub title_ta: Option<String>,
    pub title_en: Option<String>,
    pub title_si: Option<String>,
    pub content_json: serde_json::Value,
    pub sequence_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Activity {
    pub fn title(&self) -> MultilingualText {
        multilingual(&self.title_ta, &self.title_en, &self.title_si)
    }
}

impl DisplayName for Activity {
    fn display_name(&self) -> MultilingualText {
        self.title()
    }
}

/// DTO for creating an activity. `lesson_id` is taken from the URL path.
///
/// When `content_json` is omitted the type's default template is stored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateActivity {
    #[serde(default, alias = "lessonId")]
    pub lesson_id: DbId,
    #[serde(default, alias = "mainActivityId")]
    pub main_activity_id: Option<DbId>,
    #[serde(alias = "activityTypeId")]
    pub activity_type_id: i32,
    #[serde(default, alias = "Title_ta", alias = "titleTa")]
    pub title_ta: Option<String>,
    #[serde(default, alias = "Title_en", alias = "titleEn")]
    pub title_en: Option<String>,
    #[serde(default, alias = "Title_si", alias = "titleSi")]
    pub title_si: Option<String>,
    #[serde(default, alias = "contentJson")]
    pub content_json: Option<serde_json::Value>,
    #[serde(default, alias = "sequenceOrder")]
    pub sequence_order: Option<i32>,
}

/// DTO for updating an activity. Only present fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateActivity {
    #[serde(default, alias = "lessonId")]
    pub lesson_id: Option<DbId>,
    #[serde(default, alias = "mainActivityId")]
    pub main_activity_id: Option<DbId>,
    #[serde(default, alias = "activityTypeId")]
    pub activity_type_id: Option<i32>,
    #[serde(default, alias = "Title_ta", alias = "titleTa")]
    pub title_ta: Option<String>,
    #[serde(default, alias = "Title_en", alias = "titleEn")]
    pub title_en: Option<String>,
    #[serde(default, alias = "Title_si", alias = "titleSi")]
    pub title_si: Option<String>,
    #[serde(default, alias = "contentJson")]
    pub content_json: Option<serde_json::Value>,
    #[serde(default, alias = "sequenceOrder")]
    pub sequence_order: Option<i32>,
}

/// An activity with its title nested as a [`MultilingualText`].
#[derive(Debug, Clone, Serialize)]
pub struct MultilingualActivity {
    pub id: DbId,
    pub lesson_id: DbId,
    pub main_activity_id: Option<DbId>,
    pub activity_type_id: i32,
    pub title: MultilingualText,
    pub content_json: serde_json::Value,
    pub sequence_order: i32,
}

impl From<&Activity> for MultilingualActivity {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id,
            lesson_id: activity.lesson_id,
            main_activity_id: activity.main_activity_id,
            activity_type_id: activity.activity_type_id,
            title: activity.title(),
            content_json: activity.content_json.clone(),
            sequence_order: activity.sequence_order,
        }
    }
}

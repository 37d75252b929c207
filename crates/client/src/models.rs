//! Response and request types as the client sees them.
//!
//! Curriculum records arrive as flat rows (`name_en`, `Name_en`, `nameEn`
//! all occur in the wild). They are folded into [`MultilingualText`] on
//! the way in and written back as snake-case keys on the way out.

use kalvi_core::activity::ActivityType;
use kalvi_core::language::MultilingualText;
use kalvi_core::types::DbId;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `{ "data": [...] }` list envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct DataResponse<T> {
    pub data: Vec<T>,
}

// ---------------------------------------------------------------------------
// Flat-record helpers
// ---------------------------------------------------------------------------

fn field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|key| obj.get(*key).filter(|v| !v.is_null()))
}

fn required_i64(obj: &Map<String, Value>, keys: &[&str]) -> Result<i64, String> {
    field(obj, keys)
        .and_then(Value::as_i64)
        .ok_or_else(|| format!("missing integer field `{}`", keys[0]))
}

fn optional_i64(obj: &Map<String, Value>, keys: &[&str]) -> Option<i64> {
    field(obj, keys).and_then(Value::as_i64)
}

fn optional_i32(obj: &Map<String, Value>, keys: &[&str]) -> Option<i32> {
    optional_i64(obj, keys).and_then(|v| i32::try_from(v).ok())
}

fn optional_string(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    field(obj, keys).and_then(Value::as_str).map(str::to_string)
}

fn flat_map<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Map<String, Value>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Object(obj) => Ok(obj),
        other => Err(de::Error::custom(format!("expected an object, got {other}"))),
    }
}

/// Writes `text` as `prefix_ta`/`prefix_en`/`prefix_si`, omitting absent
/// languages so partial updates leave them alone.
fn put_text(body: &mut Map<String, Value>, prefix: &str, text: &MultilingualText) {
    let mut flat = Map::new();
    text.to_flat_fields(prefix, &mut flat);
    body.extend(flat.into_iter().filter(|(_, v)| !v.is_null()));
}

// ---------------------------------------------------------------------------
// Curriculum
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub id: DbId,
    pub name: MultilingualText,
    pub description: MultilingualText,
    pub sequence_order: i32,
    /// Name resolved by the server for the requested language.
    pub display_name: Option<String>,
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let obj = flat_map(deserializer)?;
        Ok(Level {
            id: required_i64(&obj, &["id", "levelId", "level_id"]).map_err(de::Error::custom)?,
            name: MultilingualText::from_flat_fields(&obj, "name"),
            description: MultilingualText::from_flat_fields(&obj, "description"),
            sequence_order: optional_i32(&obj, &["sequence_order", "sequenceOrder"])
                .unwrap_or_default(),
            display_name: optional_string(&obj, &["display_name", "displayName"]),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lesson {
    pub id: DbId,
    pub level_id: DbId,
    pub name: MultilingualText,
    pub description: MultilingualText,
    pub sequence_order: i32,
    pub display_name: Option<String>,
}

impl<'de> Deserialize<'de> for Lesson {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let obj = flat_map(deserializer)?;
        Ok(Lesson {
            id: required_i64(&obj, &["id", "lessonId", "lesson_id"]).map_err(de::Error::custom)?,
            level_id: required_i64(&obj, &["level_id", "levelId"]).map_err(de::Error::custom)?,
            name: MultilingualText::from_flat_fields(&obj, "name"),
            description: MultilingualText::from_flat_fields(&obj, "description"),
            sequence_order: optional_i32(&obj, &["sequence_order", "sequenceOrder"])
                .unwrap_or_default(),
            display_name: optional_string(&obj, &["display_name", "displayName"]),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MainActivity {
    pub id: DbId,
    pub name: MultilingualText,
    pub display_name: Option<String>,
}

impl<'de> Deserialize<'de> for MainActivity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let obj = flat_map(deserializer)?;
        Ok(MainActivity {
            id: required_i64(&obj, &["id", "mainActivityId", "main_activity_id"])
                .map_err(de::Error::custom)?,
            name: MultilingualText::from_flat_fields(&obj, "name"),
            display_name: optional_string(&obj, &["display_name", "displayName"]),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: DbId,
    pub lesson_id: DbId,
    pub main_activity_id: Option<DbId>,
    pub activity_type_id: i32,
    pub title: MultilingualText,
    pub content_json: Value,
    pub sequence_order: i32,
    pub display_name: Option<String>,
}

impl Activity {
    /// `None` for type ids this build does not know.
    pub fn activity_type(&self) -> Option<ActivityType> {
        ActivityType::from_id(self.activity_type_id)
    }
}

impl<'de> Deserialize<'de> for Activity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let obj = flat_map(deserializer)?;
        let activity_type_id = optional_i32(&obj, &["activity_type_id", "activityTypeId"])
            .ok_or_else(|| de::Error::custom("missing integer field `activity_type_id`"))?;
        // The multilingual view nests the title instead of flattening it.
        let title = match obj.get("title") {
            Some(nested @ Value::Object(_)) => {
                serde_json::from_value(nested.clone()).map_err(de::Error::custom)?
            }
            _ => MultilingualText::from_flat_fields(&obj, "title"),
        };
        Ok(Activity {
            id: required_i64(&obj, &["id", "activityId", "activity_id"])
                .map_err(de::Error::custom)?,
            lesson_id: required_i64(&obj, &["lesson_id", "lessonId"]).map_err(de::Error::custom)?,
            main_activity_id: optional_i64(&obj, &["main_activity_id", "mainActivityId"]),
            activity_type_id,
            title,
            content_json: field(&obj, &["content_json", "contentJson"])
                .cloned()
                .unwrap_or(Value::Object(Map::new())),
            sequence_order: optional_i32(&obj, &["sequence_order", "sequenceOrder"])
                .unwrap_or_default(),
            display_name: optional_string(&obj, &["display_name", "displayName"]),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Exercise {
    pub id: DbId,
    #[serde(alias = "activityId")]
    pub activity_id: DbId,
    #[serde(alias = "contentJson")]
    pub content_json: Value,
    #[serde(alias = "sequenceOrder")]
    pub sequence_order: i32,
}

// ---------------------------------------------------------------------------
// Write payloads
// ---------------------------------------------------------------------------

/// Body for creating or updating a level or lesson. Absent languages are
/// left unchanged by an update.
#[derive(Debug, Clone, Default)]
pub struct CurriculumInput {
    pub name: MultilingualText,
    pub description: MultilingualText,
    pub sequence_order: Option<i32>,
}

impl CurriculumInput {
    pub fn named(name: MultilingualText) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        put_text(&mut body, "name", &self.name);
        put_text(&mut body, "description", &self.description);
        if let Some(order) = self.sequence_order {
            body.insert("sequence_order".into(), order.into());
        }
        Value::Object(body)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActivityInput {
    pub activity_type_id: Option<i32>,
    pub main_activity_id: Option<DbId>,
    pub title: MultilingualText,
    /// Omit on create to start from the type's default template.
    pub content_json: Option<Value>,
    pub sequence_order: Option<i32>,
}

impl ActivityInput {
    pub fn new(activity_type: ActivityType, title: MultilingualText) -> Self {
        Self {
            activity_type_id: Some(activity_type.id()),
            title,
            ..Self::default()
        }
    }

    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        if let Some(id) = self.activity_type_id {
            body.insert("activity_type_id".into(), id.into());
        }
        if let Some(id) = self.main_activity_id {
            body.insert("main_activity_id".into(), id.into());
        }
        put_text(&mut body, "title", &self.title);
        if let Some(content) = &self.content_json {
            body.insert("content_json".into(), content.clone());
        }
        if let Some(order) = self.sequence_order {
            body.insert("sequence_order".into(), order.into());
        }
        Value::Object(body)
    }
}

// ---------------------------------------------------------------------------
// Registry, rendering, media, auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActivityTypeInfo {
    pub id: i32,
    pub code: String,
    pub name: MultilingualText,
    /// `name` resolved for the requested language.
    #[serde(default)]
    pub display_name: String,
    pub shape: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentValidation {
    pub valid: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// What the server's renderer made of an activity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderView {
    #[serde(rename_all = "camelCase")]
    Mounted {
        activity_type_id: i32,
        code: String,
        shape: String,
        content: Value,
    },
    #[serde(rename_all = "camelCase")]
    NotImplemented { activity_type_id: i32 },
    #[serde(rename_all = "camelCase")]
    Unavailable {
        activity_type_id: i32,
        code: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MediaAsset {
    pub id: DbId,
    pub kind: String,
    pub original_name: String,
    pub stored_path: String,
    pub content_type: Option<String>,
    pub size_bytes: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfile {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    #[serde(default)]
    pub db_healthy: bool,
}

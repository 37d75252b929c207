//! Lesson entity model and DTOs.

use kalvi_core::language::MultilingualText;
use kalvi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{multilingual, DisplayName};

/// A row from the `lessons` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lesson {
    pub id: DbId,
    pub level_id: DbId,
    pub name_ta: Option<String>,
    pub name_en: Option<String>,
    pub name_si: Option<String>,
    pub description_ta: Option<String>,
    pub description_en: Option<String>,
    pub description_si: Option<String>,
    pub sequence_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Lesson {
    pub fn name(&self) -> MultilingualText {
        multilingual(&self.name_ta, &self.name_en, &self.name_si)
    }
}

impl DisplayName for Lesson {
    fn display_name(&self) -> MultilingualText {
        self.name()
    }
}

/// DTO for creating a lesson. `level_id` is taken from the URL path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateLesson {
    #[serde(default, alias = "levelId")]
    pub level_id: DbId,
    #[serde(default, alias = "Name_ta", alias = "nameTa")]
    pub name_ta: Option<String>,
    #[serde(default, alias = "Name_en", alias = "nameEn")]
    pub name_en: Option<String>,
    #[serde(default, alias = "Name_si", alias = "nameSi")]
    pub name_si: Option<String>,
    #[serde(default, alias = "Description_ta", alias = "descriptionTa")]
    pub description_ta: Option<String>,
    #[serde(default, alias = "Description_en", alias = "descriptionEn")]
    pub description_en: Option<String>,
    #[serde(default, alias = "Description_si", alias = "descriptionSi")]
    pub description_si: Option<String>,
    #[serde(default, alias = "sequenceOrder")]
    pub sequence_order: Option<i32>,
}

impl CreateLesson {
    pub fn name(&self) -> MultilingualText {
        multilingual(&self.name_ta, &self.name_en, &self.name_si)
    }
}

/// DTO for updating a lesson. A `level_id` moves the lesson.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLesson {
    #[serde(default, alias = "levelId")]
    pub level_id: Option<DbId>,
    #[serde(default, alias = "Name_ta", alias = "nameTa")]
    pub name_ta: Option<String>,
    #[serde(default, alias = "Name_en", alias = "nameEn")]
    pub name_en: Option<String>,
    #[serde(default, alias = "Name_si", alias = "nameSi")]
    pub name_si: Option<String>,
    #[serde(default, alias = "Description_ta", alias = "descriptionTa")]
    pub description_ta: Option<String>,
    #[serde(default, alias = "Description_en", alias = "descriptionEn")]
    pub description_en: Option<String>,
    #[serde(default, alias = "Description_si", alias = "descriptionSi")]
    pub description_si: Option<String>,
    #[serde(default, alias = "sequenceOrder")]
    pub sequence_order: Option<i32>,
}

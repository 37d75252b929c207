//! Level entity model and DTOs.

use kalvi_core::language::MultilingualText;
use kalvi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{multilingual, DisplayName};

/// A row from the `levels` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Level {
    pub id: DbId,
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

impl Level {
    pub fn name(&self) -> MultilingualText {
        multilingual(&self.name_ta, &self.name_en, &self.name_si)
    }

    pub fn description(&self) -> MultilingualText {
        multilingual(&self.description_ta, &self.description_en, &self.description_si)
    }
}

impl DisplayName for Level {
    fn display_name(&self) -> MultilingualText {
        self.name()
    }
}

/// DTO for creating a level. At least one name must be non-blank.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateLevel {
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
    /// Appended after the last level when omitted.
    #[serde(default, alias = "sequenceOrder")]
    pub sequence_order: Option<i32>,
}

impl CreateLevel {
    pub fn name(&self) -> MultilingualText {
        multilingual(&self.name_ta, &self.name_en, &self.name_si)
    }
}

/// DTO for updating a level. Only present fields are applied.
pub type UpdateLevel = CreateLevel;

/// A level with its multilingual fields nested.
#[derive(Debug, Clone, Serialize)]
pub struct MultilingualLevel {
    pub id: DbId,
    pub name: MultilingualText,
    pub description: MultilingualText,
    pub sequence_order: i32,
}

impl From<&Level> for MultilingualLevel {
    fn from(level: &Level) -> Self {
        Self {
            id: level.id,
            name: level.name(),
            description: level.description(),
            sequence_order: level.sequence_order,
        }
    }
}

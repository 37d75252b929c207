//! Main activity (skill category) model and DTOs.

use kalvi_core::language::MultilingualText;
use kalvi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{multilingual, DisplayName};

/// A row from the `main_activities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MainActivity {
    pub id: DbId,
    pub name_ta: Option<String>,
    pub name_en: Option<String>,
    pub name_si: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DisplayName for MainActivity {
    fn display_name(&self) -> MultilingualText {
        multilingual(&self.name_ta, &self.name_en, &self.name_si)
    }
}

/// DTO for creating or updating a main activity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMainActivity {
    #[serde(default, alias = "Name_ta", alias = "nameTa")]
    pub name_ta: Option<String>,
    #[serde(default, alias = "Name_en", alias = "nameEn")]
    pub name_en: Option<String>,
    #[serde(default, alias = "Name_si", alias = "nameSi")]
    pub name_si: Option<String>,
}

impl CreateMainActivity {
    pub fn name(&self) -> MultilingualText {
        multilingual(&self.name_ta, &self.name_en, &self.name_si)
    }
}

pub type UpdateMainActivity = CreateMainActivity;

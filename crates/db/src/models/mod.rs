//! Row models and request DTOs, one module per table.
//!
//! Multilingual columns are stored flat (`name_ta`, `name_en`, `name_si`).
//! Create/update DTOs also accept the `Name_en` and `nameEn` spellings that
//! older clients send.

pub mod activity;
pub mod exercise;
pub mod lesson;
pub mod level;
pub mod main_activity;
pub mod media_asset;
pub mod session;
pub mod user;

pub use kalvi_core::language::DisplayName;
use kalvi_core::language::MultilingualText;

pub(crate) fn multilingual(
    ta: &Option<String>,
    en: &Option<String>,
    si: &Option<String>,
) -> MultilingualText {
    MultilingualText::new(ta.clone(), en.clone(), si.clone())
}

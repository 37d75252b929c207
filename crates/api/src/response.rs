//! Shared response envelope types for API handlers.

use kalvi_core::language::Language;
use kalvi_db::models::DisplayName;
use serde::Serialize;

/// Standard `{ "data": T }` envelope for list responses.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// A row plus its name resolved for one language.
///
/// Serializes as the row's own fields with an extra `display_name`, which
/// is empty when the row has no name in any language.
#[derive(Debug, Serialize)]
pub struct Localized<T: Serialize> {
    #[serde(flatten)]
    pub item: T,
    pub display_name: String,
}

impl<T: Serialize + DisplayName> Localized<T> {
    pub fn new(item: T, lang: Language) -> Self {
        let display_name = item.display_name().display(lang).to_string();
        Self { item, display_name }
    }

    pub fn all(items: Vec<T>, lang: Language) -> Vec<Self> {
        items.into_iter().map(|item| Self::new(item, lang)).collect()
    }
}

//! Shared query parameter types for API handlers.

use kalvi_core::error::CoreError;
use kalvi_core::language::Language;
use kalvi_core::types::DbId;
use serde::Deserialize;

use crate::error::AppError;

/// `?lang=` selecting the language display names resolve to.
#[derive(Debug, Default, Deserialize)]
pub struct LangParams {
    pub lang: Option<String>,
}

impl LangParams {
    /// The requested language, or `default` when none was given.
    pub fn language(&self, default: Language) -> Result<Language, AppError> {
        match self.lang.as_deref() {
            None | Some("") => Ok(default),
            Some(code) => code
                .parse()
                .map_err(|e: kalvi_core::language::UnknownLanguage| {
                    AppError::Core(CoreError::Validation(e.to_string()))
                }),
        }
    }
}

/// `?lesson_id=` for the multilingual activity listing.
#[derive(Debug, Deserialize)]
pub struct LessonFilter {
    pub lesson_id: DbId,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn test_language_defaults_when_missing() {
        let params = LangParams::default();
        assert_eq!(params.language(Language::Ta).unwrap(), Language::Ta);
    }

    #[test]
    fn test_language_parses_code() {
        let params = LangParams {
            lang: Some("SI".into()),
        };
        assert_eq!(params.language(Language::En).unwrap(), Language::Si);
    }

    #[test]
    fn test_unknown_language_is_a_validation_error() {
        let params = LangParams {
            lang: Some("fr".into()),
        };
        assert_matches!(
            params.language(Language::En),
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }
}

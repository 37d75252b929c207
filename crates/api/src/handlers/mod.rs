pub mod activity;
pub mod activity_type;
pub mod auth;
pub mod exercise;
pub mod lesson;
pub mod level;
pub mod main_activity;
pub mod media;
pub mod multilingual;

use kalvi_core::error::CoreError;
use kalvi_core::language::MultilingualText;

use crate::error::{AppError, AppResult};

/// Reject names that are blank in every language.
pub(crate) fn require_name(entity: &str, name: &MultilingualText) -> AppResult<()> {
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "{entity} name is required in at least one language"
        ))));
    }
    Ok(())
}

/// Name after a partial update: present fields replace stored ones.
pub(crate) fn merged_name(
    update: [&Option<String>; 3],
    stored: [Option<String>; 3],
) -> MultilingualText {
    let [ta, en, si] = stored;
    MultilingualText::new(
        update[0].clone().or(ta),
        update[1].clone().or(en),
        update[2].clone().or(si),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_name_prefers_update() {
        let merged = merged_name(
            [&None, &Some("New".into()), &None],
            [Some("பழைய".into()), Some("Old".into()), None],
        );
        assert_eq!(merged.en.as_deref(), Some("New"));
        assert_eq!(merged.ta.as_deref(), Some("பழைய"));
    }

    #[test]
    fn test_blanking_every_name_is_rejected() {
        let merged = merged_name([&None, &Some(" ".into()), &None], [None, Some("Old".into()), None]);
        assert!(require_name("Level", &merged).is_err());
    }
}

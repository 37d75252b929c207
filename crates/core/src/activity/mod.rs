//! Activity content: the typed schema, the type registry, validation,
//! default templates and render dispatch.

pub mod content;
pub mod error;
pub mod registry;
pub mod render;
pub mod template;
pub mod validate;

pub use content::{ActivityContent, ContentHeader, ContentText, ItemId};
pub use error::ContentError;
pub use registry::{registry_entries, ActivityType, ContentShape, RegistryEntry};
pub use render::{render, RenderDescription, RenderOutcome};
pub use template::default_template;

/// Parse and validate content for an activity type id.
///
/// This is the save-time gate for activities and exercises: unknown type
/// ids and content that does not fit the type's shape are both rejected.
pub fn validate_for_type(
    activity_type_id: i32,
    content: &serde_json::Value,
) -> Result<ActivityContent, ContentError> {
    let activity_type = ActivityType::from_id(activity_type_id)
        .ok_or(ContentError::UnknownActivityType(activity_type_id))?;
    ActivityContent::parse_validated(activity_type.shape(), content.clone())
}

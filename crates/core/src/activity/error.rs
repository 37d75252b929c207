use super::registry::ContentShape;
use crate::error::CoreError;

/// Errors raised while parsing or validating activity content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The text is not syntactically valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[source] serde_json::Error),

    /// Valid JSON, but it does not deserialize into the expected shape.
    #[error("Content does not match the {shape} shape: {source}")]
    Shape {
        shape: ContentShape,
        #[source]
        source: serde_json::Error,
    },

    /// The content deserialized but breaks a rule of its shape.
    #[error("Invalid {shape} content: {message}")]
    Invalid {
        shape: ContentShape,
        message: String,
    },

    #[error("Unknown activity type id {0}")]
    UnknownActivityType(i32),
}

impl ContentError {
    pub(crate) fn invalid(shape: ContentShape, message: impl Into<String>) -> Self {
        ContentError::Invalid {
            shape,
            message: message.into(),
        }
    }
}

impl From<ContentError> for CoreError {
    fn from(err: ContentError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

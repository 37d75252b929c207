//! Dispatch from an activity type id and raw content to a mounted session.
//!
//! Rendering never fails: unknown type ids and unreadable content produce
//! a descriptive outcome instead of an error.

use serde::Serialize;
use serde_json::Value;

use super::content::ActivityContent;
use super::registry::{ActivityType, ContentShape};
use crate::interaction::ActivitySession;

/// Result of rendering one activity.
#[derive(Debug, Clone)]
pub enum RenderOutcome {
    Mounted {
        activity_type: ActivityType,
        /// The content exactly as it was passed in.
        content: Value,
        session: ActivitySession,
    },
    NotImplemented {
        activity_type_id: i32,
    },
    Unavailable {
        activity_type: ActivityType,
        reason: String,
    },
}

/// Serializable summary of a [`RenderOutcome`] for API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderDescription {
    #[serde(rename_all = "camelCase")]
    Mounted {
        activity_type_id: i32,
        code: &'static str,
        shape: ContentShape,
        content: Value,
    },
    #[serde(rename_all = "camelCase")]
    NotImplemented { activity_type_id: i32 },
    #[serde(rename_all = "camelCase")]
    Unavailable {
        activity_type_id: i32,
        code: &'static str,
        reason: String,
    },
}

/// Render `content` as an activity of type `activity_type_id`.
pub fn render(activity_type_id: i32, content: &Value) -> RenderOutcome {
    let Some(activity_type) = ActivityType::from_id(activity_type_id) else {
        tracing::debug!(activity_type_id, "No renderer for activity type");
        return RenderOutcome::NotImplemented { activity_type_id };
    };
    match ActivityContent::from_value(activity_type.shape(), content.clone()) {
        Ok(parsed) => RenderOutcome::Mounted {
            activity_type,
            content: content.clone(),
            session: ActivitySession::from_content(parsed),
        },
        Err(err) => {
            tracing::debug!(activity_type_id, error = %err, "Activity content unavailable");
            RenderOutcome::Unavailable {
                activity_type,
                reason: err.to_string(),
            }
        }
    }
}

impl RenderOutcome {
    pub fn is_mounted(&self) -> bool {
        matches!(self, RenderOutcome::Mounted { .. })
    }

    pub fn session(&self) -> Option<&ActivitySession> {
        match self {
            RenderOutcome::Mounted { session, .. } => Some(session),
            _ => None,
        }
    }

    pub fn describe(&self) -> RenderDescription {
        match self {
            RenderOutcome::Mounted {
                activity_type,
                content,
                ..
            } => RenderDescription::Mounted {
                activity_type_id: activity_type.id(),
                code: activity_type.code(),
                shape: activity_type.shape(),
                content: content.clone(),
            },
            RenderOutcome::NotImplemented { activity_type_id } => {
                RenderDescription::NotImplemented {
                    activity_type_id: *activity_type_id,
                }
            }
            RenderOutcome::Unavailable {
                activity_type,
                reason,
            } => RenderDescription::Unavailable {
                activity_type_id: activity_type.id(),
                code: activity_type.code(),
                reason: reason.clone(),
            },
        }
    }
}

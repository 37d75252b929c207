//! Exercise editor model.
//!
//! An activity holds an array of exercises, each edited as raw JSON text.
//! The editor keeps the text exactly as typed and re-parses it on every
//! edit. Serializing the array back is only possible when every draft
//! parses; invalid text is never spliced into the output.

use serde_json::Value;

use crate::activity::content::ActivityContent;
use crate::activity::error::ContentError;
use crate::activity::registry::ActivityType;
use crate::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("Exercise index {index} is out of range (have {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Exercise list is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("Exercise list must be a JSON array")]
    NotAnArray,

    /// One or more drafts hold text that is not valid JSON.
    #[error("Exercises {} contain invalid JSON", format_indices(.0))]
    InvalidDrafts(Vec<usize>),

    #[error("Exercise {index} is invalid: {source}")]
    Content {
        index: usize,
        #[source]
        source: ContentError,
    },
}

fn format_indices(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| format!("#{}", i + 1))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<EditorError> for CoreError {
    fn from(err: EditorError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

/// One exercise as the author typed it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseDraft {
    raw: String,
    parsed: Result<Value, String>,
}

impl ExerciseDraft {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parsed = serde_json::from_str::<Value>(&raw).map_err(|e| e.to_string());
        Self { raw, parsed }
    }

    fn from_value(value: Value) -> Self {
        let raw = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
        Self {
            raw,
            parsed: Ok(value),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_valid(&self) -> bool {
        self.parsed.is_ok()
    }

    pub fn value(&self) -> Option<&Value> {
        self.parsed.as_ref().ok()
    }

    pub fn error(&self) -> Option<&str> {
        self.parsed.as_ref().err().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExerciseEditor {
    drafts: Vec<ExerciseDraft>,
}

impl ExerciseEditor {
    /// One draft per raw string.
    pub fn from_raw(raw: &[String]) -> Self {
        Self {
            drafts: raw.iter().map(ExerciseDraft::new).collect(),
        }
    }

    /// Split a stored JSON array into one draft per element.
    pub fn from_json_array(json: &str) -> Result<Self, EditorError> {
        let value: Value = serde_json::from_str(json).map_err(EditorError::Json)?;
        Self::from_values(value)
    }

    pub fn from_values(value: Value) -> Result<Self, EditorError> {
        let Value::Array(items) = value else {
            return Err(EditorError::NotAnArray);
        };
        Ok(Self {
            drafts: items.into_iter().map(ExerciseDraft::from_value).collect(),
        })
    }

    pub fn drafts(&self) -> &[ExerciseDraft] {
        &self.drafts
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    /// Replace the text of one draft. Returns whether the new text parses.
    pub fn edit(&mut self, index: usize, text: impl Into<String>) -> Result<bool, EditorError> {
        let len = self.drafts.len();
        let draft = self
            .drafts
            .get_mut(index)
            .ok_or(EditorError::IndexOutOfRange { index, len })?;
        *draft = ExerciseDraft::new(text);
        Ok(draft.is_valid())
    }

    /// Append a new exercise seeded from `template`.
    pub fn add_exercise(&mut self, template: &ActivityContent) -> usize {
        self.drafts.push(ExerciseDraft::from_value(template.to_value()));
        self.drafts.len() - 1
    }

    pub fn remove_exercise(&mut self, index: usize) -> Result<ExerciseDraft, EditorError> {
        self.check_index(index)?;
        Ok(self.drafts.remove(index))
    }

    pub fn move_exercise(&mut self, from: usize, to: usize) -> Result<(), EditorError> {
        self.check_index(from)?;
        self.check_index(to)?;
        let draft = self.drafts.remove(from);
        self.drafts.insert(to, draft);
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.drafts.iter().all(ExerciseDraft::is_valid)
    }

    /// `(index, message)` for every draft that does not parse.
    pub fn errors(&self) -> Vec<(usize, String)> {
        self.drafts
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.error().map(|e| (i, e.to_string())))
            .collect()
    }

    /// Parsed values of every draft, in order.
    pub fn values(&self) -> Result<Vec<Value>, EditorError> {
        let invalid: Vec<usize> = self.errors().into_iter().map(|(i, _)| i).collect();
        if !invalid.is_empty() {
            return Err(EditorError::InvalidDrafts(invalid));
        }
        Ok(self.drafts.iter().filter_map(|d| d.value().cloned()).collect())
    }

    /// The whole exercise array as JSON text.
    pub fn serialize(&self) -> Result<String, EditorError> {
        Ok(Value::Array(self.values()?).to_string())
    }

    /// Check every draft against the typed schema of `activity_type`.
    pub fn validate_for(
        &self,
        activity_type: ActivityType,
    ) -> Result<Vec<ActivityContent>, EditorError> {
        self.values()?
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                ActivityContent::parse_validated(activity_type.shape(), value)
                    .map_err(|source| EditorError::Content { index, source })
            })
            .collect()
    }

    fn check_index(&self, index: usize) -> Result<(), EditorError> {
        if index >= self.drafts.len() {
            return Err(EditorError::IndexOutOfRange {
                index,
                len: self.drafts.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::activity::template::default_template;

    fn editor() -> ExerciseEditor {
        ExerciseEditor::from_raw(&[r#"{"a": 1}"#.to_string(), r#"{"b": 2}"#.to_string()])
    }

    #[test]
    fn test_edit_toggles_validity_and_keeps_text() {
        let mut e = editor();
        assert!(e.is_valid());
        assert!(!e.edit(1, r#"{"b": "#).unwrap());
        assert!(!e.is_valid());
        assert_eq!(e.drafts()[1].raw(), r#"{"b": "#);
        assert!(e.edit(1, r#"{"b": 3}"#).unwrap());
        assert!(e.is_valid());
    }

    #[test]
    fn test_serialize_refuses_invalid_drafts() {
        let mut e = editor();
        e.edit(0, "not json").unwrap();
        assert_matches!(e.serialize(), Err(EditorError::InvalidDrafts(ref idx)) if idx == &vec![0]);
        let errors = e.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, 0);
    }

    #[test]
    fn test_serialize_emits_full_array() {
        let e = editor();
        let out: Value = serde_json::from_str(&e.serialize().unwrap()).unwrap();
        assert_eq!(out, json!([{"a": 1}, {"b": 2}]));
    }

    #[test]
    fn test_from_json_array_splits_elements() {
        let e = ExerciseEditor::from_json_array(r#"[{"x": 1}, {"y": [1, 2]}]"#).unwrap();
        assert_eq!(e.len(), 2);
        assert_eq!(e.drafts()[1].value(), Some(&json!({"y": [1, 2]})));
    }

    #[test]
    fn test_from_json_array_rejects_non_arrays() {
        assert_matches!(
            ExerciseEditor::from_json_array(r#"{"x": 1}"#),
            Err(EditorError::NotAnArray)
        );
        assert_matches!(
            ExerciseEditor::from_json_array("[{"),
            Err(EditorError::Json(_))
        );
    }

    #[test]
    fn test_add_remove_move() {
        let mut e = editor();
        let index = e.add_exercise(&default_template(ActivityType::TrueFalse));
        assert_eq!(index, 2);
        e.move_exercise(2, 0).unwrap();
        assert!(e.drafts()[0].raw().contains("statements"));
        let removed = e.remove_exercise(1).unwrap();
        assert_eq!(removed.value(), Some(&json!({"a": 1})));
        assert_eq!(e.len(), 2);
        assert_matches!(
            e.remove_exercise(5),
            Err(EditorError::IndexOutOfRange { index: 5, len: 2 })
        );
    }

    #[test]
    fn test_validate_for_checks_schema() {
        let mut e = ExerciseEditor::default();
        e.add_exercise(&default_template(ActivityType::TextMcq));
        assert_eq!(e.validate_for(ActivityType::TextMcq).unwrap().len(), 1);

        e.edit(0, r#"{"choices": []}"#).unwrap();
        assert_matches!(
            e.validate_for(ActivityType::TextMcq),
            Err(EditorError::Content { index: 0, .. })
        );
    }

    #[test]
    fn test_invalid_drafts_message_is_one_based() {
        let err = EditorError::InvalidDrafts(vec![0, 2]);
        assert_eq!(err.to_string(), "Exercises #1, #3 contain invalid JSON");
    }
}

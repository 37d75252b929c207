//! Typed content documents, one struct per content shape.
//!
//! Content JSON is authored in the admin panel and stored as-is, so keys are
//! camelCase and most fields tolerate omission via serde defaults. Strings a
//! learner sees may be either a plain string or a [`MultilingualText`]
//! object; see [`ContentText`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use super::error::ContentError;
use super::registry::ContentShape;
use crate::language::{Language, MultilingualText};

// ---------------------------------------------------------------------------
// Shared building blocks
// ---------------------------------------------------------------------------

/// Identifier of an item inside a content document.
///
/// Authors use both numbers and strings; the original representation is kept
/// so content survives a save/load cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{n}"),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        ItemId::Number(n)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::Text(s.to_string())
    }
}

/// Learner-facing text: a bare string or a per-language record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum ContentText {
    Plain(String),
    Localized(MultilingualText),
}

impl ContentText {
    /// Display string for `lang`. Plain strings ignore the language.
    pub fn resolve(&self, lang: Language) -> &str {
        match self {
            ContentText::Plain(s) => s,
            ContentText::Localized(text) => text.display(lang),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            ContentText::Plain(s) => s.trim().is_empty(),
            ContentText::Localized(text) => text.is_empty(),
        }
    }
}

impl Default for ContentText {
    fn default() -> Self {
        ContentText::Plain(String::new())
    }
}

impl From<&str> for ContentText {
    fn from(s: &str) -> Self {
        ContentText::Plain(s.to_string())
    }
}

impl From<MultilingualText> for ContentText {
    fn from(text: MultilingualText) -> Self {
        ContentText::Localized(text)
    }
}

/// Title and instruction shown above every activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ContentHeader {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<ContentText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<ContentText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction_audio_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Flashcards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FlashcardContent {
    #[serde(flatten)]
    pub header: ContentHeader,
    #[serde(default)]
    pub cards: Vec<Flashcard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Flashcard {
    pub id: ItemId,
    pub front: ContentText,
    #[serde(default)]
    pub back: ContentText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Multiple choice
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct McqContent {
    #[serde(flatten)]
    pub header: ContentHeader,
    #[serde(default)]
    pub question: ContentText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_audio_url: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Choice {
    pub id: ItemId,
    #[serde(default)]
    pub text: ContentText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub is_correct: bool,
}

// ---------------------------------------------------------------------------
// True / false
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TrueFalseContent {
    #[serde(flatten)]
    pub header: ContentHeader,
    #[serde(default)]
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Statement {
    pub id: ItemId,
    pub text: ContentText,
    pub is_true: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Drag-and-drop matching
// ---------------------------------------------------------------------------

/// Images are dragged onto targets; `matchId` names the target an image
/// belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MatchingContent {
    #[serde(flatten)]
    pub header: ContentHeader,
    #[serde(default)]
    pub images: Vec<MatchImage>,
    #[serde(default)]
    pub targets: Vec<MatchTarget>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MatchImage {
    pub id: ItemId,
    pub match_id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<ContentText>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MatchTarget {
    pub id: ItemId,
    #[serde(default)]
    pub label: ContentText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Sentence builder
// ---------------------------------------------------------------------------

/// Word chips clicked in a required order to build a sentence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SentenceBuilderContent {
    #[serde(flatten)]
    pub header: ContentHeader,
    #[serde(default)]
    pub parts: Vec<SentencePart>,
    #[serde(default)]
    pub distractors: Vec<WordChip>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<ContentText>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SentencePart {
    pub id: ItemId,
    pub text: String,
    /// 1-based position in the finished sentence.
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WordChip {
    pub id: ItemId,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Fill in the blank
// ---------------------------------------------------------------------------

/// A sentence with `___` markers, one per entry in `blanks`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FillBlankContent {
    #[serde(flatten)]
    pub header: ContentHeader,
    #[serde(default)]
    pub sentence: String,
    #[serde(default)]
    pub blanks: Vec<Blank>,
    #[serde(default)]
    pub word_bank: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Blank {
    pub id: ItemId,
    /// Accepted answers; any one of them is correct.
    #[serde(default)]
    pub answers: Vec<String>,
}

// ---------------------------------------------------------------------------
// Find the items
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FindItemsContent {
    #[serde(flatten)]
    pub header: ContentHeader,
    #[serde(default)]
    pub items: Vec<GridItem>,
    #[serde(default)]
    pub correct_item_ids: Vec<ItemId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GridItem {
    pub id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<ContentText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Sequencing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SequencingContent {
    #[serde(flatten)]
    pub header: ContentHeader,
    #[serde(default)]
    pub items: Vec<SequenceItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SequenceItem {
    pub id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<ContentText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// 1-based correct position.
    pub position: u32,
}

// ---------------------------------------------------------------------------
// Memory pairs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MemoryPairsContent {
    #[serde(flatten)]
    pub header: ContentHeader,
    #[serde(default)]
    pub pairs: Vec<MemoryPair>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MemoryPair {
    pub id: ItemId,
    pub first: CardFace,
    pub second: CardFace,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CardFace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<ContentText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Letter tracing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LetterTracingContent {
    #[serde(flatten)]
    pub header: ContentHeader,
    #[serde(default)]
    pub letters: Vec<TraceLetter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TraceLetter {
    pub id: ItemId,
    pub letter: String,
    /// Each stroke is a polyline in a normalized `0.0..=1.0` canvas.
    #[serde(default)]
    pub strokes: Vec<Vec<Point>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

// ---------------------------------------------------------------------------
// Audio sync
// ---------------------------------------------------------------------------

/// A narrated text whose segments highlight as the audio plays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AudioSyncContent {
    #[serde(flatten)]
    pub header: ContentHeader,
    #[serde(default)]
    pub audio_url: String,
    #[serde(default)]
    pub segments: Vec<SyncSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SyncSegment {
    pub id: ItemId,
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: ContentText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Tagged union
// ---------------------------------------------------------------------------

/// Typed content of one activity or exercise.
///
/// Stored JSON carries no tag; the shape comes from the activity type, so
/// deserialization always goes through [`ActivityContent::parse`] or
/// [`ActivityContent::from_value`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActivityContent {
    Flashcards(FlashcardContent),
    Mcq(McqContent),
    TrueFalse(TrueFalseContent),
    Matching(MatchingContent),
    SentenceBuilder(SentenceBuilderContent),
    FillBlank(FillBlankContent),
    FindItems(FindItemsContent),
    Sequencing(SequencingContent),
    MemoryPairs(MemoryPairsContent),
    LetterTracing(LetterTracingContent),
    AudioSync(AudioSyncContent),
}

impl ActivityContent {
    /// Parse raw JSON text into the given shape.
    ///
    /// Syntax errors and shape mismatches are reported separately so the
    /// editor can tell "not JSON" apart from "wrong fields".
    pub fn parse(shape: ContentShape, json: &str) -> Result<Self, ContentError> {
        let value: Value = serde_json::from_str(json).map_err(ContentError::Json)?;
        Self::from_value(shape, value)
    }

    /// Deserialize an already-parsed JSON value into the given shape.
    pub fn from_value(shape: ContentShape, value: Value) -> Result<Self, ContentError> {
        let shape_err = |source| ContentError::Shape { shape, source };
        let content = match shape {
            ContentShape::Flashcards => {
                Self::Flashcards(serde_json::from_value(value).map_err(shape_err)?)
            }
            ContentShape::Mcq => Self::Mcq(serde_json::from_value(value).map_err(shape_err)?),
            ContentShape::TrueFalse => {
                Self::TrueFalse(serde_json::from_value(value).map_err(shape_err)?)
            }
            ContentShape::Matching => {
                Self::Matching(serde_json::from_value(value).map_err(shape_err)?)
            }
            ContentShape::SentenceBuilder => {
                Self::SentenceBuilder(serde_json::from_value(value).map_err(shape_err)?)
            }
            ContentShape::FillBlank => {
                Self::FillBlank(serde_json::from_value(value).map_err(shape_err)?)
            }
            ContentShape::FindItems => {
                Self::FindItems(serde_json::from_value(value).map_err(shape_err)?)
            }
            ContentShape::Sequencing => {
                Self::Sequencing(serde_json::from_value(value).map_err(shape_err)?)
            }
            ContentShape::MemoryPairs => {
                Self::MemoryPairs(serde_json::from_value(value).map_err(shape_err)?)
            }
            ContentShape::LetterTracing => {
                Self::LetterTracing(serde_json::from_value(value).map_err(shape_err)?)
            }
            ContentShape::AudioSync => {
                Self::AudioSync(serde_json::from_value(value).map_err(shape_err)?)
            }
        };
        Ok(content)
    }

    /// Parse and validate in one step. This is the save-time gate.
    pub fn parse_validated(shape: ContentShape, value: Value) -> Result<Self, ContentError> {
        let content = Self::from_value(shape, value)?;
        content.validate()?;
        Ok(content)
    }

    pub fn shape(&self) -> ContentShape {
        match self {
            Self::Flashcards(_) => ContentShape::Flashcards,
            Self::Mcq(_) => ContentShape::Mcq,
            Self::TrueFalse(_) => ContentShape::TrueFalse,
            Self::Matching(_) => ContentShape::Matching,
            Self::SentenceBuilder(_) => ContentShape::SentenceBuilder,
            Self::FillBlank(_) => ContentShape::FillBlank,
            Self::FindItems(_) => ContentShape::FindItems,
            Self::Sequencing(_) => ContentShape::Sequencing,
            Self::MemoryPairs(_) => ContentShape::MemoryPairs,
            Self::LetterTracing(_) => ContentShape::LetterTracing,
            Self::AudioSync(_) => ContentShape::AudioSync,
        }
    }

    pub fn header(&self) -> &ContentHeader {
        match self {
            Self::Flashcards(c) => &c.header,
            Self::Mcq(c) => &c.header,
            Self::TrueFalse(c) => &c.header,
            Self::Matching(c) => &c.header,
            Self::SentenceBuilder(c) => &c.header,
            Self::FillBlank(c) => &c.header,
            Self::FindItems(c) => &c.header,
            Self::Sequencing(c) => &c.header,
            Self::MemoryPairs(c) => &c.header,
            Self::LetterTracing(c) => &c.header,
            Self::AudioSync(c) => &c.header,
        }
    }

    pub fn to_value(&self) -> Value {
        // Serializing plain data structs into a `Value` cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn to_json_string(&self) -> String {
        self.to_value().to_string()
    }
}

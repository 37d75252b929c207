//! Structural rules for each content shape.
//!
//! Deserialization only guarantees field types. These checks catch content
//! that parses but cannot be played: an MCQ with no correct choice, a
//! matching image pointing at a target that does not exist, and so on.

use std::collections::HashSet;
use std::sync::LazyLock;

use super::content::{
    ActivityContent, AudioSyncContent, FillBlankContent, FindItemsContent, FlashcardContent,
    ItemId, LetterTracingContent, MatchingContent, McqContent, MemoryPairsContent,
    SentenceBuilderContent, SequencingContent, TrueFalseContent,
};
use super::error::ContentError;
use super::registry::ContentShape;

/// Regex matching a blank marker: three or more underscores.
static BLANK_MARKER_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"_{3,}").expect("valid regex"));

/// Minimum number of choices in a multiple-choice question.
pub const MIN_MCQ_CHOICES: usize = 2;

/// Minimum number of points in a tracing stroke.
pub const MIN_STROKE_POINTS: usize = 2;

/// Count the blank markers in a fill-in-the-blank sentence.
pub fn count_blank_markers(sentence: &str) -> usize {
    BLANK_MARKER_RE.find_iter(sentence).count()
}

impl ActivityContent {
    /// Check the rules of this content's shape.
    pub fn validate(&self) -> Result<(), ContentError> {
        match self {
            Self::Flashcards(c) => validate_flashcards(c),
            Self::Mcq(c) => validate_mcq(c),
            Self::TrueFalse(c) => validate_true_false(c),
            Self::Matching(c) => validate_matching(c),
            Self::SentenceBuilder(c) => validate_sentence_builder(c),
            Self::FillBlank(c) => validate_fill_blank(c),
            Self::FindItems(c) => validate_find_items(c),
            Self::Sequencing(c) => validate_sequencing(c),
            Self::MemoryPairs(c) => validate_memory_pairs(c),
            Self::LetterTracing(c) => validate_letter_tracing(c),
            Self::AudioSync(c) => validate_audio_sync(c),
        }
    }
}

// ---------------------------------------------------------------------------
// Shared checks
// ---------------------------------------------------------------------------

fn require_non_empty<T>(shape: ContentShape, items: &[T], what: &str) -> Result<(), ContentError> {
    if items.is_empty() {
        return Err(ContentError::invalid(shape, format!("{what} must not be empty")));
    }
    Ok(())
}

fn require_unique_ids<'a>(
    shape: ContentShape,
    ids: impl IntoIterator<Item = &'a ItemId>,
    what: &str,
) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ContentError::invalid(
                shape,
                format!("duplicate id '{id}' in {what}"),
            ));
        }
    }
    Ok(())
}

fn require_media_url(
    shape: ContentShape,
    url: Option<&String>,
    field: &str,
) -> Result<(), ContentError> {
    if let Some(url) = url {
        if url.trim().is_empty() {
            return Err(ContentError::invalid(
                shape,
                format!("{field} must not be blank when present"),
            ));
        }
    }
    Ok(())
}

/// Positions must be exactly `1..=n` in some order.
fn require_permutation(
    shape: ContentShape,
    positions: impl IntoIterator<Item = u32>,
    what: &str,
) -> Result<(), ContentError> {
    let mut sorted: Vec<u32> = positions.into_iter().collect();
    sorted.sort_unstable();
    let expected = 1..=sorted.len() as u32;
    if !sorted.iter().copied().eq(expected) {
        return Err(ContentError::invalid(
            shape,
            format!("{what} must be a sequence 1..={} without gaps or repeats", sorted.len()),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Per-shape rules
// ---------------------------------------------------------------------------

fn validate_flashcards(c: &FlashcardContent) -> Result<(), ContentError> {
    let shape = ContentShape::Flashcards;
    require_non_empty(shape, &c.cards, "cards")?;
    require_unique_ids(shape, c.cards.iter().map(|card| &card.id), "cards")?;
    for card in &c.cards {
        if card.front.is_blank() && card.image_url.is_none() {
            return Err(ContentError::invalid(
                shape,
                format!("card '{}' needs front text or an image", card.id),
            ));
        }
        require_media_url(shape, card.image_url.as_ref(), "imageUrl")?;
        require_media_url(shape, card.audio_url.as_ref(), "audioUrl")?;
    }
    Ok(())
}

fn validate_mcq(c: &McqContent) -> Result<(), ContentError> {
    let shape = ContentShape::Mcq;
    if c.choices.len() < MIN_MCQ_CHOICES {
        return Err(ContentError::invalid(
            shape,
            format!("at least {MIN_MCQ_CHOICES} choices are required"),
        ));
    }
    require_unique_ids(shape, c.choices.iter().map(|ch| &ch.id), "choices")?;
    if !c.choices.iter().any(|ch| ch.is_correct) {
        return Err(ContentError::invalid(shape, "at least one choice must be correct"));
    }
    require_media_url(shape, c.question_image_url.as_ref(), "questionImageUrl")?;
    require_media_url(shape, c.question_audio_url.as_ref(), "questionAudioUrl")?;
    for choice in &c.choices {
        if choice.text.is_blank() && choice.image_url.is_none() && choice.audio_url.is_none() {
            return Err(ContentError::invalid(
                shape,
                format!("choice '{}' needs text, an image or audio", choice.id),
            ));
        }
        require_media_url(shape, choice.image_url.as_ref(), "imageUrl")?;
        require_media_url(shape, choice.audio_url.as_ref(), "audioUrl")?;
    }
    Ok(())
}

fn validate_true_false(c: &TrueFalseContent) -> Result<(), ContentError> {
    let shape = ContentShape::TrueFalse;
    require_non_empty(shape, &c.statements, "statements")?;
    require_unique_ids(shape, c.statements.iter().map(|s| &s.id), "statements")?;
    for statement in &c.statements {
        if statement.text.is_blank() {
            return Err(ContentError::invalid(
                shape,
                format!("statement '{}' has no text", statement.id),
            ));
        }
    }
    Ok(())
}

fn validate_matching(c: &MatchingContent) -> Result<(), ContentError> {
    let shape = ContentShape::Matching;
    require_non_empty(shape, &c.images, "images")?;
    require_non_empty(shape, &c.targets, "targets")?;
    require_unique_ids(shape, c.images.iter().map(|i| &i.id), "images")?;
    require_unique_ids(shape, c.targets.iter().map(|t| &t.id), "targets")?;

    let target_ids: HashSet<&ItemId> = c.targets.iter().map(|t| &t.id).collect();
    for image in &c.images {
        if !target_ids.contains(&image.match_id) {
            return Err(ContentError::invalid(
                shape,
                format!(
                    "image '{}' has matchId '{}' which names no target",
                    image.id, image.match_id
                ),
            ));
        }
        require_media_url(shape, image.image_url.as_ref(), "imageUrl")?;
    }

    let matched: HashSet<&ItemId> = c.images.iter().map(|i| &i.match_id).collect();
    if let Some(orphan) = c.targets.iter().find(|t| !matched.contains(&t.id)) {
        return Err(ContentError::invalid(
            shape,
            format!("target '{}' has no matching image", orphan.id),
        ));
    }
    Ok(())
}

fn validate_sentence_builder(c: &SentenceBuilderContent) -> Result<(), ContentError> {
    let shape = ContentShape::SentenceBuilder;
    require_non_empty(shape, &c.parts, "parts")?;
    let all_ids = c
        .parts
        .iter()
        .map(|p| &p.id)
        .chain(c.distractors.iter().map(|d| &d.id));
    require_unique_ids(shape, all_ids, "parts and distractors")?;
    require_permutation(shape, c.parts.iter().map(|p| p.order), "part orders")?;
    if let Some(blank) = c.parts.iter().find(|p| p.text.trim().is_empty()) {
        return Err(ContentError::invalid(
            shape,
            format!("part '{}' has no text", blank.id),
        ));
    }
    require_media_url(shape, c.audio_url.as_ref(), "audioUrl")
}

fn validate_fill_blank(c: &FillBlankContent) -> Result<(), ContentError> {
    let shape = ContentShape::FillBlank;
    require_non_empty(shape, &c.blanks, "blanks")?;
    require_unique_ids(shape, c.blanks.iter().map(|b| &b.id), "blanks")?;
    let markers = count_blank_markers(&c.sentence);
    if markers != c.blanks.len() {
        return Err(ContentError::invalid(
            shape,
            format!(
                "sentence has {markers} blank marker(s) but {} blank(s) are defined",
                c.blanks.len()
            ),
        ));
    }
    for blank in &c.blanks {
        if !blank.answers.iter().any(|a| !a.trim().is_empty()) {
            return Err(ContentError::invalid(
                shape,
                format!("blank '{}' needs at least one answer", blank.id),
            ));
        }
    }
    Ok(())
}

fn validate_find_items(c: &FindItemsContent) -> Result<(), ContentError> {
    let shape = ContentShape::FindItems;
    require_non_empty(shape, &c.items, "items")?;
    require_non_empty(shape, &c.correct_item_ids, "correctItemIds")?;
    require_unique_ids(shape, c.items.iter().map(|i| &i.id), "items")?;
    require_unique_ids(shape, c.correct_item_ids.iter(), "correctItemIds")?;
    let item_ids: HashSet<&ItemId> = c.items.iter().map(|i| &i.id).collect();
    if let Some(missing) = c.correct_item_ids.iter().find(|id| !item_ids.contains(id)) {
        return Err(ContentError::invalid(
            shape,
            format!("correct item '{missing}' is not in items"),
        ));
    }
    for item in &c.items {
        require_media_url(shape, item.image_url.as_ref(), "imageUrl")?;
        require_media_url(shape, item.audio_url.as_ref(), "audioUrl")?;
    }
    Ok(())
}

fn validate_sequencing(c: &SequencingContent) -> Result<(), ContentError> {
    let shape = ContentShape::Sequencing;
    if c.items.len() < 2 {
        return Err(ContentError::invalid(shape, "at least 2 items are required"));
    }
    require_unique_ids(shape, c.items.iter().map(|i| &i.id), "items")?;
    require_permutation(shape, c.items.iter().map(|i| i.position), "item positions")?;
    for item in &c.items {
        let has_text = item.text.as_ref().is_some_and(|t| !t.is_blank());
        if !has_text && item.image_url.is_none() {
            return Err(ContentError::invalid(
                shape,
                format!("item '{}' needs text or an image", item.id),
            ));
        }
        require_media_url(shape, item.image_url.as_ref(), "imageUrl")?;
    }
    Ok(())
}

fn validate_memory_pairs(c: &MemoryPairsContent) -> Result<(), ContentError> {
    let shape = ContentShape::MemoryPairs;
    require_non_empty(shape, &c.pairs, "pairs")?;
    require_unique_ids(shape, c.pairs.iter().map(|p| &p.id), "pairs")?;
    for pair in &c.pairs {
        for face in [&pair.first, &pair.second] {
            let has_text = face.text.as_ref().is_some_and(|t| !t.is_blank());
            if !has_text && face.image_url.is_none() && face.audio_url.is_none() {
                return Err(ContentError::invalid(
                    shape,
                    format!("pair '{}' has an empty card face", pair.id),
                ));
            }
            require_media_url(shape, face.image_url.as_ref(), "imageUrl")?;
            require_media_url(shape, face.audio_url.as_ref(), "audioUrl")?;
        }
    }
    Ok(())
}

fn validate_letter_tracing(c: &LetterTracingContent) -> Result<(), ContentError> {
    let shape = ContentShape::LetterTracing;
    require_non_empty(shape, &c.letters, "letters")?;
    require_unique_ids(shape, c.letters.iter().map(|l| &l.id), "letters")?;
    for letter in &c.letters {
        if letter.letter.trim().is_empty() {
            return Err(ContentError::invalid(
                shape,
                format!("letter '{}' has no glyph", letter.id),
            ));
        }
        if letter.strokes.is_empty() {
            return Err(ContentError::invalid(
                shape,
                format!("letter '{}' has no strokes", letter.id),
            ));
        }
        for stroke in &letter.strokes {
            if stroke.len() < MIN_STROKE_POINTS {
                return Err(ContentError::invalid(
                    shape,
                    format!(
                        "letter '{}' has a stroke with fewer than {MIN_STROKE_POINTS} points",
                        letter.id
                    ),
                ));
            }
            let out_of_canvas = stroke
                .iter()
                .any(|p| !(0.0..=1.0).contains(&p.x) || !(0.0..=1.0).contains(&p.y));
            if out_of_canvas {
                return Err(ContentError::invalid(
                    shape,
                    format!("letter '{}' has a point outside the 0..1 canvas", letter.id),
                ));
            }
        }
        require_media_url(shape, letter.audio_url.as_ref(), "audioUrl")?;
    }
    Ok(())
}

fn validate_audio_sync(c: &AudioSyncContent) -> Result<(), ContentError> {
    let shape = ContentShape::AudioSync;
    if c.audio_url.trim().is_empty() {
        return Err(ContentError::invalid(shape, "audioUrl is required"));
    }
    require_non_empty(shape, &c.segments, "segments")?;
    require_unique_ids(shape, c.segments.iter().map(|s| &s.id), "segments")?;
    let mut previous_end = 0;
    for segment in &c.segments {
        if segment.start_ms >= segment.end_ms {
            return Err(ContentError::invalid(
                shape,
                format!("segment '{}' must start before it ends", segment.id),
            ));
        }
        if segment.start_ms < previous_end {
            return Err(ContentError::invalid(
                shape,
                format!("segment '{}' overlaps or precedes the previous one", segment.id),
            ));
        }
        previous_end = segment.end_ms;
    }
    Ok(())
}

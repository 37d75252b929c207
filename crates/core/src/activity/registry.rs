//! Activity type registry.
//!
//! Activities are stored with an integer `activity_type_id`. This module maps
//! those ids onto a closed [`ActivityType`] enum and each type onto the
//! [`ContentShape`] its content must follow. Many types share a shape and
//! differ only in presentation (a picture MCQ and a listen-and-choose MCQ
//! carry the same content).
//!
//! Ids are persisted; never renumber an existing entry.

use std::fmt;

use serde::Serialize;
use ts_rs::TS;

use crate::language::{DisplayName, MultilingualText};

/// The structural family of a content document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ContentShape {
    Flashcards,
    Mcq,
    TrueFalse,
    Matching,
    SentenceBuilder,
    FillBlank,
    FindItems,
    Sequencing,
    MemoryPairs,
    LetterTracing,
    AudioSync,
}

impl ContentShape {
    pub fn code(self) -> &'static str {
        match self {
            ContentShape::Flashcards => "flashcards",
            ContentShape::Mcq => "mcq",
            ContentShape::TrueFalse => "true_false",
            ContentShape::Matching => "matching",
            ContentShape::SentenceBuilder => "sentence_builder",
            ContentShape::FillBlank => "fill_blank",
            ContentShape::FindItems => "find_items",
            ContentShape::Sequencing => "sequencing",
            ContentShape::MemoryPairs => "memory_pairs",
            ContentShape::LetterTracing => "letter_tracing",
            ContentShape::AudioSync => "audio_sync",
        }
    }
}

impl fmt::Display for ContentShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Every activity type the platform can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityType {
    Flashcard,
    PictureFlashcard,
    ListenAndRepeat,
    TextMcq,
    PictureMcq,
    ListenAndChoose,
    LetterSound,
    TrueFalse,
    ImageMatch,
    WordImageMatch,
    AudioMatch,
    SentenceBuilder,
    WordBuilder,
    FillInTheBlank,
    FindTheItems,
    OddOneOut,
    WordSearch,
    PictureSequencing,
    StorySequencing,
    MemoryGame,
    LetterTracing,
    NumberTracing,
    SongPlayer,
    StoryReader,
}

impl ActivityType {
    pub const ALL: [ActivityType; 24] = [
        ActivityType::Flashcard,
        ActivityType::PictureFlashcard,
        ActivityType::ListenAndRepeat,
        ActivityType::TextMcq,
        ActivityType::PictureMcq,
        ActivityType::ListenAndChoose,
        ActivityType::LetterSound,
        ActivityType::TrueFalse,
        ActivityType::ImageMatch,
        ActivityType::WordImageMatch,
        ActivityType::AudioMatch,
        ActivityType::SentenceBuilder,
        ActivityType::WordBuilder,
        ActivityType::FillInTheBlank,
        ActivityType::FindTheItems,
        ActivityType::OddOneOut,
        ActivityType::WordSearch,
        ActivityType::PictureSequencing,
        ActivityType::StorySequencing,
        ActivityType::MemoryGame,
        ActivityType::LetterTracing,
        ActivityType::NumberTracing,
        ActivityType::SongPlayer,
        ActivityType::StoryReader,
    ];

    /// Look up a persisted type id. Unknown ids yield `None`.
    pub fn from_id(id: i32) -> Option<ActivityType> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    /// Stable persisted id.
    pub fn id(self) -> i32 {
        match self {
            ActivityType::Flashcard => 1,
            ActivityType::PictureFlashcard => 2,
            ActivityType::TextMcq => 3,
            ActivityType::PictureMcq => 4,
            ActivityType::ListenAndChoose => 5,
            ActivityType::TrueFalse => 6,
            ActivityType::ImageMatch => 7,
            ActivityType::WordImageMatch => 8,
            ActivityType::AudioMatch => 9,
            ActivityType::SentenceBuilder => 10,
            ActivityType::WordBuilder => 11,
            ActivityType::FillInTheBlank => 12,
            ActivityType::FindTheItems => 13,
            ActivityType::OddOneOut => 14,
            ActivityType::PictureSequencing => 15,
            ActivityType::StorySequencing => 16,
            ActivityType::MemoryGame => 17,
            ActivityType::LetterTracing => 18,
            ActivityType::NumberTracing => 19,
            ActivityType::SongPlayer => 20,
            ActivityType::StoryReader => 21,
            ActivityType::ListenAndRepeat => 22,
            ActivityType::LetterSound => 23,
            ActivityType::WordSearch => 24,
        }
    }

    /// Machine-readable code used by the front ends to pick a component.
    pub fn code(self) -> &'static str {
        match self {
            ActivityType::Flashcard => "flashcard",
            ActivityType::PictureFlashcard => "picture_flashcard",
            ActivityType::ListenAndRepeat => "listen_and_repeat",
            ActivityType::TextMcq => "text_mcq",
            ActivityType::PictureMcq => "picture_mcq",
            ActivityType::ListenAndChoose => "listen_and_choose",
            ActivityType::LetterSound => "letter_sound",
            ActivityType::TrueFalse => "true_false",
            ActivityType::ImageMatch => "image_match",
            ActivityType::WordImageMatch => "word_image_match",
            ActivityType::AudioMatch => "audio_match",
            ActivityType::SentenceBuilder => "sentence_builder",
            ActivityType::WordBuilder => "word_builder",
            ActivityType::FillInTheBlank => "fill_in_the_blank",
            ActivityType::FindTheItems => "find_the_items",
            ActivityType::OddOneOut => "odd_one_out",
            ActivityType::WordSearch => "word_search",
            ActivityType::PictureSequencing => "picture_sequencing",
            ActivityType::StorySequencing => "story_sequencing",
            ActivityType::MemoryGame => "memory_game",
            ActivityType::LetterTracing => "letter_tracing",
            ActivityType::NumberTracing => "number_tracing",
            ActivityType::SongPlayer => "song_player",
            ActivityType::StoryReader => "story_reader",
        }
    }

    /// Name shown to editors and learners, in every content language.
    pub fn display_name(self) -> MultilingualText {
        let (ta, en, si) = self.names();
        MultilingualText::new(Some(ta.into()), Some(en.into()), Some(si.into()))
    }

    /// `(ta, en, si)` names.
    fn names(self) -> (&'static str, &'static str, &'static str) {
        match self {
            ActivityType::Flashcard => ("அட்டைகள்", "Flashcards", "කාඩ්පත්"),
            ActivityType::PictureFlashcard => {
                ("பட அட்டைகள்", "Picture flashcards", "පින්තූර කාඩ්පත්")
            }
            ActivityType::ListenAndRepeat => {
                ("கேட்டுச் சொல்", "Listen and repeat", "අසා නැවත කියන්න")
            }
            ActivityType::TextMcq => (
                "சரியான விடையைத் தேர்ந்தெடு",
                "Multiple choice",
                "නිවැරදි පිළිතුර තෝරන්න",
            ),
            ActivityType::PictureMcq => (
                "சரியான படத்தைத் தேர்ந்தெடு",
                "Picture multiple choice",
                "නිවැරදි පින්තූරය තෝරන්න",
            ),
            ActivityType::ListenAndChoose => {
                ("கேட்டுத் தேர்ந்தெடு", "Listen and choose", "අසා තෝරන්න")
            }
            ActivityType::LetterSound => ("எழுத்து ஒலிகள்", "Letter sounds", "අකුරු ශබ්ද"),
            ActivityType::TrueFalse => ("சரியா தவறா", "True or false", "හරි ද වැරදි ද"),
            ActivityType::ImageMatch => {
                ("படங்களைப் பொருத்து", "Image matching", "පින්තූර ගළපන්න")
            }
            ActivityType::WordImageMatch => (
                "சொல்லைப் படத்துடன் பொருத்து",
                "Match words to pictures",
                "වචන පින්තූරවලට ගළපන්න",
            ),
            ActivityType::AudioMatch => ("ஒலிகளைப் பொருத்து", "Match sounds", "ශබ්ද ගළපන්න"),
            ActivityType::SentenceBuilder => {
                ("வாக்கியம் அமை", "Sentence builder", "වාක්‍ය ගොඩනඟන්න")
            }
            ActivityType::WordBuilder => ("சொல் அமை", "Word builder", "වචන ගොඩනඟන්න"),
            ActivityType::FillInTheBlank => (
                "கோடிட்ட இடத்தை நிரப்பு",
                "Fill in the blank",
                "හිස්තැන් පුරවන්න",
            ),
            ActivityType::FindTheItems => {
                ("பொருட்களைக் கண்டுபிடி", "Find the items", "අයිතම සොයන්න")
            }
            ActivityType::OddOneOut => (
                "பொருந்தாததைக் கண்டுபிடி",
                "Odd one out",
                "නොගැළපෙන එක සොයන්න",
            ),
            ActivityType::WordSearch => ("சொல் தேடல்", "Word search", "වචන සෙවීම"),
            ActivityType::PictureSequencing => (
                "படங்களை வரிசைப்படுத்து",
                "Picture sequencing",
                "පින්තූර පිළිවෙළට තබන්න",
            ),
            ActivityType::StorySequencing => (
                "கதையை வரிசைப்படுத்து",
                "Story sequencing",
                "කතාව පිළිවෙළට තබන්න",
            ),
            ActivityType::MemoryGame => {
                ("நினைவாற்றல் விளையாட்டு", "Memory game", "මතක ක්‍රීඩාව")
            }
            ActivityType::LetterTracing => ("எழுத்து வரைதல்", "Letter tracing", "අකුරු ලිවීම"),
            ActivityType::NumberTracing => ("எண் வரைதல்", "Number tracing", "ඉලක්කම් ලිවීම"),
            ActivityType::SongPlayer => ("பாடல்", "Song player", "ගීතය"),
            ActivityType::StoryReader => ("கதை வாசிப்பு", "Story reader", "කතා කියවීම"),
        }
    }

    pub fn shape(self) -> ContentShape {
        match self {
            ActivityType::Flashcard
            | ActivityType::PictureFlashcard
            | ActivityType::ListenAndRepeat => ContentShape::Flashcards,
            ActivityType::TextMcq
            | ActivityType::PictureMcq
            | ActivityType::ListenAndChoose
            | ActivityType::LetterSound => ContentShape::Mcq,
            ActivityType::TrueFalse => ContentShape::TrueFalse,
            ActivityType::ImageMatch | ActivityType::WordImageMatch | ActivityType::AudioMatch => {
                ContentShape::Matching
            }
            ActivityType::SentenceBuilder | ActivityType::WordBuilder => {
                ContentShape::SentenceBuilder
            }
            ActivityType::FillInTheBlank => ContentShape::FillBlank,
            ActivityType::FindTheItems | ActivityType::OddOneOut | ActivityType::WordSearch => {
                ContentShape::FindItems
            }
            ActivityType::PictureSequencing | ActivityType::StorySequencing => {
                ContentShape::Sequencing
            }
            ActivityType::MemoryGame => ContentShape::MemoryPairs,
            ActivityType::LetterTracing | ActivityType::NumberTracing => {
                ContentShape::LetterTracing
            }
            ActivityType::SongPlayer | ActivityType::StoryReader => ContentShape::AudioSync,
        }
    }

    pub fn entry(self) -> RegistryEntry {
        RegistryEntry {
            id: self.id(),
            code: self.code(),
            name: self.display_name(),
            shape: self.shape(),
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.id())
    }
}

/// Public description of one registry entry.
#[derive(Debug, Clone, Serialize)]
pub struct RegistryEntry {
    pub id: i32,
    pub code: &'static str,
    pub name: MultilingualText,
    pub shape: ContentShape,
}

impl DisplayName for RegistryEntry {
    fn display_name(&self) -> MultilingualText {
        self.name.clone()
    }
}

/// All registry entries ordered by id.
pub fn registry_entries() -> Vec<RegistryEntry> {
    let mut entries: Vec<RegistryEntry> = ActivityType::ALL.iter().map(|t| t.entry()).collect();
    entries.sort_by_key(|e| e.id);
    entries
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::language::Language;

    #[test]
    fn ids_are_unique_and_round_trip() {
        let mut seen = HashSet::new();
        for t in ActivityType::ALL {
            assert!(seen.insert(t.id()), "duplicate id {}", t.id());
            assert_eq!(ActivityType::from_id(t.id()), Some(t));
        }
    }

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<_> = ActivityType::ALL.iter().map(|t| t.code()).collect();
        assert_eq!(codes.len(), ActivityType::ALL.len());
    }

    #[test]
    fn unknown_ids_are_not_found() {
        assert_eq!(ActivityType::from_id(0), None);
        assert_eq!(ActivityType::from_id(-3), None);
        assert_eq!(ActivityType::from_id(999), None);
    }

    #[test]
    fn every_shape_has_at_least_one_type() {
        let shapes: HashSet<_> = ActivityType::ALL.iter().map(|t| t.shape()).collect();
        assert_eq!(shapes.len(), 11);
    }

    #[test]
    fn every_type_is_named_in_every_language() {
        for t in ActivityType::ALL {
            let name = t.display_name();
            for lang in Language::ALL {
                let text = name.get(lang).unwrap_or_default();
                assert!(!text.trim().is_empty(), "{t} has no {lang} name");
            }
        }
    }

    #[test]
    fn entry_name_resolves_per_language() {
        let entry = ActivityType::TrueFalse.entry();
        assert_eq!(entry.display_name().display(Language::En), "True or false");
        assert_eq!(entry.display_name().display(Language::Ta), "சரியா தவறா");
        assert_eq!(entry.display_name().display(Language::Si), "හරි ද වැරදි ද");
    }

    #[test]
    fn entries_are_sorted_by_id() {
        let entries = registry_entries();
        assert_eq!(entries.first().map(|e| e.id), Some(1));
        assert!(entries.windows(2).all(|w| w[0].id < w[1].id));
    }
}

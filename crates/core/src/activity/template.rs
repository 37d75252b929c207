//! Default content used to seed a new activity of a given type.
//!
//! Each template is the smallest document that passes validation, so the
//! admin editor always starts from something the renderer can mount.

use super::content::{
    ActivityContent, AudioSyncContent, Blank, CardFace, Choice, ContentHeader, ContentText,
    FillBlankContent, FindItemsContent, Flashcard, FlashcardContent, GridItem, ItemId,
    LetterTracingContent, MatchImage, MatchTarget, MatchingContent, McqContent, MemoryPair,
    MemoryPairsContent, Point, SentenceBuilderContent, SentencePart, SequenceItem,
    SequencingContent, Statement, SyncSegment, TraceLetter, TrueFalseContent, WordChip,
};
use super::registry::{ActivityType, ContentShape};
use crate::language::{Language, MultilingualText};

/// Build the default content for `activity_type`.
pub fn default_template(activity_type: ActivityType) -> ActivityContent {
    let header = ContentHeader {
        title: Some(ContentText::Localized(activity_type.display_name())),
        instruction: Some(ContentText::Localized(instruction_for(activity_type.shape()))),
        instruction_audio_url: None,
    };

    match activity_type.shape() {
        ContentShape::Flashcards => ActivityContent::Flashcards(FlashcardContent {
            header,
            cards: vec![Flashcard {
                id: ItemId::Number(1),
                front: "அ".into(),
                back: "a".into(),
                image_url: None,
                audio_url: None,
            }],
        }),
        ContentShape::Mcq => ActivityContent::Mcq(McqContent {
            header,
            question: ContentText::Localized(MultilingualText::en("Which one is correct?")),
            question_image_url: None,
            question_audio_url: None,
            choices: vec![
                Choice {
                    id: ItemId::Number(1),
                    text: "A".into(),
                    image_url: None,
                    audio_url: None,
                    is_correct: true,
                },
                Choice {
                    id: ItemId::Number(2),
                    text: "B".into(),
                    image_url: None,
                    audio_url: None,
                    is_correct: false,
                },
            ],
        }),
        ContentShape::TrueFalse => ActivityContent::TrueFalse(TrueFalseContent {
            header,
            statements: vec![Statement {
                id: ItemId::Number(1),
                text: "The sun rises in the east.".into(),
                is_true: true,
                audio_url: None,
            }],
        }),
        ContentShape::Matching => ActivityContent::Matching(MatchingContent {
            header,
            images: vec![
                MatchImage {
                    id: ItemId::from("img-1"),
                    match_id: ItemId::from("target-1"),
                    image_url: None,
                    label: Some("cat".into()),
                },
                MatchImage {
                    id: ItemId::from("img-2"),
                    match_id: ItemId::from("target-2"),
                    image_url: None,
                    label: Some("dog".into()),
                },
            ],
            targets: vec![
                MatchTarget {
                    id: ItemId::from("target-1"),
                    label: "பூனை".into(),
                    image_url: None,
                    audio_url: None,
                },
                MatchTarget {
                    id: ItemId::from("target-2"),
                    label: "நாய்".into(),
                    image_url: None,
                    audio_url: None,
                },
            ],
        }),
        ContentShape::SentenceBuilder => ActivityContent::SentenceBuilder(SentenceBuilderContent {
            header,
            parts: vec![
                SentencePart {
                    id: ItemId::Number(1),
                    text: "நான்".into(),
                    order: 1,
                },
                SentencePart {
                    id: ItemId::Number(2),
                    text: "பள்ளிக்கு".into(),
                    order: 2,
                },
                SentencePart {
                    id: ItemId::Number(3),
                    text: "போகிறேன்".into(),
                    order: 3,
                },
            ],
            distractors: vec![WordChip {
                id: ItemId::Number(4),
                text: "வீடு".into(),
            }],
            audio_url: None,
            translation: Some(ContentText::Localized(MultilingualText::en(
                "I am going to school",
            ))),
        }),
        ContentShape::FillBlank => ActivityContent::FillBlank(FillBlankContent {
            header,
            sentence: "The ___ is red.".into(),
            blanks: vec![Blank {
                id: ItemId::Number(1),
                answers: vec!["apple".into()],
            }],
            word_bank: vec!["apple".into(), "sky".into()],
        }),
        ContentShape::FindItems => ActivityContent::FindItems(FindItemsContent {
            header,
            items: vec![
                GridItem {
                    id: ItemId::Number(1),
                    label: Some("அ".into()),
                    image_url: None,
                    audio_url: None,
                },
                GridItem {
                    id: ItemId::Number(2),
                    label: Some("ஆ".into()),
                    image_url: None,
                    audio_url: None,
                },
                GridItem {
                    id: ItemId::Number(3),
                    label: Some("அ".into()),
                    image_url: None,
                    audio_url: None,
                },
            ],
            correct_item_ids: vec![ItemId::Number(1), ItemId::Number(3)],
        }),
        ContentShape::Sequencing => ActivityContent::Sequencing(SequencingContent {
            header,
            items: vec![
                SequenceItem {
                    id: ItemId::Number(1),
                    text: Some("Wake up".into()),
                    image_url: None,
                    position: 1,
                },
                SequenceItem {
                    id: ItemId::Number(2),
                    text: Some("Brush teeth".into()),
                    image_url: None,
                    position: 2,
                },
                SequenceItem {
                    id: ItemId::Number(3),
                    text: Some("Go to school".into()),
                    image_url: None,
                    position: 3,
                },
            ],
        }),
        ContentShape::MemoryPairs => ActivityContent::MemoryPairs(MemoryPairsContent {
            header,
            pairs: vec![
                MemoryPair {
                    id: ItemId::Number(1),
                    first: text_face("அ"),
                    second: text_face("a"),
                },
                MemoryPair {
                    id: ItemId::Number(2),
                    first: text_face("ஆ"),
                    second: text_face("aa"),
                },
            ],
        }),
        ContentShape::LetterTracing => ActivityContent::LetterTracing(LetterTracingContent {
            header,
            letters: vec![TraceLetter {
                id: ItemId::Number(1),
                letter: "ட".into(),
                strokes: vec![
                    vec![Point { x: 0.2, y: 0.2 }, Point { x: 0.2, y: 0.8 }],
                    vec![Point { x: 0.2, y: 0.8 }, Point { x: 0.8, y: 0.8 }],
                ],
                audio_url: None,
            }],
        }),
        ContentShape::AudioSync => ActivityContent::AudioSync(AudioSyncContent {
            header,
            audio_url: "/media/placeholder.mp3".into(),
            segments: vec![
                SyncSegment {
                    id: ItemId::Number(1),
                    start_ms: 0,
                    end_ms: 2_000,
                    text: "ஒன்று".into(),
                    image_url: None,
                },
                SyncSegment {
                    id: ItemId::Number(2),
                    start_ms: 2_000,
                    end_ms: 4_000,
                    text: "இரண்டு".into(),
                    image_url: None,
                },
            ],
        }),
    }
}

fn text_face(text: &str) -> CardFace {
    CardFace {
        text: Some(text.into()),
        image_url: None,
        audio_url: None,
    }
}

fn instruction_for(shape: ContentShape) -> MultilingualText {
    let en = match shape {
        ContentShape::Flashcards => "Tap the card to turn it over",
        ContentShape::Mcq => "Choose the correct answer",
        ContentShape::TrueFalse => "Is it true or false?",
        ContentShape::Matching => "Drag each picture to its match",
        ContentShape::SentenceBuilder => "Tap the words in the right order",
        ContentShape::FillBlank => "Fill in the missing word",
        ContentShape::FindItems => "Find all the matching items",
        ContentShape::Sequencing => "Put the pictures in order",
        ContentShape::MemoryPairs => "Find the matching pairs",
        ContentShape::LetterTracing => "Trace the letter",
        ContentShape::AudioSync => "Listen and read along",
    };
    MultilingualText::default().with(Language::En, en)
}

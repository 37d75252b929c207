use super::{
    AudioSyncSession, FillBlankSession, FindItemsSession, FlashcardSession, Interaction,
    LetterTracingSession, MatchingSession, McqSession, MemoryPairsSession, Score,
    SentenceBuilderSession, SequencingSession, TrueFalseSession,
};
use crate::activity::content::ActivityContent;
use crate::activity::registry::ContentShape;

/// A mounted session for any content shape.
#[derive(Debug, Clone)]
pub enum ActivitySession {
    Flashcards(FlashcardSession),
    Mcq(McqSession),
    TrueFalse(TrueFalseSession),
    Matching(MatchingSession),
    SentenceBuilder(SentenceBuilderSession),
    FillBlank(FillBlankSession),
    FindItems(FindItemsSession),
    Sequencing(SequencingSession),
    MemoryPairs(MemoryPairsSession),
    LetterTracing(LetterTracingSession),
    AudioSync(AudioSyncSession),
}

/// Call `$body` with the inner session bound to `$s`, whatever the variant.
macro_rules! dispatch {
    ($self:expr, $s:ident => $body:expr) => {
        match $self {
            ActivitySession::Flashcards($s) => $body,
            ActivitySession::Mcq($s) => $body,
            ActivitySession::TrueFalse($s) => $body,
            ActivitySession::Matching($s) => $body,
            ActivitySession::SentenceBuilder($s) => $body,
            ActivitySession::FillBlank($s) => $body,
            ActivitySession::FindItems($s) => $body,
            ActivitySession::Sequencing($s) => $body,
            ActivitySession::MemoryPairs($s) => $body,
            ActivitySession::LetterTracing($s) => $body,
            ActivitySession::AudioSync($s) => $body,
        }
    };
}

impl ActivitySession {
    /// Mount a session for `content`. Shuffled layouts use a random seed.
    pub fn from_content(content: ActivityContent) -> Self {
        Self::from_content_seeded(content, rand::random())
    }

    /// Mount a session with a fixed seed for shuffled layouts.
    pub fn from_content_seeded(content: ActivityContent, seed: u64) -> Self {
        match content {
            ActivityContent::Flashcards(c) => Self::Flashcards(FlashcardSession::new(c)),
            ActivityContent::Mcq(c) => Self::Mcq(McqSession::new(c)),
            ActivityContent::TrueFalse(c) => Self::TrueFalse(TrueFalseSession::new(c)),
            ActivityContent::Matching(c) => Self::Matching(MatchingSession::new(c)),
            ActivityContent::SentenceBuilder(c) => {
                Self::SentenceBuilder(SentenceBuilderSession::new(c))
            }
            ActivityContent::FillBlank(c) => Self::FillBlank(FillBlankSession::new(c)),
            ActivityContent::FindItems(c) => Self::FindItems(FindItemsSession::new(c)),
            ActivityContent::Sequencing(c) => {
                Self::Sequencing(SequencingSession::with_seed(c, seed))
            }
            ActivityContent::MemoryPairs(c) => {
                Self::MemoryPairs(MemoryPairsSession::with_seed(c, seed))
            }
            ActivityContent::LetterTracing(c) => {
                Self::LetterTracing(LetterTracingSession::new(c))
            }
            ActivityContent::AudioSync(c) => Self::AudioSync(AudioSyncSession::new(c)),
        }
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
}

impl Interaction for ActivitySession {
    type Content = ActivityContent;

    /// Content of another shape replaces the session with a new one.
    fn load(&mut self, content: ActivityContent) {
        match (self, content) {
            (Self::Flashcards(s), ActivityContent::Flashcards(c)) => s.load(c),
            (Self::Mcq(s), ActivityContent::Mcq(c)) => s.load(c),
            (Self::TrueFalse(s), ActivityContent::TrueFalse(c)) => s.load(c),
            (Self::Matching(s), ActivityContent::Matching(c)) => s.load(c),
            (Self::SentenceBuilder(s), ActivityContent::SentenceBuilder(c)) => s.load(c),
            (Self::FillBlank(s), ActivityContent::FillBlank(c)) => s.load(c),
            (Self::FindItems(s), ActivityContent::FindItems(c)) => s.load(c),
            (Self::Sequencing(s), ActivityContent::Sequencing(c)) => s.load(c),
            (Self::MemoryPairs(s), ActivityContent::MemoryPairs(c)) => s.load(c),
            (Self::LetterTracing(s), ActivityContent::LetterTracing(c)) => s.load(c),
            (Self::AudioSync(s), ActivityContent::AudioSync(c)) => s.load(c),
            (this, other) => *this = Self::from_content(other),
        }
    }

    fn reset(&mut self) {
        dispatch!(self, s => s.reset())
    }

    fn is_complete(&self) -> bool {
        dispatch!(self, s => s.is_complete())
    }

    fn score(&self) -> Score {
        dispatch!(self, s => s.score())
    }
}

use std::collections::HashSet;

use super::{play_or_warn, Interaction, MediaPlayer, Score};
use crate::activity::content::{Flashcard, FlashcardContent};

/// Flashcard deck session. A card counts as seen once its back side has
/// been shown.
#[derive(Debug, Clone)]
pub struct FlashcardSession {
    content: FlashcardContent,
    index: usize,
    showing_back: bool,
    seen_back: HashSet<usize>,
    last_playback_error: Option<String>,
}

impl FlashcardSession {
    pub fn new(content: FlashcardContent) -> Self {
        Self {
            content,
            index: 0,
            showing_back: false,
            seen_back: HashSet::new(),
            last_playback_error: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Flashcard> {
        self.content.cards.get(self.index)
    }

    pub fn is_showing_back(&self) -> bool {
        self.showing_back
    }

    pub fn last_playback_error(&self) -> Option<&str> {
        self.last_playback_error.as_deref()
    }

    /// Turn the current card over.
    pub fn flip(&mut self) {
        if self.current().is_none() {
            return;
        }
        self.showing_back = !self.showing_back;
        if self.showing_back {
            self.seen_back.insert(self.index);
        }
    }

    /// Advance to the next card, front side up. Returns `false` at the end.
    pub fn next(&mut self) -> bool {
        if self.index + 1 >= self.content.cards.len() {
            return false;
        }
        self.index += 1;
        self.showing_back = false;
        true
    }

    pub fn previous(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.showing_back = false;
        true
    }

    pub fn play_current_audio(&mut self, player: &mut dyn MediaPlayer) {
        if let Some(url) = self.current().and_then(|card| card.audio_url.clone()) {
            self.last_playback_error = play_or_warn(player, &url);
        }
    }
}

impl Interaction for FlashcardSession {
    type Content = FlashcardContent;

    fn load(&mut self, content: FlashcardContent) {
        *self = Self::new(content);
    }

    fn reset(&mut self) {
        self.index = 0;
        self.showing_back = false;
        self.seen_back.clear();
        self.last_playback_error = None;
    }

    fn is_complete(&self) -> bool {
        !self.content.cards.is_empty() && self.seen_back.len() == self.content.cards.len()
    }

    fn score(&self) -> Score {
        Score {
            correct: self.seen_back.len(),
            attempted: self.seen_back.len(),
            total: self.content.cards.len(),
        }
    }
}

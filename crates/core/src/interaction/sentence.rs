//! Sentence builder session: word chips must be tapped in order.

use serde::Serialize;

use super::{play_or_warn, Interaction, MediaPlayer, Score};
use crate::activity::content::{ItemId, SentenceBuilderContent, SentencePart};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChipResult {
    /// The chip was the next part of the sentence.
    Placed,
    /// Out-of-order part or distractor.
    Wrong,
    /// Unknown chip, or one that is already placed.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct SentenceBuilderSession {
    content: SentenceBuilderContent,
    /// Parts in the order they must be placed.
    expected: Vec<ItemId>,
    placed: Vec<ItemId>,
    mistakes: usize,
    last_playback_error: Option<String>,
}

impl SentenceBuilderSession {
    pub fn new(content: SentenceBuilderContent) -> Self {
        let mut ordered: Vec<&SentencePart> = content.parts.iter().collect();
        ordered.sort_by_key(|p| p.order);
        let expected = ordered.into_iter().map(|p| p.id.clone()).collect();
        Self {
            content,
            expected,
            placed: Vec::new(),
            mistakes: 0,
            last_playback_error: None,
        }
    }

    pub fn content(&self) -> &SentenceBuilderContent {
        &self.content
    }

    pub fn placed(&self) -> &[ItemId] {
        &self.placed
    }

    pub fn mistakes(&self) -> usize {
        self.mistakes
    }

    pub fn last_playback_error(&self) -> Option<&str> {
        self.last_playback_error.as_deref()
    }

    pub fn click(&mut self, chip_id: &ItemId) -> ChipResult {
        if self.placed.contains(chip_id) {
            return ChipResult::Ignored;
        }
        let is_part = self.content.parts.iter().any(|p| &p.id == chip_id);
        let is_distractor = self.content.distractors.iter().any(|d| &d.id == chip_id);
        if !is_part && !is_distractor {
            return ChipResult::Ignored;
        }
        if self.expected.get(self.placed.len()) == Some(chip_id) {
            self.placed.push(chip_id.clone());
            ChipResult::Placed
        } else {
            self.mistakes += 1;
            ChipResult::Wrong
        }
    }

    /// The sentence built so far, parts joined by single spaces.
    pub fn sentence(&self) -> String {
        self.placed
            .iter()
            .filter_map(|id| self.content.parts.iter().find(|p| &p.id == id))
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn play_sentence_audio(&mut self, player: &mut dyn MediaPlayer) {
        if let Some(url) = self.content.audio_url.clone() {
            self.last_playback_error = play_or_warn(player, &url);
        }
    }
}

impl Interaction for SentenceBuilderSession {
    type Content = SentenceBuilderContent;

    fn load(&mut self, content: SentenceBuilderContent) {
        *self = Self::new(content);
    }

    fn reset(&mut self) {
        self.placed.clear();
        self.mistakes = 0;
        self.last_playback_error = None;
    }

    fn is_complete(&self) -> bool {
        !self.expected.is_empty() && self.placed.len() == self.expected.len()
    }

    fn score(&self) -> Score {
        Score {
            correct: self.placed.len(),
            attempted: self.placed.len() + self.mistakes,
            total: self.expected.len(),
        }
    }
}

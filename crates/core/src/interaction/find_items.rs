//! Find-the-items grid session.
//!
//! The learner taps grid cells looking for every id in `correctItemIds`.
//! A tap may play the item's sound; a playback failure never loses the tap.

use serde::Serialize;

use super::{play_or_warn, Interaction, MediaPlayer, Score};
use crate::activity::content::{FindItemsContent, GridItem, ItemId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TapResult {
    Found,
    AlreadyFound,
    Wrong,
    Unknown,
}

/// Find-the-items session: tap every correct item in a grid.
#[derive(Debug, Clone)]
pub struct FindItemsSession {
    content: FindItemsContent,
    found: Vec<ItemId>,
    wrong_taps: usize,
    last_playback_error: Option<String>,
}

impl FindItemsSession {
    pub fn new(content: FindItemsContent) -> Self {
        Self {
            content,
            found: Vec::new(),
            wrong_taps: 0,
            last_playback_error: None,
        }
    }

    pub fn items(&self) -> &[GridItem] {
        &self.content.items
    }

    pub fn found(&self) -> &[ItemId] {
        &self.found
    }

    pub fn wrong_taps(&self) -> usize {
        self.wrong_taps
    }

    pub fn last_playback_error(&self) -> Option<&str> {
        self.last_playback_error.as_deref()
    }

    pub fn tap(&mut self, item_id: &ItemId) -> TapResult {
        if !self.content.items.iter().any(|i| &i.id == item_id) {
            return TapResult::Unknown;
        }
        if self.found.contains(item_id) {
            return TapResult::AlreadyFound;
        }
        if self.content.correct_item_ids.contains(item_id) {
            self.found.push(item_id.clone());
            TapResult::Found
        } else {
            self.wrong_taps += 1;
            TapResult::Wrong
        }
    }

    /// Tap an item and play its sound, if it has one.
    pub fn tap_with_audio(&mut self, player: &mut dyn MediaPlayer, item_id: &ItemId) -> TapResult {
        let url = self
            .content
            .items
            .iter()
            .find(|i| &i.id == item_id)
            .and_then(|i| i.audio_url.clone());
        if let Some(url) = url {
            self.last_playback_error = play_or_warn(player, &url);
        }
        self.tap(item_id)
    }
}

impl Interaction for FindItemsSession {
    type Content = FindItemsContent;

    fn load(&mut self, content: FindItemsContent) {
        *self = Self::new(content);
    }

    fn reset(&mut self) {
        self.found.clear();
        self.wrong_taps = 0;
        self.last_playback_error = None;
    }

    fn is_complete(&self) -> bool {
        !self.content.correct_item_ids.is_empty()
            && self.found.len() == self.content.correct_item_ids.len()
    }

    fn score(&self) -> Score {
        Score {
            correct: self.found.len(),
            attempted: self.found.len() + self.wrong_taps,
            total: self.content.correct_item_ids.len(),
        }
    }
}

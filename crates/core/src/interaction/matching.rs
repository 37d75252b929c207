//! Drag-and-drop matching session.
//!
//! The learner picks up an image with [`MatchingSession::start_drag`] and
//! drops it on a target with [`MatchingSession::drop_on`]. A drop succeeds
//! when the image's `matchId` names the target.

use std::collections::HashSet;

use serde::Serialize;

use super::{play_or_warn, Interaction, MediaPlayer, Score};
use crate::activity::content::{ItemId, MatchImage, MatchTarget, MatchingContent};

/// Outcome of dropping the dragged image on a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropResult {
    Matched,
    Rejected,
    /// Nothing was being dragged.
    NoDragSource,
    /// The dragged image had already been matched.
    AlreadyMatched,
}

#[derive(Debug, Clone)]
pub struct MatchingSession {
    content: MatchingContent,
    dragging: Option<ItemId>,
    matched: HashSet<ItemId>,
    mistakes: usize,
    last_playback_error: Option<String>,
}

impl MatchingSession {
    pub fn new(content: MatchingContent) -> Self {
        Self {
            content,
            dragging: None,
            matched: HashSet::new(),
            mistakes: 0,
            last_playback_error: None,
        }
    }

    pub fn images(&self) -> &[MatchImage] {
        &self.content.images
    }

    pub fn targets(&self) -> &[MatchTarget] {
        &self.content.targets
    }

    pub fn dragging(&self) -> Option<&ItemId> {
        self.dragging.as_ref()
    }

    pub fn is_matched(&self, image_id: &ItemId) -> bool {
        self.matched.contains(image_id)
    }

    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    pub fn mistakes(&self) -> usize {
        self.mistakes
    }

    pub fn last_playback_error(&self) -> Option<&str> {
        self.last_playback_error.as_deref()
    }

    /// Pick up an image. Returns `false` for unknown images.
    pub fn start_drag(&mut self, image_id: &ItemId) -> bool {
        if self.find_image(image_id).is_none() {
            return false;
        }
        self.dragging = Some(image_id.clone());
        true
    }

    pub fn cancel_drag(&mut self) {
        self.dragging = None;
    }

    /// Drop the dragged image on `target_id`. The drag ends either way.
    pub fn drop_on(&mut self, target_id: &ItemId) -> DropResult {
        let Some(image_id) = self.dragging.take() else {
            return DropResult::NoDragSource;
        };
        if self.matched.contains(&image_id) {
            return DropResult::AlreadyMatched;
        }
        let is_match = self
            .find_image(&image_id)
            .is_some_and(|image| &image.match_id == target_id);
        if is_match {
            self.matched.insert(image_id);
            DropResult::Matched
        } else {
            self.mistakes += 1;
            DropResult::Rejected
        }
    }

    pub fn play_target_audio(&mut self, player: &mut dyn MediaPlayer, target_id: &ItemId) {
        let url = self
            .content
            .targets
            .iter()
            .find(|t| &t.id == target_id)
            .and_then(|t| t.audio_url.clone());
        if let Some(url) = url {
            self.last_playback_error = play_or_warn(player, &url);
        }
    }

    fn find_image(&self, image_id: &ItemId) -> Option<&MatchImage> {
        self.content.images.iter().find(|i| &i.id == image_id)
    }
}

impl Interaction for MatchingSession {
    type Content = MatchingContent;

    fn load(&mut self, content: MatchingContent) {
        *self = Self::new(content);
    }

    fn reset(&mut self) {
        self.dragging = None;
        self.matched.clear();
        self.mistakes = 0;
        self.last_playback_error = None;
    }

    fn is_complete(&self) -> bool {
        !self.content.images.is_empty() && self.matched.len() == self.content.images.len()
    }

    fn score(&self) -> Score {
        Score {
            correct: self.matched.len(),
            attempted: self.matched.len() + self.mistakes,
            total: self.content.images.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::testing::RecordingPlayer;

    fn content(pairs: usize) -> MatchingContent {
        let images = (1..=pairs)
            .map(|n| MatchImage {
                id: ItemId::Text(format!("img-{n}")),
                match_id: ItemId::Text(format!("t-{n}")),
                image_url: None,
                label: None,
            })
            .collect();
        let targets = (1..=pairs)
            .map(|n| MatchTarget {
                id: ItemId::Text(format!("t-{n}")),
                label: "target".into(),
                image_url: None,
                audio_url: Some(format!("/media/t-{n}.mp3")),
            })
            .collect();
        MatchingContent {
            images,
            targets,
            ..MatchingContent::default()
        }
    }

    fn drag_and_drop(s: &mut MatchingSession, image: &str, target: &str) -> DropResult {
        assert!(s.start_drag(&ItemId::from(image)));
        s.drop_on(&ItemId::from(target))
    }

    #[test]
    fn test_three_pairs_complete_after_three_matches() {
        let mut s = MatchingSession::new(content(3));
        assert_eq!(drag_and_drop(&mut s, "img-1", "t-1"), DropResult::Matched);
        assert_eq!(drag_and_drop(&mut s, "img-2", "t-2"), DropResult::Matched);
        assert!(!s.is_complete());
        assert_eq!(drag_and_drop(&mut s, "img-3", "t-3"), DropResult::Matched);
        assert!(s.is_complete());
    }

    #[test]
    fn test_wrong_drop_counts_a_mistake() {
        let mut s = MatchingSession::new(content(2));
        assert_eq!(drag_and_drop(&mut s, "img-1", "t-2"), DropResult::Rejected);
        assert_eq!(s.mistakes(), 1);
        assert!(!s.is_matched(&ItemId::from("img-1")));
        assert_eq!(s.dragging(), None);
    }

    #[test]
    fn test_drop_without_drag() {
        let mut s = MatchingSession::new(content(1));
        assert_eq!(s.drop_on(&ItemId::from("t-1")), DropResult::NoDragSource);
    }

    #[test]
    fn test_matched_image_cannot_match_twice() {
        let mut s = MatchingSession::new(content(2));
        drag_and_drop(&mut s, "img-1", "t-1");
        assert_eq!(
            drag_and_drop(&mut s, "img-1", "t-1"),
            DropResult::AlreadyMatched
        );
        assert_eq!(s.matched_count(), 1);
    }

    #[test]
    fn test_unknown_image_cannot_be_dragged() {
        let mut s = MatchingSession::new(content(1));
        assert!(!s.start_drag(&ItemId::from("nope")));
        assert_eq!(s.dragging(), None);
    }

    #[test]
    fn test_load_resets_progress() {
        let mut s = MatchingSession::new(content(2));
        drag_and_drop(&mut s, "img-1", "t-1");
        drag_and_drop(&mut s, "img-2", "t-1");
        s.load(content(3));
        assert_eq!(s.matched_count(), 0);
        assert_eq!(s.mistakes(), 0);
        assert_eq!(s.images().len(), 3);
    }

    #[test]
    fn test_plays_target_audio() {
        let mut s = MatchingSession::new(content(2));
        let mut player = RecordingPlayer::default();
        s.play_target_audio(&mut player, &ItemId::from("t-2"));
        assert_eq!(player.played, vec!["/media/t-2.mp3"]);
    }
}

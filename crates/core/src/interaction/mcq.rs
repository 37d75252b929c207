//! Multiple-choice session.

use super::{play_or_warn, Interaction, MediaPlayer, Score};
use crate::activity::content::{Choice, ItemId, McqContent};

#[derive(Debug, Clone)]
pub struct McqSession {
    content: McqContent,
    selected_choice_id: Option<ItemId>,
    is_answered: bool,
    attempts: usize,
    last_playback_error: Option<String>,
}

impl McqSession {
    pub fn new(content: McqContent) -> Self {
        Self {
            content,
            selected_choice_id: None,
            is_answered: false,
            attempts: 0,
            last_playback_error: None,
        }
    }

    pub fn content(&self) -> &McqContent {
        &self.content
    }

    pub fn choices(&self) -> &[Choice] {
        &self.content.choices
    }

    pub fn is_answered(&self) -> bool {
        self.is_answered
    }

    pub fn selected_choice_id(&self) -> Option<&ItemId> {
        self.selected_choice_id.as_ref()
    }

    pub fn last_playback_error(&self) -> Option<&str> {
        self.last_playback_error.as_deref()
    }

    /// Select a choice and report whether it is correct.
    ///
    /// Returns `None` without changing state when the question is already
    /// answered or the id names no choice.
    pub fn select(&mut self, choice_id: &ItemId) -> Option<bool> {
        if self.is_answered {
            return None;
        }
        let correct = self.find_choice(choice_id)?.is_correct;
        self.is_answered = true;
        self.selected_choice_id = Some(choice_id.clone());
        self.attempts += 1;
        Some(correct)
    }

    /// Clear the current answer so the learner can pick again.
    pub fn try_again(&mut self) {
        self.is_answered = false;
        self.selected_choice_id = None;
    }

    /// `true` when the selected choice is a correct one.
    pub fn is_correct(&self) -> bool {
        self.selected_choice_id
            .as_ref()
            .and_then(|id| self.find_choice(id))
            .is_some_and(|choice| choice.is_correct)
    }

    pub fn play_question_audio(&mut self, player: &mut dyn MediaPlayer) {
        if let Some(url) = self.content.question_audio_url.clone() {
            self.last_playback_error = play_or_warn(player, &url);
        }
    }

    pub fn play_choice_audio(&mut self, player: &mut dyn MediaPlayer, choice_id: &ItemId) {
        let url = self
            .find_choice(choice_id)
            .and_then(|choice| choice.audio_url.clone());
        if let Some(url) = url {
            self.last_playback_error = play_or_warn(player, &url);
        }
    }

    fn find_choice(&self, id: &ItemId) -> Option<&Choice> {
        self.content.choices.iter().find(|choice| &choice.id == id)
    }
}

impl Interaction for McqSession {
    type Content = McqContent;

    fn load(&mut self, content: McqContent) {
        *self = Self::new(content);
    }

    fn reset(&mut self) {
        let content = std::mem::take(&mut self.content);
        *self = Self::new(content);
    }

    fn is_complete(&self) -> bool {
        self.is_correct()
    }

    fn score(&self) -> Score {
        Score {
            correct: usize::from(self.is_correct()),
            attempted: self.attempts,
            total: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::testing::RecordingPlayer;

    fn choice(id: i64, correct: bool) -> Choice {
        Choice {
            id: ItemId::Number(id),
            text: format!("choice {id}").as_str().into(),
            image_url: None,
            audio_url: Some(format!("/media/choice-{id}.mp3")),
            is_correct: correct,
        }
    }

    fn session() -> McqSession {
        McqSession::new(McqContent {
            choices: vec![choice(1, false), choice(2, true), choice(3, false)],
            question_audio_url: Some("/media/question.mp3".into()),
            ..McqContent::default()
        })
    }

    #[test]
    fn test_select_marks_answered() {
        let mut s = session();
        assert_eq!(s.select(&ItemId::Number(2)), Some(true));
        assert!(s.is_answered());
        assert_eq!(s.selected_choice_id(), Some(&ItemId::Number(2)));
        assert!(s.is_complete());
    }

    #[test]
    fn test_try_again_clears_selection() {
        let mut s = session();
        s.select(&ItemId::Number(2));
        s.try_again();
        assert!(!s.is_answered());
        assert_eq!(s.selected_choice_id(), None);
        assert!(!s.is_complete());
    }

    #[test]
    fn test_wrong_choice_is_not_complete() {
        let mut s = session();
        assert_eq!(s.select(&ItemId::Number(1)), Some(false));
        assert!(s.is_answered());
        assert!(!s.is_complete());
    }

    #[test]
    fn test_selection_is_locked_until_try_again() {
        let mut s = session();
        s.select(&ItemId::Number(1));
        assert_eq!(s.select(&ItemId::Number(2)), None);
        assert_eq!(s.selected_choice_id(), Some(&ItemId::Number(1)));

        s.try_again();
        assert_eq!(s.select(&ItemId::Number(2)), Some(true));
        assert_eq!(
            s.score(),
            Score {
                correct: 1,
                attempted: 2,
                total: 1
            }
        );
    }

    #[test]
    fn test_unknown_choice_is_ignored() {
        let mut s = session();
        assert_eq!(s.select(&ItemId::Number(9)), None);
        assert!(!s.is_answered());
    }

    #[test]
    fn test_load_discards_progress() {
        let mut s = session();
        s.select(&ItemId::Number(2));
        s.load(McqContent {
            choices: vec![choice(7, true), choice(8, false)],
            ..McqContent::default()
        });
        assert!(!s.is_answered());
        assert_eq!(s.selected_choice_id(), None);
        assert_eq!(s.choices().len(), 2);
    }

    #[test]
    fn test_reset_keeps_content() {
        let mut s = session();
        s.select(&ItemId::Number(2));
        s.reset();
        assert!(!s.is_answered());
        assert_eq!(s.choices().len(), 3);
        assert_eq!(s.score().attempted, 0);
    }

    #[test]
    fn test_plays_question_and_choice_audio() {
        let mut s = session();
        let mut player = RecordingPlayer::default();
        s.play_question_audio(&mut player);
        s.play_choice_audio(&mut player, &ItemId::Number(3));
        assert_eq!(
            player.played,
            vec!["/media/question.mp3", "/media/choice-3.mp3"]
        );
        assert_eq!(s.last_playback_error(), None);
    }

    #[test]
    fn test_playback_failure_is_swallowed() {
        let mut s = session();
        let mut player = RecordingPlayer::failing();
        s.play_question_audio(&mut player);
        assert!(s.last_playback_error().unwrap().contains("question.mp3"));
        // The session still works after a playback failure.
        assert_eq!(s.select(&ItemId::Number(2)), Some(true));
    }
}

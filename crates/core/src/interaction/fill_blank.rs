//! Fill-in-the-blank session.
//!
//! One answer slot per [`Blank`]; nothing is graded until the learner asks
//! for a check.

use std::collections::HashMap;

use super::{Interaction, Score};
use crate::activity::content::{Blank, FillBlankContent, ItemId};

/// Answers are typed (or picked from the word bank) per blank, then graded
/// together by [`FillBlankSession::check`]. Comparison ignores surrounding
/// whitespace and letter case.
#[derive(Debug, Clone)]
pub struct FillBlankSession {
    content: FillBlankContent,
    answers: HashMap<ItemId, String>,
    results: HashMap<ItemId, bool>,
    submitted: bool,
    checks: usize,
}

fn normalize(answer: &str) -> String {
    answer.trim().to_lowercase()
}

impl FillBlankSession {
    pub fn new(content: FillBlankContent) -> Self {
        Self {
            content,
            answers: HashMap::new(),
            results: HashMap::new(),
            submitted: false,
            checks: 0,
        }
    }

    pub fn content(&self) -> &FillBlankContent {
        &self.content
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn answer_for(&self, blank_id: &ItemId) -> Option<&str> {
        self.answers.get(blank_id).map(String::as_str)
    }

    /// Grade of one blank after [`check`](Self::check).
    pub fn result_for(&self, blank_id: &ItemId) -> Option<bool> {
        self.results.get(blank_id).copied()
    }

    /// Set the answer for a blank. Editing after a check withdraws the
    /// submission. Returns `false` for unknown blanks.
    pub fn fill(&mut self, blank_id: &ItemId, answer: impl Into<String>) -> bool {
        if !self.content.blanks.iter().any(|b| &b.id == blank_id) {
            return false;
        }
        self.answers.insert(blank_id.clone(), answer.into());
        self.submitted = false;
        self.results.clear();
        true
    }

    /// Grade every blank. Returns `true` when all are correct.
    pub fn check(&mut self) -> bool {
        self.results = self
            .content
            .blanks
            .iter()
            .map(|blank| (blank.id.clone(), self.is_blank_correct(blank)))
            .collect();
        self.submitted = true;
        self.checks += 1;
        self.all_correct()
    }

    fn is_blank_correct(&self, blank: &Blank) -> bool {
        let Some(given) = self.answers.get(&blank.id) else {
            return false;
        };
        let given = normalize(given);
        blank.answers.iter().any(|accepted| normalize(accepted) == given)
    }

    fn all_correct(&self) -> bool {
        !self.content.blanks.is_empty()
            && self
                .content
                .blanks
                .iter()
                .all(|b| self.results.get(&b.id) == Some(&true))
    }
}

impl Interaction for FillBlankSession {
    type Content = FillBlankContent;

    fn load(&mut self, content: FillBlankContent) {
        *self = Self::new(content);
    }

    fn reset(&mut self) {
        self.answers.clear();
        self.results.clear();
        self.submitted = false;
        self.checks = 0;
    }

    fn is_complete(&self) -> bool {
        self.submitted && self.all_correct()
    }

    fn score(&self) -> Score {
        Score {
            correct: self.results.values().filter(|ok| **ok).count(),
            attempted: self.checks,
            total: self.content.blanks.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> FillBlankSession {
        FillBlankSession::new(FillBlankContent {
            sentence: "The ___ sat on the ___.".into(),
            blanks: vec![
                Blank {
                    id: ItemId::Number(1),
                    answers: vec!["Cat".into(), "kitten".into()],
                },
                Blank {
                    id: ItemId::Number(2),
                    answers: vec!["mat".into()],
                },
            ],
            ..FillBlankContent::default()
        })
    }

    #[test]
    fn test_answers_compare_trimmed_and_case_insensitive() {
        let mut s = session();
        s.fill(&ItemId::Number(1), "  cAT ");
        s.fill(&ItemId::Number(2), "MAT");
        assert!(s.check());
        assert!(s.is_complete());
    }

    #[test]
    fn test_any_accepted_answer_counts() {
        let mut s = session();
        s.fill(&ItemId::Number(1), "Kitten");
        s.fill(&ItemId::Number(2), "mat");
        assert!(s.check());
    }

    #[test]
    fn test_tamil_answers_compare_exactly() {
        let mut s = FillBlankSession::new(FillBlankContent {
            sentence: "நான் ___ போகிறேன்".into(),
            blanks: vec![Blank {
                id: ItemId::Number(1),
                answers: vec!["பள்ளிக்கு".into()],
            }],
            ..FillBlankContent::default()
        });
        s.fill(&ItemId::Number(1), " பள்ளிக்கு");
        assert!(s.check());
    }

    #[test]
    fn test_not_complete_before_check() {
        let mut s = session();
        s.fill(&ItemId::Number(1), "cat");
        s.fill(&ItemId::Number(2), "mat");
        assert!(!s.is_complete());
    }

    #[test]
    fn test_partial_answers_grade_per_blank() {
        let mut s = session();
        s.fill(&ItemId::Number(1), "dog");
        s.fill(&ItemId::Number(2), "mat");
        assert!(!s.check());
        assert_eq!(s.result_for(&ItemId::Number(1)), Some(false));
        assert_eq!(s.result_for(&ItemId::Number(2)), Some(true));
        assert_eq!(s.score().correct, 1);
    }

    #[test]
    fn test_editing_withdraws_submission() {
        let mut s = session();
        s.fill(&ItemId::Number(1), "cat");
        s.fill(&ItemId::Number(2), "mat");
        s.check();
        s.fill(&ItemId::Number(2), "rug");
        assert!(!s.is_submitted());
        assert!(!s.is_complete());
    }

    #[test]
    fn test_unknown_blank_is_rejected() {
        let mut s = session();
        assert!(!s.fill(&ItemId::Number(5), "x"));
    }
}

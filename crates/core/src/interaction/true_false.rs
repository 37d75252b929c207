use std::collections::HashMap;

use super::{Interaction, Score};
use crate::activity::content::{ItemId, Statement, TrueFalseContent};

/// True/false session. Answers may be changed until every statement is
/// answered correctly.
#[derive(Debug, Clone)]
pub struct TrueFalseSession {
    content: TrueFalseContent,
    answers: HashMap<ItemId, bool>,
    attempts: usize,
}

impl TrueFalseSession {
    pub fn new(content: TrueFalseContent) -> Self {
        Self {
            content,
            answers: HashMap::new(),
            attempts: 0,
        }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.content.statements
    }

    /// Record an answer and report whether it is correct. Unknown ids are
    /// ignored and yield `None`.
    pub fn answer(&mut self, statement_id: &ItemId, value: bool) -> Option<bool> {
        let statement = self
            .content
            .statements
            .iter()
            .find(|s| &s.id == statement_id)?;
        let correct = statement.is_true == value;
        self.answers.insert(statement_id.clone(), value);
        self.attempts += 1;
        Some(correct)
    }

    pub fn answer_for(&self, statement_id: &ItemId) -> Option<bool> {
        self.answers.get(statement_id).copied()
    }

    fn correct_count(&self) -> usize {
        self.content
            .statements
            .iter()
            .filter(|s| self.answers.get(&s.id) == Some(&s.is_true))
            .count()
    }
}

impl Interaction for TrueFalseSession {
    type Content = TrueFalseContent;

    fn load(&mut self, content: TrueFalseContent) {
        *self = Self::new(content);
    }

    fn reset(&mut self) {
        self.answers.clear();
        self.attempts = 0;
    }

    fn is_complete(&self) -> bool {
        !self.content.statements.is_empty() && self.correct_count() == self.content.statements.len()
    }

    fn score(&self) -> Score {
        Score {
            correct: self.correct_count(),
            attempted: self.attempts,
            total: self.content.statements.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> TrueFalseSession {
        let statement = |id: i64, is_true: bool| Statement {
            id: ItemId::Number(id),
            text: "statement".into(),
            is_true,
            audio_url: None,
        };
        TrueFalseSession::new(TrueFalseContent {
            statements: vec![statement(1, true), statement(2, false)],
            ..TrueFalseContent::default()
        })
    }

    #[test]
    fn test_complete_when_all_correct() {
        let mut s = session();
        assert_eq!(s.answer(&ItemId::Number(1), true), Some(true));
        assert!(!s.is_complete());
        assert_eq!(s.answer(&ItemId::Number(2), false), Some(true));
        assert!(s.is_complete());
    }

    #[test]
    fn test_wrong_answer_can_be_changed() {
        let mut s = session();
        s.answer(&ItemId::Number(1), true);
        assert_eq!(s.answer(&ItemId::Number(2), true), Some(false));
        assert!(!s.is_complete());
        s.answer(&ItemId::Number(2), false);
        assert!(s.is_complete());
        assert_eq!(s.score().attempted, 3);
    }

    #[test]
    fn test_unknown_statement_is_ignored() {
        let mut s = session();
        assert_eq!(s.answer(&ItemId::from("x"), true), None);
        assert_eq!(s.score().attempted, 0);
    }

    #[test]
    fn test_reset_clears_answers() {
        let mut s = session();
        s.answer(&ItemId::Number(1), true);
        s.reset();
        assert_eq!(s.answer_for(&ItemId::Number(1)), None);
        assert_eq!(s.statements().len(), 2);
    }
}

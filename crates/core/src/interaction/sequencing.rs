//! Sequencing session: put items into their correct positions.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{Interaction, Score};
use crate::activity::content::{ItemId, SequenceItem, SequencingContent};

#[derive(Debug, Clone)]
pub struct SequencingSession {
    content: SequencingContent,
    seed: u64,
    /// Current arrangement, as item ids.
    order: Vec<ItemId>,
    submitted: bool,
    checks: usize,
}

impl SequencingSession {
    /// Start with a random arrangement.
    pub fn new(content: SequencingContent) -> Self {
        Self::with_seed(content, rand::random())
    }

    /// Start with the arrangement produced by `seed`. The same content and
    /// seed always give the same layout.
    pub fn with_seed(content: SequencingContent, seed: u64) -> Self {
        let order = scrambled_order(&content.items, seed);
        Self {
            content,
            seed,
            order,
            submitted: false,
            checks: 0,
        }
    }

    pub fn order(&self) -> &[ItemId] {
        &self.order
    }

    pub fn item(&self, id: &ItemId) -> Option<&SequenceItem> {
        self.content.items.iter().find(|i| &i.id == id)
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Move the item at index `from` to index `to`, shifting the rest.
    /// Out-of-range indices are ignored.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from >= self.order.len() || to >= self.order.len() {
            return false;
        }
        let id = self.order.remove(from);
        self.order.insert(to, id);
        self.submitted = false;
        true
    }

    /// Grade the current arrangement. Returns `true` when it is correct.
    pub fn check(&mut self) -> bool {
        self.submitted = true;
        self.checks += 1;
        self.is_in_order()
    }

    fn correct_positions(&self) -> usize {
        self.order
            .iter()
            .enumerate()
            .filter(|(index, id)| {
                self.item(id)
                    .is_some_and(|item| item.position as usize == index + 1)
            })
            .count()
    }

    fn is_in_order(&self) -> bool {
        !self.order.is_empty() && self.correct_positions() == self.order.len()
    }
}

/// Shuffle the items, making sure the result is not already solved when
/// that is possible.
fn scrambled_order(items: &[SequenceItem], seed: u64) -> Vec<ItemId> {
    let mut shuffled: Vec<&SequenceItem> = items.iter().collect();
    shuffled.shuffle(&mut StdRng::seed_from_u64(seed));
    let solved = shuffled
        .iter()
        .enumerate()
        .all(|(index, item)| item.position as usize == index + 1);
    if solved && shuffled.len() > 1 {
        shuffled.rotate_left(1);
    }
    shuffled.into_iter().map(|item| item.id.clone()).collect()
}

impl Interaction for SequencingSession {
    type Content = SequencingContent;

    fn load(&mut self, content: SequencingContent) {
        *self = Self::with_seed(content, self.seed);
    }

    fn reset(&mut self) {
        self.order = scrambled_order(&self.content.items, self.seed);
        self.submitted = false;
        self.checks = 0;
    }

    fn is_complete(&self) -> bool {
        self.submitted && self.is_in_order()
    }

    fn score(&self) -> Score {
        Score {
            correct: self.correct_positions(),
            attempted: self.checks,
            total: self.order.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(n: u32) -> SequencingContent {
        SequencingContent {
            items: (1..=n)
                .map(|position| SequenceItem {
                    id: ItemId::Number(i64::from(position)),
                    text: Some("step".into()),
                    image_url: None,
                    position,
                })
                .collect(),
            ..SequencingContent::default()
        }
    }

    /// Sort the session into the correct order using only `move_item`.
    fn solve(s: &mut SequencingSession) {
        for target in 0..s.order().len() {
            let wanted = ItemId::Number(target as i64 + 1);
            let from = s.order().iter().position(|id| *id == wanted).unwrap();
            s.move_item(from, target);
        }
    }

    #[test]
    fn test_layout_is_deterministic_per_seed() {
        let a = SequencingSession::with_seed(content(5), 42);
        let b = SequencingSession::with_seed(content(5), 42);
        assert_eq!(a.order(), b.order());
    }

    #[test]
    fn test_initial_layout_is_not_solved() {
        for seed in 0..20 {
            let mut s = SequencingSession::with_seed(content(3), seed);
            assert!(!s.check(), "seed {seed} produced a solved layout");
        }
    }

    #[test]
    fn test_complete_after_sorting_and_check() {
        let mut s = SequencingSession::with_seed(content(4), 7);
        solve(&mut s);
        assert!(!s.is_complete());
        assert!(s.check());
        assert!(s.is_complete());
        assert_eq!(s.score().correct, 4);
    }

    #[test]
    fn test_moving_after_check_withdraws_submission() {
        let mut s = SequencingSession::with_seed(content(3), 1);
        solve(&mut s);
        s.check();
        s.move_item(0, 2);
        assert!(!s.is_submitted());
        assert!(!s.is_complete());
    }

    #[test]
    fn test_out_of_range_move_is_ignored() {
        let mut s = SequencingSession::with_seed(content(2), 3);
        let before = s.order().to_vec();
        assert!(!s.move_item(0, 5));
        assert_eq!(s.order(), before.as_slice());
    }

    #[test]
    fn test_reset_restores_initial_layout() {
        let mut s = SequencingSession::with_seed(content(4), 11);
        let initial = s.order().to_vec();
        solve(&mut s);
        s.reset();
        assert_eq!(s.order(), initial.as_slice());
    }
}
